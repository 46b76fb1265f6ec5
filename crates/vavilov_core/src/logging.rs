//! Logging bootstrap for the embedding host.
//!
//! # Responsibility
//! - Start file-based rotating logs exactly once per process.
//! - Capture panics as sanitized log events.
//!
//! # Invariants
//! - Re-running with the same configuration is a no-op.
//! - Re-running with a different configuration is rejected.
//! - Initialization never panics.
//!
//! # See also
//! - docs/architecture/logging.md

use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "vavilov";
const MAX_LOG_FILE_SIZE_BYTES: u64 = 5 * 1024 * 1024;
const MAX_LOG_FILES: usize = 4;
const MAX_PANIC_PAYLOAD_CHARS: usize = 120;

static ACTIVE: OnceCell<ActiveLogging> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

/// Validated logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    level: &'static str,
    dir: PathBuf,
}

impl LogConfig {
    /// Validates a level string and a directory into a usable configuration.
    ///
    /// # Errors
    /// - `level` must be one of trace|debug|info|warn|error, matched
    ///   case-insensitively; `warning` is accepted for `warn`.
    /// - `dir` must be a non-empty absolute path.
    pub fn parse(level: &str, dir: &str) -> Result<Self, String> {
        let level = match level.trim().to_ascii_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" | "warning" => "warn",
            "error" => "error",
            other => {
                return Err(format!(
                    "unsupported log level `{other}`; expected trace|debug|info|warn|error"
                ))
            }
        };

        let trimmed = dir.trim();
        if trimmed.is_empty() {
            return Err("log directory cannot be empty".to_string());
        }
        let path = Path::new(trimmed);
        if !path.is_absolute() {
            return Err(format!("log directory must be absolute, got `{trimmed}`"));
        }

        Ok(Self {
            level,
            dir: path.to_path_buf(),
        })
    }

    pub fn level(&self) -> &'static str {
        self.level
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

struct ActiveLogging {
    config: LogConfig,
    _handle: LoggerHandle,
}

/// Starts rotating file logging under `log_dir`.
///
/// Returns `Ok(())` while logging is active, or a human-readable error
/// string when initialization fails.
///
/// # Invariants
/// - Repeat calls with the same level and directory are no-ops.
/// - Repeat calls with a different level or directory are rejected.
/// - Never panics.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let config = LogConfig::parse(level, log_dir)?;

    let active = ACTIVE.get_or_try_init(|| start_backend(config.clone()))?;
    if active.config != config {
        return Err(format!(
            "logging already active with level `{}` at `{}`; refusing to reconfigure",
            active.config.level,
            active.config.dir.display()
        ));
    }
    Ok(())
}

/// Returns the active configuration, or `None` before initialization.
pub fn logging_status() -> Option<LogConfig> {
    ACTIVE.get().map(|active| active.config.clone())
}

/// Default level for the current build mode: `debug` in debug builds,
/// `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_backend(config: LogConfig) -> Result<ActiveLogging, String> {
    std::fs::create_dir_all(&config.dir).map_err(|err| {
        format!(
            "failed to create log directory `{}`: {err}",
            config.dir.display()
        )
    })?;

    let handle = Logger::try_with_str(config.level)
        .map_err(|err| format!("invalid log level `{}`: {err}", config.level))?
        .log_to_file(
            FileSpec::default()
                .directory(config.dir.as_path())
                .basename(LOG_FILE_BASENAME),
        )
        .rotate(
            Criterion::Size(MAX_LOG_FILE_SIZE_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(MAX_LOG_FILES),
        )
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("failed to start logger: {err}"))?;

    install_panic_hook();

    info!(
        "event=logging_init module=logging status=ok level={} dir={} version={}",
        config.level,
        config.dir.display(),
        env!("CARGO_PKG_VERSION")
    );

    Ok(ActiveLogging {
        config,
        _handle: handle,
    })
}

fn install_panic_hook() {
    if PANIC_HOOK.get().is_some() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        error!(
            "event=panic_captured module=logging status=error location={} payload={}",
            location,
            panic_message(info)
        );
        previous(info);
    }));

    let _ = PANIC_HOOK.set(());
}

fn panic_message(info: &std::panic::PanicHookInfo<'_>) -> String {
    // Panic payloads can carry user text; flatten and cap before logging.
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    sanitize(&payload, MAX_PANIC_PAYLOAD_CHARS)
}

fn sanitize(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    let mut capped: String = flattened.chars().take(max_chars).collect();
    if flattened.chars().count() > max_chars {
        capped.push_str("...");
    }
    capped
}
