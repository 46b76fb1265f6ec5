//! CLI probe entry point.
//!
//! # Responsibility
//! - Open the note store in a host-provided directory and print a
//!   deterministic summary of the collection.
//! - Keep output stable for quick local sanity checks.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use vavilov_core::{AppContext, Notifier};

struct StdoutNotifier;

impl Notifier for StdoutNotifier {
    fn info(&self, message: &str) {
        println!("info: {message}");
    }

    fn error(&self, message: &str) {
        eprintln!("error: {message}");
    }
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("vavilov: {message}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<(), String> {
    let storage_dir = resolve_storage_dir()?;

    let log_dir = storage_dir.join("logs");
    let log_dir = log_dir
        .to_str()
        .ok_or_else(|| format!("log directory is not valid UTF-8: {}", log_dir.display()))?
        .to_string();
    vavilov_core::init_logging(vavilov_core::default_log_level(), &log_dir)?;

    let notifier = StdoutNotifier;
    let context = AppContext::bootstrap(&storage_dir, &notifier)
        .map_err(|err| format!("failed to open note store: {err}"))?;

    println!("vavilov_core version={}", vavilov_core::core_version());
    println!("notes count={}", context.projection().rows().len());
    for row in context.projection().rows() {
        println!("note id={} icon={} title={}", row.id, row.icon, row.title);
    }

    Ok(())
}

fn resolve_storage_dir() -> Result<PathBuf, String> {
    let raw = match env::args().nth(1) {
        Some(arg) => arg,
        None => env::var("VAVILOV_STORAGE_DIR").map_err(|_| {
            "usage: vavilov_cli <storage-dir> (or set VAVILOV_STORAGE_DIR)".to_string()
        })?,
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err("storage directory cannot be empty".to_string());
    }

    let path = PathBuf::from(trimmed);
    if path.is_absolute() {
        return Ok(path);
    }
    let cwd =
        env::current_dir().map_err(|err| format!("cannot resolve current directory: {err}"))?;
    Ok(cwd.join(path))
}
