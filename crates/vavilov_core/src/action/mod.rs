//! Helper effect dispatch over the host trait seam.
//!
//! # Responsibility
//! - Check helper preconditions and hand the kind-specific effect to the
//!   host environment.
//! - Define the host capability and notification contracts the core is
//!   embedded behind.
//!
//! # Invariants
//! - Dispatch never mutates the note collection.
//! - Every failure carries a short user-readable message; nothing panics
//!   across the host boundary.
//!
//! # See also
//! - docs/architecture/host-integration.md

use crate::model::note::{HelperAction, HelperKind, Note};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type ActionResult<T> = Result<T, ActionError>;

/// Helper dispatch failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// The host has no open workspace to resolve paths against.
    NoWorkspace,
    /// A change-file helper holds no replacement content.
    EmptyFileContent,
    /// The helper's kind was never chosen.
    KindUnset,
    /// The host rejected or failed the delegated effect.
    Host { op: &'static str, message: String },
}

impl ActionError {
    /// Short notification text shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            Self::NoWorkspace => "Please open a workspace to use helpers.".to_string(),
            Self::EmptyFileContent => "No file content to apply.".to_string(),
            Self::KindUnset => "This helper has no type set.".to_string(),
            Self::Host { message, .. } => message.clone(),
        }
    }

    fn code(&self) -> &'static str {
        match self {
            Self::NoWorkspace => "no_workspace",
            Self::EmptyFileContent => "empty_file_content",
            Self::KindUnset => "kind_unset",
            Self::Host { .. } => "host_failed",
        }
    }
}

impl Display for ActionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoWorkspace => write!(f, "no workspace is open"),
            Self::EmptyFileContent => write!(f, "replacement file content is empty"),
            Self::KindUnset => write!(f, "helper kind is not set"),
            Self::Host { op, message } => write!(f, "host {op} failed: {message}"),
        }
    }
}

impl Error for ActionError {}

/// Host capabilities helper effects are delegated to.
pub trait HelperHost {
    /// Root directory of the currently open workspace, if any.
    fn workspace_root(&self) -> Option<PathBuf>;
    /// Shows a terminal with `cwd` as working directory and sends `command`
    /// as one input line.
    fn send_to_terminal(&self, cwd: &Path, command: &str) -> Result<(), String>;
    /// Overwrites the file at `path` with `contents`.
    fn write_file(&self, path: &Path, contents: &str) -> Result<(), String>;
}

/// User-facing notification sink provided by the host.
pub trait Notifier {
    fn info(&self, message: &str);
    fn error(&self, message: &str);
}

/// Runs the kind-specific effect of `note` through the host.
///
/// # Side effects
/// - Sends a terminal command or overwrites a file via the host.
/// - Notifies the user after a file overwrite.
/// - Emits `action_dispatch` logging events with kind and duration.
pub fn run_helper(
    note: &Note,
    host: &dyn HelperHost,
    notifier: &dyn Notifier,
) -> ActionResult<()> {
    let started_at = Instant::now();
    let kind = kind_label(note.kind());
    info!(
        "event=action_dispatch module=action status=start id={} kind={}",
        note.id, kind
    );

    match dispatch(note, host, notifier) {
        Ok(()) => {
            info!(
                "event=action_dispatch module=action status=ok id={} kind={} duration_ms={}",
                note.id,
                kind,
                started_at.elapsed().as_millis()
            );
            Ok(())
        }
        Err(err) => {
            match &err {
                ActionError::Host { .. } => error!(
                    "event=action_dispatch module=action status=error id={} kind={} error_code={} error={}",
                    note.id,
                    kind,
                    err.code(),
                    err
                ),
                _ => warn!(
                    "event=action_dispatch module=action status=error id={} kind={} error_code={} error={}",
                    note.id,
                    kind,
                    err.code(),
                    err
                ),
            }
            Err(err)
        }
    }
}

fn dispatch(note: &Note, host: &dyn HelperHost, notifier: &dyn Notifier) -> ActionResult<()> {
    match &note.action {
        HelperAction::RunCommand { path, command } => {
            let root = host.workspace_root().ok_or(ActionError::NoWorkspace)?;
            let cwd = root.join(path);
            host.send_to_terminal(&cwd, command)
                .map_err(|message| ActionError::Host {
                    op: "send_to_terminal",
                    message,
                })?;
            Ok(())
        }
        HelperAction::ChangeFile { path, new_file } => {
            let root = host.workspace_root().ok_or(ActionError::NoWorkspace)?;
            if new_file.is_empty() {
                return Err(ActionError::EmptyFileContent);
            }
            let target = root.join(path);
            host.write_file(&target, new_file)
                .map_err(|message| ActionError::Host {
                    op: "write_file",
                    message,
                })?;
            notifier.info(&format!("{} is changed.", target.display()));
            Ok(())
        }
        // Why: the host exposes no script API yet; accept and do nothing.
        HelperAction::RunScript { .. } => Ok(()),
        HelperAction::Unset => Err(ActionError::KindUnset),
    }
}

fn kind_label(kind: HelperKind) -> &'static str {
    match kind {
        HelperKind::RunCommand => "run_command",
        HelperKind::ChangeFile => "change_file",
        HelperKind::RunScript => "run_script",
        HelperKind::Unset => "unset",
    }
}
