//! Core domain logic for Vavilov helpers.
//! This crate is the single source of truth for note persistence,
//! draft recovery and the edit session protocol.

pub mod action;
pub mod draft;
pub mod logging;
pub mod model;
pub mod projection;
pub mod repo;
pub mod session;
pub mod storage;

pub use action::{run_helper, ActionError, ActionResult, HelperHost, Notifier};
pub use draft::{DraftCache, DraftFields};
pub use logging::{default_log_level, init_logging, logging_status, LogConfig};
pub use model::note::{HelperAction, HelperKind, Note, NoteId, NoteRecord};
pub use projection::{icon_for_kind, ListProjection, NoteRow};
pub use repo::{JsonNoteStore, NoteStore, StoreError, StoreResult};
pub use session::{AppContext, EditSession, SessionError, SessionResult, SessionState};
pub use storage::{open_store, LoadOutcome, StorageError, StorageResult, STORE_FILE_NAME};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
