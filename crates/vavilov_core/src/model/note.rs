//! Note entity, helper payloads and the persisted wire record.
//!
//! # Responsibility
//! - Define the canonical note with one tagged payload per helper kind.
//! - Own the flat wire record shared by the store file and the edit session
//!   protocol, with its exact persisted field names.
//!
//! # Invariants
//! - `id` is unique across the collection and never reused.
//! - Collection order is insertion order and is display-significant.
//! - Kind strings on the wire are exactly `Run Command`, `Change File`,
//!   `Run Script`, and the empty string for unset helpers.
//!
//! # See also
//! - docs/architecture/data-model.md

use log::warn;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for one note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Title given to freshly created helpers.
pub const NEW_HELPER_TITLE: &str = "New Helper";

/// Wire string for [`HelperKind::RunCommand`].
pub const KIND_RUN_COMMAND: &str = "Run Command";
/// Wire string for [`HelperKind::ChangeFile`].
pub const KIND_CHANGE_FILE: &str = "Change File";
/// Wire string for [`HelperKind::RunScript`].
pub const KIND_RUN_SCRIPT: &str = "Run Script";
/// Wire string for [`HelperKind::Unset`].
pub const KIND_UNSET: &str = "";

/// Helper category, the discriminant of [`HelperAction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HelperKind {
    /// Run a shell command in a working directory.
    RunCommand,
    /// Overwrite a file with replacement content.
    ChangeFile,
    /// Run a stored script.
    RunScript,
    /// No kind chosen yet.
    Unset,
}

impl HelperKind {
    /// Stable string used on the wire and by display lookup tables.
    pub fn as_wire_str(self) -> &'static str {
        match self {
            Self::RunCommand => KIND_RUN_COMMAND,
            Self::ChangeFile => KIND_CHANGE_FILE,
            Self::RunScript => KIND_RUN_SCRIPT,
            Self::Unset => KIND_UNSET,
        }
    }
}

/// Parses one wire kind string.
///
/// Exact match only; anything other than the four known strings is `None`
/// and callers decide how to normalize.
pub fn parse_helper_kind(value: &str) -> Option<HelperKind> {
    match value {
        KIND_RUN_COMMAND => Some(HelperKind::RunCommand),
        KIND_CHANGE_FILE => Some(HelperKind::ChangeFile),
        KIND_RUN_SCRIPT => Some(HelperKind::RunScript),
        KIND_UNSET => Some(HelperKind::Unset),
        _ => None,
    }
}

/// Per-kind helper payload.
///
/// Each case carries only the fields meaningful for that kind; the flat
/// all-fields shape exists solely on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HelperAction {
    /// Run `command` in a terminal whose working directory is the workspace
    /// root joined with `path`.
    RunCommand { path: String, command: String },
    /// Overwrite the workspace-relative file at `path` with `new_file`.
    ChangeFile { path: String, new_file: String },
    /// Stored script payload. Recognized by dispatch but not yet wired to a
    /// host effect.
    RunScript {
        path: String,
        command: String,
        script_file: String,
        script_file_name: String,
    },
    /// Kind not chosen yet; the edit form keeps the kind selector enabled.
    Unset,
}

impl HelperAction {
    /// Returns the discriminant for lookup tables and dispatch.
    pub fn kind(&self) -> HelperKind {
        match self {
            Self::RunCommand { .. } => HelperKind::RunCommand,
            Self::ChangeFile { .. } => HelperKind::ChangeFile,
            Self::RunScript { .. } => HelperKind::RunScript,
            Self::Unset => HelperKind::Unset,
        }
    }
}

/// Canonical note entity owned by the note store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    /// Stable global ID, generated at create time, immutable afterwards.
    pub id: NoteId,
    /// User-facing title shown by the list view and the edit surface.
    pub title: String,
    /// Kind-specific payload.
    pub action: HelperAction,
}

impl Note {
    /// Creates the default note produced by the user-facing create action.
    pub fn new_helper() -> Self {
        Self::with_id(Uuid::new_v4(), NEW_HELPER_TITLE, HelperAction::Unset)
    }

    /// Creates a note with a caller-provided identity.
    ///
    /// Used by load paths and tests where the id already exists.
    pub fn with_id(id: NoteId, title: impl Into<String>, action: HelperAction) -> Self {
        Self {
            id,
            title: title.into(),
            action,
        }
    }

    /// Returns the helper kind of this note's payload.
    pub fn kind(&self) -> HelperKind {
        self.action.kind()
    }
}

/// Flat storage/protocol record with the exact persisted field names.
///
/// Every field is always present when serialized; fields the kind does not
/// carry are empty strings. `command`, `newFile`, `scriptFile` and
/// `scriptFileName` default to empty when absent from incoming documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    pub id: NoteId,
    pub title: String,
    pub helper_type: String,
    pub path: String,
    #[serde(default)]
    pub command: String,
    #[serde(default)]
    pub new_file: String,
    #[serde(default)]
    pub script_file: String,
    #[serde(default)]
    pub script_file_name: String,
}

impl NoteRecord {
    /// Flattens one domain note into the wire shape.
    pub fn from_note(note: &Note) -> Self {
        let mut record = Self {
            id: note.id,
            title: note.title.clone(),
            helper_type: note.kind().as_wire_str().to_string(),
            path: String::new(),
            command: String::new(),
            new_file: String::new(),
            script_file: String::new(),
            script_file_name: String::new(),
        };

        match &note.action {
            HelperAction::RunCommand { path, command } => {
                record.path = path.clone();
                record.command = command.clone();
            }
            HelperAction::ChangeFile { path, new_file } => {
                record.path = path.clone();
                record.new_file = new_file.clone();
            }
            HelperAction::RunScript {
                path,
                command,
                script_file,
                script_file_name,
            } => {
                record.path = path.clone();
                record.command = command.clone();
                record.script_file = script_file.clone();
                record.script_file_name = script_file_name.clone();
            }
            HelperAction::Unset => {}
        }

        record
    }

    /// Rebuilds the domain note from the wire shape.
    ///
    /// Unknown kind strings normalize to [`HelperKind::Unset`] with a warning;
    /// field values outside the resolved kind's payload are dropped and the
    /// record re-serializes in normalized form on the next persist.
    pub fn into_note(self) -> Note {
        let kind = match parse_helper_kind(&self.helper_type) {
            Some(kind) => kind,
            None => {
                warn!(
                    "event=helper_kind_unknown module=model id={} value={:?}",
                    self.id, self.helper_type
                );
                HelperKind::Unset
            }
        };

        let action = match kind {
            HelperKind::RunCommand => HelperAction::RunCommand {
                path: self.path,
                command: self.command,
            },
            HelperKind::ChangeFile => HelperAction::ChangeFile {
                path: self.path,
                new_file: self.new_file,
            },
            HelperKind::RunScript => HelperAction::RunScript {
                path: self.path,
                command: self.command,
                script_file: self.script_file,
                script_file_name: self.script_file_name,
            },
            HelperKind::Unset => HelperAction::Unset,
        };

        Note {
            id: self.id,
            title: self.title,
            action,
        }
    }
}
