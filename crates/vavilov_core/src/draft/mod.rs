//! Per-note scratch storage for unsaved edit-form values.
//!
//! # Responsibility
//! - Hold the latest unsaved field values per note id.
//! - Answer recovery lookups when an edit surface (re)opens.
//!
//! # Invariants
//! - Drafts never reach the persisted document; only an explicit save does.
//! - `put` runs per field-change event and stays O(1).
//! - Entries outlive a single edit session; only save, discard or delete
//!   removes them.
//!
//! # See also
//! - docs/architecture/edit-session.md

use crate::model::note::{NoteId, NoteRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Editable field values staged by an open edit surface.
///
/// The same shape as the wire record minus the immutable `id`; the surface
/// stages raw strings, including the kind selector value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftFields {
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

impl DraftFields {
    /// Captures the editable fields of a wire record.
    pub fn from_record(record: &NoteRecord) -> Self {
        Self {
            title: record.title.clone(),
            helper_type: record.helper_type.clone(),
            path: record.path.clone(),
            command: record.command.clone(),
            new_file: record.new_file.clone(),
            script_file: record.script_file.clone(),
            script_file_name: record.script_file_name.clone(),
        }
    }

    /// Overlays these values onto `record`, leaving its id untouched.
    pub fn apply_to(&self, record: &mut NoteRecord) {
        record.title = self.title.clone();
        record.helper_type = self.helper_type.clone();
        record.path = self.path.clone();
        record.command = self.command.clone();
        record.new_file = self.new_file.clone();
        record.script_file = self.script_file.clone();
        record.script_file_name = self.script_file_name.clone();
    }
}

/// In-memory draft store keyed by note id.
#[derive(Debug, Default)]
pub struct DraftCache {
    drafts: HashMap<NoteId, DraftFields>,
}

impl DraftCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores or overwrites the draft for `id`.
    pub fn put(&mut self, id: NoteId, fields: DraftFields) {
        self.drafts.insert(id, fields);
    }

    /// Returns the draft for `id`, if one survives.
    pub fn get(&self, id: NoteId) -> Option<&DraftFields> {
        self.drafts.get(&id)
    }

    /// Removes the draft for `id`. Returns whether one existed.
    pub fn clear(&mut self, id: NoteId) -> bool {
        self.drafts.remove(&id).is_some()
    }
}
