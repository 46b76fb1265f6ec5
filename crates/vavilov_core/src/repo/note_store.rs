//! Note store contract and its JSON document implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the canonical note collection.
//! - Mirror every mutation into the persisted document synchronously.
//!
//! # Invariants
//! - Collection order is insertion order; no operation reorders entries.
//! - `update_note` replaces one entry wholesale and fails typed on an
//!   unknown id; `delete_note` is an idempotent no-op on an unknown id.
//! - Reads hand out copies, never references into the owned collection.
//!
//! # See also
//! - docs/architecture/data-model.md

use super::{StoreError, StoreResult};
use crate::model::note::{Note, NoteId, NoteRecord};
use crate::storage::{open_store, LoadOutcome, StoreFile};
use log::{info, warn};
use std::path::Path;
use std::time::Instant;

/// Store interface for note CRUD operations.
pub trait NoteStore {
    /// Appends a fresh default note, persists, returns its id.
    fn create_note(&mut self) -> StoreResult<NoteId>;
    /// Replaces the entry matching `note.id` wholesale and persists.
    fn update_note(&mut self, note: Note) -> StoreResult<()>;
    /// Removes the first entry with `id` and persists. Returns whether an
    /// entry was removed; an unknown id is a no-op, not an error.
    fn delete_note(&mut self, id: NoteId) -> StoreResult<bool>;
    /// Copy of the entry with `id`, if present.
    fn get_note(&self, id: NoteId) -> Option<Note>;
    /// Copy of the whole collection in insertion order.
    fn list_notes(&self) -> Vec<Note>;
}

/// Note store backed by one flat JSON document.
pub struct JsonNoteStore {
    file: StoreFile,
    notes: Vec<Note>,
}

impl JsonNoteStore {
    /// Opens the store inside `dir` and decodes the persisted collection.
    ///
    /// The returned [`LoadOutcome`] tells the caller how the document was
    /// brought into a usable state, for user-facing bootstrap messages.
    pub fn open(dir: impl AsRef<Path>) -> StoreResult<(Self, LoadOutcome)> {
        let opened = open_store(dir)?;
        let notes = opened
            .records
            .into_iter()
            .map(NoteRecord::into_note)
            .collect();

        Ok((
            Self {
                file: opened.file,
                notes,
            },
            opened.outcome,
        ))
    }

    /// Absolute location of the persisted document.
    pub fn store_path(&self) -> &Path {
        self.file.path()
    }

    fn persist(&self) -> StoreResult<()> {
        let records: Vec<NoteRecord> = self.notes.iter().map(NoteRecord::from_note).collect();
        self.file.write(&records)?;
        Ok(())
    }
}

impl NoteStore for JsonNoteStore {
    fn create_note(&mut self) -> StoreResult<NoteId> {
        let started_at = Instant::now();
        let note = Note::new_helper();
        let id = note.id;

        self.notes.push(note);
        self.persist()?;

        info!(
            "event=note_create module=repo status=ok id={} count={} duration_ms={}",
            id,
            self.notes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(id)
    }

    fn update_note(&mut self, note: Note) -> StoreResult<()> {
        let started_at = Instant::now();

        let position = match self.notes.iter().position(|entry| entry.id == note.id) {
            Some(position) => position,
            None => {
                warn!(
                    "event=contract_violation module=repo op=note_update error_code=not_found id={}",
                    note.id
                );
                return Err(StoreError::NotFound(note.id));
            }
        };

        let id = note.id;
        self.notes[position] = note;
        self.persist()?;

        info!(
            "event=note_update module=repo status=ok id={} duration_ms={}",
            id,
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn delete_note(&mut self, id: NoteId) -> StoreResult<bool> {
        let started_at = Instant::now();

        let position = match self.notes.iter().position(|entry| entry.id == id) {
            Some(position) => position,
            None => {
                warn!(
                    "event=contract_violation module=repo op=note_delete error_code=not_found id={}",
                    id
                );
                return Ok(false);
            }
        };

        self.notes.remove(position);
        self.persist()?;

        info!(
            "event=note_delete module=repo status=ok id={} count={} duration_ms={}",
            id,
            self.notes.len(),
            started_at.elapsed().as_millis()
        );
        Ok(true)
    }

    fn get_note(&self, id: NoteId) -> Option<Note> {
        self.notes.iter().find(|entry| entry.id == id).cloned()
    }

    fn list_notes(&self) -> Vec<Note> {
        self.notes.clone()
    }
}
