//! Note store contracts over the persisted JSON document.
//!
//! # Responsibility
//! - Provide the CRUD contract every controller mutation goes through.
//! - Keep document layout details inside the storage boundary.
//!
//! # Invariants
//! - The store owns the only authoritative collection; callers get copies.
//! - Every mutation rewrites the persisted document before returning.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::note::NoteId;
use crate::storage::StorageError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod note_store;

pub use note_store::{JsonNoteStore, NoteStore};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
pub enum StoreError {
    Storage(StorageError),
    NotFound(NoteId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Storage(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Storage(err) => Some(err),
            Self::NotFound(_) => None,
        }
    }
}

impl From<StorageError> for StoreError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}
