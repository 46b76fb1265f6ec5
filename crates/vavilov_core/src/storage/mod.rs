//! JSON store document bootstrap and recovery entry points.
//!
//! # Responsibility
//! - Locate, create, load and rewrite the persisted note document.
//! - Back up and reset the document when its content is corrupt.
//!
//! # Invariants
//! - The persisted document is always a flat JSON array of wire records.
//! - Corrupt bytes are backed up beside the store file before the reset.
//! - Every successful open yields usable (possibly empty) records.
//!
//! # See also
//! - docs/architecture/data-model.md

use std::error::Error;
use std::fmt::{Display, Formatter};

mod store_file;

pub use store_file::{open_store, LoadOutcome, OpenedStore, StoreFile, STORE_FILE_NAME};

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Encode(serde_json::Error),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "note document could not be encoded: {err}"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Encode(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}
