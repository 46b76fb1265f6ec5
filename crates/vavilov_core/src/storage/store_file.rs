//! Store document open and rewrite utilities.
//!
//! # Responsibility
//! - Open the note document inside the host-provided storage directory,
//!   creating it when absent.
//! - Classify the opened document as created, loaded or recovered.
//! - Rewrite the whole document after every collection mutation.
//!
//! # Invariants
//! - An absent or blank document initializes to an empty array.
//! - A document that is not UTF-8 or fails to parse is copied to a backup
//!   beside the store file, then reset to an empty array. One backup
//!   generation is kept.
//!
//! # See also
//! - docs/architecture/data-model.md

use super::StorageResult;
use crate::model::note::NoteRecord;
use log::{debug, error, info, warn};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Fixed name of the note document inside the storage directory.
pub const STORE_FILE_NAME: &str = "my-extension-data.txt";

const EMPTY_DOCUMENT: &str = "[]";
const CORRUPT_BACKUP_SUFFIX: &str = ".corrupt.bak";

/// How the persisted document was brought into a usable state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The document was absent or blank and has been initialized empty.
    Created,
    /// The document parsed cleanly.
    Loaded { count: usize },
    /// The document was corrupt; its bytes were backed up and the file reset.
    Recovered { backup_path: PathBuf },
}

/// Handle to the note document on disk.
#[derive(Debug, Clone)]
pub struct StoreFile {
    path: PathBuf,
}

impl StoreFile {
    /// Absolute location of the note document.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Rewrites the whole document from the given records.
    ///
    /// # Side effects
    /// - Replaces the file content wholesale with one compact JSON array.
    /// - Emits `store_write` logging events with count and duration.
    pub fn write(&self, records: &[NoteRecord]) -> StorageResult<()> {
        let started_at = Instant::now();

        let encoded = match serde_json::to_string(records) {
            Ok(encoded) => encoded,
            Err(err) => {
                error!(
                    "event=store_write module=storage status=error count={} error_code=encode_failed error={}",
                    records.len(),
                    err
                );
                return Err(err.into());
            }
        };

        match fs::write(&self.path, encoded) {
            Ok(()) => {
                debug!(
                    "event=store_write module=storage status=ok count={} duration_ms={}",
                    records.len(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=store_write module=storage status=error count={} duration_ms={} error_code=write_failed error={}",
                    records.len(),
                    started_at.elapsed().as_millis(),
                    err
                );
                Err(err.into())
            }
        }
    }
}

/// Opened document plus its decoded records and load classification.
#[derive(Debug)]
pub struct OpenedStore {
    pub file: StoreFile,
    pub records: Vec<NoteRecord>,
    pub outcome: LoadOutcome,
}

/// Opens the note document inside `dir`, creating directory and file as
/// needed and recovering from corrupt content.
///
/// # Side effects
/// - Creates the storage directory and an empty document when absent.
/// - Writes a backup file and truncates the document on corrupt content.
/// - Emits `store_open` logging events with outcome and duration.
pub fn open_store(dir: impl AsRef<Path>) -> StorageResult<OpenedStore> {
    let started_at = Instant::now();
    info!("event=store_open module=storage status=start");

    match load_or_init(dir.as_ref()) {
        Ok(opened) => {
            info!(
                "event=store_open module=storage status=ok outcome={} count={} duration_ms={}",
                outcome_label(&opened.outcome),
                opened.records.len(),
                started_at.elapsed().as_millis()
            );
            Ok(opened)
        }
        Err(err) => {
            error!(
                "event=store_open module=storage status=error duration_ms={} error_code=store_open_failed error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn load_or_init(dir: &Path) -> StorageResult<OpenedStore> {
    fs::create_dir_all(dir)?;
    let file = StoreFile {
        path: dir.join(STORE_FILE_NAME),
    };

    if !file.path.exists() {
        fs::write(&file.path, EMPTY_DOCUMENT)?;
        return Ok(OpenedStore {
            file,
            records: Vec::new(),
            outcome: LoadOutcome::Created,
        });
    }

    let raw = fs::read(&file.path)?;
    let content = match String::from_utf8(raw) {
        Ok(content) => content,
        Err(err) => {
            let reason = err.utf8_error().to_string();
            return recover_corrupt(file, &err.into_bytes(), &reason);
        }
    };

    if content.trim().is_empty() {
        // A blank file carries no data worth backing up.
        fs::write(&file.path, EMPTY_DOCUMENT)?;
        return Ok(OpenedStore {
            file,
            records: Vec::new(),
            outcome: LoadOutcome::Created,
        });
    }

    match serde_json::from_str::<Vec<NoteRecord>>(&content) {
        Ok(records) => {
            let count = records.len();
            Ok(OpenedStore {
                file,
                records,
                outcome: LoadOutcome::Loaded { count },
            })
        }
        Err(err) => recover_corrupt(file, content.as_bytes(), &err.to_string()),
    }
}

fn recover_corrupt(file: StoreFile, raw: &[u8], reason: &str) -> StorageResult<OpenedStore> {
    let backup_path = backup_path(&file.path);
    warn!(
        "event=store_recover module=storage status=start error_code=corrupt_document error={}",
        reason
    );
    fs::write(&backup_path, raw)?;
    fs::write(&file.path, EMPTY_DOCUMENT)?;
    warn!(
        "event=store_recover module=storage status=ok backup={:?}",
        backup_path
    );
    Ok(OpenedStore {
        file,
        records: Vec::new(),
        outcome: LoadOutcome::Recovered { backup_path },
    })
}

fn backup_path(store_path: &Path) -> PathBuf {
    let mut raw = store_path.as_os_str().to_os_string();
    raw.push(CORRUPT_BACKUP_SUFFIX);
    PathBuf::from(raw)
}

fn outcome_label(outcome: &LoadOutcome) -> &'static str {
    match outcome {
        LoadOutcome::Created => "created",
        LoadOutcome::Loaded { .. } => "loaded",
        LoadOutcome::Recovered { .. } => "recovered",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backup_path_appends_suffix_to_store_name() {
        let path = Path::new("/tmp/store/my-extension-data.txt");
        assert_eq!(
            backup_path(path),
            PathBuf::from("/tmp/store/my-extension-data.txt.corrupt.bak")
        );
    }

    #[test]
    fn outcome_labels_are_stable() {
        assert_eq!(outcome_label(&LoadOutcome::Created), "created");
        assert_eq!(outcome_label(&LoadOutcome::Loaded { count: 3 }), "loaded");
        assert_eq!(
            outcome_label(&LoadOutcome::Recovered {
                backup_path: PathBuf::new()
            }),
            "recovered"
        );
    }
}
