//! Display-oriented list derived from the note collection.
//!
//! # Responsibility
//! - Project notes into rows the list widget can draw directly.
//! - Track staleness through a monotonically increasing revision counter.
//!
//! # Invariants
//! - Row order equals collection order; the projection never sorts.
//! - There is no subscription; callers refresh explicitly after every
//!   store mutation.
//! - Drafts never appear here; rows reflect persisted state only.
//!
//! # See also
//! - docs/architecture/data-model.md

use crate::model::note::{HelperKind, Note, NoteId};
use log::debug;

/// Icon tag for run-command rows.
pub const ICON_RUN_COMMAND: &str = "console";
/// Icon tag for change-file rows.
pub const ICON_CHANGE_FILE: &str = "file-code";
/// Icon tag for run-script rows.
pub const ICON_RUN_SCRIPT: &str = "test-view-icon";
/// Icon tag for rows whose helper kind is unset.
pub const ICON_DEFAULT: &str = "file";

/// Fixed kind-to-icon lookup used by every list row.
pub fn icon_for_kind(kind: HelperKind) -> &'static str {
    match kind {
        HelperKind::RunCommand => ICON_RUN_COMMAND,
        HelperKind::ChangeFile => ICON_CHANGE_FILE,
        HelperKind::RunScript => ICON_RUN_SCRIPT,
        HelperKind::Unset => ICON_DEFAULT,
    }
}

/// One drawable list row. Activation carries `id` back to the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub id: NoteId,
    pub title: String,
    pub icon: &'static str,
}

/// Materialized list rows plus the revision the widget compares against.
#[derive(Debug, Default)]
pub struct ListProjection {
    rows: Vec<NoteRow>,
    revision: u64,
}

impl ListProjection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recomputes the rows from the current collection and advances the
    /// revision so listeners know the view is stale.
    pub fn refresh(&mut self, notes: &[Note]) {
        self.rows = notes
            .iter()
            .map(|note| NoteRow {
                id: note.id,
                title: note.title.clone(),
                icon: icon_for_kind(note.kind()),
            })
            .collect();
        self.revision += 1;

        debug!(
            "event=projection_refresh module=projection status=ok revision={} count={}",
            self.revision,
            self.rows.len()
        );
    }

    /// Current rows in collection order.
    pub fn rows(&self) -> &[NoteRow] {
        &self.rows
    }

    /// Revision of the last refresh. Starts at zero before the first one.
    pub fn revision(&self) -> u64 {
        self.revision
    }
}
