//! Wire messages exchanged with the edit surface.
//!
//! # Responsibility
//! - Define both message directions of the edit session protocol with
//!   their exact `command` tags.
//! - Keep the double-encoded note payload convention in one place.
//!
//! # Invariants
//! - Inbound messages tolerate unknown extra fields.
//! - `receiveDataInWebview` carries the note as a JSON string, not as a
//!   nested object.
//!
//! # See also
//! - docs/architecture/edit-session.md

use crate::draft::DraftFields;
use crate::model::note::{NoteId, NoteRecord};
use serde::{Deserialize, Serialize};

/// Messages sent by the edit surface to the controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum SurfaceMessage {
    /// Ask for the session note. The controller answers with
    /// [`ControllerMessage::ReceiveDataInWebview`].
    #[serde(rename = "requestNoteData")]
    RequestNoteData,
    /// Stage the current editable values as the session note's draft.
    /// Sent on every field-change event.
    #[serde(rename = "stageDraft")]
    StageDraft { fields: DraftFields },
    /// Drop the session note's draft and ask for the last-saved values.
    #[serde(rename = "discardDraft")]
    DiscardDraft,
    /// Commit a full note wholesale. `note.id` must already exist.
    #[serde(rename = "updateNote")]
    UpdateNote { note: NoteRecord },
    /// Remove the note named by `note.id`.
    #[serde(rename = "deleteNote")]
    DeleteNote { note: DeleteTarget },
}

/// Id-only payload of [`SurfaceMessage::DeleteNote`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteTarget {
    pub id: NoteId,
}

/// Messages sent by the controller to the edit surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum ControllerMessage {
    /// Delivers the session note. `payload` is the wire record encoded as
    /// a JSON string; `recovered` tells the surface it is looking at
    /// unsaved draft values and must show the unsaved marker.
    #[serde(rename = "receiveDataInWebview")]
    ReceiveDataInWebview {
        payload: String,
        #[serde(default)]
        recovered: bool,
    },
}

impl ControllerMessage {
    /// Builds the delivery message for one wire record.
    pub fn receive_data(record: &NoteRecord, recovered: bool) -> serde_json::Result<Self> {
        Ok(Self::ReceiveDataInWebview {
            payload: serde_json::to_string(record)?,
            recovered,
        })
    }

    /// Decodes the carried wire record back out of the payload string.
    pub fn decode_payload(&self) -> serde_json::Result<NoteRecord> {
        match self {
            Self::ReceiveDataInWebview { payload, .. } => serde_json::from_str(payload),
        }
    }
}
