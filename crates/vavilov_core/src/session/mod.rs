//! Edit session protocol, form layout and the application context.
//!
//! # Responsibility
//! - Define the two-way message contract between the controller and the
//!   single edit surface.
//! - Drive the session state machine, draft recovery and the mutation
//!   ordering (persist, refresh projection, notify surface).
//!
//! # Invariants
//! - At most one edit session is live at a time; a new open repurposes it.
//! - Failures a user can act on are notified before an error is returned.
//!
//! # See also
//! - docs/architecture/edit-session.md

use crate::action::ActionError;
use crate::model::note::NoteId;
use crate::repo::StoreError;
use std::error::Error;
use std::fmt::{Display, Formatter};

mod context;
pub mod form;
pub mod protocol;

pub use context::{AppContext, EditSession, SessionState};

pub type SessionResult<T> = Result<T, SessionError>;

#[derive(Debug)]
pub enum SessionError {
    /// The targeted note does not exist in the store.
    NoteNotFound(NoteId),
    /// A surface message arrived while no session was open.
    NoActiveSession,
    /// Persistence-layer failure.
    Store(StoreError),
    /// Helper dispatch failure.
    Action(ActionError),
    /// A protocol payload could not be encoded.
    Encode(serde_json::Error),
}

impl Display for SessionError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoteNotFound(id) => write!(f, "note not found: {id}"),
            Self::NoActiveSession => write!(f, "no edit session is open"),
            Self::Store(err) => write!(f, "{err}"),
            Self::Action(err) => write!(f, "{err}"),
            Self::Encode(err) => write!(f, "note payload could not be encoded: {err}"),
        }
    }
}

impl Error for SessionError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(err) => Some(err),
            Self::Action(err) => Some(err),
            Self::Encode(err) => Some(err),
            _ => None,
        }
    }
}

impl From<StoreError> for SessionError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NoteNotFound(id),
            other => Self::Store(other),
        }
    }
}

impl From<ActionError> for SessionError {
    fn from(value: ActionError) -> Self {
        Self::Action(value)
    }
}

impl From<serde_json::Error> for SessionError {
    fn from(value: serde_json::Error) -> Self {
        Self::Encode(value)
    }
}
