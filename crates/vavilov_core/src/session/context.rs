//! Application context: the controller endpoint of the edit protocol.
//!
//! # Responsibility
//! - Own the note store, the draft cache, the list projection and the
//!   single edit session.
//! - Handle surface messages and user actions with the fixed ordering
//!   persist, refresh projection, notify surface.
//!
//! # Invariants
//! - At most one session exists; opening another note repurposes it.
//! - Drafts survive a close; only save, discard or delete removes them.
//! - Draft values reach the surface only through delivery, never the
//!   projection.
//!
//! # See also
//! - docs/architecture/edit-session.md

use super::protocol::{ControllerMessage, SurfaceMessage};
use super::{SessionError, SessionResult};
use crate::action::{self, HelperHost, Notifier};
use crate::draft::{DraftCache, DraftFields};
use crate::model::note::{NoteId, NoteRecord};
use crate::projection::ListProjection;
use crate::repo::{JsonNoteStore, NoteStore, StoreError};
use crate::storage::LoadOutcome;
use log::{debug, info, warn};
use std::path::Path;

const NO_MATCHING_NOTE: &str = "No matching note found";

/// Lifecycle states of one edit surface interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Surface exists but has not requested its note yet.
    Unopened,
    /// Note data was requested and is being assembled.
    Requested,
    /// Last-saved values are on screen; no unsaved changes.
    Populated,
    /// Unsaved draft values are on screen.
    Editing,
    /// Surface disposed. Terminal.
    Closed,
}

/// The single live edit surface and its target note.
#[derive(Debug)]
pub struct EditSession {
    note_id: NoteId,
    state: SessionState,
    surface_title: String,
}

impl EditSession {
    fn new(note_id: NoteId, title: &str) -> Self {
        Self {
            note_id,
            state: SessionState::Unopened,
            surface_title: title.to_string(),
        }
    }

    fn repurpose(&mut self, note_id: NoteId, title: &str) {
        self.note_id = note_id;
        self.surface_title = title.to_string();
        self.state = SessionState::Unopened;
    }

    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Tab title for the surface: the note title, with the unsaved marker
    /// appended while draft values are on screen.
    pub fn display_title(&self) -> String {
        match self.state {
            SessionState::Editing => format!("{}*", self.surface_title),
            _ => self.surface_title.clone(),
        }
    }
}

/// Controller owning all mutable application state.
pub struct AppContext<S: NoteStore> {
    store: S,
    drafts: DraftCache,
    projection: ListProjection,
    session: Option<EditSession>,
}

impl AppContext<JsonNoteStore> {
    /// Opens the store inside `dir`, reports the load outcome to the user
    /// and builds a ready context.
    pub fn bootstrap(dir: impl AsRef<Path>, notifier: &dyn Notifier) -> SessionResult<Self> {
        let (store, outcome) = JsonNoteStore::open(dir)?;

        match &outcome {
            LoadOutcome::Created => notifier.info("Vavilov data file created."),
            LoadOutcome::Loaded { .. } => notifier.info(&format!(
                "Vavilov data is stored at {}.",
                store.store_path().display()
            )),
            LoadOutcome::Recovered { backup_path } => notifier.error(&format!(
                "Vavilov data file was unreadable and has been reset. The previous content was saved to {}.",
                backup_path.display()
            )),
        }

        Ok(Self::new(store))
    }
}

impl<S: NoteStore> AppContext<S> {
    /// Builds a context over an already-opened store and seeds the
    /// projection from it.
    pub fn new(store: S) -> Self {
        let mut context = Self {
            store,
            drafts: DraftCache::new(),
            projection: ListProjection::new(),
            session: None,
        };
        context.refresh_projection();
        context
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn projection(&self) -> &ListProjection {
        &self.projection
    }

    pub fn session(&self) -> Option<&EditSession> {
        self.session.as_ref()
    }

    /// Appends a fresh default note and returns its id for selection.
    pub fn create_note(&mut self) -> SessionResult<NoteId> {
        let id = self.store.create_note()?;
        self.refresh_projection();
        Ok(id)
    }

    /// Opens (or repurposes) the edit surface for `id`.
    ///
    /// A missing note is reported to the user and no session is opened.
    pub fn open_note(&mut self, id: NoteId, notifier: &dyn Notifier) -> SessionResult<()> {
        let note = match self.store.get_note(id) {
            Some(note) => note,
            None => {
                notifier.error(NO_MATCHING_NOTE);
                warn!(
                    "event=session_open module=session status=error error_code=note_not_found id={}",
                    id
                );
                return Err(SessionError::NoteNotFound(id));
            }
        };

        match self.session.as_mut() {
            Some(session) => session.repurpose(id, &note.title),
            None => self.session = Some(EditSession::new(id, &note.title)),
        }

        info!("event=session_open module=session status=ok id={}", id);
        Ok(())
    }

    /// Handles one inbound surface message. The returned message, when
    /// present, must be delivered back to the surface.
    pub fn handle_surface_message(
        &mut self,
        message: SurfaceMessage,
        notifier: &dyn Notifier,
    ) -> SessionResult<Option<ControllerMessage>> {
        match message {
            SurfaceMessage::RequestNoteData => self.deliver_note().map(Some),
            SurfaceMessage::StageDraft { fields } => {
                self.stage_draft(fields)?;
                Ok(None)
            }
            SurfaceMessage::DiscardDraft => self.discard_draft().map(Some),
            SurfaceMessage::UpdateNote { note } => self.apply_update(note, notifier),
            SurfaceMessage::DeleteNote { note } => {
                self.delete_note(note.id)?;
                Ok(None)
            }
        }
    }

    /// Removes `id` from the store, drops its draft and closes the surface.
    ///
    /// Deleting an unknown id is an idempotent no-op returning `false`.
    pub fn delete_note(&mut self, id: NoteId) -> SessionResult<bool> {
        let removed = self.store.delete_note(id)?;
        self.drafts.clear(id);
        if removed {
            self.refresh_projection();
        }
        self.close_session();

        info!(
            "event=session_delete module=session status=ok id={} removed={}",
            id, removed
        );
        Ok(removed)
    }

    /// Closes the open surface, if any. Drafts survive for later recovery.
    pub fn close_session(&mut self) {
        if let Some(mut session) = self.session.take() {
            session.state = SessionState::Closed;
            debug!(
                "event=session_close module=session status=ok id={}",
                session.note_id
            );
        }
    }

    /// Runs the helper effect of `id` through the host.
    ///
    /// Lookup and precondition failures are reported to the user before
    /// the error is returned.
    pub fn run_helper(
        &self,
        id: NoteId,
        host: &dyn HelperHost,
        notifier: &dyn Notifier,
    ) -> SessionResult<()> {
        let note = match self.store.get_note(id) {
            Some(note) => note,
            None => {
                notifier.error(NO_MATCHING_NOTE);
                return Err(SessionError::NoteNotFound(id));
            }
        };

        if let Err(err) = action::run_helper(&note, host, notifier) {
            notifier.error(&err.user_message());
            return Err(err.into());
        }
        Ok(())
    }

    fn deliver_note(&mut self) -> SessionResult<ControllerMessage> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        session.state = SessionState::Requested;

        let note = self
            .store
            .get_note(session.note_id)
            .ok_or(SessionError::NoteNotFound(session.note_id))?;

        let mut record = NoteRecord::from_note(&note);
        let recovered = match self.drafts.get(session.note_id) {
            Some(draft) => {
                draft.apply_to(&mut record);
                true
            }
            None => false,
        };

        let reply = ControllerMessage::receive_data(&record, recovered)?;
        session.state = if recovered {
            SessionState::Editing
        } else {
            SessionState::Populated
        };

        debug!(
            "event=session_deliver module=session status=ok id={} recovered={}",
            session.note_id, recovered
        );
        Ok(reply)
    }

    fn stage_draft(&mut self, fields: DraftFields) -> SessionResult<()> {
        let session = self.session.as_mut().ok_or(SessionError::NoActiveSession)?;
        self.drafts.put(session.note_id, fields);
        session.state = SessionState::Editing;

        debug!(
            "event=session_stage module=session status=ok id={}",
            session.note_id
        );
        Ok(())
    }

    fn discard_draft(&mut self) -> SessionResult<ControllerMessage> {
        let id = self
            .session
            .as_ref()
            .ok_or(SessionError::NoActiveSession)?
            .note_id;
        let existed = self.drafts.clear(id);

        debug!(
            "event=session_discard module=session status=ok id={} existed={}",
            id, existed
        );
        self.deliver_note()
    }

    fn apply_update(
        &mut self,
        record: NoteRecord,
        notifier: &dyn Notifier,
    ) -> SessionResult<Option<ControllerMessage>> {
        let note = record.into_note();
        let id = note.id;
        let title = note.title.clone();

        match self.store.update_note(note) {
            Ok(()) => {}
            Err(StoreError::NotFound(_)) => {
                notifier.error(NO_MATCHING_NOTE);
                return Err(SessionError::NoteNotFound(id));
            }
            Err(other) => return Err(other.into()),
        }

        self.drafts.clear(id);
        self.refresh_projection();
        info!("event=session_update module=session status=ok id={}", id);

        let shows_note = self
            .session
            .as_ref()
            .map(|session| session.note_id == id)
            .unwrap_or(false);
        if !shows_note {
            return Ok(None);
        }

        if let Some(session) = self.session.as_mut() {
            session.surface_title = title;
        }
        self.deliver_note().map(Some)
    }

    fn refresh_projection(&mut self) {
        let notes = self.store.list_notes();
        self.projection.refresh(&notes);
    }
}
