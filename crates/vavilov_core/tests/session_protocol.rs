use std::cell::RefCell;
use std::fs;
use uuid::Uuid;
use vavilov_core::session::protocol::{ControllerMessage, DeleteTarget, SurfaceMessage};
use vavilov_core::{
    AppContext, DraftFields, HelperAction, JsonNoteStore, Note, NoteId, NoteRecord, NoteStore,
    Notifier, SessionError, SessionState, STORE_FILE_NAME,
};

#[test]
fn open_then_request_delivers_the_saved_note() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let (mut context, ids) = seeded_context(dir.path(), &notifier, 1);

    context.open_note(ids[0], &notifier).unwrap();
    assert_eq!(context.session().unwrap().state(), SessionState::Unopened);

    let reply = request_note(&mut context, &notifier);
    let record = reply.decode_payload().unwrap();
    let ControllerMessage::ReceiveDataInWebview { recovered, .. } = reply;

    assert!(!recovered);
    assert_eq!(record.id, ids[0]);
    assert_eq!(record.title, "New Helper");
    assert_eq!(record.helper_type, "");
    assert_eq!(context.session().unwrap().state(), SessionState::Populated);
    assert_eq!(context.session().unwrap().display_title(), "New Helper");
}

#[test]
fn opening_an_unknown_note_notifies_and_opens_no_session() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let (mut context, _) = seeded_context(dir.path(), &notifier, 1);

    let missing = Uuid::new_v4();
    let err = context.open_note(missing, &notifier).unwrap_err();

    assert!(matches!(err, SessionError::NoteNotFound(id) if id == missing));
    assert_eq!(notifier.last_error(), Some("No matching note found".to_string()));
    assert!(context.session().is_none());
}

#[test]
fn requesting_without_a_session_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let (mut context, _) = seeded_context(dir.path(), &notifier, 1);

    let err = context
        .handle_surface_message(SurfaceMessage::RequestNoteData, &notifier)
        .unwrap_err();

    assert!(matches!(err, SessionError::NoActiveSession));
}

#[test]
fn update_persists_refreshes_the_list_and_redelivers() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let (mut context, ids) = seeded_context(dir.path(), &notifier, 2);

    context.open_note(ids[0], &notifier).unwrap();
    request_note(&mut context, &notifier);
    let revision_before = context.projection().revision();

    let reply = context
        .handle_surface_message(
            SurfaceMessage::UpdateNote {
                note: run_command_record(ids[0], "Fetch Logs", "logs", "tail -n 50 app.log"),
            },
            &notifier,
        )
        .unwrap()
        .unwrap();
    let record = reply.decode_payload().unwrap();
    let ControllerMessage::ReceiveDataInWebview { recovered, .. } = reply;

    assert!(!recovered);
    assert_eq!(record.title, "Fetch Logs");
    assert_eq!(record.command, "tail -n 50 app.log");

    assert_eq!(context.store().get_note(ids[0]).unwrap().title, "Fetch Logs");
    assert_eq!(context.projection().revision(), revision_before + 1);
    assert_eq!(context.projection().rows()[0].title, "Fetch Logs");
    assert_eq!(context.projection().rows()[0].icon, "console");
    assert_eq!(context.session().unwrap().state(), SessionState::Populated);
    assert_eq!(context.session().unwrap().display_title(), "Fetch Logs");

    let (reloaded, _) = JsonNoteStore::open(dir.path()).unwrap();
    assert_eq!(reloaded.get_note(ids[0]).unwrap().title, "Fetch Logs");
}

#[test]
fn update_for_an_unknown_id_notifies_and_errors() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let (mut context, ids) = seeded_context(dir.path(), &notifier, 1);

    let missing = Uuid::new_v4();
    let err = context
        .handle_surface_message(
            SurfaceMessage::UpdateNote {
                note: run_command_record(missing, "ghost", ".", "true"),
            },
            &notifier,
        )
        .unwrap_err();

    assert!(matches!(err, SessionError::NoteNotFound(id) if id == missing));
    assert_eq!(notifier.last_error(), Some("No matching note found".to_string()));
    assert_eq!(context.store().get_note(ids[0]).unwrap().title, "New Helper");
    assert_eq!(context.store().list_notes().len(), 1);
}

#[test]
fn update_for_a_note_not_on_screen_returns_no_reply() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let (mut context, ids) = seeded_context(dir.path(), &notifier, 2);

    context.open_note(ids[0], &notifier).unwrap();
    request_note(&mut context, &notifier);
    let revision_before = context.projection().revision();

    let reply = context
        .handle_surface_message(
            SurfaceMessage::UpdateNote {
                note: run_command_record(ids[1], "Other", ".", "true"),
            },
            &notifier,
        )
        .unwrap();

    assert!(reply.is_none());
    assert_eq!(context.store().get_note(ids[1]).unwrap().title, "Other");
    assert_eq!(context.projection().revision(), revision_before + 1);
    assert_eq!(context.session().unwrap().note_id(), ids[0]);
}

#[test]
fn delete_message_removes_the_note_and_closes_the_surface() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let (mut context, ids) = seeded_context(dir.path(), &notifier, 2);

    context.open_note(ids[0], &notifier).unwrap();
    request_note(&mut context, &notifier);

    let reply = context
        .handle_surface_message(
            SurfaceMessage::DeleteNote {
                note: DeleteTarget { id: ids[0] },
            },
            &notifier,
        )
        .unwrap();

    assert!(reply.is_none());
    assert!(context.session().is_none());
    assert!(context.store().get_note(ids[0]).is_none());
    assert_eq!(context.projection().rows().len(), 1);
    assert_eq!(context.projection().rows()[0].id, ids[1]);
}

#[test]
fn delete_closes_the_surface_even_for_another_note() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let (mut context, ids) = seeded_context(dir.path(), &notifier, 2);

    context.open_note(ids[0], &notifier).unwrap();
    request_note(&mut context, &notifier);

    assert!(context.delete_note(ids[1]).unwrap());

    assert!(context.session().is_none());
    assert!(context.store().get_note(ids[0]).is_some());
}

#[test]
fn deleting_an_unknown_id_is_an_idempotent_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let (mut context, ids) = seeded_context(dir.path(), &notifier, 1);

    let revision_before = context.projection().revision();
    assert!(!context.delete_note(Uuid::new_v4()).unwrap());

    assert_eq!(context.projection().revision(), revision_before);
    assert_eq!(context.store().list_notes().len(), 1);
    assert_eq!(context.store().get_note(ids[0]).unwrap().title, "New Helper");
}

#[test]
fn opening_another_note_repurposes_the_single_surface() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let (mut context, ids) = seeded_context(dir.path(), &notifier, 2);

    context.open_note(ids[0], &notifier).unwrap();
    request_note(&mut context, &notifier);

    context.open_note(ids[1], &notifier).unwrap();
    let session = context.session().unwrap();
    assert_eq!(session.note_id(), ids[1]);
    assert_eq!(session.state(), SessionState::Unopened);

    let reply = request_note(&mut context, &notifier);
    let record = reply.decode_payload().unwrap();
    assert_eq!(record.id, ids[1]);
}

#[test]
fn session_walks_through_its_lifecycle_states() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();
    let (mut context, ids) = seeded_context(dir.path(), &notifier, 1);

    context.open_note(ids[0], &notifier).unwrap();
    assert_eq!(context.session().unwrap().state(), SessionState::Unopened);

    request_note(&mut context, &notifier);
    assert_eq!(context.session().unwrap().state(), SessionState::Populated);

    let mut fields = DraftFields::from_record(&NoteRecord::from_note(
        &context.store().get_note(ids[0]).unwrap(),
    ));
    fields.title = "Renamed".to_string();
    context
        .handle_surface_message(SurfaceMessage::StageDraft { fields }, &notifier)
        .unwrap();
    assert_eq!(context.session().unwrap().state(), SessionState::Editing);
    assert_eq!(context.session().unwrap().display_title(), "New Helper*");

    context
        .handle_surface_message(SurfaceMessage::DiscardDraft, &notifier)
        .unwrap();
    assert_eq!(context.session().unwrap().state(), SessionState::Populated);
    assert_eq!(context.session().unwrap().display_title(), "New Helper");

    context.close_session();
    assert!(context.session().is_none());
}

#[test]
fn bootstrap_reports_a_created_document() {
    let dir = tempfile::tempdir().unwrap();
    let notifier = RecordingNotifier::default();

    let context = AppContext::bootstrap(dir.path(), &notifier).unwrap();

    assert_eq!(notifier.infos(), vec!["Vavilov data file created."]);
    assert!(context.store().list_notes().is_empty());
}

#[test]
fn bootstrap_reports_where_existing_data_is_stored() {
    let dir = tempfile::tempdir().unwrap();
    {
        let notifier = RecordingNotifier::default();
        let (_, _) = seeded_context(dir.path(), &notifier, 1);
    }

    let notifier = RecordingNotifier::default();
    let context = AppContext::bootstrap(dir.path(), &notifier).unwrap();

    let infos = notifier.infos();
    assert_eq!(infos.len(), 1);
    assert!(infos[0].starts_with("Vavilov data is stored at "));
    assert!(infos[0].contains(STORE_FILE_NAME));
    assert_eq!(context.store().list_notes().len(), 1);
}

#[test]
fn bootstrap_reports_recovery_after_corruption() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join(STORE_FILE_NAME), "### not json ###").unwrap();

    let notifier = RecordingNotifier::default();
    let context = AppContext::bootstrap(dir.path(), &notifier).unwrap();

    let errors = notifier.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("has been reset"));
    assert!(errors[0].contains(".corrupt.bak"));
    assert!(notifier.infos().is_empty());
    assert!(context.store().list_notes().is_empty());
}

fn seeded_context(
    dir: &std::path::Path,
    notifier: &RecordingNotifier,
    count: usize,
) -> (AppContext<JsonNoteStore>, Vec<NoteId>) {
    let mut context = AppContext::bootstrap(dir, notifier).unwrap();
    let ids = (0..count)
        .map(|_| context.create_note().unwrap())
        .collect();
    (context, ids)
}

fn request_note(
    context: &mut AppContext<JsonNoteStore>,
    notifier: &RecordingNotifier,
) -> ControllerMessage {
    context
        .handle_surface_message(SurfaceMessage::RequestNoteData, notifier)
        .unwrap()
        .unwrap()
}

fn run_command_record(id: NoteId, title: &str, path: &str, command: &str) -> NoteRecord {
    NoteRecord::from_note(&Note::with_id(
        id,
        title,
        HelperAction::RunCommand {
            path: path.to_string(),
            command: command.to_string(),
        },
    ))
}

#[derive(Default)]
struct RecordingNotifier {
    infos: RefCell<Vec<String>>,
    errors: RefCell<Vec<String>>,
}

impl RecordingNotifier {
    fn infos(&self) -> Vec<String> {
        self.infos.borrow().clone()
    }

    fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }

    fn last_error(&self) -> Option<String> {
        self.errors.borrow().last().cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.infos.borrow_mut().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.borrow_mut().push(message.to_string());
    }
}
