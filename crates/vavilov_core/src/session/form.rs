//! Per-kind edit form layout tables.
//!
//! # Responsibility
//! - Export which inputs an edit surface renders for each helper kind, in
//!   render order, so surfaces do not duplicate the kind switch.
//!
//! # Invariants
//! - The kind selector is offered only while the kind is unset; once a
//!   kind is chosen it stays fixed for the note's lifetime.
//!
//! # See also
//! - docs/architecture/edit-session.md

use crate::model::note::HelperKind;

/// Editable inputs an edit surface can render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    KindSelector,
    Title,
    Path,
    Command,
    NewFile,
    ScriptFile,
    ScriptFileName,
}

impl FormField {
    /// Wire record field this input binds to. The kind selector binds to
    /// `helperType`.
    pub fn wire_name(self) -> &'static str {
        match self {
            Self::KindSelector => "helperType",
            Self::Title => "title",
            Self::Path => "path",
            Self::Command => "command",
            Self::NewFile => "newFile",
            Self::ScriptFile => "scriptFile",
            Self::ScriptFileName => "scriptFileName",
        }
    }
}

/// Kinds the selector offers for an unset helper.
pub const SELECTABLE_KINDS: [HelperKind; 2] = [HelperKind::RunCommand, HelperKind::ChangeFile];

const FIELDS_UNSET: &[FormField] = &[FormField::KindSelector, FormField::Title];

const FIELDS_RUN_COMMAND: &[FormField] = &[
    FormField::KindSelector,
    FormField::Title,
    FormField::Command,
    FormField::Path,
];

const FIELDS_CHANGE_FILE: &[FormField] = &[
    FormField::KindSelector,
    FormField::Title,
    FormField::Path,
    FormField::NewFile,
];

const FIELDS_RUN_SCRIPT: &[FormField] = &[
    FormField::KindSelector,
    FormField::Title,
    FormField::Command,
    FormField::ScriptFileName,
    FormField::Path,
    FormField::ScriptFile,
];

/// Inputs to render for `kind`, in render order.
pub fn editable_fields(kind: HelperKind) -> &'static [FormField] {
    match kind {
        HelperKind::RunCommand => FIELDS_RUN_COMMAND,
        HelperKind::ChangeFile => FIELDS_CHANGE_FILE,
        HelperKind::RunScript => FIELDS_RUN_SCRIPT,
        HelperKind::Unset => FIELDS_UNSET,
    }
}

/// Whether the kind selector accepts input for `kind`.
pub fn kind_selector_enabled(kind: HelperKind) -> bool {
    matches!(kind, HelperKind::Unset)
}
