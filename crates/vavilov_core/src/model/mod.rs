//! Domain model for helper notes.
//!
//! # Responsibility
//! - Define the canonical note entity used by core business logic.
//! - Keep the persisted wire shape and the in-memory shape explicitly
//!   separate, with conversion at the storage/protocol boundary.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - The wire record is the only shape that ever touches disk or the edit
//!   surface protocol.
//!
//! # See also
//! - docs/architecture/data-model.md

pub mod note;
