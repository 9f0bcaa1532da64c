//! Local persistence for the card
//!
//! A SQLite-backed key-value store and the answer mirror written on top of it.

mod local_store;
mod migrations;
mod mirror;

pub use local_store::{LocalStore, StoreError};
pub use mirror::{AnswerMirror, MirrorError, NullMirror, StoreMirror, ANSWERS_SLOT};
