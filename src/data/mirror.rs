//! Best-effort mirror of the quiz answers into local storage

use thiserror::Error;

use super::local_store::{LocalStore, StoreError};
use crate::core::AnswerRecord;

/// Fixed slot the answers are written to
pub const ANSWERS_SLOT: &str = "valentine_quiz_answers";

#[derive(Debug, Error)]
pub enum MirrorError {
    #[error("Failed to serialize answers: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("Failed to write answers: {0}")]
    Store(#[from] StoreError),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Write-only sink for a completed answer record.
///
/// Callers treat failures as non-fatal; nothing ever reads the mirror back.
pub trait AnswerMirror: Send {
    fn mirror(&self, answers: &AnswerRecord) -> Result<(), MirrorError>;
}

/// Mirror that discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullMirror;

impl AnswerMirror for NullMirror {
    fn mirror(&self, _answers: &AnswerRecord) -> Result<(), MirrorError> {
        Ok(())
    }
}

/// Mirror that stores the answers as a JSON object in [`ANSWERS_SLOT`]
#[derive(Clone, Debug)]
pub struct StoreMirror {
    store: LocalStore,
}

impl StoreMirror {
    pub fn new(store: LocalStore) -> Self {
        Self { store }
    }

    /// Open the default store, falling back to [`NullMirror`] when it is unusable
    pub fn open_default_or_null() -> Box<dyn AnswerMirror> {
        match LocalStore::open_default() {
            Ok(store) => Box::new(StoreMirror::new(store)),
            Err(e) => {
                tracing::warn!(error = %e, "Local storage unavailable, answers will not be saved");
                Box::new(NullMirror)
            }
        }
    }
}

impl AnswerMirror for StoreMirror {
    fn mirror(&self, answers: &AnswerRecord) -> Result<(), MirrorError> {
        let json = serde_json::to_string(answers)?;
        self.store.set_item(ANSWERS_SLOT, &json)?;
        tracing::debug!(answers = answers.len(), slot = ANSWERS_SLOT, "Mirrored quiz answers");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_store_mirror_writes_json_object() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("store.db")).unwrap();
        let mirror = StoreMirror::new(store.clone());

        let answers: AnswerRecord = [("Pick one:", "Flowers"), ("Vibe?", "Cozy")]
            .into_iter()
            .collect();
        mirror.mirror(&answers).unwrap();

        let stored = store.get_item(ANSWERS_SLOT).unwrap().unwrap();
        assert_eq!(stored, r#"{"Pick one:":"Flowers","Vibe?":"Cozy"}"#);
    }

    #[test]
    fn test_store_mirror_replaces_previous_record() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("store.db")).unwrap();
        let mirror = StoreMirror::new(store.clone());

        mirror
            .mirror(&[("A", "x")].into_iter().collect())
            .unwrap();
        mirror
            .mirror(&[("B", "y")].into_iter().collect())
            .unwrap();

        let stored = store.get_item(ANSWERS_SLOT).unwrap();
        assert_eq!(stored.as_deref(), Some(r#"{"B":"y"}"#));
    }

    #[test]
    fn test_store_mirror_reports_write_failure() {
        let dir = tempdir().unwrap();
        let store = LocalStore::open(dir.path().join("store.db")).unwrap();
        store.execute_batch("DROP TABLE local_storage;").unwrap();

        let result = StoreMirror::new(store).mirror(&AnswerRecord::new());
        assert!(matches!(result, Err(MirrorError::Store(_))));
    }
}
