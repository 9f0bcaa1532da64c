//! Scene sequencer: the single authority over which scene is current.

use thiserror::Error;

use super::answers::AnswerRecord;
use super::scene::Scene;
use crate::data::{AnswerMirror, NullMirror};

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SequencerError {
    #[error("cannot move from {from} to {to} (next scene is {expected})")]
    OutOfOrder {
        from: Scene,
        to: Scene,
        expected: Scene,
    },
    #[error("the card already ended at {0}")]
    Finished(Scene),
}

/// Owns the current scene and the answer record.
///
/// Scene leaves never mutate either value; they request transitions and the
/// composition root forwards those requests to [`SceneSequencer::advance`].
pub struct SceneSequencer {
    current: Scene,
    answers: AnswerRecord,
    mirror: Box<dyn AnswerMirror>,
}

impl SceneSequencer {
    /// Create a sequencer positioned at the first scene with no answers
    pub fn new(mirror: Box<dyn AnswerMirror>) -> Self {
        Self {
            current: Scene::initial(),
            answers: AnswerRecord::new(),
            mirror,
        }
    }

    /// Reset to the first scene and drop all answers
    pub fn initialize(&mut self) {
        self.current = Scene::initial();
        self.answers = AnswerRecord::new();
        tracing::debug!(scene = %self.current, "Sequencer initialized");
    }

    /// Move to `next`, which must be the successor of the current scene.
    ///
    /// A payload replaces the answer record wholesale and is handed to the mirror.
    /// Mirror failures are logged and otherwise ignored. A rejected request leaves
    /// both the scene and the answers untouched.
    pub fn advance(
        &mut self,
        next: Scene,
        payload: Option<AnswerRecord>,
    ) -> Result<Scene, SequencerError> {
        let expected = self
            .current
            .successor()
            .ok_or(SequencerError::Finished(self.current))?;
        if next != expected {
            tracing::warn!(
                from = %self.current,
                to = %next,
                expected = %expected,
                "Rejected out-of-order scene transition"
            );
            return Err(SequencerError::OutOfOrder {
                from: self.current,
                to: next,
                expected,
            });
        }

        if let Some(answers) = payload {
            if let Err(e) = self.mirror.mirror(&answers) {
                tracing::warn!(
                    error = %e,
                    answers = answers.len(),
                    "Could not mirror quiz answers"
                );
            }
            self.answers = answers;
        }

        tracing::info!(from = %self.current, to = %next, "Scene transition");
        self.current = next;
        Ok(next)
    }

    pub fn current_scene(&self) -> Scene {
        self.current
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }
}

impl Default for SceneSequencer {
    fn default() -> Self {
        Self::new(Box::new(NullMirror))
    }
}

impl std::fmt::Debug for SceneSequencer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SceneSequencer")
            .field("current", &self.current)
            .field("answers", &self.answers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::MirrorError;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct RecordingMirror {
        writes: Arc<Mutex<Vec<AnswerRecord>>>,
    }

    impl AnswerMirror for RecordingMirror {
        fn mirror(&self, answers: &AnswerRecord) -> Result<(), MirrorError> {
            self.writes.lock().unwrap().push(answers.clone());
            Ok(())
        }
    }

    struct FailingMirror;

    impl AnswerMirror for FailingMirror {
        fn mirror(&self, _answers: &AnswerRecord) -> Result<(), MirrorError> {
            Err(MirrorError::Unavailable("storage disabled".into()))
        }
    }

    fn record(pairs: &[(&str, &str)]) -> AnswerRecord {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_starts_at_intro_with_no_answers() {
        let sequencer = SceneSequencer::default();
        assert_eq!(sequencer.current_scene(), Scene::Intro);
        assert!(sequencer.answers().is_empty());
    }

    #[test]
    fn test_advance_follows_playback_order() {
        let mut sequencer = SceneSequencer::default();
        for (n, expected) in Scene::ALL.iter().enumerate().skip(1) {
            sequencer.advance(*expected, None).unwrap();
            assert_eq!(sequencer.current_scene(), Scene::ALL[n]);
        }
        assert_eq!(sequencer.current_scene(), Scene::LoveNote);
    }

    #[test]
    fn test_payload_replaces_instead_of_merging() {
        let mut sequencer = SceneSequencer::default();
        sequencer.advance(Scene::Quiz, Some(record(&[("A", "x")]))).unwrap();
        sequencer
            .advance(Scene::Question, Some(record(&[("B", "y")])))
            .unwrap();

        assert_eq!(sequencer.answers(), &record(&[("B", "y")]));
    }

    #[test]
    fn test_advance_without_payload_keeps_answers() {
        let mut sequencer = SceneSequencer::default();
        sequencer.advance(Scene::Quiz, None).unwrap();
        sequencer
            .advance(Scene::Question, Some(record(&[("q", "a")])))
            .unwrap();
        sequencer.advance(Scene::Bouquet, None).unwrap();

        assert_eq!(sequencer.answers().get("q"), Some("a"));
    }

    #[test]
    fn test_quiz_scenario_carries_answers_in_order() {
        let mirror = RecordingMirror::default();
        let writes = mirror.writes.clone();
        let mut sequencer = SceneSequencer::new(Box::new(mirror));
        sequencer.advance(Scene::Quiz, None).unwrap();

        let mut answers = AnswerRecord::new();
        answers.record("Question one?", "A");
        answers.record("Question two?", "B");
        sequencer.advance(Scene::Question, Some(answers)).unwrap();

        let pairs: Vec<_> = sequencer.answers().iter().collect();
        assert_eq!(pairs, vec![("Question one?", "A"), ("Question two?", "B")]);

        let writes = writes.lock().unwrap();
        assert_eq!(writes.len(), 1);
        assert_eq!(&writes[0], sequencer.answers());
    }

    #[test]
    fn test_mirror_failure_does_not_block_transition() {
        let mut sequencer = SceneSequencer::new(Box::new(FailingMirror));
        sequencer.advance(Scene::Quiz, None).unwrap();

        let result = sequencer.advance(Scene::Question, Some(record(&[("q", "a")])));

        assert_eq!(result, Ok(Scene::Question));
        assert_eq!(sequencer.current_scene(), Scene::Question);
        assert_eq!(sequencer.answers().get("q"), Some("a"));
    }

    #[test]
    fn test_out_of_order_request_is_rejected_without_side_effects() {
        let mirror = RecordingMirror::default();
        let writes = mirror.writes.clone();
        let mut sequencer = SceneSequencer::new(Box::new(mirror));

        let result = sequencer.advance(Scene::Bouquet, Some(record(&[("q", "a")])));

        assert_eq!(
            result,
            Err(SequencerError::OutOfOrder {
                from: Scene::Intro,
                to: Scene::Bouquet,
                expected: Scene::Quiz,
            })
        );
        assert_eq!(sequencer.current_scene(), Scene::Intro);
        assert!(sequencer.answers().is_empty());
        assert!(writes.lock().unwrap().is_empty());
    }

    #[test]
    fn test_no_transition_out_of_love_note() {
        let mut sequencer = SceneSequencer::default();
        for scene in &Scene::ALL[1..] {
            sequencer.advance(*scene, None).unwrap();
        }

        let result = sequencer.advance(Scene::Intro, None);
        assert_eq!(result, Err(SequencerError::Finished(Scene::LoveNote)));
        assert_eq!(sequencer.current_scene(), Scene::LoveNote);
    }

    #[test]
    fn test_initialize_resets_session() {
        let mut sequencer = SceneSequencer::default();
        sequencer.advance(Scene::Quiz, Some(record(&[("q", "a")]))).unwrap();

        sequencer.initialize();

        assert_eq!(sequencer.current_scene(), Scene::Intro);
        assert!(sequencer.answers().is_empty());
    }
}
