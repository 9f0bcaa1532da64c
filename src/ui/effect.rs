use crate::core::{AnswerRecord, Scene};
use crate::ui::components::Burst;

/// Side effects requested by a scene, executed by the app outside the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Fire a confetti burst
    Celebrate(Burst),
    /// Ask the sequencer to move on, optionally handing over the quiz answers
    Advance {
        next: Scene,
        answers: Option<AnswerRecord>,
    },
}

impl Effect {
    pub fn advance(next: Scene) -> Self {
        Effect::Advance {
            next,
            answers: None,
        }
    }
}
