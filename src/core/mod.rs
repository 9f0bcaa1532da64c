//! Core of the card: the scene model and the generators the scenes draw from.
//!
//! Nothing in here touches the terminal:
//! - Scene order and the sequencer that owns the current scene
//! - Quiz question bank and answer accumulation
//! - Heart layout generation for the bouquet
//! - Cancellable reveal timers

mod answers;
pub mod heart;
pub mod quiz;
mod scene;
mod sequencer;
pub mod timer;

pub use answers::AnswerRecord;
pub use heart::{generate as generate_heart, HeartToken, TokenPass};
pub use quiz::{QuizOption, QuizProgress, QuizQuestion, QuizStep, QUESTIONS};
pub use scene::Scene;
pub use sequencer::{SceneSequencer, SequencerError};
pub use timer::{Activation, RevealScheduler, RevealTick, RevealTimer};
