pub mod audio;
pub mod config;
pub mod core;
pub mod data;
pub mod ui;
pub mod util;

pub use audio::{Playback, SilentPlayback};
pub use config::Config;
pub use crate::core::{AnswerRecord, HeartToken, Scene, SceneSequencer, SequencerError};
pub use data::{AnswerMirror, LocalStore, NullMirror, StoreMirror};
pub use ui::App;
