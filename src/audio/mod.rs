//! Background music
//!
//! The card never depends on audio: every failure is logged and the toggle keeps
//! reflecting what the user asked for.

mod playback;

pub use playback::{
    playback_from_config, Playback, PlaybackError, PlayerKind, ProcessPlayback, SilentPlayback,
};
