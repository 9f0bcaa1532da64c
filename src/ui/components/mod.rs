mod backdrop;
mod button;
mod confetti;
mod key_hints;
mod music_toggle;
pub mod palette;

pub use backdrop::{Backdrop, DriftKind, DriftParticle};
pub use button::{Button, ButtonVariant};
pub use confetti::{Burst, ConfettiField};
pub use key_hints::{key_hints_line, render_key_hints};
pub use music_toggle::MusicToggle;
