//! Background music toggle shown in the top-right corner.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::palette::{ROSE_300, ROSE_600};
use crate::audio::{Playback, SilentPlayback};

pub struct MusicToggle {
    playing: bool,
    playback: Box<dyn Playback>,
}

impl MusicToggle {
    pub fn new(playback: Box<dyn Playback>) -> Self {
        Self {
            playing: false,
            playback,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Flip between playing and paused.
    ///
    /// The displayed state always follows the request, even when the player fails.
    pub fn toggle(&mut self) {
        let result = if self.playing {
            self.playback.pause()
        } else {
            self.playback.play()
        };
        if let Err(e) = result {
            tracing::warn!(error = %e, playing = !self.playing, "Audio playback failed");
        }
        self.playing = !self.playing;
    }

    /// Stop playback on shutdown
    pub fn stop(&mut self) {
        if self.playing {
            if let Err(e) = self.playback.pause() {
                tracing::debug!(error = %e, "Failed to stop audio on exit");
            }
            self.playing = false;
        }
    }

    pub fn line(&self) -> Line<'static> {
        let (icon, label, color) = if self.playing {
            ("♪", "music on", ROSE_600)
        } else {
            ("×", "music off", ROSE_300)
        };
        Line::from(vec![
            Span::styled(format!("{icon} {label}"), Style::default().fg(color)),
            Span::styled(" m", Style::default().fg(ROSE_300)),
        ])
    }
}

impl Default for MusicToggle {
    fn default() -> Self {
        Self::new(Box::new(SilentPlayback))
    }
}

impl Widget for &MusicToggle {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line())
            .alignment(Alignment::Right)
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::PlaybackError;
    use std::sync::{Arc, Mutex};

    struct BrokenPlayback {
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    impl Playback for BrokenPlayback {
        fn play(&mut self) -> Result<(), PlaybackError> {
            self.calls.lock().unwrap().push("play");
            Err(PlaybackError::NoPlayer)
        }

        fn pause(&mut self) -> Result<(), PlaybackError> {
            self.calls.lock().unwrap().push("pause");
            Ok(())
        }
    }

    #[test]
    fn test_toggle_flips_even_when_playback_fails() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut toggle = MusicToggle::new(Box::new(BrokenPlayback {
            calls: calls.clone(),
        }));

        toggle.toggle();
        assert!(toggle.is_playing());
        toggle.toggle();
        assert!(!toggle.is_playing());

        assert_eq!(*calls.lock().unwrap(), vec!["play", "pause"]);
    }

    #[test]
    fn test_stop_only_pauses_when_playing() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let mut toggle = MusicToggle::new(Box::new(BrokenPlayback {
            calls: calls.clone(),
        }));

        toggle.stop();
        assert!(calls.lock().unwrap().is_empty());

        toggle.toggle();
        toggle.stop();
        assert!(!toggle.is_playing());
        assert_eq!(*calls.lock().unwrap(), vec!["play", "pause"]);
    }
}
