use std::path::{Path, PathBuf};
use std::process::Stdio;

use thiserror::Error;
use tokio::process::{Child, Command};

use crate::config::AudioConfig;

#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("No audio player found on PATH")]
    NoPlayer,
    #[error("No track configured")]
    NoTrack,
    #[error("Track not found: {0}")]
    MissingTrack(PathBuf),
    #[error("Failed to start player: {0}")]
    Spawn(#[from] std::io::Error),
}

/// Play/pause control over a single looping track
pub trait Playback: Send {
    fn play(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self) -> Result<(), PlaybackError>;
}

/// Playback that does nothing, used when audio is disabled
#[derive(Debug, Default)]
pub struct SilentPlayback;

impl Playback for SilentPlayback {
    fn play(&mut self) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        Ok(())
    }
}

/// Command-line players we know how to loop quietly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerKind {
    Mpv,
    Ffplay,
    Afplay,
    Paplay,
    /// Unknown binary, invoked with just the track path
    Other,
}

impl PlayerKind {
    /// Search order when no player is configured
    pub const SEARCH_ORDER: [PlayerKind; 4] = [
        PlayerKind::Mpv,
        PlayerKind::Ffplay,
        PlayerKind::Afplay,
        PlayerKind::Paplay,
    ];

    pub fn binary_name(self) -> Option<&'static str> {
        match self {
            PlayerKind::Mpv => Some("mpv"),
            PlayerKind::Ffplay => Some("ffplay"),
            PlayerKind::Afplay => Some("afplay"),
            PlayerKind::Paplay => Some("paplay"),
            PlayerKind::Other => None,
        }
    }

    /// Guess the player kind from a binary path
    pub fn from_binary(path: &Path) -> Self {
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        Self::SEARCH_ORDER
            .into_iter()
            .find(|kind| kind.binary_name() == Some(stem))
            .unwrap_or(PlayerKind::Other)
    }

    /// Arguments placed before the track path
    pub fn args(self) -> &'static [&'static str] {
        match self {
            PlayerKind::Mpv => &["--no-video", "--loop-file=inf", "--really-quiet"],
            PlayerKind::Ffplay => &["-nodisp", "-loop", "0", "-loglevel", "quiet"],
            PlayerKind::Afplay | PlayerKind::Paplay | PlayerKind::Other => &[],
        }
    }
}

/// Plays the track through an external player process.
///
/// Pausing stops the process; playing again restarts the track.
pub struct ProcessPlayback {
    player: PathBuf,
    kind: PlayerKind,
    track: PathBuf,
    child: Option<Child>,
}

impl ProcessPlayback {
    pub fn new(player: PathBuf, track: PathBuf) -> Self {
        let kind = PlayerKind::from_binary(&player);
        Self {
            player,
            kind,
            track,
            child: None,
        }
    }

    /// Find the first known player on PATH
    pub fn find_player() -> Option<PathBuf> {
        PlayerKind::SEARCH_ORDER
            .iter()
            .filter_map(|kind| kind.binary_name())
            .find_map(|name| which::which(name).ok())
    }

    pub fn kind(&self) -> PlayerKind {
        self.kind
    }

    fn build_command(&self) -> Command {
        let mut cmd = Command::new(&self.player);
        cmd.args(self.kind.args());
        cmd.arg(&self.track);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::null());
        cmd.stderr(Stdio::null());
        cmd.kill_on_drop(true);
        cmd
    }

    fn is_running(&mut self) -> bool {
        match self.child.as_mut().map(|c| c.try_wait()) {
            Some(Ok(None)) => true,
            Some(Ok(Some(status))) => {
                tracing::debug!(%status, "Audio player exited");
                false
            }
            Some(Err(e)) => {
                tracing::debug!(error = %e, "Could not query audio player");
                false
            }
            None => false,
        }
    }
}

impl Playback for ProcessPlayback {
    fn play(&mut self) -> Result<(), PlaybackError> {
        if self.is_running() {
            return Ok(());
        }
        if !self.track.exists() {
            return Err(PlaybackError::MissingTrack(self.track.clone()));
        }
        let child = self.build_command().spawn()?;
        tracing::info!(
            player = %self.player.display(),
            track = %self.track.display(),
            pid = child.id(),
            "Started background music"
        );
        self.child = Some(child);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), PlaybackError> {
        if let Some(mut child) = self.child.take() {
            child.start_kill()?;
            tracing::info!("Stopped background music");
        }
        Ok(())
    }
}

/// Build the playback backend described by the audio config
pub fn playback_from_config(audio: &AudioConfig) -> Result<Box<dyn Playback>, PlaybackError> {
    if !audio.enabled {
        return Ok(Box::new(SilentPlayback));
    }
    let track = audio.track.clone().ok_or(PlaybackError::NoTrack)?;
    let player = audio
        .player
        .clone()
        .or_else(ProcessPlayback::find_player)
        .ok_or(PlaybackError::NoPlayer)?;
    Ok(Box::new(ProcessPlayback::new(player, track)))
}
