use std::fs::{self, OpenOptions};
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use valentine::audio::playback_from_config;
use valentine::{ui, util, AnswerMirror, App, Config, NullMirror, Playback, SilentPlayback, StoreMirror};

/// An animated greeting card for the terminal
#[derive(Parser, Debug)]
#[command(name = "valentine", version, about)]
struct Cli {
    /// Directory for the config file, logs and saved answers (default: ~/.valentine)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Config file to use instead of <data-dir>/config.toml
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Name the card is addressed to
    #[arg(long)]
    recipient: Option<String>,

    /// Name the card is signed with
    #[arg(long)]
    sender: Option<String>,

    /// Disable background music
    #[arg(long)]
    no_music: bool,

    /// Do not save quiz answers
    #[arg(long)]
    no_persist: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    util::init_data_dir(cli.data_dir.clone());

    // Log to a file (~/.valentine/logs/valentine.log), the terminal belongs to the card
    fs::create_dir_all(util::logs_dir())?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .init();

    let config = load_config(&cli)?;
    tracing::info!(
        recipient = %config.recipient,
        persist = config.persist_answers,
        music = config.audio.enabled,
        "Starting card"
    );

    let mirror: Box<dyn AnswerMirror> = if config.persist_answers {
        StoreMirror::open_default_or_null()
    } else {
        Box::new(NullMirror)
    };

    let playback: Box<dyn Playback> = match playback_from_config(&config.audio) {
        Ok(playback) => playback,
        Err(e) => {
            tracing::warn!(error = %e, "Music unavailable, continuing without it");
            Box::new(SilentPlayback)
        }
    };

    ui::install_panic_hook();
    let mut app = App::new(config, mirror, playback);
    app.run().await
}

fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };

    if let Some(recipient) = &cli.recipient {
        config = config.with_recipient(recipient.as_str());
    }
    if let Some(sender) = &cli.sender {
        config = config.with_sender(sender.as_str());
    }
    if cli.no_music {
        config.audio.enabled = false;
    }
    if cli.no_persist {
        config.persist_answers = false;
    }
    Ok(config)
}
