//! Card fixtures: app construction and helpers that walk through scenes

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crossterm::event::KeyCode;
use valentine::data::MirrorError;
use valentine::ui::SceneView;
use valentine::{AnswerMirror, AnswerRecord, App, Config, Scene, SilentPlayback};

/// Mirror that remembers every record it was handed
#[derive(Clone, Default)]
pub struct RecordingMirror {
    pub writes: Arc<Mutex<Vec<AnswerRecord>>>,
}

impl AnswerMirror for RecordingMirror {
    fn mirror(&self, answers: &AnswerRecord) -> Result<(), MirrorError> {
        self.writes.lock().unwrap().push(answers.clone());
        Ok(())
    }
}

impl RecordingMirror {
    pub fn writes(&self) -> Vec<AnswerRecord> {
        self.writes.lock().unwrap().clone()
    }
}

/// Config with a fixed cast and quiet audio
pub fn test_config() -> Config {
    let mut config = Config::default()
        .with_recipient("Sam")
        .with_sender("Alex");
    config.audio.enabled = false;
    config
}

/// Build an app with a recording mirror. Must run inside a tokio runtime.
pub fn test_app() -> (App, RecordingMirror) {
    let mirror = RecordingMirror::default();
    let app = App::new(
        test_config(),
        Box::new(mirror.clone()),
        Box::new(SilentPlayback),
    );
    (app, mirror)
}

/// Deliver reveal ticks until `done` holds for the current view
pub async fn reveal_until(app: &mut App, done: impl Fn(&SceneView) -> bool) {
    while !done(app.view()) {
        app.next_reveal().await.expect("reveal channel closed");
    }
}

/// Let enough time pass for any confetti to burn out
pub async fn settle_confetti(app: &mut App) {
    tokio::time::advance(Duration::from_secs(5)).await;
    app.tick();
}

pub async fn finish_intro(app: &mut App) {
    assert_eq!(app.scene(), Scene::Intro);
    reveal_until(app, |v| matches!(v, SceneView::Intro(s) if s.is_fully_revealed())).await;
    app.handle_key(KeyCode::Enter);
    app.handle_key(KeyCode::Enter);
    assert_eq!(app.scene(), Scene::Quiz);
}

/// Answer every quiz question with the first option and leave the quiz
pub fn finish_quiz(app: &mut App) {
    assert_eq!(app.scene(), Scene::Quiz);
    for _ in 0..valentine::core::QUESTIONS.len() {
        app.handle_key(KeyCode::Char('1'));
        app.handle_key(KeyCode::Enter);
    }
    app.handle_key(KeyCode::Enter);
    assert_eq!(app.scene(), Scene::Question);
}
