//! Scene leaves.
//!
//! Each leaf owns its local interaction state and any reveal timers it scheduled.
//! Replacing the [`SceneView`] drops the previous leaf and with it every pending timer.

mod bouquet;
mod intro;
mod love_note;
mod question;
mod quiz;

pub use bouquet::BouquetScene;
pub use intro::IntroScene;
pub use love_note::LoveNoteScene;
pub use question::QuestionScene;
pub use quiz::QuizScene;

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::Line,
    widgets::{Paragraph, Widget, Wrap},
};

use crate::config::Config;
use crate::core::{AnswerRecord, RevealScheduler, Scene};
use crate::ui::effect::Effect;

/// The active scene, one variant per [`Scene`]
pub enum SceneView {
    Intro(IntroScene),
    Quiz(QuizScene),
    Question(QuestionScene),
    Bouquet(BouquetScene),
    LoveNote(LoveNoteScene),
}

impl SceneView {
    /// Build the leaf for `scene`. Leaves that reveal content over time start their
    /// first timer here.
    pub fn enter(
        scene: Scene,
        answers: &AnswerRecord,
        config: &Config,
        scheduler: RevealScheduler,
    ) -> Self {
        match scene {
            Scene::Intro => SceneView::Intro(IntroScene::new(
                config.rendered_intro_lines(),
                config.timing.intro_interval,
                scheduler,
            )),
            Scene::Quiz => SceneView::Quiz(QuizScene::new()),
            Scene::Question => SceneView::Question(QuestionScene::new()),
            Scene::Bouquet => SceneView::Bouquet(BouquetScene::new(
                config.heart_scale,
                config.timing.bouquet_text_delay,
                scheduler,
            )),
            Scene::LoveNote => SceneView::LoveNote(LoveNoteScene::new(
                config.rendered_note_lines(),
                config.timing.note_interval,
                &config.recipient,
                &config.sender,
                answers.clone(),
                scheduler,
            )),
        }
    }

    pub fn scene(&self) -> Scene {
        match self {
            SceneView::Intro(_) => Scene::Intro,
            SceneView::Quiz(_) => Scene::Quiz,
            SceneView::Question(_) => Scene::Question,
            SceneView::Bouquet(_) => Scene::Bouquet,
            SceneView::LoveNote(_) => Scene::LoveNote,
        }
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Vec<Effect> {
        match self {
            SceneView::Intro(s) => s.handle_key(code),
            SceneView::Quiz(s) => s.handle_key(code),
            SceneView::Question(s) => s.handle_key(code),
            SceneView::Bouquet(s) => s.handle_key(code),
            SceneView::LoveNote(s) => s.handle_key(code),
        }
    }

    /// A reveal timer of this activation fired
    pub fn on_reveal(&mut self, tag: u8) {
        match self {
            SceneView::Intro(s) => s.on_reveal(),
            SceneView::Bouquet(s) => s.on_reveal(),
            SceneView::LoveNote(s) => s.on_reveal(),
            SceneView::Quiz(_) | SceneView::Question(_) => {
                tracing::debug!(tag, "Reveal tick for a scene without timers");
            }
        }
    }

    pub fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        match self {
            SceneView::Intro(s) => s.key_hints(),
            SceneView::Quiz(s) => s.key_hints(),
            SceneView::Question(s) => s.key_hints(),
            SceneView::Bouquet(s) => s.key_hints(),
            SceneView::LoveNote(s) => s.key_hints(),
        }
    }
}

impl Widget for &SceneView {
    fn render(self, area: Rect, buf: &mut Buffer) {
        match self {
            SceneView::Intro(s) => s.render(area, buf),
            SceneView::Quiz(s) => s.render(area, buf),
            SceneView::Question(s) => s.render(area, buf),
            SceneView::Bouquet(s) => s.render(area, buf),
            SceneView::LoveNote(s) => s.render(area, buf),
        }
    }
}

/// Whether `code` confirms the focused action
pub(crate) fn is_confirm(code: KeyCode) -> bool {
    matches!(code, KeyCode::Enter | KeyCode::Char(' '))
}

/// Render centered lines, vertically centered in `area`
pub(crate) fn render_centered(lines: Vec<Line<'_>>, area: Rect, buf: &mut Buffer) {
    render_scrolled(lines, 0, area, buf);
}

/// Like [`render_centered`], but content taller than `area` starts `scroll` lines down.
///
/// The offset is clamped so the last line never scrolls above the bottom edge.
pub(crate) fn render_scrolled(lines: Vec<Line<'_>>, scroll: usize, area: Rect, buf: &mut Buffer) {
    let total = lines.len();
    let visible = area.height as usize;
    let top = area.height.saturating_sub(total as u16) / 2;
    let scroll = scroll.min(total.saturating_sub(visible)) as u16;
    let inner = Rect {
        x: area.x,
        y: area.y + top,
        width: area.width,
        height: area.height - top,
    };
    let lines: Vec<Line<'_>> = lines.into_iter().map(|l| l.centered()).collect();
    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .scroll((scroll, 0))
        .render(inner, buf);
}
