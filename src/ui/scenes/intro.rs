use std::time::Duration;

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
};

use super::{is_confirm, render_centered};
use crate::core::{RevealScheduler, RevealTimer, Scene};
use crate::ui::components::{palette, Button};
use crate::ui::effect::Effect;

/// Opening lines revealed one by one, then a "Who?" exchange.
pub struct IntroScene {
    lines: Vec<String>,
    /// Number of lines revealed beyond the first
    step: usize,
    answered: bool,
    interval: Duration,
    scheduler: RevealScheduler,
    timer: Option<RevealTimer>,
}

impl IntroScene {
    pub fn new(lines: Vec<String>, interval: Duration, scheduler: RevealScheduler) -> Self {
        let mut scene = Self {
            lines,
            step: 0,
            answered: false,
            interval,
            scheduler,
            timer: None,
        };
        scene.schedule_next();
        scene
    }

    fn schedule_next(&mut self) {
        self.timer = if self.step < self.lines.len() {
            Some(self.scheduler.schedule(self.interval, 0))
        } else {
            None
        };
    }

    pub fn on_reveal(&mut self) {
        if self.step < self.lines.len() {
            self.step += 1;
        }
        self.schedule_next();
    }

    /// Number of lines currently visible
    pub fn visible_lines(&self) -> usize {
        (self.step + 1).min(self.lines.len())
    }

    /// Whether every line has been shown and the "Who?" button is up
    pub fn is_fully_revealed(&self) -> bool {
        self.step >= self.lines.len()
    }

    pub fn is_answered(&self) -> bool {
        self.answered
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Vec<Effect> {
        if !is_confirm(code) || !self.is_fully_revealed() {
            return Vec::new();
        }
        if self.answered {
            vec![Effect::advance(Scene::Quiz)]
        } else {
            self.answered = true;
            Vec::new()
        }
    }

    pub fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.is_fully_revealed() {
            vec![("enter", "continue")]
        } else {
            Vec::new()
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let text_style = Style::default().fg(palette::ROSE_100);
        let mut lines: Vec<Line<'_>> = Vec::new();
        for line in &self.lines[..self.visible_lines()] {
            lines.push(Line::styled(line.as_str(), text_style));
            lines.push(Line::default());
        }

        if self.answered {
            lines.push(Line::styled(
                "You, obviously.",
                Style::default()
                    .fg(palette::ROSE_400)
                    .add_modifier(Modifier::BOLD),
            ));
            lines.push(Line::default());
            lines.push(Button::new("Continue").key("enter").line());
        } else if self.is_fully_revealed() {
            lines.push(Button::new("Who?").key("enter").line());
        }

        render_centered(lines, area, buf);
    }
}
