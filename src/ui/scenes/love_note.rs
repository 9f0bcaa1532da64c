use std::time::Duration;

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
};

use super::{render_centered, render_scrolled};
use crate::core::{AnswerRecord, RevealScheduler, RevealTimer};
use crate::ui::components::{palette, Button, ButtonVariant};
use crate::ui::effect::Effect;

/// Closing note with a signature and the quiz results on request
pub struct LoveNoteScene {
    lines: Vec<String>,
    step: usize,
    recipient: String,
    sender: String,
    answers: AnswerRecord,
    show_results: bool,
    /// First visible line of the results list when it does not fit
    scroll_offset: usize,
    interval: Duration,
    scheduler: RevealScheduler,
    timer: Option<RevealTimer>,
}

impl LoveNoteScene {
    pub fn new(
        lines: Vec<String>,
        interval: Duration,
        recipient: &str,
        sender: &str,
        answers: AnswerRecord,
        scheduler: RevealScheduler,
    ) -> Self {
        let mut scene = Self {
            lines,
            step: 0,
            recipient: recipient.to_string(),
            sender: sender.to_string(),
            answers,
            show_results: false,
            scroll_offset: 0,
            interval,
            scheduler,
            timer: None,
        };
        scene.schedule_next();
        scene
    }

    fn schedule_next(&mut self) {
        self.timer = (self.step < self.lines.len())
            .then(|| self.scheduler.schedule(self.interval, 0));
    }

    pub fn on_reveal(&mut self) {
        self.step = (self.step + 1).min(self.lines.len());
        self.schedule_next();
    }

    pub fn visible_lines(&self) -> usize {
        (self.step + 1).min(self.lines.len())
    }

    /// Whether every line has been shown along with the signature
    pub fn is_signed(&self) -> bool {
        self.step >= self.lines.len()
    }

    pub fn answers(&self) -> &AnswerRecord {
        &self.answers
    }

    pub fn is_showing_results(&self) -> bool {
        self.show_results
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Vec<Effect> {
        if !self.is_signed() {
            return Vec::new();
        }
        match code {
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.show_results = !self.show_results;
                self.scroll_offset = 0;
            }
            KeyCode::Down | KeyCode::Char('j') if self.show_results => self.scroll_down(1),
            KeyCode::Up | KeyCode::Char('k') if self.show_results => self.scroll_up(1),
            _ => {}
        }
        Vec::new()
    }

    pub fn scroll_up(&mut self, amount: usize) {
        self.scroll_offset = self.scroll_offset.saturating_sub(amount);
    }

    /// Scroll towards the last answer. Rendering clamps further to the visible height.
    pub fn scroll_down(&mut self, amount: usize) {
        let max_scroll = self.results_lines().len().saturating_sub(1);
        self.scroll_offset = (self.scroll_offset + amount).min(max_scroll);
    }

    pub fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        match (self.is_signed(), self.show_results) {
            (false, _) => Vec::new(),
            (true, false) => vec![("p", "quiz results")],
            (true, true) => vec![("↑↓", "scroll"), ("p", "hide results")],
        }
    }

    /// The results view replaces the note so the whole record fits
    fn results_lines(&self) -> Vec<Line<'_>> {
        let body = Style::default().fg(palette::ROSE_100);
        let mut lines = vec![
            Button::new("P.S. Hide Quiz Results")
                .variant(ButtonVariant::Outline)
                .key("p")
                .line(),
            Line::default(),
        ];
        if self.answers.is_empty() {
            lines.push(Line::styled("No answers recorded.", body));
        }
        for (prompt, answer) in self.answers.iter() {
            lines.push(Line::styled(prompt, Style::default().fg(palette::ROSE_300)));
            lines.push(Line::styled(
                format!("→ {answer}"),
                body.add_modifier(Modifier::BOLD),
            ));
        }
        lines
    }

    fn note_lines(&self) -> Vec<Line<'_>> {
        let accent = Style::default().fg(palette::ROSE_400);
        let mut lines: Vec<Line<'_>> = self.lines[..self.visible_lines()]
            .iter()
            .map(|line| Line::styled(line.as_str(), Style::default().fg(palette::ROSE_100)))
            .collect();

        if self.is_signed() {
            lines.push(Line::default());
            lines.push(Line::styled(
                self.recipient.as_str(),
                Style::default()
                    .fg(palette::ROSE_600)
                    .add_modifier(Modifier::BOLD | Modifier::ITALIC),
            ));
            lines.push(Line::styled("Always yours", accent.add_modifier(Modifier::BOLD)));
            lines.push(Line::styled(self.sender.as_str(), accent));
            lines.push(Line::default());
            lines.push(
                Button::new("P.S. View Quiz Results")
                    .variant(ButtonVariant::Outline)
                    .key("p")
                    .line(),
            );
        }
        lines
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if self.show_results {
            render_scrolled(self.results_lines(), self.scroll_offset, area, buf);
        } else {
            render_centered(self.note_lines(), area, buf);
        }
    }
}
