use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
};

use super::render_centered;
use crate::core::{QuizProgress, QuizStep, Scene};
use crate::ui::components::{palette, Burst, Button, ButtonVariant};
use crate::ui::effect::Effect;

/// Burst fired when an option is picked
fn selection_burst(intimate: bool) -> Burst {
    let colors = if intimate {
        palette::INTIMATE_CONFETTI
    } else {
        palette::QUIZ_CONFETTI
    };
    Burst::new(15, 40.0, 0.7).palette(colors)
}

fn completion_burst() -> Burst {
    Burst::new(100, 70.0, 0.6)
}

/// The quiz walk-through followed by the "Official Result" card
pub struct QuizScene {
    progress: QuizProgress,
}

impl QuizScene {
    pub fn new() -> Self {
        Self::with_progress(QuizProgress::new())
    }

    pub fn with_progress(progress: QuizProgress) -> Self {
        Self { progress }
    }

    pub fn progress(&self) -> &QuizProgress {
        &self.progress
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Vec<Effect> {
        if self.progress.is_completed() {
            return match code {
                KeyCode::Enter | KeyCode::Char(' ') => vec![Effect::Advance {
                    next: Scene::Question,
                    answers: Some(self.progress.answers().clone()),
                }],
                _ => Vec::new(),
            };
        }

        match code {
            KeyCode::Up | KeyCode::Char('k') => self.pick(|p| p.cycle_selection(-1)),
            KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => {
                self.pick(|p| p.cycle_selection(1))
            }
            KeyCode::Char(c @ '1'..='9') => {
                // Every explicit pick celebrates, even a repeat of the current one
                if self.progress.select(c as usize - '1' as usize) {
                    vec![Effect::Celebrate(selection_burst(self.progress.is_intimate()))]
                } else {
                    Vec::new()
                }
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.progress.next() {
                QuizStep::NeedsSelection => Vec::new(),
                QuizStep::NextQuestion(index) => {
                    tracing::debug!(index, "Quiz moved to next question");
                    Vec::new()
                }
                QuizStep::Completed => {
                    tracing::info!(answers = self.progress.answers().len(), "Quiz completed");
                    vec![Effect::Celebrate(completion_burst())]
                }
            },
            _ => Vec::new(),
        }
    }

    /// Move the selection and celebrate if it landed somewhere new
    fn pick(&mut self, change: impl FnOnce(&mut QuizProgress)) -> Vec<Effect> {
        let before = self.progress.selected();
        change(&mut self.progress);
        match self.progress.selected() {
            Some(_) if self.progress.selected() != before => {
                vec![Effect::Celebrate(selection_burst(self.progress.is_intimate()))]
            }
            _ => Vec::new(),
        }
    }

    pub fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.progress.is_completed() {
            vec![("enter", "continue")]
        } else if self.progress.selected().is_some() {
            vec![("↑↓", "change"), ("enter", "next")]
        } else {
            vec![("↑↓/1-3", "pick")]
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let lines = match self.progress.current() {
            Some(question) => {
                let mut lines = vec![
                    Line::styled(
                        format!("{}/{}", self.progress.index() + 1, self.progress.total()),
                        Style::default().fg(palette::ROSE_300),
                    ),
                    Line::default(),
                    Line::styled(
                        question.prompt,
                        Style::default()
                            .fg(palette::ROSE_100)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Line::default(),
                ];
                for (i, option) in question.options.iter().enumerate() {
                    let selected = self.progress.selected() == Some(i);
                    let variant = if selected {
                        ButtonVariant::Primary
                    } else {
                        ButtonVariant::Outline
                    };
                    let key = (i + 1).to_string();
                    let mut line = Button::new(option.text).variant(variant).line();
                    line.spans
                        .push(Span::styled(format!(" {key}"), Style::default().fg(palette::ROSE_800)));
                    lines.push(line);
                }
                lines.push(Line::default());
                if let Some(option) = self.progress.selected_option() {
                    lines.push(Line::styled(
                        option.response,
                        Style::default()
                            .fg(palette::ROSE_400)
                            .add_modifier(Modifier::ITALIC),
                    ));
                    lines.push(Line::default());
                    lines.push(Button::new("Next").key("enter").line());
                }
                lines
            }
            None => vec![
                Line::styled(
                    "Official Result",
                    Style::default()
                        .fg(palette::ROSE_400)
                        .add_modifier(Modifier::BOLD),
                ),
                Line::default(),
                Line::styled(
                    "You're officially my favorite person.",
                    Style::default().fg(palette::ROSE_100),
                ),
                Line::default(),
                Button::new("But wait...").key("enter").line(),
            ],
        };
        render_centered(lines, area, buf);
    }
}

impl Default for QuizScene {
    fn default() -> Self {
        Self::new()
    }
}
