use crossterm::event::KeyCode;
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Paragraph, Widget},
};

use super::{is_confirm, render_centered};
use crate::core::Scene;
use crate::ui::components::{palette, Burst, Button, ButtonVariant};
use crate::ui::effect::Effect;

/// Largest distance the decoy button jumps from its home position, in layout units
pub const DECOY_RANGE: f64 = 75.0;

const DECOY_LABEL: &str = "Let me rethink";

fn yes_burst() -> Burst {
    Burst::new(150, 100.0, 0.6).palette(palette::YES_CONFETTI)
}

/// The proposal. Saying no only leads to a view where yes is the sensible choice.
#[derive(Debug, Default)]
pub struct QuestionScene {
    rejected: bool,
    /// Offset of the decoy button from its home position
    decoy: (f64, f64),
}

impl QuestionScene {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_rejected(&self) -> bool {
        self.rejected
    }

    pub fn decoy_offset(&self) -> (f64, f64) {
        self.decoy
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Vec<Effect> {
        self.handle_key_with(code, &mut rand::rng())
    }

    pub fn handle_key_with<R: Rng + ?Sized>(&mut self, code: KeyCode, rng: &mut R) -> Vec<Effect> {
        match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => self.accept(),
            code if is_confirm(code) => self.accept(),
            KeyCode::Char('n') | KeyCode::Char('N') if !self.rejected => {
                tracing::debug!("Proposal declined, showing the second chance");
                self.rejected = true;
                Vec::new()
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Char('r') if self.rejected => {
                self.decoy = (
                    rng.random_range(-DECOY_RANGE..=DECOY_RANGE),
                    rng.random_range(-DECOY_RANGE..=DECOY_RANGE),
                );
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn accept(&mut self) -> Vec<Effect> {
        tracing::info!(after_rejection = self.rejected, "Proposal accepted");
        vec![
            Effect::Celebrate(yes_burst()),
            Effect::advance(Scene::Bouquet),
        ]
    }

    pub fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.rejected {
            vec![("y", "okay yes"), ("n", "rethink")]
        } else {
            vec![("y", "yes"), ("n", "no")]
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        let title = Style::default()
            .fg(palette::ROSE_400)
            .add_modifier(Modifier::BOLD);

        if !self.rejected {
            let lines = vec![
                Line::styled("Will you be my Valentine?", title),
                Line::default(),
                Button::new("YES").key("y").line(),
                Line::default(),
                Button::new("No")
                    .variant(ButtonVariant::Outline)
                    .key("n")
                    .line(),
            ];
            render_centered(lines, area, buf);
            return;
        }

        let lines = vec![
            Line::styled("Are you sure?", title),
            Line::default(),
            Line::styled(
                "Think about the flowers. And the kisses.",
                Style::default().fg(palette::ROSE_100),
            ),
            Line::default(),
            Button::new("Okay yes").key("y").line(),
        ];
        render_centered(lines, area, buf);
        self.render_decoy(area, buf);
    }

    /// Place the decoy around the lower middle of the card, shifted by its offset
    fn render_decoy(&self, area: Rect, buf: &mut Buffer) {
        let line = Button::new(DECOY_LABEL)
            .variant(ButtonVariant::Secondary)
            .key("n")
            .line();
        let width = (line.width() as u16).min(area.width);
        let home_x = area.x as f64 + area.width.saturating_sub(width) as f64 / 2.0;
        let home_y = area.y as f64 + area.height as f64 * 0.75;
        let reach_x = area.width.saturating_sub(width) as f64 / 2.0;
        let reach_y = area.height as f64 * 0.2;

        let x = home_x + self.decoy.0 / DECOY_RANGE * reach_x;
        let y = home_y + self.decoy.1 / DECOY_RANGE * reach_y;
        let max_x = area.right().saturating_sub(width);
        let max_y = area.bottom().saturating_sub(1);
        let rect = Rect {
            x: (x.round().max(area.x as f64) as u16).min(max_x),
            y: (y.round().max(area.y as f64) as u16).min(max_y),
            width,
            height: 1,
        };
        Paragraph::new(line).render(rect, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_yes_celebrates_and_requests_bouquet() {
        let mut question = QuestionScene::new();
        let effects = question.handle_key(KeyCode::Char('y'));
        assert_eq!(
            effects,
            vec![
                Effect::Celebrate(Burst::new(150, 100.0, 0.6).palette(palette::YES_CONFETTI)),
                Effect::advance(Scene::Bouquet),
            ]
        );
    }

    #[test]
    fn test_rejection_loop_stays_local() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut question = QuestionScene::new();

        assert!(question.handle_key_with(KeyCode::Char('n'), &mut rng).is_empty());
        assert!(question.is_rejected());
        assert_eq!(question.decoy_offset(), (0.0, 0.0));

        for _ in 0..50 {
            assert!(question.handle_key_with(KeyCode::Char('n'), &mut rng).is_empty());
            let (dx, dy) = question.decoy_offset();
            assert!((-DECOY_RANGE..=DECOY_RANGE).contains(&dx));
            assert!((-DECOY_RANGE..=DECOY_RANGE).contains(&dy));
        }
        assert_ne!(question.decoy_offset(), (0.0, 0.0));

        let effects = question.handle_key_with(KeyCode::Enter, &mut rng);
        assert_eq!(effects.last(), Some(&Effect::advance(Scene::Bouquet)));
    }

    #[test]
    fn test_decoy_stays_inside_area() {
        let mut question = QuestionScene::new();
        question.rejected = true;
        let area = Rect::new(0, 0, 40, 12);
        for decoy in [(-75.0, -75.0), (75.0, 75.0), (75.0, -75.0)] {
            question.decoy = decoy;
            let mut buf = Buffer::empty(area);
            question.render(area, &mut buf);
        }
    }
}
