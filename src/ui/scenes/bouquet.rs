use std::time::Duration;

use crossterm::event::KeyCode;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
};
use tokio::time::Instant;

use super::{is_confirm, render_centered};
use crate::core::heart::{self, Bounds};
use crate::core::{HeartToken, RevealScheduler, RevealTimer, Scene, TokenPass};
use crate::ui::components::{palette, Button};
use crate::ui::effect::Effect;

const FLOWERS: [&str; 4] = ["✿", "❀", "✾", "❁"];
const CAPTION_HEIGHT: u16 = 6;

/// The heart of flowers. The layout is generated once when the scene is entered.
pub struct BouquetScene {
    tokens: Vec<HeartToken>,
    bounds: Option<Bounds>,
    started: Instant,
    text_visible: bool,
    _text_timer: RevealTimer,
}

impl BouquetScene {
    pub fn new(scale: f64, text_delay: Duration, scheduler: RevealScheduler) -> Self {
        let tokens = heart::generate(scale);
        tracing::debug!(tokens = tokens.len(), scale, "Bouquet layout generated");
        Self {
            bounds: Bounds::of(&tokens),
            tokens,
            started: Instant::now(),
            text_visible: false,
            _text_timer: scheduler.schedule(text_delay, 0),
        }
    }

    pub fn tokens(&self) -> &[HeartToken] {
        &self.tokens
    }

    pub fn is_text_visible(&self) -> bool {
        self.text_visible
    }

    pub fn on_reveal(&mut self) {
        self.text_visible = true;
    }

    pub fn handle_key(&mut self, code: KeyCode) -> Vec<Effect> {
        if self.text_visible && is_confirm(code) {
            vec![Effect::advance(Scene::LoveNote)]
        } else {
            Vec::new()
        }
    }

    pub fn key_hints(&self) -> Vec<(&'static str, &'static str)> {
        if self.text_visible {
            vec![("enter", "one last thing")]
        } else {
            Vec::new()
        }
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        self.render_at(self.started.elapsed().as_secs_f64(), area, buf);
    }

    /// Render the state `elapsed` seconds after the scene was entered
    pub fn render_at(&self, elapsed: f64, area: Rect, buf: &mut Buffer) {
        let [heart_area, caption_area] =
            Layout::vertical([Constraint::Min(3), Constraint::Length(CAPTION_HEIGHT)]).areas(area);

        self.render_heart(elapsed, heart_area, buf);

        if self.text_visible {
            let lines = vec![
                Line::styled(
                    "For you.",
                    Style::default()
                        .fg(palette::ROSE_400)
                        .add_modifier(Modifier::BOLD),
                ),
                Line::styled(
                    "Because you deserve the prettiest things.",
                    Style::default().fg(palette::ROSE_100),
                ),
                Line::default(),
                Button::new("One last thing... ♥").key("enter").line(),
            ];
            render_centered(lines, caption_area, buf);
        }
    }

    fn render_heart(&self, elapsed: f64, area: Rect, buf: &mut Buffer) {
        let Some(bounds) = self.bounds else {
            return;
        };
        if area.width < 2 || area.height < 2 {
            return;
        }

        // Cells are about twice as tall as they are wide
        let cols = (area.width - 1) as f64;
        let rows = (area.height - 1) as f64;
        let per_col = (bounds.width() / cols).max(bounds.height() / (rows * 2.0));
        if per_col <= 0.0 || !per_col.is_finite() {
            return;
        }
        let used_w = bounds.width() / per_col;
        let used_h = bounds.height() / (per_col * 2.0);
        let left = area.x as f64 + (cols - used_w) / 2.0;
        let top = area.y as f64 + (rows - used_h) / 2.0;

        let mut visible: Vec<&HeartToken> =
            self.tokens.iter().filter(|t| elapsed >= t.delay).collect();
        visible.sort_by(|a, b| a.scale.total_cmp(&b.scale));

        for token in visible {
            let x = left + (token.x - bounds.min_x) / per_col;
            let y = top + (token.y - bounds.min_y) / (per_col * 2.0);
            let (x, y) = (x.round() as u16, y.round() as u16);
            if let Some(cell) = buf.cell_mut((x, y)) {
                let (glyph, style) = token_look(token);
                cell.set_symbol(glyph).set_style(style);
            }
        }
    }
}

fn token_look(token: &HeartToken) -> (&'static str, Style) {
    let bucket = (token.rotation.rem_euclid(360.0) / 90.0) as usize % FLOWERS.len();
    let (glyph, color): (&str, Color) = match token.pass {
        TokenPass::Outline => (FLOWERS[bucket % 2], palette::ROSE_500),
        TokenPass::Fill(ring) => (
            FLOWERS[bucket],
            match ring {
                0 => palette::ROSE_400,
                1 => palette::ROSE_300,
                _ => palette::ROSE_200,
            },
        ),
        TokenPass::Center => ("♥", palette::ROSE_600),
    };
    let mut style = Style::default().fg(color);
    if token.scale >= 1.2 {
        style = style.add_modifier(Modifier::BOLD);
    }
    (glyph, style)
}
