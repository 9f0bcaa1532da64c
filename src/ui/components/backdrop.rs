//! Hearts and sparkles drifting up behind every scene.

use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use super::palette::{fade, ORANGE_300, ROSE_400};

const PARTICLE_COUNT: usize = 20;
/// Peak opacity reached halfway up the screen
const PEAK_OPACITY: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriftKind {
    Heart,
    Sparkle,
}

#[derive(Debug, Clone)]
pub struct DriftParticle {
    /// Horizontal position in percent of the width
    pub x: f64,
    /// Size in the 10..25 range; larger particles use a bolder glyph
    pub size: f64,
    /// Seconds to travel from below the bottom edge to above the top edge
    pub duration: f64,
    /// Seconds before the first trip starts
    pub delay: f64,
    pub kind: DriftKind,
}

impl DriftParticle {
    /// Vertical position (fraction of height, 1.1 = below bottom, -0.1 = above top)
    /// and opacity at `elapsed` seconds, or `None` before the first trip
    fn sample(&self, elapsed: f64) -> Option<(f64, f64)> {
        let t = elapsed - self.delay;
        if t < 0.0 {
            return None;
        }
        let progress = (t % self.duration) / self.duration;
        let y = 1.1 - 1.2 * progress;
        let opacity = PEAK_OPACITY * (1.0 - (2.0 * progress - 1.0).abs());
        Some((y, opacity))
    }

    fn glyph(&self) -> &'static str {
        match (self.kind, self.size >= 18.0) {
            (DriftKind::Heart, true) => "♥",
            (DriftKind::Heart, false) => "♡",
            (DriftKind::Sparkle, true) => "✦",
            (DriftKind::Sparkle, false) => "✧",
        }
    }
}

/// Looping background particle layer
#[derive(Debug, Clone)]
pub struct Backdrop {
    particles: Vec<DriftParticle>,
}

impl Backdrop {
    pub fn new() -> Self {
        Self::with_rng(&mut rand::rng())
    }

    pub fn with_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| DriftParticle {
                x: rng.random_range(0.0..100.0),
                size: rng.random_range(10.0..25.0),
                duration: rng.random_range(10.0..20.0),
                delay: rng.random_range(0.0..5.0),
                kind: if rng.random_bool(0.3) {
                    DriftKind::Sparkle
                } else {
                    DriftKind::Heart
                },
            })
            .collect();
        Self { particles }
    }

    pub fn particles(&self) -> &[DriftParticle] {
        &self.particles
    }

    pub fn render(&self, elapsed: f64, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for p in &self.particles {
            let Some((y, opacity)) = p.sample(elapsed) else {
                continue;
            };
            if !(0.0..1.0).contains(&y) || opacity <= 0.05 {
                continue;
            }
            let base = match p.kind {
                DriftKind::Heart => ROSE_400,
                DriftKind::Sparkle => ORANGE_300,
            };
            let col = area.x + ((p.x / 100.0) * area.width as f64) as u16;
            let row = area.y + (y * area.height as f64) as u16;
            if let Some(cell) = buf.cell_mut((col.min(area.right() - 1), row)) {
                cell.set_symbol(p.glyph())
                    .set_style(Style::default().fg(fade(base, 1.0 - opacity)));
            }
        }
    }
}

impl Default for Backdrop {
    fn default() -> Self {
        Self::new()
    }
}
