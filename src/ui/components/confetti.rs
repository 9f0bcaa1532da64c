//! Celebratory confetti bursts.
//!
//! Bursts are fire-and-forget: scenes describe a burst and the field animates it
//! until every particle has fallen off screen or burned out.

use rand::Rng;
use ratatui::{buffer::Buffer, layout::Rect, style::Color, style::Style};

use super::palette::{fade, FESTIVE_CONFETTI};

/// Downward acceleration in normalized screen heights per second²
const GRAVITY: f64 = 1.4;
/// Fraction of velocity kept per second
const DRAG: f64 = 0.35;
const GLYPHS: [&str; 4] = ["•", "▪", "✦", "*"];

/// Description of one burst
#[derive(Debug, Clone, PartialEq)]
pub struct Burst {
    pub count: usize,
    /// Cone width in degrees, centered on straight up
    pub spread: f64,
    /// Origin in normalized screen coordinates (0.0..=1.0 on both axes)
    pub origin: (f64, f64),
    /// Particle colors; empty means the festive default
    pub palette: Vec<Color>,
}

impl Burst {
    pub fn new(count: usize, spread: f64, origin_y: f64) -> Self {
        Self {
            count,
            spread,
            origin: (0.5, origin_y),
            palette: Vec::new(),
        }
    }

    pub fn palette(mut self, colors: &[Color]) -> Self {
        self.palette = colors.to_vec();
        self
    }
}

#[derive(Debug, Clone)]
struct Particle {
    x: f64,
    y: f64,
    vx: f64,
    vy: f64,
    age: f64,
    lifetime: f64,
    color: Color,
    glyph: &'static str,
}

/// Live confetti particles
#[derive(Debug, Default)]
pub struct ConfettiField {
    particles: Vec<Particle>,
}

impl ConfettiField {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn burst(&mut self, burst: &Burst) {
        self.burst_with(burst, &mut rand::rng());
    }

    pub fn burst_with<R: Rng + ?Sized>(&mut self, burst: &Burst, rng: &mut R) {
        let palette: &[Color] = if burst.palette.is_empty() {
            FESTIVE_CONFETTI
        } else {
            &burst.palette
        };
        let half_spread = burst.spread.abs().to_radians() / 2.0;

        for _ in 0..burst.count {
            let angle = -std::f64::consts::FRAC_PI_2 + rng.random_range(-half_spread..=half_spread);
            let speed = rng.random_range(0.6..1.4);
            self.particles.push(Particle {
                x: burst.origin.0,
                y: burst.origin.1,
                // Terminal cells are roughly twice as tall as wide
                vx: angle.cos() * speed * 0.5,
                vy: angle.sin() * speed,
                age: 0.0,
                lifetime: rng.random_range(1.2..2.4),
                color: palette[rng.random_range(0..palette.len())],
                glyph: GLYPHS[rng.random_range(0..GLYPHS.len())],
            });
        }
        tracing::trace!(count = burst.count, live = self.particles.len(), "Confetti burst");
    }

    /// Advance the simulation by `dt` seconds
    pub fn tick(&mut self, dt: f64) {
        let drag = DRAG.powf(dt);
        for p in &mut self.particles {
            p.vy += GRAVITY * dt;
            p.vx *= drag;
            p.vy *= drag;
            p.x += p.vx * dt;
            p.y += p.vy * dt;
            p.age += dt;
        }
        self.particles
            .retain(|p| p.age < p.lifetime && p.y <= 1.1 && (-0.1..=1.1).contains(&p.x));
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn render(&self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for p in &self.particles {
            if !(0.0..1.0).contains(&p.x) || !(0.0..1.0).contains(&p.y) {
                continue;
            }
            let x = area.x + (p.x * area.width as f64) as u16;
            let y = area.y + (p.y * area.height as f64) as u16;
            let color = fade(p.color, (p.age / p.lifetime).powi(2));
            if let Some(cell) = buf.cell_mut((x, y)) {
                cell.set_symbol(p.glyph).set_style(Style::default().fg(color));
            }
        }
    }
}
