//! Heart-shaped layout for the bouquet scene.
//!
//! Tokens are placed on the parametric heart curve
//!
//! ```text
//! x(t) = 16 sin³(t)
//! y(t) = -(13 cos(t) - 5 cos(2t) - 2 cos(3t) - cos(4t))
//! ```
//!
//! with `y` negated so the cusp points down in a top-left origin coordinate system.
//! Generation runs in three phases that together produce the "drawing in" effect:
//! an outline revealed in sample order, three jittered inner rings revealed after the
//! outline, and one centered accent revealed last. Counts, ids and the delay schedule
//! are fixed; only positions, sizes and rotations inside a pass are random.

use std::f64::consts::TAU;

use rand::Rng;
use serde::Serialize;

/// Samples on the outline ring
pub const OUTLINE_COUNT: usize = 40;
/// Seconds between consecutive outline tokens
pub const OUTLINE_DELAY_STEP: f64 = 0.03;
/// Inner ring scale ratios, outermost first
pub const FILL_RATIOS: [f64; 3] = [0.75, 0.5, 0.25];
/// Maximum angular offset (radians) added to each fill sample
pub const FILL_ANGLE_JITTER: f64 = 0.5;
/// Maximum positional offset (layout units, per axis) added to each fill sample
pub const FILL_POSITION_JITTER: f64 = 6.0;
/// Fill tokens appear somewhere in this window (seconds)
pub const FILL_DELAY_RANGE: (f64, f64) = (1.2, 2.0);
/// Vertical offset of the center accent
pub const CENTER_OFFSET_Y: f64 = -5.0;
pub const CENTER_SCALE: f64 = 1.2;
pub const CENTER_DELAY: f64 = 2.0;

/// Total tokens produced by one generation
pub const TOKEN_COUNT: usize = OUTLINE_COUNT + fill_count(0) + fill_count(1) + fill_count(2) + 1;

/// Smallest scale accepted by [`generate`]
const MIN_SCALE: f64 = 1e-3;

/// Number of samples in the inner ring at `ring` (0 = outermost)
pub const fn fill_count(ring: usize) -> usize {
    // floor(40 * ratio) for the fixed ratios 0.75, 0.5, 0.25
    match ring {
        0 => OUTLINE_COUNT * 3 / 4,
        1 => OUTLINE_COUNT / 2,
        2 => OUTLINE_COUNT / 4,
        _ => 0,
    }
}

/// Which generation phase produced a token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenPass {
    Outline,
    /// Inner ring, 0 = outermost (ratio 0.75)
    Fill(u8),
    Center,
}

/// One positioned flower in the heart.
///
/// `x`/`y` are layout units relative to the heart's center, `delay` is in seconds
/// and `rotation` is in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeartToken {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub scale: f64,
    pub delay: f64,
    pub rotation: f64,
    pub pass: TokenPass,
}

/// Axis-aligned extent of a token set
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn of(tokens: &[HeartToken]) -> Option<Self> {
        let first = tokens.first()?;
        let init = Bounds {
            min_x: first.x,
            max_x: first.x,
            min_y: first.y,
            max_y: first.y,
        };
        Some(tokens.iter().fold(init, |b, t| Bounds {
            min_x: b.min_x.min(t.x),
            max_x: b.max_x.max(t.x),
            min_y: b.min_y.min(t.y),
            max_y: b.max_y.max(t.y),
        }))
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Point on the heart curve at parameter `t`, scaled by `scale`
pub fn heart_point(t: f64, scale: f64) -> (f64, f64) {
    let x = 16.0 * t.sin().powi(3);
    let y = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
    (x * scale, y * scale)
}

/// Generate the heart layout with the thread-local RNG
pub fn generate(scale: f64) -> Vec<HeartToken> {
    generate_with(scale, &mut rand::rng())
}

/// Generate the heart layout drawing randomness from `rng`
pub fn generate_with<R: Rng + ?Sized>(scale: f64, rng: &mut R) -> Vec<HeartToken> {
    debug_assert!(
        scale.is_finite() && scale > 0.0,
        "heart scale must be positive, got {scale}"
    );
    let scale = if scale.is_finite() {
        scale.max(MIN_SCALE)
    } else {
        MIN_SCALE
    };

    let mut tokens = Vec::with_capacity(TOKEN_COUNT);

    for i in 0..OUTLINE_COUNT {
        let t = (i as f64 / OUTLINE_COUNT as f64) * TAU;
        let (x, y) = heart_point(t, scale);
        tokens.push(HeartToken {
            id: tokens.len(),
            x,
            y,
            scale: rng.random_range(1.0..=1.4),
            delay: i as f64 * OUTLINE_DELAY_STEP,
            rotation: rng.random_range(-20.0..=20.0),
            pass: TokenPass::Outline,
        });
    }

    for (ring, ratio) in FILL_RATIOS.iter().enumerate() {
        let count = fill_count(ring);
        for i in 0..count {
            let t = (i as f64 / count as f64) * TAU + rng.random_range(0.0..FILL_ANGLE_JITTER);
            let (bx, by) = heart_point(t, scale * ratio);
            let x = bx + rng.random_range(-FILL_POSITION_JITTER..=FILL_POSITION_JITTER);
            let y = by + rng.random_range(-FILL_POSITION_JITTER..=FILL_POSITION_JITTER);
            tokens.push(HeartToken {
                id: tokens.len(),
                x,
                y,
                scale: rng.random_range(0.7..=1.2),
                delay: rng.random_range(FILL_DELAY_RANGE.0..=FILL_DELAY_RANGE.1),
                rotation: rng.random_range(0.0..360.0),
                pass: TokenPass::Fill(ring as u8),
            });
        }
    }

    tokens.push(HeartToken {
        id: tokens.len(),
        x: 0.0,
        y: CENTER_OFFSET_Y,
        scale: CENTER_SCALE,
        delay: CENTER_DELAY,
        rotation: 0.0,
        pass: TokenPass::Center,
    });

    tracing::debug!(scale, tokens = tokens.len(), "Generated heart layout");
    tokens
}
