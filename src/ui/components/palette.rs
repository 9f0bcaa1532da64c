//! Rose color palette shared by every scene.

use ratatui::style::Color;

pub const ROSE_50: Color = Color::Rgb(0xff, 0xf1, 0xf2);
pub const ROSE_100: Color = Color::Rgb(0xff, 0xe4, 0xe6);
pub const ROSE_200: Color = Color::Rgb(0xfe, 0xcd, 0xd3);
pub const ROSE_300: Color = Color::Rgb(0xfd, 0xa4, 0xaf);
pub const ROSE_400: Color = Color::Rgb(0xfb, 0x71, 0x85);
pub const ROSE_500: Color = Color::Rgb(0xf4, 0x3f, 0x5e);
pub const ROSE_600: Color = Color::Rgb(0xe1, 0x1d, 0x48);
pub const ROSE_800: Color = Color::Rgb(0x9f, 0x12, 0x39);
pub const ROSE_900: Color = Color::Rgb(0x88, 0x13, 0x37);
pub const ORANGE_300: Color = Color::Rgb(0xfd, 0xba, 0x74);
pub const WHITE: Color = Color::Rgb(0xff, 0xff, 0xff);
pub const GRAY_700: Color = Color::Rgb(0x37, 0x41, 0x51);
pub const GREEN_600: Color = Color::Rgb(0x16, 0xa3, 0x4a);

/// Card background
pub const BACKDROP: Color = Color::Rgb(0x1f, 0x0b, 0x12);

/// Confetti colors for quiz picks
pub const QUIZ_CONFETTI: &[Color] = &[ROSE_400, ROSE_300];
/// Confetti colors for the later, more intimate questions
pub const INTIMATE_CONFETTI: &[Color] = &[ROSE_600, ROSE_300];
/// Confetti colors for a yes
pub const YES_CONFETTI: &[Color] = &[ROSE_600, ROSE_400, WHITE];
/// Default confetti colors when a burst names none
pub const FESTIVE_CONFETTI: &[Color] = &[ROSE_500, ORANGE_300, ROSE_200, WHITE, GREEN_600];

/// Parse a hex color string to a Color.
///
/// Supports formats: "#RGB", "#RRGGBB"
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>, repeat: bool| {
        let value = u8::from_str_radix(hex.get(range)?, 16).ok()?;
        Some(if repeat { value * 17 } else { value })
    };

    match hex.len() {
        3 => Some(Color::Rgb(
            channel(0..1, true)?,
            channel(1..2, true)?,
            channel(2..3, true)?,
        )),
        6 => Some(Color::Rgb(
            channel(0..2, false)?,
            channel(2..4, false)?,
            channel(4..6, false)?,
        )),
        _ => None,
    }
}

/// Blend `color` towards the backdrop; `amount` 0.0 keeps the color, 1.0 is the backdrop
pub fn fade(color: Color, amount: f64) -> Color {
    let (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) = (color, BACKDROP) else {
        return color;
    };
    let t = amount.clamp(0.0, 1.0);
    let mix = |from: u8, to: u8| (from as f64 + (to as f64 - from as f64) * t).round() as u8;
    Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
}
