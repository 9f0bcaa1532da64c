//! Key hint bar shown at the bottom of the card.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::palette::{ROSE_300, ROSE_400, ROSE_800};

/// Render `(key, action)` pairs centered in `area`, e.g. `enter continue · q quit`
pub fn render_key_hints(area: Rect, buf: &mut Buffer, hints: &[(&str, &str)]) {
    Paragraph::new(key_hints_line(hints))
        .alignment(Alignment::Center)
        .render(area, buf);
}

pub fn key_hints_line<'a>(hints: &[(&'a str, &'a str)]) -> Line<'a> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(ROSE_800)));
        }
        spans.push(Span::styled(*key, Style::default().fg(ROSE_400)));
        spans.push(Span::styled(format!(" {action}"), Style::default().fg(ROSE_300)));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hint_line_text() {
        let line = key_hints_line(&[("enter", "next"), ("q", "quit")]);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "enter next · q quit");
    }
}
