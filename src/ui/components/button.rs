//! Pill-shaped buttons rendered as a single styled line.

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use super::palette::{ROSE_100, ROSE_400, ROSE_500, WHITE};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonVariant {
    /// Filled rose button for the main action
    #[default]
    Primary,
    /// Light button for secondary actions
    Secondary,
    /// Transparent button with a rose border
    Outline,
}

/// A button with an optional key hint, e.g. `( Continue ) enter`
#[derive(Debug, Clone, Copy)]
pub struct Button<'a> {
    label: &'a str,
    key: Option<&'a str>,
    variant: ButtonVariant,
    alignment: Alignment,
}

impl<'a> Button<'a> {
    pub fn new(label: &'a str) -> Self {
        Self {
            label,
            key: None,
            variant: ButtonVariant::Primary,
            alignment: Alignment::Center,
        }
    }

    pub fn variant(mut self, variant: ButtonVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn key(mut self, key: &'a str) -> Self {
        self.key = Some(key);
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    fn body_style(&self) -> Style {
        match self.variant {
            ButtonVariant::Primary => Style::default()
                .fg(WHITE)
                .bg(ROSE_500)
                .add_modifier(Modifier::BOLD),
            ButtonVariant::Secondary => Style::default().fg(ROSE_500).bg(ROSE_100),
            ButtonVariant::Outline => Style::default().fg(ROSE_500),
        }
    }

    pub fn line(&self) -> Line<'a> {
        let (open, close) = match self.variant {
            ButtonVariant::Outline => ("( ", " )"),
            _ => ("  ", "  "),
        };
        let mut spans = vec![Span::styled(
            format!("{open}{}{close}", self.label),
            self.body_style(),
        )];
        if let Some(key) = self.key {
            spans.push(Span::styled(format!(" {key}"), Style::default().fg(ROSE_400)));
        }
        Line::from(spans).alignment(self.alignment)
    }
}

impl Widget for Button<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Paragraph::new(self.line()).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_primary_button_text() {
        let line = Button::new("Continue").key("enter").line();
        assert_eq!(text(&line), "  Continue   enter");
    }

    #[test]
    fn test_outline_button_has_border() {
        let line = Button::new("No").variant(ButtonVariant::Outline).line();
        assert_eq!(text(&line), "( No )");
    }
}
