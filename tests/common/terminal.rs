//! TUI testing utilities using Ratatui's TestBackend

use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};
use valentine::App;

/// Create a test terminal with standard dimensions (80x24)
pub fn create_test_terminal() -> Terminal<TestBackend> {
    create_test_terminal_sized(80, 24)
}

pub fn create_test_terminal_sized(width: u16, height: u16) -> Terminal<TestBackend> {
    let backend = TestBackend::new(width, height);
    Terminal::new(backend).expect("Failed to create test terminal")
}

/// Convert a buffer to a string, one line per row
pub fn buffer_to_string(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut output = String::new();

    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            if let Some(cell) = buffer.cell((x, y)) {
                output.push_str(cell.symbol());
            }
        }
        output.push('\n');
    }

    output
}

/// Check if the buffer contains a string anywhere
pub fn buffer_contains(buffer: &Buffer, text: &str) -> bool {
    buffer_to_string(buffer).contains(text)
}

/// Draw the app once and return the rendered screen
pub fn render_app(app: &App, width: u16, height: u16) -> String {
    let mut terminal = create_test_terminal_sized(width, height);
    terminal.draw(|f| app.draw(f)).expect("Failed to draw app");
    buffer_to_string(terminal.backend().buffer())
}

/// Assert that a drawn app shows `expected` somewhere on screen
pub fn assert_screen_contains(app: &App, expected: &str) {
    let screen = render_app(app, 100, 40);
    assert!(
        screen.contains(expected),
        "Screen does not contain expected text.\nExpected: {}\nActual:\n{}",
        expected,
        screen
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_buffer_contains() {
        let mut terminal = create_test_terminal_sized(20, 5);
        terminal
            .draw(|f| {
                f.render_widget(Paragraph::new("Test content here"), f.area());
            })
            .unwrap();

        assert!(buffer_contains(terminal.backend().buffer(), "content"));
        assert!(!buffer_contains(terminal.backend().buffer(), "missing"));
    }

    #[test]
    fn test_default_terminal_size() {
        let terminal = create_test_terminal();
        let size = terminal.size().unwrap();
        assert_eq!((size.width, size.height), (80, 24));
    }
}
