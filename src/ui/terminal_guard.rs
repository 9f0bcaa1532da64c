//! Terminal state guard.
//!
//! The card takes over the whole terminal. [`TerminalGuard`] puts it into raw mode on the
//! alternate screen and hands it back on every exit path: normal return, `?` propagation,
//! or a panic when combined with [`install_panic_hook`].

use std::io::{self, Write};

use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};

pub struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    /// Enter raw mode and the alternate screen
    pub fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // From here on Drop undoes whatever succeeded
        let guard = Self { active: true };
        execute!(io::stdout(), EnterAlternateScreen, Hide)?;
        Ok(guard)
    }

    /// Restore the terminal now, reporting errors. Drop becomes a no-op afterwards.
    pub fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;
        restore()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = restore() {
                tracing::debug!(error = %e, "Terminal cleanup failed in Drop");
            }
        }
    }
}

fn restore() -> io::Result<()> {
    let mut stdout = io::stdout();
    disable_raw_mode()?;
    execute!(stdout, LeaveAlternateScreen, Show)?;
    stdout.flush()
}

/// Install a panic hook that restores the terminal before the panic message is printed.
///
/// Call this before entering the guard.
pub fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        if let Err(e) = restore() {
            tracing::debug!(error = %e, "Failed to restore terminal in panic hook");
        }
        tracing::error!(panic = %panic_info, "Card panicked");
        original_hook(panic_info);
    }));
}
