//! Raw-mode terminal the storefront draws on.

use std::io::{self, IsTerminal, Stdout};

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::{GemshopError, Result};

pub type Tui = Terminal<CrosstermBackend<Stdout>>;

fn io_error(step: &str) -> impl FnOnce(io::Error) -> GemshopError + '_ {
    move |e| GemshopError::Io(format!("{step}: {e}"))
}

/// Switches stdout to raw mode on the alternate screen.
///
/// Refuses to start when stdout is piped or redirected. Raw mode is switched
/// back off if a later step fails.
///
/// # Errors
///
/// Returns [`GemshopError::Io`] naming the step that failed.
pub fn setup_terminal() -> Result<Tui> {
    let mut stdout = io::stdout();
    if !stdout.is_terminal() {
        return Err(GemshopError::Io(
            "gemshop needs an interactive terminal (TTY)".to_string(),
        ));
    }

    enable_raw_mode().map_err(io_error("enabling raw mode"))?;
    let screen = execute!(stdout, EnterAlternateScreen)
        .map_err(io_error("entering the alternate screen"))
        .and_then(|()| {
            Terminal::new(CrosstermBackend::new(stdout))
                .map_err(io_error("creating the terminal"))
        });
    if screen.is_err() {
        let _ = disable_raw_mode();
    }
    screen
}

/// Hands the screen back to the shell.
///
/// Every step runs even when an earlier one fails.
///
/// # Errors
///
/// Returns the first step's [`GemshopError::Io`].
pub fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    let raw = disable_raw_mode().map_err(io_error("disabling raw mode"));
    let screen = execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .map_err(io_error("leaving the alternate screen"));
    let cursor = terminal
        .show_cursor()
        .map_err(io_error("showing the cursor"));
    raw.and(screen).and(cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_errors_name_the_failed_step() {
        let err = io_error("entering the alternate screen")(io::Error::other("no tty"));
        assert!(matches!(
            err,
            GemshopError::Io(message) if message == "entering the alternate screen: no tty"
        ));
    }
}
