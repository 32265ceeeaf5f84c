//! `TerminalGuard`: Puts the terminal into editing mode and restores it.

use crossterm::{
    cursor,
    event::{DisableBracketedPaste, EnableBracketedPaste},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use std::io;

/// Raw mode (and optionally the alternate screen) for as long as it lives.
///
/// Dropping the guard restores the terminal even when the editor exits
/// through an error.
#[derive(Debug)]
pub struct TerminalGuard {
    alternate_screen: bool,
}

impl TerminalGuard {
    /// Enter raw mode, and the alternate screen if requested.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal setup fails.
    pub fn enter(alternate_screen: bool) -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        // From here on, Drop undoes whatever succeeded.
        let guard = Self { alternate_screen };

        let mut stdout = io::stdout();
        if alternate_screen {
            execute!(stdout, EnterAlternateScreen)?;
        }
        execute!(stdout, EnableBracketedPaste)?;
        Ok(guard)
    }

    /// Current terminal size in (columns, rows).
    pub fn size() -> io::Result<(u16, u16)> {
        terminal::size()
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = execute!(
            stdout,
            DisableBracketedPaste,
            cursor::SetCursorStyle::DefaultUserShape,
            cursor::Show
        );
        if self.alternate_screen {
            let _ = execute!(stdout, LeaveAlternateScreen);
        }
        let _ = terminal::disable_raw_mode();
    }
}
