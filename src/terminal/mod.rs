//! Terminal module: raw-mode lifetime and ANSI output assembly.

mod output;
mod session;

pub use output::{CursorShape, OutputBuffer, Style};
pub use session::TerminalGuard;
