//! Key bindings: which [`Action`] a key press asks for.
//!
//! | Key              | Action                         |
//! |------------------|--------------------------------|
//! | F1               | save                           |
//! | F2, Ctrl+Q       | quit                           |
//! | F3 / F4 / F5     | goto / find string / find hex  |
//! | F6               | append zero bytes              |
//! | arrows, PgUp/Dn  | move by step / row / page      |
//! | Home, End        | row start / row end            |
//! | Shift+Home/End   | buffer start / buffer end      |
//! | Tab              | hex <-> ascii                  |
//! | Insert           | insert <-> overwrite           |
//! | Delete           | delete byte at cursor          |
//! | Backspace        | move back one step             |
//! | Enter, Ctrl+key  | write the control byte         |

use crate::actor::{KeyCode, KeyModifiers};
use crate::buffer::hex::parse_address;
use crate::error::{EditError, Result};
use crate::session::Command;

/// Text prompts the editor can open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    /// Hex byte address.
    Goto,
    /// Raw text to search for.
    FindLiteral,
    /// Hex digit pairs to search for.
    FindHex,
    /// Decimal count of zero bytes to append.
    Append,
}

impl PromptKind {
    /// Label shown before the input.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Goto => "Address to go to: 0x",
            Self::FindLiteral => "String to find: ",
            Self::FindHex => "Hex string to find: ",
            Self::Append => "Number of bytes to append: ",
        }
    }

    /// Turn submitted prompt text into a command.
    pub fn command(self, text: &str) -> Result<Command> {
        match self {
            Self::Goto => {
                let addr = parse_address(text)?;
                Ok(Command::Goto(i64::try_from(addr).unwrap_or(i64::MAX)))
            }
            Self::FindLiteral => Ok(Command::FindLiteral(text.as_bytes().to_vec())),
            Self::FindHex => Ok(Command::FindHex(text.to_string())),
            Self::Append => text
                .trim()
                .parse::<usize>()
                .map(Command::Append)
                .map_err(|_| EditError::invalid(format!("'{}' is not a byte count", text.trim()))),
        }
    }
}

/// What the UI loop should do for a key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Apply a command to the session.
    Command(Command),
    /// Write a typed character, interpreted by the current edit mode.
    Write(char),
    /// Open a text prompt.
    Prompt(PromptKind),
    /// Leave the editor.
    Quit,
}

/// Look up the action bound to a key.
///
/// `step` is the cursor increment of the current edit mode, used by the
/// left/right and backspace bindings.
pub fn action_for(code: KeyCode, modifiers: KeyModifiers, step: usize) -> Option<Action> {
    #[allow(clippy::cast_possible_wrap)]
    let step = step as isize;
    let command = match code {
        KeyCode::F(1) => Command::Save,
        KeyCode::F(2) => return Some(Action::Quit),
        KeyCode::Char('q' | 'Q') if modifiers.control => return Some(Action::Quit),
        KeyCode::F(3) => return Some(Action::Prompt(PromptKind::Goto)),
        KeyCode::F(4) => return Some(Action::Prompt(PromptKind::FindLiteral)),
        KeyCode::F(5) => return Some(Action::Prompt(PromptKind::FindHex)),
        KeyCode::F(6) => return Some(Action::Prompt(PromptKind::Append)),
        KeyCode::Up => Command::RowMove(-1),
        KeyCode::Down => Command::RowMove(1),
        KeyCode::Left | KeyCode::Backspace => Command::Move(-step),
        KeyCode::Right => Command::Move(step),
        KeyCode::PageUp => Command::PageMove(-1),
        KeyCode::PageDown => Command::PageMove(1),
        KeyCode::Home if modifiers.shift => Command::BufferStart,
        KeyCode::Home => Command::Home,
        KeyCode::End if modifiers.shift => Command::BufferEnd,
        KeyCode::End => Command::RowEnd,
        KeyCode::Tab => Command::ToggleEditMode,
        KeyCode::Insert => Command::ToggleInsertMode,
        KeyCode::Delete => Command::DeleteAtCursor,
        KeyCode::Enter => return Some(Action::Write('\n')),
        KeyCode::Char(_) if modifiers.alt => return None,
        KeyCode::Char(c) if modifiers.control => {
            return c.is_ascii_alphabetic().then_some(Action::Write(control_char(c)));
        }
        KeyCode::Char(c) => return Some(Action::Write(c)),
        _ => return None,
    };
    Some(Action::Command(command))
}

/// The C0 control character typed as Ctrl+`letter`.
const fn control_char(letter: char) -> char {
    (letter.to_ascii_uppercase() as u8 & 0x1F) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(code: KeyCode) -> Option<Action> {
        action_for(code, KeyModifiers::NONE, 1)
    }

    #[test]
    fn test_function_keys() {
        assert_eq!(plain(KeyCode::F(1)), Some(Action::Command(Command::Save)));
        assert_eq!(plain(KeyCode::F(2)), Some(Action::Quit));
        assert_eq!(plain(KeyCode::F(5)), Some(Action::Prompt(PromptKind::FindHex)));
        assert_eq!(plain(KeyCode::F(9)), None);
    }

    #[test]
    fn test_step_follows_mode() {
        assert_eq!(
            action_for(KeyCode::Left, KeyModifiers::NONE, 2),
            Some(Action::Command(Command::Move(-2)))
        );
        assert_eq!(
            action_for(KeyCode::Backspace, KeyModifiers::NONE, 1),
            Some(Action::Command(Command::Move(-1)))
        );
    }

    #[test]
    fn test_shift_variants() {
        assert_eq!(
            action_for(KeyCode::Home, KeyModifiers::SHIFT, 1),
            Some(Action::Command(Command::BufferStart))
        );
        assert_eq!(plain(KeyCode::End), Some(Action::Command(Command::RowEnd)));
    }

    #[test]
    fn test_chars() {
        assert_eq!(plain(KeyCode::Char('a')), Some(Action::Write('a')));
        assert_eq!(
            action_for(KeyCode::Char('A'), KeyModifiers::SHIFT, 1),
            Some(Action::Write('A'))
        );
        assert_eq!(
            action_for(KeyCode::Char('q'), KeyModifiers::CONTROL, 1),
            Some(Action::Quit)
        );
        assert_eq!(
            action_for(KeyCode::Char('x'), KeyModifiers::CONTROL, 1),
            Some(Action::Write('\x18'))
        );
        assert_eq!(action_for(KeyCode::Char('1'), KeyModifiers::CONTROL, 1), None);
    }

    #[test]
    fn test_enter_writes_newline() {
        assert_eq!(plain(KeyCode::Enter), Some(Action::Write('\n')));
    }

    #[test]
    fn test_prompt_commands() {
        assert_eq!(PromptKind::Goto.command("ff").unwrap(), Command::Goto(0xFF));
        assert!(PromptKind::Goto.command("zz").is_err());
        assert_eq!(PromptKind::Append.command(" 16 ").unwrap(), Command::Append(16));
        assert!(PromptKind::Append.command("-1").is_err());
        assert_eq!(
            PromptKind::FindLiteral.command("hi").unwrap(),
            Command::FindLiteral(b"hi".to_vec())
        );
    }
}
