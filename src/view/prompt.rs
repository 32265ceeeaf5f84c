//! Prompt: Single-line text entry on the footer row.
//!
//! Editing is grapheme-aware, so a backspace never splits a combined
//! character. Input past the length limit is dropped.

use super::{Widget, FOOTER_ROW};
use crate::actor::{InputEvent, KeyCode};
use crate::keymap::PromptKind;
use crate::terminal::OutputBuffer;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// Result of feeding one event to a prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// Still editing.
    Editing,
    /// Enter was pressed; carries the text.
    Submit(String),
    /// Escape was pressed.
    Cancel,
}

/// An open prompt and its text.
#[derive(Debug, Clone)]
pub struct Prompt {
    kind: PromptKind,
    /// Current text content.
    content: String,
    /// Cursor position as a byte offset on a grapheme boundary.
    cursor: usize,
    /// Maximum content length in chars.
    max_len: usize,
}

impl Prompt {
    /// Open an empty prompt.
    pub const fn new(kind: PromptKind, max_len: usize) -> Self {
        Self {
            kind,
            content: String::new(),
            cursor: 0,
            max_len,
        }
    }

    /// Which prompt this is.
    pub const fn kind(&self) -> PromptKind {
        self.kind
    }

    /// Text entered so far.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Insert text at the cursor, truncated to the remaining room.
    pub fn insert_str(&mut self, text: &str) {
        let room = self.max_len.saturating_sub(self.content.chars().count());
        let end = text.char_indices().nth(room).map_or(text.len(), |(i, _)| i);
        let text = &text[..end];
        self.content.insert_str(self.cursor, text);
        self.cursor += text.len();
    }

    /// Feed one input event.
    pub fn handle_input(&mut self, event: &InputEvent) -> PromptEvent {
        match event {
            InputEvent::Key { code, modifiers } => match code {
                KeyCode::Enter => return PromptEvent::Submit(self.content.clone()),
                KeyCode::Esc => return PromptEvent::Cancel,
                KeyCode::Char(c) if !modifiers.control && !modifiers.alt => {
                    self.insert_str(c.encode_utf8(&mut [0; 4]));
                }
                KeyCode::Backspace => self.backspace(),
                KeyCode::Delete => self.delete(),
                KeyCode::Left => self.cursor = self.prev_boundary(),
                KeyCode::Right => self.cursor = self.next_boundary(),
                KeyCode::Home => self.cursor = 0,
                KeyCode::End => self.cursor = self.content.len(),
                _ => {}
            },
            InputEvent::Paste(text) => {
                // Keep the prompt single-line.
                let line = text.lines().next().unwrap_or_default();
                self.insert_str(line);
            }
            _ => {}
        }
        PromptEvent::Editing
    }

    /// Screen column of the text cursor.
    pub fn cursor_column(&self) -> u16 {
        let width = self.kind.label().width() + self.content[..self.cursor].width();
        u16::try_from(width).unwrap_or(u16::MAX)
    }

    fn prev_boundary(&self) -> usize {
        self.content[..self.cursor]
            .grapheme_indices(true)
            .next_back()
            .map_or(0, |(i, _)| i)
    }

    fn next_boundary(&self) -> usize {
        self.content[self.cursor..]
            .graphemes(true)
            .next()
            .map_or(self.cursor, |g| self.cursor + g.len())
    }

    fn backspace(&mut self) {
        let prev = self.prev_boundary();
        self.content.replace_range(prev..self.cursor, "");
        self.cursor = prev;
    }

    fn delete(&mut self) {
        let next = self.next_boundary();
        self.content.replace_range(self.cursor..next, "");
    }
}

impl Widget for Prompt {
    fn render(&self, out: &mut OutputBuffer) {
        out.cursor_move(0, FOOTER_ROW);
        out.write_str(self.kind.label());
        out.write_str(&self.content);
    }
}
