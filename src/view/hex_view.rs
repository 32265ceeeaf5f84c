//! Title bar and the 16-row hex/ascii grid.

use super::viewport::{Viewport, VISIBLE_ROWS};
use super::Widget;
use crate::cursor::{EditMode, ROW_NIBBLES};
use crate::session::EditSession;
use crate::terminal::{OutputBuffer, Style};
use std::fmt::Write;

/// Column where the hex digits of the first byte in a row start.
const HEX_COLUMN: u16 = 11;
/// Column of the ascii rendering of the first byte in a row.
const ASCII_COLUMN: u16 = 61;
/// Bytes per row.
const ROW_BYTES: usize = ROW_NIBBLES / 2;

/// File name, sizes and mode flags on the top line.
#[derive(Debug)]
pub struct TitleBar<'a> {
    session: &'a EditSession,
}

impl<'a> TitleBar<'a> {
    /// Title bar for `session`.
    pub const fn new(session: &'a EditSession) -> Self {
        Self { session }
    }

    /// The title text, unpadded.
    pub fn text(&self) -> String {
        let buffer = self.session.buffer();
        let cursor = self.session.cursor();
        let size = buffer.len();
        format!(
            "{:<24.24}    {size} B (0x{size:x} B)    0x{:x} B Allocated    {} {}{}",
            self.session.name(),
            buffer.capacity(),
            cursor.mode().label(),
            if cursor.is_inserting() { "INS" } else { "OVR" },
            if self.session.is_modified() { " *" } else { "" },
        )
    }
}

impl Widget for TitleBar<'_> {
    fn render(&self, out: &mut OutputBuffer) {
        out.cursor_move(0, 0);
        out.write_styled(&format!("{:<78.78}", self.text()), Style::REVERSED);
    }
}

/// The address, hex and ascii columns for the visible rows.
#[derive(Debug)]
pub struct HexView<'a> {
    session: &'a EditSession,
    viewport: &'a Viewport,
}

impl<'a> HexView<'a> {
    /// Grid for `session` scrolled to `viewport`.
    pub const fn new(session: &'a EditSession, viewport: &'a Viewport) -> Self {
        Self { session, viewport }
    }

    fn render_row(&self, row: usize, out: &mut OutputBuffer) {
        let bytes = self.session.buffer().as_bytes();
        let cursor = self.session.cursor();
        let cursor_byte = cursor.byte_offset();
        let ascii_edit = cursor.mode() == EditMode::Ascii;
        let first = (self.viewport.top_line() + row) * ROW_BYTES;
        let mut text = String::with_capacity(8);
        #[allow(clippy::cast_possible_truncation)]
        let y = 1 + row as u16;

        out.cursor_move(0, y);
        let _ = write!(text, "{first:08x}: ");
        out.write_str(&text);

        for col in 0..ROW_BYTES {
            if col == ROW_BYTES / 2 {
                out.write_str(" ");
            }
            let Some(&byte) = bytes.get(first + col) else {
                out.write_str("   ");
                continue;
            };
            text.clear();
            let _ = write!(text, "{byte:02x}");
            out.write_str(" ");
            // The terminal cursor marks the edited column; highlight the other.
            let style = if ascii_edit && first + col == cursor_byte {
                Style::REVERSED
            } else {
                Style::empty()
            };
            out.write_styled(&text, style);
        }

        out.cursor_move(ASCII_COLUMN, y);
        for (col, &byte) in bytes.iter().skip(first).take(ROW_BYTES).enumerate() {
            let shown = if byte.is_ascii_graphic() || byte == b' ' {
                char::from(byte)
            } else {
                '.'
            };
            let style = if !ascii_edit && first + col == cursor_byte {
                Style::REVERSED
            } else {
                Style::empty()
            };
            out.write_styled(shown.encode_utf8(&mut [0; 4]), style);
        }
    }
}

impl Widget for HexView<'_> {
    fn render(&self, out: &mut OutputBuffer) {
        for row in 0..VISIBLE_ROWS {
            self.render_row(row, out);
        }
    }
}

/// Screen (column, row) of the editing cursor.
///
/// Hex mode points at the nibble's digit; ascii mode at the character.
pub fn cursor_position(session: &EditSession, viewport: &Viewport) -> (u16, u16) {
    let cursor = session.cursor();
    let relative = cursor.index().saturating_sub(viewport.first_index());
    let in_row = relative % ROW_NIBBLES;
    let byte = in_row / 2;
    #[allow(clippy::cast_possible_truncation)]
    let row = 1 + (relative / ROW_NIBBLES) as u16;
    #[allow(clippy::cast_possible_truncation)]
    let column = match cursor.mode() {
        EditMode::Ascii => ASCII_COLUMN + byte as u16,
        EditMode::Hex => {
            let gap = u16::from(byte >= ROW_BYTES / 2);
            HEX_COLUMN + byte as u16 * 3 + gap + (cursor.index() % 2) as u16
        }
    };
    (column, row)
}
