//! `OutputBuffer`: Single-syscall output buffer for ANSI sequences.

use bitflags::bitflags;
use std::io::Write;

bitflags! {
    /// Text attributes for a run of output.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Style: u8 {
        /// Bold text
        const BOLD = 0b0000_0001;
        /// Dim/faint text
        const DIM = 0b0000_0010;
        /// Reversed colors (fg/bg swapped)
        const REVERSED = 0b0000_0100;
    }
}

/// Terminal cursor shapes, used to show insert vs overwrite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorShape {
    /// Steady block (overwrite).
    Block,
    /// Blinking bar (insert).
    Bar,
}

/// Pre-allocated buffer for building ANSI escape sequences.
///
/// A whole frame is accumulated here, then flushed in a single `write()`
/// syscall to prevent terminal flickering.
#[derive(Debug, Clone)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Create a new output buffer with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Create a buffer sized for one editor frame (4KB).
    pub fn new() -> Self {
        Self::with_capacity(4096)
    }

    /// Clear the buffer for reuse.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Get the buffer contents.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Get the buffer length.
    #[inline]
    pub const fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if buffer is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Write a string.
    #[inline]
    pub fn write_str(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
    }

    /// Write a string with the given attributes, then reset them.
    pub fn write_styled(&mut self, s: &str, style: Style) {
        if style.is_empty() {
            self.write_str(s);
            return;
        }
        self.set_style(style);
        self.write_str(s);
        self.reset_attrs();
    }

    /// Move cursor to (x, y) position (1-indexed for ANSI).
    #[inline]
    pub fn cursor_move(&mut self, x: u16, y: u16) {
        // CSI row ; col H
        let _ = write!(self.data, "\x1b[{};{}H", y + 1, x + 1);
    }

    /// Hide cursor.
    #[inline]
    pub fn cursor_hide(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25l");
    }

    /// Show cursor.
    #[inline]
    pub fn cursor_show(&mut self) {
        self.data.extend_from_slice(b"\x1b[?25h");
    }

    /// Set the cursor shape (DECSCUSR).
    #[inline]
    pub fn cursor_shape(&mut self, shape: CursorShape) {
        let code = match shape {
            CursorShape::Block => 2,
            CursorShape::Bar => 5,
        };
        let _ = write!(self.data, "\x1b[{code} q");
    }

    /// Set text attributes.
    pub fn set_style(&mut self, style: Style) {
        self.data.extend_from_slice(b"\x1b[0");
        if style.contains(Style::BOLD) {
            self.data.extend_from_slice(b";1");
        }
        if style.contains(Style::DIM) {
            self.data.extend_from_slice(b";2");
        }
        if style.contains(Style::REVERSED) {
            self.data.extend_from_slice(b";7");
        }
        self.data.push(b'm');
    }

    /// Reset all attributes.
    #[inline]
    pub fn reset_attrs(&mut self) {
        self.data.extend_from_slice(b"\x1b[0m");
    }

    /// Clear the entire screen.
    #[inline]
    pub fn clear_screen(&mut self) {
        self.data.extend_from_slice(b"\x1b[2J");
    }

    /// Flush to a writer in a single syscall.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying writer fails.
    pub fn flush_to<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        writer.write_all(&self.data)?;
        writer.flush()
    }
}

impl Default for OutputBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_move_is_one_based() {
        let mut out = OutputBuffer::new();
        out.cursor_move(0, 0);
        out.cursor_move(11, 4);
        assert_eq!(out.as_bytes(), b"\x1b[1;1H\x1b[5;12H");
    }

    #[test]
    fn test_styled_run_resets() {
        let mut out = OutputBuffer::new();
        out.write_styled("41", Style::REVERSED | Style::BOLD);
        assert_eq!(out.as_bytes(), b"\x1b[0;1;7m41\x1b[0m");

        out.clear();
        out.write_styled("41", Style::empty());
        assert_eq!(out.as_bytes(), b"41");
    }

    #[test]
    fn test_cursor_shape() {
        let mut out = OutputBuffer::new();
        out.cursor_shape(CursorShape::Bar);
        assert_eq!(out.as_bytes(), b"\x1b[5 q");
    }

    #[test]
    fn test_flush_to_writer() {
        let mut out = OutputBuffer::new();
        out.write_str("frame");
        let mut sink = Vec::new();
        out.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"frame");
        assert_eq!(out.len(), 5);
    }
}
