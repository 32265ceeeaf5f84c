//! Viewport: Which rows of the buffer are on screen.

use crate::cursor::ROW_NIBBLES;

/// Number of 16-byte rows drawn.
pub const VISIBLE_ROWS: usize = 16;

/// Scroll position, in rows from the start of the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    top_line: usize,
}

impl Viewport {
    /// First visible row.
    #[inline]
    pub const fn top_line(&self) -> usize {
        self.top_line
    }

    /// Nibble index of the first visible byte.
    #[inline]
    pub const fn first_index(&self) -> usize {
        self.top_line * ROW_NIBBLES
    }

    /// Scroll the minimum amount that keeps `index` on screen.
    pub const fn follow(&mut self, index: usize) {
        let line = index / ROW_NIBBLES;
        if line < self.top_line {
            self.top_line = line;
        }
        if line >= self.top_line + VISIBLE_ROWS {
            self.top_line = line + 1 - VISIBLE_ROWS;
        }
    }
}
