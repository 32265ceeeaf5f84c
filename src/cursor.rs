//! Cursor: Nibble-addressed editing position.
//!
//! The cursor index counts nibbles: byte offset is `index / 2` and
//! `index % 2 == 0` selects the high nibble. In ascii mode the index is
//! always even.
//!
//! ```text
//!  byte:     0       1       2
//!  nibble: 0   1   2   3   4   5   [6]   <- slot past the end, insert mode only
//! ```

/// Nibbles in one display row (16 bytes).
pub const ROW_NIBBLES: usize = 0x20;

/// Nibbles in one display page (16 rows).
pub const PAGE_NIBBLES: usize = 0x200;

/// How keystrokes are written into the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditMode {
    /// Each keystroke writes one nibble.
    #[default]
    Hex,
    /// Each keystroke writes one whole byte.
    Ascii,
}

impl EditMode {
    /// Cursor step for one edit, in nibbles.
    #[inline]
    pub const fn increment(self) -> usize {
        match self {
            Self::Hex => 1,
            Self::Ascii => 2,
        }
    }

    /// The other mode.
    #[inline]
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Hex => Self::Ascii,
            Self::Ascii => Self::Hex,
        }
    }

    /// Short label for status display.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hex => "HEX",
            Self::Ascii => "ASCII",
        }
    }
}

/// Editing position plus the mode flags that decide its legal range.
///
/// Every method that can change the legal range takes the buffer size and
/// re-clamps before returning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    /// Position in nibbles.
    index: usize,
    /// Hex or ascii editing.
    mode: EditMode,
    /// Whether edits open new bytes instead of overwriting.
    inserting: bool,
}

impl Cursor {
    /// Cursor at the start of the buffer, in hex mode.
    pub const fn new(inserting: bool) -> Self {
        Self {
            index: 0,
            mode: EditMode::Hex,
            inserting,
        }
    }

    /// Position in nibbles.
    #[inline]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Byte under the cursor.
    #[inline]
    pub const fn byte_offset(&self) -> usize {
        self.index / 2
    }

    /// Whether the cursor is on the high nibble of its byte.
    #[inline]
    pub const fn is_high_nibble(&self) -> bool {
        self.index % 2 == 0
    }

    /// Current edit mode.
    #[inline]
    pub const fn mode(&self) -> EditMode {
        self.mode
    }

    /// Whether insert mode is on.
    #[inline]
    pub const fn is_inserting(&self) -> bool {
        self.inserting
    }

    /// Cursor step for the current mode.
    #[inline]
    pub const fn increment(&self) -> usize {
        self.mode.increment()
    }

    /// Largest legal index for a buffer of `size` bytes.
    ///
    /// Insert mode adds one increment of slack so the cursor can sit just
    /// past the last byte and append by inserting there.
    pub const fn max_index(&self, size: usize) -> usize {
        if size == 0 {
            return 0;
        }
        let slack = if self.inserting { self.increment() } else { 0 };
        size.saturating_mul(2).saturating_add(slack) - self.increment()
    }

    /// Move by `delta` nibbles, clamped into the legal range.
    pub fn move_by(&mut self, delta: isize, size: usize) {
        let target = match self.index.checked_add_signed(delta) {
            Some(target) => target,
            None if delta < 0 => 0,
            None => usize::MAX,
        };
        self.set_clamped(target, size);
    }

    /// Re-clamp after the buffer size changed.
    pub fn clamp(&mut self, size: usize) {
        self.set_clamped(self.index, size);
    }

    /// Jump to byte `addr`; negative addresses go to 0 and addresses past
    /// the end go to the last legal position.
    pub fn goto_byte(&mut self, addr: i64, size: usize) {
        let target = u64::try_from(addr).map_or(0, |addr| {
            usize::try_from(addr.saturating_mul(2)).unwrap_or(usize::MAX)
        });
        self.set_clamped(target, size);
    }

    /// Snap to the start of the current 16-byte row.
    pub const fn home(&mut self) {
        self.index &= !(ROW_NIBBLES - 1);
    }

    /// Jump to the last byte of the current 16-byte row.
    pub fn row_end(&mut self, size: usize) {
        #[allow(clippy::cast_possible_wrap)]
        let addr = (self.byte_offset() | 0xF) as i64;
        self.goto_byte(addr, size);
    }

    /// Move one row up (`-1`) or down (`1`).
    pub fn row_move(&mut self, rows: isize, size: usize) {
        #[allow(clippy::cast_possible_wrap)]
        self.move_by(rows.saturating_mul(ROW_NIBBLES as isize), size);
    }

    /// Move one page up (`-1`) or down (`1`).
    pub fn page_move(&mut self, pages: isize, size: usize) {
        #[allow(clippy::cast_possible_wrap)]
        self.move_by(pages.saturating_mul(PAGE_NIBBLES as isize), size);
    }

    /// Jump to the first nibble.
    pub const fn buffer_start(&mut self) {
        self.index = 0;
    }

    /// Jump to the last byte, or the append slot in insert mode.
    pub fn buffer_end(&mut self, size: usize) {
        let last = if self.inserting { size } else { size.saturating_sub(1) };
        self.goto_byte(i64::try_from(last).unwrap_or(i64::MAX), size);
    }

    /// Switch between hex and ascii editing.
    ///
    /// Ascii mode only addresses whole bytes, so the low-nibble bit is
    /// cleared.
    pub const fn toggle_edit_mode(&mut self) {
        self.mode = self.mode.toggled();
        self.index &= !1;
    }

    /// Switch insert mode and re-clamp to the new legal range.
    pub fn toggle_insert_mode(&mut self, size: usize) {
        self.inserting = !self.inserting;
        self.clamp(size);
    }

    fn set_clamped(&mut self, target: usize, size: usize) {
        self.index = target.min(self.max_index(size));
        if self.mode == EditMode::Ascii {
            self.index &= !1;
        }
    }
}
