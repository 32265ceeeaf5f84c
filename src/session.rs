//! Edit session: binds a [`ByteBuffer`] to a [`Cursor`] and applies
//! commands to both.
//!
//! Every mutation re-clamps the cursor before returning, so a caller never
//! observes a cursor outside the buffer's legal range.

use crate::buffer::hex::nibble_value;
use crate::buffer::ByteBuffer;
use crate::config::EditorConfig;
use crate::cursor::{Cursor, EditMode};
use crate::error::{EditError, Result};
use crate::persist;
use crate::search::{self, SearchStrategy};
use std::path::{Path, PathBuf};

/// One user-level editing command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Move by a signed number of nibbles.
    Move(isize),
    /// Jump to a byte address.
    Goto(i64),
    /// Start of the current row.
    Home,
    /// Last byte of the current row.
    RowEnd,
    /// Move by whole rows (negative is up).
    RowMove(isize),
    /// Move by whole pages (negative is up).
    PageMove(isize),
    /// First byte of the buffer.
    BufferStart,
    /// Last byte of the buffer, or the append slot in insert mode.
    BufferEnd,
    /// Switch hex/ascii editing.
    ToggleEditMode,
    /// Switch insert/overwrite.
    ToggleInsertMode,
    /// Write one hex digit at the cursor nibble.
    WriteHexDigit(char),
    /// Write one whole byte at the cursor.
    WriteAsciiByte(u8),
    /// Remove the byte under the cursor.
    DeleteAtCursor,
    /// Add zero bytes at the end.
    Append(usize),
    /// Search forward for raw bytes.
    FindLiteral(Vec<u8>),
    /// Search forward for hex digit pairs.
    FindHex(String),
    /// Write the buffer back to its file.
    Save,
}

/// What a successful command did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// State changed as requested (cursor and/or buffer).
    Applied,
    /// Nothing was addressable, so nothing changed.
    Unchanged,
    /// A search matched; the cursor now sits on `offset`.
    Found {
        /// Byte offset of the first matched byte.
        offset: usize,
    },
    /// A search found nothing; the cursor did not move.
    NotFound,
    /// The file was written.
    Saved {
        /// Number of bytes written.
        bytes: usize,
    },
}

/// An open file being edited.
#[derive(Debug)]
pub struct EditSession {
    buffer: ByteBuffer,
    cursor: Cursor,
    path: PathBuf,
    search_strategy: SearchStrategy,
    modified: bool,
}

impl EditSession {
    /// Start editing `buffer`, which will be saved to `path`.
    ///
    /// Insert mode starts on for an empty buffer, since there is nothing to
    /// overwrite.
    pub fn new(buffer: ByteBuffer, path: impl Into<PathBuf>, search_strategy: SearchStrategy) -> Self {
        let cursor = Cursor::new(buffer.is_empty());
        Self {
            buffer,
            cursor,
            path: path.into(),
            search_strategy,
            modified: false,
        }
    }

    /// Load an existing file.
    pub fn load(path: &Path, config: &EditorConfig) -> Result<Self> {
        let buffer = persist::load(path, config.block_size)?;
        Ok(Self::new(buffer, path, config.search_strategy))
    }

    /// Load a file, creating it empty if it does not exist.
    pub fn open_or_create(path: &Path, config: &EditorConfig) -> Result<Self> {
        let buffer = persist::open_or_create(path, config.block_size)?;
        Ok(Self::new(buffer, path, config.search_strategy))
    }

    /// The bytes being edited.
    pub const fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    /// Current cursor state.
    pub const fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Path the buffer saves to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Final path component, for display.
    pub fn name(&self) -> String {
        self.path.file_name().map_or_else(
            || self.path.display().to_string(),
            |name| name.to_string_lossy().into_owned(),
        )
    }

    /// Whether there are unsaved changes.
    pub const fn is_modified(&self) -> bool {
        self.modified
    }

    /// Apply a single command.
    ///
    /// Recoverable failures (bad input, IO) come back as errors with the
    /// session unchanged; check [`EditError::is_fatal`] before continuing.
    pub fn apply(&mut self, command: Command) -> Result<Outcome> {
        tracing::debug!(?command, "apply");
        let size = self.buffer.len();
        let outcome = match command {
            Command::Move(delta) => {
                self.cursor.move_by(delta, size);
                Outcome::Applied
            }
            Command::Goto(addr) => {
                self.cursor.goto_byte(addr, size);
                Outcome::Applied
            }
            Command::Home => {
                self.cursor.home();
                Outcome::Applied
            }
            Command::RowEnd => {
                self.cursor.row_end(size);
                Outcome::Applied
            }
            Command::RowMove(rows) => {
                self.cursor.row_move(rows, size);
                Outcome::Applied
            }
            Command::PageMove(pages) => {
                self.cursor.page_move(pages, size);
                Outcome::Applied
            }
            Command::BufferStart => {
                self.cursor.buffer_start();
                Outcome::Applied
            }
            Command::BufferEnd => {
                self.cursor.buffer_end(size);
                Outcome::Applied
            }
            Command::ToggleEditMode => {
                self.cursor.toggle_edit_mode();
                Outcome::Applied
            }
            Command::ToggleInsertMode => {
                self.cursor.toggle_insert_mode(size);
                Outcome::Applied
            }
            Command::WriteHexDigit(digit) => self.write_hex_digit(digit)?,
            Command::WriteAsciiByte(value) => self.write_ascii_byte(value)?,
            Command::DeleteAtCursor => self.delete_at_cursor(),
            Command::Append(count) => self.append(count)?,
            Command::FindLiteral(pattern) => self.find_literal(&pattern)?,
            Command::FindHex(text) => self.find_hex(&text)?,
            Command::Save => self.save()?,
        };
        Ok(outcome)
    }

    /// Move by `delta` nibbles.
    pub fn move_by(&mut self, delta: isize) {
        self.cursor.move_by(delta, self.buffer.len());
    }

    /// Jump to byte `addr`.
    pub fn goto(&mut self, addr: i64) {
        self.cursor.goto_byte(addr, self.buffer.len());
    }

    /// Switch hex/ascii editing.
    pub const fn toggle_edit_mode(&mut self) {
        self.cursor.toggle_edit_mode();
    }

    /// Switch insert/overwrite.
    pub fn toggle_insert_mode(&mut self) {
        self.cursor.toggle_insert_mode(self.buffer.len());
    }

    /// Write a typed character the way the current edit mode interprets it.
    ///
    /// Hex mode takes a hex digit. Ascii mode writes the character's UTF-8
    /// bytes one at a time, so literal search finds what was typed. Bytes
    /// that would run past the end of an overwrite are dropped.
    pub fn write_char(&mut self, c: char) -> Result<Outcome> {
        match self.cursor.mode() {
            EditMode::Hex => self.write_hex_digit(c),
            EditMode::Ascii => {
                let mut encoded = [0; 4];
                let mut outcome = Outcome::Unchanged;
                for &byte in c.encode_utf8(&mut encoded).as_bytes() {
                    let before = self.cursor.index();
                    outcome = self.write_ascii_byte(byte)?;
                    if outcome == Outcome::Unchanged || self.cursor.index() == before {
                        break;
                    }
                }
                Ok(outcome)
            }
        }
    }

    /// Set the nibble under the cursor, then advance.
    ///
    /// In insert mode a write to a high nibble first opens a zero byte, so
    /// two digits in a row insert one byte.
    pub fn write_hex_digit(&mut self, digit: char) -> Result<Outcome> {
        let Some(value) = nibble_value(digit) else {
            tracing::warn!(%digit, "rejected non-hex digit");
            return Err(EditError::invalid(format!(
                "'{}' is not a hex digit",
                digit.escape_default()
            )));
        };
        let offset = self.cursor.byte_offset();
        let high = self.cursor.is_high_nibble();
        if high && self.cursor.is_inserting() && !self.buffer.insert(offset, 1)? {
            return Ok(Outcome::Unchanged);
        }
        let Some(old) = self.buffer.read_byte(offset) else {
            return Ok(Outcome::Unchanged);
        };
        let shift = if high { 4 } else { 0 };
        let new = (old & !(0x0F << shift)) | (value << shift);
        self.buffer.write_byte(offset, new);
        self.finish_write();
        Ok(Outcome::Applied)
    }

    /// Overwrite the byte under the cursor, then advance.
    ///
    /// In insert mode a zero byte is opened first.
    pub fn write_ascii_byte(&mut self, value: u8) -> Result<Outcome> {
        let offset = self.cursor.byte_offset();
        if self.cursor.is_inserting() && !self.buffer.insert(offset, 1)? {
            return Ok(Outcome::Unchanged);
        }
        if !self.buffer.write_byte(offset, value) {
            return Ok(Outcome::Unchanged);
        }
        self.finish_write();
        Ok(Outcome::Applied)
    }

    /// Remove the byte under the cursor.
    pub fn delete_at_cursor(&mut self) -> Outcome {
        if !self.buffer.delete(self.cursor.byte_offset(), 1) {
            return Outcome::Unchanged;
        }
        self.modified = true;
        self.cursor.clamp(self.buffer.len());
        Outcome::Applied
    }

    /// Add `count` zero bytes at the end without moving the cursor.
    pub fn append(&mut self, count: usize) -> Result<Outcome> {
        if count == 0 {
            return Ok(Outcome::Unchanged);
        }
        self.buffer.append(count)?;
        self.modified = true;
        Ok(Outcome::Applied)
    }

    /// Search for raw bytes after the cursor's byte.
    pub fn find_literal(&mut self, pattern: &[u8]) -> Result<Outcome> {
        if pattern.is_empty() {
            return Err(EditError::invalid("search text is empty"));
        }
        Ok(self.find(pattern))
    }

    /// Search for hex digit pairs after the cursor's byte.
    ///
    /// A trailing unpaired digit is ignored.
    pub fn find_hex(&mut self, text: &str) -> Result<Outcome> {
        let pattern = search::hex_pattern(text)?;
        Ok(self.find(&pattern))
    }

    /// Write the buffer back to its path.
    pub fn save(&mut self) -> Result<Outcome> {
        match persist::save(&self.buffer, &self.path) {
            Ok(bytes) => {
                self.modified = false;
                Ok(Outcome::Saved { bytes })
            }
            Err(err) => {
                tracing::warn!(error = %err, "save failed");
                Err(err)
            }
        }
    }

    fn find(&mut self, pattern: &[u8]) -> Outcome {
        let start = self.cursor.byte_offset() + 1;
        match search::find_forward(self.buffer.as_bytes(), pattern, start, self.search_strategy) {
            Some(offset) => {
                self.goto(i64::try_from(offset).unwrap_or(i64::MAX));
                Outcome::Found { offset }
            }
            None => Outcome::NotFound,
        }
    }

    fn finish_write(&mut self) {
        self.modified = true;
        #[allow(clippy::cast_possible_wrap)]
        self.cursor
            .move_by(self.cursor.increment() as isize, self.buffer.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(bytes: &[u8]) -> EditSession {
        let buffer = ByteBuffer::from_bytes(bytes.to_vec(), 16).unwrap();
        EditSession::new(buffer, "/tmp/unused.bin", SearchStrategy::GreedyReset)
    }

    #[test]
    fn test_empty_buffer_starts_inserting() {
        assert!(session(&[]).cursor().is_inserting());
        assert!(!session(&[1]).cursor().is_inserting());
    }

    #[test]
    fn test_append_write_and_search_scenario() {
        let mut s = session(&[]);
        assert_eq!(s.apply(Command::Append(4)).unwrap(), Outcome::Applied);
        assert_eq!(s.buffer().as_bytes(), &[0, 0, 0, 0]);
        assert_eq!(s.cursor().index(), 0);

        s.apply(Command::WriteHexDigit('4')).unwrap();
        s.apply(Command::WriteHexDigit('1')).unwrap();
        assert_eq!(s.buffer().read_byte(0), Some(0x41));
        assert_eq!(s.cursor().index(), 2);

        s.apply(Command::ToggleEditMode).unwrap();
        s.apply(Command::WriteAsciiByte(b'B')).unwrap();
        assert_eq!(s.buffer().read_byte(1), Some(0x42));
        assert_eq!(s.cursor().index(), 4);
        // Insert mode opened two bytes in front of the appended zeros.
        assert_eq!(s.buffer().as_bytes(), &[0x41, 0x42, 0, 0, 0, 0]);

        s.apply(Command::BufferStart).unwrap();
        assert_eq!(s.apply(Command::FindLiteral(b"A".to_vec())).unwrap(), Outcome::NotFound);
        assert_eq!(s.cursor().index(), 0);
        assert_eq!(
            s.apply(Command::FindLiteral(b"B".to_vec())).unwrap(),
            Outcome::Found { offset: 1 }
        );
        assert_eq!(s.cursor().index(), 2);
    }

    #[test]
    fn test_overwrite_hex_nibbles() {
        let mut s = session(&[0x00, 0xFF]);
        s.write_hex_digit('a').unwrap();
        assert_eq!(s.buffer().read_byte(0), Some(0xA0));
        s.write_hex_digit('B').unwrap();
        assert_eq!(s.buffer().read_byte(0), Some(0xAB));
        s.write_hex_digit('0').unwrap();
        assert_eq!(s.buffer().as_bytes(), &[0xAB, 0x0F]);
        assert_eq!(s.buffer().len(), 2);
        assert!(s.is_modified());
    }

    #[test]
    fn test_hex_write_at_last_nibble_stays() {
        let mut s = session(&[0x00]);
        s.write_hex_digit('1').unwrap();
        s.write_hex_digit('2').unwrap();
        assert_eq!(s.buffer().as_bytes(), &[0x12]);
        assert_eq!(s.cursor().index(), 1);
    }

    #[test]
    fn test_rejected_digit_changes_nothing() {
        let mut s = session(&[0x12, 0x34]);
        let err = s.apply(Command::WriteHexDigit('z')).unwrap_err();
        assert!(matches!(err, EditError::InvalidInput(_)));
        assert_eq!(s.buffer().as_bytes(), &[0x12, 0x34]);
        assert_eq!(s.cursor().index(), 0);
        assert!(!s.is_modified());
    }

    #[test]
    fn test_insert_mode_hex_inserts_whole_byte() {
        let mut s = session(&[0x10, 0x20]);
        s.toggle_insert_mode();
        s.move_by(2);
        s.write_hex_digit('f').unwrap();
        s.write_hex_digit('e').unwrap();
        assert_eq!(s.buffer().as_bytes(), &[0x10, 0xFE, 0x20]);
        assert_eq!(s.cursor().index(), 4);
    }

    #[test]
    fn test_insert_at_tail_appends() {
        let mut s = session(&[0x10]);
        s.toggle_insert_mode();
        s.apply(Command::BufferEnd).unwrap();
        assert_eq!(s.cursor().index(), 2);
        s.write_char('7').unwrap();
        s.write_char('7').unwrap();
        assert_eq!(s.buffer().as_bytes(), &[0x10, 0x77]);
        assert_eq!(s.cursor().index(), 4);
    }

    #[test]
    fn test_write_char_ascii_mode() {
        let mut s = session(&[0, 0]);
        s.toggle_edit_mode();
        s.write_char('h').unwrap();
        s.write_char('i').unwrap();
        assert_eq!(s.buffer().as_bytes(), b"hi");
    }

    #[test]
    fn test_typed_non_ascii_is_found_by_literal_search() {
        let mut s = session(&[0, 0, 0]);
        s.toggle_edit_mode();
        s.move_by(2);
        s.write_char('é').unwrap();
        assert_eq!(s.buffer().as_bytes(), &[0x00, 0xC3, 0xA9]);

        s.apply(Command::BufferStart).unwrap();
        let found = s.apply(Command::FindLiteral("é".as_bytes().to_vec())).unwrap();
        assert_eq!(found, Outcome::Found { offset: 1 });
        assert_eq!(s.cursor().byte_offset(), 1);
    }

    #[test]
    fn test_insert_multibyte_char() {
        let mut s = session(&[0x01]);
        s.toggle_edit_mode();
        s.toggle_insert_mode();
        s.write_char('€').unwrap();
        assert_eq!(s.buffer().as_bytes(), &[0xE2, 0x82, 0xAC, 0x01]);
        assert_eq!(s.cursor().byte_offset(), 3);
    }

    #[test]
    fn test_overwrite_stops_at_last_byte() {
        let mut s = session(&[0, 0]);
        s.toggle_edit_mode();
        s.move_by(2);
        assert_eq!(s.write_char('€').unwrap(), Outcome::Applied);
        assert_eq!(s.buffer().as_bytes(), &[0x00, 0xE2]);
        assert_eq!(s.cursor().byte_offset(), 1);
    }

    #[test]
    fn test_rejected_control_digit_message_is_escaped() {
        let mut s = session(&[0]);
        let err = s.write_char('\n').unwrap_err();
        assert_eq!(err.to_string(), "invalid input: '\\n' is not a hex digit");
    }

    #[test]
    fn test_overwrite_on_empty_buffer_is_unchanged() {
        let mut s = session(&[]);
        s.toggle_insert_mode();
        assert_eq!(s.write_hex_digit('1').unwrap(), Outcome::Unchanged);
        assert_eq!(s.write_ascii_byte(b'x').unwrap(), Outcome::Unchanged);
        assert!(s.buffer().is_empty());
    }

    #[test]
    fn test_delete_at_cursor() {
        let mut s = session(&[0x10, 0x20, 0x30]);
        s.goto(1);
        assert_eq!(s.apply(Command::DeleteAtCursor).unwrap(), Outcome::Applied);
        assert_eq!(s.buffer().as_bytes(), &[0x10, 0x30]);
        assert_eq!(s.buffer().len(), 2);
    }

    #[test]
    fn test_delete_last_byte_reclamps() {
        let mut s = session(&[0x10, 0x20]);
        s.goto(1);
        s.move_by(1);
        assert_eq!(s.cursor().index(), 3);
        s.delete_at_cursor();
        assert_eq!(s.buffer().as_bytes(), &[0x10]);
        assert_eq!(s.cursor().index(), 1);

        s.delete_at_cursor();
        assert!(s.buffer().is_empty());
        assert_eq!(s.cursor().index(), 0);
        assert_eq!(s.delete_at_cursor(), Outcome::Unchanged);
    }

    #[test]
    fn test_delete_in_append_slot_is_unchanged() {
        let mut s = session(&[0x10]);
        s.toggle_insert_mode();
        s.apply(Command::BufferEnd).unwrap();
        assert_eq!(s.delete_at_cursor(), Outcome::Unchanged);
        assert_eq!(s.buffer().len(), 1);
    }

    #[test]
    fn test_append_keeps_cursor() {
        let mut s = session(&[1, 2]);
        s.goto(1);
        s.append(3).unwrap();
        assert_eq!(s.cursor().index(), 2);
        assert_eq!(s.buffer().as_bytes(), &[1, 2, 0, 0, 0]);
        assert_eq!(s.append(0).unwrap(), Outcome::Unchanged);
    }

    #[test]
    fn test_find_hex_from_start() {
        let mut s = session(&[0x10, 0x20, 0x30, 0x40]);
        assert_eq!(
            s.apply(Command::FindHex("2030".to_string())).unwrap(),
            Outcome::Found { offset: 1 }
        );
        assert_eq!(s.cursor().index(), 2);
    }

    #[test]
    fn test_find_is_repeatable_and_advances() {
        let mut s = session(b"abab.ab");
        assert_eq!(s.find_literal(b"ab").unwrap(), Outcome::Found { offset: 2 });
        assert_eq!(s.find_literal(b"ab").unwrap(), Outcome::Found { offset: 5 });
        assert_eq!(s.find_literal(b"ab").unwrap(), Outcome::NotFound);
        assert_eq!(s.cursor().byte_offset(), 5);
    }

    #[test]
    fn test_find_rejects_empty_patterns() {
        let mut s = session(b"abc");
        assert!(s.find_literal(b"").is_err());
        assert!(s.find_hex("a").is_err());
        assert!(s.find_hex("zz").is_err());
    }

    #[test]
    fn test_substring_strategy_session() {
        let buffer = ByteBuffer::from_bytes(b"xaab".to_vec(), 16).unwrap();
        let mut s = EditSession::new(buffer, "unused", SearchStrategy::Substring);
        assert_eq!(s.find_literal(b"ab").unwrap(), Outcome::Found { offset: 2 });
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("edit.bin");
        std::fs::write(&path, [0x00, 0x11, 0x22]).unwrap();

        let config = EditorConfig::default();
        let mut s = EditSession::load(&path, &config).unwrap();
        assert_eq!(s.name(), "edit.bin");
        s.write_hex_digit('f').unwrap();
        assert!(s.is_modified());

        assert_eq!(s.apply(Command::Save).unwrap(), Outcome::Saved { bytes: 3 });
        assert!(!s.is_modified());

        let reloaded = EditSession::load(&path, &config).unwrap();
        assert_eq!(reloaded.buffer().as_bytes(), &[0xF0, 0x11, 0x22]);
    }

    #[test]
    fn test_failed_save_keeps_state() {
        let dir = tempfile::tempdir().unwrap();
        let buffer = ByteBuffer::from_bytes(vec![1, 2, 3], 16).unwrap();
        let mut s = EditSession::new(
            buffer,
            dir.path().join("missing/out.bin"),
            SearchStrategy::GreedyReset,
        );
        s.append(1).unwrap();

        let err = s.save().unwrap_err();
        assert!(!err.is_fatal());
        assert!(s.is_modified());
        assert_eq!(s.buffer().as_bytes(), &[1, 2, 3, 0]);
    }

    #[test]
    fn test_open_or_create_empty_file_inserts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fresh.bin");
        let s = EditSession::open_or_create(&path, &EditorConfig::default()).unwrap();
        assert!(s.buffer().is_empty());
        assert!(s.cursor().is_inserting());
    }
}
