//! Loading files into a [`ByteBuffer`] and writing them back.
//!
//! The file format is the file itself: no header, no framing. Saving writes
//! exactly the logical bytes, never the capacity padding.

use crate::buffer::ByteBuffer;
use crate::error::{EditError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{Read, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Read an entire stream into a fresh buffer.
///
/// `origin` names the stream in error messages and logs.
pub fn load_from_reader<R: Read>(
    mut reader: R,
    block_size: usize,
    origin: &Path,
) -> Result<ByteBuffer> {
    let mut bytes = Vec::new();
    reader
        .read_to_end(&mut bytes)
        .map_err(|e| EditError::io(origin, e))?;
    let len = bytes.len();
    let buffer = ByteBuffer::from_bytes(bytes, block_size)?;
    tracing::info!(path = %origin.display(), bytes = len, "loaded file");
    Ok(buffer)
}

/// Load the file at `path`.
pub fn load(path: &Path, block_size: usize) -> Result<ByteBuffer> {
    let file = File::open(path).map_err(|e| EditError::io(path, e))?;
    load_from_reader(file, block_size, path)
}

/// Load the file at `path`, creating it empty if it does not exist.
pub fn open_or_create(path: &Path, block_size: usize) -> Result<ByteBuffer> {
    let file = OpenOptions::new()
        .read(true)
        .append(true)
        .create(true)
        .open(path)
        .map_err(|e| EditError::io(path, e))?;
    load_from_reader(file, block_size, path)
}

/// Write the logical content of `buffer` to `path`, replacing it.
///
/// The bytes go to a temporary file beside `path`, which is then renamed
/// over it, so a failed write leaves the old file intact. An existing
/// file's permissions carry over. Returns the number of bytes written. The
/// buffer is never modified, so a failed save leaves the session exactly
/// as it was.
pub fn save(buffer: &ByteBuffer, path: &Path) -> Result<usize> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut file = NamedTempFile::new_in(dir).map_err(|e| EditError::io(path, e))?;
    if let Ok(metadata) = fs::metadata(path) {
        file.as_file()
            .set_permissions(metadata.permissions())
            .map_err(|e| EditError::io(path, e))?;
    }
    file.write_all(buffer.as_bytes())
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| EditError::io(path, e))?;
    file.persist(path).map_err(|e| EditError::io(path, e.error))?;
    tracing::info!(path = %path.display(), bytes = buffer.len(), "saved file");
    Ok(buffer.len())
}
