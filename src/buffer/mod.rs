//! Buffer module: The byte store being edited.
//!
//! This module contains:
//! - [`ByteBuffer`]: Block-granular growable bytes with insert/delete
//! - [`hex`]: Hex digit parsing for nibble writes, search patterns and addresses

mod bytes;
pub mod hex;

pub use bytes::{ByteBuffer, DEFAULT_BLOCK_SIZE};
