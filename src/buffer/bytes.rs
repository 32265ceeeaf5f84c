//! `ByteBuffer`: Growable store for the bytes being edited.
//!
//! Storage is a single contiguous `Vec<u8>` whose length is the allocated
//! capacity. Only the first `len()` bytes are file content; the tail up to
//! `capacity()` is zeroed padding that is never saved.

use crate::error::{EditError, Result};

/// Default growth granularity in bytes.
pub const DEFAULT_BLOCK_SIZE: usize = 1024;

/// A growable byte store with block-granular capacity.
///
/// After every mutating operation the capacity is exactly the logical size
/// rounded up to a multiple of the block size. Growth goes through
/// `try_reserve_exact`, so running out of memory is reported as
/// [`EditError::Allocation`] rather than aborting.
///
/// Shrinking only lowers the reported capacity: the backing allocation is
/// kept, so a later regrow within it does not reallocate.
#[derive(Clone, PartialEq, Eq)]
pub struct ByteBuffer {
    /// Content followed by zero padding; `data.len()` is the capacity.
    data: Vec<u8>,
    /// Logical length.
    size: usize,
    /// Growth granularity.
    block_size: usize,
}

impl ByteBuffer {
    /// Create an empty buffer.
    ///
    /// # Panics
    /// Panics if `block_size` is 0.
    pub fn new(block_size: usize) -> Self {
        assert!(block_size > 0, "Block size must be non-zero");
        Self {
            data: Vec::new(),
            size: 0,
            block_size,
        }
    }

    /// Take ownership of loaded bytes, padding them out to the block rule.
    ///
    /// # Panics
    /// Panics if `block_size` is 0.
    pub fn from_bytes(bytes: Vec<u8>, block_size: usize) -> Result<Self> {
        let mut buffer = Self::new(block_size);
        buffer.size = bytes.len();
        buffer.data = bytes;
        let capacity = buffer.capacity_for(buffer.size)?;
        buffer.reserve_to(capacity)?;
        Ok(buffer)
    }

    /// Logical length in bytes.
    #[inline]
    pub const fn len(&self) -> usize {
        self.size
    }

    /// Check if the buffer holds no content.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Allocated capacity in bytes (always a multiple of the block size).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Growth granularity in bytes.
    #[inline]
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// The logical content, without padding.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data[..self.size]
    }

    /// Read the byte at `offset`.
    ///
    /// Returns `None` if `offset` is past the logical end.
    #[inline]
    pub fn read_byte(&self, offset: usize) -> Option<u8> {
        self.as_bytes().get(offset).copied()
    }

    /// Overwrite the byte at `offset`.
    ///
    /// Returns `false` if `offset` is past the logical end.
    #[inline]
    pub fn write_byte(&mut self, offset: usize, value: u8) -> bool {
        if offset < self.size {
            self.data[offset] = value;
            true
        } else {
            false
        }
    }

    /// Grow by `count` zero bytes at the end.
    pub fn append(&mut self, count: usize) -> Result<()> {
        if count == 0 {
            return Ok(());
        }
        let new_size = self.grown_size(count)?;
        self.reserve_to(self.capacity_for(new_size)?)?;
        self.data[self.size..new_size].fill(0);
        self.size = new_size;
        Ok(())
    }

    /// Open `count` zero bytes at `offset`, shifting the tail right.
    ///
    /// `offset == len()` appends. Returns `Ok(false)` without touching the
    /// buffer if `offset` is past the end.
    pub fn insert(&mut self, offset: usize, count: usize) -> Result<bool> {
        if offset > self.size {
            return Ok(false);
        }
        if count == 0 {
            return Ok(true);
        }
        let new_size = self.grown_size(count)?;
        self.reserve_to(self.capacity_for(new_size)?)?;
        // Source and destination overlap whenever count < size - offset.
        self.data.copy_within(offset..self.size, offset + count);
        self.data[offset..offset + count].fill(0);
        self.size = new_size;
        Ok(true)
    }

    /// Remove `count` bytes at `offset`, shifting the tail left.
    ///
    /// Returns `false` without touching the buffer if the range runs past
    /// the end.
    pub fn delete(&mut self, offset: usize, count: usize) -> bool {
        let Some(end) = offset.checked_add(count) else {
            return false;
        };
        if end > self.size {
            return false;
        }
        if count == 0 {
            return true;
        }
        self.data.copy_within(end..self.size, offset);
        let new_size = self.size - count;
        self.data[new_size..self.size].fill(0);
        self.size = new_size;
        // Never overflows: the block rule is already satisfied for a larger size.
        let capacity = new_size.div_ceil(self.block_size) * self.block_size;
        self.data.truncate(capacity);
        true
    }

    /// Capacity the block rule assigns to `size`.
    fn capacity_for(&self, size: usize) -> Result<usize> {
        size.div_ceil(self.block_size)
            .checked_mul(self.block_size)
            .ok_or(EditError::Allocation { requested: size })
    }

    fn grown_size(&self, count: usize) -> Result<usize> {
        self.size
            .checked_add(count)
            .ok_or(EditError::Allocation {
                requested: usize::MAX,
            })
    }

    /// Grow the backing storage to exactly `capacity` zeroed bytes.
    fn reserve_to(&mut self, capacity: usize) -> Result<()> {
        let current = self.data.len();
        if capacity > current {
            self.data
                .try_reserve_exact(capacity - current)
                .map_err(|_| EditError::Allocation {
                    requested: capacity,
                })?;
            self.data.resize(capacity, 0);
        }
        Ok(())
    }
}

impl Default for ByteBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_BLOCK_SIZE)
    }
}

impl std::fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("size", &self.size)
            .field("capacity", &self.capacity())
            .field("block_size", &self.block_size)
            .finish()
    }
}
