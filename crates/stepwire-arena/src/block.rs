//! Fixed-capacity byte blocks.
//!
//! A [`Block`] is one pre-allocated `Vec<u8>` with a used-length counter.
//! Spans are bump-allocated and copied in; a block can be escalated to a
//! larger tier in place, which preserves every existing offset.

/// A single contiguous byte block with bump allocation.
///
/// Blocks are never freed while their pool lives. They are only reset or grown.
pub struct Block {
    /// Backing storage. Sized to the full tier capacity at creation.
    data: Vec<u8>,
    /// Bump pointer: number of bytes handed out since the last reset.
    used: usize,
    /// Index into the pool's tier table.
    tier: usize,
}

impl Block {
    /// Create a new zero-filled block of `capacity` bytes at `tier`.
    pub fn new(tier: usize, capacity: usize) -> Self {
        Self {
            data: vec![0; capacity],
            used: 0,
            tier,
        }
    }

    /// Copy `bytes` into the block.
    ///
    /// Returns the starting offset, or `None` without writing anything if
    /// the remaining capacity is too small.
    pub fn alloc(&mut self, bytes: &[u8]) -> Option<u32> {
        let end = self.used.checked_add(bytes.len())?;
        if end > self.data.len() {
            return None;
        }
        let offset = self.used as u32;
        self.data[self.used..end].copy_from_slice(bytes);
        self.used = end;
        Some(offset)
    }

    /// Whether `len` more bytes fit without growing.
    pub fn can_fit(&self, len: usize) -> bool {
        self.remaining() >= len
    }

    /// Grow the block to `capacity` bytes and record its new tier.
    ///
    /// Existing content and offsets are preserved. Returns `false` and
    /// leaves the block untouched if `capacity` is not larger than the
    /// current capacity.
    pub fn escalate(&mut self, tier: usize, capacity: usize) -> bool {
        if capacity <= self.data.len() {
            return false;
        }
        self.data.resize(capacity, 0);
        self.tier = tier;
        true
    }

    /// Get a shared slice at the given offset and length.
    ///
    /// Returns `None` if the range reaches past the allocated region.
    pub fn slice(&self, offset: u32, len: u32) -> Option<&[u8]> {
        let start = offset as usize;
        let end = start.checked_add(len as usize)?;
        if end > self.used {
            return None;
        }
        Some(&self.data[start..end])
    }

    /// Reset the bump pointer to zero without deallocating.
    ///
    /// The backing bytes are NOT cleared and the tier is kept.
    pub fn reset(&mut self) {
        self.used = 0;
    }

    /// Number of bytes currently allocated.
    pub fn used(&self) -> usize {
        self.used
    }

    /// Total capacity in bytes.
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Remaining free capacity in bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.used
    }

    /// Index of this block's tier.
    pub fn tier(&self) -> usize {
        self.tier
    }
}
