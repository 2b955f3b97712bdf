//! Span handles into the arena.
//!
//! A [`SpanHandle`] is a (block, offset, length) triple plus the pool
//! generation it was issued in. It never carries an address, so growing
//! a block in place leaves every outstanding handle valid, and a reset
//! is detected in O(1) by comparing generations.

use std::fmt;

/// Location of one stored byte span within an [`ArenaPool`](crate::ArenaPool).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[must_use]
pub struct SpanHandle {
    /// Pool generation when this span was allocated.
    pub(crate) generation: u32,
    /// Index of the block holding the span.
    pub(crate) block: u32,
    /// Byte offset within the block.
    pub(crate) offset: u32,
    /// Length of the span in bytes.
    pub(crate) len: u32,
}

impl SpanHandle {
    /// Create a new handle.
    pub(crate) fn new(generation: u32, block: u32, offset: u32, len: u32) -> Self {
        Self {
            generation,
            block,
            offset,
            len,
        }
    }

    /// A zero-length handle. Resolves to an empty slice in any generation.
    pub(crate) fn empty(generation: u32) -> Self {
        Self::new(generation, 0, 0, 0)
    }

    /// The generation this handle belongs to.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Index of the block holding the span.
    pub fn block(&self) -> u32 {
        self.block
    }

    /// Byte offset within the block.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> u32 {
        self.len
    }

    /// Whether this is a zero-length span.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Display for SpanHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SpanHandle(gen={}, block={}, off={}, len={})",
            self.generation, self.block, self.offset, self.len
        )
    }
}
