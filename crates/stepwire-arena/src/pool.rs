//! The block pool: find-or-grow allocation over a list of [`Block`]s.

use std::fmt;

use crate::block::Block;
use crate::config::{ArenaConfig, GrowthPolicy};
use crate::error::ArenaError;
use crate::handle::SpanHandle;
use crate::stats::ArenaStats;

/// A growable list of [`Block`]s with a wrapping search cursor.
///
/// Allocation looks for room starting at the block that satisfied the
/// previous request, wraps to the head, and only then grows according to
/// the configured [`GrowthPolicy`]. Spans never straddle blocks.
///
/// One pool belongs to one message package.
pub struct ArenaPool {
    config: ArenaConfig,
    blocks: Vec<Block>,
    /// Index of the block tried first by the next allocation.
    current: usize,
    /// Bumped on every reset; stamped into each handle.
    generation: u32,
    allocations: u64,
    allocated_bytes: u64,
    escalations: u64,
}

impl fmt::Debug for ArenaPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArenaPool")
            .field("blocks", &self.blocks.len())
            .field("current", &self.current)
            .field("generation", &self.generation)
            .field("used", &self.used_size())
            .field("total", &self.total_size())
            .finish()
    }
}

impl ArenaPool {
    /// Create a pool with one pre-allocated block at the initial tier.
    pub fn new(config: ArenaConfig) -> Result<Self, ArenaError> {
        config.validate()?;
        let tier = config.initial_tier;
        let first = Block::new(tier, config.tier_capacity(tier));
        Ok(Self {
            config,
            blocks: vec![first],
            current: 0,
            generation: 0,
            allocations: 0,
            allocated_bytes: 0,
            escalations: 0,
        })
    }

    /// Copy `bytes` into the pool and return a handle to the copy.
    ///
    /// Empty input yields an empty handle without touching any block.
    /// On error nothing has been written.
    pub fn allocate(&mut self, bytes: &[u8]) -> Result<SpanHandle, ArenaError> {
        let len = bytes.len();
        if len == 0 {
            return Ok(SpanHandle::empty(self.generation));
        }

        let max_span = self.config.max_span();
        if len > max_span {
            return Err(ArenaError::CapacityExceeded {
                requested: len,
                max_tier: max_span,
            });
        }

        let index = match self.find_available(len) {
            Some(index) => index,
            None => self.grow(len)?,
        };

        let Some(offset) = self.blocks[index].alloc(bytes) else {
            // grow() only returns a block with room for `len`.
            return Err(ArenaError::PoolExhausted {
                requested: len,
                blocks: self.blocks.len(),
            });
        };
        self.current = index;
        self.allocations += 1;
        self.allocated_bytes += len as u64;

        Ok(SpanHandle::new(
            self.generation,
            index as u32,
            offset,
            len as u32,
        ))
    }

    /// Resolve a handle to the bytes it covers.
    pub fn resolve(&self, handle: SpanHandle) -> Result<&[u8], ArenaError> {
        if handle.is_empty() {
            return Ok(&[]);
        }
        if handle.generation != self.generation {
            return Err(ArenaError::StaleHandle {
                handle_generation: handle.generation,
                current: self.generation,
            });
        }
        self.blocks
            .get(handle.block as usize)
            .and_then(|block| block.slice(handle.offset, handle.len))
            .ok_or(ArenaError::ForeignHandle { handle })
    }

    /// Capacity of the block a live handle points into.
    pub fn block_capacity(&self, handle: SpanHandle) -> Option<usize> {
        if handle.generation != self.generation {
            return None;
        }
        self.blocks
            .get(handle.block as usize)
            .map(Block::capacity)
    }

    /// Reset every block's bump pointer without deallocating.
    ///
    /// O(block count). Block contents and tiers are kept; every handle
    /// issued so far becomes stale.
    pub fn reset(&mut self) {
        for block in &mut self.blocks {
            block.reset();
        }
        self.current = 0;
        self.generation = self.generation.wrapping_add(1);
        self.allocations = 0;
        self.allocated_bytes = 0;
        self.escalations = 0;
    }

    /// Total bytes handed out across all blocks.
    pub fn used_size(&self) -> usize {
        self.blocks.iter().map(Block::used).sum()
    }

    /// Total backing capacity across all blocks.
    pub fn total_size(&self) -> usize {
        self.blocks.iter().map(Block::capacity).sum()
    }

    /// Number of blocks currently owned.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// The current generation.
    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// The configuration this pool was built with.
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    /// Occupancy and counters for diagnostics.
    pub fn stats(&self) -> ArenaStats {
        ArenaStats {
            block_count: self.blocks.len(),
            used_bytes: self.used_size(),
            total_bytes: self.total_size(),
            allocations: self.allocations,
            allocated_bytes: self.allocated_bytes,
            escalations: self.escalations,
        }
    }

    /// First block with room for `len`, scanning from `current` and
    /// wrapping to the head.
    fn find_available(&self, len: usize) -> Option<usize> {
        (self.current..self.blocks.len())
            .chain(0..self.current)
            .find(|&i| self.blocks[i].can_fit(len))
    }

    /// Make room for `len` bytes and return the index of a block that has it.
    fn grow(&mut self, len: usize) -> Result<usize, ArenaError> {
        if self.config.growth == GrowthPolicy::Escalating {
            let current = self.current;
            let block = &mut self.blocks[current];
            let required = block.used() + len;
            if let Some(tier) = self.config.smallest_fitting_tier(required) {
                if tier > block.tier() {
                    let from = block.capacity();
                    let to = self.config.tier_capacity(tier);
                    block.escalate(tier, to);
                    self.escalations += 1;
                    tracing::debug!(block = current, from, to, "escalated arena block");
                    return Ok(current);
                }
            }
        }

        if self.blocks.len() >= self.config.max_blocks {
            return Err(ArenaError::PoolExhausted {
                requested: len,
                blocks: self.blocks.len(),
            });
        }

        let tier = match self.config.growth {
            GrowthPolicy::Uniform => self.config.initial_tier,
            GrowthPolicy::Escalating => self.config.size_informed_tier(len),
        };
        let capacity = self.config.tier_capacity(tier);
        self.blocks.push(Block::new(tier, capacity));
        tracing::debug!(
            blocks = self.blocks.len(),
            tier,
            capacity,
            "appended arena block"
        );
        Ok(self.blocks.len() - 1)
    }
}
