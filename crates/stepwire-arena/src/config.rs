//! Arena configuration parameters.

use crate::error::ArenaError;

/// How an [`ArenaPool`](crate::ArenaPool) grows when no block has room.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum GrowthPolicy {
    /// All blocks share the initial tier's capacity. A miss appends one
    /// more block of that size; spans larger than it are rejected.
    Uniform,
    /// A miss first escalates the current block to the smallest tier that
    /// holds its contents plus the request. If even the largest tier is too
    /// small, a new block is appended at a tier chosen from the request size.
    #[default]
    Escalating,
}

/// Configuration for the arena allocator.
///
/// Controls the tier table, growth policy, and block limit.
/// Checked by [`validate()`](ArenaConfig::validate) when a pool is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArenaConfig {
    /// Standard block capacities in bytes, strictly ascending.
    ///
    /// Default: `[1024, 4096, 16384, 65536]`. The last entry bounds the
    /// largest single span under [`GrowthPolicy::Escalating`].
    pub tiers: Vec<usize>,

    /// Index into `tiers` for the block created with the pool, and for
    /// every block under [`GrowthPolicy::Uniform`].
    ///
    /// Default: 1 (4 KiB).
    pub initial_tier: usize,

    /// Growth strategy on a capacity miss.
    pub growth: GrowthPolicy,

    /// Upper bound on the number of blocks the pool may hold.
    ///
    /// Default: 4096. Blocks are never freed before the pool is dropped.
    pub max_blocks: usize,
}

impl ArenaConfig {
    /// Default tier capacities in bytes.
    pub const DEFAULT_TIERS: [usize; 4] = [1024, 4096, 16384, 65536];

    /// Default initial tier index.
    pub const DEFAULT_INITIAL_TIER: usize = 1;

    /// Default maximum block count.
    pub const DEFAULT_MAX_BLOCKS: usize = 4096;

    /// Create a config with the default tier table and escalating growth.
    pub fn new() -> Self {
        Self {
            tiers: Self::DEFAULT_TIERS.to_vec(),
            initial_tier: Self::DEFAULT_INITIAL_TIER,
            growth: GrowthPolicy::Escalating,
            max_blocks: Self::DEFAULT_MAX_BLOCKS,
        }
    }

    /// Create a single-tier config where every block holds `block_size` bytes.
    pub fn uniform(block_size: usize) -> Self {
        Self {
            tiers: vec![block_size],
            initial_tier: 0,
            growth: GrowthPolicy::Uniform,
            max_blocks: Self::DEFAULT_MAX_BLOCKS,
        }
    }

    /// Replace the growth policy.
    pub fn with_growth(mut self, growth: GrowthPolicy) -> Self {
        self.growth = growth;
        self
    }

    /// Replace the initial tier index.
    pub fn with_initial_tier(mut self, tier: usize) -> Self {
        self.initial_tier = tier;
        self
    }

    /// Replace the block limit.
    pub fn with_max_blocks(mut self, max_blocks: usize) -> Self {
        self.max_blocks = max_blocks;
        self
    }

    /// Capacity of the given tier in bytes.
    ///
    /// # Panics
    ///
    /// Panics if `tier` is out of range of `tiers`.
    pub fn tier_capacity(&self, tier: usize) -> usize {
        self.tiers[tier]
    }

    /// Largest span the configured policy can ever place.
    pub fn max_span(&self) -> usize {
        match self.growth {
            GrowthPolicy::Uniform => self.tiers[self.initial_tier],
            GrowthPolicy::Escalating => self.tiers.last().copied().unwrap_or(0),
        }
    }

    /// Smallest tier whose capacity is at least `size`.
    pub fn smallest_fitting_tier(&self, size: usize) -> Option<usize> {
        self.tiers.iter().position(|&cap| size <= cap)
    }

    /// Tier for a fresh block that will first receive a `hint`-byte span.
    ///
    /// Picks the highest tier whose half-capacity `hint` exceeds, so a large
    /// request lands in a block with room for a few more of its size, and
    /// never picks a tier too small to hold `hint` itself.
    pub fn size_informed_tier(&self, hint: usize) -> usize {
        let by_half = (1..self.tiers.len())
            .rev()
            .find(|&t| hint > self.tiers[t] / 2)
            .unwrap_or(0);
        let fitting = self
            .smallest_fitting_tier(hint)
            .unwrap_or(self.tiers.len() - 1);
        by_half.max(fitting)
    }

    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ArenaError> {
        if self.tiers.is_empty() {
            return Err(invalid("tier table is empty"));
        }
        if self.tiers[0] == 0 {
            return Err(invalid("tier capacity must be non-zero"));
        }
        if self.tiers.windows(2).any(|w| w[0] >= w[1]) {
            return Err(invalid("tier capacities must be strictly ascending"));
        }
        if self.tiers.iter().any(|&cap| cap > u32::MAX as usize) {
            return Err(invalid("tier capacity exceeds u32::MAX"));
        }
        if self.initial_tier >= self.tiers.len() {
            return Err(ArenaError::InvalidConfig {
                reason: format!(
                    "initial tier {} out of range for {} tiers",
                    self.initial_tier,
                    self.tiers.len()
                ),
            });
        }
        if self.max_blocks == 0 || self.max_blocks > u32::MAX as usize {
            return Err(invalid("max_blocks must be in 1..=u32::MAX"));
        }
        Ok(())
    }
}

fn invalid(reason: &str) -> ArenaError {
    ArenaError::InvalidConfig {
        reason: reason.to_owned(),
    }
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self::new()
    }
}
