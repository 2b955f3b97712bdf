//! Allocation diagnostics for an [`ArenaPool`](crate::ArenaPool).

/// Snapshot of pool occupancy and per-pass allocation counters.
///
/// Counters marked "since reset" return to zero on every
/// [`ArenaPool::reset`](crate::ArenaPool::reset); block figures do not,
/// because blocks outlive resets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ArenaStats {
    /// Number of blocks owned by the pool.
    pub block_count: usize,
    /// Bytes handed out across all blocks.
    pub used_bytes: usize,
    /// Backing capacity across all blocks.
    pub total_bytes: usize,
    /// Successful non-empty allocations since reset.
    pub allocations: u64,
    /// Bytes copied in by those allocations since reset.
    pub allocated_bytes: u64,
    /// In-place tier escalations since reset.
    pub escalations: u64,
}
