//! Arena-specific error types.

use std::error::Error;
use std::fmt;

use crate::handle::SpanHandle;

/// Errors that can occur during arena operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArenaError {
    /// The requested span is larger than the largest block the policy can
    /// produce. Retrying will not help; the message must be discarded.
    CapacityExceeded {
        /// Number of bytes requested.
        requested: usize,
        /// Capacity of the largest tier available to the policy.
        max_tier: usize,
    },
    /// Every block is full and the pool already holds `max_blocks` blocks.
    PoolExhausted {
        /// Number of bytes requested.
        requested: usize,
        /// Number of blocks in the pool.
        blocks: usize,
    },
    /// A [`SpanHandle`] issued before the most recent reset.
    StaleHandle {
        /// The generation encoded in the handle.
        handle_generation: u32,
        /// The pool's current generation.
        current: u32,
    },
    /// A handle whose block or byte range does not exist in this pool.
    ForeignHandle {
        /// The offending handle.
        handle: SpanHandle,
    },
    /// The arena configuration failed validation.
    InvalidConfig {
        /// Description of the violated constraint.
        reason: String,
    },
}

impl fmt::Display for ArenaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityExceeded {
                requested,
                max_tier,
            } => {
                write!(
                    f,
                    "arena capacity exceeded: requested {requested} bytes, largest tier {max_tier} bytes"
                )
            }
            Self::PoolExhausted { requested, blocks } => {
                write!(
                    f,
                    "arena pool exhausted: no room for {requested} bytes in {blocks} blocks"
                )
            }
            Self::StaleHandle {
                handle_generation,
                current,
            } => {
                write!(
                    f,
                    "stale handle: generation {handle_generation}, current {current}"
                )
            }
            Self::ForeignHandle { handle } => {
                write!(f, "handle does not belong to this pool: {handle}")
            }
            Self::InvalidConfig { reason } => {
                write!(f, "invalid arena config: {reason}")
            }
        }
    }
}

impl Error for ArenaError {}
