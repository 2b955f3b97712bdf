//! Tiered, reusable byte arena for Stepwire record storage.
//!
//! Every body record of a message is copied into the arena exactly once
//! and addressed afterwards through a [`SpanHandle`]. Resetting the arena
//! between messages keeps the backing blocks, so a steady stream of
//! similarly-sized messages stops allocating after the first few.
//!
//! # Architecture
//!
//! ```text
//! ArenaPool
//! ├── ArenaConfig (tier table, growth policy, block cap)
//! ├── Block[] (fixed-capacity Vec<u8> + used-length, one tier each)
//! ├── current (search cursor, wraps to the head)
//! └── generation (bumped on reset, stamped into every SpanHandle)
//! ```
//!
//! # Growth policies
//!
//! - **Uniform:** every block has the same capacity; a miss appends another.
//! - **Escalating:** a miss first grows the current block to the next tier
//!   that fits, then falls back to a new block sized from the request.
//!
//! Both satisfy the same contract: an allocation either copies all of its
//! bytes and returns a handle, or fails without writing anything.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod config;
pub mod error;
pub mod handle;
pub mod pool;
pub mod stats;

// Public re-exports for the primary API surface.
pub use block::Block;
pub use config::{ArenaConfig, GrowthPolicy};
pub use error::ArenaError;
pub use handle::SpanHandle;
pub use pool::ArenaPool;
pub use stats::ArenaStats;
