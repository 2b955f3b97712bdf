//! Arena-backed multi-record message package.
//!
//! [`StepPackage`] decodes, builds, queries, mutates, and serialises one
//! Stepwire message at a time. Body records live in a reusable
//! [`ArenaPool`](stepwire_arena::ArenaPool); a call to
//! [`init()`](StepPackage::init) or [`set_package()`](StepPackage::set_package)
//! recycles the pool for the next message without freeing it.
//!
//! # Record lifecycle
//!
//! ```text
//!            append_record()                 end_append_record()
//!   Idle ───────────────────────► Building ─────────────────────► Idle
//!    ▲                               │
//!    └───────────────────────────────┘
//!      append_record() (flushes the pending record first)
//! ```
//!
//! # Borrowing
//!
//! [`find_item()`](StepPackage::find_item) returns a slice into the arena.
//! The borrow checker ties it to `&self`, so it cannot outlive the next
//! mutating call or reset.
//!
//! A package is single-threaded. Throughput comes from running many
//! independent packages in parallel, one per thread.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
pub mod config;
pub mod error;
pub mod package;
pub mod store;
mod typed;

pub use builder::RecordBuilder;
pub use config::PackageConfig;
pub use error::PackageError;
pub use package::StepPackage;
pub use store::{RecordSpan, RecordStore};
