//! Stepwire: a compact escaped key/value message codec with arena-backed
//! record storage.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Stepwire sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use stepwire::prelude::*;
//!
//! let mut pkg = StepPackage::new(PackageConfig::default()).unwrap();
//! pkg.set_package("1=100&2=Success&\n10=SH&20=000001&\n10=SZ&20=000002&\n").unwrap();
//!
//! assert_eq!(pkg.get_base_field_value(2), Some("Success"));
//! assert_eq!(pkg.records_count(), 2);
//! pkg.goto_next();
//! assert_eq!(pkg.get_step_value_by_id(20).as_deref(), Some("000002"));
//!
//! pkg.init();
//! pkg.set_base_field_value(1, 200);
//! pkg.append_record().unwrap();
//! pkg.add_field_value(20, "A=B&C", true);
//! pkg.end_append_record().unwrap();
//! assert_eq!(pkg.to_string(), "1=200&\n20=A\\aB\\bC&\n");
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `stepwire-core` | `FieldId`, reserved grammar bytes |
//! | [`arena`] | `stepwire-arena` | Tiered block pool, span handles, arena config |
//! | [`codec`] | `stepwire-codec` | Escape codec and wire grammar |
//! | [`engine`] | `stepwire-engine` | `StepPackage`, record store, package config |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Field ids and grammar bytes (`stepwire-core`).
pub use stepwire_core as types;

/// Tiered block pool (`stepwire-arena`).
///
/// [`arena::ArenaConfig`] and [`arena::GrowthPolicy`] select between
/// uniform blocks and per-block tier escalation.
pub use stepwire_arena as arena;

/// Escape codec and wire grammar (`stepwire-codec`).
pub use stepwire_codec as codec;

/// The message package (`stepwire-engine`).
pub use stepwire_engine as engine;

/// Common imports for typical Stepwire usage.
pub mod prelude {
    pub use stepwire_arena::{ArenaConfig, ArenaError, ArenaStats, GrowthPolicy};
    pub use stepwire_core::FieldId;
    pub use stepwire_engine::{PackageConfig, PackageError, StepPackage};
}
