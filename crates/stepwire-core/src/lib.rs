//! Core types for the Stepwire message codec.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the opaque [`FieldId`] key and the byte constants of the wire grammar
//! shared by the codec and the record engine.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod grammar;
pub mod id;

pub use grammar::{ESCAPE, FIELD_DELIM, KV_SEP, LINE_END};
pub use id::{FieldId, FieldKey};
