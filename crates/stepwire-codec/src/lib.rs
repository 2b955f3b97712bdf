//! Escape codec and line grammar for Stepwire messages.
//!
//! A message is one header line followed by zero or more body lines,
//! each of the form `id=value&id=value&...&`. Values are escaped so that
//! the four reserved bytes (`\`, `=`, `&`, newline) only ever appear as
//! grammar, which is what makes byte-scanning field lookup sound.
//!
//! # Modules
//!
//! - [`escape`](mod@escape): reserved-byte escaping, in bulk or streamed through
//!   [`EscapeWriter`]
//! - [`grammar`]: header parse/format, body line normalisation, field
//!   location and record rebuild

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod escape;
pub mod grammar;

pub use escape::{escape, escape_into, unescape, unescape_str, EscapeWriter};
pub use grammar::{
    find_value, format_header, locate_value, normalize_body_line, parse_header,
    rebuild_with_value, split_lines, HeaderMap,
};
