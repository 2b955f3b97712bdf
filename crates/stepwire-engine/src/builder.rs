//! Build buffer for the record under construction.
//!
//! [`RecordBuilder`] accumulates `id=value&` tokens until the record is
//! flushed into the arena. The backing `Vec` is cleared, not freed, after
//! each flush, so building many records reuses one allocation.

use std::fmt;
use std::io::Write as _;

use stepwire_codec::{escape_into, EscapeWriter};
use stepwire_core::grammar::{is_reserved, FIELD_DELIM};
use stepwire_core::FieldId;

/// Accumulator for one body record's wire bytes.
#[derive(Debug)]
pub struct RecordBuilder {
    /// Pending bytes. Non-empty only between record start and flush.
    buf: Vec<u8>,
}

impl RecordBuilder {
    /// Create a builder with `capacity` bytes reserved.
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Append `id=value&`.
    ///
    /// With `escape` set, reserved bytes in the formatted value are
    /// escaped. Without it the value is written verbatim, which suits
    /// numbers and codes. A verbatim value that turns out to hold a
    /// reserved byte is escaped anyway, so no value can end its field
    /// early or forge a sibling key.
    pub fn push_field(&mut self, id: FieldId, value: &dyn fmt::Display, escape: bool) {
        // Writes into a Vec cannot fail.
        let _ = write!(self.buf, "{id}=");
        if escape {
            let _ = fmt::Write::write_fmt(&mut EscapeWriter::new(&mut self.buf), format_args!("{value}"));
        } else {
            let start = self.buf.len();
            let _ = write!(self.buf, "{value}");
            if self.buf[start..].iter().any(|&b| is_reserved(b)) {
                tracing::warn!(%id, "verbatim value holds reserved bytes, escaping it");
                let raw = self.buf.split_off(start);
                escape_into(&raw, &mut self.buf);
            }
        }
        self.buf.push(FIELD_DELIM);
    }

    /// The pending bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Number of pending bytes.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether no record is under construction.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Discard the pending bytes, keeping the allocation.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Reserved capacity of the backing storage.
    pub fn capacity(&self) -> usize {
        self.buf.capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_terminated() {
        let mut b = RecordBuilder::new(64);
        b.push_field(FieldId(10), &"SH", false);
        b.push_field(FieldId(30), &100, false);
        assert_eq!(b.as_bytes(), b"10=SH&30=100&");
    }

    #[test]
    fn escape_flag_escapes_value_only() {
        let mut b = RecordBuilder::new(64);
        b.push_field(FieldId(20), &"A=B&C", true);
        assert_eq!(b.as_bytes(), b"20=A\\aB\\bC&");
    }

    #[test]
    fn verbatim_value_cannot_forge_a_field() {
        let mut b = RecordBuilder::new(64);
        b.push_field(FieldId(10), &"a&20=injected", false);
        b.push_field(FieldId(30), &42, false);
        assert_eq!(b.as_bytes(), b"10=a\\b20\\ainjected&30=42&");
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut b = RecordBuilder::new(16);
        b.push_field(FieldId(1), &"x".repeat(100), false);
        let cap = b.capacity();
        b.clear();
        assert!(b.is_empty());
        assert_eq!(b.capacity(), cap);
    }
}
