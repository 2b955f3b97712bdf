//! Reserved bytes of the `id=value&id=value&...` line grammar.
//!
//! Raw occurrences of these bytes never appear inside an escaped value;
//! the escape codec replaces each with a two-byte sequence.

/// Separates `id=value` items within a line.
pub const FIELD_DELIM: u8 = b'&';

/// Separates a field id from its value.
pub const KV_SEP: u8 = b'=';

/// Terminates the header line and every body line.
pub const LINE_END: u8 = b'\n';

/// Prefix byte of every escape sequence.
pub const ESCAPE: u8 = b'\\';

/// All bytes that must be escaped inside a field value.
pub const RESERVED: [u8; 4] = [ESCAPE, KV_SEP, FIELD_DELIM, LINE_END];

/// Whether `b` is one of the grammar-reserved bytes.
#[inline]
pub fn is_reserved(b: u8) -> bool {
    RESERVED.contains(&b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reserved_set_is_exact() {
        for b in 0u8..=255 {
            let expected = matches!(b, b'\\' | b'=' | b'&' | b'\n');
            assert_eq!(is_reserved(b), expected, "byte {b:#04x}");
        }
    }
}
