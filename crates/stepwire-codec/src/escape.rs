//! Reserved-byte escaping.
//!
//! | raw byte | escaped |
//! |----------|---------|
//! | `\`      | `\\`    |
//! | `=`      | `\a`    |
//! | `&`      | `\b`    |
//! | newline  | `\n`    |
//!
//! Unescaping maps each known two-byte sequence back; a backslash followed
//! by any other byte (or by nothing) is passed through unchanged.

use std::borrow::Cow;
use std::fmt;

use memchr::memchr;
use stepwire_core::grammar::{is_reserved, ESCAPE};

/// Marker byte written after the backslash for a reserved byte.
#[inline]
fn marker_for(b: u8) -> Option<u8> {
    match b {
        b'\\' => Some(b'\\'),
        b'=' => Some(b'a'),
        b'&' => Some(b'b'),
        b'\n' => Some(b'n'),
        _ => None,
    }
}

/// Reserved byte denoted by a marker byte.
#[inline]
fn reserved_for(marker: u8) -> Option<u8> {
    match marker {
        b'\\' => Some(b'\\'),
        b'a' => Some(b'='),
        b'b' => Some(b'&'),
        b'n' => Some(b'\n'),
        _ => None,
    }
}

/// Append `src` to `out`, escaping every reserved byte.
pub fn escape_into(src: &[u8], out: &mut Vec<u8>) {
    let mut rest = src;
    while let Some(pos) = rest.iter().position(|&b| is_reserved(b)) {
        out.extend_from_slice(&rest[..pos]);
        if let Some(marker) = marker_for(rest[pos]) {
            out.push(ESCAPE);
            out.push(marker);
        }
        rest = &rest[pos + 1..];
    }
    out.extend_from_slice(rest);
}

/// Escape a string, borrowing it when it holds no reserved bytes.
pub fn escape(s: &str) -> Cow<'_, str> {
    if !s.bytes().any(is_reserved) {
        return Cow::Borrowed(s);
    }
    let mut out = Vec::with_capacity(s.len() + 8);
    escape_into(s.as_bytes(), &mut out);
    // Only ASCII bytes were replaced by ASCII pairs.
    Cow::Owned(String::from_utf8_lossy(&out).into_owned())
}

/// Reverse [`escape`] on raw bytes, borrowing when there is nothing to undo.
pub fn unescape(src: &[u8]) -> Cow<'_, [u8]> {
    let Some(first) = memchr(ESCAPE, src) else {
        return Cow::Borrowed(src);
    };

    let mut out = Vec::with_capacity(src.len());
    out.extend_from_slice(&src[..first]);
    let mut i = first;
    while i < src.len() {
        let b = src[i];
        if b == ESCAPE {
            if let Some(raw) = src.get(i + 1).copied().and_then(reserved_for) {
                out.push(raw);
                i += 2;
                continue;
            }
        }
        out.push(b);
        i += 1;
    }
    Cow::Owned(out)
}

/// Reverse [`escape`] on a string.
pub fn unescape_str(s: &str) -> Cow<'_, str> {
    match unescape(s.as_bytes()) {
        Cow::Borrowed(_) => Cow::Borrowed(s),
        Cow::Owned(bytes) => Cow::Owned(match String::from_utf8(bytes) {
            Ok(s) => s,
            Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
        }),
    }
}

/// A [`fmt::Write`] sink that escapes everything written through it.
///
/// Lets any `Display` value be formatted straight into a record buffer
/// without an intermediate `String`.
pub struct EscapeWriter<'a> {
    out: &'a mut Vec<u8>,
}

impl<'a> EscapeWriter<'a> {
    /// Wrap an output buffer. Bytes are appended; nothing is cleared.
    pub fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out }
    }
}

impl fmt::Write for EscapeWriter<'_> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        escape_into(s.as_bytes(), self.out);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt::Write;

    #[test]
    fn escapes_each_reserved_byte() {
        assert_eq!(escape("\\"), "\\\\");
        assert_eq!(escape("="), "\\a");
        assert_eq!(escape("&"), "\\b");
        assert_eq!(escape("\n"), "\\n");
    }

    #[test]
    fn plain_text_is_borrowed() {
        assert!(matches!(escape("000001"), Cow::Borrowed(_)));
        assert!(matches!(unescape(b"000001"), Cow::Borrowed(_)));
    }

    #[test]
    fn mixed_value() {
        assert_eq!(escape("A=B&C"), "A\\aB\\bC");
        assert_eq!(unescape_str("A\\aB\\bC"), "A=B&C");
    }

    #[test]
    fn unknown_marker_passes_through() {
        assert_eq!(unescape(b"a\\xb").as_ref(), b"a\\xb");
        assert_eq!(unescape(b"\\q\\a").as_ref(), b"\\q=");
    }

    #[test]
    fn trailing_backslash_passes_through() {
        assert_eq!(unescape(b"abc\\").as_ref(), b"abc\\");
        assert_eq!(unescape(b"\\").as_ref(), b"\\");
    }

    #[test]
    fn escaped_backslash_before_marker_letter() {
        // Raw `\a` (backslash, 'a') must not decode as '='.
        let escaped = escape("\\a");
        assert_eq!(escaped, "\\\\a");
        assert_eq!(unescape_str(&escaped), "\\a");
    }

    #[test]
    fn escape_writer_streams_display_values() {
        let mut buf = b"20=".to_vec();
        write!(EscapeWriter::new(&mut buf), "{}&{}", "x=1", 5).unwrap();
        assert_eq!(buf, b"20=x\\a1\\b5");
    }

    #[test]
    fn multibyte_text_survives() {
        let s = "成交=已报&撤单";
        assert_eq!(unescape_str(&escape(s)), s);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn unescape_inverts_escape(s in "[\\\\=&\nab x0-9]{0,64}") {
                let escaped = escape(&s);
                prop_assert_eq!(unescape_str(&escaped), s.as_str());
            }

            #[test]
            fn escaped_output_has_no_raw_delimiters(s in any::<String>()) {
                let escaped = escape(&s);
                prop_assert!(!escaped.contains('='));
                prop_assert!(!escaped.contains('&'));
                prop_assert!(!escaped.contains('\n'));
            }

            #[test]
            fn arbitrary_strings_round_trip(s in any::<String>()) {
                let escaped = escape(&s);
                prop_assert_eq!(unescape_str(&escaped), s.as_str());
            }
        }
    }
}
