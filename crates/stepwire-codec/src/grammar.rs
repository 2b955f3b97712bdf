//! Header and body line grammar.
//!
//! ```text
//! <id>=<escaped-value>&[<id>=<escaped-value>&...]\n     header
//! <id>=<escaped-value>&...&\n                         body record, 0..N
//! ```
//!
//! Header values live unescaped in a [`HeaderMap`] and are escaped on the
//! way out. Body records stay in their escaped wire form; the functions
//! here locate and rewrite fields inside those raw bytes.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt::{self, Write as _};
use std::ops::Range;

use memchr::{memchr, memmem};
use stepwire_core::grammar::{FIELD_DELIM, KV_SEP, LINE_END};
use stepwire_core::FieldId;

use crate::escape::{escape, unescape_str, EscapeWriter};

/// Header fields, iterated in ascending id order.
pub type HeaderMap = BTreeMap<FieldId, String>;

/// Split a message into lines.
///
/// The terminator of the last line does not start another line, so
/// `"a\nb\n"` yields two lines. Interior blank lines are yielded as `""`.
pub fn split_lines(src: &str) -> impl Iterator<Item = &str> {
    src.split_terminator(LINE_END as char)
}

/// Parse a header line into `map`, returning the number of fields read.
///
/// Tokens are split on `&`, then on the first `=`. Empty tokens are
/// skipped. A token with no `=` or a non-numeric id ends parsing; the
/// fields before it are kept. The first occurrence of a repeated id wins.
/// Ids may carry surrounding whitespace or a leading `+`; they are
/// written back in canonical form by [`format_header`].
pub fn parse_header(line: &str, map: &mut HeaderMap) -> usize {
    let mut parsed = 0;
    for token in line.split(FIELD_DELIM as char) {
        if token.is_empty() {
            continue;
        }
        let Some(eq) = token.find(KV_SEP as char) else {
            tracing::debug!(token, parsed, "header token without '=', stopping");
            break;
        };
        let Ok(id) = token[..eq].trim().parse::<i32>() else {
            tracing::debug!(token, parsed, "non-numeric header id, stopping");
            break;
        };
        let value = unescape_str(&token[eq + 1..]).into_owned();
        map.entry(FieldId(id)).or_insert(value);
        parsed += 1;
    }
    parsed
}

/// Append the formatted header line, including its `\n`, to `out`.
pub fn format_header(map: &HeaderMap, out: &mut String) {
    for (id, value) in map {
        // Writing to a String cannot fail.
        let _ = write!(out, "{id}=");
        out.push_str(&escape(value));
        out.push(FIELD_DELIM as char);
    }
    out.push(LINE_END as char);
}

/// Ensure a body line ends with the field delimiter.
///
/// Empty input stays empty: a blank line is an empty record.
pub fn normalize_body_line(line: &[u8]) -> Cow<'_, [u8]> {
    match line.last() {
        None | Some(&FIELD_DELIM) => Cow::Borrowed(line),
        Some(_) => {
            let mut owned = Vec::with_capacity(line.len() + 1);
            owned.extend_from_slice(line);
            owned.push(FIELD_DELIM);
            Cow::Owned(owned)
        }
    }
}

/// Byte range of `id`'s value inside a raw record.
///
/// Matches `<id>=` at offset 0, otherwise the first `&<id>=`. The value
/// ends at the next `&`, or at the end of the record if none follows.
pub fn locate_value(record: &[u8], id: FieldId) -> Option<Range<usize>> {
    let head = id.head_key();
    let start = if record.starts_with(&head) {
        head.len()
    } else {
        let inner = id.inner_key();
        memmem::find(record, &inner)? + inner.len()
    };
    let end = memchr(FIELD_DELIM, &record[start..]).map_or(record.len(), |n| start + n);
    Some(start..end)
}

/// Borrow the raw (still escaped) value of `id` inside a record.
///
/// A present field with an empty value yields `Some(&[])`.
pub fn find_value(record: &[u8], id: FieldId) -> Option<&[u8]> {
    locate_value(record, id).map(|range| &record[range])
}

/// Write `record` into `out` with `id` set to `value`, escaped.
///
/// An existing value is replaced and every other byte is copied as is.
/// A missing field is appended as `id=value&` after the last delimiter.
/// The result always ends with `&`. `out` is cleared first.
pub fn rebuild_with_value(record: &[u8], id: FieldId, value: &dyn fmt::Display, out: &mut Vec<u8>) {
    out.clear();
    match locate_value(record, id) {
        Some(range) => {
            out.extend_from_slice(&record[..range.start]);
            let _ = write!(EscapeWriter::new(out), "{value}");
            out.extend_from_slice(&record[range.end..]);
        }
        None => {
            out.extend_from_slice(record);
            if !record.is_empty() && record.last() != Some(&FIELD_DELIM) {
                out.push(FIELD_DELIM);
            }
            out.extend_from_slice(&id.head_key());
            let _ = write!(EscapeWriter::new(out), "{value}");
        }
    }
    if out.last() != Some(&FIELD_DELIM) {
        out.push(FIELD_DELIM);
    }
}
