//! The opaque field identifier and its wire key form.

use smallvec::SmallVec;
use std::fmt;
use std::io::Write;

use crate::grammar::{FIELD_DELIM, KV_SEP};

/// Identifies a field within a header or body record.
///
/// The meaning of each id (function code, error message, return count, ...)
/// belongs to an external schema; the codec only compares and formats them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FieldId(pub i32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for FieldId {
    fn from(v: i32) -> Self {
        Self(v)
    }
}

/// Stack buffer holding a formatted lookup key such as `12=` or `&12=`.
///
/// An `i32` id with sign, both delimiters, and all digits is at most 13
/// bytes, so keys never spill to the heap.
pub type FieldKey = SmallVec<[u8; 16]>;

impl FieldId {
    /// The key that matches this field at the start of a record: `<id>=`.
    pub fn head_key(self) -> FieldKey {
        let mut key = FieldKey::new();
        // Writing into a SmallVec cannot fail.
        let _ = write!(key, "{}", self.0);
        key.push(KV_SEP);
        key
    }

    /// The key that matches this field after a delimiter: `&<id>=`.
    ///
    /// Requiring the leading delimiter keeps id `1` from matching inside `12=`
    /// or inside another field's value.
    pub fn inner_key(self) -> FieldKey {
        let mut key = FieldKey::new();
        key.push(FIELD_DELIM);
        let _ = write!(key, "{}", self.0);
        key.push(KV_SEP);
        key
    }
}
