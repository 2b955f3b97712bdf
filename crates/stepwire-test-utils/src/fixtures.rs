//! Canned wire messages.

use crate::{MessageFixture, RecordFixture};

/// Two-record quote response with a success header.
pub const QUOTES: &str = "1=100&2=Success&\n10=SH&20=000001&\n10=SZ&20=000002&\n";

/// Header only, no records.
pub const HEADER_ONLY: &str = "1=200&2=0&3=&\n";

/// Body with an unterminated record and an interior blank line.
pub const RAGGED: &str = "1=300&\n10=SH&20=000001\n\n10=SZ&\n";

/// Free-text values covering every reserved byte.
pub const RESERVED_TEXT: [&str; 5] = ["A=B&C", "back\\slash", "two\nlines", "&&==", "\\a\\b"];

/// Fields whose ids share a decimal prefix.
pub fn prefix_ids() -> RecordFixture {
    RecordFixture::new()
        .field(12, "twelve")
        .field(1, "one")
        .field(112, "one-twelve")
        .field(2, "two")
}

/// A record with `k` fields, ids `1..=k`, values `v<id>`.
pub fn numbered(k: i32) -> RecordFixture {
    (1..=k).fold(RecordFixture::new(), |rec, id| rec.field(id, format!("v{id}")))
}

/// The [`QUOTES`] message as a fixture.
pub fn quotes() -> MessageFixture {
    MessageFixture::new()
        .base(1, 100)
        .base(2, "Success")
        .record(RecordFixture::new().field(10, "SH").field(20, "000001"))
        .record(RecordFixture::new().field(10, "SZ").field(20, "000002"))
}
