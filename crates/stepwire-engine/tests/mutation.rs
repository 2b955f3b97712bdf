//! Integration test: rebuilding records with `set_field_value`.

use stepwire_arena::ArenaConfig;
use stepwire_engine::{PackageConfig, PackageError, StepPackage};
use stepwire_test_utils::fixtures::QUOTES;
use stepwire_test_utils::{package, RecordFixture};

#[test]
fn replace_keeps_siblings_byte_identical() {
    let mut pkg = package();
    pkg.set_package(QUOTES).unwrap();
    let sibling = pkg.record(1).unwrap().to_vec();

    pkg.set_field_value(20, "999999").unwrap();
    assert_eq!(pkg.record(0), Some(&b"10=SH&20=999999&"[..]));
    assert_eq!(pkg.record(1), Some(sibling.as_slice()));

    pkg.set_field_value(10, "").unwrap();
    assert_eq!(pkg.record(0), Some(&b"10=&20=999999&"[..]));
}

#[test]
fn missing_field_is_appended_before_terminator() {
    let mut pkg = package();
    pkg.set_package(QUOTES).unwrap();
    pkg.goto_next();
    pkg.set_field_value(30, 12).unwrap();
    assert_eq!(pkg.record(1), Some(&b"10=SZ&20=000002&30=12&"[..]));
    assert_eq!(pkg.field_i64(30), Some(12));
}

#[test]
fn values_are_escaped() {
    let mut pkg = package();
    pkg.set_package(QUOTES).unwrap();
    pkg.set_field_value(10, "a\nb").unwrap();
    assert_eq!(pkg.record(0), Some(&b"10=a\\nb&20=000001&"[..]));
    assert_eq!(pkg.get_step_value_by_id(10).as_deref(), Some("a\nb"));
}

#[test]
fn oversize_rebuild_is_truncated_to_block_limit() {
    let mut pkg = StepPackage::new(PackageConfig::uniform(64)).unwrap();
    RecordFixture::new().field(10, "SH").append_to(&mut pkg).unwrap();

    pkg.set_field_value(20, "x".repeat(100)).unwrap();
    let record = pkg.record(0).unwrap();
    assert_eq!(record.len(), 63);
    assert!(record.starts_with(b"10=SH&20=xxx"));
    assert_eq!(pkg.find_item(20).map(<[u8]>::len), Some(63 - 9));
}

#[test]
fn rebuild_within_limit_is_not_truncated() {
    let mut pkg = StepPackage::new(PackageConfig::uniform(64)).unwrap();
    RecordFixture::new().field(10, "SH").append_to(&mut pkg).unwrap();
    // 9 + 53 + 1 == 63, exactly the limit.
    pkg.set_field_value(20, "y".repeat(53)).unwrap();
    assert_eq!(pkg.record(0).map(<[u8]>::len), Some(63));
    assert_eq!(pkg.record(0).and_then(|r| r.last()), Some(&b'&'));
}

#[test]
fn no_record_is_a_distinct_failure() {
    let mut pkg = package();
    pkg.set_package("1=0&\n").unwrap();
    assert_eq!(pkg.set_field_value(10, "x"), Err(PackageError::NoCurrentRecord));
}

#[test]
fn arena_exhaustion_leaves_record_unchanged() {
    let arena = ArenaConfig::uniform(32).with_max_blocks(1);
    let mut pkg = StepPackage::new(PackageConfig::new(arena)).unwrap();
    // 22 of 32 bytes used; the 22-byte rebuild cannot fit.
    RecordFixture::new().field(10, "SHANGHAI").field(20, "000001").append_to(&mut pkg).unwrap();
    let before = pkg.record(0).unwrap().to_vec();

    let err = pkg.set_field_value(20, "000002").unwrap_err();
    assert!(matches!(err, PackageError::Arena(_)));
    assert_eq!(pkg.record(0), Some(before.as_slice()));
}

#[test]
fn old_spans_stay_until_reset() {
    let mut pkg = package();
    pkg.set_package(QUOTES).unwrap();
    let before = pkg.arena_stats().used_bytes;
    pkg.set_field_value(20, "000009").unwrap();
    let after = pkg.arena_stats().used_bytes;
    assert_eq!(after, before + "10=SH&20=000009&".len());
    pkg.init();
    assert_eq!(pkg.arena_stats().used_bytes, 0);
}

#[test]
fn default_config_truncation_limit_is_fixed_at_commit() {
    let mut pkg = package();
    pkg.set_package("1=0&\n10=a&\n").unwrap();

    pkg.set_field_value(10, "x".repeat(5000)).unwrap();
    let first = pkg.record(0).unwrap().to_vec();
    assert_eq!(first.len(), 4095);

    // The rebuild may escalate the owning block; the record's limit stays.
    pkg.set_field_value(10, "x".repeat(5000)).unwrap();
    let second = pkg.record(0).unwrap().to_vec();
    assert_eq!(second.len(), 4095);
    assert_eq!(first, second);
}

#[test]
fn truncation_keeps_records_valid_utf8() {
    let mut pkg = StepPackage::new(PackageConfig::uniform(64)).unwrap();
    RecordFixture::new().field(10, "S").append_to(&mut pkg).unwrap();

    // 8 header bytes + 2-byte chars: byte 63 falls inside a character.
    pkg.set_field_value(20, "é".repeat(40)).unwrap();
    assert_eq!(pkg.record(0).map(<[u8]>::len), Some(62));
    assert_eq!(pkg.get_step_value_by_id(20), Some("é".repeat(27)));
    assert_eq!(pkg.to_string().as_bytes(), pkg.to_wire().as_slice());
}
