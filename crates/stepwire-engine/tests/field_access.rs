//! Integration test: field lookup inside records of various widths.

use stepwire_test_utils::fixtures::{numbered, prefix_ids, RESERVED_TEXT};
use stepwire_test_utils::{package, RecordFixture};

fn check_width(k: i32) {
    let mut pkg = package();
    numbered(k).append_to(&mut pkg).unwrap();
    pkg.goto_first();

    let first = 1;
    let middle = (k + 1) / 2;
    let last = k;
    for id in [first, middle, last] {
        let expected = format!("v{id}");
        assert_eq!(pkg.get_step_value_by_id(id).as_deref(), Some(expected.as_str()), "k={k} id={id}");
        assert_eq!(pkg.find_item(id), Some(expected.as_bytes()), "k={k} id={id}");
    }
    assert_eq!(pkg.find_item(k + 1), None);
    assert_eq!(pkg.find_item(0), None);
}

#[test]
fn single_field_record() {
    check_width(1);
}

#[test]
fn two_field_record() {
    check_width(2);
}

#[test]
fn ten_field_record() {
    check_width(10);
}

#[test]
fn numeric_prefixes_do_not_collide() {
    let mut pkg = package();
    prefix_ids().append_to(&mut pkg).unwrap();
    assert_eq!(pkg.get_step_value_by_id(1).as_deref(), Some("one"));
    assert_eq!(pkg.get_step_value_by_id(12).as_deref(), Some("twelve"));
    assert_eq!(pkg.get_step_value_by_id(112).as_deref(), Some("one-twelve"));
    assert_eq!(pkg.get_step_value_by_id(2).as_deref(), Some("two"));
    assert_eq!(pkg.find_item(11), None);
}

#[test]
fn ids_inside_values_are_not_keys() {
    let mut pkg = package();
    RecordFixture::new().text(10, "7=x").field(20, "y").append_to(&mut pkg).unwrap();
    assert_eq!(pkg.find_item(7), None);
    assert_eq!(pkg.get_step_value_by_id(10).as_deref(), Some("7=x"));
}

#[test]
fn unterminated_last_value_runs_to_record_end() {
    let mut pkg = package();
    pkg.set_package("1=0&\n10=SH&20=000001\n").unwrap();
    assert_eq!(pkg.find_item(20), Some(&b"000001"[..]));
    // Stored records always end in the delimiter.
    assert_eq!(pkg.record(0).and_then(|r| r.last()), Some(&b'&'));
}

#[test]
fn empty_value_is_present() {
    let mut pkg = package();
    pkg.set_package("1=0&\n10=&20=x&\n").unwrap();
    assert_eq!(pkg.find_item(10), Some(&b""[..]));
    assert_eq!(pkg.get_step_value_by_id(10).as_deref(), Some(""));
}

#[test]
fn reserved_text_never_reaches_the_arena_raw() {
    let mut pkg = package();
    for (i, text) in RESERVED_TEXT.iter().enumerate() {
        pkg.append_record().unwrap();
        pkg.add_field_value(10, i, false);
        pkg.add_field_value(20, text, true);
        pkg.add_field_value(30, "tail", false);
    }
    pkg.end_append_record().unwrap();

    pkg.goto_first();
    for text in RESERVED_TEXT {
        let raw = pkg.find_item(20).unwrap();
        assert!(!raw.iter().any(|b| matches!(b, b'&' | b'=' | b'\n')));
        assert_eq!(pkg.get_step_value_by_id(20).as_deref(), Some(text));
        assert_eq!(pkg.get_step_value_by_id(30).as_deref(), Some("tail"));
        pkg.goto_next();
    }
}

#[test]
fn pending_record_lookup() {
    let mut pkg = package();
    pkg.append_record().unwrap();
    pkg.add_field_value(10, "SH", false);
    assert_eq!(pkg.find_pending_item(10), Some(&b"SH"[..]));
    pkg.end_append_record().unwrap();
    assert_eq!(pkg.find_pending_item(10), None);
    assert_eq!(pkg.find_item(10), Some(&b"SH"[..]));
}

#[test]
fn verbatim_value_with_reserved_bytes_cannot_create_a_field() {
    let mut pkg = package();
    pkg.append_record().unwrap();
    pkg.add_field_value(10, "a&20=injected", false);
    pkg.end_append_record().unwrap();

    assert_eq!(pkg.find_item(20), None);
    assert_eq!(pkg.get_step_value_by_id(10).as_deref(), Some("a&20=injected"));
    let raw = pkg.find_item(10).unwrap();
    assert!(!raw.iter().any(|b| matches!(b, b'&' | b'=' | b'\n')));
}
