use crate::value::{ScalarKind, Value, ValueError, canonical_cmp, strict_order_cmp};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use std::cmp::Ordering;

// ---- helpers -----------------------------------------------------------

fn v_txt(s: &str) -> Value {
    Value::Text(s.to_string())
}

fn v_date(y: i32, m: u32, d: u32) -> Value {
    Value::Date(NaiveDate::from_ymd_opt(y, m, d).expect("valid date"))
}

// ---- unset sentinels ---------------------------------------------------

#[test]
fn blank_text_and_null_are_unset() {
    assert!(Value::Null.is_unset());
    assert!(v_txt("").is_unset());
    assert!(v_txt("   \t").is_unset());
    assert!(!v_txt(" a ").is_unset());
}

#[test]
fn date_extremes_are_unset_on_both_ends() {
    assert!(Value::Date(NaiveDate::MIN).is_unset());
    assert!(Value::Date(NaiveDate::MAX).is_unset());
    assert!(!v_date(2024, 2, 29).is_unset());

    assert!(Value::DateTime(NaiveDateTime::MIN).is_unset());
    assert!(Value::DateTime(NaiveDateTime::MAX).is_unset());

    assert!(Value::Timestamp(DateTime::<Utc>::MIN_UTC).is_unset());
    assert!(Value::Timestamp(DateTime::<Utc>::MAX_UTC).is_unset());
    let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
    assert!(!Value::Timestamp(now).is_unset());
}

#[test]
fn zero_numbers_and_false_are_meaningful() {
    assert!(!Value::Int(0).is_unset());
    assert!(!Value::Uint(0).is_unset());
    assert!(!Value::Float(0.0).is_unset());
    assert!(!Value::Bool(false).is_unset());
}

// ---- comparison --------------------------------------------------------

#[test]
fn strict_order_mixes_signed_and_unsigned() {
    assert_eq!(
        strict_order_cmp(&Value::Int(-1), &Value::Uint(0)),
        Some(Ordering::Less)
    );
    assert_eq!(
        strict_order_cmp(&Value::Uint(u64::MAX), &Value::Int(i64::MAX)),
        Some(Ordering::Greater)
    );
}

#[test]
fn strict_order_rejects_mismatched_and_null() {
    assert_eq!(strict_order_cmp(&Value::Int(1), &v_txt("1")), None);
    assert_eq!(strict_order_cmp(&Value::Null, &Value::Null), None);
    assert_eq!(
        strict_order_cmp(&Value::Float(f64::NAN), &Value::Float(1.0)),
        None
    );
}

#[test]
fn canonical_order_puts_null_first_and_is_total() {
    let mut values = vec![
        v_txt("b"),
        Value::Int(3),
        Value::Null,
        Value::Float(1.5),
        v_txt("a"),
        Value::Uint(2),
    ];
    values.sort_by(canonical_cmp);

    assert_eq!(
        values,
        vec![
            Value::Null,
            Value::Float(1.5),
            Value::Uint(2),
            Value::Int(3),
            v_txt("a"),
            v_txt("b"),
        ]
    );
}

#[test]
fn canonical_order_on_dates() {
    assert_eq!(
        canonical_cmp(&v_date(2020, 1, 1), &v_date(2019, 12, 31)),
        Ordering::Greater
    );
}

// ---- kinds -------------------------------------------------------------

#[test]
fn integer_kinds_are_mutually_comparable() {
    assert!(ScalarKind::Int.comparable_with(ScalarKind::Uint));
    assert!(ScalarKind::Text.comparable_with(ScalarKind::Text));
    assert!(!ScalarKind::Float.comparable_with(ScalarKind::Int));
    assert!(!ScalarKind::Bool.supports_ordering());
}

#[test]
fn text_contains_is_case_sensitive() {
    assert_eq!(v_txt("Oslo").text_contains(&v_txt("sl")), Some(true));
    assert_eq!(v_txt("Oslo").text_contains(&v_txt("OS")), Some(false));
    assert_eq!(Value::Int(1).text_contains(&v_txt("1")), None);
}

#[test]
fn mismatch_error_names_found_kind() {
    let err = ValueError::mismatch("age", ScalarKind::Uint, &v_txt("x"));
    assert_eq!(err.to_string(), "field 'age' expects a uint value, found text");

    let err = ValueError::mismatch("age", ScalarKind::Uint, &Value::Null);
    assert_eq!(err.to_string(), "field 'age' expects a uint value, found null");
}
