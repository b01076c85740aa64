use crate::{
    traits::FieldValue,
    value::{ScalarKind, Value},
};
use chrono::NaiveDate;
use proptest::prelude::*;

#[test]
fn option_maps_none_to_null() {
    let none: Option<u32> = None;
    assert_eq!(none.to_value(), Value::Null);
    assert_eq!(Option::<u32>::from_value(&Value::Null), Some(None));
    assert_eq!(Option::<u32>::from_value(&Value::Uint(4)), Some(Some(4)));

    assert_eq!(<Option<String> as FieldValue>::KIND, ScalarKind::Text);
    assert!(<Option<String> as FieldValue>::NULLABLE);
    assert!(!<String as FieldValue>::NULLABLE);
}

#[test]
fn narrow_integers_reject_out_of_range() {
    assert_eq!(u8::from_value(&Value::Uint(300)), None);
    assert_eq!(i16::from_value(&Value::Int(-5)), Some(-5));
    assert_eq!(u32::from_value(&Value::Int(5)), None);
}

#[test]
fn wide_integers_saturate_into_64_bits() {
    assert_eq!(i128::MAX.to_value(), Value::Int(i64::MAX));
    assert_eq!(i128::MIN.to_value(), Value::Int(i64::MIN));
    assert_eq!(u128::MAX.to_value(), Value::Uint(u64::MAX));
    assert_eq!((-12_i128).to_value(), Value::Int(-12));

    assert_eq!(i128::from_value(&Value::Int(-12)), Some(-12));
    assert_eq!(u128::from_value(&Value::Int(1)), None);
    assert_eq!(<usize as FieldValue>::KIND, ScalarKind::Uint);
    assert_eq!(<isize as FieldValue>::KIND, ScalarKind::Int);
}

#[test]
fn char_is_single_character_text() {
    assert_eq!('x'.to_value(), Value::Text("x".to_string()));
    assert_eq!(char::from_value(&Value::Text("é".to_string())), Some('é'));
    assert_eq!(char::from_value(&Value::Text(String::new())), None);
    assert_eq!(char::from_value(&Value::Text("ab".to_string())), None);
}

#[test]
fn non_option_rejects_null() {
    assert_eq!(String::from_value(&Value::Null), None);
    assert_eq!(NaiveDate::from_value(&Value::Null), None);
}

proptest! {
    #[test]
    fn i64_round_trips(x in any::<i64>()) {
        prop_assert_eq!(i64::from_value(&x.to_value()), Some(x));
    }

    #[test]
    fn usize_round_trips(x in any::<u32>()) {
        let x = usize::try_from(x).unwrap();
        prop_assert_eq!(usize::from_value(&x.to_value()), Some(x));
    }

    #[test]
    fn isize_round_trips(x in any::<i32>()) {
        let x = isize::try_from(x).unwrap();
        prop_assert_eq!(isize::from_value(&x.to_value()), Some(x));
    }

    #[test]
    fn string_round_trips(s in ".*") {
        prop_assert_eq!(String::from_value(&s.to_value()), Some(s.clone()));
    }

    #[test]
    fn f32_round_trips(x in any::<f32>().prop_filter("finite", |x| x.is_finite())) {
        prop_assert_eq!(f32::from_value(&x.to_value()), Some(x));
    }
}
