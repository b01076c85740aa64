#[cfg(test)]
mod tests;

use crate::value::{ScalarKind, Value};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

///
/// FieldValue
///
/// Conversion boundary between a Rust field type and `Value`.
///
/// Only primitive-like scalars implement this; a field whose type does not
/// is never eligible for the metadata cache.
///

pub trait FieldValue: Sized {
    const KIND: ScalarKind;

    /// True for `Option<T>`, where `Value::Null` stands for `None`.
    const NULLABLE: bool = false;

    fn to_value(&self) -> Value;

    #[must_use]
    fn from_value(value: &Value) -> Option<Self>;
}

impl FieldValue for String {
    const KIND: ScalarKind = ScalarKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Text(v) => Some(v.clone()),
            _ => None,
        }
    }
}

impl FieldValue for f32 {
    const KIND: ScalarKind = ScalarKind::Float;

    fn to_value(&self) -> Value {
        Value::Float(f64::from(*self))
    }

    #[allow(clippy::cast_possible_truncation)]
    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Float(v) => Some(*v as Self),
            _ => None,
        }
    }
}

impl<T: FieldValue> FieldValue for Option<T> {
    const KIND: ScalarKind = T::KIND;
    const NULLABLE: bool = true;

    fn to_value(&self) -> Value {
        match self {
            Some(v) => v.to_value(),
            None => Value::Null,
        }
    }

    fn from_value(value: &Value) -> Option<Self> {
        if matches!(value, Value::Null) {
            return Some(None);
        }

        T::from_value(value).map(Some)
    }
}

impl FieldValue for char {
    const KIND: ScalarKind = ScalarKind::Text;

    fn to_value(&self) -> Value {
        Value::Text(self.to_string())
    }

    // exactly one char; anything longer or empty does not fit
    fn from_value(value: &Value) -> Option<Self> {
        let Value::Text(v) = value else {
            return None;
        };
        let mut chars = v.chars();

        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    }
}

// scalar_field_value
// Widening conversions into the `Value` variant, narrowing back out with
// `try_into` so out-of-range values are rejected.
macro_rules! scalar_field_value {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl FieldValue for $type {
                const KIND: ScalarKind = ScalarKind::$variant;

                fn to_value(&self) -> Value {
                    Value::$variant((*self).into())
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$variant(v) => (*v).try_into().ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

// clamped_field_value
// Integers wider than (or platform-sized relative to) the 64-bit variants.
// Values outside the 64-bit range saturate on the way in.
macro_rules! clamped_field_value {
    ( signed: $( $type:ty ),* ) => {
        $(
            impl FieldValue for $type {
                const KIND: ScalarKind = ScalarKind::Int;

                fn to_value(&self) -> Value {
                    Value::Int(i64::try_from(*self).unwrap_or(if self.is_negative() {
                        i64::MIN
                    } else {
                        i64::MAX
                    }))
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Int(v) => Self::try_from(*v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
    ( unsigned: $( $type:ty ),* ) => {
        $(
            impl FieldValue for $type {
                const KIND: ScalarKind = ScalarKind::Uint;

                fn to_value(&self) -> Value {
                    Value::Uint(u64::try_from(*self).unwrap_or(u64::MAX))
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::Uint(v) => Self::try_from(*v).ok(),
                        _ => None,
                    }
                }
            }
        )*
    };
}

scalar_field_value!(
    i8 => Int,
    i16 => Int,
    i32 => Int,
    i64 => Int,
    u8 => Uint,
    u16 => Uint,
    u32 => Uint,
    u64 => Uint,
    bool => Bool,
    f64 => Float,
    NaiveDate => Date,
    NaiveDateTime => DateTime,
    DateTime<Utc> => Timestamp,
);

clamped_field_value!(signed: isize, i128);
clamped_field_value!(unsigned: usize, u128);
