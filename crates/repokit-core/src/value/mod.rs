mod compare;

#[cfg(test)]
mod tests;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

// re-exports
pub use compare::{canonical_cmp, strict_order_cmp};

///
/// ScalarKind
///
/// Declared static kind of a cacheable field.
/// There is exactly one kind per non-null `Value` variant.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum ScalarKind {
    #[display("bool")]
    Bool,
    #[display("date")]
    Date,
    #[display("datetime")]
    DateTime,
    #[display("float")]
    Float,
    #[display("int")]
    Int,
    #[display("text")]
    Text,
    #[display("timestamp")]
    Timestamp,
    #[display("uint")]
    Uint,
}

impl ScalarKind {
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(self, Self::Int | Self::Uint)
    }

    #[must_use]
    pub const fn supports_ordering(self) -> bool {
        !matches!(self, Self::Bool)
    }

    /// Whether values of `self` and `other` can be compared with each other.
    /// Signed and unsigned integers compare numerically; every other kind
    /// only compares with itself.
    #[must_use]
    pub const fn comparable_with(self, other: Self) -> bool {
        self as u8 == other as u8 || (self.is_integer() && other.is_integer())
    }
}

///
/// Value
///
/// Runtime scalar carried through getters, setters, and predicates.
///
/// Null → the field's value is `Option::None`.
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum Value {
    Bool(bool),
    Date(NaiveDate),
    DateTime(NaiveDateTime),
    Float(f64),
    Int(i64),
    Null,
    Text(String),
    Timestamp(DateTime<Utc>),
    Uint(u64),
}

impl Value {
    #[must_use]
    pub const fn kind(&self) -> Option<ScalarKind> {
        match self {
            Self::Bool(_) => Some(ScalarKind::Bool),
            Self::Date(_) => Some(ScalarKind::Date),
            Self::DateTime(_) => Some(ScalarKind::DateTime),
            Self::Float(_) => Some(ScalarKind::Float),
            Self::Int(_) => Some(ScalarKind::Int),
            Self::Null => None,
            Self::Text(_) => Some(ScalarKind::Text),
            Self::Timestamp(_) => Some(ScalarKind::Timestamp),
            Self::Uint(_) => Some(ScalarKind::Uint),
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Short label used in error messages.
    #[must_use]
    pub fn label(&self) -> String {
        self.kind()
            .map_or_else(|| "null".to_string(), |kind| kind.to_string())
    }

    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Whether this value is a "not meaningfully set" sentinel.
    ///
    /// Null, blank text, and the minimum/maximum representable date, date-time
    /// and timestamp all count as unset.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Date(date) => *date == NaiveDate::MIN || *date == NaiveDate::MAX,
            Self::DateTime(dt) => *dt == NaiveDateTime::MIN || *dt == NaiveDateTime::MAX,
            Self::Timestamp(ts) => *ts == DateTime::<Utc>::MIN_UTC || *ts == DateTime::<Utc>::MAX_UTC,
            Self::Bool(_) | Self::Float(_) | Self::Int(_) | Self::Uint(_) => false,
        }
    }

    /// Case-sensitive substring test.
    /// Returns `None` when either side is not text.
    #[must_use]
    pub fn text_contains(&self, needle: &Self) -> Option<bool> {
        match (self, needle) {
            (Self::Text(haystack), Self::Text(needle)) => Some(haystack.contains(needle.as_str())),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

///
/// ValueError
///
/// Raised by setters when the incoming value does not convert into the
/// field's declared type.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ValueError {
    #[error("field '{field}' expects a {expected} value, found {found}")]
    TypeMismatch {
        field: &'static str,
        expected: ScalarKind,
        found: String,
    },
}

impl ValueError {
    #[must_use]
    pub fn mismatch(field: &'static str, expected: ScalarKind, found: &Value) -> Self {
        Self::TypeMismatch {
            field,
            expected,
            found: found.label(),
        }
    }
}
