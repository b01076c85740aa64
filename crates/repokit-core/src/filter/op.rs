use crate::value::{ScalarKind, Value, strict_order_cmp};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

///
/// CompareOp
///
/// Comparison a filter field applies against its target field.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum CompareOp {
    #[default]
    #[display("equal")]
    Equal,
    #[display("contains")]
    Contains,
    #[display("greater_than")]
    GreaterThan,
    #[display("less_than")]
    LessThan,
    #[display("greater_than_or_equal")]
    GreaterThanOrEqual,
    #[display("less_than_or_equal")]
    LessThanOrEqual,
}

impl CompareOp {
    /// Whether this operator is defined between a field of kind `field` and
    /// a filter value of kind `value`.
    #[must_use]
    pub const fn supports(self, field: ScalarKind, value: ScalarKind) -> bool {
        match self {
            Self::Contains => matches!((field, value), (ScalarKind::Text, ScalarKind::Text)),
            Self::Equal => field.comparable_with(value),
            Self::GreaterThan
            | Self::LessThan
            | Self::GreaterThanOrEqual
            | Self::LessThanOrEqual => field.supports_ordering() && field.comparable_with(value),
        }
    }

    /// Apply the operator with `actual` on the left.
    /// Incomparable pairs (including a null field) never match.
    #[must_use]
    pub fn eval(self, actual: &Value, expected: &Value) -> bool {
        let ordered = |test: fn(Ordering) -> bool| strict_order_cmp(actual, expected).is_some_and(test);

        match self {
            Self::Contains => actual.text_contains(expected).unwrap_or(false),
            Self::Equal => ordered(Ordering::is_eq),
            Self::GreaterThan => ordered(Ordering::is_gt),
            Self::LessThan => ordered(Ordering::is_lt),
            Self::GreaterThanOrEqual => ordered(Ordering::is_ge),
            Self::LessThanOrEqual => ordered(Ordering::is_le),
        }
    }
}

///
/// MergeOp
///
/// How the next sub-predicate joins the predicate accumulated so far.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
pub enum MergeOp {
    #[default]
    #[display("and")]
    And,
    #[display("or")]
    Or,
}
