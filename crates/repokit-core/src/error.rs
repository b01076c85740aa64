use crate::{
    filter::CompareOp,
    value::{ScalarKind, ValueError},
};
use thiserror::Error as ThisError;

///
/// RepoError
///
/// Every failure raised by the cache, the filter compiler, and the pager.
/// Errors are raised where they are detected and never retried internally.
///

#[derive(Debug, ThisError)]
pub enum RepoError {
    #[error("{}", not_found_message(.record, .field))]
    NotFound {
        record: String,
        field: Option<String>,
    },

    #[error("field '{field}' on record '{record}' is missing annotation '{annotation}'")]
    MissingAnnotation {
        record: String,
        field: String,
        annotation: &'static str,
    },

    #[error("filter field '{field}' has no annotations on record '{record}'")]
    UnmappedFilterField { record: String, field: String },

    #[error("comparison '{op}' is not supported between {kind} field '{field}' and a {value} value")]
    UnsupportedComparison {
        field: String,
        op: CompareOp,
        kind: ScalarKind,
        value: ScalarKind,
    },

    #[error("invalid page size {size}")]
    InvalidPageSize { size: i64 },

    #[error("invalid page index {index}")]
    InvalidPageIndex { index: i64 },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// `committed` is true when the guarded section ran to completion
    /// before the cancellation was acknowledged.
    #[error("operation cancelled (committed: {committed})")]
    Cancelled { committed: bool },

    #[error(transparent)]
    Value(#[from] ValueError),
}

impl RepoError {
    pub(crate) fn record_not_found(record: impl Into<String>) -> Self {
        Self::NotFound {
            record: record.into(),
            field: None,
        }
    }

    pub(crate) fn field_not_found(record: impl Into<String>, field: impl Into<String>) -> Self {
        Self::NotFound {
            record: record.into(),
            field: Some(field.into()),
        }
    }

    /// Coarse classification used by callers to decide who has to act.
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound { .. }
            | Self::MissingAnnotation { .. }
            | Self::UnmappedFilterField { .. }
            | Self::UnsupportedComparison { .. } => ErrorClass::Configuration,
            Self::InvalidPageSize { .. }
            | Self::InvalidPageIndex { .. }
            | Self::InvalidArgument(_)
            | Self::Value(_) => ErrorClass::Input,
            Self::Cancelled { .. } => ErrorClass::Cancelled,
        }
    }
}

///
/// ErrorClass
///
/// Configuration errors are bugs in record declarations; input errors are
/// caller mistakes to surface upstream.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Configuration,
    Input,
    Cancelled,
}

#[allow(clippy::ref_option)]
fn not_found_message(record: &str, field: &Option<String>) -> String {
    match field {
        Some(field) => format!("field '{field}' not found on record '{record}'"),
        None => format!("record '{record}' not found in metadata cache"),
    }
}
