use crate::filter::{CompareOp, MergeOp};
use derive_more::Deref;
use std::collections::BTreeMap;

/// Annotation key for the comparison operator.
pub const COMPARE: &str = "compare";

/// Annotation key for the merge operator.
pub const MERGE: &str = "merge";

/// Annotation key for the target-name override.
pub const TARGET: &str = "target";

///
/// AnnotationValue
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AnnotationValue {
    Compare(CompareOp),
    Merge(MergeOp),
    Text(&'static str),
}

///
/// Annotation
///
/// One named declarative value attached to a field at its definition site.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Annotation {
    pub name: &'static str,
    pub value: AnnotationValue,
}

impl Annotation {
    #[must_use]
    pub const fn new(name: &'static str, value: AnnotationValue) -> Self {
        Self { name, value }
    }

    #[must_use]
    pub const fn compare(op: CompareOp) -> Self {
        Self::new(COMPARE, AnnotationValue::Compare(op))
    }

    #[must_use]
    pub const fn merge(op: MergeOp) -> Self {
        Self::new(MERGE, AnnotationValue::Merge(op))
    }

    #[must_use]
    pub const fn target(field: &'static str) -> Self {
        Self::new(TARGET, AnnotationValue::Text(field))
    }
}

///
/// Annotations
///
/// Captured annotation map for one field, keyed by annotation name.
/// When a name is declared twice the later declaration wins.
///

#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct Annotations(BTreeMap<&'static str, AnnotationValue>);

impl Annotations {
    #[must_use]
    pub fn capture(declared: &[Annotation]) -> Self {
        Self(
            declared
                .iter()
                .map(|annotation| (annotation.name, annotation.value))
                .collect(),
        )
    }
}
