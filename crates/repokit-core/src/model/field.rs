use crate::{
    model::Annotation,
    value::{ScalarKind, Value, ValueError},
};

/// Typed getter stored in a descriptor table.
pub type GetFn<R> = fn(&R) -> Value;

/// Typed setter stored in a descriptor table.
pub type SetFn<R> = fn(&mut R, Value) -> Result<(), ValueError>;

///
/// FieldKind
///
/// Structural shape of a declared field.
/// Only scalar fields can be cached.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldKind {
    Scalar { kind: ScalarKind, nullable: bool },

    /// Collections, nested records, and anything else without a scalar
    /// `Value` representation.
    Composite,
}

impl FieldKind {
    #[must_use]
    pub const fn scalar(self) -> Option<ScalarKind> {
        match self {
            Self::Scalar { kind, .. } => Some(kind),
            Self::Composite => None,
        }
    }

    #[must_use]
    pub const fn is_scalar(self) -> bool {
        matches!(self, Self::Scalar { .. })
    }
}

///
/// FieldModel
///
/// One row of a record's descriptor table.
///

pub struct FieldModel<R> {
    /// Field name as used by filters and sort requests.
    pub name: &'static str,
    pub kind: FieldKind,
    /// False when the field opted out of caching.
    pub cacheable: bool,
    pub annotations: &'static [Annotation],
    pub get: Option<GetFn<R>>,
    pub set: Option<SetFn<R>>,
}

impl<R> FieldModel<R> {
    /// Scalar, not opted out, and carrying both accessors.
    #[must_use]
    pub const fn is_eligible(&self) -> bool {
        self.cacheable && self.kind.is_scalar() && self.get.is_some() && self.set.is_some()
    }
}
