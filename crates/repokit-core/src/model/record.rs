use crate::model::{Annotation, FieldModel};

///
/// Record
///
/// A named structured type with a fixed descriptor table.
/// Implemented by `#[derive(Record)]` or by hand.
///

pub trait Record: Sized + 'static {
    const MODEL: &'static RecordModel<Self>;
}

///
/// RecordModel
///

pub struct RecordModel<R: 'static> {
    /// Short type name.
    pub name: &'static str,
    /// Module-qualified type path; the metadata cache key.
    pub path: &'static str,
    /// False when the whole type opted out of caching.
    pub cacheable: bool,
    pub fields: &'static [FieldModel<R>],
    pub bindings: &'static [FilterBinding],
}

impl<R: 'static> RecordModel<R> {
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldModel<R>> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Eligible fields in declaration order.
    pub fn eligible_fields(&self) -> impl Iterator<Item = &FieldModel<R>> {
        self.fields.iter().filter(|field| field.is_eligible())
    }
}

///
/// FilterBinding
///
/// Annotation set declared on a record under a name that is not one of its
/// own fields. Lets a filter field such as `min_age` reach `age` through a
/// target override while annotation lookup stays on the record.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FilterBinding {
    pub name: &'static str,
    pub annotations: &'static [Annotation],
}

impl FilterBinding {
    #[must_use]
    pub const fn new(name: &'static str, annotations: &'static [Annotation]) -> Self {
        Self { name, annotations }
    }
}
