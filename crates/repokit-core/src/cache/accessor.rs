use crate::{error::RepoError, model::FieldModel, value::Value, value::ValueError};
use std::{fmt, sync::Arc};

type GetterFn<R> = dyn Fn(&R) -> Value + Send + Sync;
type SetterFn<R> = dyn Fn(&mut R, Value) -> Result<(), ValueError> + Send + Sync;

///
/// Getter
///
/// Compiled, shared field reader. Clones share one allocation, so identity
/// is observable through `ptr_eq`.
///

pub struct Getter<R>(Arc<GetterFn<R>>);

impl<R> Getter<R> {
    pub fn new(f: impl Fn(&R) -> Value + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    // Compile the descriptor-table function pointer, if the field has one.
    pub(crate) fn compile(field: &FieldModel<R>) -> Option<Self>
    where
        R: 'static,
    {
        field.get.map(|get| Self::new(move |record: &R| get(record)))
    }

    pub fn get(&self, record: &R) -> Value {
        (self.0)(record)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<R> Clone for Getter<R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<R> fmt::Debug for Getter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Getter").finish_non_exhaustive()
    }
}

///
/// Setter
///
/// Compiled, shared field writer.
///

pub struct Setter<R>(Arc<SetterFn<R>>);

impl<R> Setter<R> {
    pub fn new(f: impl Fn(&mut R, Value) -> Result<(), ValueError> + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    pub(crate) fn compile(field: &FieldModel<R>) -> Option<Self>
    where
        R: 'static,
    {
        field
            .set
            .map(|set| Self::new(move |record: &mut R, value| set(record, value)))
    }

    pub fn set(&self, record: &mut R, value: Value) -> Result<(), RepoError> {
        (self.0)(record, value).map_err(RepoError::from)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<R> Clone for Setter<R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<R> fmt::Debug for Setter<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Setter").finish_non_exhaustive()
    }
}
