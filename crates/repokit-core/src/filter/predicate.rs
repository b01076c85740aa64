use crate::filter::MergeOp;
use std::{fmt, sync::Arc};

type PredicateFn<R> = dyn Fn(&R) -> bool + Send + Sync;

///
/// Predicate
///
/// Compiled boolean test over a record. Cheap to clone and safe to share
/// across threads.
///

pub struct Predicate<R>(Arc<PredicateFn<R>>);

impl<R: 'static> Predicate<R> {
    pub fn new(f: impl Fn(&R) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    #[must_use]
    pub fn and(self, other: Self) -> Self {
        Self::new(move |record| self.eval(record) && other.eval(record))
    }

    #[must_use]
    pub fn or(self, other: Self) -> Self {
        Self::new(move |record| self.eval(record) || other.eval(record))
    }

    /// Join `other` onto `self` using `op`.
    #[must_use]
    pub fn merge(self, op: MergeOp, other: Self) -> Self {
        match op {
            MergeOp::And => self.and(other),
            MergeOp::Or => self.or(other),
        }
    }
}

impl<R> Predicate<R> {
    pub fn eval(&self, record: &R) -> bool {
        (self.0)(record)
    }
}

impl<R> Clone for Predicate<R> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<R> fmt::Debug for Predicate<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Predicate").finish_non_exhaustive()
    }
}
