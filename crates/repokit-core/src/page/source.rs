use crate::{
    cache::Getter,
    filter::Predicate,
    page::SortDirection,
    value::{Value, canonical_cmp},
};

///
/// RecordSource
///
/// Lazy, re-orderable sequence of records. Every adapter composes without
/// touching the underlying rows; only `count` and `materialize` evaluate.
///

pub trait RecordSource<R>: Sized {
    #[must_use]
    fn filter(self, predicate: Predicate<R>) -> Self;

    #[must_use]
    fn order_by(self, key: Getter<R>, direction: SortDirection) -> Self;

    #[must_use]
    fn skip(self, n: usize) -> Self;

    #[must_use]
    fn take(self, n: usize) -> Self;

    fn count(&self) -> u64;

    fn materialize(self) -> Vec<R>;
}

///
/// SourceOp
///

enum SourceOp<R> {
    Filter(Predicate<R>),
    Order(Getter<R>, SortDirection),
    Skip(usize),
    Take(usize),
}

///
/// MemorySource
///
/// In-memory `RecordSource`. Adapters are recorded in call order and replayed
/// over row indices, so rows are only moved once, at `materialize`.
/// Ordering is stable.
///

pub struct MemorySource<R> {
    rows: Vec<R>,
    ops: Vec<SourceOp<R>>,
}

impl<R> MemorySource<R> {
    #[must_use]
    pub const fn new(rows: Vec<R>) -> Self {
        Self {
            rows,
            ops: Vec::new(),
        }
    }

    #[must_use]
    fn push(mut self, op: SourceOp<R>) -> Self {
        self.ops.push(op);
        self
    }

    // Replay the recorded adapters over row indices.
    fn plan(&self) -> Vec<usize> {
        let mut plan: Vec<usize> = (0..self.rows.len()).collect();

        for op in &self.ops {
            match op {
                SourceOp::Filter(predicate) => {
                    plan.retain(|&i| self.rows.get(i).is_some_and(|row| predicate.eval(row)));
                }
                SourceOp::Order(getter, direction) => {
                    let mut keyed: Vec<(usize, Value)> = plan
                        .iter()
                        .filter_map(|&i| Some((i, getter.get(self.rows.get(i)?))))
                        .collect();

                    keyed.sort_by(|(_, a), (_, b)| match direction {
                        SortDirection::Ascending => canonical_cmp(a, b),
                        SortDirection::Descending => canonical_cmp(b, a),
                    });
                    plan = keyed.into_iter().map(|(i, _)| i).collect();
                }
                SourceOp::Skip(n) => {
                    plan.drain(..(*n).min(plan.len()));
                }
                SourceOp::Take(n) => plan.truncate(*n),
            }
        }

        plan
    }
}

impl<R> RecordSource<R> for MemorySource<R> {
    fn filter(self, predicate: Predicate<R>) -> Self {
        self.push(SourceOp::Filter(predicate))
    }

    fn order_by(self, key: Getter<R>, direction: SortDirection) -> Self {
        self.push(SourceOp::Order(key, direction))
    }

    fn skip(self, n: usize) -> Self {
        self.push(SourceOp::Skip(n))
    }

    fn take(self, n: usize) -> Self {
        self.push(SourceOp::Take(n))
    }

    fn count(&self) -> u64 {
        u64::try_from(self.plan().len()).unwrap_or(u64::MAX)
    }

    fn materialize(self) -> Vec<R> {
        let plan = self.plan();
        let mut slots: Vec<Option<R>> = self.rows.into_iter().map(Some).collect();

        plan.into_iter()
            .filter_map(|i| slots.get_mut(i).and_then(Option::take))
            .collect()
    }
}

impl<R> From<Vec<R>> for MemorySource<R> {
    fn from(rows: Vec<R>) -> Self {
        Self::new(rows)
    }
}

impl<R> FromIterator<R> for MemorySource<R> {
    fn from_iter<I: IntoIterator<Item = R>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
