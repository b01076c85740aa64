//! Core runtime for repokit: scalar values, record descriptor tables, the
//! metadata cache, the filter predicate compiler, and the pagination engine.
#![warn(unreachable_pub)]

extern crate self as repokit;

// public exports are one module level down
pub mod cache;
pub mod config;
pub mod error;
pub mod filter;
pub mod model;
pub mod obs;
pub mod page;
pub mod traits;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_fixtures;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No caches, compilers, or pagers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        filter::{CompareOp, MergeOp},
        model::{Record, RecordModel},
        page::SortDirection,
        traits::FieldValue,
        value::{ScalarKind, Value},
    };
}
