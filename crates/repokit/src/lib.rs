//! ## Crate layout
//! - `cache`: process-wide metadata cache of field accessors and annotations.
//! - `filter`: compiles annotated filter records into predicates.
//! - `page`: sorts, windows, and materializes pages from lazy sources.
//! - `model`: record descriptor tables, usually produced by `#[derive(Record)]`.
//! - `value`, `traits`: the scalar value model and its conversion trait.
//! - `config`, `error`, `obs`: configuration, errors, and cache counters.
//!
//! The `prelude` module carries the vocabulary needed to declare records and
//! drive the cache, compiler, and pager.

pub use repokit_core as core;

// generated code refers to these through `::repokit::*`
pub use repokit_core::{cache, config, error, filter, model, obs, page, traits, value};

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Macros
//

pub use repokit_derive::Record;

//
// Top-level types
//

pub use repokit_core::{
    cache::{CancellationToken, MetadataCache},
    config::RepoConfig,
    error::{ErrorClass, RepoError},
    filter::{FilterCompiler, Predicate},
    page::{MemorySource, Page, PageRequest, Pager, RecordSource},
};

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        cache::{CancellationToken, MetadataCache},
        filter::{CompareOp, FilterCompiler, MergeOp, Predicate},
        model::Record as _,
        page::{MemorySource, Page, PageRequest, Pager, RecordSource as _, SortDirection},
        traits::FieldValue as _,
        value::Value,
    };
    pub use repokit_derive::Record;
}
