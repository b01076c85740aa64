//! Pagination over lazy record sources.

mod source;

#[cfg(test)]
mod tests;

pub use source::{MemorySource, RecordSource};

use crate::{
    cache::{CancellationToken, MetadataCache},
    config::RepoConfig,
    error::RepoError,
    filter::{FilterCompiler, Predicate},
    model::Record,
};
use serde::{Deserialize, Serialize};

///
/// SortDirection
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

///
/// PageRequest
///
/// Index and size are signed so that out-of-domain caller input reaches
/// validation instead of failing at the type boundary.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct PageRequest {
    pub page_index: i64,
    pub page_size: i64,
    pub sort_field: String,
    #[serde(default)]
    pub sort_direction: SortDirection,
}

impl PageRequest {
    #[must_use]
    pub fn new(page_index: i64, page_size: i64, sort_field: impl Into<String>) -> Self {
        Self {
            page_index,
            page_size,
            sort_field: sort_field.into(),
            sort_direction: SortDirection::Ascending,
        }
    }

    #[must_use]
    pub const fn direction(mut self, sort_direction: SortDirection) -> Self {
        self.sort_direction = sort_direction;
        self
    }

    #[must_use]
    pub const fn descending(self) -> Self {
        self.direction(SortDirection::Descending)
    }

    // Returns the validated (index, size) pair.
    fn validate(&self, max_page_size: Option<u64>) -> Result<(u64, u64), RepoError> {
        let size = u64::try_from(self.page_size)
            .ok()
            .filter(|size| *size > 0 && max_page_size.is_none_or(|max| *size <= max))
            .ok_or(RepoError::InvalidPageSize {
                size: self.page_size,
            })?;
        let index = u64::try_from(self.page_index).map_err(|_| RepoError::InvalidPageIndex {
            index: self.page_index,
        })?;

        if self.sort_field.trim().is_empty() {
            return Err(RepoError::InvalidArgument(
                "sort field cannot be empty".to_string(),
            ));
        }

        Ok((index, size))
    }
}

///
/// Page
///
/// One materialized page. `total_pages` is `total_elements / page_size`
/// rounded down, so a trailing partial page is reachable but not counted.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Page<T> {
    pub page_index: u64,
    pub page_size: u64,
    pub sort_field: String,
    pub sort_direction: SortDirection,
    pub total_elements: u64,
    pub total_pages: u64,
    pub content: Vec<T>,
}

impl<T> Page<T> {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.content.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

///
/// Pager
///
/// Filters, sorts, windows, and materializes one page of `R`.
///

pub struct Pager<'a, R: Record> {
    cache: &'a MetadataCache,
    compiler: FilterCompiler<'a>,
    max_page_size: Option<u64>,
    predicate: Option<Predicate<R>>,
}

impl<'a, R: Record> Pager<'a, R> {
    #[must_use]
    pub fn new(cache: &'a MetadataCache) -> Self {
        Self {
            cache,
            compiler: FilterCompiler::new(cache),
            max_page_size: None,
            predicate: None,
        }
    }

    #[must_use]
    pub fn with_config(cache: &'a MetadataCache, config: &RepoConfig) -> Self {
        Self {
            cache,
            compiler: FilterCompiler::from_config(cache, config),
            max_page_size: config.page.max_page_size,
            predicate: None,
        }
    }

    /// AND a predicate onto any already present.
    #[must_use]
    pub fn predicate(mut self, predicate: Predicate<R>) -> Self {
        self.predicate = Some(match self.predicate.take() {
            Some(existing) => existing.and(predicate),
            None => predicate,
        });
        self
    }

    /// Compile `filter` and AND the result onto any predicate already present.
    /// A filter that compiles to no predicate leaves the pager unfiltered.
    pub fn filter<F: Record>(
        self,
        filter: &F,
        cancel: &CancellationToken,
    ) -> Result<Self, RepoError> {
        match self.compiler.compile::<R, F>(filter, cancel)? {
            Some(predicate) => Ok(self.predicate(predicate)),
            None => Ok(self),
        }
    }

    pub fn fetch<S>(
        &self,
        source: S,
        request: &PageRequest,
        cancel: &CancellationToken,
    ) -> Result<Page<R>, RepoError>
    where
        S: RecordSource<R>,
    {
        self.fetch_mapped(source, request, cancel, |rows| rows)
    }

    /// Fetch one page and project its rows through `map`.
    pub fn fetch_mapped<S, T>(
        &self,
        source: S,
        request: &PageRequest,
        cancel: &CancellationToken,
        map: impl FnOnce(Vec<R>) -> Vec<T>,
    ) -> Result<Page<T>, RepoError>
    where
        S: RecordSource<R>,
    {
        let (page_index, page_size) = request.validate(self.max_page_size)?;

        self.cache.register::<R>(cancel)?;
        let key = self
            .cache
            .lookup_getter::<R>(&request.sort_field, cancel)?;

        let source = match &self.predicate {
            Some(predicate) => source.filter(predicate.clone()),
            None => source,
        };

        let total_elements = source.count();
        let total_pages = total_elements / page_size;
        let page = |content| Page {
            page_index,
            page_size,
            sort_field: request.sort_field.clone(),
            sort_direction: request.sort_direction,
            total_elements,
            total_pages,
            content,
        };

        if total_elements == 0 {
            return Ok(page(Vec::new()));
        }

        let window = |n: u64| {
            usize::try_from(n).map_err(|_| RepoError::InvalidPageIndex {
                index: request.page_index,
            })
        };
        let offset = page_index
            .checked_mul(page_size)
            .ok_or(RepoError::InvalidPageIndex {
                index: request.page_index,
            })?;
        let (skip, take) = (window(offset)?, window(page_size)?);

        let rows = source
            .order_by(key, request.sort_direction)
            .skip(skip)
            .take(take)
            .materialize();

        tracing::debug!(
            record = R::MODEL.path,
            sort = %request.sort_field,
            page_index,
            page_size,
            total_elements,
            rows = rows.len(),
            "fetched page"
        );

        Ok(page(map(rows)))
    }
}
