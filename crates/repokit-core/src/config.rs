//! Runtime configuration, loaded from TOML.
//!
//! ```toml
//! [filter]
//! unmapped = "skip"
//!
//! [page]
//! max_page_size = 500
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("failed to parse repokit config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid repokit config: {0}")]
    Invalid(String),
}

///
/// RepoConfig
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    pub filter: FilterConfig,
    pub page: PageConfig,
}

impl RepoConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.page.max_page_size == Some(0) {
            return Err(ConfigError::Invalid(
                "page.max_page_size must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

///
/// FilterConfig
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FilterConfig {
    pub unmapped: UnmappedFieldPolicy,
}

///
/// UnmappedFieldPolicy
///
/// What the filter compiler does with a set filter field that has no
/// annotation entry on the target record.
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnmappedFieldPolicy {
    /// Abandon compilation and report "no predicate".
    #[default]
    Abort,

    /// Ignore the field and keep compiling.
    Skip,

    /// Fail with `RepoError::UnmappedFilterField`.
    Reject,
}

///
/// PageConfig
///

#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
    /// Upper bound on `PageRequest::page_size`; unbounded when absent.
    pub max_page_size: Option<u64>,
}

///
/// TESTS
///
