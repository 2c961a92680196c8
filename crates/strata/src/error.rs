//! CLI error types.

use strata_catalog::{CatalogError, ParseError};
use strata_config::ConfigError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Catalog(#[from] CatalogError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid page ID `{spec}`: {source}")]
    InvalidPage { spec: String, source: ParseError },

    #[error("page not found: {0}")]
    PageNotFound(String),

    #[error("{0}")]
    Validation(String),
}
