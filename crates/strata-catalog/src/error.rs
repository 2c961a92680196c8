//! Catalog ingestion errors.

use std::path::PathBuf;

use crate::id::ParseError;

/// Error raised while building a catalog.
///
/// Lookups never fail with this type; a missing resource is `None`.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Manifest file could not be read.
    #[error("Failed to read catalog manifest {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Manifest is not valid YAML or has the wrong shape.
    #[error("Catalog manifest parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// Resource ID in the manifest has a syntax error.
    #[error("Invalid resource ID `{spec}`: {source}")]
    InvalidId {
        spec: String,
        #[source]
        source: ParseError,
    },
    /// Resource ID lacks a component or version.
    #[error("Resource ID `{0}` must name a component and a version")]
    Unqualified(String),
    /// ID cannot be written as a spec that parses back to it.
    #[error("Resource ID `{0}` cannot be written as a reference")]
    Unrepresentable(String),
    /// Two entries share one ID.
    #[error("Duplicate resource ID: {0}")]
    Duplicate(String),
    /// Entry refers to a component version that was never registered.
    #[error("Unknown component version `{version}@{component}`")]
    UnknownComponentVersion { component: String, version: String },
}
