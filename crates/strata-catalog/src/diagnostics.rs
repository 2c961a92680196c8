//! Diagnostics collaborator.
//!
//! Nothing in reference resolution or navigation building is fatal. Problems
//! are reported through a [`Diagnostics`] value passed in by the caller, so
//! there is no process-wide logger registration.

use std::fmt;
use std::sync::{Mutex, PoisonError};

use crate::alias::AliasError;
use crate::id::ParseError;

/// A non-fatal problem found while rendering a page.
///
/// Every variant carries the ID of the page being processed so the message
/// can be attributed to a source location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Diagnostic {
    /// Reference spec failed to parse.
    InvalidSyntax {
        page: String,
        reference: &'static str,
        spec: String,
        error: ParseError,
    },
    /// Well-formed spec with no publishable target.
    TargetNotFound {
        page: String,
        reference: &'static str,
        spec: String,
    },
    /// Alias chain revisits an entry or runs past its step bound.
    AliasCycle {
        page: String,
        version: String,
        alias: String,
    },
    /// Alias chain leaves the component.
    AliasEscape {
        page: String,
        version: String,
        alias: String,
        component: String,
    },
    /// Alias points at a resource that is not in the catalog.
    DanglingAlias {
        page: String,
        version: String,
        alias: String,
    },
}

impl Diagnostic {
    /// Diagnostic for an alias chain that failed while processing `page`
    /// in `version`.
    #[must_use]
    pub fn alias(page: impl Into<String>, version: impl Into<String>, error: AliasError) -> Self {
        let page = page.into();
        let version = version.into();
        match error {
            AliasError::Cycle { start } => Self::AliasCycle {
                page,
                version,
                alias: start,
            },
            AliasError::Escape { alias, component } => Self::AliasEscape {
                page,
                version,
                alias,
                component,
            },
            AliasError::Dangling { alias } => Self::DanglingAlias {
                page,
                version,
                alias,
            },
        }
    }

    /// ID of the page the diagnostic belongs to.
    #[must_use]
    pub fn page(&self) -> &str {
        match self {
            Self::InvalidSyntax { page, .. }
            | Self::TargetNotFound { page, .. }
            | Self::AliasCycle { page, .. }
            | Self::AliasEscape { page, .. }
            | Self::DanglingAlias { page, .. } => page,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSyntax {
                reference,
                spec,
                error,
                ..
            } => write!(f, "invalid {reference} reference syntax `{spec}`: {error}"),
            Self::TargetNotFound {
                reference, spec, ..
            } => write!(f, "target of {reference} not found: {spec}"),
            Self::AliasCycle { version, alias, .. } => {
                write!(f, "alias chain from {alias} in version {version} does not terminate")
            }
            Self::AliasEscape {
                version,
                alias,
                component,
                ..
            } => write!(
                f,
                "alias {alias} in version {version} points into component {component}"
            ),
            Self::DanglingAlias { version, alias, .. } => {
                write!(f, "alias {alias} in version {version} points at a missing resource")
            }
        }
    }
}

/// Sink for [`Diagnostic`]s.
pub trait Diagnostics: Send + Sync {
    fn report(&self, diagnostic: Diagnostic);
}

/// Emits each diagnostic as a `tracing` warning.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::InvalidSyntax {
                page,
                reference,
                spec,
                error,
            } => {
                tracing::warn!(page = %page, reference = *reference, spec = %spec, error = %error, "Invalid reference syntax");
            }
            Diagnostic::TargetNotFound {
                page,
                reference,
                spec,
            } => {
                tracing::warn!(page = %page, reference = *reference, spec = %spec, "Target not found");
            }
            Diagnostic::AliasCycle { page, version, .. }
            | Diagnostic::AliasEscape { page, version, .. }
            | Diagnostic::DanglingAlias { page, version, .. } => {
                tracing::warn!(page = %page, version = %version, "{diagnostic}");
            }
        }
    }
}

/// Keeps diagnostics in memory.
///
/// Safe to share between worker threads.
#[derive(Debug, Default)]
pub struct CollectedDiagnostics {
    inner: Mutex<Vec<Diagnostic>>,
}

impl CollectedDiagnostics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove and return everything collected so far.
    pub fn take(&self) -> Vec<Diagnostic> {
        std::mem::take(&mut *self.lock())
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Diagnostic>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Diagnostics for CollectedDiagnostics {
    fn report(&self, diagnostic: Diagnostic) {
        self.lock().push(diagnostic);
    }
}
