//! Resource identifiers and content catalog for Strata.
//!
//! This crate provides:
//! - [`ResourceId`]: parsing and formatting of resource ID specs
//! - [`Catalog`]: an immutable index of [`CatalogEntry`] values behind the
//!   [`ContentCatalog`] lookup trait
//! - [`follow_alias`]: bounded traversal of alias chains
//! - [`Diagnostics`]: the sink for non-fatal resolution problems
//!
//! # Quick Start
//!
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use strata_catalog::{
//!     Catalog, ContentCatalog, Family, HtmlExtensionStyle, ResourceId,
//! };
//!
//! let catalog = Catalog::from_yaml(
//!     r#"
//! components:
//!   - name: docs
//!     versions:
//!       - version: "1.0"
//!         title: Docs
//! files:
//!   - id: 1.0@docs::index.adoc
//! "#,
//!     HtmlExtensionStyle::Default,
//! )?;
//!
//! let context = ResourceId::new("docs", "1.0", "ROOT", Family::Page, "other.adoc");
//! let entry = catalog.resolve_resource("index.adoc", &context, Family::Page, &[])?;
//! assert_eq!(entry.and_then(|e| e.url.as_deref()), Some("/docs/1.0/index.html"));
//! # Ok(())
//! # }
//! ```

mod alias;
mod catalog;
mod component;
mod diagnostics;
mod entry;
mod error;
mod family;
mod id;
mod manifest;
mod navigation;
mod url;

pub use alias::{AliasError, AliasScope, follow_alias};
pub use catalog::{Catalog, CatalogBuilder, ContentCatalog};
pub use component::{Component, ComponentVersion};
pub use diagnostics::{CollectedDiagnostics, Diagnostic, Diagnostics, TracingDiagnostics};
pub use entry::{CatalogEntry, EntryAttributes};
pub use error::CatalogError;
pub use family::Family;
pub use id::{ParseError, ROOT_MODULE, ResourceId};
pub use navigation::{NavItem, UrlType};
pub use url::{HtmlExtensionStyle, publish_url};
