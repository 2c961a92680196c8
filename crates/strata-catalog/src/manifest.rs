//! YAML catalog manifest ingestion.
//!
//! The manifest is the hand-off format from corpus ingestion: component
//! versions (newest first, with their navigation menus) and files keyed by
//! fully qualified resource IDs.
//!
//! ```yaml
//! components:
//!   - name: docs
//!     versions:
//!       - version: "2.0"
//!         title: Docs
//!         navigation:
//!           - root: true
//!             items:
//!               - content: Install
//!                 url: /docs/2.0/install.html
//! files:
//!   - id: 2.0@docs::index.adoc
//!     doctitle: Welcome
//!   - id: 2.0@docs::alias$setup.adoc
//!     rel: install.adoc
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::catalog::{Catalog, CatalogBuilder};
use crate::component::ComponentVersion;
use crate::entry::{CatalogEntry, EntryAttributes};
use crate::error::CatalogError;
use crate::family::Family;
use crate::id::ResourceId;
use crate::navigation::NavItem;
use crate::url::HtmlExtensionStyle;

#[derive(Deserialize)]
struct Manifest {
    #[serde(default)]
    components: Vec<ComponentManifest>,
    #[serde(default)]
    files: Vec<FileManifest>,
}

#[derive(Deserialize)]
struct ComponentManifest {
    name: String,
    #[serde(default)]
    versions: Vec<VersionManifest>,
}

#[derive(Deserialize)]
struct VersionManifest {
    version: String,
    title: Option<String>,
    display_version: Option<String>,
    #[serde(default)]
    prerelease: bool,
    url: Option<String>,
    #[serde(default)]
    navigation: Vec<NavItem>,
}

#[derive(Deserialize)]
struct FileManifest {
    id: String,
    url: Option<String>,
    publishable: Option<bool>,
    contents: Option<String>,
    /// Alias target, parsed in the alias's own context.
    rel: Option<String>,
    doctitle: Option<String>,
    xreftext: Option<String>,
    navtitle: Option<String>,
}

impl Catalog {
    /// Build a catalog from manifest YAML.
    pub fn from_yaml(content: &str, style: HtmlExtensionStyle) -> Result<Self, CatalogError> {
        let manifest: Manifest = serde_yaml::from_str(content)?;
        let mut builder = CatalogBuilder::new().html_extension_style(style);

        for component in manifest.components {
            for version in component.versions {
                builder.add_component_version(ComponentVersion {
                    component: component.name.clone(),
                    title: version.title.unwrap_or_else(|| component.name.clone()),
                    version: version.version,
                    display_version: version.display_version,
                    prerelease: version.prerelease,
                    url: version.url.unwrap_or_default(),
                    navigation: version.navigation,
                });
            }
        }

        for file in manifest.files {
            builder.add_entry(file_entry(file)?);
        }

        builder.build()
    }

    /// Read and build a catalog from a manifest file.
    pub fn load(path: &Path, style: HtmlExtensionStyle) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog = Self::from_yaml(&content, style)?;
        tracing::info!(path = %path.display(), "Loaded catalog manifest");
        Ok(catalog)
    }
}

fn file_entry(file: FileManifest) -> Result<CatalogEntry, CatalogError> {
    let id = parse_qualified(&file.id)?;

    let mut entry = match &file.rel {
        Some(rel) => {
            let rel = ResourceId::parse(rel, &id, Family::Page).map_err(|source| {
                CatalogError::InvalidId {
                    spec: rel.clone(),
                    source,
                }
            })?;
            CatalogEntry::alias(id, rel)
        }
        None => CatalogEntry::new(id),
    };

    if let Some(url) = file.url {
        entry = entry.with_url(url);
    }
    if let Some(publishable) = file.publishable {
        entry.publishable = publishable;
    }
    if let Some(contents) = file.contents {
        entry = entry.with_contents(contents);
    }
    Ok(entry.with_attributes(EntryAttributes {
        doctitle: file.doctitle,
        xreftext: file.xreftext,
        navtitle: file.navtitle,
    }))
}

/// Parse an ID that must name its component and version.
fn parse_qualified(spec: &str) -> Result<ResourceId, CatalogError> {
    let unqualified = ResourceId::new("", "", "", Family::Page, "");
    let id = ResourceId::parse(spec, &unqualified, Family::Page).map_err(|source| {
        CatalogError::InvalidId {
            spec: spec.to_owned(),
            source,
        }
    })?;
    if id.component.is_empty() || id.version.is_none() {
        return Err(CatalogError::Unqualified(spec.to_owned()));
    }
    Ok(id)
}
