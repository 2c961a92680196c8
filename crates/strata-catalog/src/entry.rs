//! Catalog entries.

use crate::family::Family;
use crate::id::ResourceId;

/// Document attributes the reference and navigation layers read.
///
/// Produced by the external markup converter; all optional.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryAttributes {
    /// Document title.
    pub doctitle: Option<String>,
    /// Text used for cross-references to this document.
    pub xreftext: Option<String>,
    /// Title used when the document is linked from a navigation file.
    pub navtitle: Option<String>,
}

/// One published or virtual unit of content.
///
/// Entries are immutable once the catalog is built. For aliases, `rel` is a
/// lookup key into the catalog, never an owning pointer; the content stays
/// with the target entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Fully qualified ID (version is always set, fragment never is).
    pub id: ResourceId,
    /// Source path relative to the component version root
    /// (e.g. `modules/ROOT/partials/intro.adoc`).
    pub path: String,
    /// Root-relative published URL.
    pub url: Option<String>,
    /// Whether the entry may be linked to.
    pub publishable: bool,
    /// Raw contents (used for include targets).
    pub contents: Option<String>,
    /// Redirect target of an alias.
    pub rel: Option<ResourceId>,
    pub attributes: EntryAttributes,
}

impl CatalogEntry {
    /// Create an entry with its conventional source path.
    ///
    /// Families that publish start out publishable; the URL is assigned
    /// when the catalog is built unless set explicitly.
    #[must_use]
    pub fn new(id: ResourceId) -> Self {
        let path = source_path(&id);
        let publishable = id.family.is_published();
        Self {
            id: id.without_fragment(),
            path,
            url: None,
            publishable,
            contents: None,
            rel: None,
            attributes: EntryAttributes::default(),
        }
    }

    /// Create an alias entry redirecting to `rel`.
    #[must_use]
    pub fn alias(id: ResourceId, rel: ResourceId) -> Self {
        let mut entry = Self::new(id.with_family(Family::Alias));
        entry.rel = Some(rel.without_fragment());
        entry
    }

    /// Set the published URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the raw contents.
    #[must_use]
    pub fn with_contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = Some(contents.into());
        self
    }

    /// Set document attributes.
    #[must_use]
    pub fn with_attributes(mut self, attributes: EntryAttributes) -> Self {
        self.attributes = attributes;
        self
    }

    /// Mark the entry as hidden from linking.
    #[must_use]
    pub fn unpublished(mut self) -> Self {
        self.publishable = false;
        self
    }

    /// Whether the entry can be the target of a link.
    ///
    /// Requires both the publishable flag and a published URL.
    #[must_use]
    pub fn is_publishable(&self) -> bool {
        self.publishable && self.url.is_some()
    }

    #[must_use]
    pub fn is_alias(&self) -> bool {
        self.id.family == Family::Alias
    }

    /// Component version the entry belongs to.
    #[must_use]
    pub fn version(&self) -> &str {
        self.id.version.as_deref().unwrap_or_default()
    }
}

/// Conventional source path of a resource inside its component version.
fn source_path(id: &ResourceId) -> String {
    match id.family.dirname() {
        Some(dir) => format!("modules/{}/{dir}/{}", id.module, id.relative),
        None => format!("modules/{}/{}", id.module, id.relative),
    }
}
