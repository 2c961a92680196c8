//! Content catalog lookup.
//!
//! [`ContentCatalog`] is the read-only lookup interface the reference and
//! navigation layers work against. [`Catalog`] implements it with a
//! multi-level index keyed by component, version, module, family and
//! relative path.
//!
//! A missing component, a missing version and a missing file all look the
//! same from here: the lookup returns `None`.

use std::collections::HashMap;

use crate::component::{Component, ComponentVersion};
use crate::entry::CatalogEntry;
use crate::error::CatalogError;
use crate::family::Family;
use crate::id::{ParseError, ROOT_MODULE, ResourceId};
use crate::url::{HtmlExtensionStyle, publish_url};

type Index<T> = HashMap<String, T>;
type FamilyIndex = HashMap<Family, Index<CatalogEntry>>;

/// Read-only catalog lookups.
pub trait ContentCatalog: Send + Sync {
    /// Look up an entry by ID.
    ///
    /// A `None` version means the latest version of the component. Aliases
    /// are returned as-is; callers decide whether to follow `rel`.
    fn resolve_by_id(&self, id: &ResourceId) -> Option<&CatalogEntry>;

    /// Look up an entry by its source path inside a component version.
    fn resolve_by_path(&self, component: &str, version: &str, path: &str)
    -> Option<&CatalogEntry>;

    fn component(&self, name: &str) -> Option<&Component>;

    /// All entries of one family in a component version, ordered by path.
    fn entries_in(&self, component: &str, version: &str, family: Family) -> Vec<&CatalogEntry>;

    fn component_version(&self, component: &str, version: &str) -> Option<&ComponentVersion> {
        self.component(component)?.version(version)
    }

    /// Parse `spec` against `context` and look it up.
    ///
    /// An empty `permitted` list allows every family.
    fn resolve_resource(
        &self,
        spec: &str,
        context: &ResourceId,
        default_family: Family,
        permitted: &[Family],
    ) -> Result<Option<&CatalogEntry>, ParseError> {
        let id = ResourceId::parse(spec, context, default_family)?;
        if !permitted.is_empty() && !permitted.contains(&id.family) {
            return Err(ParseError::FamilyNotPermitted(id.family));
        }
        Ok(self.resolve_by_id(&id))
    }
}

/// In-memory catalog snapshot.
///
/// Built once by [`CatalogBuilder`] and immutable afterwards, so it can be
/// shared between threads without locking.
#[derive(Debug, Default)]
pub struct Catalog {
    components: Vec<Component>,
    entries: Index<Index<Index<FamilyIndex>>>,
    paths: Index<Index<Index<ResourceId>>>,
}

impl Catalog {
    /// Components in registration order.
    #[must_use]
    pub fn components(&self) -> &[Component] {
        &self.components
    }

    /// Every entry in the catalog, ordered by ID.
    #[must_use]
    pub fn entries(&self) -> Vec<&CatalogEntry> {
        let mut entries: Vec<&CatalogEntry> = self
            .entries
            .values()
            .flat_map(HashMap::values)
            .flat_map(HashMap::values)
            .flat_map(HashMap::values)
            .flat_map(HashMap::values)
            .collect();
        entries.sort_by_cached_key(|entry| entry.id.to_string());
        entries
    }

    fn version_index(&self, component: &str, version: &str) -> Option<&Index<FamilyIndex>> {
        self.entries.get(component)?.get(version)
    }
}

impl ContentCatalog for Catalog {
    fn resolve_by_id(&self, id: &ResourceId) -> Option<&CatalogEntry> {
        let version = match id.version.as_deref() {
            Some(version) => version,
            None => self.component(&id.component)?.latest()?.version.as_str(),
        };
        self.version_index(&id.component, version)?
            .get(&id.module)?
            .get(&id.family)?
            .get(&id.relative)
    }

    fn resolve_by_path(
        &self,
        component: &str,
        version: &str,
        path: &str,
    ) -> Option<&CatalogEntry> {
        let id = self.paths.get(component)?.get(version)?.get(path)?;
        self.resolve_by_id(id)
    }

    fn component(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.name == name)
    }

    fn entries_in(&self, component: &str, version: &str, family: Family) -> Vec<&CatalogEntry> {
        let Some(modules) = self.version_index(component, version) else {
            return Vec::new();
        };
        let mut entries: Vec<&CatalogEntry> = modules
            .values()
            .filter_map(|families| families.get(&family))
            .flat_map(HashMap::values)
            .collect();
        entries.sort_by(|a, b| a.path.cmp(&b.path));
        entries
    }
}

/// Builder for [`Catalog`] instances.
///
/// Component versions must be added newest first; that order is kept.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    style: HtmlExtensionStyle,
    components: Vec<Component>,
    entries: Vec<CatalogEntry>,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the URL style used for entries without an explicit URL.
    #[must_use]
    pub fn html_extension_style(mut self, style: HtmlExtensionStyle) -> Self {
        self.style = style;
        self
    }

    /// Register a component version.
    pub fn add_component_version(&mut self, version: ComponentVersion) -> &mut Self {
        match self
            .components
            .iter_mut()
            .find(|c| c.name == version.component)
        {
            Some(component) => component.versions.push(version),
            None => self.components.push(Component {
                name: version.component.clone(),
                versions: vec![version],
            }),
        }
        self
    }

    /// Register an entry.
    pub fn add_entry(&mut self, entry: CatalogEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    /// Build the catalog.
    ///
    /// Publishable entries without a URL get one from the configured style.
    /// Component versions without a landing URL use their `index.adoc` start
    /// page, falling back to the version's root directory.
    ///
    /// # Errors
    ///
    /// Returns an error for duplicate IDs, entries without a version, IDs
    /// that cannot be written as a reference, and entries of unregistered
    /// component versions.
    pub fn build(self) -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog {
            components: self.components,
            entries: HashMap::new(),
            paths: HashMap::new(),
        };

        for mut entry in self.entries {
            let Some(version) = entry.id.version.clone() else {
                return Err(CatalogError::Unqualified(entry.id.to_string()));
            };
            if !entry.id.round_trips() {
                return Err(CatalogError::Unrepresentable(entry.id.to_string()));
            }
            if catalog
                .component_version(&entry.id.component, &version)
                .is_none()
            {
                return Err(CatalogError::UnknownComponentVersion {
                    component: entry.id.component.clone(),
                    version,
                });
            }
            if entry.publishable && entry.url.is_none() {
                entry.url = publish_url(&entry.id, self.style);
            }

            catalog
                .paths
                .entry(entry.id.component.clone())
                .or_default()
                .entry(version.clone())
                .or_default()
                .insert(entry.path.clone(), entry.id.clone());

            let slot = catalog
                .entries
                .entry(entry.id.component.clone())
                .or_default()
                .entry(version)
                .or_default()
                .entry(entry.id.module.clone())
                .or_default()
                .entry(entry.id.family)
                .or_default();
            if slot.contains_key(&entry.id.relative) {
                return Err(CatalogError::Duplicate(entry.id.to_string()));
            }
            slot.insert(entry.id.relative.clone(), entry);
        }

        let landing_urls: Vec<Vec<String>> = catalog
            .components
            .iter()
            .map(|component| {
                component
                    .versions
                    .iter()
                    .map(|cv| landing_url(&catalog, cv))
                    .collect()
            })
            .collect();
        for (component, urls) in catalog.components.iter_mut().zip(landing_urls) {
            for (cv, url) in component.versions.iter_mut().zip(urls) {
                cv.url = url;
            }
        }

        tracing::debug!(
            components = catalog.components.len(),
            "Catalog built"
        );

        Ok(catalog)
    }
}

fn landing_url(catalog: &Catalog, cv: &ComponentVersion) -> String {
    if !cv.url.is_empty() {
        return cv.url.clone();
    }
    let start = ResourceId::new(
        &cv.component,
        &cv.version,
        ROOT_MODULE,
        Family::Page,
        "index.adoc",
    );
    if let Some(url) = catalog
        .resolve_by_id(&start)
        .filter(|entry| entry.is_publishable())
        .and_then(|entry| entry.url.clone())
    {
        return url;
    }
    if cv.version.is_empty() {
        format!("/{}/", cv.component)
    } else {
        format!("/{}/{}/", cv.component, cv.version)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    static_assertions::assert_impl_all!(Catalog: Send, Sync);

    fn page(component: &str, version: &str, relative: &str) -> CatalogEntry {
        CatalogEntry::new(ResourceId::new(
            component,
            version,
            ROOT_MODULE,
            Family::Page,
            relative,
        ))
    }

    fn sample_catalog() -> Catalog {
        let mut builder = CatalogBuilder::new();
        builder
            .add_component_version(ComponentVersion::new("comp", "2.0", "Comp", ""))
            .add_component_version(ComponentVersion::new("comp", "1.0", "Comp", ""))
            .add_component_version(ComponentVersion::new("other", "1.0", "Other", "/other/"))
            .add_entry(page("comp", "2.0", "index.adoc"))
            .add_entry(page("comp", "2.0", "guide.adoc"))
            .add_entry(page("comp", "1.0", "guide.adoc"))
            .add_entry(
                CatalogEntry::new(ResourceId::new(
                    "comp",
                    "2.0",
                    ROOT_MODULE,
                    Family::Partial,
                    "intro.adoc",
                ))
                .with_contents("Intro text"),
            );
        builder.build().unwrap()
    }

    #[test]
    fn test_resolve_by_id_hit() {
        let catalog = sample_catalog();
        let id = ResourceId::new("comp", "1.0", ROOT_MODULE, Family::Page, "guide.adoc");

        let entry = catalog.resolve_by_id(&id).unwrap();

        assert_eq!(entry.url.as_deref(), Some("/comp/1.0/guide.html"));
    }

    #[test]
    fn test_resolve_by_id_missing_version_component_or_file_is_none() {
        let catalog = sample_catalog();
        let base = ResourceId::new("comp", "1.0", ROOT_MODULE, Family::Page, "guide.adoc");

        assert!(catalog.resolve_by_id(&base.with_version("9.9")).is_none());
        assert!(
            catalog
                .resolve_by_id(&ResourceId {
                    component: "nope".to_owned(),
                    ..base.clone()
                })
                .is_none()
        );
        assert!(
            catalog
                .resolve_by_id(&ResourceId {
                    relative: "nope.adoc".to_owned(),
                    ..base
                })
                .is_none()
        );
    }

    #[test]
    fn test_resolve_by_id_without_version_uses_latest() {
        let catalog = sample_catalog();
        let id = ResourceId {
            version: None,
            ..ResourceId::new("comp", "", ROOT_MODULE, Family::Page, "guide.adoc")
        };

        let entry = catalog.resolve_by_id(&id).unwrap();

        assert_eq!(entry.version(), "2.0");
    }

    #[test]
    fn test_resolve_by_path() {
        let catalog = sample_catalog();

        let entry = catalog
            .resolve_by_path("comp", "2.0", "modules/ROOT/partials/intro.adoc")
            .unwrap();

        assert_eq!(entry.contents.as_deref(), Some("Intro text"));
        assert!(
            catalog
                .resolve_by_path("comp", "1.0", "modules/ROOT/partials/intro.adoc")
                .is_none()
        );
    }

    #[test]
    fn test_resolve_resource_applies_context_and_family() {
        let catalog = sample_catalog();
        let context = ResourceId::new("comp", "2.0", ROOT_MODULE, Family::Page, "index.adoc");

        let entry = catalog
            .resolve_resource("1.0@guide.adoc", &context, Family::Page, &[Family::Page])
            .unwrap()
            .unwrap();
        assert_eq!(entry.version(), "1.0");

        let err = catalog
            .resolve_resource("partial$intro.adoc", &context, Family::Page, &[Family::Page])
            .unwrap_err();
        assert_eq!(err, ParseError::FamilyNotPermitted(Family::Partial));
    }

    #[test]
    fn test_landing_url_from_start_page_or_directory() {
        let catalog = sample_catalog();

        assert_eq!(
            catalog.component_version("comp", "2.0").unwrap().url,
            "/comp/2.0/index.html"
        );
        assert_eq!(catalog.component_version("comp", "1.0").unwrap().url, "/comp/1.0/");
        assert_eq!(catalog.component_version("other", "1.0").unwrap().url, "/other/");
    }

    #[test]
    fn test_entries_in_sorted_by_path() {
        let catalog = sample_catalog();

        let pages = catalog.entries_in("comp", "2.0", Family::Page);
        let paths: Vec<_> = pages.iter().map(|e| e.path.as_str()).collect();

        assert_eq!(
            paths,
            vec!["modules/ROOT/pages/guide.adoc", "modules/ROOT/pages/index.adoc"]
        );
    }

    #[test]
    fn test_build_rejects_duplicates() {
        let mut builder = CatalogBuilder::new();
        builder
            .add_component_version(ComponentVersion::new("comp", "1.0", "Comp", ""))
            .add_entry(page("comp", "1.0", "a.adoc"))
            .add_entry(page("comp", "1.0", "a.adoc"));

        let err = builder.build().unwrap_err();

        assert!(matches!(err, CatalogError::Duplicate(_)), "got {err:?}");
    }

    #[test]
    fn test_build_rejects_unrepresentable_ids() {
        for entry in [page("comp", "_", "a.adoc"), page("comp", "1.0", "a:b.adoc")] {
            let mut builder = CatalogBuilder::new();
            builder
                .add_component_version(ComponentVersion::new("comp", "1.0", "Comp", ""))
                .add_component_version(ComponentVersion::new("comp", "_", "Comp", ""))
                .add_entry(entry);

            let err = builder.build().unwrap_err();

            assert!(matches!(err, CatalogError::Unrepresentable(_)), "got {err:?}");
        }
    }

    #[test]
    fn test_build_rejects_unknown_component_version() {
        let mut builder = CatalogBuilder::new();
        builder.add_entry(page("comp", "1.0", "a.adoc"));

        let err = builder.build().unwrap_err();

        assert!(
            matches!(err, CatalogError::UnknownComponentVersion { .. }),
            "got {err:?}"
        );
    }

    #[test]
    fn test_build_keeps_explicit_url_and_applies_style() {
        let mut builder = CatalogBuilder::new().html_extension_style(HtmlExtensionStyle::Indexify);
        builder
            .add_component_version(ComponentVersion::new("comp", "1.0", "Comp", ""))
            .add_entry(page("comp", "1.0", "a.adoc"))
            .add_entry(page("comp", "1.0", "b.adoc").with_url("/custom/b/"));
        let catalog = builder.build().unwrap();

        let url = |relative: &str| {
            catalog
                .resolve_by_id(&ResourceId::new(
                    "comp",
                    "1.0",
                    ROOT_MODULE,
                    Family::Page,
                    relative,
                ))
                .and_then(|e| e.url.clone())
        };
        assert_eq!(url("a.adoc").as_deref(), Some("/comp/1.0/a/"));
        assert_eq!(url("b.adoc").as_deref(), Some("/custom/b/"));
    }
}
