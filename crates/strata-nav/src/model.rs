//! Per-page model handed to templates.

use serde::Serialize;
use strata_catalog::{CatalogEntry, ContentCatalog, Diagnostics};

use crate::context::nav_context;
use crate::link::NavLink;
use crate::versions::{PageVersion, canonical_url, page_versions};

/// Site-wide settings the page model depends on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteSettings {
    /// Absolute base URL of the published site.
    pub url: Option<String>,
    /// Root-relative URL of the site start page.
    pub home_url: Option<String>,
}

/// Navigation and version data of one page.
///
/// Recomputed for every render.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageModel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub url: String,
    pub component: String,
    pub version: String,
    /// Page is the site start page.
    pub home: bool,
    pub breadcrumbs: Vec<NavLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<NavLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous: Option<NavLink>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<NavLink>,
    pub versions: Vec<PageVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<PageVersion>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub canonical_url: Option<String>,
}

/// Builds [`PageModel`]s against a read-only catalog.
///
/// Holds no mutable state, so one builder can serve many threads.
pub struct PageModelBuilder<'a, C: ContentCatalog + ?Sized> {
    catalog: &'a C,
    diagnostics: &'a dyn Diagnostics,
    site: SiteSettings,
}

impl<'a, C: ContentCatalog + ?Sized> PageModelBuilder<'a, C> {
    #[must_use]
    pub fn new(catalog: &'a C, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            catalog,
            diagnostics,
            site: SiteSettings::default(),
        }
    }

    #[must_use]
    pub fn site(mut self, site: SiteSettings) -> Self {
        self.site = site;
        self
    }

    /// Build the model for `page`.
    ///
    /// Returns `None` when the page has no published URL or its component
    /// version is not in the catalog.
    #[must_use]
    pub fn build(&self, page: &CatalogEntry) -> Option<PageModel> {
        let url = page.url.as_deref().filter(|_| page.is_publishable())?;
        let component = self.catalog.component(&page.id.component)?;
        let version = component.version(page.version())?;
        let title = page.attributes.doctitle.clone();

        let context = nav_context(version, url, title.as_deref());
        let versions = page_versions(self.catalog, page, self.diagnostics);
        let latest = component
            .latest()
            .and_then(|latest| versions.iter().find(|v| v.version == latest.version))
            .cloned();
        let canonical_url = latest.as_ref().and_then(|latest| {
            canonical_url(&versions, &latest.version, self.site.url.as_deref())
        });

        Some(PageModel {
            home: self.site.home_url.as_deref() == Some(url),
            url: url.to_owned(),
            title,
            component: component.name.clone(),
            version: version.version.clone(),
            breadcrumbs: context.breadcrumbs,
            parent: context.parent,
            previous: context.previous,
            next: context.next,
            versions,
            latest,
            canonical_url,
        })
    }
}
