//! Version list and canonical URL of a page.
//!
//! For every version of the page's component, newest first, the same page
//! is looked up by module and relative path. When it is not there, aliases
//! are consulted in both directions:
//!
//! - forward: an alias at that version with the page's coordinates, whose
//!   chain leads to the page that replaced it;
//! - reverse: an alias in the current version that leads to this page, whose
//!   old name may still exist as a page in the other version.
//!
//! Alias chains never cross into another component here.

use serde::Serialize;
use strata_catalog::{
    AliasScope, CatalogEntry, ComponentVersion, ContentCatalog, Diagnostic, Diagnostics, Family,
    ResourceId, follow_alias,
};

/// One entry of a page's version list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageVersion {
    pub version: String,
    pub display_version: String,
    pub title: String,
    /// URL of the page in this version, or the version's landing page
    /// when the page is missing.
    pub url: String,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub prerelease: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub missing: bool,
    /// Reached through an alias.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub aliased: bool,
}

impl PageVersion {
    fn new(version: &ComponentVersion, url: impl Into<String>) -> Self {
        Self {
            version: version.version.clone(),
            display_version: version.display_version().to_owned(),
            title: version.title.clone(),
            url: url.into(),
            prerelease: version.prerelease,
            missing: false,
            aliased: false,
        }
    }

    fn aliased(mut self) -> Self {
        self.aliased = true;
        self
    }

    fn missing(version: &ComponentVersion) -> Self {
        Self {
            missing: true,
            ..Self::new(version, version.url.clone())
        }
    }
}

/// Build the version list of `page`, newest version first.
///
/// Returns an empty list when the page's component is unknown.
pub fn page_versions<C>(
    catalog: &C,
    page: &CatalogEntry,
    diagnostics: &dyn Diagnostics,
) -> Vec<PageVersion>
where
    C: ContentCatalog + ?Sized,
{
    let Some(component) = catalog.component(&page.id.component) else {
        return Vec::new();
    };
    let renamed_from = former_names(catalog, page);

    component
        .versions
        .iter()
        .map(|version| {
            if version.version == page.version() {
                let url = page.url.clone().unwrap_or_else(|| version.url.clone());
                return PageVersion::new(version, url);
            }
            lookup_in_version(catalog, page, version, &renamed_from, diagnostics)
                .unwrap_or_else(|| PageVersion::missing(version))
        })
        .collect()
}

/// Absolute URL of the newest stable version of the page.
///
/// The search starts at `latest` and moves to older versions, skipping
/// prereleases and missing versions. A version that holds the page under
/// another name counts as present.
/// `site_url` must be an absolute `http(s)` URL.
#[must_use]
pub fn canonical_url(versions: &[PageVersion], latest: &str, site_url: Option<&str>) -> Option<String> {
    let site_url = site_url.filter(|url| url.starts_with("http://") || url.starts_with("https://"))?;
    let start = versions
        .iter()
        .position(|v| v.version == latest)
        .unwrap_or_default();

    versions[start..]
        .iter()
        .find(|v| !v.prerelease && !v.missing)
        .map(|v| format!("{}{}", site_url.trim_end_matches('/'), v.url))
}

fn lookup_in_version<C>(
    catalog: &C,
    page: &CatalogEntry,
    version: &ComponentVersion,
    renamed_from: &[ResourceId],
    diagnostics: &dyn Diagnostics,
) -> Option<PageVersion>
where
    C: ContentCatalog + ?Sized,
{
    let here = page.id.with_version(version.version.as_str());

    if let Some(url) = catalog.resolve_by_id(&here).and_then(published_url) {
        return Some(PageVersion::new(version, url));
    }

    if let Some(alias) = catalog.resolve_by_id(&here.with_family(Family::Alias)) {
        return match follow_alias(catalog, alias, AliasScope::Component) {
            Ok(target) => {
                published_url(target).map(|url| PageVersion::new(version, url).aliased())
            }
            Err(error) => {
                diagnostics.report(Diagnostic::alias(
                    page.id.to_string(),
                    version.version.as_str(),
                    error,
                ));
                None
            }
        };
    }

    renamed_from.iter().find_map(|former| {
        let former = former.with_version(version.version.as_str());
        catalog
            .resolve_by_id(&former)
            .and_then(published_url)
            .map(|url| PageVersion::new(version, url).aliased())
    })
}

/// Page IDs of aliases in the page's own version that lead to the page.
fn former_names<C>(catalog: &C, page: &CatalogEntry) -> Vec<ResourceId>
where
    C: ContentCatalog + ?Sized,
{
    catalog
        .entries_in(&page.id.component, page.version(), Family::Alias)
        .into_iter()
        .filter(|alias| match follow_alias(catalog, alias, AliasScope::Component) {
            Ok(target) => target.id.same_resource(&page.id),
            Err(error) => {
                tracing::debug!(alias = %alias.id, %error, "Skipping alias");
                false
            }
        })
        .map(|alias| alias.id.with_family(Family::Page))
        .collect()
}

fn published_url(entry: &CatalogEntry) -> Option<String> {
    entry.is_publishable().then(|| entry.url.clone()).flatten()
}
