//! Reference conversion.
//!
//! Turns the target of an `xref`, `image` or `include` macro into a link
//! the markup converter can emit. Failures never abort a page: they are
//! reported through [`Diagnostics`] and produce an unresolved placeholder.

use serde::Serialize;
use strata_catalog::{
    AliasScope, CatalogEntry, ContentCatalog, Diagnostic, Diagnostics, Family, ParseError,
    ResourceId, follow_alias,
};

use crate::relativize::relativize;

/// Macro a reference comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Xref,
    Image,
    Include,
}

impl ReferenceKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Xref => "xref",
            Self::Image => "image",
            Self::Include => "include",
        }
    }

    /// Family assumed when the spec has no `family$` prefix.
    ///
    /// Includes default to the family of the including file when that file
    /// is a page, and to partials otherwise.
    #[must_use]
    pub fn default_family(self, current: Family) -> Family {
        match self {
            Self::Xref => Family::Page,
            Self::Image => Family::Image,
            Self::Include if current == Family::Page => Family::Page,
            Self::Include => Family::Partial,
        }
    }

    /// Families a reference of this kind may point at.
    #[must_use]
    pub const fn permitted_families(self) -> &'static [Family] {
        match self {
            Self::Xref => &[Family::Page, Family::Attachment],
            Self::Image => &[Family::Image],
            Self::Include => &[
                Family::Page,
                Family::Partial,
                Family::Example,
                Family::Attachment,
                Family::Image,
            ],
        }
    }

    /// Whether the target must have a published URL.
    const fn requires_url(self) -> bool {
        !matches!(self, Self::Include)
    }
}

/// Result of converting one reference.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Reference {
    /// Link text (or alt text, or included contents).
    pub content: String,
    /// Href (or included path).
    pub target: String,
    /// Target is on the current page.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub internal: bool,
    /// Target could not be resolved.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub unresolved: bool,
}

impl Reference {
    /// Placeholder for a reference whose target is unknown.
    fn unresolved(id_spec: &str, fragment: &str, content: Option<&str>) -> Self {
        let spec = format!("{id_spec}{fragment}");
        let target = format!("#{spec}");
        let content = match content {
            Some(content) => content.to_owned(),
            None if spec.trim_start_matches('#').is_empty() => target.clone(),
            None => spec.trim_start_matches('#').to_owned(),
        };
        Self {
            content,
            target,
            internal: false,
            unresolved: true,
        }
    }
}

/// Converts reference specs found in one page into links.
///
/// Borrows the catalog and a diagnostics sink; one converter can be shared
/// by every page rendered on a thread.
pub struct ReferenceConverter<'a, C: ContentCatalog + ?Sized> {
    pub(crate) catalog: &'a C,
    pub(crate) diagnostics: &'a dyn Diagnostics,
    relativize: bool,
}

impl<'a, C: ContentCatalog + ?Sized> ReferenceConverter<'a, C> {
    /// Create a converter that emits relative URLs.
    #[must_use]
    pub fn new(catalog: &'a C, diagnostics: &'a dyn Diagnostics) -> Self {
        Self {
            catalog,
            diagnostics,
            relativize: true,
        }
    }

    /// Emit URLs relative to the current page (`true`) or root-relative.
    #[must_use]
    pub fn relativize(mut self, relativize: bool) -> Self {
        self.relativize = relativize;
        self
    }

    /// Convert an `xref` target.
    pub fn convert_page_ref(
        &self,
        spec: &str,
        content: Option<&str>,
        current: &CatalogEntry,
    ) -> Reference {
        self.convert(spec, content, current, ReferenceKind::Xref)
    }

    /// Convert an `image` target; `alt` becomes the content.
    pub fn convert_image_ref(
        &self,
        spec: &str,
        alt: Option<&str>,
        current: &CatalogEntry,
    ) -> Reference {
        self.convert(spec, alt, current, ReferenceKind::Image)
    }

    /// Convert a reference of any kind.
    ///
    /// An include resolves to the included file's path and contents; see
    /// [`Self::resolve_include`] for a lookup that drops unresolved
    /// includes instead of producing a placeholder.
    pub fn convert(
        &self,
        spec: &str,
        content: Option<&str>,
        current: &CatalogEntry,
        kind: ReferenceKind,
    ) -> Reference {
        let content = content.filter(|c| !c.is_empty());
        let (id_spec, fragment) = match spec.split_once('#') {
            Some((id_spec, "")) => (id_spec, String::new()),
            Some((id_spec, fragment)) => (id_spec, format!("#{fragment}")),
            None => (spec, String::new()),
        };

        if kind == ReferenceKind::Include {
            return match self.resolve_include(spec, current) {
                Some(include) => Reference {
                    content: include.contents,
                    target: include.path,
                    internal: false,
                    unresolved: false,
                },
                None => Reference::unresolved(id_spec, &fragment, content),
            };
        }

        if id_spec.is_empty() && !fragment.is_empty() {
            return Reference {
                content: content.map_or_else(|| fragment[1..].to_owned(), str::to_owned),
                target: fragment,
                internal: true,
                unresolved: false,
            };
        }

        let Some(target) = self.resolve_target(id_spec, current, kind) else {
            return Reference::unresolved(id_spec, &fragment, content);
        };
        let Some(target_url) = target.url.as_deref() else {
            return Reference::unresolved(id_spec, &fragment, content);
        };

        let (href, internal) = match current.url.as_deref().filter(|_| self.relativize) {
            Some(from) => {
                let href = relativize(from, target_url, &fragment);
                let internal = href == fragment;
                (href, internal)
            }
            None if current.url.as_deref() == Some(target_url) => (fragment.clone(), true),
            None => (format!("{target_url}{fragment}"), false),
        };

        let content = match content {
            Some(content) => content.to_owned(),
            None if !fragment.is_empty() => format!("{id_spec}{fragment}"),
            None => default_text(target, current).unwrap_or_else(|| id_spec.to_owned()),
        };

        Reference {
            content,
            target: href,
            internal,
            unresolved: false,
        }
    }

    /// Parse and look up `id_spec` in the context of `current`.
    ///
    /// Aliases are followed to their target. Problems are reported and
    /// yield `None`.
    pub(crate) fn resolve_target(
        &self,
        id_spec: &str,
        current: &CatalogEntry,
        kind: ReferenceKind,
    ) -> Option<&'a CatalogEntry> {
        let catalog: &'a C = self.catalog;
        let family = kind.default_family(current.id.family);

        let id = match parse_permitted(id_spec, &current.id, family, kind) {
            Ok(id) => id,
            Err(error) => {
                self.diagnostics.report(Diagnostic::InvalidSyntax {
                    page: current.id.to_string(),
                    reference: kind.label(),
                    spec: id_spec.to_owned(),
                    error,
                });
                return None;
            }
        };

        let found = catalog.resolve_by_id(&id).or_else(|| {
            if id.family == Family::Page {
                catalog.resolve_by_id(&id.with_family(Family::Alias))
            } else {
                None
            }
        });

        let target = found
            .and_then(|entry| match follow_alias(catalog, entry, AliasScope::Any) {
                Ok(target) => Some(target),
                Err(error) => {
                    tracing::debug!(alias = %entry.id, %error, "Alias not followed");
                    None
                }
            })
            .filter(|target| !kind.requires_url() || target.is_publishable());

        if target.is_none() {
            self.diagnostics.report(Diagnostic::TargetNotFound {
                page: current.id.to_string(),
                reference: kind.label(),
                spec: id_spec.to_owned(),
            });
        }
        target
    }
}

fn parse_permitted(
    spec: &str,
    context: &ResourceId,
    family: Family,
    kind: ReferenceKind,
) -> Result<ResourceId, ParseError> {
    let id = ResourceId::parse(spec, context, family)?;
    if !kind.permitted_families().contains(&id.family) {
        return Err(ParseError::FamilyNotPermitted(id.family));
    }
    Ok(id)
}

/// Link text for a reference without explicit content or fragment.
fn default_text(target: &CatalogEntry, current: &CatalogEntry) -> Option<String> {
    target.attributes.xreftext.clone().or_else(|| {
        if current.id.family == Family::Nav {
            target.attributes.navtitle.clone()
        } else {
            None
        }
    })
}
