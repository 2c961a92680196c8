//! Alias chain traversal.
//!
//! An alias names its target through `rel`, a resource ID that is looked
//! up again on every hop. Chains are acyclic when the corpus is well
//! formed, but traversal is bounded regardless: a chain may take at most
//! one hop per version of the starting component, plus one.

use crate::catalog::ContentCatalog;
use crate::entry::CatalogEntry;
use crate::family::Family;
use crate::id::ResourceId;

/// How far an alias chain may reach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AliasScope {
    /// Stop at the first hop into another component.
    Component,
    /// Follow hops into any component.
    Any,
}

/// Reason an alias chain could not be resolved.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AliasError {
    /// Chain revisits an alias or exceeds its step bound.
    #[error("alias chain starting at {start} does not terminate")]
    Cycle { start: String },
    /// Chain leaves the starting component.
    #[error("alias {alias} points into component {component}")]
    Escape { alias: String, component: String },
    /// `rel` is missing or points at nothing.
    #[error("alias {alias} points at a missing resource")]
    Dangling { alias: String },
}

/// Follow `entry` through aliases to the entry that owns the content.
///
/// Non-alias entries are returned unchanged.
pub fn follow_alias<'c, C>(
    catalog: &'c C,
    entry: &'c CatalogEntry,
    scope: AliasScope,
) -> Result<&'c CatalogEntry, AliasError>
where
    C: ContentCatalog + ?Sized,
{
    if !entry.is_alias() {
        return Ok(entry);
    }

    let start = &entry.id;
    let limit = catalog
        .component(&start.component)
        .map_or(1, |component| component.versions.len())
        + 1;
    let mut visited: Vec<&ResourceId> = vec![start];
    let mut current = entry;

    loop {
        let Some(rel) = current.rel.as_ref() else {
            return Err(AliasError::Dangling {
                alias: current.id.to_string(),
            });
        };
        if scope == AliasScope::Component && rel.component != start.component {
            return Err(AliasError::Escape {
                alias: current.id.to_string(),
                component: rel.component.clone(),
            });
        }
        let Some(target) = resolve_rel(catalog, rel) else {
            return Err(AliasError::Dangling {
                alias: current.id.to_string(),
            });
        };
        if !target.is_alias() {
            return Ok(target);
        }
        if visited.len() >= limit || visited.iter().any(|id| id.same_resource(&target.id)) {
            return Err(AliasError::Cycle {
                start: start.to_string(),
            });
        }
        visited.push(&target.id);
        current = target;
    }
}

/// Look up a `rel` key; a page key also matches an alias at the same
/// coordinates, which is how chains continue.
fn resolve_rel<'c, C>(catalog: &'c C, rel: &ResourceId) -> Option<&'c CatalogEntry>
where
    C: ContentCatalog + ?Sized,
{
    catalog.resolve_by_id(rel).or_else(|| {
        if rel.family == Family::Page {
            catalog.resolve_by_id(&rel.with_family(Family::Alias))
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogBuilder};
    use crate::component::ComponentVersion;
    use crate::id::ROOT_MODULE;

    fn id(component: &str, version: &str, family: Family, relative: &str) -> ResourceId {
        ResourceId::new(component, version, ROOT_MODULE, family, relative)
    }

    fn catalog(entries: Vec<CatalogEntry>) -> Catalog {
        let mut builder = CatalogBuilder::new();
        builder
            .add_component_version(ComponentVersion::new("comp", "2.0", "Comp", ""))
            .add_component_version(ComponentVersion::new("comp", "1.0", "Comp", ""))
            .add_component_version(ComponentVersion::new("other", "1.0", "Other", ""));
        for entry in entries {
            builder.add_entry(entry);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_non_alias_returned_unchanged() {
        let catalog = catalog(vec![CatalogEntry::new(id(
            "comp",
            "2.0",
            Family::Page,
            "a.adoc",
        ))]);
        let entry = catalog
            .resolve_by_id(&id("comp", "2.0", Family::Page, "a.adoc"))
            .unwrap();

        let target = follow_alias(&catalog, entry, AliasScope::Component).unwrap();

        assert_eq!(target.id, entry.id);
    }

    #[test]
    fn test_follows_chain_across_versions() {
        let catalog = catalog(vec![
            CatalogEntry::new(id("comp", "2.0", Family::Page, "new.adoc")),
            CatalogEntry::alias(
                id("comp", "1.0", Family::Page, "old.adoc"),
                id("comp", "2.0", Family::Page, "mid.adoc"),
            ),
            CatalogEntry::alias(
                id("comp", "2.0", Family::Page, "mid.adoc"),
                id("comp", "2.0", Family::Page, "new.adoc"),
            ),
        ]);
        let alias = catalog
            .resolve_by_id(&id("comp", "1.0", Family::Alias, "old.adoc"))
            .unwrap();

        let target = follow_alias(&catalog, alias, AliasScope::Component).unwrap();

        assert_eq!(target.id.relative, "new.adoc");
    }

    #[test]
    fn test_cycle_terminates() {
        let catalog = catalog(vec![
            CatalogEntry::alias(
                id("comp", "1.0", Family::Page, "a.adoc"),
                id("comp", "2.0", Family::Alias, "b.adoc"),
            ),
            CatalogEntry::alias(
                id("comp", "2.0", Family::Page, "b.adoc"),
                id("comp", "1.0", Family::Alias, "a.adoc"),
            ),
        ]);
        let alias = catalog
            .resolve_by_id(&id("comp", "1.0", Family::Alias, "a.adoc"))
            .unwrap();

        let err = follow_alias(&catalog, alias, AliasScope::Component).unwrap_err();

        assert!(matches!(err, AliasError::Cycle { .. }), "got {err:?}");
    }

    #[test]
    fn test_escape_stops_at_component_boundary() {
        let catalog = catalog(vec![
            CatalogEntry::new(id("other", "1.0", Family::Page, "x.adoc")),
            CatalogEntry::alias(
                id("comp", "1.0", Family::Page, "x.adoc"),
                id("other", "1.0", Family::Page, "x.adoc"),
            ),
        ]);
        let alias = catalog
            .resolve_by_id(&id("comp", "1.0", Family::Alias, "x.adoc"))
            .unwrap();

        let err = follow_alias(&catalog, alias, AliasScope::Component).unwrap_err();
        assert_eq!(
            err,
            AliasError::Escape {
                alias: alias.id.to_string(),
                component: "other".to_owned(),
            }
        );

        let target = follow_alias(&catalog, alias, AliasScope::Any).unwrap();
        assert_eq!(target.id.component, "other");
    }

    #[test]
    fn test_dangling_rel() {
        let catalog = catalog(vec![CatalogEntry::alias(
            id("comp", "1.0", Family::Page, "old.adoc"),
            id("comp", "1.0", Family::Page, "gone.adoc"),
        )]);
        let alias = catalog
            .resolve_by_id(&id("comp", "1.0", Family::Alias, "old.adoc"))
            .unwrap();

        let err = follow_alias(&catalog, alias, AliasScope::Component).unwrap_err();

        assert!(matches!(err, AliasError::Dangling { .. }), "got {err:?}");
    }
}
