//! Include target resolution.

use serde::Serialize;
use strata_catalog::{CatalogEntry, ContentCatalog, Diagnostic};

use crate::reference::{ReferenceConverter, ReferenceKind};

/// A resolved include.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Include {
    /// Source path of the included file within its component version.
    pub path: String,
    pub contents: String,
}

impl<C: ContentCatalog + ?Sized> ReferenceConverter<'_, C> {
    /// Resolve an include target relative to `current`.
    ///
    /// Targets containing `@`, `:` or `$` are resource IDs. Anything else is
    /// a path relative to the including file's directory. Unresolved
    /// includes are reported and yield `None`, so the directive is dropped.
    pub fn resolve_include(&self, target: &str, current: &CatalogEntry) -> Option<Include> {
        let entry = if is_resource_id(target) {
            self.resolve_target(target, current, ReferenceKind::Include)?
        } else {
            let found = join_relative(&current.path, target).and_then(|path| {
                self.catalog
                    .resolve_by_path(&current.id.component, current.version(), &path)
            });
            let Some(entry) = found else {
                self.diagnostics.report(Diagnostic::TargetNotFound {
                    page: current.id.to_string(),
                    reference: ReferenceKind::Include.label(),
                    spec: target.to_owned(),
                });
                return None;
            };
            entry
        };

        Some(Include {
            path: entry.path.clone(),
            contents: entry.contents.clone().unwrap_or_default(),
        })
    }
}

fn is_resource_id(target: &str) -> bool {
    target.contains(['@', ':', '$'])
}

/// Join `target` onto the directory of `base`, resolving `.` and `..`.
///
/// Returns `None` when the path climbs above the component version root.
fn join_relative(base: &str, target: &str) -> Option<String> {
    let mut segments: Vec<&str> = base.split('/').collect();
    segments.pop();
    for part in target.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            _ => segments.push(part),
        }
    }
    Some(segments.join("/"))
}
