//! Resource identifier model.
//!
//! A resource ID addresses one unit of content independently of where its
//! source file lives. The textual form is:
//!
//! ```text
//! [<version>@][<component>:<module>:|<component>::|<module>:][<family>$]<relative>[#<fragment>]
//! ```
//!
//! Qualifiers left out of the text are taken from the *context*, the ID of
//! the document holding the reference. The default family is chosen by the
//! caller, so the parser itself knows nothing about reference kinds.

use std::fmt;

use crate::family::Family;

/// Module used when a component is named without a module (`component::`).
pub const ROOT_MODULE: &str = "ROOT";

/// Version marker for a versionless component (`_@page.adoc`).
const VERSIONLESS_MARKER: &str = "_";

/// Syntax error in a resource ID spec.
///
/// Kept distinct from "not found" so callers can report the two cases
/// separately.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Spec is an empty string.
    #[error("resource ID is empty")]
    Empty,
    /// Nothing left after stripping qualifiers.
    #[error("resource ID has no relative path")]
    EmptyRelative,
    /// `$` marker with no family name in front of it.
    #[error("family marker `$` is not preceded by a family name")]
    EmptyFamily,
    /// Family name is not one of the known families.
    #[error("unknown family `{0}`")]
    UnknownFamily(String),
    /// Family is known but not allowed for this kind of reference.
    #[error("family `{0}` is not permitted here")]
    FamilyNotPermitted(Family),
    /// More than two `:` qualifiers.
    #[error("too many `:` qualifiers")]
    TooManyQualifiers,
    /// `:module:` with an empty component in front.
    #[error("component qualifier is empty")]
    EmptyComponent,
    /// Leading `:` with an empty module.
    #[error("module qualifier is empty")]
    EmptyModule,
    /// A marker showed up in a position reserved for another one.
    #[error("`{marker}` is not allowed in the {part}")]
    MisplacedMarker {
        /// Offending marker character.
        marker: char,
        /// Part of the spec the marker was found in.
        part: &'static str,
    },
}

/// Structured address of a resource.
///
/// `version` is `None` when a spec names another component without a
/// version; the catalog then resolves it to that component's latest version.
/// An empty string version is a versionless component.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ResourceId {
    pub component: String,
    pub version: Option<String>,
    pub module: String,
    pub family: Family,
    pub relative: String,
    pub fragment: Option<String>,
}

impl ResourceId {
    /// Create a fully qualified ID without a fragment.
    #[must_use]
    pub fn new(
        component: impl Into<String>,
        version: impl Into<String>,
        module: impl Into<String>,
        family: Family,
        relative: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            version: Some(version.into()),
            module: module.into(),
            family,
            relative: relative.into(),
            fragment: None,
        }
    }

    /// Parse a spec, filling omitted qualifiers from `context`.
    ///
    /// # Rules
    ///
    /// - A spec without qualifiers keeps component, version and module of
    ///   the context.
    /// - `version@` alone changes only the version.
    /// - Naming a component resets the module to [`ROOT_MODULE`] unless one
    ///   is given, and leaves the version open unless one is given.
    /// - `version@@path` is a version followed by a relative path that
    ///   starts with a literal `@`.
    pub fn parse(spec: &str, context: &Self, default_family: Family) -> Result<Self, ParseError> {
        if spec.is_empty() {
            return Err(ParseError::Empty);
        }

        let (body, fragment) = match spec.split_once('#') {
            Some((body, fragment)) => (body, (!fragment.is_empty()).then(|| fragment.to_owned())),
            None => (spec, None),
        };

        let (version, rest) = split_version(body);
        if let Some(version) = version
            && version.contains('$')
        {
            return Err(ParseError::MisplacedMarker {
                marker: '$',
                part: "version",
            });
        }

        let mut qualifiers: Vec<&str> = rest.split(':').collect();
        let Some(path) = qualifiers.pop() else {
            return Err(ParseError::EmptyRelative);
        };

        let (component, module) = match qualifiers.as_slice() {
            [] => (None, None),
            [module] => {
                if module.is_empty() {
                    return Err(ParseError::EmptyModule);
                }
                (None, Some(*module))
            }
            [component, module] => {
                if component.is_empty() {
                    return Err(ParseError::EmptyComponent);
                }
                (Some(*component), (!module.is_empty()).then_some(*module))
            }
            _ => return Err(ParseError::TooManyQualifiers),
        };

        check_qualifier(component, "component")?;
        check_qualifier(module, "module")?;

        let (family, relative) = match path.split_once('$') {
            Some((family, relative)) => {
                if family.is_empty() {
                    return Err(ParseError::EmptyFamily);
                }
                if relative.contains('$') {
                    return Err(ParseError::MisplacedMarker {
                        marker: '$',
                        part: "relative path",
                    });
                }
                (family.parse::<Family>()?, relative)
            }
            None => (default_family, path),
        };

        if relative.is_empty() {
            return Err(ParseError::EmptyRelative);
        }

        let version = version.map(|v| {
            if v == VERSIONLESS_MARKER {
                String::new()
            } else {
                v.to_owned()
            }
        });

        let (component, version, module) = match component {
            Some(component) => (
                component.to_owned(),
                version,
                module.unwrap_or(ROOT_MODULE).to_owned(),
            ),
            None => (
                context.component.clone(),
                version.or_else(|| context.version.clone()),
                module.map_or_else(|| context.module.clone(), str::to_owned),
            ),
        };

        Ok(Self {
            component,
            version,
            module,
            family,
            relative: relative.to_owned(),
            fragment,
        })
    }

    /// Copy of this ID with a different family.
    #[must_use]
    pub fn with_family(&self, family: Family) -> Self {
        Self {
            family,
            ..self.clone()
        }
    }

    /// Copy of this ID with a different version.
    #[must_use]
    pub fn with_version(&self, version: impl Into<String>) -> Self {
        Self {
            version: Some(version.into()),
            ..self.clone()
        }
    }

    /// Copy of this ID without its fragment.
    #[must_use]
    pub fn without_fragment(&self) -> Self {
        Self {
            fragment: None,
            ..self.clone()
        }
    }

    /// Whether both IDs address the same resource, ignoring fragments.
    #[must_use]
    pub fn same_resource(&self, other: &Self) -> bool {
        self.component == other.component
            && self.version == other.version
            && self.module == other.module
            && self.family == other.family
            && self.relative == other.relative
    }

    /// Whether [`Display`](fmt::Display) output parses back to this ID.
    ///
    /// The grammar cannot express a real version named `_` (it reads as
    /// the versionless marker) or a component, module or relative path
    /// containing `:`.
    #[must_use]
    pub fn round_trips(&self) -> bool {
        Self::parse(&self.to_string(), self, self.family).is_ok_and(|parsed| parsed == *self)
    }

    /// Relative path without its file extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        let name_start = self.relative.rfind('/').map_or(0, |i| i + 1);
        match self.relative[name_start..].rfind('.') {
            Some(dot) if dot > 0 => &self.relative[..name_start + dot],
            _ => &self.relative,
        }
    }
}

/// Split off a leading `version@`.
///
/// The candidate before the first `@` is a version only when it is
/// non-empty and free of `:`, so a relative path may start with `@`.
fn split_version(body: &str) -> (Option<&str>, &str) {
    match body.split_once('@') {
        Some((version, rest)) if !version.is_empty() && !version.contains(':') => {
            (Some(version), rest)
        }
        _ => (None, body),
    }
}

fn check_qualifier(value: Option<&str>, part: &'static str) -> Result<(), ParseError> {
    let Some(value) = value else {
        return Ok(());
    };
    for marker in ['$', '@'] {
        if value.contains(marker) {
            return Err(ParseError::MisplacedMarker { marker, part });
        }
    }
    Ok(())
}

impl fmt::Display for ResourceId {
    /// Fully qualified spec that parses back to the same ID.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.version.as_deref() {
            Some("") => write!(f, "{VERSIONLESS_MARKER}@")?,
            Some(version) => write!(f, "{version}@")?,
            None => {}
        }
        write!(
            f,
            "{}:{}:{}${}",
            self.component, self.module, self.family, self.relative
        )?;
        if let Some(fragment) = &self.fragment {
            write!(f, "#{fragment}")?;
        }
        Ok(())
    }
}
