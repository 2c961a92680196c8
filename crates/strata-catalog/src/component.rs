//! Components and component versions.

use crate::navigation::NavItem;

/// One version of a component.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComponentVersion {
    pub component: String,
    /// Version string; empty for a versionless component.
    pub version: String,
    pub title: String,
    /// Version label shown to readers (falls back to `version`).
    pub display_version: Option<String>,
    pub prerelease: bool,
    /// Landing page URL.
    pub url: String,
    /// Navigation menus in registration order.
    pub navigation: Vec<NavItem>,
}

impl ComponentVersion {
    /// Create a component version with an empty navigation.
    #[must_use]
    pub fn new(
        component: impl Into<String>,
        version: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            version: version.into(),
            title: title.into(),
            display_version: None,
            prerelease: false,
            url: url.into(),
            navigation: Vec::new(),
        }
    }

    /// Mark as prerelease.
    #[must_use]
    pub fn prerelease(mut self) -> Self {
        self.prerelease = true;
        self
    }

    /// Set navigation menus.
    #[must_use]
    pub fn with_navigation(mut self, navigation: Vec<NavItem>) -> Self {
        self.navigation = navigation;
        self
    }

    /// Label shown to readers.
    #[must_use]
    pub fn display_version(&self) -> &str {
        self.display_version.as_deref().unwrap_or(&self.version)
    }
}

/// A component with its versions, newest first.
///
/// The order is supplied by the corpus builder and is never re-sorted here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Component {
    pub name: String,
    pub versions: Vec<ComponentVersion>,
}

impl Component {
    /// Newest non-prerelease version, or the newest version if all are
    /// prereleases.
    #[must_use]
    pub fn latest(&self) -> Option<&ComponentVersion> {
        self.versions
            .iter()
            .find(|v| !v.prerelease)
            .or_else(|| self.versions.first())
    }

    /// Look up a version by its version string.
    #[must_use]
    pub fn version(&self, version: &str) -> Option<&ComponentVersion> {
        self.versions.iter().find(|v| v.version == version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(versions: Vec<ComponentVersion>) -> Component {
        Component {
            name: "comp".to_owned(),
            versions,
        }
    }

    #[test]
    fn test_latest_skips_prereleases() {
        let comp = component(vec![
            ComponentVersion::new("comp", "3.0", "Comp", "/comp/3.0/").prerelease(),
            ComponentVersion::new("comp", "2.0", "Comp", "/comp/2.0/"),
            ComponentVersion::new("comp", "1.0", "Comp", "/comp/1.0/"),
        ]);

        assert_eq!(comp.latest().unwrap().version, "2.0");
    }

    #[test]
    fn test_latest_all_prereleases_returns_newest() {
        let comp = component(vec![
            ComponentVersion::new("comp", "2.0-beta", "Comp", "/comp/2.0-beta/").prerelease(),
            ComponentVersion::new("comp", "1.0-beta", "Comp", "/comp/1.0-beta/").prerelease(),
        ]);

        assert_eq!(comp.latest().unwrap().version, "2.0-beta");
    }

    #[test]
    fn test_latest_empty_component() {
        assert!(component(Vec::new()).latest().is_none());
    }

    #[test]
    fn test_display_version_falls_back_to_version() {
        let mut cv = ComponentVersion::new("comp", "2.0", "Comp", "/comp/2.0/");
        assert_eq!(cv.display_version(), "2.0");

        cv.display_version = Some("2.0 LTS".to_owned());
        assert_eq!(cv.display_version(), "2.0 LTS");
    }
}
