//! Navigation tree types.
//!
//! Each component version carries a forest of navigation menus, one tree
//! per navigation file, in the order the files are registered. Trees are
//! built by an external collaborator and consumed read-only.

use serde::{Deserialize, Serialize};

/// Kind of link a navigation item points at.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrlType {
    /// Published page of this site.
    #[default]
    Internal,
    /// Off-site URL.
    External,
    /// Anchor on the page containing the menu.
    Fragment,
}

/// Navigation tree node.
///
/// An item without `url` is a category heading; it still takes part in
/// breadcrumb paths.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    /// Display text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Link target, possibly with a `#hash`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub url_type: UrlType,
    /// Fragment part of `url`, without `#`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Marks the top node of a navigation menu.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub root: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavItem>,
}

impl NavItem {
    /// Create a linked item.
    #[must_use]
    pub fn link(content: impl Into<String>, url: impl Into<String>) -> Self {
        let url = url.into();
        let hash = url.split_once('#').map(|(_, hash)| hash.to_owned());
        Self {
            content: Some(content.into()),
            url: Some(url),
            hash,
            ..Self::default()
        }
    }

    /// Create a category heading without a link.
    #[must_use]
    pub fn category(content: impl Into<String>) -> Self {
        Self {
            content: Some(content.into()),
            ..Self::default()
        }
    }

    /// Create a menu root.
    #[must_use]
    pub fn menu(content: Option<String>, items: Vec<NavItem>) -> Self {
        Self {
            content,
            root: true,
            items,
            ..Self::default()
        }
    }

    /// Add child items.
    #[must_use]
    pub fn with_items(mut self, items: Vec<NavItem>) -> Self {
        self.items = items;
        self
    }

    /// Set the URL type.
    #[must_use]
    pub fn with_url_type(mut self, url_type: UrlType) -> Self {
        self.url_type = url_type;
        self
    }

    /// URL with any `#hash` removed.
    #[must_use]
    pub fn url_without_hash(&self) -> Option<&str> {
        self.url
            .as_deref()
            .map(|url| url.split_once('#').map_or(url, |(path, _)| path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_extracts_hash() {
        let item = NavItem::link("Usage", "/comp/1.0/guide.html#usage");

        assert_eq!(item.hash.as_deref(), Some("usage"));
        assert_eq!(item.url_without_hash(), Some("/comp/1.0/guide.html"));
    }

    #[test]
    fn test_category_has_no_url() {
        let item = NavItem::category("Reference");

        assert!(item.url.is_none());
        assert!(item.url_without_hash().is_none());
    }

    #[test]
    fn test_deserialize_defaults() {
        let yaml = "content: Guide\nurl: /comp/1.0/guide.html\n";
        let item: NavItem = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(item.url_type, UrlType::Internal);
        assert!(!item.root);
        assert!(item.items.is_empty());
    }

    #[test]
    fn test_deserialize_nested_external() {
        let yaml = r"
root: true
items:
  - content: Home
    url: https://example.com
    urlType: external
";
        let item: NavItem = serde_yaml::from_str(yaml).unwrap();

        assert!(item.root);
        assert!(item.content.is_none());
        assert_eq!(item.items[0].url_type, UrlType::External);
    }
}
