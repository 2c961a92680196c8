use serde::Serialize;
use strata_catalog::{ComponentVersion, NavItem, UrlType};

/// A navigation entry as exposed to templates, without its children.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NavLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    pub url_type: UrlType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hash: Option<String>,
    /// Not part of any navigation tree.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub discrete: bool,
}

impl NavLink {
    /// Standalone link for a page that no menu contains.
    #[must_use]
    pub fn discrete(content: Option<String>, url: impl Into<String>) -> Self {
        Self {
            content,
            url: Some(url.into()),
            discrete: true,
            ..Self::default()
        }
    }

    /// Link to the landing page of a component version.
    #[must_use]
    pub fn landing(version: &ComponentVersion) -> Self {
        Self {
            content: Some(version.title.clone()),
            url: Some(version.url.clone()),
            ..Self::default()
        }
    }
}

impl From<&NavItem> for NavLink {
    fn from(item: &NavItem) -> Self {
        Self {
            content: item.content.clone(),
            url: item.url.clone(),
            url_type: item.url_type,
            hash: item.hash.clone(),
            discrete: false,
        }
    }
}
