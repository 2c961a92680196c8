//! Resource families.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::id::ParseError;

/// Content category of a resource.
///
/// The family determines where a resource lives inside a module
/// (`modules/<module>/<dirname>/`) and whether it is published.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    Page,
    Partial,
    Example,
    Image,
    Attachment,
    /// Redirect entry pointing at another resource through `rel`.
    Alias,
    Nav,
}

impl Family {
    /// Family name as written before the `$` marker.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Page => "page",
            Self::Partial => "partial",
            Self::Example => "example",
            Self::Image => "image",
            Self::Attachment => "attachment",
            Self::Alias => "alias",
            Self::Nav => "nav",
        }
    }

    /// Storage directory of the family inside a module.
    ///
    /// Aliases share the `pages` directory with the pages they replace.
    /// Navigation files sit directly in the module directory.
    #[must_use]
    pub const fn dirname(self) -> Option<&'static str> {
        match self {
            Self::Page | Self::Alias => Some("pages"),
            Self::Partial => Some("partials"),
            Self::Example => Some("examples"),
            Self::Image => Some("images"),
            Self::Attachment => Some("attachments"),
            Self::Nav => None,
        }
    }

    /// Whether entries of this family get a published URL.
    #[must_use]
    pub const fn is_published(self) -> bool {
        matches!(self, Self::Page | Self::Image | Self::Attachment)
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Family {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "page" => Ok(Self::Page),
            "partial" => Ok(Self::Partial),
            "example" => Ok(Self::Example),
            "image" => Ok(Self::Image),
            "attachment" => Ok(Self::Attachment),
            "alias" => Ok(Self::Alias),
            "nav" => Ok(Self::Nav),
            _ => Err(ParseError::UnknownFamily(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str_known_families() {
        assert_eq!("page".parse::<Family>().unwrap(), Family::Page);
        assert_eq!("partial".parse::<Family>().unwrap(), Family::Partial);
        assert_eq!("attachment".parse::<Family>().unwrap(), Family::Attachment);
    }

    #[test]
    fn test_from_str_unknown_family_is_error() {
        let err = "pages".parse::<Family>().unwrap_err();
        assert_eq!(err, ParseError::UnknownFamily("pages".to_owned()));
    }

    #[test]
    fn test_alias_shares_pages_directory() {
        assert_eq!(Family::Alias.dirname(), Family::Page.dirname());
        assert_eq!(Family::Nav.dirname(), None);
    }

    #[test]
    fn test_only_pages_images_attachments_publish() {
        assert!(Family::Page.is_published());
        assert!(Family::Image.is_published());
        assert!(Family::Attachment.is_published());
        assert!(!Family::Partial.is_published());
        assert!(!Family::Alias.is_published());
    }
}
