//! Published URL computation.

use serde::Deserialize;

use crate::family::Family;
use crate::id::{ROOT_MODULE, ResourceId};

/// How page URLs are shaped.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HtmlExtensionStyle {
    /// `page.html`
    #[default]
    Default,
    /// `page`, with `index` pages published as their directory.
    Drop,
    /// `page/`, with `index` pages published as their directory.
    Indexify,
}

/// Compute the root-relative URL a resource is published at.
///
/// Returns `None` for families that are not published.
#[must_use]
pub fn publish_url(id: &ResourceId, style: HtmlExtensionStyle) -> Option<String> {
    if !id.family.is_published() {
        return None;
    }

    let mut url = format!("/{}/", id.component);
    if let Some(version) = id.version.as_deref().filter(|v| !v.is_empty()) {
        url.push_str(version);
        url.push('/');
    }
    if id.module != ROOT_MODULE {
        url.push_str(&id.module);
        url.push('/');
    }

    match id.family {
        Family::Page => {
            let stem = id.stem();
            let (dir, name) = stem.rsplit_once('/').map_or(("", stem), |(d, n)| (d, n));
            if !dir.is_empty() {
                url.push_str(dir);
                url.push('/');
            }
            match style {
                HtmlExtensionStyle::Default => {
                    url.push_str(name);
                    url.push_str(".html");
                }
                HtmlExtensionStyle::Drop if name != "index" => url.push_str(name),
                HtmlExtensionStyle::Indexify if name != "index" => {
                    url.push_str(name);
                    url.push('/');
                }
                HtmlExtensionStyle::Drop | HtmlExtensionStyle::Indexify => {}
            }
        }
        Family::Image => {
            url.push_str("_images/");
            url.push_str(&id.relative);
        }
        Family::Attachment => {
            url.push_str("_attachments/");
            url.push_str(&id.relative);
        }
        _ => return None,
    }

    Some(url)
}
