//! Relative URL computation between published pages.
//!
//! URLs are root-relative. A URL ending in `/` is a directory (indexified);
//! anything else is a file, with or without an extension.

/// Compute the href that leads from the page at `from` to `to`.
///
/// `fragment` is appended verbatim and must include its leading `#` when
/// non-empty. Linking a page to itself yields just the fragment, which is
/// the empty string when there is none. A target that is not root-relative
/// is returned as-is.
#[must_use]
pub fn relativize(from: &str, to: &str, fragment: &str) -> String {
    if !to.starts_with('/') {
        return format!("{to}{fragment}");
    }
    if from == to {
        return fragment.to_owned();
    }

    let from_dir = directory_segments(from);
    let to_is_dir = to.ends_with('/');
    let to_segments = segments(to);
    let to_dir_len = if to_is_dir {
        to_segments.len()
    } else {
        to_segments.len().saturating_sub(1)
    };

    let common = from_dir
        .iter()
        .zip(&to_segments[..to_dir_len])
        .take_while(|(a, b)| a == b)
        .count();

    let mut href = "../".repeat(from_dir.len() - common);
    href.push_str(&to_segments[common..].join("/"));
    if to_is_dir && common < to_segments.len() {
        href.push('/');
    }
    if href.is_empty() {
        href.push_str("./");
    }
    href.push_str(fragment);
    href
}

fn segments(url: &str) -> Vec<&str> {
    url.split('/').filter(|s| !s.is_empty()).collect()
}

/// Segments of the directory a URL is served from.
fn directory_segments(url: &str) -> Vec<&str> {
    let mut segments = segments(url);
    if !url.ends_with('/') {
        segments.pop();
    }
    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_url_is_fragment_only() {
        assert_eq!(relativize("/c/v/m/a.html", "/c/v/m/a.html", ""), "");
        assert_eq!(relativize("/c/v/m/a.html", "/c/v/m/a.html", "#f"), "#f");
        assert_eq!(relativize("/c/v/", "/c/v/", ""), "");
    }

    #[test]
    fn test_siblings() {
        assert_eq!(relativize("/c/v/m/a.html", "/c/v/m/b.html", ""), "b.html");
        assert_eq!(relativize("/c/v/m/b.html", "/c/v/m/a.html", ""), "a.html");
    }

    #[test]
    fn test_indexified_target_in_same_directory() {
        assert_eq!(relativize("/c/1.0/topic/x.html", "/c/1.0/topic/", ""), "./");
        assert_eq!(relativize("/c/1.0/topic/x.html", "/c/1.0/topic/", "#top"), "./#top");
    }

    #[test]
    fn test_up_and_across() {
        assert_eq!(
            relativize("/c/1.0/admin/setup.html", "/c/2.0/index.html", ""),
            "../../2.0/index.html"
        );
        assert_eq!(
            relativize("/c/1.0/setup.html", "/other/1.0/ops/run.html", "#step-2"),
            "../../other/1.0/ops/run.html#step-2"
        );
    }

    #[test]
    fn test_indexified_source() {
        assert_eq!(relativize("/c/1.0/setup/", "/c/1.0/usage/", ""), "../usage/");
        assert_eq!(relativize("/c/1.0/", "/c/1.0/setup/", ""), "setup/");
        assert_eq!(relativize("/c/1.0/setup/", "/c/1.0/", ""), "../");
    }

    #[test]
    fn test_extensionless() {
        assert_eq!(relativize("/c/1.0/a", "/c/1.0/b", ""), "b");
        assert_eq!(relativize("/c/1.0/a/b", "/c/1.0/a", ""), "../a");
        assert_eq!(relativize("/c/1.0/a", "/c/1.0/", ""), "./");
    }

    #[test]
    fn test_site_root_target() {
        assert_eq!(relativize("/c/1.0/a.html", "/", ""), "../../");
    }

    #[test]
    fn test_absolute_target_passes_through() {
        assert_eq!(
            relativize("/c/1.0/a.html", "https://example.com/x", "#y"),
            "https://example.com/x#y"
        );
    }
}
