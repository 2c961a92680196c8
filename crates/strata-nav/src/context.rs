//! Position of a page within its component version's navigation menus.
//!
//! Menus are searched in registration order and the first match wins, so
//! a page listed in several menus always gets the same breadcrumbs.
//! Previous and next are the nearest usable siblings of the matched item,
//! seeking upward through its ancestors when a level has none.

use strata_catalog::{ComponentVersion, NavItem, UrlType};

use crate::link::NavLink;

/// Breadcrumbs and neighbours of a page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NavContext {
    pub breadcrumbs: Vec<NavLink>,
    pub parent: Option<NavLink>,
    pub previous: Option<NavLink>,
    pub next: Option<NavLink>,
}

/// Locate the page at `page_url` in the menus of `version`.
///
/// A page found in no menu gets a single discrete breadcrumb titled
/// `title`. If that page is the landing page of the version, `next` points
/// at the first page of the first menu.
#[must_use]
pub fn nav_context(version: &ComponentVersion, page_url: &str, title: Option<&str>) -> NavContext {
    for (index, tree) in version.navigation.iter().enumerate() {
        let mut path = Vec::new();
        if !find_path(tree, page_url, &mut path) {
            continue;
        }
        let Some((&matched, ancestors)) = path.split_last() else {
            continue;
        };

        let synthetic_root =
            ancestors.first().is_some_and(|root| root.content.is_none() && root.url.is_none());
        let breadcrumbs = path
            .iter()
            .skip(usize::from(synthetic_root))
            .map(|&item| NavLink::from(item))
            .collect();
        let parent = ancestors
            .iter()
            .rev()
            .find(|item| item.url.is_some() && item.url_type == UrlType::Internal)
            .map(|&item| NavLink::from(item));

        let mut previous = seek(&path, |siblings, at| {
            siblings[..at].iter().rev().find(|item| is_step(item, page_url))
        })
        .map(NavLink::from);
        let next = seek(&path, |siblings, at| {
            siblings[at + 1..].iter().find(|item| is_step(item, page_url))
        })
        .map(NavLink::from);

        let first_page = first_link(tree, &|item: &NavItem| {
            item.url.is_some() && item.url_type == UrlType::Internal
        })
        .is_some_and(|item| std::ptr::eq(item, matched));
        if previous.is_none() && index == 0 && first_page && page_url != version.url {
            previous = Some(NavLink::landing(version));
        }

        tracing::debug!(url = page_url, menu = index, depth = path.len(), "Page found in navigation");
        return NavContext {
            breadcrumbs,
            parent,
            previous,
            next,
        };
    }

    let next = if page_url == version.url {
        version
            .navigation
            .first()
            .and_then(|tree| first_link(tree, &|item: &NavItem| is_step(item, page_url)))
            .map(NavLink::from)
    } else {
        None
    };

    NavContext {
        breadcrumbs: vec![NavLink::discrete(title.map(str::to_owned), page_url)],
        parent: None,
        previous: None,
        next,
    }
}

/// Depth-first search for the first internal item linking to `page_url`.
///
/// On success `path` holds the items from the menu root down to the match.
fn find_path<'n>(item: &'n NavItem, page_url: &str, path: &mut Vec<&'n NavItem>) -> bool {
    path.push(item);
    if item.url_type == UrlType::Internal && item.url_without_hash() == Some(page_url) {
        return true;
    }
    for child in &item.items {
        if find_path(child, page_url, path) {
            return true;
        }
    }
    path.pop();
    false
}

/// Scan the sibling list of each item on `path`, innermost first.
///
/// `pick` receives the siblings and the position of the path item among
/// them. The menu root has no siblings and ends the search.
fn seek<'n>(
    path: &[&'n NavItem],
    pick: impl Fn(&'n [NavItem], usize) -> Option<&'n NavItem>,
) -> Option<&'n NavItem> {
    path.windows(2).rev().find_map(|pair| {
        let siblings = pair[0].items.as_slice();
        let at = siblings.iter().position(|item| std::ptr::eq(item, pair[1]))?;
        pick(siblings, at)
    })
}

/// First item in document order matching `accept`.
fn first_link<'n>(item: &'n NavItem, accept: &dyn Fn(&NavItem) -> bool) -> Option<&'n NavItem> {
    if accept(item) {
        return Some(item);
    }
    item.items.iter().find_map(|child| first_link(child, accept))
}

/// Whether `item` can be a previous/next link for the page at `page_url`.
fn is_step(item: &NavItem, page_url: &str) -> bool {
    item.url.is_some()
        && item.url_type == UrlType::Internal
        && item.url_without_hash() != Some(page_url)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn version(navigation: Vec<NavItem>) -> ComponentVersion {
        ComponentVersion::new("comp", "1.0", "Comp", "/comp/1.0/index.html").with_navigation(navigation)
    }

    fn menu() -> NavItem {
        NavItem::menu(
            None,
            vec![
                NavItem::link("Install", "/comp/1.0/install.html").with_items(vec![
                    NavItem::link("Linux", "/comp/1.0/install/linux.html"),
                    NavItem::link("Linux Tips", "/comp/1.0/install/linux.html#tips"),
                    NavItem::link("Mac", "/comp/1.0/install/mac.html"),
                ]),
                NavItem::category("Reference").with_items(vec![
                    NavItem::link("Upstream", "https://example.com").with_url_type(UrlType::External),
                    NavItem::link("CLI", "/comp/1.0/cli.html"),
                ]),
            ],
        )
    }

    fn contents(links: &[NavLink]) -> Vec<&str> {
        links.iter().filter_map(|l| l.content.as_deref()).collect()
    }

    #[test]
    fn test_breadcrumbs_drop_untitled_root() {
        let context = nav_context(&version(vec![menu()]), "/comp/1.0/install/mac.html", None);

        assert_eq!(contents(&context.breadcrumbs), vec!["Install", "Mac"]);
        assert_eq!(
            context.parent.and_then(|p| p.url).as_deref(),
            Some("/comp/1.0/install.html")
        );
    }

    #[test]
    fn test_breadcrumbs_include_categories() {
        let context = nav_context(&version(vec![menu()]), "/comp/1.0/cli.html", None);

        assert_eq!(contents(&context.breadcrumbs), vec!["Reference", "CLI"]);
        assert_eq!(context.parent, None);
    }

    #[test]
    fn test_titled_root_is_kept() {
        let titled = NavItem::menu(
            Some("Guide".to_owned()),
            vec![NavItem::link("Start", "/comp/1.0/start.html")],
        );

        let context = nav_context(&version(vec![titled]), "/comp/1.0/start.html", None);

        assert_eq!(contents(&context.breadcrumbs), vec!["Guide", "Start"]);
    }

    #[test]
    fn test_first_menu_wins() {
        let second = NavItem::menu(
            Some("Other".to_owned()),
            vec![NavItem::link("Mac again", "/comp/1.0/install/mac.html")],
        );

        let context = nav_context(
            &version(vec![menu(), second]),
            "/comp/1.0/install/mac.html",
            None,
        );

        assert_eq!(contents(&context.breadcrumbs), vec!["Install", "Mac"]);
    }

    #[test]
    fn test_neighbours_skip_same_page_hash() {
        let context = nav_context(&version(vec![menu()]), "/comp/1.0/install/linux.html", None);

        assert_eq!(context.previous, None);
        assert_eq!(context.next.and_then(|n| n.content).as_deref(), Some("Mac"));
    }

    #[test]
    fn test_previous_is_sibling_of_ancestor() {
        let context = nav_context(&version(vec![menu()]), "/comp/1.0/cli.html", None);

        assert_eq!(
            context.previous.and_then(|p| p.content).as_deref(),
            Some("Install")
        );
    }

    #[test]
    fn test_next_does_not_descend_into_children() {
        let context = nav_context(&version(vec![menu()]), "/comp/1.0/install.html", None);

        assert_eq!(context.next, None);
    }

    #[test]
    fn test_neighbours_seek_upward_past_external_links() {
        let guide = NavItem::menu(
            None,
            vec![
                NavItem::link("Start", "/comp/1.0/start.html"),
                NavItem::link("Guide", "/comp/1.0/guide.html").with_items(vec![
                    NavItem::link("Upstream", "https://example.com").with_url_type(UrlType::External),
                    NavItem::link("Step", "/comp/1.0/guide/step.html"),
                ]),
                NavItem::link("End", "/comp/1.0/end.html"),
            ],
        );

        let context = nav_context(&version(vec![guide]), "/comp/1.0/guide/step.html", None);

        assert_eq!(
            context.previous.and_then(|p| p.content).as_deref(),
            Some("Start")
        );
        assert_eq!(context.next.and_then(|n| n.content).as_deref(), Some("End"));
    }

    #[test]
    fn test_untitled_inner_item_stays_in_breadcrumbs() {
        let nested = NavItem::menu(
            Some("Guide".to_owned()),
            vec![NavItem::default().with_items(vec![NavItem::link("Deep", "/comp/1.0/deep.html")])],
        );

        let context = nav_context(&version(vec![nested]), "/comp/1.0/deep.html", None);

        assert_eq!(context.breadcrumbs.len(), 3);
    }

    #[test]
    fn test_first_page_gets_landing_as_previous() {
        let context = nav_context(&version(vec![menu()]), "/comp/1.0/install.html", None);

        assert_eq!(
            context.previous,
            Some(NavLink {
                content: Some("Comp".to_owned()),
                url: Some("/comp/1.0/index.html".to_owned()),
                ..NavLink::default()
            })
        );
    }

    #[test]
    fn test_last_page_has_no_next() {
        let context = nav_context(&version(vec![menu()]), "/comp/1.0/cli.html", None);

        assert_eq!(context.next, None);
    }

    #[test]
    fn test_unlisted_page_is_discrete() {
        let context = nav_context(
            &version(vec![menu()]),
            "/comp/1.0/hidden.html",
            Some("Hidden"),
        );

        assert_eq!(
            context.breadcrumbs,
            vec![NavLink::discrete(
                Some("Hidden".to_owned()),
                "/comp/1.0/hidden.html"
            )]
        );
        assert_eq!(context.previous, None);
        assert_eq!(context.next, None);
    }

    #[test]
    fn test_unlisted_start_page_links_to_first_entry() {
        let context = nav_context(&version(vec![menu()]), "/comp/1.0/index.html", Some("Home"));

        assert!(context.breadcrumbs[0].discrete);
        assert_eq!(
            context.next.and_then(|n| n.url).as_deref(),
            Some("/comp/1.0/install.html")
        );
    }

    #[test]
    fn test_no_navigation() {
        let context = nav_context(&version(Vec::new()), "/comp/1.0/a.html", None);

        assert_eq!(context.breadcrumbs.len(), 1);
        assert_eq!(context.breadcrumbs[0].content, None);
    }
}
