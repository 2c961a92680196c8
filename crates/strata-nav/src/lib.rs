//! Navigation and version model building for Strata.
//!
//! [`PageModelBuilder`] combines the page's position in its navigation
//! menus ([`nav_context`]) with its version history ([`page_versions`]) and
//! canonical URL into a [`PageModel`] for the template layer.

mod context;
mod link;
mod model;
mod versions;

pub use context::{NavContext, nav_context};
pub use link::NavLink;
pub use model::{PageModel, PageModelBuilder, SiteSettings};
pub use versions::{PageVersion, canonical_url, page_versions};
