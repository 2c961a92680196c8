//! Reference resolution for Strata.
//!
//! Converts `xref`, `image` and `include` targets found in a page into
//! links, relative to the page that contains them.

mod include;
mod reference;
mod relativize;

pub use include::Include;
pub use reference::{Reference, ReferenceConverter, ReferenceKind};
pub use relativize::relativize;
