//! Site structure for dsweb.
//!
//! This crate provides:
//! - [`Indexer`]: filters content and folds it into per-section navigation
//!   trees, page plans and redirects
//! - [`NavGroup`]: the navigation tree
//! - [`render_sidebar`]: sidebar HTML driven by an explicit [`SidebarState`]
//! - Blog, release and tutorial listings
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::PathBuf;
//! use dsweb_content::FsContentSource;
//! use dsweb_site::{Indexer, IndexerConfig, Section, SidebarState, render_sidebar};
//!
//! let source = FsContentSource::new(PathBuf::from("content"), "https://example.com/edit");
//! let index = Indexer::new(IndexerConfig::default()).index_source(&source)?;
//!
//! if let Some(docs) = index.navigation(Section::Docs) {
//!     let location = "/docs/core/events/";
//!     let html = render_sidebar(docs, location, &SidebarState::from_location(location), false);
//! }
//! # Ok(())
//! # }
//! ```

mod indexer;
mod listings;
mod navigation;
mod sidebar;

pub use indexer::{
    IndexError, Indexer, IndexerConfig, PageSpec, Section, SiteIndex, UnknownSection,
};
pub use listings::{
    BlogEntry, DEFAULT_POST_KIND, ReleaseEntry, TutorialEntry, blog_entries,
    releases_by_component, tutorial_categories,
};
pub use navigation::{NavError, NavGroup, NavLeaf, NavNode, RESERVED_KEY};
pub use sidebar::{GroupState, SidebarState, render_sidebar};
