//! Content query interface for the dsweb site build.
//!
//! This crate provides a [`ContentSource`] trait that abstracts where markdown
//! content comes from, and the derivation of per-document fields the rest of
//! the build depends on:
//!
//! - `weighted_slug`: permalink or file path, ordering prefixes intact
//! - `slug`: the canonical URL with ordering prefixes stripped
//! - `github_link`: "edit this page" URL
//! - redirect sources declared by front matter
//!
//! # Architecture
//!
//! - [`ContentSource`] trait with a single `query()` method
//! - [`FsContentSource`] walks a content directory
//! - [`MockContentSource`] for testing (behind `mock` feature flag)
//!
//! # Example
//!
//! ```no_run
//! use std::path::PathBuf;
//! use dsweb_content::{ContentSource, FsContentSource};
//!
//! let source = FsContentSource::new(PathBuf::from("content"), "https://example.com/edit");
//! for node in source.query()? {
//!     println!("{} -> {}", node.weighted_slug, node.slug);
//! }
//! # Ok::<(), dsweb_content::ContentError>(())
//! ```

mod fields;
mod front_matter;
mod fs;
#[cfg(feature = "mock")]
mod mock;
mod scanner;
mod source;
mod weight;

pub use fields::{build_redirects, derive_slug, titlecase_from_slug};
pub use front_matter::{FrontMatter, split_front_matter};
pub use fs::FsContentSource;
#[cfg(feature = "mock")]
pub use mock::MockContentSource;
pub use source::{ContentError, ContentErrorKind, ContentNode, ContentSource};
pub use weight::{DEFAULT_ORDER, WeightPattern, strip_weight_prefix};
