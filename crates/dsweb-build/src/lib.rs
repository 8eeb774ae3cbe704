//! Static site generation for dsweb.
//!
//! [`StaticSiteBuilder`] queries a content source, indexes it and writes
//! one HTML file per page, plus the blog and release listings and redirect
//! pages, to an output directory.

mod builder;
mod template;

pub use builder::{BuildConfig, BuildError, BuildReport, StaticSiteBuilder};
