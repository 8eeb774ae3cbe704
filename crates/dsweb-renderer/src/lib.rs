//! Markdown to HTML rendering for dsweb pages.
//!
//! [`MarkdownRenderer`] turns a page body into HTML. Every heading gets a
//! stable `id` anchor, and the configured heading levels are collected as a
//! table of contents.
//!
//! # Example
//!
//! ```
//! use dsweb_renderer::MarkdownRenderer;
//!
//! let result = MarkdownRenderer::new().render_markdown("## Setup\n\nText");
//! assert!(result.html.contains("<h2 id=\"setup\">Setup</h2>"));
//! assert_eq!(result.toc[0].id, "setup");
//! ```

mod renderer;
mod state;

pub use renderer::{MarkdownRenderer, RenderResult};
pub use state::{TocEntry, escape_html, slugify};
