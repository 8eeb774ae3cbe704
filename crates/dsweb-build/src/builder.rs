//! Static site builder.
//!
//! # Output Layout
//!
//! - A URL ending in `/` is written to `<url>index.html`
//! - A URL ending in `.html` is written as-is
//! - Any other URL is treated as a directory
//!
//! Pages are rendered and written in parallel; listings and redirects
//! follow once every page path is known.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

use dsweb_content::ContentSource;
use dsweb_renderer::MarkdownRenderer;
use dsweb_site::{
    IndexError, Indexer, IndexerConfig, PageSpec, SidebarState, SiteIndex, blog_entries,
    releases_by_component, render_sidebar, tutorial_categories,
};
use rayon::prelude::*;

use crate::template::{
    PageData, SiteData, render_blog_listing, render_not_found, render_page, render_redirect,
    render_release_listing, render_tutorial_listing,
};

const BLOG_LISTING_PATH: &str = "blog/index.html";
const RELEASES_LISTING_PATH: &str = "releases/index.html";
const TUTORIALS_LISTING_PATH: &str = "tutorials/index.html";
const NOT_FOUND_PATH: &str = "404.html";

/// Configuration for static site building.
#[derive(Clone, Debug, Default)]
pub struct BuildConfig {
    pub site_title: String,
    pub site_description: Option<String>,
    pub indexer: IndexerConfig,
    /// Prefix sidebar leaves with their position.
    pub sidebar_numbers: bool,
}

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error(transparent)]
    Index(#[from] IndexError),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Counts of what a build wrote.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub pages: usize,
    pub listings: usize,
    pub redirects: usize,
    /// Pages and redirects left out because their path was taken.
    pub skipped: usize,
}

/// Builds a static site from a content source.
pub struct StaticSiteBuilder {
    source: Arc<dyn ContentSource>,
    config: BuildConfig,
    renderer: MarkdownRenderer,
}

impl StaticSiteBuilder {
    #[must_use]
    pub fn new(source: Arc<dyn ContentSource>, config: BuildConfig) -> Self {
        Self {
            source,
            config,
            renderer: MarkdownRenderer::new(),
        }
    }

    /// Build the site into `output_dir`.
    ///
    /// # Errors
    ///
    /// Fails if the content query fails, two documents declare the same
    /// redirect, or an output file cannot be written.
    pub fn build(&self, output_dir: &Path) -> Result<BuildReport, BuildError> {
        let index = Indexer::new(self.config.indexer.clone()).index_source(self.source.as_ref())?;
        create_dir(output_dir)?;

        let mut report = BuildReport::default();
        let mut taken = HashSet::new();
        let mut planned = Vec::with_capacity(index.pages().len());
        for page in index.pages() {
            let Some(path) = output_path(page.url()) else {
                tracing::warn!(url = %page.url(), "Skipping page with unsafe URL");
                report.skipped += 1;
                continue;
            };
            if taken.insert(path.clone()) {
                planned.push((page, path));
            } else {
                tracing::warn!(
                    url = %page.url(),
                    path = %path.display(),
                    "Skipping page, output path already used"
                );
                report.skipped += 1;
            }
        }

        let site = SiteData {
            title: &self.config.site_title,
            description: self.config.site_description.as_deref(),
        };
        planned
            .par_iter()
            .map(|(page, path)| self.write_page(&site, &index, page, &output_dir.join(path)))
            .collect::<Result<Vec<()>, BuildError>>()?;
        report.pages = planned.len();

        report.listings = write_listings(&site, &index, output_dir, &mut taken)?;
        write_redirects(&index, output_dir, &taken, &mut report)?;

        tracing::info!(
            pages = report.pages,
            listings = report.listings,
            redirects = report.redirects,
            skipped = report.skipped,
            "Site built"
        );
        Ok(report)
    }

    fn write_page(
        &self,
        site: &SiteData<'_>,
        index: &SiteIndex,
        page: &PageSpec,
        path: &Path,
    ) -> Result<(), BuildError> {
        let node = &page.node;
        let rendered = self.renderer.render_markdown(&node.body);
        let url = page.url();
        let sidebar = index
            .navigation(page.section)
            .map(|nav| {
                render_sidebar(
                    nav,
                    url,
                    &SidebarState::from_location(url),
                    self.config.sidebar_numbers,
                )
            })
            .unwrap_or_default();

        let html = render_page(
            site,
            &PageData {
                title: &node.title,
                description: node.description.as_deref(),
                edit_link: &node.github_link,
                html_content: &rendered.html,
                toc: &rendered.toc,
                sidebar: &sidebar,
                section: page.section.as_str(),
            },
        );
        tracing::debug!(url = %url, path = %path.display(), "Writing page");
        write_file(path, &html)
    }
}

fn write_listings(
    site: &SiteData<'_>,
    index: &SiteIndex,
    output_dir: &Path,
    taken: &mut HashSet<PathBuf>,
) -> Result<usize, BuildError> {
    let mut written = 0;

    let entries = blog_entries(index);
    if !entries.is_empty() && taken.insert(PathBuf::from(BLOG_LISTING_PATH)) {
        write_file(
            &output_dir.join(BLOG_LISTING_PATH),
            &render_blog_listing(site, &entries),
        )?;
        written += 1;
    }

    let releases = releases_by_component(index);
    if !releases.is_empty() && taken.insert(PathBuf::from(RELEASES_LISTING_PATH)) {
        write_file(
            &output_dir.join(RELEASES_LISTING_PATH),
            &render_release_listing(site, &releases),
        )?;
        written += 1;
    }

    let tutorials = tutorial_categories(index);
    if !tutorials.is_empty() && taken.insert(PathBuf::from(TUTORIALS_LISTING_PATH)) {
        write_file(
            &output_dir.join(TUTORIALS_LISTING_PATH),
            &render_tutorial_listing(site, &tutorials),
        )?;
        written += 1;
    }

    if taken.insert(PathBuf::from(NOT_FOUND_PATH)) {
        write_file(&output_dir.join(NOT_FOUND_PATH), &render_not_found(site))?;
        written += 1;
    }

    Ok(written)
}

fn write_redirects(
    index: &SiteIndex,
    output_dir: &Path,
    taken: &HashSet<PathBuf>,
    report: &mut BuildReport,
) -> Result<(), BuildError> {
    let mut written = HashSet::new();
    for (source, target) in index.redirects() {
        let Some(path) = output_path(source) else {
            tracing::warn!(redirect = %source, "Skipping redirect with unsafe path");
            report.skipped += 1;
            continue;
        };
        if taken.contains(&path) {
            tracing::warn!(
                redirect = %source,
                target = %target,
                "Skipping redirect that collides with a page"
            );
            report.skipped += 1;
            continue;
        }
        // `/a` and `/a/` share an output file.
        if !written.insert(path.clone()) {
            continue;
        }
        write_file(&output_dir.join(&path), &render_redirect(target))?;
        report.redirects += 1;
    }
    Ok(())
}

/// Output file for a URL, relative to the output directory.
///
/// Returns `None` for URLs that would escape the output directory.
fn output_path(url: &str) -> Option<PathBuf> {
    let relative = Path::new(url.trim_start_matches('/'));
    if !relative
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        return None;
    }
    if url.ends_with(".html") {
        Some(relative.to_path_buf())
    } else {
        Some(relative.join("index.html"))
    }
}

fn create_dir(path: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn write_file(path: &Path, contents: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    fs::write(path, contents).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use dsweb_content::MockContentSource;
    use pretty_assertions::assert_eq;
    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(StaticSiteBuilder: Send, Sync);

    fn builder(source: MockContentSource) -> StaticSiteBuilder {
        StaticSiteBuilder::new(
            Arc::new(source),
            BuildConfig {
                site_title: "deepstream.io".to_owned(),
                ..BuildConfig::default()
            },
        )
    }

    fn read(root: &Path, path: &str) -> String {
        fs::read_to_string(root.join(path)).unwrap()
    }

    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path("/docs/core/events/"),
            Some(PathBuf::from("docs/core/events/index.html"))
        );
        assert_eq!(
            output_path("/docs/client.html"),
            Some(PathBuf::from("docs/client.html"))
        );
        assert_eq!(
            output_path("/docs/client"),
            Some(PathBuf::from("docs/client/index.html"))
        );
        assert_eq!(output_path("/"), Some(PathBuf::from("index.html")));
        assert_eq!(output_path("/../etc/passwd.html"), None);
    }

    #[test]
    fn test_build_writes_pages_with_sidebar() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = MockContentSource::new()
            .with_file(
                "docs/10-core/20-events/index.md",
                "---\ntitle: Events\n---\n## Subscribing\n\nText",
            )
            .with_file("docs/10-core/10-records/index.md", "---\ntitle: Records\n---\n");

        let report = builder(source).build(temp_dir.path()).unwrap();

        assert_eq!(report.pages, 2);
        assert_eq!(report.listings, 1);
        assert!(read(temp_dir.path(), "404.html").contains("Page not found"));
        let html = read(temp_dir.path(), "docs/core/events/index.html");
        assert!(html.contains("<h1>Events</h1>"));
        assert!(html.contains("<h2 id=\"subscribing\">Subscribing</h2>"));
        assert!(html.contains(
            "<li class=\"leaf active\"><a href=\"/docs/core/events/\">- Events</a></li>"
        ));
        assert!(html.contains("href=\"https://example.com/edit/docs/10-core/20-events/index.md\""));
        assert!(html.find("Records").unwrap() < html.find("- Events").unwrap());
    }

    #[test]
    fn test_build_skips_filtered_documents() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = MockContentSource::new()
            .with_file("docs/10-a/index.md", "---\ntitle: A\ndraft: true\n---\n")
            .with_file("docs/20-b/index.md", "---\ntitle: B\ndeepstreamHub: true\n---\n");

        let report = builder(source).build(temp_dir.path()).unwrap();

        assert_eq!(report.pages, 0);
        assert!(!temp_dir.path().join("docs/a/index.html").exists());
    }

    #[test]
    fn test_build_writes_listings() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = MockContentSource::new()
            .with_file("blog/20200101-post-a/index.md", "---\ntitle: Post A\n---\n")
            .with_file("blog/20200601-post-b/index.md", "---\ntitle: Post B\n---\n")
            .with_file(
                "releases/server/v4-2-0/index.md",
                "---\ntitle: Server 4.2\n---\n",
            );

        let report = builder(source).build(temp_dir.path()).unwrap();

        assert_eq!(report.pages, 3);
        assert_eq!(report.listings, 3);
        let blog = read(temp_dir.path(), "blog/index.html");
        assert!(blog.find("Post B").unwrap() < blog.find("Post A").unwrap());
        let releases = read(temp_dir.path(), "releases/index.html");
        assert!(releases.contains("<span class=\"version\">v4.2.0</span>"));
    }

    #[test]
    fn test_content_page_owns_listing_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = MockContentSource::new()
            .with_file("blog/index.md", "---\ntitle: Our Blog\n---\n")
            .with_file("blog/20200101-post-a/index.md", "---\ntitle: Post A\n---\n");

        let report = builder(source).build(temp_dir.path()).unwrap();

        assert_eq!(report.listings, 1);
        assert!(read(temp_dir.path(), "blog/index.html").contains("<h1>Our Blog</h1>"));
    }

    #[test]
    fn test_build_writes_tutorial_overview() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = MockContentSource::new()
            .with_file(
                "tutorials/core/datasync/records/index.md",
                "---\ntitle: Records\ndescription: Synced state\n---\n",
            )
            .with_file("tutorials/core/pubsub/index.md", "---\ntitle: Events\n---\n");

        let report = builder(source).build(temp_dir.path()).unwrap();

        assert_eq!(report.pages, 2);
        assert_eq!(report.listings, 2);
        let overview = read(temp_dir.path(), "tutorials/index.html");
        assert!(overview.contains("<h3>datasync</h3>"));
        assert!(overview.contains("href=\"/tutorials/core/datasync/records/\""));
        assert!(overview.contains("<p class=\"description\">Synced state</p>"));
        assert!(overview.find("datasync").unwrap() < overview.find("pubsub").unwrap());
    }

    #[test]
    fn test_content_page_owns_tutorial_overview_path() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = MockContentSource::new()
            .with_file("tutorials/index.md", "---\ntitle: Learn\n---\n")
            .with_file("tutorials/core/pubsub/index.md", "---\ntitle: Events\n---\n");

        let report = builder(source).build(temp_dir.path()).unwrap();

        assert_eq!(report.listings, 1);
        assert!(read(temp_dir.path(), "tutorials/index.html").contains("<h1>Learn</h1>"));
    }

    #[test]
    fn test_build_writes_redirects() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = MockContentSource::new().with_file(
            "docs/10-client.md",
            "---\ntitle: Client\npermalink: /docs/client.html\nredirect_from:\n  - /old/client/\n---\n",
        );

        let report = builder(source).build(temp_dir.path()).unwrap();

        // `/docs/client` and `/docs/client/` share one file.
        assert_eq!(report.redirects, 2);
        assert!(temp_dir.path().join("docs/client.html").exists());
        let redirect = read(temp_dir.path(), "docs/client/index.html");
        assert!(redirect.contains("url=/docs/client.html"));
        assert!(read(temp_dir.path(), "old/client/index.html").contains("url=/docs/client.html"));
    }

    #[test]
    fn test_redirect_colliding_with_page_is_skipped() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = MockContentSource::new()
            .with_file("docs/10-a/index.md", "---\ntitle: A\nredirect_from: /docs/b/\n---\n")
            .with_file("docs/20-b/index.md", "---\ntitle: B\n---\n");

        let report = builder(source).build(temp_dir.path()).unwrap();

        assert_eq!(report.redirects, 0);
        assert_eq!(report.skipped, 1);
        assert!(read(temp_dir.path(), "docs/b/index.html").contains("<h1>B</h1>"));
    }

    #[test]
    fn test_duplicate_redirect_fails_build() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = MockContentSource::new()
            .with_file("docs/10-a/index.md", "---\nredirect_from: /old/\n---\n")
            .with_file("docs/20-b/index.md", "---\nredirect_from: /old/\n---\n");

        let err = builder(source).build(temp_dir.path()).unwrap_err();

        assert!(matches!(
            err,
            BuildError::Index(IndexError::DuplicateRedirect { .. })
        ));
    }

    #[test]
    fn test_query_failure_fails_build() {
        let temp_dir = tempfile::tempdir().unwrap();
        let err = builder(MockContentSource::new().failing())
            .build(temp_dir.path())
            .unwrap_err();
        assert!(matches!(err, BuildError::Index(IndexError::Content(_))));
    }

    #[test]
    fn test_numbered_sidebar() {
        let temp_dir = tempfile::tempdir().unwrap();
        let source = MockContentSource::new()
            .with_file("docs/10-a/index.md", "---\ntitle: A\n---\n")
            .with_file("docs/20-b/index.md", "---\ntitle: B\n---\n");
        let builder = StaticSiteBuilder::new(
            Arc::new(source),
            BuildConfig {
                site_title: "site".to_owned(),
                sidebar_numbers: true,
                ..BuildConfig::default()
            },
        );

        builder.build(temp_dir.path()).unwrap();

        let html = read(temp_dir.path(), "docs/b/index.html");
        assert!(html.contains(">1) A</a>"));
        assert!(html.contains(">2) B</a>"));
    }
}
