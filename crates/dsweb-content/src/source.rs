//! Content source trait and error types.
//!
//! Provides the [`ContentSource`] trait the site indexer queries, the
//! [`ContentNode`] records it returns, and [`ContentError`] for unified error
//! handling across sources.

use std::path::PathBuf;

use crate::fields::{build_redirects, derive_slug, titlecase_from_slug};
use crate::front_matter::{FrontMatter, split_front_matter};

/// One markdown document as seen by the site build.
///
/// # Slug Convention
///
/// - `weighted_slug` keeps ordering prefixes: `/docs/10-core/20-events/index.html`
/// - `slug` strips them: `/docs/core/events/index.html`
/// - [`url`](Self::url) drops a trailing `index.html`: `/docs/core/events/`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentNode {
    /// Canonical slug with ordering prefixes removed.
    pub slug: String,
    /// Permalink or file-derived slug with ordering prefixes intact.
    pub weighted_slug: String,
    /// Link to edit the source file.
    pub github_link: String,
    /// Document title (front matter, else derived from the slug).
    pub title: String,
    /// Optional description from front matter.
    pub description: Option<String>,
    /// Draft documents are not built unless drafts are enabled.
    pub draft: bool,
    /// Product version marker from front matter.
    pub version: Option<String>,
    /// Marks content that belongs to the hosted offering only.
    pub hub: bool,
    /// Additional URL paths that should redirect to this document.
    pub redirects: Vec<String>,
    /// Path relative to the content root.
    pub source_path: PathBuf,
    /// Markdown body without front matter.
    pub body: String,
}

impl ContentNode {
    /// Build a node from a markdown file's relative path and full text.
    ///
    /// # Errors
    ///
    /// Returns [`ContentErrorKind::InvalidFrontMatter`] if the front matter
    /// block is not valid YAML.
    pub fn from_markdown(
        relative_path: impl Into<PathBuf>,
        text: &str,
        edit_base_url: &str,
    ) -> Result<Self, ContentError> {
        let source_path: PathBuf = relative_path.into();
        let relative = source_path.to_string_lossy().replace('\\', "/");

        let (yaml, body) = split_front_matter(text);
        let front_matter = match yaml {
            Some(yaml) => FrontMatter::from_yaml(yaml).map_err(|e| {
                ContentError::new(ContentErrorKind::InvalidFrontMatter)
                    .with_path(&source_path)
                    .with_source(e)
            })?,
            None => FrontMatter::default(),
        };

        let weighted_slug = match &front_matter.permalink {
            Some(permalink) => permalink.clone(),
            None => match relative.strip_suffix(".md") {
                Some(stem) => format!("/{stem}.html"),
                None => format!("/{relative}"),
            },
        };
        let slug = derive_slug(&weighted_slug);
        let title = front_matter
            .title
            .clone()
            .unwrap_or_else(|| title_from_url(&slug));
        let redirects = build_redirects(
            front_matter.permalink.as_deref(),
            &front_matter.redirect_from(),
        );

        Ok(Self {
            github_link: format!("{}/{relative}", edit_base_url.trim_end_matches('/')),
            slug,
            weighted_slug,
            title,
            description: front_matter.description,
            draft: front_matter.draft,
            version: front_matter.version,
            hub: front_matter.hub,
            redirects,
            source_path,
            body: body.to_owned(),
        })
    }

    /// Canonical URL: the slug with a trailing `index.html` removed.
    #[must_use]
    pub fn url(&self) -> &str {
        self.slug.strip_suffix("index.html").unwrap_or(&self.slug)
    }
}

/// Derive a fallback title from the last meaningful URL segment.
fn title_from_url(slug: &str) -> String {
    let last = slug
        .split('/')
        .rev()
        .find(|s| !s.is_empty() && *s != "index.html")
        .unwrap_or("");
    match last.strip_suffix(".html").unwrap_or(last) {
        "" => "Untitled".to_owned(),
        name => titlecase_from_slug(name),
    }
}

/// Content query interface.
///
/// The build treats a source as a read-only external data source queried
/// once per build.
pub trait ContentSource: Send + Sync {
    /// Return every content document.
    ///
    /// # Errors
    ///
    /// Any error aborts the build.
    fn query(&self) -> Result<Vec<ContentNode>, ContentError>;
}

/// Semantic error categories.
#[derive(Debug, PartialEq, Eq)]
#[non_exhaustive]
pub enum ContentErrorKind {
    /// Content root or file does not exist.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// Front matter is not valid YAML.
    InvalidFrontMatter,
    /// File content is not valid UTF-8 or path is unusable.
    InvalidPath,
    /// Other/unknown error category.
    Other,
}

/// Content error with semantic kind and source-specific cause.
#[derive(Debug)]
pub struct ContentError {
    /// Semantic error category.
    pub kind: ContentErrorKind,
    /// Path context (if applicable).
    pub path: Option<PathBuf>,
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ContentError {
    /// Create a new content error.
    #[must_use]
    pub fn new(kind: ContentErrorKind) -> Self {
        Self {
            kind,
            path: None,
            source: None,
        }
    }

    /// Attach path context.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Attach the underlying error source.
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Semantic error category.
    #[must_use]
    pub fn kind(&self) -> &ContentErrorKind {
        &self.kind
    }

    /// Create a not found error with path.
    #[must_use]
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::new(ContentErrorKind::NotFound).with_path(path)
    }

    /// Create a content error from an I/O error.
    #[must_use]
    pub fn io(err: std::io::Error, path: impl Into<PathBuf>) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ContentErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ContentErrorKind::PermissionDenied,
            std::io::ErrorKind::InvalidData => ContentErrorKind::InvalidPath,
            _ => ContentErrorKind::Other,
        };
        Self::new(kind).with_path(path).with_source(err)
    }
}

impl std::fmt::Display for ContentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let kind_str = match self.kind {
            ContentErrorKind::NotFound => "Not found",
            ContentErrorKind::PermissionDenied => "Permission denied",
            ContentErrorKind::InvalidFrontMatter => "Invalid front matter",
            ContentErrorKind::InvalidPath => "Invalid path",
            ContentErrorKind::Other => "Error",
        };

        write!(f, "{kind_str}")?;

        if let Some(source) = &self.source {
            write!(f, ": {source}")?;
        }

        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }

        Ok(())
    }
}

impl std::error::Error for ContentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
