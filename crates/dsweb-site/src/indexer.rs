//! Content indexing: filtering, navigation trees, page and redirect plans.
//!
//! The indexer makes a single pass over every content node. Eligible nodes
//! under a known section are folded into that section's navigation tree,
//! get a [`PageSpec`], and register their redirect sources.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;
use std::str::FromStr;

use dsweb_content::{ContentError, ContentNode, ContentSource, WeightPattern};
use serde::Serialize;

use crate::navigation::{NavGroup, NavLeaf};

/// Top-level content area. Each section has its own page template and
/// navigation tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Docs,
    Tutorials,
    Blog,
    Guides,
    Install,
    Releases,
    Info,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Self::Docs,
        Self::Tutorials,
        Self::Blog,
        Self::Guides,
        Self::Install,
        Self::Releases,
        Self::Info,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Docs => "docs",
            Self::Tutorials => "tutorials",
            Self::Blog => "blog",
            Self::Guides => "guides",
            Self::Install => "install",
            Self::Releases => "releases",
            Self::Info => "info",
        }
    }

    /// Section a slug belongs to, from its first path segment.
    #[must_use]
    pub fn from_slug(slug: &str) -> Option<Self> {
        let first = slug.split('/').find(|s| !s.is_empty())?;
        first.parse().ok()
    }

    /// Blog posts are weighted by publication date, everything else by a
    /// two-digit order.
    #[must_use]
    pub fn weight_pattern(self) -> WeightPattern {
        match self {
            Self::Blog => WeightPattern::Date,
            _ => WeightPattern::Order,
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when parsing an unknown section name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown section `{0}`")]
pub struct UnknownSection(pub String);

impl FromStr for Section {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| UnknownSection(s.to_owned()))
    }
}

/// Filters applied before indexing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IndexerConfig {
    /// Version markers whose documents are excluded.
    pub exclude_versions: Vec<String>,
    /// Exclude documents marked as hosted-offering only.
    pub exclude_hub: bool,
    pub include_drafts: bool,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            exclude_versions: vec!["V3".to_owned()],
            exclude_hub: true,
            include_drafts: false,
        }
    }
}

/// Indexing failures. Any of these aborts the build.
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("content query failed: {0}")]
    Content(#[from] ContentError),
    #[error("redirect `{path}` is declared by both `{first}` and `{second}`")]
    DuplicateRedirect {
        path: String,
        first: String,
        second: String,
    },
}

/// A page to generate.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSpec {
    pub section: Section,
    pub node: ContentNode,
}

impl PageSpec {
    /// Canonical URL of the page.
    #[must_use]
    pub fn url(&self) -> &str {
        self.node.url()
    }
}

/// Result of indexing: navigation per section, pages, and redirects.
#[derive(Debug, Default)]
pub struct SiteIndex {
    navigation: BTreeMap<Section, NavGroup>,
    pages: Vec<PageSpec>,
    redirects: BTreeMap<String, String>,
}

impl SiteIndex {
    /// Navigation tree of a section, if it has any leaves.
    #[must_use]
    pub fn navigation(&self, section: Section) -> Option<&NavGroup> {
        self.navigation.get(&section)
    }

    /// Planned pages in content order.
    #[must_use]
    pub fn pages(&self) -> &[PageSpec] {
        &self.pages
    }

    /// Pages belonging to one section.
    pub fn section_pages(&self, section: Section) -> impl Iterator<Item = &PageSpec> {
        self.pages.iter().filter(move |page| page.section == section)
    }

    /// Redirect sources mapped to canonical target URLs.
    #[must_use]
    pub fn redirects(&self) -> &BTreeMap<String, String> {
        &self.redirects
    }

    /// Page whose canonical URL is `url`.
    #[must_use]
    pub fn page(&self, url: &str) -> Option<&PageSpec> {
        self.pages.iter().find(|page| page.url() == url)
    }
}

/// Builds a [`SiteIndex`] from content nodes.
pub struct Indexer {
    config: IndexerConfig,
}

impl Indexer {
    #[must_use]
    pub fn new(config: IndexerConfig) -> Self {
        Self { config }
    }

    /// Whether a node passes the draft, version and hub filters.
    #[must_use]
    pub fn is_eligible(&self, node: &ContentNode) -> bool {
        if node.draft && !self.config.include_drafts {
            return false;
        }
        if node
            .version
            .as_ref()
            .is_some_and(|v| self.config.exclude_versions.contains(v))
        {
            return false;
        }
        !(node.hub && self.config.exclude_hub)
    }

    /// Query `source` and index the result.
    pub fn index_source(&self, source: &dyn ContentSource) -> Result<SiteIndex, IndexError> {
        let nodes = source.query()?;
        self.index(nodes)
    }

    /// Index a set of content nodes.
    pub fn index(&self, nodes: Vec<ContentNode>) -> Result<SiteIndex, IndexError> {
        let mut index = SiteIndex::default();

        for node in nodes {
            if !self.is_eligible(&node) {
                tracing::debug!(path = %node.source_path.display(), "Skipping filtered document");
                continue;
            }
            let Some(section) = Section::from_slug(&node.slug) else {
                tracing::debug!(slug = %node.slug, "Skipping document outside known sections");
                continue;
            };

            let segments = nav_segments(&node.weighted_slug, section.weight_pattern());
            // A lone section root is the landing page and has no entry.
            if let [_, .., (_, order)] = segments.as_slice() {
                let leaf = NavLeaf {
                    slug: node.url().to_owned(),
                    title: node.title.clone(),
                    description: node.description.clone(),
                    order: *order,
                };
                let tree = index.navigation.entry(section).or_default();
                if let Err(e) = tree.insert_path(&segments[1..], leaf) {
                    tracing::warn!(
                        path = %node.source_path.display(),
                        error = %e,
                        "Skipping navigation entry"
                    );
                }
            }

            for path in &node.redirects {
                match index.redirects.entry(path.clone()) {
                    Entry::Vacant(entry) => {
                        entry.insert(node.url().to_owned());
                    }
                    Entry::Occupied(entry) => {
                        tracing::error!(
                            redirect = %path,
                            first = %entry.get(),
                            second = %node.url(),
                            "Duplicate redirect source"
                        );
                        return Err(IndexError::DuplicateRedirect {
                            path: path.clone(),
                            first: entry.get().clone(),
                            second: node.url().to_owned(),
                        });
                    }
                }
            }

            index.pages.push(PageSpec { section, node });
        }

        index.navigation.retain(|_, nav| {
            nav.prune_empty();
            !nav.is_empty()
        });

        tracing::info!(
            pages = index.pages.len(),
            redirects = index.redirects.len(),
            "Indexed content"
        );
        Ok(index)
    }
}

/// Split a weighted slug into bare segment names and their weights.
///
/// The first element is the section root. A trailing `index.html` is
/// dropped; any other `name.html` contributes `name`.
fn nav_segments(weighted_slug: &str, pattern: WeightPattern) -> Vec<(String, u32)> {
    let mut parts: Vec<&str> = weighted_slug.split('/').filter(|s| !s.is_empty()).collect();
    if !weighted_slug.ends_with('/')
        && let Some(file) = parts.pop()
        && file != "index.html"
    {
        parts.push(file.strip_suffix(".html").unwrap_or(file));
    }

    parts
        .into_iter()
        .map(|segment| {
            let (order, name) = pattern.parse_or_default(segment);
            (name.to_owned(), order)
        })
        .collect()
}
