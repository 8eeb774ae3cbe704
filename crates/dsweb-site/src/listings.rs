//! Blog, release and tutorial listings.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use dsweb_content::WeightPattern;
use regex::Regex;
use serde::Serialize;

use crate::indexer::{Section, SiteIndex};

/// Post kind used when the post name carries none.
pub const DEFAULT_POST_KIND: &str = "default";

/// Second dash-separated token of a post segment: `20200101-release-v5`.
static KIND_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^-]*-([^-]*)-").expect("valid kind pattern"));

/// One blog post in the listing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BlogEntry {
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    /// Publication date as `YYYYMMDD`.
    pub date: u32,
    pub kind: String,
}

impl BlogEntry {
    /// Publication date as `YYYY-MM-DD`.
    #[must_use]
    pub fn date_label(&self) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            self.date / 10_000,
            self.date / 100 % 100,
            self.date % 100
        )
    }
}

/// Blog posts, newest first.
///
/// Posts without a date prefix are skipped with a warning.
#[must_use]
pub fn blog_entries(index: &SiteIndex) -> Vec<BlogEntry> {
    let mut entries: Vec<BlogEntry> = index
        .section_pages(Section::Blog)
        .filter_map(|page| {
            let node = &page.node;
            let segment = post_segment(&node.weighted_slug)?;
            let Some((date, _)) = WeightPattern::Date.parse(segment) else {
                tracing::warn!(slug = %node.weighted_slug, "Blog post has no date prefix");
                return None;
            };
            let kind = KIND_PATTERN
                .captures(segment)
                .and_then(|c| c.get(1))
                .map_or(DEFAULT_POST_KIND, |m| m.as_str());
            Some(BlogEntry {
                slug: page.url().to_owned(),
                title: node.title.clone(),
                description: node.description.clone(),
                date,
                kind: kind.to_owned(),
            })
        })
        .collect();
    entries.sort_by(|a, b| b.date.cmp(&a.date));
    entries
}

/// Segment naming a post; `None` for the blog landing page.
fn post_segment(weighted_slug: &str) -> Option<&str> {
    let mut parts = weighted_slug.split('/').filter(|s| !s.is_empty());
    let last = parts.next_back()?;
    let segment = if weighted_slug.ends_with('/') {
        last
    } else if last == "index.html" {
        parts.next_back()?
    } else {
        last.strip_suffix(".html").unwrap_or(last)
    };
    (segment != Section::Blog.as_str()).then_some(segment)
}

/// One release note.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ReleaseEntry {
    /// Dotted version label: `v4-2-0` becomes `v4.2.0`.
    pub version: String,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
}

/// Release notes grouped by component (`/releases/<component>/<version>/`).
#[must_use]
pub fn releases_by_component(index: &SiteIndex) -> BTreeMap<String, Vec<ReleaseEntry>> {
    let mut releases: BTreeMap<String, Vec<ReleaseEntry>> = BTreeMap::new();
    for page in index.section_pages(Section::Releases) {
        let url = page.url();
        let mut parts = url.split('/').filter(|s| !s.is_empty()).skip(1);
        let (Some(component), Some(version)) = (parts.next(), parts.next()) else {
            tracing::debug!(slug = %url, "Not a release note");
            continue;
        };
        releases
            .entry(component.to_owned())
            .or_default()
            .push(ReleaseEntry {
                version: version.trim_end_matches(".html").replace('-', "."),
                slug: url.to_owned(),
                title: page.node.title.clone(),
                description: page.node.description.clone(),
            });
    }
    releases
}

/// One tutorial in the overview.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TutorialEntry {
    /// Last URL segment, used for ordering inside a group.
    pub name: String,
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
}

/// Tutorials grouped by category, then by sub-category.
///
/// `/tutorials/<category>/<sub>/<entry>/` lands in `category → sub`;
/// `/tutorials/<category>/<entry>/` is a group of its own keyed `entry`.
#[must_use]
pub fn tutorial_categories(
    index: &SiteIndex,
) -> BTreeMap<String, BTreeMap<String, Vec<TutorialEntry>>> {
    let mut categories: BTreeMap<String, BTreeMap<String, Vec<TutorialEntry>>> = BTreeMap::new();
    for page in index.section_pages(Section::Tutorials) {
        let url = page.url();
        let parts: Vec<&str> = url
            .split('/')
            .filter(|s| !s.is_empty())
            .skip(1)
            .map(|s| s.strip_suffix(".html").unwrap_or(s))
            .collect();
        let (category, group, name) = match parts.as_slice() {
            [category, group, name] => (*category, *group, *name),
            [category, name] => (*category, *name, *name),
            _ => {
                tracing::debug!(slug = %url, "Not a tutorial entry");
                continue;
            }
        };
        categories
            .entry(category.to_owned())
            .or_default()
            .entry(group.to_owned())
            .or_default()
            .push(TutorialEntry {
                name: name.to_owned(),
                slug: url.to_owned(),
                title: page.node.title.clone(),
                description: page.node.description.clone(),
            });
    }
    for entries in categories.values_mut().flat_map(BTreeMap::values_mut) {
        entries.sort_by(|a, b| a.name.cmp(&b.name));
    }
    categories
}
