//! Derived document fields: canonical slug, redirects, fallback titles.

use crate::weight::strip_weight_prefix;

/// Strip ordering prefixes from every segment of a weighted slug.
///
/// ```
/// use dsweb_content::derive_slug;
///
/// assert_eq!(
///     derive_slug("/docs/10-core/20-events/index.html"),
///     "/docs/core/events/index.html"
/// );
/// assert_eq!(derive_slug("/blog/20200601-post-b/"), "/blog/post-b/");
/// ```
#[must_use]
pub fn derive_slug(weighted_slug: &str) -> String {
    weighted_slug
        .split('/')
        .map(strip_weight_prefix)
        .collect::<Vec<_>>()
        .join("/")
}

/// Redirect sources for a document.
///
/// An `.html` permalink is also reachable without the extension, with and
/// without a trailing slash. Explicit `redirect_from` entries follow.
#[must_use]
pub fn build_redirects(permalink: Option<&str>, redirect_from: &[String]) -> Vec<String> {
    let mut redirects = Vec::new();
    if let Some(base) = permalink.and_then(|p| p.strip_suffix(".html")) {
        redirects.push(base.to_owned());
        redirects.push(format!("{base}/"));
    }
    redirects.extend(redirect_from.iter().cloned());
    redirects
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
///
/// ```
/// use dsweb_content::titlecase_from_slug;
///
/// assert_eq!(titlecase_from_slug("setup-guide"), "Setup Guide");
/// assert_eq!(titlecase_from_slug("my_page"), "My Page");
/// ```
#[must_use]
pub fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}
