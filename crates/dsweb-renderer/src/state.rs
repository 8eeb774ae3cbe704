//! Heading bookkeeping and text helpers.

use std::collections::{HashMap, HashSet};

/// Table of contents entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TocEntry {
    /// Heading level (1-6).
    pub level: u8,
    /// Heading text.
    pub title: String,
    /// Anchor ID for linking.
    pub id: String,
}

/// Hands out unique anchor ids within one document.
///
/// The first heading with a given slug keeps it; later ones get `-1`, `-2`
/// and so on.
#[derive(Default)]
pub(crate) struct HeadingIds {
    used: HashSet<String>,
    counters: HashMap<String, usize>,
}

impl HeadingIds {
    pub(crate) fn unique(&mut self, base: String) -> String {
        let base = if base.is_empty() {
            "section".to_owned()
        } else {
            base
        };
        if self.used.insert(base.clone()) {
            return base;
        }
        let count = self.counters.entry(base.clone()).or_insert(0);
        loop {
            *count += 1;
            let candidate = format!("{base}-{count}");
            if self.used.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

/// Convert heading text to an anchor id.
///
/// ```
/// use dsweb_renderer::slugify;
///
/// assert_eq!(slugify("Getting Started"), "getting-started");
/// assert_eq!(slugify("  API: record.set()  "), "api-recordset");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut result = String::new();
    let mut last_was_dash = true; // Prevents leading dash

    for c in text.trim().chars() {
        if c.is_alphanumeric() {
            result.extend(c.to_lowercase());
            last_was_dash = false;
        } else if !last_was_dash && (c.is_whitespace() || c == '-' || c == '_') {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }
    result
}

/// Escape text for HTML content and attribute values.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("a  -  b__c"), "a-b-c");
        assert_eq!(slugify("Trailing!"), "trailing");
        assert_eq!(slugify("Ünïcode Title"), "ünïcode-title");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_heading_ids_deduplicate() {
        let mut ids = HeadingIds::default();
        assert_eq!(ids.unique("setup".to_owned()), "setup");
        assert_eq!(ids.unique("setup".to_owned()), "setup-1");
        assert_eq!(ids.unique("setup".to_owned()), "setup-2");
        assert_eq!(ids.unique("setup-1".to_owned()), "setup-1-1");
    }

    #[test]
    fn test_heading_ids_empty_base() {
        let mut ids = HeadingIds::default();
        assert_eq!(ids.unique(String::new()), "section");
        assert_eq!(ids.unique(String::new()), "section-1");
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#x27;&amp;&#x27;&lt;/a&gt;"
        );
    }
}
