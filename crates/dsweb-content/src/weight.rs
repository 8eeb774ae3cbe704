//! Ordering weights encoded as numeric filename prefixes.
//!
//! Content directories carry their sort weight in the name:
//! `10-core`, `20-events` (two digits) or, for blog posts, the publication
//! date `20200601-post-b` (eight digits).

use std::sync::LazyLock;

use regex::Regex;

/// Weight assigned to segments without a numeric prefix.
pub const DEFAULT_ORDER: u32 = 100;

static ORDER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{2})-(.*)$").expect("valid order pattern"));

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{8})-(.*)$").expect("valid date pattern"));

static ANY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\d{8}|\d{2})-").expect("valid prefix pattern"));

/// Shape of the numeric prefix a section uses for ordering.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WeightPattern {
    /// Two-digit ordering prefix (`10-core`).
    Order,
    /// Eight-digit date prefix (`20200101-post-a`).
    Date,
}

impl WeightPattern {
    fn regex(self) -> &'static Regex {
        match self {
            Self::Order => &ORDER_PATTERN,
            Self::Date => &DATE_PATTERN,
        }
    }

    /// Split a segment into its weight and bare name.
    ///
    /// Returns `None` when the segment has no prefix of this shape.
    ///
    /// ```
    /// use dsweb_content::WeightPattern;
    ///
    /// assert_eq!(WeightPattern::Order.parse("10-core"), Some((10, "core")));
    /// assert_eq!(WeightPattern::Order.parse("core"), None);
    /// assert_eq!(
    ///     WeightPattern::Date.parse("20200601-post-b"),
    ///     Some((20_200_601, "post-b"))
    /// );
    /// ```
    #[must_use]
    pub fn parse(self, segment: &str) -> Option<(u32, &str)> {
        let caps = self.regex().captures(segment)?;
        let weight = caps.get(1)?.as_str().parse().ok()?;
        Some((weight, caps.get(2)?.as_str()))
    }

    /// Weight and bare name, falling back to [`DEFAULT_ORDER`] and the
    /// unchanged segment.
    #[must_use]
    pub fn parse_or_default(self, segment: &str) -> (u32, &str) {
        self.parse(segment).unwrap_or((DEFAULT_ORDER, segment))
    }
}

/// Remove a leading two- or eight-digit weight prefix from a path segment.
#[must_use]
pub fn strip_weight_prefix(segment: &str) -> &str {
    match ANY_PREFIX.find(segment) {
        Some(m) => &segment[m.end()..],
        None => segment,
    }
}
