//! Markdown renderer built on pulldown-cmark's HTML writer.
//!
//! Heading events are buffered so the anchor id can be computed from the
//! full heading text before the opening tag is written.

use std::ops::RangeInclusive;

use pulldown_cmark::{CowStr, Event, HeadingLevel, Options, Parser, Tag, TagEnd, html};

use crate::state::{HeadingIds, TocEntry, escape_html, slugify};

/// Result of rendering markdown.
#[derive(Clone, Debug)]
pub struct RenderResult {
    /// Rendered HTML content.
    pub html: String,
    /// Table of contents entries in document order.
    pub toc: Vec<TocEntry>,
}

/// Markdown to HTML renderer.
///
/// GFM extensions and smart punctuation are enabled by default; h2 and h3
/// headings form the table of contents.
#[derive(Clone, Debug)]
pub struct MarkdownRenderer {
    gfm: bool,
    smart_punctuation: bool,
    toc_levels: RangeInclusive<u8>,
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

struct PendingHeading<'a> {
    level: u8,
    id: Option<CowStr<'a>>,
    inner: Vec<Event<'a>>,
}

impl MarkdownRenderer {
    #[must_use]
    pub fn new() -> Self {
        Self {
            gfm: true,
            smart_punctuation: true,
            toc_levels: 2..=3,
        }
    }

    /// Enable or disable GitHub Flavored Markdown features.
    ///
    /// When enabled, the parser supports:
    /// - Tables
    /// - Strikethrough (`~~text~~`)
    /// - Task lists (`- [ ] item`)
    #[must_use]
    pub fn with_gfm(mut self, enabled: bool) -> Self {
        self.gfm = enabled;
        self
    }

    /// Enable or disable typographic quotes and dashes.
    #[must_use]
    pub fn with_smart_punctuation(mut self, enabled: bool) -> Self {
        self.smart_punctuation = enabled;
        self
    }

    /// Heading levels collected into the table of contents.
    #[must_use]
    pub fn with_toc_levels(mut self, levels: RangeInclusive<u8>) -> Self {
        self.toc_levels = levels;
        self
    }

    /// Get parser options based on configuration.
    #[must_use]
    pub fn parser_options(&self) -> Options {
        let mut options = Options::ENABLE_HEADING_ATTRIBUTES;
        if self.gfm {
            options |= Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM;
        }
        if self.smart_punctuation {
            options |= Options::ENABLE_SMART_PUNCTUATION;
        }
        options
    }

    /// Render markdown text to HTML.
    #[must_use]
    pub fn render_markdown(&self, markdown: &str) -> RenderResult {
        let mut ids = HeadingIds::default();
        let mut toc = Vec::new();
        let mut events = Vec::new();
        let mut pending: Option<PendingHeading<'_>> = None;

        for event in Parser::new_ext(markdown, self.parser_options()) {
            match event {
                Event::Start(Tag::Heading { level, id, .. }) => {
                    pending = Some(PendingHeading {
                        level: heading_level_to_num(level),
                        id,
                        inner: Vec::new(),
                    });
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some(heading) = pending.take() {
                        events.push(self.finish_heading(heading, &mut ids, &mut toc));
                    }
                }
                event => match pending.as_mut() {
                    Some(heading) => heading.inner.push(event),
                    None => events.push(event),
                },
            }
        }

        let mut output = String::with_capacity(markdown.len() * 3 / 2);
        html::push_html(&mut output, events.into_iter());
        RenderResult { html: output, toc }
    }

    fn finish_heading<'a>(
        &self,
        heading: PendingHeading<'a>,
        ids: &mut HeadingIds,
        toc: &mut Vec<TocEntry>,
    ) -> Event<'a> {
        let level = heading.level;
        let title = plain_text(&heading.inner);
        let id = ids.unique(
            heading
                .id
                .map_or_else(|| slugify(&title), |id| id.into_string()),
        );

        let mut inner = String::new();
        html::push_html(&mut inner, heading.inner.into_iter());

        let tag = format!("<h{level} id=\"{}\">{inner}</h{level}>\n", escape_html(&id));
        if self.toc_levels.contains(&level) {
            toc.push(TocEntry { level, title, id });
        }
        Event::Html(tag.into())
    }
}

/// Text content of inline events, without markup.
fn plain_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

fn heading_level_to_num(level: HeadingLevel) -> u8 {
    match level {
        HeadingLevel::H1 => 1,
        HeadingLevel::H2 => 2,
        HeadingLevel::H3 => 3,
        HeadingLevel::H4 => 4,
        HeadingLevel::H5 => 5,
        HeadingLevel::H6 => 6,
    }
}
