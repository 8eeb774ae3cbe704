//! Sidebar rendering for a section's navigation tree.
//!
//! Which groups are open is explicit [`SidebarState`], derived from the page
//! location and passed down into the renderer one level at a time.
//!
//! # Structure
//!
//! - Depth 0 groups are sections. At most one is open at a time.
//! - Depth 1 groups are subsections. On guide pages they collapse
//!   exclusively within their section; elsewhere they are always expanded
//!   and have no collapse control.
//! - Deeper groups render like subsections that are never the open one.
//!
//! Collapsible groups are emitted as `<details>` elements sharing a `name`
//! per accordion scope, so a browser keeps them mutually exclusive after
//! the page loads.

use std::fmt::Write;

use dsweb_renderer::escape_html;

use crate::navigation::{NavGroup, NavLeaf, NavNode};

/// Location substring that turns on collapsible subsections.
const GUIDE_MARKER: &str = "guide";

/// Display state of one group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GroupState {
    Expanded,
    Collapsed,
    /// Always expanded, without a collapse control.
    Static,
}

/// Open groups of a sidebar.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SidebarState {
    open_section: Option<String>,
    open_subsection: Option<String>,
    collapsible_subsections: bool,
}

impl SidebarState {
    /// Initial state for a page: the section named by the third path
    /// segment of the location is open, and on guide pages the subsection
    /// named by the fourth.
    ///
    /// ```
    /// use dsweb_site::{GroupState, SidebarState};
    ///
    /// let state = SidebarState::from_location("/docs/core/events/");
    /// assert_eq!(state.section_state("core"), GroupState::Expanded);
    /// assert_eq!(state.section_state("client"), GroupState::Collapsed);
    /// assert_eq!(state.subsection_state("events"), GroupState::Static);
    /// ```
    #[must_use]
    pub fn from_location(location: &str) -> Self {
        let segment = |i: usize| {
            location
                .split('/')
                .nth(i)
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
        };
        Self {
            open_section: segment(2),
            open_subsection: segment(3),
            collapsible_subsections: location.contains(GUIDE_MARKER),
        }
    }

    #[must_use]
    pub fn open_section(&self) -> Option<&str> {
        self.open_section.as_deref()
    }

    #[must_use]
    pub fn open_subsection(&self) -> Option<&str> {
        self.open_subsection.as_deref()
    }

    /// Open `key`, collapsing any other section, or close it if it is open.
    pub fn toggle_section(&mut self, key: &str) {
        toggle(&mut self.open_section, key);
    }

    /// Like [`toggle_section`](Self::toggle_section), for subsections.
    ///
    /// Has no effect where subsections are not collapsible.
    pub fn toggle_subsection(&mut self, key: &str) {
        if self.collapsible_subsections {
            toggle(&mut self.open_subsection, key);
        }
    }

    #[must_use]
    pub fn section_state(&self, key: &str) -> GroupState {
        if self.open_section.as_deref() == Some(key) {
            GroupState::Expanded
        } else {
            GroupState::Collapsed
        }
    }

    #[must_use]
    pub fn subsection_state(&self, key: &str) -> GroupState {
        if !self.collapsible_subsections {
            GroupState::Static
        } else if self.open_subsection.as_deref() == Some(key) {
            GroupState::Expanded
        } else {
            GroupState::Collapsed
        }
    }

    fn nested_state(&self) -> GroupState {
        if self.collapsible_subsections {
            GroupState::Collapsed
        } else {
            GroupState::Static
        }
    }
}

fn toggle(slot: &mut Option<String>, key: &str) {
    if slot.as_deref() == Some(key) {
        *slot = None;
    } else {
        *slot = Some(key.to_owned());
    }
}

/// Render a section's navigation tree as sidebar HTML.
///
/// `location` is the current page URL; the leaf whose slug equals it is
/// marked `active`. With `numbers`, leaves are prefixed with their
/// 1-based position instead of a dash.
#[must_use]
pub fn render_sidebar(
    navigation: &NavGroup,
    location: &str,
    state: &SidebarState,
    numbers: bool,
) -> String {
    let mut renderer = SidebarRenderer {
        html: String::with_capacity(4096),
        location,
        state,
        numbers,
    };
    renderer.html.push_str("<nav class=\"sidebar\">\n");
    renderer.tree(navigation, 0, "sidebar");
    renderer.html.push_str("</nav>\n");
    renderer.html
}

struct SidebarRenderer<'a> {
    html: String,
    location: &'a str,
    state: &'a SidebarState,
    numbers: bool,
}

impl SidebarRenderer<'_> {
    fn tree(&mut self, group: &NavGroup, depth: usize, scope: &str) {
        self.html.push_str("<ul>\n");
        for (index, (key, node)) in group.sorted_children().into_iter().enumerate() {
            match node {
                NavNode::Leaf(leaf) => self.leaf(leaf, index + 1),
                NavNode::Group(child) => {
                    let (class, state) = match depth {
                        0 => ("section", self.state.section_state(key)),
                        1 => ("subsection", self.state.subsection_state(key)),
                        _ => ("subsection", self.state.nested_state()),
                    };
                    self.group(key, child, depth, scope, class, state);
                }
            }
        }
        self.html.push_str("</ul>\n");
    }

    fn group(
        &mut self,
        key: &str,
        group: &NavGroup,
        depth: usize,
        scope: &str,
        class: &str,
        state: GroupState,
    ) {
        let label = escape_html(&group_label(key));
        let _ = writeln!(self.html, "<li class=\"{class}\">");
        if state == GroupState::Static {
            let _ = writeln!(self.html, "<div class=\"{class}-title\">{label}</div>");
            self.tree(group, depth + 1, key);
        } else {
            let open = if state == GroupState::Expanded {
                " open"
            } else {
                ""
            };
            let _ = writeln!(
                self.html,
                "<details name=\"{}\"{open}>\n<summary>{label}</summary>",
                escape_html(scope)
            );
            self.tree(group, depth + 1, key);
            self.html.push_str("</details>\n");
        }
        self.html.push_str("</li>\n");
    }

    fn leaf(&mut self, leaf: &NavLeaf, position: usize) {
        let prefix = if self.numbers {
            format!("{position}) ")
        } else {
            "- ".to_owned()
        };
        let class = if leaf.slug == self.location {
            "leaf active"
        } else {
            "leaf"
        };
        let _ = writeln!(
            self.html,
            "<li class=\"{class}\"><a href=\"{}\">{}{}</a></li>",
            escape_html(&leaf.slug),
            escape_html(&prefix),
            escape_html(&leaf.title),
        );
    }
}

/// Display label of a group key.
fn group_label(key: &str) -> String {
    key.replace('-', " ")
}
