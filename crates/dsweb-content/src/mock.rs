//! Mock content source for testing.

use std::sync::RwLock;

use crate::source::{ContentError, ContentErrorKind, ContentNode, ContentSource};

const MOCK_EDIT_BASE: &str = "https://example.com/edit";

/// In-memory content source.
///
/// # Example
///
/// ```ignore
/// use dsweb_content::{ContentSource, MockContentSource};
///
/// let source = MockContentSource::new()
///     .with_file("docs/10-core/20-events/index.md", "---\ntitle: Events\n---\n");
/// let nodes = source.query().unwrap();
/// ```
#[derive(Debug, Default)]
pub struct MockContentSource {
    nodes: RwLock<Vec<ContentNode>>,
    fail: RwLock<bool>,
}

impl MockContentSource {
    /// Create an empty mock source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a markdown file given its content-relative path and full text.
    ///
    /// # Panics
    ///
    /// Panics if the front matter is malformed or the internal lock is poisoned.
    #[must_use]
    pub fn with_file(self, relative_path: &str, text: &str) -> Self {
        let node = ContentNode::from_markdown(relative_path, text, MOCK_EDIT_BASE)
            .expect("mock content must have valid front matter");
        self.nodes.write().unwrap().push(node);
        self
    }

    /// Add a prepared node.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn with_node(self, node: ContentNode) -> Self {
        self.nodes.write().unwrap().push(node);
        self
    }

    /// Make every subsequent query fail.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn failing(self) -> Self {
        *self.fail.write().unwrap() = true;
        self
    }
}

impl ContentSource for MockContentSource {
    fn query(&self) -> Result<Vec<ContentNode>, ContentError> {
        if *self.fail.read().unwrap() {
            return Err(ContentError::new(ContentErrorKind::Other));
        }
        Ok(self.nodes.read().unwrap().clone())
    }
}
