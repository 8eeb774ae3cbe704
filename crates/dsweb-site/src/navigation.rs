//! Navigation tree built from weighted content paths.
//!
//! A section's navigation is a tree of [`NavGroup`]s keyed by path segment
//! name. Each group carries its own sort weight next to its children, which
//! is why the child key `order` is reserved.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// Child key holding a group's weight in the serialized tree.
pub const RESERVED_KEY: &str = "order";

/// Errors raised while inserting into a navigation tree.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("segment name `order` is reserved")]
    ReservedKey,
    #[error("`{0}` is a page and cannot hold child pages")]
    LeafInTheWay(String),
    #[error("`{0}` already holds child pages")]
    GroupInTheWay(String),
    #[error("`{0}` is already used by another page")]
    DuplicateLeaf(String),
    #[error("navigation path is empty")]
    EmptyPath,
}

/// A single document in the navigation tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLeaf {
    /// Canonical URL of the document.
    pub slug: String,
    pub title: String,
    pub description: Option<String>,
    pub order: u32,
}

/// Child of a [`NavGroup`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavNode {
    Group(NavGroup),
    Leaf(NavLeaf),
}

impl NavNode {
    /// Sort weight of this node.
    #[must_use]
    pub fn order(&self) -> u32 {
        match self {
            Self::Group(group) => group.order,
            Self::Leaf(leaf) => leaf.order,
        }
    }

    #[must_use]
    pub fn as_group(&self) -> Option<&NavGroup> {
        match self {
            Self::Group(group) => Some(group),
            Self::Leaf(_) => None,
        }
    }

    #[must_use]
    pub fn as_leaf(&self) -> Option<&NavLeaf> {
        match self {
            Self::Leaf(leaf) => Some(leaf),
            Self::Group(_) => None,
        }
    }
}

/// Grouping node: a weight plus named children.
///
/// Children are kept in key order so that equal weights sort
/// deterministically.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavGroup {
    order: u32,
    children: BTreeMap<String, NavNode>,
}

impl Default for NavGroup {
    fn default() -> Self {
        Self::new(dsweb_content::DEFAULT_ORDER)
    }
}

impl NavGroup {
    #[must_use]
    pub fn new(order: u32) -> Self {
        Self {
            order,
            children: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn order(&self) -> u32 {
        self.order
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&NavNode> {
        self.children.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Children in key order.
    pub fn children(&self) -> impl Iterator<Item = (&str, &NavNode)> {
        self.children.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Return the child group `key`, creating it with `order` if absent.
    ///
    /// An existing group is reused as-is; its weight is not overwritten.
    pub fn group_mut(&mut self, key: &str, order: u32) -> Result<&mut NavGroup, NavError> {
        if key == RESERVED_KEY {
            return Err(NavError::ReservedKey);
        }
        match self
            .children
            .entry(key.to_owned())
            .or_insert_with(|| NavNode::Group(NavGroup::new(order)))
        {
            NavNode::Group(group) => Ok(group),
            NavNode::Leaf(_) => Err(NavError::LeafInTheWay(key.to_owned())),
        }
    }

    /// Add a leaf under `key`.
    pub fn insert_leaf(&mut self, key: &str, leaf: NavLeaf) -> Result<(), NavError> {
        if key == RESERVED_KEY {
            return Err(NavError::ReservedKey);
        }
        match self.children.entry(key.to_owned()) {
            Entry::Vacant(entry) => {
                entry.insert(NavNode::Leaf(leaf));
                Ok(())
            }
            Entry::Occupied(entry) => match entry.get() {
                NavNode::Group(_) => Err(NavError::GroupInTheWay(key.to_owned())),
                NavNode::Leaf(_) => Err(NavError::DuplicateLeaf(key.to_owned())),
            },
        }
    }

    /// Insert `leaf` at the end of `path`, creating intermediate groups.
    ///
    /// Each path element is a segment name and its weight. The last element
    /// names the leaf; its weight is carried by the leaf itself.
    pub fn insert_path<S: AsRef<str>>(
        &mut self,
        path: &[(S, u32)],
        leaf: NavLeaf,
    ) -> Result<(), NavError> {
        let Some(((name, _), parents)) = path.split_last() else {
            return Err(NavError::EmptyPath);
        };
        let parent = parents
            .iter()
            .try_fold(self, |group, (segment, order)| {
                group.group_mut(segment.as_ref(), *order)
            })?;
        parent.insert_leaf(name.as_ref(), leaf)
    }

    /// Children in display order.
    ///
    /// Ascending by weight, except that a sibling set containing a blog
    /// leaf sorts descending so the newest post comes first. Equal weights
    /// keep key order.
    #[must_use]
    pub fn sorted_children(&self) -> Vec<(&str, &NavNode)> {
        let mut children: Vec<_> = self.children().collect();
        let newest_first = children
            .iter()
            .any(|(_, node)| node.as_leaf().is_some_and(|leaf| leaf.slug.contains("blog")));
        if newest_first {
            children.sort_by_key(|(_, node)| Reverse(node.order()));
        } else {
            children.sort_by_key(|(_, node)| node.order());
        }
        children
    }

    /// Find the leaf with the given slug anywhere below this group.
    #[must_use]
    pub fn find_leaf(&self, slug: &str) -> Option<&NavLeaf> {
        self.children.values().find_map(|node| match node {
            NavNode::Leaf(leaf) if leaf.slug == slug => Some(leaf),
            NavNode::Leaf(_) => None,
            NavNode::Group(group) => group.find_leaf(slug),
        })
    }

    /// Drop child groups that ended up without any leaves.
    pub fn prune_empty(&mut self) {
        self.children.retain(|_, node| match node {
            NavNode::Group(group) => {
                group.prune_empty();
                !group.is_empty()
            }
            NavNode::Leaf(_) => true,
        });
    }
}

impl Serialize for NavGroup {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.children.len() + 1))?;
        map.serialize_entry(RESERVED_KEY, &self.order)?;
        for (key, child) in &self.children {
            map.serialize_entry(key, child)?;
        }
        map.end()
    }
}

impl Serialize for NavLeaf {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = if self.description.is_some() { 5 } else { 4 };
        let mut map = serializer.serialize_map(Some(len))?;
        map.serialize_entry("slug", &self.slug)?;
        map.serialize_entry("title", &self.title)?;
        if let Some(description) = &self.description {
            map.serialize_entry("description", description)?;
        }
        map.serialize_entry("order", &self.order)?;
        map.serialize_entry("leaf", &true)?;
        map.end()
    }
}

impl Serialize for NavNode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Group(group) => group.serialize(serializer),
            Self::Leaf(leaf) => leaf.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    fn leaf(slug: &str, order: u32) -> NavLeaf {
        NavLeaf {
            slug: slug.to_owned(),
            title: slug.to_owned(),
            description: None,
            order,
        }
    }

    fn keys<'a>(children: &[(&'a str, &NavNode)]) -> Vec<&'a str> {
        children.iter().map(|(k, _)| *k).collect()
    }

    #[test]
    fn test_insert_path_creates_groups() {
        let mut root = NavGroup::default();
        root.insert_path(
            &[("core", 10), ("events", 20)],
            leaf("/docs/core/events/", 20),
        )
        .unwrap();

        let core = root.get("core").and_then(NavNode::as_group).unwrap();
        assert_eq!(core.order(), 10);
        assert_eq!(core.get("events").unwrap().order(), 20);
    }

    #[test]
    fn test_insert_path_reuses_existing_group() {
        let mut root = NavGroup::default();
        root.insert_path(&[("core", 10), ("events", 20)], leaf("/a/", 20))
            .unwrap();
        root.insert_path(&[("core", 99), ("records", 10)], leaf("/b/", 10))
            .unwrap();

        let core = root.get("core").and_then(NavNode::as_group).unwrap();
        assert_eq!(core.order(), 10);
        assert_eq!(core.len(), 2);
    }

    #[test]
    fn test_insert_path_empty() {
        let mut root = NavGroup::default();
        let path: [(&str, u32); 0] = [];
        assert_eq!(root.insert_path(&path, leaf("/x/", 1)), Err(NavError::EmptyPath));
    }

    #[test]
    fn test_reserved_key_rejected() {
        let mut root = NavGroup::default();
        assert_eq!(
            root.insert_path(&[("order", 1)], leaf("/docs/order/", 1)),
            Err(NavError::ReservedKey)
        );
        assert_eq!(
            root.insert_path(&[("order", 1), ("x", 1)], leaf("/docs/order/x/", 1)),
            Err(NavError::ReservedKey)
        );
        assert!(root.is_empty());
    }

    #[test]
    fn test_leaf_and_group_conflicts() {
        let mut root = NavGroup::default();
        root.insert_path(&[("core", 10)], leaf("/docs/core/", 10))
            .unwrap();

        assert_eq!(
            root.insert_path(&[("core", 10), ("events", 20)], leaf("/e/", 20)),
            Err(NavError::LeafInTheWay("core".to_owned()))
        );
        assert_eq!(
            root.insert_path(&[("core", 10)], leaf("/again/", 10)),
            Err(NavError::DuplicateLeaf("core".to_owned()))
        );

        root.insert_path(&[("api", 30), ("x", 1)], leaf("/x/", 1))
            .unwrap();
        assert_eq!(
            root.insert_path(&[("api", 30)], leaf("/api/", 30)),
            Err(NavError::GroupInTheWay("api".to_owned()))
        );
    }

    #[test]
    fn test_prune_empty_after_failed_insert() {
        let mut root = NavGroup::default();
        root.insert_path(&[("core", 10), ("records", 10)], leaf("/docs/core/records/", 10))
            .unwrap();
        let err = root
            .insert_path(&[("guides", 20), ("order", 10)], leaf("/docs/guides/order/", 10))
            .unwrap_err();
        assert_eq!(err, NavError::ReservedKey);
        assert!(root.get("guides").is_some());

        root.prune_empty();

        assert!(root.get("guides").is_none());
        assert!(root.get("core").is_some());
    }

    #[test]
    fn test_sorted_children_ascending() {
        let mut root = NavGroup::default();
        root.insert_leaf("events", leaf("/docs/core/events/", 20))
            .unwrap();
        root.insert_leaf("records", leaf("/docs/core/records/", 10))
            .unwrap();
        root.group_mut("rpc", 30).unwrap();

        assert_eq!(
            keys(&root.sorted_children()),
            vec!["records", "events", "rpc"]
        );
    }

    #[test]
    fn test_sorted_children_blog_descending() {
        let mut root = NavGroup::default();
        root.insert_leaf("post-a", leaf("/blog/post-a/", 20_200_101))
            .unwrap();
        root.insert_leaf("post-b", leaf("/blog/post-b/", 20_200_601))
            .unwrap();

        assert_eq!(keys(&root.sorted_children()), vec!["post-b", "post-a"]);
    }

    #[test]
    fn test_sorted_children_ties_keep_key_order() {
        let mut root = NavGroup::default();
        root.insert_leaf("zeta", leaf("/z/", 100)).unwrap();
        root.insert_leaf("alpha", leaf("/a/", 100)).unwrap();

        assert_eq!(keys(&root.sorted_children()), vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_find_leaf_nested() {
        let mut root = NavGroup::default();
        root.insert_path(&[("core", 10), ("events", 20)], leaf("/docs/core/events/", 20))
            .unwrap();

        assert_eq!(root.find_leaf("/docs/core/events/").unwrap().order, 20);
        assert!(root.find_leaf("/docs/core/").is_none());
    }

    #[test]
    fn test_serialize_order_beside_children() {
        let mut root = NavGroup::new(100);
        root.insert_path(
            &[("core", 10), ("events", 20)],
            NavLeaf {
                slug: "/docs/core/events/".to_owned(),
                title: "Events".to_owned(),
                description: Some("PubSub".to_owned()),
                order: 20,
            },
        )
        .unwrap();

        let value = serde_json::to_value(&root).unwrap();
        assert_eq!(
            value,
            json!({
                "order": 100,
                "core": {
                    "order": 10,
                    "events": {
                        "slug": "/docs/core/events/",
                        "title": "Events",
                        "description": "PubSub",
                        "order": 20,
                        "leaf": true
                    }
                }
            })
        );
    }

    #[test]
    fn test_serialize_leaf_without_description() {
        let value = serde_json::to_value(leaf("/x/", 5)).unwrap();
        assert_eq!(
            value,
            json!({"slug": "/x/", "title": "/x/", "order": 5, "leaf": true})
        );
    }
}
