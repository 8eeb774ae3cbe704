//! Navigation and sidebar properties over a small content tree.

use dsweb_content::{ContentSource, MockContentSource};
use dsweb_site::{
    Indexer, IndexerConfig, NavGroup, NavNode, RESERVED_KEY, Section, SidebarState,
    render_sidebar,
};

fn source() -> MockContentSource {
    MockContentSource::new()
        .with_file("docs/index.md", "---\ntitle: Docs\n---\n")
        .with_file("docs/10-core/20-events/index.md", "---\ntitle: Events\n---\n")
        .with_file("docs/10-core/10-records/index.md", "---\ntitle: Records\n---\n")
        .with_file("docs/10-core/30-rpcs/index.md", "---\ntitle: RPCs\n---\n")
        .with_file(
            "docs/20-client-js/10-api/10-login/index.md",
            "---\ntitle: Login\n---\n",
        )
        .with_file(
            "docs/20-client-js/order/index.md",
            "---\ntitle: Shadowed\n---\n",
        )
        .with_file("docs/30-server/about.md", "---\ntitle: About\n---\n")
        .with_file("blog/20200101-post-a/index.md", "---\ntitle: Post A\n---\n")
        .with_file("blog/20200601-post-b/index.md", "---\ntitle: Post B\n---\n")
        .with_file("blog/20190101-post-c/index.md", "---\ntitle: Post C\n---\n")
}

fn visit<'a>(group: &'a NavGroup, groups: &mut Vec<&'a NavGroup>) {
    groups.push(group);
    for (_, node) in group.children() {
        if let NavNode::Group(child) = node {
            visit(child, groups);
        }
    }
}

fn all_groups(group: &NavGroup) -> Vec<&NavGroup> {
    let mut groups = Vec::new();
    visit(group, &mut groups);
    groups
}

fn leaf_slugs(group: &NavGroup) -> Vec<String> {
    all_groups(group)
        .into_iter()
        .flat_map(|g| g.children().filter_map(|(_, n)| n.as_leaf()))
        .map(|leaf| leaf.slug.clone())
        .collect()
}

#[test]
fn children_never_yield_reserved_key() {
    let index = Indexer::new(IndexerConfig::default())
        .index_source(&source())
        .unwrap();

    for section in Section::ALL {
        let Some(tree) = index.navigation(section) else {
            continue;
        };
        for group in all_groups(tree) {
            assert!(group.children().all(|(key, _)| key != RESERVED_KEY));
            assert!(group.sorted_children().iter().all(|(key, _)| *key != RESERVED_KEY));
        }
    }
}

#[test]
fn sibling_order_is_monotonic() {
    let index = Indexer::new(IndexerConfig::default())
        .index_source(&source())
        .unwrap();

    let docs = index.navigation(Section::Docs).unwrap();
    for group in all_groups(docs) {
        let orders: Vec<u32> = group.sorted_children().iter().map(|(_, n)| n.order()).collect();
        assert!(orders.windows(2).all(|w| w[0] <= w[1]), "{orders:?}");
    }

    let blog = index.navigation(Section::Blog).unwrap();
    let orders: Vec<u32> = blog.sorted_children().iter().map(|(_, n)| n.order()).collect();
    assert!(orders.windows(2).all(|w| w[0] >= w[1]), "{orders:?}");
}

#[test]
fn only_current_leaf_is_active() {
    let index = Indexer::new(IndexerConfig::default())
        .index_source(&source())
        .unwrap();
    let docs = index.navigation(Section::Docs).unwrap();

    for location in leaf_slugs(docs) {
        let html = render_sidebar(docs, &location, &SidebarState::from_location(&location), false);
        assert_eq!(html.matches("class=\"leaf active\"").count(), 1, "{location}");
        assert!(html.contains(&format!(
            "<li class=\"leaf active\"><a href=\"{location}\">"
        )));
    }
}

#[test]
fn rendered_sidebar_follows_sort_order() {
    let index = Indexer::new(IndexerConfig::default())
        .index_source(&source())
        .unwrap();

    let docs = index.navigation(Section::Docs).unwrap();
    let location = "/docs/core/events/";
    let html = render_sidebar(docs, location, &SidebarState::from_location(location), false);
    let records = html.find("Records").unwrap();
    let events = html.find("Events").unwrap();
    let rpcs = html.find("RPCs").unwrap();
    assert!(records < events && events < rpcs);

    let blog = index.navigation(Section::Blog).unwrap();
    let html = render_sidebar(blog, "/blog/", &SidebarState::from_location("/blog/"), false);
    let b = html.find("Post B").unwrap();
    let a = html.find("Post A").unwrap();
    let c = html.find("Post C").unwrap();
    assert!(b < a && a < c);
}

#[test]
fn opening_a_section_collapses_the_open_one() {
    let mut state = SidebarState::from_location("/docs/core/events/");
    assert_eq!(state.open_section(), Some("core"));

    state.toggle_section("client-js");
    assert_eq!(state.open_section(), Some("client-js"));

    let index = Indexer::new(IndexerConfig::default())
        .index_source(&source())
        .unwrap();
    let docs = index.navigation(Section::Docs).unwrap();
    let html = render_sidebar(docs, "/docs/core/events/", &state, false);

    assert_eq!(html.matches("<details name=\"sidebar\" open>").count(), 1);
    assert!(html.contains("<details name=\"sidebar\" open>\n<summary>client js</summary>"));
}

#[test]
fn json_shape_keeps_order_next_to_children() {
    let source = source();
    let nodes = source.query().unwrap();
    let index = Indexer::new(IndexerConfig::default()).index(nodes).unwrap();

    let value = serde_json::to_value(index.navigation(Section::Docs).unwrap()).unwrap();

    assert_eq!(value["core"]["order"], 10);
    assert_eq!(value["core"]["events"]["leaf"], true);
    assert_eq!(value["core"]["events"]["slug"], "/docs/core/events/");
    assert_eq!(value["server"]["about"]["slug"], "/docs/server/about.html");
    assert!(value["client-js"].get("order").is_some());
    assert!(value["client-js"]["order"].is_number());
}
