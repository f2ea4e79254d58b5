//! Tests for DOM tree construction and traversal helpers.

use sprig_dom::{DomTree, ElementData, NodeId, NodeType};

/// Helper to append an element node and return its `NodeId`.
fn element(tree: &mut DomTree, parent: NodeId, tag: &str) -> NodeId {
    tree.append_element(parent, ElementData::new(tag))
}

#[test]
fn test_append_links_siblings() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "ul");
    let a = element(&mut tree, parent, "li");
    let b = element(&mut tree, parent, "li");
    let c = element(&mut tree, parent, "li");

    assert_eq!(tree.children(parent), &[a, b, c]);
    let node = |id: NodeId| tree.get(id).unwrap();
    assert_eq!(node(a).prev_sibling, None);
    assert_eq!(node(a).next_sibling, Some(b));
    assert_eq!(node(c).prev_sibling, Some(b));
    assert_eq!(tree.parent(b), Some(parent));
}

#[test]
fn test_siblings_include_self() {
    let mut tree = DomTree::new();
    let parent = element(&mut tree, NodeId::ROOT, "div");
    let a = element(&mut tree, parent, "p");
    let text = tree.append_text(parent, "hello");
    let b = element(&mut tree, parent, "p");

    assert_eq!(tree.siblings(b), vec![a, text, b]);
    assert_eq!(tree.siblings(NodeId::ROOT), vec![NodeId::ROOT]);
}

#[test]
fn test_text_content_flattens_descendants() {
    let mut tree = DomTree::new();
    let div = element(&mut tree, NodeId::ROOT, "div");
    let _ = tree.append_text(div, "one ");
    let span = element(&mut tree, div, "span");
    let _ = tree.append_text(span, "two");
    let comment = tree.alloc(NodeType::Comment("ignored".to_string()));
    tree.append_child(div, comment);
    let _ = tree.append_text(div, " three");

    assert_eq!(tree.text_content(div), "one two three");
    assert_eq!(tree.text_content(span), "two");
    assert_eq!(tree.text_content(comment), "");
}

#[test]
fn test_descendants_in_tree_order() {
    let mut tree = DomTree::new();
    let html = element(&mut tree, NodeId::ROOT, "html");
    let body = element(&mut tree, html, "body");
    let p = element(&mut tree, body, "p");
    let em = element(&mut tree, p, "em");
    let footer = element(&mut tree, body, "footer");

    assert_eq!(
        tree.descendants(html).collect::<Vec<_>>(),
        vec![body, p, em, footer]
    );
    assert_eq!(tree.descendants(em).count(), 0);
}

#[test]
fn test_element_data_attributes() {
    let data = ElementData::new("a")
        .with_attr("id", "home")
        .with_attr("href", "/");
    assert_eq!(data.id().map(String::as_str), Some("home"));
    assert_eq!(data.attribute("href"), Some("/"));
    assert_eq!(data.attribute("title"), None);
}
