//! Integration tests for type selectors and combinators.

use sprig_dom::{DomTree, ElementData, NodeId};
use sprig_select::token::build::{
    adjacent, attr_eq, child, descendant, parent, sibling, tag, universal,
};
use sprig_select::token::SelectorList;
use sprig_select::{Flags, MatchContext, Options, compile, select_all};

struct Page {
    tree: DomTree,
    outer: NodeId,
    p1: NodeId,
    s1: NodeId,
    p2: NodeId,
    nested: NodeId,
}

/// ```text
/// <html><body>
///   <div id=outer>
///     <p id=p1></p> text <span id=s1></span> <p id=p2><b id=nested></b></p>
///   </div>
/// </body></html>
/// ```
fn page() -> Page {
    let mut tree = DomTree::new();
    let html = tree.append_element(NodeId::ROOT, ElementData::new("html"));
    let body = tree.append_element(html, ElementData::new("body"));
    let outer = tree.append_element(body, ElementData::new("div").with_attr("id", "outer"));
    let p1 = tree.append_element(outer, ElementData::new("p").with_attr("id", "p1"));
    let _ = tree.append_text(outer, "text");
    let s1 = tree.append_element(outer, ElementData::new("span").with_attr("id", "s1"));
    let p2 = tree.append_element(outer, ElementData::new("p").with_attr("id", "p2"));
    let nested = tree.append_element(p2, ElementData::new("b").with_attr("id", "nested"));
    Page {
        tree,
        outer,
        p1,
        s1,
        p2,
        nested,
    }
}

fn select(page: &Page, selectors: &SelectorList) -> Vec<NodeId> {
    select_all(selectors, &MatchContext::Node(NodeId::ROOT), &Options::new(&page.tree)).unwrap()
}

#[test]
fn test_type_selector() {
    let page = page();
    assert_eq!(select(&page, &vec![vec![tag("p")]]), vec![page.p1, page.p2]);
    assert_eq!(select(&page, &vec![vec![tag("P")]]), vec![page.p1, page.p2]);
}

#[test]
fn test_type_selector_in_xml_mode() {
    let page = page();
    let xml = Options::new(&page.tree).with_flags(Flags {
        xml_mode: true,
        ..Flags::default()
    });
    let root = MatchContext::Node(NodeId::ROOT);
    assert!(select_all(&vec![vec![tag("P")]], &root, &xml).unwrap().is_empty());

    let lowered = xml.with_flags(Flags {
        xml_mode: true,
        lower_case_tags: true,
        ..Flags::default()
    });
    assert_eq!(
        select_all(&vec![vec![tag("P")]], &root, &lowered).unwrap(),
        vec![page.p1, page.p2]
    );
}

#[test]
fn test_universal() {
    let page = page();
    // div > *
    assert_eq!(
        select(&page, &vec![vec![tag("div"), child(), universal()]]),
        vec![page.p1, page.s1, page.p2]
    );
}

#[test]
fn test_descendant() {
    let page = page();
    // body b
    assert_eq!(
        select(&page, &vec![vec![tag("body"), descendant(), tag("b")]]),
        vec![page.nested]
    );
    // span b
    assert!(select(&page, &vec![vec![tag("span"), descendant(), tag("b")]]).is_empty());
}

#[test]
fn test_child() {
    let page = page();
    assert_eq!(
        select(&page, &vec![vec![tag("div"), child(), tag("p")]]),
        vec![page.p1, page.p2]
    );
    assert!(select(&page, &vec![vec![tag("body"), child(), tag("p")]]).is_empty());
}

#[test]
fn test_parent() {
    let page = page();
    // p < div: divs with a p child
    assert_eq!(
        select(&page, &vec![vec![tag("p"), parent(), tag("div")]]),
        vec![page.outer]
    );
    // b < *
    assert_eq!(
        select(&page, &vec![vec![tag("b"), parent(), universal()]]),
        vec![page.p2]
    );
}

#[test]
fn test_general_sibling() {
    let page = page();
    assert_eq!(select(&page, &vec![vec![tag("p"), sibling(), tag("span")]]), vec![page.s1]);
    assert_eq!(select(&page, &vec![vec![tag("span"), sibling(), tag("p")]]), vec![page.p2]);
    assert_eq!(select(&page, &vec![vec![tag("p"), sibling(), tag("p")]]), vec![page.p2]);
}

#[test]
fn test_adjacent_sibling_skips_text() {
    let page = page();
    assert_eq!(select(&page, &vec![vec![tag("p"), adjacent(), tag("span")]]), vec![page.s1]);
    assert!(select(&page, &vec![vec![tag("p"), adjacent(), tag("p")]]).is_empty());
    assert_eq!(select(&page, &vec![vec![tag("span"), adjacent(), tag("p")]]), vec![page.p2]);
}

#[test]
fn test_compound_right_to_left() {
    let page = page();
    // div p[id=p2] > b
    let selectors = vec![vec![
        tag("div"),
        descendant(),
        tag("p"),
        attr_eq("id", "p2"),
        child(),
        tag("b"),
    ]];
    assert_eq!(select(&page, &selectors), vec![page.nested]);
}

#[test]
fn test_descendant_cache_does_not_change_results() {
    let page = page();
    let selectors = vec![vec![tag("div"), descendant(), universal()]];
    let cached = Options::new(&page.tree);
    let uncached = Options::new(&page.tree).with_flags(Flags {
        cache_results: false,
        ..Flags::default()
    });
    let with_cache = compile(&selectors, &cached, None).unwrap();
    let without_cache = compile(&selectors, &uncached, None).unwrap();

    // Twice over, so the second pass runs against a warm cache.
    for _ in 0..2 {
        for node in page.tree.descendants(NodeId::ROOT) {
            assert_eq!(with_cache.matches(&node), without_cache.matches(&node), "{node:?}");
        }
    }
}

#[test]
fn test_compiled_query_never_matches_text() {
    let page = page();
    let query = compile(&vec![vec![universal()]], &Options::new(&page.tree), None).unwrap();
    let text = page.tree.children(page.outer)[1];
    assert!(!query.matches(&text));
    assert!(query.matches(&page.outer));
}
