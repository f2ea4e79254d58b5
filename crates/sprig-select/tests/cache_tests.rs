//! Integration tests for result caching over tree nodes.

use std::borrow::Cow;
use std::cell::Cell;

use sprig_common::warning::was_warned;
use sprig_dom::{DomTree, ElementData, NodeId};
use sprig_select::cache::cache_parent_results;
use sprig_select::token::build::{descendant, pseudo, pseudo_arg, pseudo_sub, tag, universal};
use sprig_select::{Adapter, Flags, MatchContext, Options, Predicate, compile, select_all};

/// `<a><b><c><d><e>foo</e></d></c><f><g>bar</g></f></b></a>`
fn nested() -> (DomTree, Vec<NodeId>) {
    let mut tree = DomTree::new();
    let a = tree.append_element(NodeId::ROOT, ElementData::new("a"));
    let b = tree.append_element(a, ElementData::new("b"));
    let c = tree.append_element(b, ElementData::new("c"));
    let d = tree.append_element(c, ElementData::new("d"));
    let e = tree.append_element(d, ElementData::new("e"));
    let _ = tree.append_text(e, "foo");
    let f = tree.append_element(b, ElementData::new("f"));
    let g = tree.append_element(f, ElementData::new("g"));
    let _ = tree.append_text(g, "bar");
    (tree, vec![a, b, c, d, e, f, g])
}

#[test]
fn test_failed_ancestor_skips_descendants() {
    let (tree, elements) = nested();
    let calls = Cell::new(0);
    let contains_foo = |node: &NodeId| {
        calls.set(calls.get() + 1);
        tree.text_content(*node).contains("foo")
    };
    let predicate = cache_parent_results(Predicate::AlwaysTrue, &tree, true, contains_foo);

    let matched: Vec<NodeId> = elements
        .iter()
        .copied()
        .filter(|node| predicate.test(node))
        .collect();
    assert_eq!(matched, elements[..5].to_vec());
    // `g` is decided by its failed parent `f` without running the check.
    assert_eq!(calls.get(), 6);

    // Known nodes are answered from the table.
    assert!(predicate.test(&elements[4]));
    assert_eq!(calls.get(), 6);
}

#[test]
fn test_disabled_cache_runs_every_check() {
    let (tree, elements) = nested();
    let calls = Cell::new(0);
    let contains_foo = |node: &NodeId| {
        calls.set(calls.get() + 1);
        tree.text_content(*node).contains("foo")
    };
    let predicate = cache_parent_results(Predicate::AlwaysTrue, &tree, false, contains_foo);

    let matched = elements.iter().filter(|node| predicate.test(node)).count();
    assert_eq!(matched, 5);
    assert_eq!(calls.get(), elements.len());
}

#[test]
fn test_continuation_runs_first() {
    let (tree, elements) = nested();
    let calls = Cell::new(0);
    let next = Predicate::new(|node: &NodeId| *node != elements[0]);
    let predicate = cache_parent_results(next, &tree, true, |_: &NodeId| {
        calls.set(calls.get() + 1);
        true
    });
    assert!(!predicate.test(&elements[0]));
    assert_eq!(calls.get(), 0);
    assert!(predicate.test(&elements[1]));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_contains_is_cached_per_query() {
    let (tree, elements) = nested();
    let root = MatchContext::Node(NodeId::ROOT);
    let options = Options::new(&tree);
    let found = select_all(&vec![vec![pseudo_arg("contains", "bar")]], &root, &options).unwrap();
    assert_eq!(found, vec![elements[0], elements[1], elements[5], elements[6]]);
}

#[test]
fn test_custom_text_pseudo_with_and_without_cache() {
    let (tree, elements) = nested();
    let root = MatchContext::Node(NodeId::ROOT);
    let has_foo = |node: &NodeId| tree.text_content(*node).contains("foo");

    for cache_results in [true, false] {
        let flags = Flags {
            cache_results,
            ..Flags::default()
        };
        let options = Options::new(&tree).with_flags(flags).with_pseudo("hasfoo", has_foo);

        let found = select_all(&vec![vec![pseudo("hasfoo")]], &root, &options).unwrap();
        assert_eq!(found, elements[..5].to_vec(), "cache_results = {cache_results}");

        // a :hasfoo
        let selectors = vec![vec![tag("a"), descendant(), pseudo("hasfoo")]];
        let found = select_all(&selectors, &root, &options).unwrap();
        assert_eq!(found, elements[1..5].to_vec(), "cache_results = {cache_results}");
    }
}

#[test]
fn test_has_argument_results_do_not_leak_between_candidates() {
    // <body><p><div><span>
    let mut tree = DomTree::new();
    let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
    let p = tree.append_element(body, ElementData::new("p"));
    let div = tree.append_element(p, ElementData::new("div"));
    let _ = tree.append_element(div, ElementData::new("span"));

    // *:has(p span)
    let selectors = vec![vec![
        universal(),
        pseudo_sub("has", vec![vec![tag("p"), descendant(), tag("span")]]),
    ]];
    for cache_results in [true, false] {
        let flags = Flags {
            cache_results,
            ..Flags::default()
        };
        let query = compile(&selectors, &Options::new(&tree).with_flags(flags), None).unwrap();
        // For `div` the walk from `span` fails at `p`; for `body` it passes.
        assert!(!query.matches(&div), "cache_results = {cache_results}");
        assert!(query.matches(&body), "cache_results = {cache_results}");
        assert!(!query.matches(&p), "cache_results = {cache_results}");
    }
}

/// A [`DomTree`] view that can't provide cache keys.
struct Keyless(DomTree);

impl Adapter for Keyless {
    type Node = NodeId;

    fn is_tag(&self, node: &NodeId) -> bool {
        Adapter::is_tag(&self.0, node)
    }

    fn name<'n>(&'n self, node: &'n NodeId) -> Cow<'n, str> {
        Adapter::name(&self.0, node)
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        Adapter::parent(&self.0, node)
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        Adapter::children(&self.0, node)
    }

    fn siblings(&self, node: &NodeId) -> Vec<NodeId> {
        Adapter::siblings(&self.0, node)
    }

    fn attribute_value<'n>(&'n self, node: &'n NodeId, name: &str) -> Option<Cow<'n, str>> {
        Adapter::attribute_value(&self.0, node, name)
    }

    fn text(&self, node: &NodeId) -> String {
        Adapter::text(&self.0, node)
    }

    fn equals(&self, a: &NodeId, b: &NodeId) -> bool {
        a == b
    }
}

#[test]
fn test_adapter_without_keys_still_matches() {
    let (tree, elements) = nested();
    let keyed_results = {
        let options = Options::new(&tree);
        // b d, b :contains(bar)
        let selectors = vec![
            vec![tag("b"), descendant(), tag("d")],
            vec![tag("b"), descendant(), pseudo_arg("contains", "bar")],
        ];
        select_all(&selectors, &MatchContext::Node(NodeId::ROOT), &options).unwrap()
    };
    assert_eq!(keyed_results, vec![elements[3], elements[5], elements[6]]);

    let keyless = Keyless(tree);
    let options = Options::new(&keyless);
    let selectors = vec![
        vec![tag("b"), descendant(), tag("d")],
        vec![tag("b"), descendant(), pseudo_arg("contains", "bar")],
    ];
    let query = compile(&selectors, &options, None).unwrap();
    let matched: Vec<NodeId> = elements.iter().copied().filter(|node| query.matches(node)).collect();
    assert_eq!(matched, keyed_results);
    assert!(was_warned(
        "select",
        "adapter provides no node cache keys; descendant results are not cached"
    ));
}
