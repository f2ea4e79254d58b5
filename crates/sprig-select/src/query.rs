//! Entry points: compile a selector list, test nodes, search trees.
//!
//! ```
//! use sprig_dom::{DomTree, ElementData, NodeId};
//! use sprig_select::options::{MatchContext, Options};
//! use sprig_select::query::select_all;
//! use sprig_select::token::build::{attr_eq, child, tag};
//!
//! let mut tree = DomTree::new();
//! let list = tree.append_element(NodeId::ROOT, ElementData::new("ul"));
//! let first = tree.append_element(list, ElementData::new("li").with_attr("class", "a"));
//! let _ = tree.append_element(list, ElementData::new("li"));
//!
//! // ul > li[class=a]
//! let selectors = vec![vec![tag("ul"), child(), tag("li"), attr_eq("class", "a")]];
//! let found = select_all(&selectors, &MatchContext::Node(NodeId::ROOT), &Options::new(&tree))?;
//! assert_eq!(found, vec![first]);
//! # Ok::<(), sprig_select::error::CompileError>(())
//! ```

use crate::adapter::Adapter;
use crate::compile::compile_token;
use crate::error::Result;
use crate::options::{Context, EqualsFn, MatchContext, Options};
use crate::predicate::CompiledQuery;
use crate::token::SelectorList;

/// Compile a selector list into a query that only ever matches elements.
///
/// `context` anchors relative selectors and `:scope`; a context set on
/// `options` takes precedence.
///
/// # Errors
///
/// Fails if any group uses an unsupported feature, an unknown pseudo-class,
/// malformed pseudo-class arguments, or a leading combinator while relative
/// selectors are disabled.
pub fn compile<'a, A>(
    selectors: &SelectorList,
    options: &Options<'a, A>,
    context: Option<&MatchContext<A::Node>>,
) -> Result<CompiledQuery<'a, A::Node>>
where
    A: Adapter,
    A::Node: 'a,
{
    let adapter = options.adapter;
    let query = compile_unchecked(selectors, options, context)?;
    Ok(CompiledQuery {
        predicate: query.predicate.guard(move |node| adapter.is_tag(node)),
        should_test_next_siblings: query.should_test_next_siblings,
    })
}

/// Like [`compile`], but the predicate may be handed non-element nodes and
/// does not check for them.
///
/// # Errors
///
/// Same as [`compile`].
pub fn compile_unchecked<'a, A>(
    selectors: &SelectorList,
    options: &Options<'a, A>,
    context: Option<&MatchContext<A::Node>>,
) -> Result<CompiledQuery<'a, A::Node>>
where
    A: Adapter,
    A::Node: 'a,
{
    let context = context.map(Context::from_match_context);
    compile_token(selectors, options, context.as_ref())
}

/// Does `node` match the selector list?
///
/// # Errors
///
/// Same as [`compile`].
pub fn is_match<'a, A>(
    selectors: &SelectorList,
    node: &A::Node,
    options: &Options<'a, A>,
) -> Result<bool>
where
    A: Adapter,
    A::Node: 'a,
{
    Ok(compile(selectors, options, None)?.matches(node))
}

/// All elements below `root` matching the selector list, in document order.
///
/// A single root node is searched below itself; a list of nodes is searched
/// including the nodes themselves, after dropping nodes nested in others.
///
/// # Errors
///
/// Same as [`compile`].
pub fn select_all<'a, A>(
    selectors: &SelectorList,
    root: &MatchContext<A::Node>,
    options: &Options<'a, A>,
) -> Result<Vec<A::Node>>
where
    A: Adapter,
    A::Node: 'a,
{
    let query = compile_unchecked(selectors, options, Some(root))?;
    if query.predicate.is_always_false() {
        return Ok(Vec::new());
    }
    let roots = search_roots(root, options, query.should_test_next_siblings);
    Ok(find_all(options.adapter, &roots, |node| query.matches(node)))
}

/// The first element in document order that [`select_all`] would return.
///
/// # Errors
///
/// Same as [`compile`].
pub fn select_one<'a, A>(
    selectors: &SelectorList,
    root: &MatchContext<A::Node>,
    options: &Options<'a, A>,
) -> Result<Option<A::Node>>
where
    A: Adapter,
    A::Node: 'a,
{
    let query = compile_unchecked(selectors, options, Some(root))?;
    if query.predicate.is_always_false() {
        return Ok(None);
    }
    let roots = search_roots(root, options, query.should_test_next_siblings);
    Ok(find_one(options.adapter, &roots, |node| query.matches(node)))
}

fn search_roots<A: Adapter>(
    root: &MatchContext<A::Node>,
    options: &Options<'_, A>,
    with_next_siblings: bool,
) -> Vec<A::Node> {
    let adapter = options.adapter;
    let mut nodes = match root {
        MatchContext::Node(node) if !with_next_siblings => return adapter.children(node),
        MatchContext::Node(node) => vec![node.clone()],
        MatchContext::Nodes(nodes) => nodes.clone(),
    };
    if with_next_siblings {
        let siblings: Vec<A::Node> = nodes
            .iter()
            .flat_map(|node| next_siblings_by(adapter, &*options.equals, node))
            .collect();
        nodes.extend(siblings);
    }
    remove_subsets_by(adapter, &*options.equals, &nodes)
}

/// Elements among `nodes` and their descendants that pass `test`, in
/// document order. Non-element nodes are skipped along with their subtrees.
#[must_use]
pub fn find_all<A: Adapter>(
    adapter: &A,
    nodes: &[A::Node],
    test: impl Fn(&A::Node) -> bool,
) -> Vec<A::Node> {
    let mut found = Vec::new();
    let mut stack: Vec<A::Node> = nodes.iter().rev().cloned().collect();
    while let Some(node) = stack.pop() {
        if !adapter.is_tag(&node) {
            continue;
        }
        if test(&node) {
            found.push(node.clone());
        }
        stack.extend(adapter.children(&node).into_iter().rev());
    }
    found
}

/// The first element [`find_all`] would return.
#[must_use]
pub fn find_one<A: Adapter>(
    adapter: &A,
    nodes: &[A::Node],
    test: impl Fn(&A::Node) -> bool,
) -> Option<A::Node> {
    let mut stack: Vec<A::Node> = nodes.iter().rev().cloned().collect();
    while let Some(node) = stack.pop() {
        if !adapter.is_tag(&node) {
            continue;
        }
        if test(&node) {
            return Some(node);
        }
        stack.extend(adapter.children(&node).into_iter().rev());
    }
    None
}

/// Returns `true` if [`find_one`] would find something.
#[must_use]
pub fn exists_one<A: Adapter>(
    adapter: &A,
    nodes: &[A::Node],
    test: impl Fn(&A::Node) -> bool,
) -> bool {
    find_one(adapter, nodes, test).is_some()
}

/// `nodes` without duplicates and without nodes that have an ancestor in
/// the list. The first occurrence of each node is kept.
#[must_use]
pub fn remove_subsets<A: Adapter>(adapter: &A, nodes: &[A::Node]) -> Vec<A::Node> {
    remove_subsets_by(adapter, &|a: &A::Node, b: &A::Node| adapter.equals(a, b), nodes)
}

pub(crate) fn remove_subsets_by<A: Adapter>(
    adapter: &A,
    equals: &EqualsFn<'_, A::Node>,
    nodes: &[A::Node],
) -> Vec<A::Node> {
    let contains = |candidate: &A::Node| nodes.iter().any(|node| equals(node, candidate));
    nodes
        .iter()
        .enumerate()
        .filter(|&(idx, node)| {
            let duplicate = nodes[..idx].iter().any(|earlier| equals(earlier, node));
            !duplicate && !has_ancestor(adapter, node, &contains)
        })
        .map(|(_, node)| node.clone())
        .collect()
}

fn has_ancestor<A: Adapter>(
    adapter: &A,
    node: &A::Node,
    matches: impl Fn(&A::Node) -> bool,
) -> bool {
    let mut current = adapter.parent(node);
    while let Some(ancestor) = current {
        if matches(&ancestor) {
            return true;
        }
        current = adapter.parent(&ancestor);
    }
    false
}

/// The element siblings after `node`, in document order.
#[must_use]
pub fn next_siblings<A: Adapter>(adapter: &A, node: &A::Node) -> Vec<A::Node> {
    next_siblings_by(adapter, &|a: &A::Node, b: &A::Node| adapter.equals(a, b), node)
}

pub(crate) fn next_siblings_by<A: Adapter>(
    adapter: &A,
    equals: &EqualsFn<'_, A::Node>,
    node: &A::Node,
) -> Vec<A::Node> {
    let siblings = adapter.siblings(node);
    let Some(position) = siblings.iter().position(|sibling| equals(node, sibling)) else {
        return Vec::new();
    };
    siblings
        .into_iter()
        .skip(position + 1)
        .filter(|sibling| adapter.is_tag(sibling))
        .collect()
}
