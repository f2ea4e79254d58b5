//! Per-predicate memoization over tree nodes.
//!
//! Side tables are keyed by [`NodeKey`], which never owns a node, so a cache
//! can't keep a tree alive. Each table lives inside the closure of the
//! predicate that created it and is dropped with it; nothing is shared
//! between compiled selectors. The tables use interior mutability and are
//! not synchronized, which is why compiled predicates are neither `Send`
//! nor `Sync`.

use std::cell::{Cell, RefCell};

use rustc_hash::{FxHashMap, FxHashSet};
use sprig_common::warning::warn_once;

use crate::adapter::{Adapter, NodeKey};
use crate::predicate::Predicate;

/// Ancestors that already failed a descendant walk's continuation.
///
/// Only failures are recorded: "this ancestor does not satisfy the
/// continuation" holds no matter which descendant started the walk.
#[derive(Debug, Default)]
pub(crate) struct FailedAncestors {
    keys: RefCell<FxHashSet<NodeKey>>,
    missing_keys: Cell<bool>,
}

impl FailedAncestors {
    /// The node's key, or `None` if the adapter can't provide one. The first
    /// miss is reported once.
    pub(crate) fn key_of<A: Adapter>(&self, adapter: &A, node: &A::Node) -> Option<NodeKey> {
        let key = adapter.cache_key(node);
        if key.is_none() && !self.missing_keys.replace(true) {
            warn_once(
                "select",
                "adapter provides no node cache keys; descendant results are not cached",
            );
        }
        key
    }

    pub(crate) fn has_failed(&self, key: NodeKey) -> bool {
        self.keys.borrow().contains(&key)
    }

    pub(crate) fn record_failure(&self, key: NodeKey) {
        let _ = self.keys.borrow_mut().insert(key);
    }
}

/// Wrap a check whose answer is inherited by descendants when it fails: if
/// an element does not satisfy `matches`, none of its descendants do either
/// (text containment is the typical case).
///
/// The resulting predicate first requires `next`. It then looks for the
/// nearest ancestor with a recorded result; if that ancestor failed, the node
/// fails without calling `matches`. Otherwise `matches` runs and its result
/// is recorded for the node. With `cache_results` off, or for nodes without a
/// cache key, this is plain `next && matches`.
#[must_use]
pub fn cache_parent_results<'a, A>(
    next: Predicate<'a, A::Node>,
    adapter: &'a A,
    cache_results: bool,
    matches: impl Fn(&A::Node) -> bool + 'a,
) -> Predicate<'a, A::Node>
where
    A: Adapter,
    A::Node: 'a,
{
    if !cache_results {
        return next.then(matches);
    }

    let results: RefCell<FxHashMap<NodeKey, bool>> = RefCell::new(FxHashMap::default());
    next.then(move |elem| {
        let Some(key) = adapter.cache_key(elem) else {
            return matches(elem);
        };
        if let Some(&known) = results.borrow().get(&key) {
            return known;
        }
        if nearest_recorded(adapter, elem, &results) == Some(false) {
            return false;
        }
        let result = matches(elem);
        let _ = results.borrow_mut().insert(key, result);
        result
    })
}

/// The recorded result of the closest element ancestor that has one.
fn nearest_recorded<A: Adapter>(
    adapter: &A,
    elem: &A::Node,
    results: &RefCell<FxHashMap<NodeKey, bool>>,
) -> Option<bool> {
    let mut node = adapter.element_parent(elem);
    while let Some(current) = node {
        let recorded = adapter
            .cache_key(&current)
            .and_then(|key| results.borrow().get(&key).copied());
        if recorded.is_some() {
            return recorded;
        }
        node = adapter.element_parent(&current);
    }
    None
}
