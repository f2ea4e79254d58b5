//! [`Adapter`] implementation for the arena [`DomTree`].
//!
//! Nodes are [`NodeId`]s, so identity is index equality and the index doubles
//! as the cache key.

use std::borrow::Cow;

use sprig_dom::{DomTree, NodeId};

use super::{Adapter, NodeKey};

impl Adapter for DomTree {
    type Node = NodeId;

    fn is_tag(&self, node: &NodeId) -> bool {
        self.as_element(*node).is_some()
    }

    fn name<'n>(&'n self, node: &'n NodeId) -> Cow<'n, str> {
        self.as_element(*node)
            .map_or(Cow::Borrowed(""), |e| Cow::Borrowed(e.tag_name.as_str()))
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        Self::parent(self, *node)
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        Self::children(self, *node).to_vec()
    }

    fn siblings(&self, node: &NodeId) -> Vec<NodeId> {
        Self::siblings(self, *node)
    }

    fn attribute_value<'n>(&'n self, node: &'n NodeId, name: &str) -> Option<Cow<'n, str>> {
        self.as_element(*node)
            .and_then(|e| e.attribute(name))
            .map(Cow::Borrowed)
    }

    fn has_attribute(&self, node: &NodeId, name: &str) -> bool {
        self.as_element(*node)
            .is_some_and(|e| e.attrs.contains_key(name))
    }

    fn text(&self, node: &NodeId) -> String {
        self.text_content(*node)
    }

    fn equals(&self, a: &NodeId, b: &NodeId) -> bool {
        a == b
    }

    fn cache_key(&self, node: &NodeId) -> Option<NodeKey> {
        Some(NodeKey(node.0))
    }
}
