//! The tree adapter: read-only access to a host tree.
//!
//! The compiler never sees a concrete document model. Everything it needs
//! about nodes goes through [`Adapter`], which hosts implement for their own
//! tree type. An implementation for [`sprig_dom::DomTree`] ships in [`dom`].

pub mod dom;

use std::borrow::Cow;

/// A stable identity for a node, used as the key of per-predicate caches.
///
/// A key never owns the node it names, so caches keyed by it cannot keep a
/// tree alive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey(pub usize);

/// Dynamic user-interaction states that some hosts can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementState {
    /// `:hover`
    Hovered,
    /// `:visited`
    Visited,
    /// `:active`
    Active,
}

/// Read access to a concrete tree.
///
/// Nodes are handles: cheap to clone, compared for identity with
/// [`Adapter::equals`]. The adapter must return a stable order for children
/// and siblings as long as the tree is not mutated.
pub trait Adapter {
    /// Handle to a node of the host tree (element, text, document, ...).
    type Node: Clone;

    /// Returns `true` if the node is an element.
    fn is_tag(&self, node: &Self::Node) -> bool;

    /// The element's tag name.
    fn name<'n>(&'n self, node: &'n Self::Node) -> Cow<'n, str>;

    /// The parent node, of any kind.
    fn parent(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Child nodes of any kind, in document order.
    fn children(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// All children of the node's parent, including the node itself, in
    /// document order.
    fn siblings(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// The value of the named attribute, if present.
    fn attribute_value<'n>(&'n self, node: &'n Self::Node, name: &str) -> Option<Cow<'n, str>>;

    /// Returns `true` if the element has the named attribute.
    fn has_attribute(&self, node: &Self::Node, name: &str) -> bool {
        self.attribute_value(node, name).is_some()
    }

    /// Flattened text content of the node and its descendants.
    fn text(&self, node: &Self::Node) -> String;

    /// Node identity (not structural equality).
    fn equals(&self, a: &Self::Node, b: &Self::Node) -> bool;

    /// A stable identity key for per-predicate caches.
    ///
    /// Hosts that cannot provide one keep the default, which disables
    /// descendant caching.
    fn cache_key(&self, _node: &Self::Node) -> Option<NodeKey> {
        None
    }

    /// Returns `true` if this adapter can report the given state.
    /// `:hover`, `:visited` and `:active` never match otherwise.
    fn supports_state(&self, _state: ElementState) -> bool {
        false
    }

    /// Whether the node is currently in the given state. Only consulted when
    /// [`Adapter::supports_state`] returns `true`.
    fn is_in_state(&self, _node: &Self::Node, _state: ElementState) -> bool {
        false
    }

    /// The parent, if it is an element.
    fn element_parent(&self, node: &Self::Node) -> Option<Self::Node> {
        self.parent(node).filter(|parent| self.is_tag(parent))
    }
}
