//! Compile options: adapter, flags, match context and caller pseudo-classes.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::adapter::Adapter;
use crate::error::Result;
use crate::predicate::Predicate;
use crate::token::SelectorList;

/// Identity comparison between two nodes.
pub type EqualsFn<'a, N> = dyn Fn(&N, &N) -> bool + 'a;

/// A caller-supplied filter: receives the continuation and the raw text
/// argument and returns the composed predicate.
pub type FilterFn<'a, A> = dyn Fn(
        Predicate<'a, <A as Adapter>::Node>,
        Option<&str>,
        &Options<'a, A>,
    ) -> Result<Predicate<'a, <A as Adapter>::Node>>
    + 'a;

/// A caller-supplied pure check, given the node and the raw text argument.
pub type CheckFn<'a, N> = dyn Fn(&N, Option<&str>) -> bool + 'a;

/// Boolean switches that can come from host configuration.
///
/// Deserializes from a map with camel-cased keys; missing keys keep their
/// defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Flags {
    /// XML documents: names are case-sensitive and no attribute values are
    /// implicitly case-insensitive.
    pub xml_mode: bool,
    /// Lower-case tag names even in XML mode.
    pub lower_case_tags: bool,
    /// Lower-case attribute names even in XML mode.
    pub lower_case_attribute_names: bool,
    /// Honor the quirks-mode case flag on attribute selectors.
    pub quirks_mode: bool,
    /// Accept selectors that start with a combinator.
    pub relative_selector: bool,
    /// Memoize failed ancestors in descendant walks.
    pub cache_results: bool,
}

impl Default for Flags {
    fn default() -> Self {
        Self {
            xml_mode: false,
            lower_case_tags: false,
            lower_case_attribute_names: false,
            quirks_mode: false,
            relative_selector: true,
            cache_results: true,
        }
    }
}

impl Flags {
    /// Whether tag names in selectors are lower-cased before comparison.
    #[must_use]
    pub const fn fold_tags(&self) -> bool {
        !self.xml_mode || self.lower_case_tags
    }

    /// Whether attribute names in selectors are lower-cased before lookup.
    #[must_use]
    pub const fn fold_attribute_names(&self) -> bool {
        !self.xml_mode || self.lower_case_attribute_names
    }
}

/// Nodes that anchor relative selectors and `:scope`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchContext<N> {
    /// A single scope node.
    Node(N),
    /// An explicit, ordered collection of scope nodes.
    Nodes(Vec<N>),
}

/// Scope anchor as seen by the compiler.
pub(crate) enum Context<N> {
    /// Fixed scope nodes; `array` records whether the caller passed a
    /// collection rather than a single node.
    Nodes { nodes: Rc<[N]>, array: bool },
    /// A slot filled with the candidate node right before an embedded
    /// selector is searched (`:has`). Counts as a collection context.
    Placeholder(Rc<RefCell<Option<N>>>),
}

impl<N> Clone for Context<N> {
    fn clone(&self) -> Self {
        match self {
            Self::Nodes { nodes, array } => Self::Nodes {
                nodes: Rc::clone(nodes),
                array: *array,
            },
            Self::Placeholder(slot) => Self::Placeholder(Rc::clone(slot)),
        }
    }
}

impl<N: Clone> Context<N> {
    pub(crate) fn from_match_context(context: &MatchContext<N>) -> Self {
        match context {
            MatchContext::Node(node) => Self::Nodes {
                nodes: Rc::from(vec![node.clone()]),
                array: false,
            },
            MatchContext::Nodes(nodes) => Self::Nodes {
                nodes: Rc::from(nodes.as_slice()),
                array: true,
            },
        }
    }

    pub(crate) const fn is_array(&self) -> bool {
        match self {
            Self::Nodes { array, .. } => *array,
            Self::Placeholder(_) => false,
        }
    }
}

/// A caller-supplied pure check and whether it takes an argument.
pub struct CustomCheck<'a, N> {
    pub(crate) check: Rc<CheckFn<'a, N>>,
    pub(crate) takes_argument: bool,
}

impl<N> Clone for CustomCheck<'_, N> {
    fn clone(&self) -> Self {
        Self {
            check: Rc::clone(&self.check),
            takes_argument: self.takes_argument,
        }
    }
}

/// Caller pseudo-classes, merged over the built-in tables.
pub struct PseudoTable<'a, A: Adapter> {
    pub(crate) filters: HashMap<String, Rc<FilterFn<'a, A>>>,
    pub(crate) pseudos: HashMap<String, CustomCheck<'a, A::Node>>,
    pub(crate) aliases: HashMap<String, SelectorList>,
}

impl<A: Adapter> Default for PseudoTable<'_, A> {
    fn default() -> Self {
        Self {
            filters: HashMap::new(),
            pseudos: HashMap::new(),
            aliases: HashMap::new(),
        }
    }
}

impl<A: Adapter> Clone for PseudoTable<'_, A> {
    fn clone(&self) -> Self {
        Self {
            filters: self.filters.clone(),
            pseudos: self.pseudos.clone(),
            aliases: self.aliases.clone(),
        }
    }
}

/// Everything a compilation needs besides the selector itself.
///
/// ```
/// use sprig_dom::DomTree;
/// use sprig_select::options::{Flags, Options};
///
/// let tree = DomTree::new();
/// let options = Options::new(&tree).with_flags(Flags {
///     cache_results: false,
///     ..Flags::default()
/// });
/// assert!(!options.flags().cache_results);
/// ```
pub struct Options<'a, A: Adapter> {
    pub(crate) adapter: &'a A,
    pub(crate) equals: Rc<EqualsFn<'a, A::Node>>,
    pub(crate) context: Option<MatchContext<A::Node>>,
    pub(crate) root: Predicate<'a, A::Node>,
    pub(crate) flags: Flags,
    pub(crate) pseudos: Rc<PseudoTable<'a, A>>,
    /// Whether groups are anchored at `:scope` when a context is present.
    pub(crate) anchor_to_context: bool,
}

impl<A: Adapter> Clone for Options<'_, A> {
    fn clone(&self) -> Self {
        Self {
            adapter: self.adapter,
            equals: Rc::clone(&self.equals),
            context: self.context.clone(),
            root: self.root.clone(),
            flags: self.flags,
            pseudos: Rc::clone(&self.pseudos),
            anchor_to_context: self.anchor_to_context,
        }
    }
}

impl<A: Adapter> fmt::Debug for Options<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("flags", &self.flags)
            .field("has_context", &self.context.is_some())
            .field("root", &self.root)
            .field("custom_filters", &self.pseudos.filters.len())
            .field("custom_pseudos", &self.pseudos.pseudos.len())
            .field("custom_aliases", &self.pseudos.aliases.len())
            .finish_non_exhaustive()
    }
}

impl<'a, A> Options<'a, A>
where
    A: Adapter,
    A::Node: 'a,
{
    /// Default options over the given adapter; identity comes from
    /// [`Adapter::equals`].
    #[must_use]
    pub fn new(adapter: &'a A) -> Self {
        Self {
            adapter,
            equals: Rc::new(move |a: &A::Node, b: &A::Node| adapter.equals(a, b)),
            context: None,
            root: Predicate::AlwaysTrue,
            flags: Flags::default(),
            pseudos: Rc::new(PseudoTable::default()),
            anchor_to_context: true,
        }
    }

    /// The adapter.
    #[must_use]
    pub const fn adapter(&self) -> &'a A {
        self.adapter
    }

    /// The active flags.
    #[must_use]
    pub const fn flags(&self) -> &Flags {
        &self.flags
    }

    /// Identity comparison in effect.
    #[must_use]
    pub fn equals(&self, a: &A::Node, b: &A::Node) -> bool {
        (self.equals)(a, b)
    }

    /// Replace the identity comparison.
    #[must_use]
    pub fn with_equals(mut self, equals: impl Fn(&A::Node, &A::Node) -> bool + 'a) -> Self {
        self.equals = Rc::new(equals);
        self
    }

    /// Set an explicit match context. Takes precedence over a context passed
    /// to the compile call.
    #[must_use]
    pub fn with_context(mut self, context: MatchContext<A::Node>) -> Self {
        self.context = Some(context);
        self
    }

    /// Replace the predicate every group's outermost combinator finally
    /// defers to (default: always true).
    #[must_use]
    pub fn with_root(mut self, root: Predicate<'a, A::Node>) -> Self {
        self.root = root;
        self
    }

    /// Replace all flags.
    #[must_use]
    pub const fn with_flags(mut self, flags: Flags) -> Self {
        self.flags = flags;
        self
    }

    /// Register a filter pseudo-class. Caller entries win over built-ins.
    #[must_use]
    pub fn with_filter(
        mut self,
        name: &str,
        filter: impl Fn(
            Predicate<'a, A::Node>,
            Option<&str>,
            &Options<'a, A>,
        ) -> Result<Predicate<'a, A::Node>>
        + 'a,
    ) -> Self {
        let _ = Rc::make_mut(&mut self.pseudos)
            .filters
            .insert(name.to_string(), Rc::new(filter));
        self
    }

    /// Register an argument-less pseudo-class check.
    #[must_use]
    pub fn with_pseudo(mut self, name: &str, check: impl Fn(&A::Node) -> bool + 'a) -> Self {
        let custom = CustomCheck {
            check: Rc::new(move |node: &A::Node, _: Option<&str>| check(node)),
            takes_argument: false,
        };
        let _ = Rc::make_mut(&mut self.pseudos)
            .pseudos
            .insert(name.to_string(), custom);
        self
    }

    /// Register a pseudo-class check that requires a text argument.
    #[must_use]
    pub fn with_pseudo_arg(
        mut self,
        name: &str,
        check: impl Fn(&A::Node, &str) -> bool + 'a,
    ) -> Self {
        let custom = CustomCheck {
            check: Rc::new(move |node: &A::Node, arg: Option<&str>| {
                check(node, arg.unwrap_or_default())
            }),
            takes_argument: true,
        };
        let _ = Rc::make_mut(&mut self.pseudos)
            .pseudos
            .insert(name.to_string(), custom);
        self
    }

    /// Register a pseudo-class that stands for another selector list.
    #[must_use]
    pub fn with_alias(mut self, name: &str, selectors: SelectorList) -> Self {
        let _ = Rc::make_mut(&mut self.pseudos)
            .aliases
            .insert(name.to_string(), selectors);
        self
    }

    /// Options for compiling an embedded selector: same adapter, identity,
    /// case handling and pseudo tables, but no context, the default root and
    /// relative selectors enabled.
    pub(crate) fn for_subselect(&self) -> Self {
        Self {
            adapter: self.adapter,
            equals: Rc::clone(&self.equals),
            context: None,
            root: Predicate::AlwaysTrue,
            flags: Flags {
                relative_selector: true,
                ..self.flags
            },
            pseudos: Rc::clone(&self.pseudos),
            anchor_to_context: true,
        }
    }

    /// Compile groups as written: a context still feeds `:scope`, but groups
    /// without a leading combinator are not prefixed with `:scope`.
    pub(crate) const fn unanchored(mut self) -> Self {
        self.anchor_to_context = false;
        self
    }

    /// Disable result caching. Used where a continuation depends on state
    /// that changes between evaluations.
    pub(crate) const fn uncached(mut self) -> Self {
        self.flags.cache_results = false;
        self
    }

    /// A shareable handle on the identity comparison, for closures.
    pub(crate) fn equals_fn(&self) -> Rc<EqualsFn<'a, A::Node>> {
        Rc::clone(&self.equals)
    }
}
