//! Compiled predicates and their short-circuit algebra.
//!
//! Every compilation step produces a [`Predicate`]. The two sentinels are real
//! predicates, but the compiler also inspects them: wrapping
//! [`Predicate::AlwaysFalse`] in another test is still `AlwaysFalse`, and
//! OR-ing it with anything yields the other operand, so whole subtrees of a
//! selector can be discarded before any node is ever visited.

use std::fmt;
use std::rc::Rc;

/// The callable behind a dynamic predicate.
pub type MatchFn<'a, N> = dyn Fn(&N) -> bool + 'a;

/// A node test produced by compilation.
pub enum Predicate<'a, N> {
    /// Matches every node.
    AlwaysTrue,
    /// Matches no node.
    AlwaysFalse,
    /// Runs a check against the node.
    Dynamic(Rc<MatchFn<'a, N>>),
}

impl<N> Clone for Predicate<'_, N> {
    fn clone(&self) -> Self {
        match self {
            Self::AlwaysTrue => Self::AlwaysTrue,
            Self::AlwaysFalse => Self::AlwaysFalse,
            Self::Dynamic(f) => Self::Dynamic(Rc::clone(f)),
        }
    }
}

impl<N> fmt::Debug for Predicate<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlwaysTrue => f.write_str("AlwaysTrue"),
            Self::AlwaysFalse => f.write_str("AlwaysFalse"),
            Self::Dynamic(func) => write!(f, "Dynamic({:p})", Rc::as_ptr(func).cast::<()>()),
        }
    }
}

impl<'a, N: 'a> Predicate<'a, N> {
    /// Wrap a closure.
    #[must_use]
    pub fn new(check: impl Fn(&N) -> bool + 'a) -> Self {
        Self::Dynamic(Rc::new(check))
    }

    /// The sentinel for a constant answer.
    #[must_use]
    pub const fn constant(value: bool) -> Self {
        if value { Self::AlwaysTrue } else { Self::AlwaysFalse }
    }

    /// Evaluate against a node.
    #[must_use]
    pub fn test(&self, node: &N) -> bool {
        match self {
            Self::AlwaysTrue => true,
            Self::AlwaysFalse => false,
            Self::Dynamic(check) => check(node),
        }
    }

    /// Returns `true` for the [`Predicate::AlwaysTrue`] sentinel.
    #[must_use]
    pub const fn is_always_true(&self) -> bool {
        matches!(self, Self::AlwaysTrue)
    }

    /// Returns `true` for the [`Predicate::AlwaysFalse`] sentinel.
    #[must_use]
    pub const fn is_always_false(&self) -> bool {
        matches!(self, Self::AlwaysFalse)
    }

    /// Identity comparison: the same sentinel, or the same closure allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AlwaysTrue, Self::AlwaysTrue) | (Self::AlwaysFalse, Self::AlwaysFalse) => true,
            (Self::Dynamic(a), Self::Dynamic(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// `check(node) && self(node)`: the check runs first.
    #[must_use]
    pub fn guard(self, check: impl Fn(&N) -> bool + 'a) -> Self {
        match self {
            Self::AlwaysFalse => Self::AlwaysFalse,
            Self::AlwaysTrue => Self::new(check),
            Self::Dynamic(next) => Self::new(move |node| check(node) && next(node)),
        }
    }

    /// `self(node) && check(node)`: the continuation runs first.
    #[must_use]
    pub fn then(self, check: impl Fn(&N) -> bool + 'a) -> Self {
        match self {
            Self::AlwaysFalse => Self::AlwaysFalse,
            Self::AlwaysTrue => Self::new(check),
            Self::Dynamic(next) => Self::new(move |node| next(node) && check(node)),
        }
    }

    /// Short-circuit AND; `self` is evaluated first.
    #[must_use]
    pub fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::AlwaysFalse, _) | (_, Self::AlwaysFalse) => Self::AlwaysFalse,
            (Self::AlwaysTrue, rhs) => rhs,
            (lhs, Self::AlwaysTrue) => lhs,
            (Self::Dynamic(a), Self::Dynamic(b)) => Self::new(move |node| a(node) && b(node)),
        }
    }

    /// Short-circuit OR; `self` is evaluated first.
    #[must_use]
    pub fn or(self, other: Self) -> Self {
        match (self, other) {
            (Self::AlwaysTrue, _) | (_, Self::AlwaysTrue) => Self::AlwaysTrue,
            (Self::AlwaysFalse, rhs) => rhs,
            (lhs, Self::AlwaysFalse) => lhs,
            (Self::Dynamic(a), Self::Dynamic(b)) => Self::new(move |node| a(node) || b(node)),
        }
    }

    /// Logical negation.
    #[must_use]
    pub fn negate(self) -> Self {
        match self {
            Self::AlwaysTrue => Self::AlwaysFalse,
            Self::AlwaysFalse => Self::AlwaysTrue,
            Self::Dynamic(check) => Self::new(move |node| !check(node)),
        }
    }
}

/// The result of compiling a selector list.
pub struct CompiledQuery<'a, N> {
    /// Matches nodes selected by any group of the list.
    pub predicate: Predicate<'a, N>,
    /// Set when a group is `:scope` followed by `+` or `~`: such a selector can
    /// match several following siblings of each scope node, so callers
    /// searching from the scope must also search its next siblings.
    pub should_test_next_siblings: bool,
}

impl<N> Clone for CompiledQuery<'_, N> {
    fn clone(&self) -> Self {
        Self {
            predicate: self.predicate.clone(),
            should_test_next_siblings: self.should_test_next_siblings,
        }
    }
}

impl<N> fmt::Debug for CompiledQuery<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompiledQuery")
            .field("predicate", &self.predicate)
            .field("should_test_next_siblings", &self.should_test_next_siblings)
            .finish()
    }
}

impl<'a, N: 'a> CompiledQuery<'a, N> {
    /// Evaluate the compiled selector against a node.
    #[must_use]
    pub fn matches(&self, node: &N) -> bool {
        self.predicate.test(node)
    }
}
