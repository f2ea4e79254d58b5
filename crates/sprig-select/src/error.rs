//! Compilation errors.
//!
//! Compilation is all-or-nothing: any of these aborts the whole selector list
//! and no partial predicate is returned. A compiled predicate never fails at
//! match time.

use thiserror::Error;

/// Why a selector list could not be compiled.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompileError {
    /// Pseudo-elements and column combinators cannot be matched against
    /// tree nodes.
    #[error("{0} are not supported")]
    UnsupportedFeature(&'static str),

    /// The pseudo-class name is not a known subselect, alias, filter or pseudo.
    #[error("unknown pseudo-class :{name}")]
    UnknownPseudoClass {
        /// Name as written in the selector, without the colon.
        name: String,
    },

    /// A known pseudo-class was given the wrong kind or number of arguments.
    #[error("invalid arguments for pseudo-class :{name}: {reason}")]
    InvalidPseudoArguments {
        /// Name of the pseudo-class.
        name: String,
        /// What was wrong with the argument.
        reason: String,
    },

    /// A selector started with a combinator while relative selectors are off.
    #[error("relative selectors are not allowed when relative selector support is disabled")]
    RelativeSelectorDisallowed,
}

impl CompileError {
    pub(crate) fn unknown_pseudo(name: &str) -> Self {
        Self::UnknownPseudoClass {
            name: name.to_string(),
        }
    }

    pub(crate) fn invalid_args(name: &str, reason: impl Into<String>) -> Self {
        Self::InvalidPseudoArguments {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the compiler.
pub type Result<T, E = CompileError> = std::result::Result<T, E>;
