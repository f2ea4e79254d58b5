//! Compiles tokenized CSS selectors into predicates over any tree.
//!
//! # Scope
//!
//! This crate implements:
//! - **Selector compilation** ([Selectors Level 4](https://www.w3.org/TR/selectors-4/))
//!   - Type, universal and attribute selectors, all eight attribute actions
//!   - Combinators: descendant, child, parent (`<`), general and adjacent sibling
//!   - Selector lists, with groups that can never match dropped at compile time
//!   - Relative selectors, absolutized against an optional context
//!     ([§ 3.4.1](https://www.w3.org/TR/selectors-4/#absolutizing))
//!
//! - **Pseudo-classes**
//!   - Logical: `:is()`, `:where()`, `:matches()`, `:not()`, `:has()`
//!   - Structural: `:nth-child()` and friends, `:first-child`, `:only-of-type`,
//!     `:empty`, `:root`, `:scope`
//!   - Form and link shorthands (`:checked`, `:disabled`, `:any-link`, ...)
//!   - Caller-defined pseudo-classes, filters and aliases
//!
//! - **Querying**: `select_all`, `select_one` and `is_match` over any
//!   [`Adapter`](adapter::Adapter); an adapter for [`sprig_dom::DomTree`] is
//!   included.
//!
//! # Not Implemented
//!
//! - Selector text parsing: input is already tokenized ([`token`])
//! - Pseudo-elements and the column combinator (compiling one is an error)
//! - Namespaces
//!
//! # Example
//!
//! ```
//! use sprig_dom::{DomTree, ElementData, NodeId};
//! use sprig_select::options::Options;
//! use sprig_select::query::compile;
//! use sprig_select::token::build::{descendant, pseudo_arg, tag};
//!
//! let mut tree = DomTree::new();
//! let body = tree.append_element(NodeId::ROOT, ElementData::new("body"));
//! let first = tree.append_element(body, ElementData::new("p"));
//! let second = tree.append_element(body, ElementData::new("p"));
//!
//! // body p:nth-child(odd)
//! let selectors = vec![vec![tag("body"), descendant(), tag("p"), pseudo_arg("nth-child", "odd")]];
//! let query = compile(&selectors, &Options::new(&tree), None)?;
//! assert!(query.matches(&first));
//! assert!(!query.matches(&second));
//! # Ok::<(), sprig_select::error::CompileError>(())
//! ```

/// Read access to host trees.
pub mod adapter;
mod attributes;
/// Memoization over tree nodes.
pub mod cache;
mod compile;
/// Compilation errors.
pub mod error;
mod general;
/// `An+B` formulas.
pub mod nth;
/// Compile options.
pub mod options;
/// Compiled predicates.
pub mod predicate;
mod pseudo;
/// Compiling, matching and searching.
pub mod query;
/// Selector tokens.
pub mod token;

pub use adapter::{Adapter, ElementState, NodeKey};
pub use error::{CompileError, Result};
pub use options::{Flags, MatchContext, Options};
pub use predicate::{CompiledQuery, Predicate};
pub use query::{compile, is_match, select_all, select_one};
pub use token::{SelectorGroup, SelectorList, Token};
