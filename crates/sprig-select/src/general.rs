//! Compilation of a single token in front of its continuation.
//!
//! [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
//!
//! Groups are compiled left to right, so the continuation `next` holds
//! everything to the token's left. Simple selectors test the node and then
//! defer to `next`; combinators move to related nodes and test `next` there.

use crate::adapter::Adapter;
use crate::attributes::compile_attribute;
use crate::cache::FailedAncestors;
use crate::error::{CompileError, Result};
use crate::options::{Context, Options};
use crate::predicate::Predicate;
use crate::pseudo::compile_pseudo_selector;
use crate::token::Token;

/// Compile `token` so that the resulting predicate ends in `next`.
pub(crate) fn compile_general_selector<'a, A>(
    next: Predicate<'a, A::Node>,
    token: &Token,
    options: &Options<'a, A>,
    context: Option<&Context<A::Node>>,
) -> Result<Predicate<'a, A::Node>>
where
    A: Adapter,
    A::Node: 'a,
{
    let adapter = options.adapter;

    let compiled = match token {
        Token::PseudoElement { .. } => {
            return Err(CompileError::UnsupportedFeature("pseudo-elements"));
        }
        Token::ColumnCombinator => {
            return Err(CompileError::UnsupportedFeature("column combinators"));
        }
        Token::Attribute(selector) => compile_attribute(next, selector, options),
        Token::Pseudo(selector) => compile_pseudo_selector(next, selector, options, context)?,

        Token::Tag { name, .. } => {
            let name = if options.flags.fold_tags() {
                name.to_lowercase()
            } else {
                name.clone()
            };
            next.guard(move |node| adapter.name(node) == name.as_str())
        }
        Token::Universal { .. } => next,

        _ if next.is_always_false() => Predicate::AlwaysFalse,

        Token::Descendant if options.flags.cache_results => {
            let failed = FailedAncestors::default();
            Predicate::new(move |node: &A::Node| {
                let mut current = node.clone();
                while let Some(parent) = adapter.parent(&current) {
                    let key = failed.key_of(adapter, &parent);
                    if !key.is_some_and(|key| failed.has_failed(key)) {
                        if adapter.is_tag(&parent) && next.test(&parent) {
                            return true;
                        }
                        if let Some(key) = key {
                            failed.record_failure(key);
                        }
                    }
                    current = parent;
                }
                false
            })
        }
        Token::Descendant => Predicate::new(move |node: &A::Node| {
            let mut current = node.clone();
            while let Some(parent) = adapter.parent(&current) {
                if adapter.is_tag(&parent) && next.test(&parent) {
                    return true;
                }
                current = parent;
            }
            false
        }),

        // Only produced by the compiler, for collection contexts: the scope
        // node itself counts.
        Token::FlexibleDescendant => Predicate::new(move |node: &A::Node| {
            let mut current = Some(node.clone());
            while let Some(candidate) = current {
                if adapter.is_tag(&candidate) && next.test(&candidate) {
                    return true;
                }
                current = adapter.parent(&candidate);
            }
            false
        }),

        Token::Parent => Predicate::new(move |node: &A::Node| {
            adapter
                .children(node)
                .iter()
                .any(|child| adapter.is_tag(child) && next.test(child))
        }),
        Token::Child => Predicate::new(move |node: &A::Node| {
            adapter
                .parent(node)
                .is_some_and(|parent| adapter.is_tag(&parent) && next.test(&parent))
        }),

        Token::Sibling => {
            let equals = options.equals_fn();
            Predicate::new(move |node: &A::Node| {
                adapter
                    .siblings(node)
                    .iter()
                    .take_while(|sibling| !equals(node, *sibling))
                    .any(|sibling| adapter.is_tag(sibling) && next.test(sibling))
            })
        }
        Token::Adjacent => {
            let equals = options.equals_fn();
            Predicate::new(move |node: &A::Node| {
                adapter
                    .siblings(node)
                    .iter()
                    .take_while(|sibling| !equals(node, *sibling))
                    .filter(|sibling| adapter.is_tag(*sibling))
                    .last()
                    .is_some_and(|previous| next.test(previous))
            })
        }
    };

    Ok(compiled)
}
