//! The top-level compiler: selector list in, [`CompiledQuery`] out.
//!
//! Steps, in order:
//!
//! 1. sort the simple selectors of every group by cost ([`sort`]);
//! 2. anchor relative groups at `:scope` ([`absolutize`]);
//! 3. rewrite `:scope` groups whose second token needs special handling;
//! 4. fold each group into a predicate;
//! 5. OR the groups together, dropping the ones that can never match.
//!
//! The caller's tokens are never modified; all rewrites happen on a copy.

mod absolutize;
mod sort;

use crate::adapter::Adapter;
use crate::error::{CompileError, Result};
use crate::general::compile_general_selector;
use crate::options::{Context, Options};
use crate::predicate::{CompiledQuery, Predicate};
use crate::token::{SelectorList, Token};

use absolutize::{absolutize, has_relative_group};
use sort::sort_rules;

/// Compile a selector list.
///
/// An explicit context on `options` takes precedence over `context`.
pub(crate) fn compile_token<'a, A>(
    selectors: &SelectorList,
    options: &Options<'a, A>,
    context: Option<&Context<A::Node>>,
) -> Result<CompiledQuery<'a, A::Node>>
where
    A: Adapter,
    A::Node: 'a,
{
    let mut groups = selectors.clone();
    for group in &mut groups {
        sort_rules(group);
    }

    let explicit = options.context.as_ref().map(Context::from_match_context);
    let context = explicit.as_ref().or(context);
    let array_context = context.is_some_and(Context::is_array);

    if options.flags.relative_selector {
        let anchor = context.filter(|_| options.anchor_to_context);
        absolutize(&mut groups, options.adapter, anchor);
    } else if has_relative_group(&groups) {
        return Err(CompileError::RelativeSelectorDisallowed);
    }

    let mut should_test_next_siblings = false;
    let mut query = Predicate::AlwaysFalse;

    for mut group in groups {
        if group.len() >= 2 && group[0].is_scope() {
            if array_context && group[1] == Token::Descendant {
                group[1] = Token::FlexibleDescendant;
            } else if matches!(group[1], Token::Sibling | Token::Adjacent) {
                should_test_next_siblings = true;
            }
        }

        let compiled = compile_rules(&group, options, context)?;
        query = union(query, compiled, &options.root);
    }

    let count = selectors.len();
    log::debug!(
        "compiled {count} selector group(s): {query:?}, should_test_next_siblings = {should_test_next_siblings}"
    );

    Ok(CompiledQuery {
        predicate: query,
        should_test_next_siblings,
    })
}

/// Fold one group left to right, starting from the root predicate.
fn compile_rules<'a, A>(
    group: &[Token],
    options: &Options<'a, A>,
    context: Option<&Context<A::Node>>,
) -> Result<Predicate<'a, A::Node>>
where
    A: Adapter,
    A::Node: 'a,
{
    let mut predicate = options.root.clone();
    for token in group {
        if predicate.is_always_false() {
            break;
        }
        predicate = compile_general_selector(predicate, token, options, context)?;
    }
    Ok(predicate)
}

/// `a || b`, where never-matching operands vanish and a group that compiled
/// down to the bare root predicate absorbs the other.
fn union<'a, N: 'a>(
    a: Predicate<'a, N>,
    b: Predicate<'a, N>,
    root: &Predicate<'a, N>,
) -> Predicate<'a, N> {
    if b.is_always_false() || a.ptr_eq(root) {
        a
    } else if a.is_always_false() || b.ptr_eq(root) {
        b
    } else {
        a.or(b)
    }
}
