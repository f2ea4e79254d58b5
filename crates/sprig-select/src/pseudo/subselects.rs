//! Pseudo-classes with an embedded selector list.
//!
//! [§ 4 Logical combinations](https://www.w3.org/TR/selectors-4/#logical-combination)

use std::cell::RefCell;
use std::rc::Rc;

use strum_macros::EnumString;

use crate::adapter::Adapter;
use crate::compile::compile_token;
use crate::error::Result;
use crate::options::{Context, Options};
use crate::predicate::Predicate;
use crate::query::{exists_one, next_siblings_by};
use crate::token::{SelectorList, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum Subselect {
    /// [§ 4.2 The matches-any pseudo-class](https://www.w3.org/TR/selectors-4/#matches)
    Is,
    /// Legacy name of `:is()`.
    Matches,
    /// [§ 4.4 The specificity-adjustment pseudo-class](https://www.w3.org/TR/selectors-4/#zero-matches).
    /// Specificity plays no part in matching, so this is `:is()`.
    Where,
    /// [§ 4.3 The negation pseudo-class](https://www.w3.org/TR/selectors-4/#negation)
    Not,
    /// [§ 4.5 The relational pseudo-class](https://www.w3.org/TR/selectors-4/#relational)
    Has,
}

impl Subselect {
    /// Compile the subselect in front of `next`. `:is()` and `:not()` take
    /// their argument as written; a `:scope` inside it refers to `context`.
    pub(crate) fn compile<'a, A>(
        self,
        next: Predicate<'a, A::Node>,
        selectors: &SelectorList,
        options: &Options<'a, A>,
        context: Option<&Context<A::Node>>,
    ) -> Result<Predicate<'a, A::Node>>
    where
        A: Adapter,
        A::Node: 'a,
    {
        match self {
            Self::Is | Self::Matches | Self::Where => {
                let options = options.for_subselect().unanchored();
                let compiled = compile_token(selectors, &options, context)?;
                Ok(compiled.predicate.and(next))
            }
            Self::Not => {
                let options = options.for_subselect().unanchored();
                let compiled = compile_token(selectors, &options, context)?;
                Ok(compiled.predicate.negate().and(next))
            }
            Self::Has => has(next, selectors, options),
        }
    }
}

/// `:has()`: some descendant (or, for sibling-relative arguments, some
/// following sibling or its descendants) matches the argument.
///
/// Arguments without combinators are plain descendant searches. Arguments
/// with combinators are relative to the candidate node: they are compiled
/// against a placeholder scope, and the candidate is written into the
/// placeholder right before each search.
fn has<'a, A>(
    next: Predicate<'a, A::Node>,
    selectors: &SelectorList,
    options: &Options<'a, A>,
) -> Result<Predicate<'a, A::Node>>
where
    A: Adapter,
    A::Node: 'a,
{
    let adapter = options.adapter;
    let relative = selectors
        .iter()
        .any(|group| group.iter().any(Token::is_traversal));
    let slot = relative.then(|| Rc::new(RefCell::new(None)));
    let context = slot.clone().map(Context::Placeholder);

    // Descendant walks in a relative argument end in the slot, which changes
    // per candidate: their failures can't be cached.
    let options = if relative {
        options.for_subselect().uncached()
    } else {
        options.for_subselect()
    };
    let compiled = compile_token(selectors, &options, context.as_ref())?;
    if compiled.predicate.is_always_false() {
        return Ok(Predicate::AlwaysFalse);
    }
    let searches_siblings = compiled.should_test_next_siblings;
    let always = compiled.predicate.is_always_true();
    let has_element = compiled.predicate.guard(move |node| adapter.is_tag(node));

    match slot {
        Some(slot) if !always => {
            let equals = options.equals_fn();
            Ok(next.then(move |node| {
                *slot.borrow_mut() = Some(node.clone());
                let mut candidates = adapter.children(node);
                if searches_siblings {
                    candidates.extend(next_siblings_by(adapter, &*equals, node));
                }
                exists_one(adapter, &candidates, |child| has_element.test(child))
            }))
        }
        _ => Ok(next.then(move |node| {
            exists_one(adapter, &adapter.children(node), |child| has_element.test(child))
        })),
    }
}
