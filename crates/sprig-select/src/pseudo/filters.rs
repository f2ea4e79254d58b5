//! Filters: pseudo-classes that see their argument and the continuation at
//! compile time and build the predicate themselves.

use strum_macros::{EnumString, IntoStaticStr};

use crate::adapter::{Adapter, ElementState};
use crate::attributes::compile_attribute;
use crate::cache::cache_parent_results;
use crate::error::{CompileError, Result};
use crate::nth::{self, NthCheck};
use crate::options::{Context, Options};
use crate::predicate::Predicate;
use crate::token::{AttributeAction, AttributeSelector};

/// The built-in filters, by pseudo-class name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum Filter {
    /// `:contains(text)`, non-standard.
    Contains,
    /// `:icontains(text)`, non-standard.
    Icontains,
    /// [§ 14.4.1](https://www.w3.org/TR/selectors-4/#nth-child-pseudo)
    NthChild,
    /// [§ 14.4.2](https://www.w3.org/TR/selectors-4/#nth-last-child-pseudo)
    NthLastChild,
    /// [§ 14.5.1](https://www.w3.org/TR/selectors-4/#nth-of-type-pseudo)
    NthOfType,
    /// [§ 14.5.2](https://www.w3.org/TR/selectors-4/#nth-last-of-type-pseudo)
    NthLastOfType,
    /// [§ 14.1](https://www.w3.org/TR/selectors-4/#the-root-pseudo)
    Root,
    /// [§ 9.3](https://www.w3.org/TR/selectors-4/#the-scope-pseudo)
    Scope,
    /// [§ 10.2](https://www.w3.org/TR/selectors-4/#the-hover-pseudo)
    Hover,
    /// [§ 8.3](https://www.w3.org/TR/selectors-4/#link)
    Visited,
    /// [§ 10.3](https://www.w3.org/TR/selectors-4/#the-active-pseudo)
    Active,
    /// [§ 7.2](https://www.w3.org/TR/selectors-4/#the-lang-pseudo), reduced to
    /// an exact `lang` attribute match.
    Lang,
}

/// Which siblings an `nth-*` filter counts, and from which end.
#[derive(Clone, Copy)]
struct NthWalk {
    from_end: bool,
    same_type: bool,
}

impl Filter {
    pub(crate) fn compile<'a, A>(
        self,
        next: Predicate<'a, A::Node>,
        argument: Option<&str>,
        options: &Options<'a, A>,
        context: Option<&Context<A::Node>>,
    ) -> Result<Predicate<'a, A::Node>>
    where
        A: Adapter,
        A::Node: 'a,
    {
        let name: &'static str = self.into();
        let adapter = options.adapter;

        let compiled = match self {
            Self::Contains => {
                let text = required(name, argument)?.to_string();
                cache_parent_results(next, adapter, options.flags.cache_results, move |node| {
                    adapter.text(node).contains(text.as_str())
                })
            }
            Self::Icontains => {
                let text = required(name, argument)?.to_lowercase();
                cache_parent_results(next, adapter, options.flags.cache_results, move |node| {
                    adapter.text(node).to_lowercase().contains(text.as_str())
                })
            }

            Self::NthChild => nth_filter(next, name, argument, options, NthWalk {
                from_end: false,
                same_type: false,
            })?,
            Self::NthLastChild => nth_filter(next, name, argument, options, NthWalk {
                from_end: true,
                same_type: false,
            })?,
            Self::NthOfType => nth_filter(next, name, argument, options, NthWalk {
                from_end: false,
                same_type: true,
            })?,
            Self::NthLastOfType => nth_filter(next, name, argument, options, NthWalk {
                from_end: true,
                same_type: true,
            })?,

            Self::Root => root(next, adapter),
            Self::Scope => scope(next, options, context),

            Self::Hover => dynamic_state(next, adapter, ElementState::Hovered),
            Self::Visited => dynamic_state(next, adapter, ElementState::Visited),
            Self::Active => dynamic_state(next, adapter, ElementState::Active),

            Self::Lang => {
                let value = required(name, argument)?;
                let selector = AttributeSelector::new("lang", AttributeAction::Equals, value);
                compile_attribute(next, &selector, options)
            }
        };

        Ok(compiled)
    }
}

fn required<'t>(name: &str, argument: Option<&'t str>) -> Result<&'t str> {
    argument.ok_or_else(|| CompileError::invalid_args(name, "requires an argument"))
}

/// The element has no element parent (the document element, or a detached
/// element).
fn root<'a, A>(next: Predicate<'a, A::Node>, adapter: &'a A) -> Predicate<'a, A::Node>
where
    A: Adapter,
    A::Node: 'a,
{
    next.guard(move |node| adapter.element_parent(node).is_none())
}

fn scope<'a, A>(
    next: Predicate<'a, A::Node>,
    options: &Options<'a, A>,
    context: Option<&Context<A::Node>>,
) -> Predicate<'a, A::Node>
where
    A: Adapter,
    A::Node: 'a,
{
    let equals = options.equals_fn();
    match context {
        None => root(next, options.adapter),
        Some(Context::Nodes { nodes, .. }) => match nodes.len() {
            0 => root(next, options.adapter),
            1 => {
                let scope = nodes[0].clone();
                next.guard(move |node| equals(&scope, node))
            }
            _ => {
                let nodes = nodes.clone();
                next.guard(move |node| nodes.iter().any(|scope| equals(scope, node)))
            }
        },
        // Read at match time: the slot is filled right before each search.
        Some(Context::Placeholder(slot)) => {
            let slot = slot.clone();
            next.guard(move |node| slot.borrow().as_ref().is_some_and(|scope| equals(scope, node)))
        }
    }
}

fn dynamic_state<'a, A>(
    next: Predicate<'a, A::Node>,
    adapter: &'a A,
    state: ElementState,
) -> Predicate<'a, A::Node>
where
    A: Adapter,
    A::Node: 'a,
{
    if !adapter.supports_state(state) {
        return Predicate::AlwaysFalse;
    }
    next.guard(move |node| adapter.is_in_state(node, state))
}

fn nth_filter<'a, A>(
    next: Predicate<'a, A::Node>,
    name: &str,
    argument: Option<&str>,
    options: &Options<'a, A>,
    walk: NthWalk,
) -> Result<Predicate<'a, A::Node>>
where
    A: Adapter,
    A::Node: 'a,
{
    let formula = required(name, argument)?;
    let check = nth::compile(formula)
        .ok_or_else(|| CompileError::invalid_args(name, format!("invalid formula {formula:?}")))?;
    let adapter = options.adapter;

    match check {
        NthCheck::Never => Ok(Predicate::AlwaysFalse),
        // Any position will do, as long as the node is some element's child.
        NthCheck::Always => Ok(next.guard(move |node| adapter.element_parent(node).is_some())),
        NthCheck::Formula { .. } => {
            let equals = options.equals_fn();
            Ok(next.guard(move |node| {
                let siblings = adapter.siblings(node);
                let tag_name = walk.same_type.then(|| adapter.name(node).into_owned());
                let counts = |sibling: &&A::Node| {
                    adapter.is_tag(*sibling)
                        && tag_name
                            .as_deref()
                            .is_none_or(|tag_name| adapter.name(*sibling) == tag_name)
                };
                let before = |sibling: &&A::Node| !equals(node, *sibling);
                let position = if walk.from_end {
                    siblings.iter().rev().take_while(before).filter(counts).count()
                } else {
                    siblings.iter().take_while(before).filter(counts).count()
                };
                i64::try_from(position).is_ok_and(|position| check.matches(position))
            }))
        }
    }
}
