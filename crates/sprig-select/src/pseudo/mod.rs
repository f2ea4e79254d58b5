//! Pseudo-class resolution.
//!
//! Pseudo-classes come in four kinds:
//!
//! - **subselects** carry a selector list and compile it (`:is()`, `:not()`,
//!   `:has()`, ...);
//! - **aliases** stand for a fixed selector list and are compiled as its
//!   `:is()`;
//! - **filters** see the continuation and their text argument at compile time
//!   and may rearrange or drop the continuation (`:nth-child()`, `:scope`);
//! - **pseudos** are plain node checks run before the continuation.
//!
//! Entries registered on [`Options`] are consulted before the built-in
//! tables, so a caller can override any built-in name except the subselects.

mod aliases;
mod filters;
mod pseudos;
mod subselects;

use std::rc::Rc;

use crate::adapter::Adapter;
use crate::error::{CompileError, Result};
use crate::options::{Context, Options};
use crate::predicate::Predicate;
use crate::token::{PseudoData, PseudoSelector, SelectorList};

use aliases::Alias;
use filters::Filter;
use pseudos::Pseudo;
use subselects::Subselect;

/// Compile a pseudo-class token in front of `next`.
pub(crate) fn compile_pseudo_selector<'a, A>(
    next: Predicate<'a, A::Node>,
    selector: &PseudoSelector,
    options: &Options<'a, A>,
    context: Option<&Context<A::Node>>,
) -> Result<Predicate<'a, A::Node>>
where
    A: Adapter,
    A::Node: 'a,
{
    let name = selector.name.as_str();

    if let PseudoData::Groups(groups) = &selector.data {
        let subselect: Subselect = name
            .parse()
            .map_err(|_| CompileError::unknown_pseudo(name))?;
        return subselect.compile(next, groups, options, context);
    }
    let argument = selector.data.as_text();

    let custom = &options.pseudos;
    if let Some(selectors) = custom.aliases.get(name) {
        return compile_alias(next, name, selectors, argument, options, context);
    }
    if let Some(filter) = custom.filters.get(name) {
        return filter(next, argument, options);
    }
    if let Some(pseudo) = custom.pseudos.get(name) {
        verify_arity(name, pseudo.takes_argument, argument)?;
        let check = Rc::clone(&pseudo.check);
        let argument = argument.map(str::to_string);
        return Ok(next.guard(move |node| check(node, argument.as_deref())));
    }

    if let Ok(alias) = name.parse::<Alias>() {
        return compile_alias(next, name, &alias.selectors(), argument, options, context);
    }
    if let Ok(filter) = name.parse::<Filter>() {
        return filter.compile(next, argument, options, context);
    }
    if let Ok(pseudo) = name.parse::<Pseudo>() {
        verify_arity(name, false, argument)?;
        let adapter = options.adapter;
        let equals = options.equals_fn();
        return Ok(next.guard(move |node| pseudo.check(adapter, &*equals, node)));
    }

    if name.parse::<Subselect>().is_ok() {
        return Err(CompileError::invalid_args(name, "expects a selector list"));
    }
    Err(CompileError::unknown_pseudo(name))
}

fn compile_alias<'a, A>(
    next: Predicate<'a, A::Node>,
    name: &str,
    selectors: &SelectorList,
    argument: Option<&str>,
    options: &Options<'a, A>,
    context: Option<&Context<A::Node>>,
) -> Result<Predicate<'a, A::Node>>
where
    A: Adapter,
    A::Node: 'a,
{
    verify_arity(name, false, argument)?;
    Subselect::Is.compile(next, selectors, options, context)
}

fn verify_arity(name: &str, takes_argument: bool, argument: Option<&str>) -> Result<()> {
    match (takes_argument, argument) {
        (true, None) => Err(CompileError::invalid_args(name, "requires an argument")),
        (false, Some(_)) => Err(CompileError::invalid_args(name, "doesn't take any arguments")),
        _ => Ok(()),
    }
}
