//! [§ 3.4.1 Absolutizing a relative selector](https://www.w3.org/TR/selectors-4/#absolutizing)

use crate::adapter::Adapter;
use crate::options::Context;
use crate::token::build::{descendant, scope};
use crate::token::{SelectorList, Token};

/// Anchor relative groups at `:scope`.
///
/// A group that starts with a combinator other than descendant gets `:scope`
/// prepended (`> p` becomes `:scope > p`). When there is a usable context, a
/// group that doesn't mention `:scope` anywhere becomes `:scope <group>`.
/// Every other group is left alone.
pub(crate) fn absolutize<A: Adapter>(
    selectors: &mut SelectorList,
    adapter: &A,
    context: Option<&Context<A::Node>>,
) {
    let has_context = match context {
        None => false,
        Some(Context::Placeholder(_)) => true,
        Some(Context::Nodes { nodes, .. }) => nodes
            .iter()
            .all(|node| adapter.is_tag(node) && adapter.element_parent(node).is_some()),
    };

    for group in selectors.iter_mut() {
        let leading_combinator = group
            .first()
            .is_some_and(|token| token.is_traversal() && *token != Token::Descendant);

        if leading_combinator {
            group.insert(0, scope());
        } else if has_context && !group.iter().any(Token::includes_scope_pseudo) {
            group.insert(0, descendant());
            group.insert(0, scope());
        } else {
            continue;
        }
        log::trace!("absolutized selector group to {group:?}");
    }
}

/// Returns `true` if any group starts with a combinator.
pub(crate) fn has_relative_group(selectors: &SelectorList) -> bool {
    selectors
        .iter()
        .any(|group| group.first().is_some_and(Token::is_traversal))
}
