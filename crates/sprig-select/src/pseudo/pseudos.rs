//! Built-in argument-less pseudo-classes that are plain checks on a node.
//!
//! [§ 14 Tree-structural pseudo-classes](https://www.w3.org/TR/selectors-4/#structural-pseudos)

use strum_macros::EnumString;

use crate::adapter::Adapter;
use crate::options::EqualsFn;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum Pseudo {
    /// [§ 14.2](https://www.w3.org/TR/selectors-4/#the-empty-pseudo)
    Empty,
    FirstChild,
    LastChild,
    FirstOfType,
    LastOfType,
    OnlyOfType,
    OnlyChild,
}

impl Pseudo {
    pub(crate) fn check<A: Adapter>(
        self,
        adapter: &A,
        equals: &EqualsFn<'_, A::Node>,
        node: &A::Node,
    ) -> bool {
        match self {
            Self::Empty => adapter
                .children(node)
                .iter()
                .all(|child| !adapter.is_tag(child) && adapter.text(child).is_empty()),

            Self::FirstChild => adapter
                .siblings(node)
                .iter()
                .find(|sibling| adapter.is_tag(*sibling))
                .is_some_and(|first| equals(node, first)),

            Self::LastChild => adapter
                .siblings(node)
                .iter()
                .rev()
                .find(|sibling| adapter.is_tag(*sibling))
                .is_some_and(|last| equals(node, last)),

            Self::FirstOfType => {
                let name = adapter.name(node);
                adapter
                    .siblings(node)
                    .iter()
                    .find(|sibling| adapter.is_tag(*sibling) && adapter.name(*sibling) == name)
                    .is_some_and(|first| equals(node, first))
            }

            Self::LastOfType => {
                let name = adapter.name(node);
                adapter
                    .siblings(node)
                    .iter()
                    .rev()
                    .find(|sibling| adapter.is_tag(*sibling) && adapter.name(*sibling) == name)
                    .is_some_and(|last| equals(node, last))
            }

            Self::OnlyOfType => {
                let name = adapter.name(node);
                adapter.siblings(node).iter().all(|sibling| {
                    equals(node, sibling) || !adapter.is_tag(sibling) || adapter.name(sibling) != name
                })
            }

            Self::OnlyChild => adapter
                .siblings(node)
                .iter()
                .all(|sibling| equals(node, sibling) || !adapter.is_tag(sibling)),
        }
    }
}
