//! Attribute selector matching.
//!
//! [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
//!
//! Each action compiles to a predicate that reads the attribute through the
//! adapter, fails fast when it is absent (except `!=`, where absence is a
//! match), and only then consults the continuation.

use crate::adapter::Adapter;
use crate::options::Options;
use crate::predicate::Predicate;
use crate::token::{AttributeAction, AttributeSelector, IgnoreCase};

/// HTML attributes whose values are compared case-insensitively unless the
/// selector says otherwise.
///
/// [HTML § 4.16.2 Case-sensitivity of selectors](https://html.spec.whatwg.org/multipage/semantics-other.html#case-sensitivity-of-selectors)
const CASE_INSENSITIVE_ATTRIBUTES: &[&str] = &[
    "accept",
    "accept-charset",
    "align",
    "alink",
    "axis",
    "bgcolor",
    "charset",
    "checked",
    "clear",
    "codetype",
    "color",
    "compact",
    "declare",
    "defer",
    "dir",
    "direction",
    "disabled",
    "enctype",
    "face",
    "frame",
    "hreflang",
    "http-equiv",
    "lang",
    "language",
    "link",
    "media",
    "method",
    "multiple",
    "nohref",
    "noresize",
    "noshade",
    "nowrap",
    "readonly",
    "rel",
    "rev",
    "rules",
    "scope",
    "scrolling",
    "selected",
    "shape",
    "target",
    "text",
    "type",
    "valign",
    "valuetype",
    "vlink",
];

fn should_ignore_case<A: Adapter>(name: &str, mode: IgnoreCase, options: &Options<'_, A>) -> bool {
    match mode {
        IgnoreCase::Insensitive => true,
        IgnoreCase::Sensitive => false,
        IgnoreCase::Quirks => options.flags.quirks_mode,
        IgnoreCase::Default => {
            !options.flags.xml_mode && CASE_INSENSITIVE_ATTRIBUTES.binary_search(&name).is_ok()
        }
    }
}

/// Compile one attribute test in front of `next`.
pub(crate) fn compile_attribute<'a, A>(
    next: Predicate<'a, A::Node>,
    selector: &AttributeSelector,
    options: &Options<'a, A>,
) -> Predicate<'a, A::Node>
where
    A: Adapter,
    A::Node: 'a,
{
    let adapter = options.adapter;
    let name = if options.flags.fold_attribute_names() {
        selector.name.to_lowercase()
    } else {
        selector.name.clone()
    };
    let ignore_case = should_ignore_case(&name, selector.ignore_case, options);
    let value = if ignore_case {
        selector.value.to_lowercase()
    } else {
        selector.value.clone()
    };
    let fold = move |attr: &str| {
        if ignore_case {
            attr.to_lowercase()
        } else {
            attr.to_string()
        }
    };

    match selector.action {
        // [attr]
        AttributeAction::Exists => next.guard(move |node| adapter.has_attribute(node, &name)),

        // [attr=value]
        AttributeAction::Equals => next.guard(move |node| {
            adapter
                .attribute_value(node, &name)
                .is_some_and(|attr| fold(&attr) == value)
        }),

        // [attr!=value]
        AttributeAction::Not => {
            if value.is_empty() {
                return next.guard(move |node| {
                    adapter
                        .attribute_value(node, &name)
                        .is_some_and(|attr| !attr.is_empty())
                });
            }
            next.guard(move |node| {
                adapter
                    .attribute_value(node, &name)
                    .is_none_or(|attr| fold(&attr) != value)
            })
        }

        // [attr|=value]
        AttributeAction::Hyphen => next.guard(move |node| {
            adapter.attribute_value(node, &name).is_some_and(|attr| {
                let attr = fold(&attr);
                attr.strip_prefix(value.as_str())
                    .is_some_and(|rest| rest.is_empty() || rest.starts_with('-'))
            })
        }),

        // [attr~=value]
        AttributeAction::Element => {
            if value.is_empty() || value.chars().any(char::is_whitespace) {
                return Predicate::AlwaysFalse;
            }
            next.guard(move |node| {
                adapter.attribute_value(node, &name).is_some_and(|attr| {
                    fold(&attr).split(char::is_whitespace).any(|word| word == value)
                })
            })
        }

        // [attr^=value]
        AttributeAction::Start => {
            if value.is_empty() {
                return Predicate::AlwaysFalse;
            }
            next.guard(move |node| {
                adapter
                    .attribute_value(node, &name)
                    .is_some_and(|attr| fold(&attr).starts_with(value.as_str()))
            })
        }

        // [attr$=value]
        AttributeAction::End => {
            if value.is_empty() {
                return Predicate::AlwaysFalse;
            }
            next.guard(move |node| {
                adapter
                    .attribute_value(node, &name)
                    .is_some_and(|attr| fold(&attr).ends_with(value.as_str()))
            })
        }

        // [attr*=value]
        AttributeAction::Any => {
            if value.is_empty() {
                return Predicate::AlwaysFalse;
            }
            next.guard(move |node| {
                adapter
                    .attribute_value(node, &name)
                    .is_some_and(|attr| fold(&attr).contains(value.as_str()))
            })
        }
    }
}
