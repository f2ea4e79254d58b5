//! Pseudo-classes that stand for another selector list.
//!
//! Each alias expands to a token list that is compiled like the argument of
//! `:is()`, so the caller's flags apply to the expansion as well.

use strum_macros::EnumString;

use crate::token::build::{
    attr, attr_eq, attr_exists, child, descendant, pseudo, pseudo_arg, pseudo_sub, tag, universal,
};
use crate::token::{AttributeAction, SelectorGroup, SelectorList, Token};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub(crate) enum Alias {
    // [§ 8 Location pseudo-classes](https://www.w3.org/TR/selectors-4/#location)
    AnyLink,
    Link,

    // [§ 15 The input pseudo-classes](https://www.w3.org/TR/selectors-4/#input-pseudos)
    Disabled,
    Enabled,
    Checked,
    Required,
    Optional,

    // Non-standard
    Selected,
    Checkbox,
    File,
    Password,
    Radio,
    Reset,
    Image,
    Submit,
    Parent,
    Header,
    Button,
    Input,
    Text,
    Even,
    Odd,
}

/// `:is(...)` over the given groups.
fn is_any(groups: impl IntoIterator<Item = SelectorGroup>) -> Token {
    pseudo_sub("is", groups.into_iter().collect())
}

fn tags(names: &[&str]) -> Token {
    is_any(names.iter().map(|name| vec![tag(name)]))
}

impl Alias {
    /// The replacement selector list.
    pub(crate) fn selectors(self) -> SelectorList {
        match self {
            // :is(a, area, link)[href]
            Self::AnyLink => vec![vec![tags(&["a", "area", "link"]), attr_exists("href")]],
            // :any-link:not(:visited)
            Self::Link => vec![vec![
                pseudo("any-link"),
                pseudo_sub("not", vec![vec![pseudo("visited")]]),
            ]],

            // :is(:is(button, input, select, textarea, optgroup, option)[disabled],
            //     optgroup[disabled] > option,
            //     fieldset[disabled]:not(fieldset[disabled] legend:first-of-type *))
            Self::Disabled => vec![vec![is_any([
                vec![
                    tags(&["button", "input", "select", "textarea", "optgroup", "option"]),
                    attr_exists("disabled"),
                ],
                vec![tag("optgroup"), attr_exists("disabled"), child(), tag("option")],
                vec![
                    tag("fieldset"),
                    attr_exists("disabled"),
                    pseudo_sub(
                        "not",
                        vec![vec![
                            tag("fieldset"),
                            attr_exists("disabled"),
                            descendant(),
                            tag("legend"),
                            pseudo("first-of-type"),
                            descendant(),
                            universal(),
                        ]],
                    ),
                ],
            ])]],
            // :not(:disabled)
            Self::Enabled => vec![vec![pseudo_sub("not", vec![vec![pseudo("disabled")]])]],
            // :is(:is(input[type=radio], input[type=checkbox])[checked], option:selected)
            Self::Checked => vec![vec![is_any([
                vec![
                    is_any([
                        vec![tag("input"), attr_eq("type", "radio")],
                        vec![tag("input"), attr_eq("type", "checkbox")],
                    ]),
                    attr_exists("checked"),
                ],
                vec![tag("option"), pseudo("selected")],
            ])]],
            // :is(input, select, textarea)[required]
            Self::Required => vec![vec![
                tags(&["input", "select", "textarea"]),
                attr_exists("required"),
            ]],
            // :is(input, select, textarea):not([required])
            Self::Optional => vec![vec![
                tags(&["input", "select", "textarea"]),
                pseudo_sub("not", vec![vec![attr_exists("required")]]),
            ]],

            // option:is([selected], select:not([multiple]):not(:has(> option[selected])) > :first-of-type)
            Self::Selected => vec![vec![
                tag("option"),
                is_any([
                    vec![attr_exists("selected")],
                    vec![
                        tag("select"),
                        pseudo_sub("not", vec![vec![attr_exists("multiple")]]),
                        pseudo_sub(
                            "not",
                            vec![vec![pseudo_sub(
                                "has",
                                vec![vec![child(), tag("option"), attr_exists("selected")]],
                            )]],
                        ),
                        child(),
                        pseudo("first-of-type"),
                    ],
                ]),
            ]],
            Self::Checkbox => vec![vec![attr_eq("type", "checkbox")]],
            Self::File => vec![vec![attr_eq("type", "file")]],
            Self::Password => vec![vec![attr_eq("type", "password")]],
            Self::Radio => vec![vec![attr_eq("type", "radio")]],
            Self::Reset => vec![vec![attr_eq("type", "reset")]],
            Self::Image => vec![vec![attr_eq("type", "image")]],
            Self::Submit => vec![vec![attr_eq("type", "submit")]],

            // :not(:empty)
            Self::Parent => vec![vec![pseudo_sub("not", vec![vec![pseudo("empty")]])]],
            Self::Header => vec![vec![tags(&["h1", "h2", "h3", "h4", "h5", "h6"])]],
            // :is(button, input[type=button])
            Self::Button => vec![vec![is_any([
                vec![tag("button")],
                vec![tag("input"), attr_eq("type", "button")],
            ])]],
            Self::Input => vec![vec![tags(&["input", "textarea", "select", "button"])]],
            // input:is(:not([type!='']), [type=text])
            Self::Text => vec![vec![
                tag("input"),
                is_any([
                    vec![pseudo_sub(
                        "not",
                        vec![vec![attr("type", AttributeAction::Not, "")]],
                    )],
                    vec![attr_eq("type", "text")],
                ]),
            ]],
            Self::Even => vec![vec![pseudo_arg("nth-child", "even")]],
            Self::Odd => vec![vec![pseudo_arg("nth-child", "odd")]],
        }
    }
}
