//! Constructors for tokens written in code.
//!
//! The built-in alias table is expressed with these, and so are most tests:
//!
//! ```
//! use sprig_select::token::build::{child, pseudo_arg, tag};
//!
//! // ul > li:nth-child(2n)
//! let group = vec![tag("ul"), child(), tag("li"), pseudo_arg("nth-child", "2n")];
//! assert_eq!(group.len(), 4);
//! ```

use super::{AttributeAction, AttributeSelector, PseudoData, PseudoSelector, SelectorList, Token};

/// `name`
#[must_use]
pub fn tag(name: &str) -> Token {
    Token::Tag {
        name: name.to_string(),
        namespace: None,
    }
}

/// `*`
#[must_use]
pub const fn universal() -> Token {
    Token::Universal { namespace: None }
}

/// `[name <action> value]`
#[must_use]
pub fn attr(name: &str, action: AttributeAction, value: &str) -> Token {
    Token::Attribute(AttributeSelector::new(name, action, value))
}

/// `[name]`
#[must_use]
pub fn attr_exists(name: &str) -> Token {
    attr(name, AttributeAction::Exists, "")
}

/// `[name=value]`
#[must_use]
pub fn attr_eq(name: &str, value: &str) -> Token {
    attr(name, AttributeAction::Equals, value)
}

/// `:name`
#[must_use]
pub fn pseudo(name: &str) -> Token {
    Token::Pseudo(PseudoSelector {
        name: name.to_string(),
        data: PseudoData::NoArg,
    })
}

/// `:name(text)`
#[must_use]
pub fn pseudo_arg(name: &str, text: &str) -> Token {
    Token::Pseudo(PseudoSelector {
        name: name.to_string(),
        data: PseudoData::Arg(text.to_string()),
    })
}

/// `:name(selector, ...)`
#[must_use]
pub fn pseudo_sub(name: &str, groups: SelectorList) -> Token {
    Token::Pseudo(PseudoSelector {
        name: name.to_string(),
        data: PseudoData::Groups(groups),
    })
}

/// `::name`
#[must_use]
pub fn pseudo_element(name: &str) -> Token {
    Token::PseudoElement {
        name: name.to_string(),
        data: None,
    }
}

/// `:scope`
#[must_use]
pub fn scope() -> Token {
    pseudo("scope")
}

/// Descendant combinator (whitespace).
#[must_use]
pub const fn descendant() -> Token {
    Token::Descendant
}

/// `>`
#[must_use]
pub const fn child() -> Token {
    Token::Child
}

/// `<`
#[must_use]
pub const fn parent() -> Token {
    Token::Parent
}

/// `~`
#[must_use]
pub const fn sibling() -> Token {
    Token::Sibling
}

/// `+`
#[must_use]
pub const fn adjacent() -> Token {
    Token::Adjacent
}
