//! Selector tokens as delivered by an external selector parser.
//!
//! [§ 4 Selector syntax](https://www.w3.org/TR/selectors-4/#syntax)
//!
//! A [`SelectorList`] is the comma-separated list; each [`SelectorGroup`] is
//! one complex selector written as a flat, left-to-right sequence of simple
//! selectors and combinators. The serde representation follows the JSON shape
//! emitted by common JavaScript selector parsers (`{"type": "tag", ...}`), so
//! pre-tokenized selectors can be handed over as JSON.

pub mod build;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString, IntoStaticStr};

/// One comma-separated alternative: tokens in source order, the rightmost
/// token is nearest the candidate node.
pub type SelectorGroup = Vec<Token>;

/// A comma-separated selector list; matching the list means matching any group.
pub type SelectorList = Vec<SelectorGroup>;

/// A single simple selector or combinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Token {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    ///
    /// Examples: `div`, `p`, `svg|rect`
    Tag {
        /// Element name as written.
        name: String,
        /// Namespace prefix, if any. Not consulted by the matcher.
        #[serde(default)]
        namespace: Option<String>,
    },

    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    Universal {
        /// Namespace prefix, if any. Not consulted by the matcher.
        #[serde(default)]
        namespace: Option<String>,
    },

    /// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    Attribute(AttributeSelector),

    /// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
    Pseudo(PseudoSelector),

    /// [§ 3.6 Pseudo-elements](https://www.w3.org/TR/selectors-4/#pseudo-elements).
    /// Never matchable; compiling one is an error.
    PseudoElement {
        /// Name without the leading colons.
        name: String,
        /// Functional argument, if any.
        #[serde(default)]
        data: Option<String>,
    },

    /// [§ 16.1](https://www.w3.org/TR/selectors-4/#descendant-combinators) `A B`
    Descendant,
    /// [§ 16.2](https://www.w3.org/TR/selectors-4/#child-combinators) `A > B`
    Child,
    /// `A < B`: B has a child matching A.
    Parent,
    /// [§ 16.4](https://www.w3.org/TR/selectors-4/#general-sibling-combinators) `A ~ B`
    Sibling,
    /// [§ 16.3](https://www.w3.org/TR/selectors-4/#adjacent-sibling-combinators) `A + B`
    Adjacent,
    /// [§ 17.1](https://www.w3.org/TR/selectors-4/#the-column-combinator) `A || B`.
    /// Not supported; compiling one is an error.
    ColumnCombinator,

    /// Descendant-or-self. Only produced by the compiler, when a `:scope`
    /// descendant selector is matched against an explicit list of nodes.
    #[serde(skip)]
    FlexibleDescendant,
}

impl Token {
    /// Returns `true` for combinators (including the internal
    /// descendant-or-self variant).
    #[must_use]
    pub const fn is_traversal(&self) -> bool {
        matches!(
            self,
            Self::Descendant
                | Self::Child
                | Self::Parent
                | Self::Sibling
                | Self::Adjacent
                | Self::ColumnCombinator
                | Self::FlexibleDescendant
        )
    }

    /// Returns `true` if this token is a bare `:scope` pseudo-class.
    #[must_use]
    pub fn is_scope(&self) -> bool {
        matches!(self, Self::Pseudo(p) if p.name == "scope")
    }

    /// Returns `true` if this token is `:scope` or a subselect whose argument
    /// mentions `:scope` anywhere.
    #[must_use]
    pub fn includes_scope_pseudo(&self) -> bool {
        match self {
            Self::Pseudo(p) if p.name == "scope" => true,
            Self::Pseudo(PseudoSelector {
                data: PseudoData::Groups(groups),
                ..
            }) => groups
                .iter()
                .any(|group| group.iter().any(Self::includes_scope_pseudo)),
            _ => false,
        }
    }
}

/// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeSelector {
    /// Attribute name as written.
    pub name: String,
    /// Which comparison to perform.
    pub action: AttributeAction,
    /// Comparison operand; empty for [`AttributeAction::Exists`].
    #[serde(default)]
    pub value: String,
    /// [§ 6.3 Case-sensitivity](https://www.w3.org/TR/selectors-4/#attribute-case)
    #[serde(default)]
    pub ignore_case: IgnoreCase,
    /// Namespace prefix, if any. Not consulted by the matcher.
    #[serde(default)]
    pub namespace: Option<String>,
}

impl AttributeSelector {
    /// Create an attribute selector with default case handling.
    #[must_use]
    pub fn new(name: &str, action: AttributeAction, value: &str) -> Self {
        Self {
            name: name.to_string(),
            action,
            value: value.to_string(),
            ignore_case: IgnoreCase::Default,
            namespace: None,
        }
    }

    /// Builder-style case mode setter (`[attr=v i]`, `[attr=v s]`).
    #[must_use]
    pub const fn case(mut self, ignore_case: IgnoreCase) -> Self {
        self.ignore_case = ignore_case;
        self
    }
}

/// [§ 6.1 Attribute presence and value selectors](https://www.w3.org/TR/selectors-4/#attribute-representation)
///
/// Variant names match the parser's textual action names.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AttributeAction {
    /// `[attr*=value]`: value contains the substring.
    Any,
    /// `[attr~=value]`: value is a whitespace-separated list containing the word.
    Element,
    /// `[attr$=value]`: value ends with the suffix.
    End,
    /// `[attr=value]`: exact match.
    Equals,
    /// `[attr]`: attribute is present.
    Exists,
    /// `[attr|=value]`: exact match or prefix followed by `-`.
    Hyphen,
    /// `[attr!=value]`: attribute absent or different.
    Not,
    /// `[attr^=value]`: value starts with the prefix.
    Start,
}

/// How an attribute value comparison treats letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "RawIgnoreCase", into = "RawIgnoreCase")]
pub enum IgnoreCase {
    /// No flag given: case-insensitive only for the HTML attributes whose
    /// values are defined as case-insensitive, and never in XML mode.
    #[default]
    Default,
    /// `s` flag.
    Sensitive,
    /// `i` flag.
    Insensitive,
    /// Insensitive only when the compile options enable quirks mode.
    Quirks,
}

/// Wire form of [`IgnoreCase`]: `null`, `true`, `false` or `"quirks"`.
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawIgnoreCase {
    Flag(bool),
    Mode(QuirksTag),
    Unset(()),
}

#[derive(Serialize, Deserialize)]
enum QuirksTag {
    #[serde(rename = "quirks")]
    Quirks,
}

impl From<RawIgnoreCase> for IgnoreCase {
    fn from(raw: RawIgnoreCase) -> Self {
        match raw {
            RawIgnoreCase::Flag(true) => Self::Insensitive,
            RawIgnoreCase::Flag(false) => Self::Sensitive,
            RawIgnoreCase::Mode(QuirksTag::Quirks) => Self::Quirks,
            RawIgnoreCase::Unset(()) => Self::Default,
        }
    }
}

impl From<IgnoreCase> for RawIgnoreCase {
    fn from(mode: IgnoreCase) -> Self {
        match mode {
            IgnoreCase::Default => Self::Unset(()),
            IgnoreCase::Sensitive => Self::Flag(false),
            IgnoreCase::Insensitive => Self::Flag(true),
            IgnoreCase::Quirks => Self::Mode(QuirksTag::Quirks),
        }
    }
}

/// [§ 3.5 Pseudo-classes](https://www.w3.org/TR/selectors-4/#pseudo-classes)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PseudoSelector {
    /// Name without the leading colon, e.g. `nth-child`.
    pub name: String,
    /// Argument, resolved by the parser into one of three shapes.
    #[serde(default)]
    pub data: PseudoData,
}

/// The argument of a pseudo-class.
///
/// The parser decides the shape once: functional pseudo-classes taking a
/// selector (`:not(...)`, `:has(...)`) carry nested groups, the others carry
/// raw text (`:nth-child(2n+1)`, `:contains(foo)`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PseudoData {
    /// `:name`
    #[default]
    NoArg,
    /// `:name(text)`
    Arg(String),
    /// `:name(selector, ...)`
    Groups(SelectorList),
}

impl PseudoData {
    /// The text argument, if this is a plain-text argument.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Arg(text) => Some(text),
            _ => None,
        }
    }
}
