//! Reordering of simple selectors by estimated cost.
//!
//! Within a compound selector the order of the simple selectors does not
//! change what matches, only how much work a failed match costs. Groups are
//! compiled left to right with the rightmost token outermost, so sorting by
//! ascending quality makes the cheap, selective tests run first.

use crate::token::{AttributeAction, AttributeSelector, IgnoreCase, PseudoData, Token};

/// Combinators; never moved and never passed.
const BARRIER: i32 = -1;

fn attribute_quality(selector: &AttributeSelector) -> i32 {
    let base = match selector.action {
        AttributeAction::Exists => 10,
        AttributeAction::Equals if selector.name == "id" => 9,
        AttributeAction::Equals => 8,
        AttributeAction::Not => 7,
        AttributeAction::Start | AttributeAction::End => 6,
        AttributeAction::Any => 5,
        AttributeAction::Hyphen => 4,
        AttributeAction::Element => 3,
    };
    match selector.ignore_case {
        IgnoreCase::Insensitive | IgnoreCase::Quirks => base / 2,
        IgnoreCase::Default | IgnoreCase::Sensitive => base,
    }
}

/// Higher is cheaper and more selective.
pub(crate) fn quality(token: &Token) -> i32 {
    match token {
        Token::Universal { .. } => 50,
        Token::Tag { .. } => 30,
        Token::Attribute(selector) => attribute_quality(selector),
        Token::Pseudo(pseudo) => match &pseudo.data {
            PseudoData::NoArg => 3,
            _ if matches!(pseudo.name.as_str(), "has" | "contains" | "icontains") => 0,
            PseudoData::Groups(groups) => groups.iter().flatten().map(quality).min().unwrap_or(0),
            PseudoData::Arg(_) => 2,
        },
        _ => BARRIER,
    }
}

/// Stable insertion sort by ascending quality between combinators.
pub(crate) fn sort_rules(group: &mut [Token]) {
    let mut ratings: Vec<i32> = group.iter().map(quality).collect();
    for i in 1..group.len() {
        let rating = ratings[i];
        if rating < 0 {
            continue;
        }
        let mut j = i;
        while j > 0 && rating < ratings[j - 1] {
            group.swap(j, j - 1);
            ratings.swap(j, j - 1);
            j -= 1;
        }
    }
}
