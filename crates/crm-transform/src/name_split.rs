//! Given/family name splitting.
//!
//! The heuristic targets Portuguese naming: a short middle token between two
//! names ("DA", "DOS", "DE") is a connector that belongs to the family name.
//! The rule table is closed; shapes outside it stay unsplit.

use crm_model::PersonName;

/// Rule that matched a token sequence, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitRule {
    /// `GIVEN CONNECTOR FAMILY`, connector of 2 or 3 characters.
    Connector,
    /// `GIVEN FAMILY`.
    Pair,
    /// `GIVEN GIVEN FAMILY`, middle token longer than 3 characters.
    CompoundGiven,
    /// `GIVEN GIVEN FAMILY FAMILY`.
    TwoByTwo,
    /// Any other token count, or three tokens with a one-letter middle.
    Unmatched,
}

fn is_connector(token: &str) -> bool {
    let len = token.chars().count();
    len > 1 && len <= 3
}

/// Picks the first rule matching `tokens`.
pub fn split_rule(tokens: &[&str]) -> SplitRule {
    match tokens {
        [_, middle, _] if is_connector(middle) => SplitRule::Connector,
        [_, _] => SplitRule::Pair,
        [_, middle, _] if middle.chars().count() > 3 => SplitRule::CompoundGiven,
        [_, _, _, _] => SplitRule::TwoByTwo,
        _ => SplitRule::Unmatched,
    }
}

/// Splits a cleaned, upper-cased full name on whitespace.
pub fn split_full_name(cleaned: &str) -> PersonName {
    let tokens: Vec<&str> = cleaned.split_whitespace().collect();
    let (given, family) = match (split_rule(&tokens), tokens.as_slice()) {
        (SplitRule::Connector, [given, connector, family]) => {
            (given.to_string(), format!("{connector} {family}"))
        }
        (SplitRule::Pair, [given, family]) => (given.to_string(), family.to_string()),
        (SplitRule::CompoundGiven, [first, middle, family]) => {
            (format!("{first} {middle}"), family.to_string())
        }
        (SplitRule::TwoByTwo, [first, second, third, fourth]) => {
            (format!("{first} {second}"), format!("{third} {fourth}"))
        }
        _ => {
            return PersonName::Unsplit {
                token_count: tokens.len(),
            };
        }
    };
    PersonName::Split { given, family }
}
