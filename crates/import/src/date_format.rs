//! Grammar check for the date/time patterns providers declare in
//! `dateFormat` (Luxon-style tokens such as `yyyy-MM-dd HH:mm:ss`).

use fti_core::{FormatCheckResult, FormatMessageCatalog, FormatRule};

/// Letters that never appear in a supported pattern. Digits, punctuation and
/// the token letters (d D h H m M s S T y Y Z) are all allowed.
const DISALLOWED_LETTERS: &str = "abcefgijklnopqrtuvwxzABCEFGIJKLNOPQRUVWX";

const TIME_REQUIRED_ABOVE: usize = 11;
const MIN_LENGTH: usize = 6;
const MAX_LENGTH: usize = 24;

type RuleCheck = fn(&str) -> bool;

/// Evaluated in order; the first rule that does not hold is reported.
const RULES: [(FormatRule, RuleCheck); 5] = [
    (FormatRule::RequiredTokens, has_required_tokens),
    (FormatRule::TimeTokens, has_time_tokens_when_long),
    (FormatRule::AllowedCharacters, has_only_allowed_characters),
    (FormatRule::MinimumLength, is_long_enough),
    (FormatRule::MaximumLength, is_short_enough),
];

pub fn check_date_format(pattern: &str, messages: &FormatMessageCatalog) -> FormatCheckResult {
    match first_failed_rule(pattern) {
        Some(rule) => FormatCheckResult::failed(messages.message(rule)),
        None => FormatCheckResult::passed(),
    }
}

pub fn first_failed_rule(pattern: &str) -> Option<FormatRule> {
    RULES
        .iter()
        .find(|(_, holds)| !holds(pattern))
        .map(|(rule, _)| *rule)
}

pub fn rule_holds(rule: FormatRule, pattern: &str) -> bool {
    RULES
        .iter()
        .find(|(r, _)| *r == rule)
        .is_some_and(|(_, holds)| holds(pattern))
}

fn pattern_len(pattern: &str) -> usize {
    pattern.chars().count()
}

fn has_required_tokens(pattern: &str) -> bool {
    pattern.contains('M') && pattern.contains('d') && pattern.contains("yy")
}

fn has_time_tokens_when_long(pattern: &str) -> bool {
    if pattern_len(pattern) <= TIME_REQUIRED_ABOVE {
        return true;
    }
    pattern.contains(['H', 'h']) && pattern.contains('m')
}

fn has_only_allowed_characters(pattern: &str) -> bool {
    !pattern.is_empty() && !pattern.chars().any(|c| DISALLOWED_LETTERS.contains(c))
}

fn is_long_enough(pattern: &str) -> bool {
    pattern_len(pattern) >= MIN_LENGTH
}

fn is_short_enough(pattern: &str) -> bool {
    pattern_len(pattern) <= MAX_LENGTH
}
