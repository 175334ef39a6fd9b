//! Ijekavian → ekavian dialect leveling.
//!
//! Best-effort only: the rules are spelling heuristics, not a morphological
//! analysis. `pije` (drinks) levels to `pe` and some ekavian-only words with
//! a `Cje` cluster are altered too. Both sides of a comparison are leveled, so
//! such false positives rarely flip a verdict.

use regex::{Captures, Regex, RegexBuilder};
use std::sync::OnceLock;

/// A substring rewrite applied within a single word.
#[derive(Debug, Clone, Copy)]
pub struct DialectRule {
    pub pattern: &'static str,
    pub replacement: &'static str,
}

/// Ordered most specific first: the `Cije` cluster must run before `Cje`.
pub const IJEKAVIAN_TO_EKAVIAN: &[DialectRule] = &[
    // mlijeko → mleko, vrijeme → vreme, snijeg → sneg
    DialectRule {
        pattern: r"([bcčćdđfghklmnprsštvzž])ije",
        replacement: "${1}e",
    },
    // mjesto → mesto, gdje → gde; l/n excluded so lj/nj digraphs survive
    DialectRule {
        pattern: r"([bcčćdđfghkmprsštvzž])je",
        replacement: "${1}e",
    },
];

fn compiled_rules() -> &'static [(Regex, &'static str)] {
    static RULES: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    RULES.get_or_init(|| {
        IJEKAVIAN_TO_EKAVIAN
            .iter()
            .map(|rule| {
                let re = RegexBuilder::new(rule.pattern)
                    .case_insensitive(true)
                    .build()
                    .expect("dialect rule patterns are valid");
                (re, rule.replacement)
            })
            .collect()
    })
}

/// Level every whitespace-delimited word of `text`, keeping separators.
pub fn level_dialect(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for piece in text.split_inclusive(char::is_whitespace) {
        let word_end = piece.trim_end_matches(char::is_whitespace).len();
        out.push_str(&level_word(&piece[..word_end]));
        out.push_str(&piece[word_end..]);
    }
    out
}

fn level_word(word: &str) -> String {
    let mut current = word.to_string();
    for (re, replacement) in compiled_rules() {
        current = re
            .replace_all(&current, |caps: &Captures| {
                let mut dst = String::new();
                caps.expand(replacement, &mut dst);
                match_first_case(&caps[0], &dst)
            })
            .into_owned();
    }
    current
}

/// Give `replacement` the case of the first letter of `span`.
fn match_first_case(span: &str, replacement: &str) -> String {
    let span_upper = span.chars().next().is_some_and(char::is_uppercase);
    let mut chars = replacement.chars();
    match chars.next() {
        Some(first) if span_upper => first.to_uppercase().chain(chars).collect(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}
