//! Answer verification for typed and spoken answers.

pub mod dialect;
pub mod script;

use crate::types::{EffectiveSettings, TextVariant};
use serde::{Deserialize, Serialize};

pub use dialect::level_dialect;
pub use script::transliterate;

/// Which comparison pass accepted the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPass {
    /// Normalized input equals a normalized member.
    Direct,
    /// Matched after Cyrillic→Latin transliteration.
    Transliterated,
}

/// Result of checking an answer against the expected text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    /// Whether the answer is considered correct.
    pub is_correct: bool,
    /// The pass that matched, if any.
    pub pass: Option<MatchPass>,
    /// Normalized input (for display).
    pub typed_normalized: String,
    /// Normalized primary expected text (for display).
    pub expected_normalized: String,
}

/// Check an answer, returning only the verdict.
pub fn is_correct(input: &str, expected: &TextVariant, settings: &EffectiveSettings) -> bool {
    verify(input, expected, settings).is_correct
}

/// Check an answer against every accepted spelling of `expected`.
///
/// Never fails: empty or unmatched input yields `is_correct == false`.
pub fn verify(input: &str, expected: &TextVariant, settings: &EffectiveSettings) -> MatchResult {
    let prepare = |text: &str| {
        let normalized = normalize(text, &settings.punctuation);
        if settings.dialect_leveling {
            level_dialect(&normalized)
        } else {
            normalized
        }
    };

    let typed_normalized = prepare(input);
    let expected_normalized = prepare(expected.primary());

    let pass = if typed_normalized.is_empty() {
        None
    } else if expected.members().any(|m| prepare(m) == typed_normalized) {
        Some(MatchPass::Direct)
    } else if settings.script_fallback {
        // Latin input passes through the table unchanged, so this covers
        // Cyrillic on either side.
        let typed_latin = prepare(&transliterate(&typed_normalized));
        expected
            .members()
            .any(|m| prepare(&transliterate(m)) == typed_latin)
            .then_some(MatchPass::Transliterated)
    } else {
        None
    };

    MatchResult {
        is_correct: pass.is_some(),
        pass,
        typed_normalized,
        expected_normalized,
    }
}

/// Case-fold, strip `punctuation` anywhere in the text, and collapse whitespace.
pub fn normalize(text: &str, punctuation: &str) -> String {
    let stripped: String = text.chars().filter(|c| !punctuation.contains(*c)).collect();
    stripped
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DEFAULT_PUNCTUATION;

    fn settings() -> EffectiveSettings {
        EffectiveSettings::default()
    }

    fn no_fallback() -> EffectiveSettings {
        EffectiveSettings {
            script_fallback: false,
            ..EffectiveSettings::default()
        }
    }

    fn leveling() -> EffectiveSettings {
        EffectiveSettings {
            dialect_leveling: true,
            ..EffectiveSettings::default()
        }
    }

    #[test]
    fn zdravo_scenario() {
        let v = TextVariant::with_alternatives("Zdravo", ["Zdravo!"]);
        assert!(is_correct("zdravo", &v, &settings()));
        assert!(is_correct("ZDRAVO.", &v, &settings()));
        assert!(!is_correct("zdrao", &v, &settings()));
    }

    #[test]
    fn every_member_matches_itself_with_noise() {
        let v = TextVariant::with_alternatives("Kako si?", ["Kako ste?", "Šta ima"]);
        for member in v.members() {
            assert!(is_correct(member, &v, &no_fallback()));
            assert!(is_correct(&format!("  {}!! ", member.to_uppercase()), &v, &no_fallback()));
            assert!(is_correct(&member.to_lowercase(), &v, &no_fallback()));
        }
    }

    #[test]
    fn normalization_is_idempotent_for_verdicts() {
        let v = TextVariant::with_alternatives("Dobro jutro.", ["Добро јутро"]);
        for input in ["Dobro   jutro!", "DOBRO JUTRO", "добро јутро", "laku noć", "", "..."] {
            let once = normalize(input, DEFAULT_PUNCTUATION);
            assert_eq!(normalize(&once, DEFAULT_PUNCTUATION), once);
            assert_eq!(
                is_correct(input, &v, &settings()),
                is_correct(&once, &v, &settings())
            );
        }
    }

    #[test]
    fn strips_embedded_punctuation_and_collapses_whitespace() {
        assert_eq!(normalize("  Da,  hvala; ", DEFAULT_PUNCTUATION), "da hvala");
        assert_eq!(normalize("Ne…", DEFAULT_PUNCTUATION), "ne");
    }

    #[test]
    fn empty_input_never_matches() {
        let v = TextVariant::new("...");
        assert!(!is_correct("", &v, &settings()));
        assert!(!is_correct("   ", &v, &settings()));
        assert!(!is_correct("!", &v, &settings()));
    }

    #[test]
    fn latin_answer_matches_cyrillic_content() {
        let v = TextVariant::new("Љубав је слепа.");
        let result = verify("ljubav je slepa", &v, &settings());
        assert!(result.is_correct);
        assert_eq!(result.pass, Some(MatchPass::Transliterated));

        assert!(!is_correct("ljubav je slepa", &v, &no_fallback()));
    }

    #[test]
    fn cyrillic_answer_matches_latin_content() {
        let v = TextVariant::new("Hvala lepo");
        assert!(is_correct("Хвала лепо", &v, &settings()));
        assert!(!is_correct("Хвала лепо", &v, &no_fallback()));
    }

    #[test]
    fn direct_pass_reported_before_fallback() {
        let v = TextVariant::new("Zdravo");
        assert_eq!(verify("zdravo", &v, &settings()).pass, Some(MatchPass::Direct));
    }

    #[test]
    fn dialect_leveling_accepts_ijekavian_answer() {
        let v = TextVariant::new("Mleko je belo.");
        assert!(!is_correct("Mlijeko je bijelo", &v, &settings()));
        assert!(is_correct("Mlijeko je bijelo", &v, &leveling()));
    }

    #[test]
    fn dialect_leveling_combines_with_transliteration() {
        let v = TextVariant::new("Где је дете?");
        assert!(is_correct("gdje je dijete", &v, &leveling()));
    }

    #[test]
    fn reports_normalized_forms() {
        let v = TextVariant::with_alternatives("Dobar dan!", ["Dobar dan"]);
        let result = verify("  DOBAR   dan ", &v, &settings());
        assert_eq!(result.typed_normalized, "dobar dan");
        assert_eq!(result.expected_normalized, "dobar dan");
    }

    #[test]
    fn custom_punctuation_set() {
        let v = TextVariant::new("rock-n-roll");
        let strict = EffectiveSettings {
            punctuation: "-".to_string(),
            ..EffectiveSettings::default()
        };
        assert!(!is_correct("rock n roll", &v, &settings()));
        assert!(is_correct("rocknroll", &v, &strict));
    }
}
