//! Language detection for incoming chat messages
//!
//! Detection order:
//! 1. Any character in the Arabic Unicode block is an unambiguous signal;
//!    statistical detection is unreliable on short Arabic fragments, so we
//!    short-circuit before it runs.
//! 2. A word/character-frequency routine scores French against English and
//!    yields an ISO 639-1 code, mapped through a fixed table.
//! 3. No signal or an unmapped code falls back to English.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Languages the assistant can respond in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Language {
    English,
    French,
    Arabic,
}

impl Language {
    /// Name used in the "Respond in {language}." directive
    pub fn as_str(self) -> &'static str {
        match self {
            Language::English => "English",
            Language::French => "French",
            Language::Arabic => "Arabic",
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed ISO 639-1 code table; anything else defaults to English
const LANG_MAP: &[(&str, Language)] = &[
    ("en", Language::English),
    ("fr", Language::French),
    ("ar", Language::Arabic),
];

static ARABIC_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[؀-ۿ]").expect("valid Arabic block regex"));

/// Characters that only occur in French among the supported Latin languages
const FRENCH_CHARS: &[char] = &[
    'é', 'è', 'ê', 'ë', 'à', 'â', 'ç', 'î', 'ï', 'ô', 'û', 'ù', 'œ',
    'É', 'È', 'Ê', 'À', 'Â', 'Ç', 'Î', 'Ô', 'Û', 'Ù',
];

/// High-frequency French function words
const FRENCH_WORDS: &[&str] = &[
    "le", "la", "les", "un", "une", "des", "et", "est", "je", "tu", "il",
    "elle", "nous", "vous", "que", "qui", "pas", "pour", "avec", "dans",
    "sur", "mais", "mon", "ma", "mes", "ce", "cette", "quoi", "comment",
    "pourquoi", "quel", "quelle", "suis", "ai", "très",
];

/// High-frequency English function words
const ENGLISH_WORDS: &[&str] = &[
    "the", "a", "an", "is", "are", "was", "were", "be", "been", "have",
    "has", "had", "do", "does", "did", "will", "would", "could", "should",
    "can", "what", "how", "why", "when", "where", "who", "which", "that",
    "this", "my", "i", "you", "it", "of", "and", "to", "in",
];

/// Detect the language of `text`.
///
/// Never fails: any ambiguity resolves to [`Language::English`].
pub fn detect_language(text: &str) -> Language {
    if ARABIC_BLOCK.is_match(text) {
        return Language::Arabic;
    }

    match detect_iso_code(text) {
        Some(code) => LANG_MAP
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, lang)| *lang)
            .unwrap_or(Language::English),
        None => Language::English,
    }
}

/// Statistical detection step over Latin-script text.
///
/// Returns an ISO 639-1 code, or `None` when there is no usable signal.
fn detect_iso_code(text: &str) -> Option<&'static str> {
    // French-specific accented characters are strong evidence
    let french_chars = text.chars().filter(|c| FRENCH_CHARS.contains(c)).count();

    let lower = text.to_lowercase();
    let words: Vec<&str> = lower
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .collect();

    if words.is_empty() && french_chars == 0 {
        return None;
    }

    let french_score =
        words.iter().filter(|w| FRENCH_WORDS.contains(w)).count() + french_chars * 2;
    let english_score = words.iter().filter(|w| ENGLISH_WORDS.contains(w)).count();

    if french_score > english_score {
        Some("fr")
    } else if english_score > 0 {
        Some("en")
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arabic_short_circuit() {
        assert_eq!(detect_language("ما هي أعراض السكري؟"), Language::Arabic);
        // A single Arabic character mixed into Latin text is enough
        assert_eq!(detect_language("hello ش world"), Language::Arabic);
    }

    #[test]
    fn test_english_detection() {
        assert_eq!(
            detect_language("What are the symptoms of diabetes?"),
            Language::English
        );
        assert_eq!(detect_language("I have a headache and fever"), Language::English);
    }

    #[test]
    fn test_french_detection() {
        assert_eq!(
            detect_language("Quels sont les symptômes du diabète ?"),
            Language::French
        );
        assert_eq!(detect_language("J'ai très mal à la tête"), Language::French);
    }

    #[test]
    fn test_no_signal_defaults_to_english() {
        assert_eq!(detect_language(""), Language::English);
        assert_eq!(detect_language("12345 !!!"), Language::English);
        // German words carry no signal in our table
        assert_eq!(detect_language("Kopfschmerzen seit gestern"), Language::English);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(Language::English.to_string(), "English");
        assert_eq!(Language::French.to_string(), "French");
        assert_eq!(Language::Arabic.to_string(), "Arabic");
    }
}
