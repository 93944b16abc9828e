//! Disease lookup and symptom-based ranking
//!
//! Wraps the immutable disease table with the matching protocol used by
//! explore mode (exact key, then fuzzy fallback over display keys) and the
//! probable-disease ranking used by symptom mode.

use std::sync::Arc;

use serde::Serialize;

use super::dataset::{DiseaseTable, normalize_disease_key};
use super::similarity::{DEFAULT_CUTOFF, closest_match};

/// Maximum candidates returned by symptom ranking
const MAX_PROBABLE: usize = 3;

/// Probability label attached to a ranked disease candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProbabilityLabel {
    High,
    Moderate,
    Low,
}

impl ProbabilityLabel {
    fn from_score(score: f64) -> Self {
        if score >= 0.66 {
            ProbabilityLabel::High
        } else if score >= 0.33 {
            ProbabilityLabel::Moderate
        } else {
            ProbabilityLabel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ProbabilityLabel::High => "High",
            ProbabilityLabel::Moderate => "Moderate",
            ProbabilityLabel::Low => "Low",
        }
    }
}

/// One ranked candidate from symptom matching
#[derive(Debug, Clone, Serialize)]
pub struct ProbableDisease {
    pub disease: String,
    pub probability: ProbabilityLabel,
    pub reason: String,
}

/// A disease resolved from free text, ready for display
#[derive(Debug, Clone)]
pub struct ResolvedDisease {
    pub title: String,
    pub explanation: String,
}

pub struct DiseaseMatcher {
    table: Arc<DiseaseTable>,
    /// Display-cased keys, in dataset order
    original_keys: Vec<String>,
    /// Lowercased forms of `original_keys`, for fuzzy fallback
    original_keys_lower: Vec<String>,
}

impl DiseaseMatcher {
    pub fn new(table: Arc<DiseaseTable>) -> Self {
        let original_keys: Vec<String> =
            table.entries().iter().map(|e| e.name.clone()).collect();
        let original_keys_lower: Vec<String> =
            original_keys.iter().map(|k| k.to_lowercase()).collect();
        Self { table, original_keys, original_keys_lower }
    }

    /// Canonical storage form of a disease name
    pub fn normalize_key(&self, text: &str) -> String {
        normalize_disease_key(text)
    }

    /// Display-cased keys of the table
    pub fn original_keys(&self) -> &[String] {
        &self.original_keys
    }

    /// Stored explanation for an exact canonical key, or None.
    pub fn explanation(&self, key: &str) -> Option<&str> {
        self.table.get(key).map(|e| e.explanation.as_str())
    }

    /// Resolve free text to a disease: exact normalized-key lookup first,
    /// then fuzzy match against lowercased display keys. A total miss
    /// returns None so the caller can fall back to the completion service.
    pub fn resolve(&self, raw: &str) -> Option<ResolvedDisease> {
        let key = self.normalize_key(raw);
        if let Some(explanation) = self.explanation(&key) {
            return Some(ResolvedDisease {
                title: title_case(&key.replace('_', " ")),
                explanation: explanation.to_string(),
            });
        }

        let query = raw.trim().to_lowercase();
        let candidate = closest_match(
            &query,
            self.original_keys_lower.iter().map(String::as_str),
            DEFAULT_CUTOFF,
        )?;
        let idx = self.original_keys_lower.iter().position(|k| k == candidate)?;
        let original = &self.original_keys[idx];

        // Re-resolve through the exact path using the matched display key
        let explanation = self.explanation(&self.normalize_key(original))?;
        Some(ResolvedDisease {
            title: title_case(original),
            explanation: explanation.to_string(),
        })
    }

    /// Rank diseases by how strongly the symptom text matches their keyword
    /// table. Score is the matched share of each disease's total symptom
    /// weight; returns the top candidates in descending order.
    pub fn probable_diseases(&self, symptom_text: &str) -> Vec<ProbableDisease> {
        let text = symptom_text.to_lowercase();

        let mut scored: Vec<(f64, ProbableDisease)> = Vec::new();
        for entry in self.table.entries() {
            let total_weight: f64 = entry.symptoms.values().sum();
            if total_weight <= 0.0 {
                continue;
            }

            let mut matched: Vec<&str> = Vec::new();
            let mut matched_weight = 0.0;
            for (keyword, weight) in &entry.symptoms {
                if text.contains(keyword.as_str()) {
                    matched.push(keyword);
                    matched_weight += weight;
                }
            }
            if matched.is_empty() {
                continue;
            }

            // Dataset order is not meaningful inside the map; keep the
            // reason text stable.
            matched.sort_unstable();
            let score = matched_weight / total_weight;
            scored.push((
                score,
                ProbableDisease {
                    disease: entry.name.clone(),
                    probability: ProbabilityLabel::from_score(score),
                    reason: format!("Matches reported symptoms: {}", matched.join(", ")),
                },
            ));
        }

        scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        scored.into_iter().take(MAX_PROBABLE).map(|(_, d)| d).collect()
    }
}

/// Capitalize the first letter of each whitespace-separated word
fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dataset::DiseaseTable;

    fn matcher() -> DiseaseMatcher {
        let table = DiseaseTable::load(None).unwrap();
        DiseaseMatcher::new(Arc::new(table))
    }

    #[test]
    fn test_exact_resolution() {
        let m = matcher();
        let resolved = m.resolve("Migraine").expect("exact match");
        assert_eq!(resolved.title, "Migraine");
        assert!(resolved.explanation.contains("neurological"));
    }

    #[test]
    fn test_exact_resolution_is_case_insensitive() {
        let m = matcher();
        let resolved = m.resolve("type 2 diabetes").expect("normalized match");
        assert_eq!(resolved.title, "Type 2 Diabetes");
    }

    #[test]
    fn test_fuzzy_resolution() {
        let m = matcher();
        // One transposition away from "asthma"
        let resolved = m.resolve("astham").expect("fuzzy match");
        assert_eq!(resolved.title, "Asthma");
    }

    #[test]
    fn test_total_miss_returns_none() {
        let m = matcher();
        assert!(m.resolve("quantum flu 9000").is_none());
    }

    #[test]
    fn test_probable_diseases_ranking() {
        let m = matcher();
        let probable =
            m.probable_diseases("I have a bad headache, nausea and light sensitivity");
        assert!(!probable.is_empty());
        assert!(probable.len() <= 3);
        assert_eq!(probable[0].disease, "Migraine");
        assert!(probable[0].reason.contains("headache"));
    }

    #[test]
    fn test_probable_diseases_no_match() {
        let m = matcher();
        assert!(m.probable_diseases("my bicycle is broken").is_empty());
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("type 2 diabetes"), "Type 2 Diabetes");
        assert_eq!(title_case("migraine"), "Migraine");
    }
}
