//! Food-nutrition lookup with fuzzy name matching

use std::sync::Arc;

use super::dataset::{FoodEntry, FoodTable, normalize_food_key};
use super::similarity::{DEFAULT_CUTOFF, closest_match};

pub struct FoodMatcher {
    table: Arc<FoodTable>,
}

impl FoodMatcher {
    pub fn new(table: Arc<FoodTable>) -> Self {
        Self { table }
    }

    /// Best matching canonical food key, or None when nothing clears the
    /// similarity cutoff.
    pub fn match_key(&self, query: &str) -> Option<String> {
        let q = normalize_food_key(query);
        if self.table.get(&q).is_some() {
            return Some(q);
        }
        closest_match(&q, self.table.keys(), DEFAULT_CUTOFF).map(str::to_string)
    }

    /// Structured nutrition record for a free-text food name, or None.
    pub fn lookup(&self, name: &str) -> Option<&FoodEntry> {
        let key = self.match_key(name)?;
        self.table.get(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dataset::FoodTable;

    fn matcher() -> FoodMatcher {
        let table = FoodTable::load(None).unwrap();
        FoodMatcher::new(Arc::new(table))
    }

    #[test]
    fn test_exact_lookup() {
        let m = matcher();
        let entry = m.lookup("apple").expect("apple entry");
        assert_eq!(entry.name, "Apple");
        assert_eq!(entry.calories, 52.0);
        assert_eq!(entry.fiber_g, 2.4);
    }

    #[test]
    fn test_lookup_normalizes_case_and_whitespace() {
        let m = matcher();
        let entry = m.lookup("  Chicken Breast ").expect("chicken entry");
        assert_eq!(entry.name, "Chicken Breast");
    }

    #[test]
    fn test_fuzzy_lookup_within_cutoff() {
        let m = matcher();
        // "appel" is similarity 0.6 against "apple", exactly at the cutoff
        let entry = m.lookup("appel").expect("fuzzy apple");
        assert_eq!(entry.name, "Apple");
        assert_eq!(entry.calories, 52.0);
    }

    #[test]
    fn test_lookup_below_cutoff_is_absent() {
        let m = matcher();
        assert!(m.lookup("xqzwv").is_none());
        assert!(m.match_key("xqzwv").is_none());
    }
}
