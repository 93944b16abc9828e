//! Static knowledge-table loading
//!
//! The disease and food-nutrition tables are loaded once at startup into
//! immutable in-memory tables and injected into the matchers. Datasets ship
//! embedded in the binary; a config path can point at replacements.

use std::collections::HashMap;
use std::fs;

use serde::Deserialize;

use crate::utils::{ApiError, ApiResult};

const EMBEDDED_DISEASES: &str = include_str!("../../datasets/diseases.json");
const EMBEDDED_FOODS: &str = include_str!("../../datasets/food_nutrition.json");

/// Canonical disease key: lowercased, trimmed, whitespace unified to
/// underscores. Matches the storage format of the disease table.
pub fn normalize_disease_key(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Canonical food key: lowercased and trimmed.
pub fn normalize_food_key(text: &str) -> String {
    text.trim().to_lowercase()
}

// ============================================================================
// Disease table
// ============================================================================

/// One row of the disease knowledge table
#[derive(Debug, Clone, Deserialize)]
pub struct DiseaseEntry {
    /// Display-cased name, e.g. "Type 2 Diabetes"
    pub name: String,
    /// Free-text explanation shown in explore mode
    pub explanation: String,
    /// Symptom keyword → weight in (0, 1], used by symptom ranking
    pub symptoms: HashMap<String, f64>,
}

#[derive(Debug, Deserialize)]
struct DiseaseFile {
    diseases: Vec<DiseaseEntry>,
}

/// Immutable disease table, safe for unsynchronized concurrent reads
#[derive(Debug)]
pub struct DiseaseTable {
    entries: Vec<DiseaseEntry>,
    by_key: HashMap<String, usize>,
}

impl DiseaseTable {
    pub fn from_json(raw: &str) -> ApiResult<Self> {
        let file: DiseaseFile = serde_json::from_str(raw)
            .map_err(|e| ApiError::dataset_error(format!("invalid disease dataset: {}", e)))?;

        let mut by_key = HashMap::with_capacity(file.diseases.len());
        for (idx, entry) in file.diseases.iter().enumerate() {
            by_key.insert(normalize_disease_key(&entry.name), idx);
        }

        Ok(Self { entries: file.diseases, by_key })
    }

    /// Load from an optional path, falling back to the embedded dataset.
    pub fn load(path: Option<&str>) -> ApiResult<Self> {
        let table = match path {
            Some(p) => {
                let raw = fs::read_to_string(p).map_err(|e| {
                    ApiError::dataset_error(format!("cannot read disease dataset {}: {}", p, e))
                })?;
                Self::from_json(&raw)?
            }
            None => Self::from_json(EMBEDDED_DISEASES)?,
        };
        tracing::info!("Loaded disease table with {} entries", table.len());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&DiseaseEntry> {
        self.by_key.get(key).map(|&idx| &self.entries[idx])
    }

    pub fn entries(&self) -> &[DiseaseEntry] {
        &self.entries
    }
}

// ============================================================================
// Food table
// ============================================================================

/// One row of the food-nutrition table, values per 100g
#[derive(Debug, Clone, Deserialize)]
pub struct FoodEntry {
    /// Display name, e.g. "Apple"
    pub name: String,
    pub calories: f64,
    pub fat_g: f64,
    pub saturated_fat_g: f64,
    pub carbs_g: f64,
    pub sugars_g: f64,
    pub protein_g: f64,
    pub fiber_g: f64,
}

#[derive(Debug, Deserialize)]
struct FoodFile {
    foods: Vec<FoodEntry>,
}

/// Immutable food-nutrition table keyed by normalized name
#[derive(Debug)]
pub struct FoodTable {
    entries: Vec<FoodEntry>,
    by_key: HashMap<String, usize>,
    keys: Vec<String>,
}

impl FoodTable {
    pub fn from_json(raw: &str) -> ApiResult<Self> {
        let file: FoodFile = serde_json::from_str(raw)
            .map_err(|e| ApiError::dataset_error(format!("invalid food dataset: {}", e)))?;

        let mut by_key = HashMap::with_capacity(file.foods.len());
        let mut keys = Vec::with_capacity(file.foods.len());
        for (idx, entry) in file.foods.iter().enumerate() {
            let key = normalize_food_key(&entry.name);
            by_key.insert(key.clone(), idx);
            keys.push(key);
        }

        Ok(Self { entries: file.foods, by_key, keys })
    }

    /// Load from an optional path, falling back to the embedded dataset.
    pub fn load(path: Option<&str>) -> ApiResult<Self> {
        let table = match path {
            Some(p) => {
                let raw = fs::read_to_string(p).map_err(|e| {
                    ApiError::dataset_error(format!("cannot read food dataset {}: {}", p, e))
                })?;
                Self::from_json(&raw)?
            }
            None => Self::from_json(EMBEDDED_FOODS)?,
        };
        tracing::info!("Loaded food table with {} entries", table.len());
        Ok(table)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&FoodEntry> {
        self.by_key.get(key).map(|&idx| &self.entries[idx])
    }

    /// All canonical keys, in dataset order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_disease_key() {
        assert_eq!(normalize_disease_key("Type 2 Diabetes"), "type_2_diabetes");
        assert_eq!(normalize_disease_key("  Common   Cold  "), "common_cold");
        assert_eq!(normalize_disease_key("migraine"), "migraine");
    }

    #[test]
    fn test_normalization_is_idempotent() {
        for input in ["Type 2 Diabetes", "  Common   Cold  ", "ASTHMA", "apple  pie"] {
            let once = normalize_disease_key(input);
            assert_eq!(normalize_disease_key(&once), once);

            let once = normalize_food_key(input);
            assert_eq!(normalize_food_key(&once), once);
        }
    }

    #[test]
    fn test_embedded_disease_table_loads() {
        let table = DiseaseTable::from_json(EMBEDDED_DISEASES).unwrap();
        assert!(!table.is_empty());
        assert!(table.get("migraine").is_some());
        // Keys are stored normalized
        for key in table.by_key.keys() {
            assert_eq!(&normalize_disease_key(key), key);
        }
    }

    #[test]
    fn test_embedded_food_table_loads() {
        let table = FoodTable::from_json(EMBEDDED_FOODS).unwrap();
        assert!(!table.is_empty());
        let apple = table.get("apple").expect("apple entry");
        assert_eq!(apple.name, "Apple");
        assert!(apple.calories > 0.0);
    }

    #[test]
    fn test_missing_path_is_dataset_error() {
        let err = FoodTable::load(Some("/nonexistent/foods.json")).unwrap_err();
        assert_eq!(err.error_code(), 5002);
    }
}
