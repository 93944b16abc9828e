//! Workout-plan API models
//!
//! The plan itself is produced by an external generator service; this
//! backend only validates and forwards the profile.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Body of POST /api/generate-workout
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct WorkoutProfile {
    pub sex: String,

    #[validate(range(min = 10, max = 100, message = "age must be 10-100"))]
    pub age: u32,

    /// Height in centimeters
    #[validate(range(min = 80.0, max = 250.0, message = "height must be 80-250 cm"))]
    pub height: f64,

    /// Weight in kilograms
    #[validate(range(min = 25.0, max = 350.0, message = "weight must be 25-350 kg"))]
    pub weight: f64,

    /// Training experience, e.g. "beginner", "intermediate", "advanced"
    pub level: String,

    /// Goal, e.g. "lose weight", "build muscle"
    pub goal: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_weight: Option<f64>,

    #[serde(default = "default_days_per_week")]
    pub days_per_week: u32,
}

fn default_days_per_week() -> u32 {
    7
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_days_per_week_defaults_to_seven() {
        let raw = r#"{
            "sex": "f", "age": 30, "height": 170.0, "weight": 65.0,
            "level": "beginner", "goal": "lose weight"
        }"#;
        let profile: WorkoutProfile = serde_json::from_str(raw).unwrap();
        assert_eq!(profile.days_per_week, 7);
        assert!(profile.target_weight.is_none());
    }

    #[test]
    fn test_profile_validation() {
        let profile = WorkoutProfile {
            sex: "m".into(),
            age: 5,
            height: 180.0,
            weight: 80.0,
            level: "beginner".into(),
            goal: "build muscle".into(),
            target_weight: None,
            days_per_week: 3,
        };
        assert!(profile.validate().is_err());
    }
}
