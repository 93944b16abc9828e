use std::sync::Arc;

use axum::{Json, extract::State};
use validator::Validate;

use crate::AppState;
use crate::models::WorkoutProfile;
use crate::utils::{ApiError, ApiResult};

/// Generate a workout plan from a fitness profile
#[utoipa::path(
    post,
    path = "/api/generate-workout",
    request_body = WorkoutProfile,
    responses(
        (status = 200, description = "Generated workout plan"),
        (status = 400, description = "Validation error"),
        (status = 502, description = "Plan generator error"),
        (status = 504, description = "Plan generator timeout"),
    ),
    tag = "Workout"
)]
pub async fn generate_workout(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<WorkoutProfile>,
) -> ApiResult<Json<serde_json::Value>> {
    payload
        .validate()
        .map_err(|e| ApiError::validation_error(e.to_string()))?;

    tracing::info!(
        "Generating workout plan: goal={} level={} days_per_week={}",
        payload.goal,
        payload.level,
        payload.days_per_week
    );
    let plan = state.workout_service.generate_plan(&payload).await?;
    Ok(Json(plan))
}
