//! Workout plan forwarder
//!
//! Thin proxy in front of the external plan-generator service: the validated
//! profile is posted as JSON and the generated plan is returned verbatim.

use std::time::Duration;

use crate::config::WorkoutConfig;
use crate::models::WorkoutProfile;
use crate::utils::{ApiError, ApiResult};

pub struct WorkoutService {
    http_client: reqwest::Client,
    api_url: String,
    timeout_secs: u64,
}

impl WorkoutService {
    pub fn new(config: &WorkoutConfig) -> ApiResult<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::internal_error(format!("http client init failed: {}", e)))?;
        Ok(Self {
            http_client,
            api_url: config.api_url.clone(),
            timeout_secs: config.timeout_secs,
        })
    }

    /// Forward the profile to the plan generator and return its JSON reply.
    pub async fn generate_plan(&self, profile: &WorkoutProfile) -> ApiResult<serde_json::Value> {
        tracing::info!("Requesting workout plan from {}", self.api_url);

        let response = self
            .http_client
            .post(&self.api_url)
            .json(profile)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ApiError::UpstreamTimeout(self.timeout_secs)
                } else {
                    ApiError::UpstreamError { status: 0, message: e.to_string() }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Plan generator returned {}: {}", status, body);
            return Err(ApiError::UpstreamError {
                status: status.as_u16(),
                message: body,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ApiError::UpstreamMalformed(e.to_string()))
    }
}
