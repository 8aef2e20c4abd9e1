//! Client for the external prediction collaborator.
//!
//! The scoring model lives in a separate HTTP service; this client only
//! forwards feature maps and relays the numeric prediction. The table core
//! has no dependency on it.

use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PredictError {
    #[error("prediction service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("prediction service rejected the request: {0}")]
    Upstream(String),
}

#[derive(Deserialize)]
struct FeaturesResponse {
    expected_features: Vec<String>,
}

#[derive(Deserialize)]
struct PredictResponse {
    prediction: f64,
}

#[derive(Deserialize)]
struct UpstreamError {
    detail: String,
}

/// Thin reqwest wrapper around the prediction service endpoints.
#[derive(Debug, Clone)]
pub struct PredictClient {
    base_url: String,
    http: reqwest::Client,
}

impl PredictClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The ordered feature names the model expects.
    pub async fn expected_features(&self) -> Result<Vec<String>, PredictError> {
        let response = self
            .http
            .get(format!("{}/api/v1/features", self.base_url))
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json::<FeaturesResponse>().await?.expected_features)
    }

    /// Submit one feature map, get one composite quality score back.
    pub async fn predict(
        &self,
        features: &HashMap<String, f64>,
    ) -> Result<f64, PredictError> {
        let response = self
            .http
            .post(format!("{}/api/v1/predict", self.base_url))
            .json(&serde_json::json!({ "features": features }))
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json::<PredictResponse>().await?.prediction)
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, PredictError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let detail = match response.json::<UpstreamError>().await {
            Ok(body) => body.detail,
            Err(_) => status.to_string(),
        };
        Err(PredictError::Upstream(detail))
    }
}
