//! Disease Inference Client
//!
//! Client for the hosted crop-disease classification API. The core only
//! relies on the [`DiseaseInference`] trait; this module holds the HTTP
//! implementation.

use std::time::Duration;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, Url};
use serde::Deserialize;
use shared::{is_accepted_image, InferencePrediction, InferenceResult};

use crate::config::InferenceConfig;
use crate::error::{AppError, AppResult};

/// An uploaded leaf photo
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    /// Build an upload, rejecting empty, oversized or non jpg/png files
    pub fn new(
        file_name: Option<String>,
        content_type: Option<String>,
        bytes: Vec<u8>,
        max_bytes: usize,
    ) -> AppResult<Self> {
        if bytes.is_empty() {
            return Err(AppError::validation("image", "Uploaded image is empty"));
        }
        if bytes.len() > max_bytes {
            return Err(AppError::validation(
                "image",
                format!("Image exceeds the {} byte upload limit", max_bytes),
            ));
        }
        if !is_accepted_image(file_name.as_deref(), content_type.as_deref()) {
            return Err(AppError::validation(
                "image",
                "Upload an image of the crop leaf (jpg, jpeg or png)",
            ));
        }

        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}

/// Anything that can classify a leaf image
#[axum::async_trait]
pub trait DiseaseInference: Send + Sync {
    /// Classify `image`; the result may hold zero predictions
    async fn infer(&self, image: &ImageUpload) -> AppResult<InferenceResult>;
}

/// HTTP client for the hosted inference API
#[derive(Clone)]
pub struct DiseaseInferenceClient {
    endpoint: Url,
    http_client: Client,
}

/// Response from the inference API
#[derive(Debug, Deserialize)]
pub struct InferResponse {
    #[serde(default)]
    pub predictions: Vec<PredictionResponse>,
}

/// Single prediction from the API; extra fields are ignored
#[derive(Debug, Deserialize)]
pub struct PredictionResponse {
    pub class: String,
    pub confidence: f64,
}

impl From<PredictionResponse> for InferencePrediction {
    fn from(r: PredictionResponse) -> Self {
        InferencePrediction {
            label: r.class,
            confidence: r.confidence,
        }
    }
}

impl From<InferResponse> for InferenceResult {
    fn from(r: InferResponse) -> Self {
        InferenceResult::new(r.predictions.into_iter().map(Into::into).collect())
    }
}

impl DiseaseInferenceClient {
    /// Create a new inference client from configuration
    pub fn new(config: &InferenceConfig) -> AppResult<Self> {
        let endpoint = Self::endpoint_url(config)?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            endpoint,
            http_client,
        })
    }

    /// `<api_url>/<model_id>?api_key=<key>`
    fn endpoint_url(config: &InferenceConfig) -> AppResult<Url> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::Configuration("inference.api_key is not set".into()));
        }

        let raw = format!(
            "{}/{}",
            config.api_url.trim_end_matches('/'),
            config.model_id.trim_matches('/')
        );
        let mut url = Url::parse(&raw)
            .map_err(|e| AppError::Configuration(format!("Invalid inference URL {}: {}", raw, e)))?;
        url.query_pairs_mut().append_pair("api_key", &config.api_key);
        Ok(url)
    }
}

#[axum::async_trait]
impl DiseaseInference for DiseaseInferenceClient {
    async fn infer(&self, image: &ImageUpload) -> AppResult<InferenceResult> {
        let started = std::time::Instant::now();

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(image.to_base64())
            .send()
            .await
            .map_err(|e| AppError::InferenceError(format!("Request failed: {}", e.without_url())))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::InferenceError(format!(
                "API returned {}: {}",
                status, body
            )));
        }

        let result: InferResponse = response
            .json()
            .await
            .map_err(|e| {
                AppError::InferenceError(format!("Failed to parse response: {}", e.without_url()))
            })?;

        tracing::debug!(
            predictions = result.predictions.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Inference completed"
        );

        Ok(result.into())
    }
}
