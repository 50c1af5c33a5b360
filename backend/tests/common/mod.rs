//! Shared fixtures for backend integration tests

#![allow(dead_code)]

use std::sync::Arc;

use nurturewise_backend::config::{
    Config, DatabaseConfig, EconomicsConfig, InferenceConfig, JwtConfig, ServerConfig,
    UploadConfig,
};
use nurturewise_backend::error::{AppError, AppResult};
use nurturewise_backend::external::{DiseaseInference, ImageUpload};
use nurturewise_backend::services::FarmerStore;
use nurturewise_backend::AppState;
use shared::{InferencePrediction, InferenceResult, RegisterFarmerInput};
use sqlx::sqlite::SqlitePoolOptions;

/// Inference collaborator returning a canned answer; `None` fails the call
pub struct StubInference(pub Option<Vec<InferencePrediction>>);

#[axum::async_trait]
impl DiseaseInference for StubInference {
    async fn infer(&self, _image: &ImageUpload) -> AppResult<InferenceResult> {
        match &self.0 {
            Some(predictions) => Ok(InferenceResult::new(predictions.clone())),
            None => Err(AppError::InferenceError("API returned 503".into())),
        }
    }
}

pub fn blight_and_rust() -> StubInference {
    StubInference(Some(vec![
        InferencePrediction::new("Blight", 0.92),
        InferencePrediction::new("Rust", 0.3),
    ]))
}

pub fn test_config() -> Config {
    Config {
        environment: "test".to_string(),
        server: ServerConfig::default(),
        database: DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
            min_connections: 1,
        },
        jwt: JwtConfig {
            secret: "integration-test-secret".to_string(),
            access_token_expiry: 3600,
        },
        inference: InferenceConfig {
            api_url: "http://127.0.0.1:9".to_string(),
            api_key: "unused".to_string(),
            model_id: "plants/1".to_string(),
            timeout_secs: 1,
        },
        economics: EconomicsConfig {
            currency_symbol: "₹".to_string(),
            usd_to_inr_rate: 83.0,
        },
        upload: UploadConfig {
            max_image_bytes: 1024 * 1024,
        },
    }
}

pub async fn memory_store() -> FarmerStore {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    let store = FarmerStore::new(pool);
    store.init_schema().await.unwrap();
    store
}

pub async fn app_state(inference: StubInference) -> AppState {
    AppState::new(test_config(), memory_store().await, Arc::new(inference)).unwrap()
}

pub fn farmer(name: &str, contact: &str, field_size: f64, crop: &str) -> RegisterFarmerInput {
    RegisterFarmerInput {
        name: name.to_string(),
        contact: contact.to_string(),
        field_size,
        crop_planted: crop.to_string(),
    }
}

pub fn leaf_image() -> ImageUpload {
    ImageUpload::new(
        Some("leaf.jpg".to_string()),
        Some("image/jpeg".to_string()),
        vec![0xFF, 0xD8, 0xFF, 0xE0],
        1024,
    )
    .unwrap()
}
