//! WebAssembly module for the NurtureWise Agro dashboard
//!
//! Provides client-side computation for:
//! - Economic impact previews while the farmer types
//! - Registration form validation
//! - Top-prediction extraction from a raw inference response

use serde::Deserialize;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

/// Economic impact as JSON, or `None` unless all inputs are positive
#[wasm_bindgen]
pub fn calculate_economic_impact(
    field_size: f64,
    affected_area: f64,
    crop_price: f64,
) -> Option<String> {
    compute_economic_impact(field_size, affected_area, crop_price)
        .and_then(|result| serde_json::to_string(&result).ok())
}

/// Yield loss percentage, or 0 when the inputs are incomplete
#[wasm_bindgen]
pub fn calculate_yield_loss_percent(field_size: f64, affected_area: f64) -> f64 {
    // Yield loss does not depend on price; any positive price will do
    compute_economic_impact(field_size, affected_area, 1.0)
        .map(|result| result.yield_loss_percent)
        .unwrap_or(0.0)
}

/// First validation message for the registration form, if any
#[wasm_bindgen]
pub fn validate_registration_form(
    name: &str,
    contact: &str,
    field_size: f64,
    crop_planted: &str,
) -> Option<String> {
    let input = RegisterFarmerInput {
        name: name.to_string(),
        contact: contact.to_string(),
        field_size,
        crop_planted: crop_planted.to_string(),
    };

    validate_registration(&input).err().map(|e| e.to_string())
}

#[derive(Deserialize)]
struct RawPrediction {
    class: String,
    confidence: f64,
}

#[derive(Deserialize)]
struct RawInferenceResponse {
    #[serde(default)]
    predictions: Vec<RawPrediction>,
}

/// "<label> (<confidence>%)" for the top prediction in a raw API response
#[wasm_bindgen]
pub fn describe_top_prediction(response_json: &str) -> Result<Option<String>, JsValue> {
    let raw: RawInferenceResponse = serde_json::from_str(response_json)
        .map_err(|e| JsValue::from_str(&format!("Invalid inference JSON: {}", e)))?;

    let result = InferenceResult::new(
        raw.predictions
            .into_iter()
            .map(|p| InferencePrediction::new(p.class, p.confidence))
            .collect(),
    );

    Ok(result
        .top_prediction()
        .map(|top| format!("{} ({})", top.label, top.confidence_percent())))
}
