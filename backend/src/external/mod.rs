//! External API integrations

pub mod disease_inference;

pub use disease_inference::{DiseaseInference, DiseaseInferenceClient, ImageUpload};
