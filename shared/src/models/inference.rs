//! Disease inference models

use serde::{Deserialize, Serialize};

/// One classification returned by the inference service
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InferencePrediction {
    pub label: String,
    /// Confidence in [0, 1]
    pub confidence: f64,
}

impl InferencePrediction {
    pub fn new(label: impl Into<String>, confidence: f64) -> Self {
        Self {
            label: label.into(),
            confidence,
        }
    }

    /// Confidence as a percentage with two decimals, e.g. `92.00%`
    pub fn confidence_percent(&self) -> String {
        format!("{:.2}%", self.confidence * 100.0)
    }
}

/// Result set for one inferred image, most confident first
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InferenceResult {
    pub predictions: Vec<InferencePrediction>,
}

impl InferenceResult {
    pub fn new(predictions: Vec<InferencePrediction>) -> Self {
        Self { predictions }
    }

    /// The single highest-confidence prediction.
    ///
    /// Ties keep the earlier entry, so an already ordered result set yields
    /// its first element.
    pub fn top_prediction(&self) -> Option<&InferencePrediction> {
        let mut best: Option<&InferencePrediction> = None;
        for prediction in &self.predictions {
            match best {
                Some(current) if prediction.confidence <= current.confidence => {}
                _ => best = Some(prediction),
            }
        }
        best
    }

    /// Consume the result set, keeping only the top prediction
    pub fn into_top_prediction(self) -> Option<InferencePrediction> {
        let index = self
            .top_prediction()
            .and_then(|top| self.predictions.iter().position(|p| std::ptr::eq(p, top)))?;
        self.predictions.into_iter().nth(index)
    }

    pub fn is_empty(&self) -> bool {
        self.predictions.is_empty()
    }
}
