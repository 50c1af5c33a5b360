//! Dashboard analysis report: disease detection plus economic impact

use serde::{Deserialize, Serialize};

use super::{EconomicImpactResult, EconomicInputs, FarmerRecord, InferencePrediction};

pub const NO_DETECTION_MESSAGE: &str = "No disease detected. Please try again.";
pub const INPUTS_REQUIRED_MESSAGE: &str =
    "Please fill in the inputs above to calculate economic impact.";

/// External search links derived from a detected label
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResourceLinks {
    /// Web search for "<label> fertilizer product shop"
    pub fertilizer_search_url: String,
    /// Video search for "<label> management tips"
    pub management_videos_url: String,
}

/// What the detection section shows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DetectionOutcome {
    Detected {
        label: String,
        confidence: f64,
        confidence_percent: String,
        links: ResourceLinks,
    },
    /// Empty result set or a failed inference call
    NoDetection { message: String },
    /// No image was uploaded
    NotRequested,
}

impl DetectionOutcome {
    pub fn detected(prediction: InferencePrediction, links: ResourceLinks) -> Self {
        DetectionOutcome::Detected {
            confidence_percent: prediction.confidence_percent(),
            label: prediction.label,
            confidence: prediction.confidence,
            links,
        }
    }

    pub fn no_detection() -> Self {
        DetectionOutcome::NoDetection {
            message: NO_DETECTION_MESSAGE.to_string(),
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            DetectionOutcome::Detected { label, .. } => Some(label),
            _ => None,
        }
    }
}

/// What the economic section shows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum EconomicOutcome {
    Computed {
        field_size: f64,
        affected_area: f64,
        crop_price: f64,
        currency_symbol: String,
        yield_loss_percent: f64,
        revenue_loss: f64,
        residual_income: f64,
    },
    /// Not every input was positive; informational only
    InputsRequired { message: String },
}

impl EconomicOutcome {
    /// Evaluate inputs already expressed in the reporting currency
    pub fn evaluate(inputs: EconomicInputs, currency_symbol: &str) -> Self {
        match inputs.compute() {
            Some(result) => Self::computed(inputs, result, currency_symbol),
            None => EconomicOutcome::InputsRequired {
                message: INPUTS_REQUIRED_MESSAGE.to_string(),
            },
        }
    }

    fn computed(inputs: EconomicInputs, result: EconomicImpactResult, symbol: &str) -> Self {
        EconomicOutcome::Computed {
            field_size: inputs.field_size,
            affected_area: inputs.affected_area,
            crop_price: inputs.crop_price,
            currency_symbol: symbol.to_string(),
            yield_loss_percent: result.yield_loss_percent,
            revenue_loss: result.revenue_loss,
            residual_income: result.residual_income,
        }
    }

    pub fn is_computed(&self) -> bool {
        matches!(self, EconomicOutcome::Computed { .. })
    }
}

/// Everything rendered for one analysis submission
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisReport {
    pub farmer: FarmerRecord,
    pub detection: DetectionOutcome,
    pub economics: EconomicOutcome,
}
