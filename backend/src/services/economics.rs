//! Economic impact evaluation for submitted form values

use serde::Deserialize;
use shared::{Currency, EconomicInputs, EconomicOutcome};

use crate::config::EconomicsConfig;

/// Economic inputs as submitted; missing values count as not positive
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EconomicRequest {
    pub field_size: Option<f64>,
    pub affected_area: Option<f64>,
    pub crop_price: Option<f64>,
    #[serde(default)]
    pub currency: Currency,
}

/// Evaluate a request in the reporting currency.
///
/// `default_field_size` fills in a missing field size (the farmer's
/// registered acreage).
pub fn evaluate(
    request: &EconomicRequest,
    default_field_size: Option<f64>,
    config: &EconomicsConfig,
) -> EconomicOutcome {
    let field_size = request.field_size.or(default_field_size).unwrap_or(0.0);
    let affected_area = request.affected_area.unwrap_or(0.0);
    let crop_price = request
        .currency
        .to_inr(request.crop_price.unwrap_or(0.0), config.usd_to_inr_rate);

    let outcome = EconomicOutcome::evaluate(
        EconomicInputs::new(field_size, affected_area, crop_price),
        &config.currency_symbol,
    );

    if !outcome.is_computed() {
        tracing::debug!("Economic inputs incomplete; prompting for values");
    }
    outcome
}
