//! Economic impact of crop disease on a field

use serde::{Deserialize, Serialize};

/// Raw inputs to the economic impact calculation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EconomicInputs {
    /// Total field size in acres
    pub field_size: f64,
    /// Diseased area in acres; may exceed `field_size`
    pub affected_area: f64,
    /// Crop price per unit
    pub crop_price: f64,
}

impl EconomicInputs {
    pub fn new(field_size: f64, affected_area: f64, crop_price: f64) -> Self {
        Self {
            field_size,
            affected_area,
            crop_price,
        }
    }

    /// True when every input is a finite, strictly positive number
    pub fn is_complete(&self) -> bool {
        [self.field_size, self.affected_area, self.crop_price]
            .iter()
            .all(|v| v.is_finite() && *v > 0.0)
    }

    pub fn compute(&self) -> Option<EconomicImpactResult> {
        compute_economic_impact(self.field_size, self.affected_area, self.crop_price)
    }
}

/// Derived loss figures, recomputed on every evaluation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EconomicImpactResult {
    pub yield_loss_percent: f64,
    pub revenue_loss: f64,
    /// Income from the unaffected area; negative when the affected area
    /// exceeds the field size
    pub residual_income: f64,
}

/// Compute yield loss, revenue loss and residual income.
///
/// Returns `None` unless all three inputs are strictly positive.
pub fn compute_economic_impact(
    field_size: f64,
    affected_area: f64,
    unit_price: f64,
) -> Option<EconomicImpactResult> {
    if !EconomicInputs::new(field_size, affected_area, unit_price).is_complete() {
        return None;
    }

    let affected_share = affected_area / field_size;
    Some(EconomicImpactResult {
        yield_loss_percent: affected_share * 100.0,
        // Kept in its literal form; equals affected_area * unit_price.
        revenue_loss: affected_share * unit_price * field_size,
        residual_income: (field_size - affected_area) * unit_price,
    })
}
