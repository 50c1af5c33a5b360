//! Common types used across the dashboard

use serde::{Deserialize, Serialize};

/// Currency a crop price was entered in
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Reporting currency
    #[default]
    Inr,
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
        }
    }

    /// Convert an amount in this currency to INR using the configured rate
    pub fn to_inr(&self, amount: f64, usd_to_inr_rate: f64) -> f64 {
        match self {
            Currency::Inr => amount,
            Currency::Usd => amount * usd_to_inr_rate,
        }
    }
}

impl std::str::FromStr for Currency {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "" | "INR" => Ok(Currency::Inr),
            "USD" => Ok(Currency::Usd),
            _ => Err("Currency must be INR or USD"),
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
