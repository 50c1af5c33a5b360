//! Farmer registration models

use serde::{Deserialize, Serialize};

/// A registered farmer, keyed by contact number
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FarmerRecord {
    pub id: i64,
    pub name: String,
    /// Phone or other contact string, unique per farmer
    pub contact: String,
    /// Field size in acres
    pub field_size: f64,
    pub crop_planted: String,
}

/// Fields collected by the registration form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterFarmerInput {
    pub name: String,
    pub contact: String,
    pub field_size: f64,
    pub crop_planted: String,
}

impl RegisterFarmerInput {
    /// Copy of the input with surrounding whitespace removed from text fields
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            contact: self.contact.trim().to_string(),
            field_size: self.field_size,
            crop_planted: self.crop_planted.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_trims_text_fields() {
        let input = RegisterFarmerInput {
            name: "  Asha ".to_string(),
            contact: " 9876543210\n".to_string(),
            field_size: 4.5,
            crop_planted: "Tomato ".to_string(),
        };

        let normalized = input.normalized();
        assert_eq!(normalized.name, "Asha");
        assert_eq!(normalized.contact, "9876543210");
        assert_eq!(normalized.crop_planted, "Tomato");
        assert_eq!(normalized.field_size, 4.5);
    }
}
