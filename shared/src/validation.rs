//! Validation utilities for farmer registration and uploads

use crate::models::RegisterFarmerInput;

/// A validation failure tied to a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Image formats accepted by the leaf photo upload
pub const ACCEPTED_IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// Validate that a required text field is not blank
pub fn validate_required(value: &str) -> Result<(), &'static str> {
    if value.trim().is_empty() {
        return Err("Field is required");
    }
    Ok(())
}

/// Validate field size in acres (finite and strictly positive)
pub fn validate_field_size(field_size: f64) -> Result<(), &'static str> {
    if !field_size.is_finite() || field_size <= 0.0 {
        return Err("Field size must be greater than zero");
    }
    Ok(())
}

/// Validate a contact identifier; any non-blank text is accepted
pub fn validate_contact(contact: &str) -> Result<(), &'static str> {
    if contact.trim().is_empty() {
        return Err("Contact is required");
    }
    Ok(())
}

/// Validate a full registration form; reports the first invalid field
pub fn validate_registration(input: &RegisterFarmerInput) -> Result<(), FieldError> {
    let check = |field: &'static str, result: Result<(), &'static str>| {
        result.map_err(|message| FieldError { field, message })
    };

    check("name", validate_required(&input.name))?;
    check("contact", validate_contact(&input.contact))?;
    check("field_size", validate_field_size(input.field_size))?;
    check("crop_planted", validate_required(&input.crop_planted))?;
    Ok(())
}

/// Check whether a file name or MIME type denotes an accepted image format
pub fn is_accepted_image(file_name: Option<&str>, content_type: Option<&str>) -> bool {
    let by_type = content_type
        .map(|t| matches!(t.trim().to_ascii_lowercase().as_str(), "image/jpeg" | "image/jpg" | "image/png"))
        .unwrap_or(false);

    let by_extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ACCEPTED_IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false);

    by_type || by_extension
}
