//! Disease detection and economic impact handlers

use axum::{
    extract::{multipart::Field, Multipart, State},
    Json,
};
use shared::{AnalysisReport, Currency, EconomicOutcome};

use crate::error::{AppError, AppResult};
use crate::external::ImageUpload;
use crate::middleware::CurrentSession;
use crate::services::economics::{self, EconomicRequest};
use crate::AppState;

/// Analyze an uploaded leaf photo and the economic inputs.
///
/// Multipart fields: `image` (optional file), `field_size`,
/// `affected_area`, `crop_price`, `currency`.
pub async fn analyze(
    State(state): State<AppState>,
    current: CurrentSession,
    mut multipart: Multipart,
) -> AppResult<Json<AnalysisReport>> {
    let session = state
        .sessions
        .get(&current.session_id)
        .await
        .ok_or_else(|| AppError::Unauthorized("Session has ended. Please log in.".into()))?;

    let mut image = None;
    let mut request = EconomicRequest::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => image = read_image(field, state.config.upload.max_image_bytes).await?,
            "field_size" => request.field_size = read_number(&name, field).await?,
            "affected_area" => request.affected_area = read_number(&name, field).await?,
            "crop_price" => request.crop_price = read_number(&name, field).await?,
            "currency" => {
                let text = field.text().await.map_err(malformed)?;
                request.currency = text
                    .parse::<Currency>()
                    .map_err(|m| AppError::validation("currency", m))?;
            }
            other => tracing::debug!("Ignoring multipart field {}", other),
        }
    }

    let report = session.analyze(image, &request).await?;
    Ok(Json(report))
}

/// Economic impact on its own; needs no login or image
pub async fn calculate_economics(
    State(state): State<AppState>,
    Json(request): Json<EconomicRequest>,
) -> Json<EconomicOutcome> {
    Json(economics::evaluate(&request, None, &state.config.economics))
}

async fn read_image(field: Field<'_>, max_bytes: usize) -> AppResult<Option<ImageUpload>> {
    let file_name = field.file_name().map(str::to_string);
    let content_type = field.content_type().map(str::to_string);
    let bytes = field.bytes().await.map_err(malformed)?;

    // Browsers send an empty part when no file was chosen.
    if bytes.is_empty() && file_name.as_deref().unwrap_or_default().is_empty() {
        return Ok(None);
    }

    ImageUpload::new(file_name, content_type, bytes.to_vec(), max_bytes).map(Some)
}

async fn read_number(name: &str, field: Field<'_>) -> AppResult<Option<f64>> {
    let text = field.text().await.map_err(malformed)?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    text.parse::<f64>()
        .map(Some)
        .map_err(|_| AppError::validation(name, format!("{} must be a number", name)))
}

fn malformed(e: axum::extract::multipart::MultipartError) -> AppError {
    AppError::validation("multipart", format!("Malformed upload: {}", e))
}
