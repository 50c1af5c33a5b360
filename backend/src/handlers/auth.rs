//! Registration, login and logout handlers

use axum::{extract::State, http::StatusCode, Json};
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};
use shared::{FarmerRecord, RegisterFarmerInput};

use crate::error::{AppError, AppResult};
use crate::middleware::CurrentSession;
use crate::AppState;

#[derive(Serialize)]
pub struct RegisterResponse {
    pub farmer_id: i64,
    pub message: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub contact: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub farmer: FarmerRecord,
}

/// Register farmer endpoint handler
pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterFarmerInput>,
) -> AppResult<(StatusCode, Json<RegisterResponse>)> {
    let farmer_id = state.new_session().register(&body).await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            farmer_id,
            message: "Registration successful! You can now log in.".to_string(),
        }),
    ))
}

/// Login endpoint handler
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let mut session = state.new_session();
    let farmer = session.login(&body.contact).await?.clone();

    let expires_at = Utc::now() + Duration::seconds(state.config.jwt.access_token_expiry);
    let session_id = state.sessions.insert(session, expires_at).await;
    let token = match state.auth.issue_token(session_id, farmer.id) {
        Ok(token) => token,
        Err(e) => {
            state.sessions.remove(&session_id).await;
            return Err(e);
        }
    };

    Ok(Json(LoginResponse {
        access_token: token.access_token,
        token_type: token.token_type,
        expires_in: token.expires_in,
        farmer,
    }))
}

/// Logout endpoint handler
pub async fn logout(
    State(state): State<AppState>,
    current: CurrentSession,
) -> AppResult<StatusCode> {
    let mut session = state
        .sessions
        .remove(&current.session_id)
        .await
        .ok_or_else(|| AppError::Unauthorized("Session has ended. Please log in.".into()))?;
    session.logout();

    Ok(StatusCode::NO_CONTENT)
}
