//! Authentication middleware
//!
//! A request is authenticated only when its bearer token is valid AND the
//! session it names is still live, so a logged-out token stops working
//! immediately.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::{IntoResponse, Response},
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Session attached to an authenticated request
#[derive(Clone, Copy, Debug)]
pub struct CurrentSession {
    pub session_id: Uuid,
    pub farmer_id: i64,
}

/// Authentication middleware that validates tokens against live sessions
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = bearer_token(&request);
    match authenticate(&state, token).await {
        Ok(session) => {
            request.extensions_mut().insert(session);
            next.run(request).await
        }
        Err(e) => e.into_response(),
    }
}

fn bearer_token(request: &Request) -> Option<String> {
    request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn authenticate(state: &AppState, token: Option<String>) -> AppResult<CurrentSession> {
    let token = token
        .ok_or_else(|| AppError::Unauthorized("Missing or invalid Authorization header".into()))?;

    let claims = state.auth.validate_token(&token)?;
    let session_id = claims.session_id()?;
    let farmer_id = claims.farmer_id()?;

    let controller = state
        .sessions
        .get(&session_id)
        .await
        .ok_or_else(|| AppError::Unauthorized("Session has ended. Please log in.".into()))?;

    if controller.farmer_id() != Some(farmer_id) {
        return Err(AppError::InvalidToken);
    }

    Ok(CurrentSession {
        session_id,
        farmer_id,
    })
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentSession>()
            .copied()
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))
    }
}
