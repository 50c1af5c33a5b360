//! Route definitions for the NurtureWise Agro dashboard

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Room for multipart boundaries and the numeric fields next to the image
const MULTIPART_OVERHEAD_BYTES: usize = 64 * 1024;

/// Create API routes
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Auth routes (public)
        .nest("/auth", auth_routes(state.clone()))
        // Standalone economic calculator (public)
        .route("/economics", post(handlers::calculate_economics))
        // Protected routes - farmer profile
        .nest("/farmers", farmer_routes(state.clone()))
        // Protected routes - detection and economic analysis
        .nest("/analysis", analysis_routes(state))
}

/// Authentication routes
fn auth_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/register", post(handlers::register))
        .route("/login", post(handlers::login))
        .route(
            "/logout",
            post(handlers::logout)
                .route_layer(middleware::from_fn_with_state(state, auth_middleware)),
        )
}

/// Farmer routes (protected)
fn farmer_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/me", get(handlers::get_current_farmer))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Analysis routes (protected)
fn analysis_routes(state: AppState) -> Router<AppState> {
    let body_limit = state.config.upload.max_image_bytes + MULTIPART_OVERHEAD_BYTES;

    Router::new()
        .route("/", post(handlers::analyze))
        .layer(DefaultBodyLimit::max(body_limit))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
