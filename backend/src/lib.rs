//! NurtureWise Agro - farm dashboard backend
//!
//! Farmers register and log in by contact number, upload a crop-leaf photo
//! for disease classification by a hosted inference API, and get a simple
//! economic impact estimate for the affected area.

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

pub use config::Config;

use external::DiseaseInference;
use services::{AuthService, FarmerStore, SessionController, SessionRegistry};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: FarmerStore,
    pub inference: Arc<dyn DiseaseInference>,
    pub sessions: SessionRegistry,
    pub auth: AuthService,
    pub config: Arc<Config>,
}

impl AppState {
    /// Wire the collaborators constructed at startup
    pub fn new(
        config: Config,
        store: FarmerStore,
        inference: Arc<dyn DiseaseInference>,
    ) -> error::AppResult<Self> {
        Ok(Self {
            auth: AuthService::new(&config.jwt)?,
            store,
            inference,
            sessions: SessionRegistry::new(),
            config: Arc::new(config),
        })
    }

    /// A fresh anonymous session over the shared collaborators
    pub fn new_session(&self) -> SessionController {
        SessionController::new(
            self.store.clone(),
            Arc::clone(&self.inference),
            self.config.economics.clone(),
        )
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "NurtureWise Agro API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
