//! NurtureWise Agro - Backend Server

use std::sync::Arc;

use nurturewise_backend::{
    create_app, external::DiseaseInferenceClient, services::FarmerStore, AppState, Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "nwa_server=debug,nurturewise_backend=debug,tower_http=debug,sqlx=warn".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Config::load()?;

    tracing::info!("Starting NurtureWise Agro server");
    tracing::info!("Environment: {}", config.environment);

    // Open the farmer store
    tracing::info!("Opening farmer database...");
    let store = FarmerStore::connect(&config.database).await?;
    tracing::info!("Farmer database ready");

    let inference = DiseaseInferenceClient::new(&config.inference)?;
    tracing::info!("Inference model: {}", config.inference.model_id);

    let addr = config.bind_address();
    let state = AppState::new(config, store.clone(), Arc::new(inference))?;
    let app = create_app(state);

    tracing::info!("Listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    store.close().await;
    tracing::info!("Farmer database closed");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
