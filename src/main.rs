// src/main.rs

use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use nomadia_relay::api::router::http_router;
use nomadia_relay::config::CONFIG;
use nomadia_relay::provider::dialogflow::DialogflowProvider;
use nomadia_relay::provider::Provider;
use nomadia_relay::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting Nomadia relay");

    // Fail fast: an unusable credential document aborts startup before the
    // listener binds.
    let provider = DialogflowProvider::from_env()?;
    info!("Provider client ready: {}", provider.name());

    let app_state = Arc::new(AppState::new(Arc::new(provider)));
    let app = http_router(app_state);

    let bind_address = CONFIG.bind_address();
    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    info!("Relay listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
