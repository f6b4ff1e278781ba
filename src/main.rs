mod api_doc;
mod app;
mod config;
mod error;
mod handlers;
mod ids;
mod models;
mod response;
mod routes;
mod state;
mod store;
#[cfg(test)]
mod test_support;

use anyhow::Context;
use config::Config;
use state::AppState;
use store::StoreClient;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;
    init_tracing(config.debug);

    tracing::info!("pet-service starting");
    config.log_startup();

    let store = StoreClient::from_config(&config)
        .await
        .context("FATAL: could not connect to the store")?;

    let addr = format!("{}:{}", config.service_host, config.service_port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    let state = AppState { store };

    tracing::info!("Listening on {}", addr);
    axum::serve(listener, app::router(state))
        .await
        .context("Server error")?;

    Ok(())
}

/// RUST_LOG wins when set; otherwise DEBUG picks the default level
fn init_tracing(debug: bool) {
    let default_filter = if debug {
        "pet_service=debug,tower_http=debug"
    } else {
        "pet_service=info,tower_http=info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .init();
}
