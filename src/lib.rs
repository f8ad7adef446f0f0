pub mod api;
pub mod features;
pub mod shared;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::features::translator::provider;
use crate::shared::settings::AppSettings;

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "translator_service_lib=info,translator_service=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}

pub async fn run() -> anyhow::Result<()> {
    init_tracing();

    let settings = AppSettings::load().await.context("Failed to load settings")?;
    let provider = provider::build_provider(&settings.provider)
        .context("Failed to set up translation provider")?;
    let state = api::AppState::new(&settings, provider);
    let app = api::build_router(state);

    let host = settings.server.host.as_str();
    let port = settings.server.port;
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .with_context(|| format!("Failed to bind to {}:{}", host, port))?;
    tracing::info!(
        "Translation server listening on http://{}",
        listener.local_addr().context("Listener has no local address")?
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    Ok(())
}
