mod api;
mod middleware;
mod sweeper;

use std::sync::Arc;
use std::time::Duration;

use mindful_scraper::PriceService;
use tracing_subscriber::EnvFilter;

use crate::{
    api::{build_app, default_rate_limit_state, AppState},
    middleware::AuthState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = mindful_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let prices = Arc::new(PriceService::from_app_config(&config)?);
    let _sweeper = sweeper::spawn_cache_sweeper(
        Arc::clone(&prices),
        Duration::from_secs(config.cache_sweep_interval_secs),
    );

    let auth = AuthState::from_env(matches!(
        config.env,
        mindful_core::Environment::Development
    ))?;
    let app = build_app(AppState { prices }, auth, default_rate_limit_state());

    tracing::info!(addr = %config.bind_addr, env = %config.env, "mindful-server listening");
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to listen for ctrl-c");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
