mod api;
mod config;
mod db;
mod error;
mod models;
mod services;
mod weather;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "haru")]
#[command(about = "Self-hostable weather diary service")]
struct Args {
    /// Fetch and store today's weather immediately instead of waiting for
    /// the next scheduled refresh
    #[arg(long)]
    refresh_on_start: bool,

    /// Override the configured HTTP port
    #[arg(long)]
    port: Option<u16>,
}

use std::sync::Arc;

use chrono::Local;

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::db::Database;
use crate::services::WeatherRefreshManager;
use crate::weather::{CurrentWeather, OpenWeatherMapClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "haru=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let mut config = Config::from_env();
    if let Some(port) = args.port {
        config.server.port = port;
    }

    if config.weather.api_key.is_empty() {
        return Err(anyhow::anyhow!(
            "OPENWEATHERMAP_API_KEY is not set - the weather provider cannot be reached without it"
        ));
    }

    tracing::info!("Initializing database...");
    let db = Database::new(&config.database).await?;

    let client: Arc<dyn CurrentWeather> = Arc::new(OpenWeatherMapClient::new(&config.weather)?);

    let state = AppState::new(config.clone(), db, client.clone());

    let cancel_token = CancellationToken::new();

    let manager = WeatherRefreshManager::new(state.db.clone(), client, config.refresh.refresh_at);
    tracing::info!(
        "Starting weather refresh manager... (daily at {})",
        manager.refresh_at().format("%H:%M")
    );

    if args.refresh_on_start {
        if let Err(e) = manager.run_once().await {
            tracing::error!("Startup weather refresh failed: {}", e);
        }
    }

    let token = cancel_token.child_token();
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = token.cancelled() => {
                    tracing::info!("Weather refresh manager shutting down...");
                    break;
                }
                _ = tokio::time::sleep(manager.next_refresh_delay(Local::now())) => {
                    if let Err(e) = manager.run_once().await {
                        tracing::error!("Weather refresh error: {}", e);
                    }
                }
            }
        }
    });

    let app = create_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("Haru starting on http://{}", addr);
    tracing::info!("  Health check: http://{}/health", addr);
    tracing::info!("  API docs:     http://{}/docs", addr);
    tracing::info!("  OpenAPI spec: http://{}/openapi.json", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(cancel_token))
        .await?;

    Ok(())
}

async fn shutdown_signal(cancel_token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, cancelling background tasks...");
    cancel_token.cancel();
}
