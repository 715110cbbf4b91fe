use crate::cli::{Cli, Command};
use crate::config::AppConfig;
use crate::database::RecordRepository;
use anyhow::Context;
use axum::Router;
use clap::Parser;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod cli;
pub mod config;
mod database;
mod domain;
mod features;
mod services;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordRepository>,
    pub config: Arc<AppConfig>,
}

/// The full route table. Features are composed here and nowhere else.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(features::forms::forms_router())
        .merge(features::records::records_router())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // determine environment variables
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("userstore=info,tower_http=info")),
        )
        .init();

    // load centralized config
    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let shared_config = Arc::new(config.clone());

    // one store handle for the whole process, released before exit
    let store = database::connect(&config)
        .await
        .with_context(|| format!("Failed to open record store at {}", config.database.describe()))?;

    let outcome = match cli.selected_command() {
        Command::Walkthrough => walkthrough(store.as_ref()).await,
        Command::Serve => serve(store.clone(), shared_config).await,
    };

    store.close().await;
    info!("Record store closed.");

    outcome
}

async fn serve(store: Arc<dyn RecordRepository>, config: Arc<AppConfig>) -> anyhow::Result<()> {
    let app_state = AppState {
        store,
        config: config.clone(),
    };

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;
    info!("Server listening on http://{}", config.bind_addr);

    axum::serve(listener, app(app_state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn walkthrough(store: &dyn RecordRepository) -> anyhow::Result<()> {
    let report = services::run_walkthrough(store)
        .await
        .context("Walkthrough aborted")?;

    info!(
        after_create = report.after_create.len(),
        renamed = report.renamed,
        after_rename = report.after_rename.len(),
        deleted = report.deleted,
        remaining = report.after_delete.len(),
        "Walkthrough complete."
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested, draining connections...");
}
