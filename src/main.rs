use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use parkline::api::{ApiClient, ApiError};
use parkline::auth::AuthSession;
use parkline::cli::{self, Cli};
use parkline::config::Config;
use parkline::session::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    // Initialize logging
    let log_level = cli
        .log_level
        .as_ref()
        .unwrap_or(&config.logging.level)
        .clone();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url = cli
        .api_url
        .clone()
        .unwrap_or_else(|| config.api.base_url.clone());

    let store = Arc::new(SessionStore::open(&config.storage.data_dir)?);
    let client = ApiClient::new(base_url, store.clone());
    let auth = AuthSession::new(client.clone(), store.clone());

    if let Err(err) = cli::run_command(&cli, &client, &auth, &store).await {
        // An expired session routes into the logout transition rather than
        // rendering as a generic failure.
        if err
            .downcast_ref::<ApiError>()
            .is_some_and(|e| e.is_unauthorized())
        {
            auth.logout();
            eprintln!("Session expired. Please log in again.");
            std::process::exit(1);
        }
        return Err(err);
    }

    Ok(())
}
