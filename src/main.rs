//! Food Unity backend service.
//!
//! Main entry point: initializes tracing, loads configuration, connects
//! the document-store client, and serves the HTTP API until shutdown.

use std::{sync::Arc, time::Duration};

use anyhow::{Context, Result};
use foodunity_api::{start_server, AppState, Config, CookiePolicy, SessionKeys};
use foodunity_core::{store::mongo, Storage};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    info!("Starting Food Unity backend");

    let config = Config::load()?;
    info!(
        store_url = %config.database_url_masked(),
        database = %config.database_name,
        host = %config.host,
        port = config.port,
        production = config.production,
        "Configuration loaded"
    );

    let client = connect_store(&config).await?;
    info!("Document store connection established");

    let storage = Storage::mongo(&client.database(&config.database_name));

    let state = AppState {
        storage,
        sessions: Arc::new(SessionKeys::new(&config.jwt_secret, config.session_ttl_secs)),
        cookies: CookiePolicy { secure: config.production },
    };

    let addr = config.parse_server_addr()?;
    start_server(state, addr).await?;

    // The store client is left open through shutdown; the driver cleans up
    // connections when the process exits.
    info!("Food Unity shutdown complete");
    Ok(())
}

/// Initializes tracing with environment-based configuration.
fn init_tracing() {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("info,foodunity=debug,tower_http=debug"))
        .expect("Invalid RUST_LOG environment variable");

    let fmt_layer = fmt::layer().with_target(true).with_file(true).with_line_number(true);

    tracing_subscriber::registry().with(filter).with(fmt_layer).init();
}

/// Connects the document-store client with bounded retry.
async fn connect_store(config: &Config) -> Result<mongo::Client> {
    let mut retries = 0;
    const MAX_RETRIES: u32 = 5;
    const RETRY_DELAY: Duration = Duration::from_secs(2);

    loop {
        match mongo::connect(&config.database_url).await {
            Ok(client) => return Ok(client),
            Err(error) if retries < MAX_RETRIES => {
                retries += 1;
                warn!(
                    error = %error,
                    attempt = retries,
                    max_retries = MAX_RETRIES,
                    "Store connection failed, retrying..."
                );
                tokio::time::sleep(RETRY_DELAY).await;
            },
            Err(e) => {
                return Err(e).context("Failed to connect to the document store after retries");
            },
        }
    }
}
