//! WebServer entry point
//!
//! Starts a catalog session against PokeAPI, loads it in the background and
//! serves the JSON API while the load is in progress.

use std::net::SocketAddr;
use std::sync::Arc;

use clap::Parser;

use catalog::{CatalogConfig, CatalogSession, PokeApiSource};
use shared::{component_info, logging::{self, ComponentId}};
use webserver::{WebServer, WebServerError, WebServerResult};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "JSON API over the creature catalog")]
struct Args {
    /// Port for the HTTP server
    #[arg(long, default_value = "8080")]
    port: u16,

    /// Bind host
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// PokeAPI base URL (overrides POKEDEX_API_BASE)
    #[arg(long)]
    api_base: Option<String>,

    /// Number of identities to list (overrides POKEDEX_LISTING_LIMIT)
    #[arg(long)]
    limit: Option<u32>,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    ComponentId::init_webserver();
    logging::init_tracing_with_level(Some(&args.log_level));

    let address: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| WebServerError::ServerStartup(format!("Invalid bind address: {e}")))?;

    let mut config = CatalogConfig::from_env()?;
    if let Some(base) = &args.api_base {
        config = config.with_api_base(base)?;
    }
    if let Some(limit) = args.limit {
        config = config.with_listing_limit(limit);
    }
    component_info!(ComponentId::current(), "Catalog source: {}", config.api_base);

    let source = PokeApiSource::new(config.clone())?;
    let session = Arc::new(CatalogSession::new(source, config));

    // A failed load is recorded in the session; clients retry via POST /api/reload
    let loading = Arc::clone(&session);
    tokio::spawn(async move {
        let _ = loading.load().await;
    });

    WebServer::new(address, session).run().await
}
