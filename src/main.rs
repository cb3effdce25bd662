//! Locale gateway
//!
//! Sits in front of a page renderer and makes sure every page URL carries a
//! locale prefix.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ───────────────▶ http server ──▶ locale middleware ──▶ routing resolver
//!                                            │                    │
//!                          redirect (307) ◀──┘                    │ excluded / localized
//!                                                                 ▼
//!                           /robots.txt, /sitemap.xml ◀── seo   upstream renderer
//!                                                              (or JSON page context)
//!
//!     Cross-cutting: config (TOML) · observability (tracing, metrics) · lifecycle (shutdown)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use locale_gateway::config::{load_config, GatewayConfig};
use locale_gateway::http::HttpServer;
use locale_gateway::lifecycle::Shutdown;
use locale_gateway::observability::{logging::init_logging, metrics::init_metrics};

#[derive(Parser)]
#[command(name = "locale-gateway")]
#[command(about = "Locale-prefix routing gateway for a multilingual site", long_about = None)]
struct Args {
    /// Path to the TOML configuration file. Built-in defaults are used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };

    init_logging(&config.observability);

    tracing::info!("locale-gateway v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        bind_address = %config.listener.bind_address,
        site_url = %config.site.url,
        redirect_status = config.redirect.status,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let server = HttpServer::new(config)?;

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    shutdown.trigger_on_signal();

    server.run(listener, receiver).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
