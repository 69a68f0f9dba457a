//! Outreach Server Binary
//!
//! HTTP server exposing the simulated WellSky outreach tools.
//!
//! ## Usage
//!
//! ```bash
//! # Start with defaults (port 8080, MCP path /api/mcp)
//! outreach-server
//!
//! # Custom port, CORS off
//! outreach-server --port 3000 --no-cors
//! ```

use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use outreach_core::SystemStampBackend;
use outreach_mcp::McpServer;
use outreach_server::{OutreachServer, ServerConfig};

#[derive(Debug, Parser)]
#[command(name = "outreach-server", version, about = "Simulated WellSky patient outreach server")]
struct Args {
    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Disable permissive CORS
    #[arg(long)]
    no_cors: bool,

    /// Secondary path for the MCP endpoint
    #[arg(long, default_value = "/api/mcp")]
    mcp_path: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outreach_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = ServerConfig::builder()
        .port(args.port)
        .cors(!args.no_cors)
        .mcp_path(args.mcp_path)
        .build();

    tracing::info!("Starting outreach server v{}", env!("CARGO_PKG_VERSION"));

    let stamp = Arc::new(SystemStampBackend::new());
    let mcp = McpServer::with_default_tools(stamp);

    let server = OutreachServer::new(mcp, config);
    server.run().await?;

    Ok(())
}
