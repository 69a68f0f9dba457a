//! Outreach Server - HTTP wrapper for the outreach simulator
//!
//! A thin axum layer over `outreach-mcp`: it binds a socket, converts HTTP
//! bodies to dispatcher calls, and maps `Reply` variants onto status codes
//! and headers. All protocol and domain logic stays in `outreach-mcp` and
//! `outreach-core`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use outreach_core::SystemStampBackend;
//! use outreach_mcp::McpServer;
//! use outreach_server::{OutreachServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let mcp = McpServer::with_default_tools(Arc::new(SystemStampBackend::new()));
//!     let config = ServerConfig::builder().port(8080).build();
//!     OutreachServer::new(mcp, config).run().await.unwrap();
//! }
//! ```

pub mod routes;
mod config;

pub use config::{ServerConfig, ServerConfigBuilder};
pub use routes::AppState;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use outreach_mcp::McpServer;

/// Outreach HTTP server
pub struct OutreachServer {
    state: Arc<AppState>,
    config: ServerConfig,
}

impl OutreachServer {
    /// Create a new server wrapping the given dispatcher
    pub fn new(server: McpServer, config: ServerConfig) -> Self {
        Self {
            state: Arc::new(AppState {
                server,
                mcp_path: config.mcp_path.clone(),
            }),
            config,
        }
    }

    /// Build the axum router with all routes
    pub fn router(&self) -> Router {
        routes::create_router(Arc::clone(&self.state), &self.config)
    }

    /// Get the socket address for the server
    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from(([0, 0, 0, 0], self.config.port))
    }

    /// Run the server
    pub async fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.router();
        let addr = self.addr();

        tracing::info!("Outreach server listening on http://{}", addr);
        tracing::info!("Endpoints:");
        tracing::info!("  GET  /");
        tracing::info!("  POST /");
        tracing::info!("  GET  {}", self.config.mcp_path);
        tracing::info!("  POST {}", self.config.mcp_path);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use outreach_core::MockStampBackend;

    #[test]
    fn test_addr_uses_configured_port() {
        let mcp = McpServer::with_default_tools(Arc::new(MockStampBackend::fixed()));
        let server = OutreachServer::new(mcp, ServerConfig::builder().port(3000).build());
        assert_eq!(server.addr().port(), 3000);
    }
}
