//! Server configuration

/// Default TCP port
const DEFAULT_PORT: u16 = 8080;
/// Default secondary path for the MCP endpoint
const DEFAULT_MCP_PATH: &str = "/api/mcp";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to listen on
    pub port: u16,
    /// Enable permissive CORS
    pub cors_enabled: bool,
    /// Secondary path alias for the MCP endpoint
    pub mcp_path: String,
}

impl ServerConfig {
    /// Create a new configuration builder
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            cors_enabled: true,
            mcp_path: DEFAULT_MCP_PATH.to_string(),
        }
    }
}

/// Builder for ServerConfig
#[derive(Debug, Default)]
pub struct ServerConfigBuilder {
    port: Option<u16>,
    cors_enabled: Option<bool>,
    mcp_path: Option<String>,
}

impl ServerConfigBuilder {
    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Enable or disable CORS
    pub fn cors(mut self, enabled: bool) -> Self {
        self.cors_enabled = Some(enabled);
        self
    }

    /// Set the MCP endpoint path
    pub fn mcp_path(mut self, path: impl Into<String>) -> Self {
        self.mcp_path = Some(path.into());
        self
    }

    /// Build the configuration
    pub fn build(self) -> ServerConfig {
        ServerConfig {
            port: self.port.unwrap_or(DEFAULT_PORT),
            cors_enabled: self.cors_enabled.unwrap_or(true),
            mcp_path: self.mcp_path.unwrap_or_else(|| DEFAULT_MCP_PATH.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.port, 8080);
        assert!(config.cors_enabled);
        assert_eq!(config.mcp_path, "/api/mcp");
    }

    #[test]
    fn test_builder_overrides() {
        let config = ServerConfig::builder()
            .port(3000)
            .cors(false)
            .mcp_path("/mcp")
            .build();
        assert_eq!(config.port, 3000);
        assert!(!config.cors_enabled);
        assert_eq!(config.mcp_path, "/mcp");
    }
}
