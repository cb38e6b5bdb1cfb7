/// Configuration management for the MCP server
///
/// This module loads configuration from environment variables and provides
/// a type-safe configuration struct.
///
/// # Environment Variables
///
/// - `GRIDMESH_BASE_URL`: Platform API base URL (default: https://api.gridmesh.io)
/// - `GRIDMESH_API_VERSION`: Platform API version (default: 1)
/// - `MCP_HOST`: Host to bind to (default: 0.0.0.0)
/// - `MCP_PORT`: Port to bind to (default: 8000)
/// - `RUST_LOG`: Log level filter (default: info)
///
/// # Example
///
/// ```no_run
/// use gridmesh_mcp::config::Config;
///
/// # fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// println!("Server will listen on {}", config.bind_address());
/// # Ok(())
/// # }
/// ```

use serde::{Deserialize, Serialize};
use std::env;

/// Default production endpoint of the GridMesh platform
pub const DEFAULT_BASE_URL: &str = "https://api.gridmesh.io";

/// Default platform API version
pub const DEFAULT_API_VERSION: &str = "1";

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// MCP server configuration
    pub server: ServerConfig,

    /// GridMesh platform configuration
    pub platform: PlatformConfig,
}

/// MCP server bind configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// GridMesh platform endpoint configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    /// Base URL of the platform API
    pub base_url: String,

    /// API version string (appended as `/v{version}`)
    pub api_version: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// All variables have defaults; the only failure mode is an unparseable
    /// `MCP_PORT`.
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let host = env::var("MCP_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = env::var("MCP_PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse::<u16>()?;

        let base_url =
            env::var("GRIDMESH_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let api_version =
            env::var("GRIDMESH_API_VERSION").unwrap_or_else(|_| DEFAULT_API_VERSION.to_string());

        Ok(Self {
            server: ServerConfig { host, port },
            platform: PlatformConfig {
                base_url,
                api_version,
            },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8000,
            },
            platform: PlatformConfig {
                base_url: DEFAULT_BASE_URL.to_string(),
                api_version: DEFAULT_API_VERSION.to_string(),
            },
        }
    }

    #[test]
    fn test_bind_address() {
        let config = test_config();
        assert_eq!(config.bind_address(), "127.0.0.1:8000");
    }

    #[test]
    fn test_defaults() {
        let config = test_config();
        assert_eq!(config.platform.base_url, "https://api.gridmesh.io");
        assert_eq!(config.platform.api_version, "1");
    }
}
