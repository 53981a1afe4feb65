//! API server configuration.
//!
//! Loaded from environment variables with development-friendly
//! defaults. The CORS origin list is empty in dev mode, which means
//! allow-all.

use crate::error::{ApiError, ApiResult};
use std::net::SocketAddr;

/// Configuration for the HTTP surface.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind host for the server.
    pub host: String,
    /// Bind port for the server.
    pub port: u16,
    /// Allowed CORS origins (comma-separated in the env var).
    /// Empty means allow all origins (dev mode).
    pub cors_origins: Vec<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_origins: Vec::new(),
        }
    }
}

impl ApiConfig {
    /// Create an ApiConfig from environment variables.
    ///
    /// Environment variables:
    /// - `KAIZEN_API_BIND`: bind host (default: "0.0.0.0")
    /// - `PORT` or `KAIZEN_API_PORT`: bind port (default: 8080)
    /// - `KAIZEN_CORS_ORIGINS`: comma-separated allowed origins
    ///   (empty = allow all)
    pub fn from_env() -> ApiResult<Self> {
        let host = std::env::var("KAIZEN_API_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = std::env::var("PORT")
            .ok()
            .or_else(|| std::env::var("KAIZEN_API_PORT").ok())
            .unwrap_or_else(|| "8080".to_string());
        let port = port_str
            .parse::<u16>()
            .map_err(|_| ApiError::invalid_input(format!("Invalid port value: {}", port_str)))?;

        let cors_origins = std::env::var("KAIZEN_CORS_ORIGINS")
            .ok()
            .map(|s| {
                s.split(',')
                    .map(|o| o.trim().to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            host,
            port,
            cors_origins,
        })
    }

    /// Resolve the socket address to bind.
    pub fn bind_addr(&self) -> ApiResult<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse::<SocketAddr>()
            .map_err(|e| ApiError::invalid_input(format!("Invalid bind address {}: {}", addr, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_bind_addr() {
        let config = ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 9000,
            cors_origins: Vec::new(),
        };
        assert_eq!(config.bind_addr().unwrap().port(), 9000);
    }

    #[test]
    fn test_bind_addr_rejects_bad_host() {
        let config = ApiConfig {
            host: "not a host".to_string(),
            port: 9000,
            cors_origins: Vec::new(),
        };
        assert!(config.bind_addr().is_err());
    }
}
