//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults run a local dev server.
//!
//! - `BYTTECH_HOST` - Bind address (default: 127.0.0.1)
//! - `BYTTECH_PORT` - Listen port (default: 3000)
//! - `BYTTECH_BASE_URL` - Public base URL (default: derived from host and port)
//! - `BYTTECH_CATALOG_SIZE` - Number of demo products to generate (default: 72)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use thiserror::Error;

/// Demo catalog size when `BYTTECH_CATALOG_SIZE` is not set.
pub const DEFAULT_CATALOG_SIZE: u32 = 72;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Number of products in the generated demo catalog
    pub catalog_size: u32,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host: IpAddr = parse_env("BYTTECH_HOST", "127.0.0.1")?;
        let port: u16 = parse_env("BYTTECH_PORT", "3000")?;
        let base_url = std::env::var("BYTTECH_BASE_URL")
            .unwrap_or_else(|_| format!("http://{host}:{port}"));
        let catalog_size = parse_env("BYTTECH_CATALOG_SIZE", "72")?;

        Ok(Self {
            host,
            port,
            base_url,
            catalog_size,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the public URL is served over TLS. The session cookie sets
    /// its `Secure` attribute from this.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl Default for StorefrontConfig {
    /// Local development defaults, identical to `from_env` with no
    /// variables set.
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 3000,
            base_url: "http://127.0.0.1:3000".to_string(),
            catalog_size: DEFAULT_CATALOG_SIZE,
        }
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Get an environment variable with a default, parsed into its target type.
fn parse_env<T>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_env_or_default(key, default)
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig {
            host: "0.0.0.0".parse().unwrap(),
            port: 8080,
            base_url: "http://localhost:8080".to_string(),
            catalog_size: 10,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "0.0.0.0");
        assert_eq!(addr.port(), 8080);
    }

    #[test]
    fn test_default_matches_local_dev() {
        let config = StorefrontConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.catalog_size, DEFAULT_CATALOG_SIZE);
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
    }

    #[test]
    fn test_is_secure_follows_base_url_scheme() {
        let mut config = StorefrontConfig::default();
        assert!(!config.is_secure());
        config.base_url = "https://shop.byttech.example".to_string();
        assert!(config.is_secure());
    }
}
