/// Configuration management for the API server
///
/// Loads configuration from environment variables (a `.env` file is honored
/// in development via dotenvy).
///
/// # Environment Variables
///
/// - `DATABASE_URL`: SQLite connection string (default: `sqlite:planit.db`)
/// - `API_HOST`: host to bind to (default: 0.0.0.0)
/// - `API_PORT`: port to bind to (default: 5000)
/// - `JWT_SECRET`: secret key for token signing; when unset, a random secret
///   is generated at startup and held for the process lifetime, which
///   invalidates all outstanding tokens on restart
/// - `RUST_LOG`: log filter (default: info)

use rand::distributions::Alphanumeric;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::env;

/// Minimum accepted signing secret length (HS256 wants >= 32 bytes)
const MIN_SECRET_LEN: usize = 32;

/// Length of a generated signing secret
const GENERATED_SECRET_LEN: usize = 64;

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// API server configuration
    pub api: ApiConfig,

    /// Database configuration
    pub database: DatabaseConfig,

    /// Token signing configuration
    pub jwt: JwtConfig,
}

/// API server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Host to bind to
    pub host: String,

    /// Port to bind to
    pub port: u16,
}

/// Database configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,
}

/// Token signing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Secret key for token signing
    ///
    /// Read-only after startup; shared by every in-flight validation.
    /// Generate externally with: `openssl rand -hex 32`
    #[serde(skip_serializing)]
    pub secret: String,
}

impl Config {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a variable has an invalid value or a supplied
    /// `JWT_SECRET` is shorter than 32 bytes.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let api_port = env::var("API_PORT")
            .unwrap_or_else(|_| "5000".to_string())
            .parse::<u16>()?;

        let database_url =
            env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite:planit.db".to_string());

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "5".to_string())
            .parse::<u32>()?;

        let jwt_secret = match env::var("JWT_SECRET") {
            Ok(secret) => {
                if secret.len() < MIN_SECRET_LEN {
                    anyhow::bail!("JWT_SECRET must be at least {} characters long", MIN_SECRET_LEN);
                }
                secret
            }
            Err(_) => {
                tracing::warn!(
                    "JWT_SECRET not set; generated a process-lifetime secret \
                     (outstanding tokens will not survive a restart)"
                );
                generate_secret()
            }
        };

        Ok(Self {
            api: ApiConfig {
                host: api_host,
                port: api_port,
            },
            database: DatabaseConfig {
                url: database_url,
                max_connections,
            },
            jwt: JwtConfig { secret: jwt_secret },
        })
    }

    /// Returns the server bind address
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.api.host, self.api.port)
    }
}

/// Generates a random signing secret from the OS RNG
fn generate_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(GENERATED_SECRET_LEN)
        .map(char::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_address() {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            database: DatabaseConfig {
                url: "sqlite::memory:".to_string(),
                max_connections: 1,
            },
            jwt: JwtConfig {
                secret: "test-secret-key-at-least-32-bytes-long".to_string(),
            },
        };

        assert_eq!(config.bind_address(), "127.0.0.1:5000");
    }

    #[test]
    fn test_generated_secret_length_and_uniqueness() {
        let a = generate_secret();
        let b = generate_secret();

        assert_eq!(a.len(), GENERATED_SECRET_LEN);
        assert!(a.len() >= MIN_SECRET_LEN);
        assert_ne!(a, b);
    }
}
