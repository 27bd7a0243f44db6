use std::env;
use std::str::FromStr;

use config::builder::DefaultState;
use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use jsonwebtoken::Algorithm;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// Create the `users` table on startup (local development only).
    pub run_migrations: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: String,
    pub expiration_days: i64,
}

impl JwtConfig {
    /// Parse the configured signing algorithm name (e.g. "HS256").
    pub fn algorithm(&self) -> Result<Algorithm, ConfigError> {
        Algorithm::from_str(&self.algorithm).map_err(|_| {
            ConfigError::Message(format!("Unknown JWT algorithm: {}", self.algorithm))
        })
    }

    /// Lifetime applied to every issued token.
    pub fn ttl(&self) -> Result<chrono::Duration, ConfigError> {
        if self.expiration_days <= 0 {
            return Err(ConfigError::Message(format!(
                "jwt.expiration_days must be positive, got {}",
                self.expiration_days
            )));
        }

        chrono::Duration::try_days(self.expiration_days).ok_or_else(|| {
            ConfigError::Message(format!(
                "jwt.expiration_days is out of range, got {}",
                self.expiration_days
            ))
        })
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SECRET, DATABASE__URL, SERVER__HTTP_PORT, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    ///
    /// The result is validated; a missing secret is an error here rather
    /// than at the first login.
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let builder = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            .add_source(environment());

        Self::from_builder(builder)
    }

    fn from_builder(builder: config::ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let configuration = builder
            .set_default("database.max_connections", 5)?
            .set_default("database.run_migrations", false)?
            .set_default("server.http_port", 8000)?
            .set_default("jwt.algorithm", "HS256")?
            .set_default("jwt.expiration_days", 30)?
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.validate()?;

        Ok(config)
    }

    /// Reject settings the service cannot start with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt.secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "jwt.secret is not set (JWT__SECRET)".to_string(),
            ));
        }

        if !matches!(
            self.jwt.algorithm()?,
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
        ) {
            return Err(ConfigError::Message(format!(
                "jwt.algorithm must be an HMAC algorithm, got {}",
                self.jwt.algorithm
            )));
        }

        self.jwt.ttl()?;

        Ok(())
    }
}

/// Unprefixed variables, `__` between sections: JWT__SECRET overrides jwt.secret.
fn environment() -> Environment {
    Environment::default().separator("__")
}
