//! Application configuration management.
//!
//! Configuration is loaded from a YAML file with environment variable overrides. The configuration
//! file path defaults to `config.yaml` but can be specified via `-f` flag or `STOREFRONT_CONFIG`
//! environment variable.
//!
//! ## Loading Priority
//!
//! Configuration sources are merged in the following order (later sources override earlier ones):
//!
//! 1. **YAML config file** - Base configuration (default: `config.yaml`)
//! 2. **Environment variables** - Variables prefixed with `STOREFRONT_` override YAML values
//!
//! For nested config values, use double underscores in environment variables. For example,
//! `STOREFRONT_AUTH__SECURITY__TOKEN_TTL=2h` sets the `auth.security.token_ttl` field.
//!
//! ## Usage
//!
//! ```no_run
//! use clap::Parser;
//! use storefront::config::{Args, Config};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let args = Args::parse();
//! let config = Config::load(&args)?;
//!
//! println!("Server will bind to {}:{}", config.host, config.port);
//! # Ok(())
//! # }
//! ```
//!
//! ## Configuration Structure
//!
//! - **Server**: `host`, `port` - HTTP server binding configuration
//! - **Security**: `secret_key` (token signing, minimum 32 bytes),
//!   `auth.security.token_ttl`, `auth.security.cors`
//! - **Authentication**: `auth.allow_registration`, `auth.password` - password
//!   rules and Argon2 cost parameters

use clap::Parser;
use figment::{
    Figment,
    providers::{Env, Format, Yaml},
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

use crate::auth::token::MIN_SECRET_KEY_BYTES;
use crate::errors::Error;

/// Simple CLI args - just for specifying config file
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to configuration file
    #[arg(short = 'f', long, env = "STOREFRONT_CONFIG", default_value = "config.yaml")]
    pub config: String,

    /// Validate configuration and exit without starting the server.
    /// Useful for CI/CD pipelines to catch config errors before deployment.
    #[arg(long)]
    pub validate: bool,
}

/// Main application configuration.
///
/// This is the root configuration structure loaded from YAML and environment variables.
/// All fields have sensible defaults defined in the `Default` implementation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP server host to bind to (e.g., "0.0.0.0" for all interfaces)
    pub host: String,
    /// HTTP server port to bind to
    pub port: u16,
    /// Secret key for token signing (required; minimum 32 bytes for HMAC-SHA256)
    pub secret_key: Option<String>,
    /// Authentication configuration
    pub auth: AuthConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            secret_key: None,
            auth: AuthConfig::default(),
        }
    }
}

/// Authentication configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct AuthConfig {
    /// Allow new users to self-register
    pub allow_registration: bool,
    /// Password validation rules and hashing cost
    pub password: PasswordConfig,
    /// Security settings (token expiry, CORS)
    pub security: SecurityConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            allow_registration: true,
            password: PasswordConfig::default(),
            security: SecurityConfig::default(),
        }
    }
}

/// Password validation rules.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct PasswordConfig {
    /// Minimum password length
    pub min_length: usize,
    /// Maximum password length
    pub max_length: usize,
    /// Argon2 memory cost in KiB (default: 19456 KiB = 19 MB, secure for production)
    pub argon2_memory_kib: u32,
    /// Argon2 iterations (default: 2, secure for production)
    pub argon2_iterations: u32,
    /// Argon2 parallelism (default: 1)
    pub argon2_parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            min_length: 8,
            max_length: 64,
            // Secure defaults for production (Argon2id RFC recommendations)
            argon2_memory_kib: 19456, // 19 MB
            argon2_iterations: 2,
            argon2_parallelism: 1,
        }
    }
}

/// Security configuration for tokens and CORS.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct SecurityConfig {
    /// Bearer token expiry duration
    #[serde(with = "humantime_serde")]
    pub token_ttl: Duration,
    /// CORS configuration for browser clients
    pub cors: CorsConfig,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            token_ttl: Duration::from_secs(24 * 60 * 60), // 24 hours
            cors: CorsConfig::default(),
        }
    }
}

/// CORS (Cross-Origin Resource Sharing) configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CorsConfig {
    /// Allowed origins for CORS requests
    pub allowed_origins: Vec<CorsOrigin>,
    /// Allow credentials (authorization headers) in CORS requests
    pub allow_credentials: bool,
    /// Cache preflight requests for this many seconds
    pub max_age: Option<u64>,
    /// Custom headers to expose to the browser (in addition to CORS-safelisted headers)
    pub exposed_headers: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec![
                CorsOrigin::Url(Url::parse("http://localhost:3000").unwrap()), // Development frontend
            ],
            allow_credentials: true,
            max_age: Some(3600), // Cache preflight for 1 hour
            exposed_headers: vec!["location".to_string()],
        }
    }
}

/// A single allowed CORS origin: either an explicit URL or the `*` wildcard.
#[derive(Debug, Clone, PartialEq)]
pub enum CorsOrigin {
    Wildcard,
    Url(Url),
}

impl Serialize for CorsOrigin {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CorsOrigin::Wildcard => serializer.serialize_str("*"),
            CorsOrigin::Url(url) => serializer.serialize_str(url.as_str()),
        }
    }
}

impl<'de> Deserialize<'de> for CorsOrigin {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        if raw == "*" {
            Ok(CorsOrigin::Wildcard)
        } else {
            Url::parse(&raw)
                .map(CorsOrigin::Url)
                .map_err(|e| serde::de::Error::custom(format!("invalid CORS origin '{raw}': {e}")))
        }
    }
}

impl Config {
    #[allow(clippy::result_large_err)]
    pub fn load(args: &Args) -> Result<Self, figment::Error> {
        let config: Self = Self::figment(args).extract()?;
        config.validate().map_err(|e| figment::Error::from(e.to_string()))?;
        Ok(config)
    }

    pub fn figment(args: &Args) -> Figment {
        Figment::new()
            // Load base config file
            .merge(Yaml::file(&args.config))
            // Environment variables can still override specific values
            .merge(Env::prefixed("STOREFRONT_").split("__"))
    }

    /// Validate the configuration for consistency and required fields
    pub fn validate(&self) -> Result<(), Error> {
        // The signing secret is non-negotiable: too short a key weakens every
        // token the service ever issues, so refuse to start.
        match &self.secret_key {
            None => {
                return Err(Error::Internal {
                    operation: "Config validation: secret_key is not configured. \
                     Please set STOREFRONT_SECRET_KEY environment variable or add secret_key to config file."
                        .to_string(),
                });
            }
            Some(key) if key.len() < MIN_SECRET_KEY_BYTES => {
                return Err(Error::Internal {
                    operation: format!(
                        "Config validation: secret_key must be at least {MIN_SECRET_KEY_BYTES} bytes for HMAC-SHA256, got {}",
                        key.len()
                    ),
                });
            }
            Some(_) => {}
        }

        // Validate password requirements
        if self.auth.password.min_length > self.auth.password.max_length {
            return Err(Error::Internal {
                operation: format!(
                    "Config validation: Invalid password configuration: min_length ({}) cannot be greater than max_length ({})",
                    self.auth.password.min_length, self.auth.password.max_length
                ),
            });
        }

        if self.auth.password.min_length < 1 {
            return Err(Error::Internal {
                operation: "Config validation: Invalid password configuration: min_length must be at least 1".to_string(),
            });
        }

        // Validate token expiry duration is reasonable
        if self.auth.security.token_ttl.as_secs() < 300 {
            // Less than 5 minutes
            return Err(Error::Internal {
                operation: "Config validation: token TTL is too short (minimum 5 minutes)".to_string(),
            });
        }

        if self.auth.security.token_ttl.as_secs() > 86400 * 30 {
            // More than 30 days
            return Err(Error::Internal {
                operation: "Config validation: token TTL is too long (maximum 30 days)".to_string(),
            });
        }

        // Validate CORS configuration
        if self.auth.security.cors.allowed_origins.is_empty() {
            return Err(Error::Internal {
                operation: "Config validation: CORS allowed_origins cannot be empty. Add at least one allowed origin.".to_string(),
            });
        }

        // Validate that wildcard is not used with credentials
        let has_wildcard = self
            .auth
            .security
            .cors
            .allowed_origins
            .iter()
            .any(|origin| matches!(origin, CorsOrigin::Wildcard));
        if has_wildcard && self.auth.security.cors.allow_credentials {
            return Err(Error::Internal {
                operation: "Config validation: CORS cannot use wildcard origin '*' with allow_credentials=true. Specify explicit origins."
                    .to_string(),
            });
        }

        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_yaml_and_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
secret_key: "0123456789abcdef0123456789abcdef"
port: 9000
auth:
  allow_registration: false
  password:
    min_length: 12
  security:
    token_ttl: "2h"
"#,
            )?;

            jail.set_env("STOREFRONT_HOST", "127.0.0.1");

            let args = Args {
                config: "test.yaml".to_string(),
                validate: false,
            };

            let config = Config::load(&args)?;

            // Env vars should override
            assert_eq!(config.host, "127.0.0.1");

            // YAML values should be preserved
            assert_eq!(config.port, 9000);
            assert!(!config.auth.allow_registration);
            assert_eq!(config.auth.password.min_length, 12);
            assert_eq!(config.auth.password.max_length, 64); // still default
            assert_eq!(config.auth.security.token_ttl, Duration::from_secs(2 * 60 * 60));

            Ok(())
        });
    }

    #[test]
    fn test_config_validation_missing_secret() {
        let config = Config::default();

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("secret_key is not configured"));
    }

    #[test]
    fn test_config_validation_short_secret() {
        let mut config = Config::default();
        config.secret_key = Some("too-short".to_string());

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("at least 32 bytes"));
    }

    #[test]
    fn test_config_validation_invalid_password_length() {
        let mut config = Config::default();
        config.secret_key = Some("0123456789abcdef0123456789abcdef".to_string());
        config.auth.password.min_length = 10;
        config.auth.password.max_length = 5;

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("min_length"));
    }

    #[test]
    fn test_config_validation_token_ttl_bounds() {
        let mut config = Config::default();
        config.secret_key = Some("0123456789abcdef0123456789abcdef".to_string());

        config.auth.security.token_ttl = Duration::from_secs(60);
        assert!(config.validate().is_err());

        config.auth.security.token_ttl = Duration::from_secs(86400 * 31);
        assert!(config.validate().is_err());

        config.auth.security.token_ttl = Duration::from_secs(3600);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_wildcard_with_credentials() {
        let mut config = Config::default();
        config.secret_key = Some("0123456789abcdef0123456789abcdef".to_string());
        config.auth.security.cors.allowed_origins = vec![CorsOrigin::Wildcard];
        config.auth.security.cors.allow_credentials = true;

        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("wildcard"));

        // Wildcard without credentials is allowed
        config.auth.security.cors.allow_credentials = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_cors_origin_parsing() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "test.yaml",
                r#"
secret_key: "0123456789abcdef0123456789abcdef"
auth:
  security:
    cors:
      allowed_origins: ["https://shop.example.com", "*"]
      allow_credentials: false
"#,
            )?;

            let args = Args {
                config: "test.yaml".to_string(),
                validate: false,
            };

            let config = Config::load(&args)?;
            assert_eq!(config.auth.security.cors.allowed_origins.len(), 2);
            assert!(matches!(config.auth.security.cors.allowed_origins[1], CorsOrigin::Wildcard));

            Ok(())
        });
    }
}
