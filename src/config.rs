// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Runtime Configuration
//!
//! This module defines environment variable names and default values used
//! throughout the application. Configuration is loaded from the environment
//! at startup.
//!
//! The GraphQL endpoint and the `Secure` cookie flag are chosen by the build
//! environment, not at runtime: debug builds talk to a local backend over
//! plain HTTP, release builds talk to production.
//!
//! ## Environment Variables
//!
//! | Variable | Description | Default |
//! |----------|-------------|---------|
//! | `HOST` | Server bind address | `0.0.0.0` |
//! | `PORT` | Server bind port | `3000` |
//! | `PUBLIC_HOST` | Hostname used for cookie domain scopes when the request has no `Host` header | unset |
//! | `LOG_FORMAT` | Logging format (`json` or `pretty`) | `pretty` |
//! | `RUST_LOG` | Log level filter | `info,tower_http=debug` |
//! | `TANSCROW_API_URL` | Release-build GraphQL endpoint (read at compile time) | `https://tanscrow.onrender.com/graphql` |

use url::Url;

pub const HOST_ENV: &str = "HOST";
pub const PORT_ENV: &str = "PORT";
pub const PUBLIC_HOST_ENV: &str = "PUBLIC_HOST";
pub const LOG_FORMAT_ENV: &str = "LOG_FORMAT";

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_LOG_FILTER: &str = "info,tower_http=debug";

/// GraphQL endpoint used by debug builds.
pub const DEVELOPMENT_API_URL: &str = "http://localhost:5000/graphql";

/// GraphQL endpoint used by release builds unless overridden at compile time.
pub const PRODUCTION_API_URL: &str = "https://tanscrow.onrender.com/graphql";

/// Build environment the binary was compiled for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    /// The environment of the running build.
    pub const fn current() -> Self {
        if cfg!(debug_assertions) {
            Environment::Development
        } else {
            Environment::Production
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }

    /// GraphQL endpoint baked in for this environment.
    pub fn api_url(self) -> &'static str {
        match self {
            Environment::Development => DEVELOPMENT_API_URL,
            Environment::Production => option_env!("TANSCROW_API_URL").unwrap_or(PRODUCTION_API_URL),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid GraphQL endpoint {url}: {reason}")]
    InvalidApiUrl { url: String, reason: String },

    #[error("invalid {name} value: {value}")]
    InvalidValue { name: &'static str, value: String },
}

/// Resolved server configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub environment: Environment,
    pub api_url: Url,
    pub host: String,
    pub port: u16,
    pub public_host: Option<String>,
}

impl Config {
    /// Build the configuration for `environment` with default bind settings.
    pub fn for_environment(environment: Environment) -> Result<Self, ConfigError> {
        Ok(Self {
            environment,
            api_url: parse_api_url(environment.api_url())?,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            public_host: None,
        })
    }

    /// Load bind settings from the environment on top of the build defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::for_environment(Environment::current())?;

        if let Ok(host) = std::env::var(HOST_ENV) {
            config.host = host;
        }
        if let Ok(port) = std::env::var(PORT_ENV) {
            config.port = port.parse().map_err(|_| ConfigError::InvalidValue {
                name: PORT_ENV,
                value: port.clone(),
            })?;
        }
        config.public_host = std::env::var(PUBLIC_HOST_ENV)
            .ok()
            .filter(|h| !h.trim().is_empty());

        Ok(config)
    }

    /// Point the gateway at a different endpoint (used by tests and local tooling).
    pub fn with_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url(url)?;
        Ok(self)
    }

    /// Whether credential cookies carry the `Secure` attribute.
    pub fn secure_cookies(&self) -> bool {
        self.environment.is_production()
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidApiUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(ConfigError::InvalidApiUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme `{other}`"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn development_uses_local_endpoint_and_insecure_cookies() {
        let config = Config::for_environment(Environment::Development).unwrap();
        assert_eq!(config.api_url.as_str(), DEVELOPMENT_API_URL);
        assert!(!config.secure_cookies());
    }

    #[test]
    fn production_uses_secure_cookies() {
        let config = Config::for_environment(Environment::Production).unwrap();
        assert!(config.secure_cookies());
        assert_eq!(config.api_url.scheme(), "https");
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let result = Config::for_environment(Environment::Development)
            .unwrap()
            .with_api_url("ftp://example.com/graphql");
        assert!(matches!(result, Err(ConfigError::InvalidApiUrl { .. })));
    }

    #[test]
    fn bind_addr_joins_host_and_port() {
        let config = Config::for_environment(Environment::Development).unwrap();
        assert_eq!(config.bind_addr(), "0.0.0.0:3000");
    }
}
