//! Server Configuration
//!
//! Read once from the process environment at startup. Nothing below the
//! binary looks at environment variables.

use std::env;

use anyhow::{Context, bail};
use auth::AuthConfig;
use blog::BlogConfig;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000";

/// Process-level configuration
#[derive(Clone)]
pub struct ServerConfig {
    /// `None` selects the in-memory store
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub port: u16,
    pub access_token_secret: Option<String>,
    pub refresh_token_secret: Option<String>,
    pub password_pepper: Option<String>,
    pub frontend_origins: Vec<String>,
    pub enforce_resource_ownership: bool,
}

impl ServerConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .with_context(|| format!("PORT is not a valid port: {}", raw))?,
            None => DEFAULT_PORT,
        };

        let database_max_connections = match get("DATABASE_MAX_CONNECTIONS") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .with_context(|| format!("DATABASE_MAX_CONNECTIONS is not a number: {}", raw))?,
            None => DEFAULT_MAX_CONNECTIONS,
        };

        let enforce_resource_ownership = match get("ENFORCE_RESOURCE_OWNERSHIP") {
            Some(raw) => parse_bool(&raw)
                .with_context(|| format!("ENFORCE_RESOURCE_OWNERSHIP is not a boolean: {}", raw))?,
            None => false,
        };

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        Ok(Self {
            database_url: get("DATABASE_URL"),
            database_max_connections,
            port,
            access_token_secret: get("ACCESS_TOKEN_SECRET"),
            refresh_token_secret: get("REFRESH_TOKEN_SECRET"),
            password_pepper: get("PASSWORD_PEPPER"),
            frontend_origins,
            enforce_resource_ownership,
        })
    }

    /// Signing secrets and token lifetimes
    ///
    /// Without both secrets, debug builds fall back to random ones and
    /// release builds refuse to start.
    pub fn auth_config(&self) -> anyhow::Result<AuthConfig> {
        self.auth_config_for(cfg!(debug_assertions))
    }

    fn auth_config_for(&self, allow_random: bool) -> anyhow::Result<AuthConfig> {
        let config = match (&self.access_token_secret, &self.refresh_token_secret) {
            (Some(access), Some(refresh)) => {
                if access == refresh {
                    bail!("ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must differ");
                }
                AuthConfig::new(access.as_bytes(), refresh.as_bytes())
            }
            _ if allow_random => {
                tracing::warn!(
                    "Token secrets not configured, using random secrets; tokens will not survive a restart"
                );
                AuthConfig::with_random_secrets()
            }
            _ => bail!("ACCESS_TOKEN_SECRET and REFRESH_TOKEN_SECRET must be set"),
        };

        Ok(config.with_pepper(self.password_pepper.as_ref().map(|p| p.as_bytes().to_vec())))
    }

    pub fn blog_config(&self) -> BlogConfig {
        BlogConfig::new(self.enforce_resource_ownership)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.port, 3000);
        assert_eq!(config.database_max_connections, 5);
        assert!(config.database_url.is_none());
        assert_eq!(config.frontend_origins, vec!["http://localhost:3000"]);
        assert!(!config.enforce_resource_ownership);
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("PORT", "8080"),
            ("DATABASE_URL", "postgres://localhost/blog"),
            ("FRONTEND_ORIGINS", "http://a.test, http://b.test,"),
            ("ENFORCE_RESOURCE_OWNERSHIP", "true"),
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/blog"));
        assert_eq!(config.frontend_origins, vec!["http://a.test", "http://b.test"]);
        assert!(config.blog_config().enforce_ownership);
    }

    #[test]
    fn test_invalid_values() {
        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("ENFORCE_RESOURCE_OWNERSHIP", "maybe")]).is_err());
    }

    #[test]
    fn test_secrets_must_differ() {
        let config = config(&[
            ("ACCESS_TOKEN_SECRET", "same"),
            ("REFRESH_TOKEN_SECRET", "same"),
        ])
        .unwrap();
        assert!(config.auth_config_for(true).is_err());
    }

    #[test]
    fn test_missing_secrets() {
        let config = config(&[("ACCESS_TOKEN_SECRET", "only-one")]).unwrap();
        assert!(config.auth_config_for(false).is_err());
        assert!(config.auth_config_for(true).is_ok());
    }
}
