//! Runtime configuration read from `ARQUEO_*` environment variables.

use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:arqueo.db";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8080";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_LOG_FILTER: &str = "info,arqueo_backend=debug";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} has an invalid value '{value}': {reason}")]
    Invalid {
        var: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone)]
pub struct BackendConfig {
    pub database_url: String,
    pub bind_addr: SocketAddr,
    pub cors_origin: HeaderValue,
    pub db_max_connections: u32,
    pub log_filter: String,
    /// Built frontend served for paths outside `/api`
    pub static_dir: Option<PathBuf>,
}

impl BackendConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the configuration from any variable source; unset or blank
    /// variables take their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |var: &str| lookup(var).filter(|value| !value.trim().is_empty());

        let bind_addr = get("ARQUEO_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_addr.trim().parse::<SocketAddr>().map_err(|e| ConfigError::Invalid {
            var: "ARQUEO_BIND_ADDR",
            value: bind_addr.clone(),
            reason: e.to_string(),
        })?;

        let cors_origin = get("ARQUEO_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        let cors_origin = HeaderValue::from_str(cors_origin.trim()).map_err(|e| ConfigError::Invalid {
            var: "ARQUEO_CORS_ORIGIN",
            value: cors_origin.clone(),
            reason: e.to_string(),
        })?;

        let db_max_connections = match get("ARQUEO_DB_MAX_CONNECTIONS") {
            None => DEFAULT_DB_MAX_CONNECTIONS,
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(count) if count > 0 => count,
                Ok(_) => {
                    return Err(ConfigError::Invalid {
                        var: "ARQUEO_DB_MAX_CONNECTIONS",
                        value: raw,
                        reason: "must be at least 1".to_string(),
                    })
                }
                Err(e) => {
                    return Err(ConfigError::Invalid {
                        var: "ARQUEO_DB_MAX_CONNECTIONS",
                        reason: e.to_string(),
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            database_url: get("ARQUEO_DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            bind_addr,
            cors_origin,
            db_max_connections,
            log_filter: get("ARQUEO_LOG").unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            static_dir: get("ARQUEO_STATIC_DIR").map(PathBuf::from),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<BackendConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BackendConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[]).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
        assert_eq!(config.bind_addr, "127.0.0.1:3000".parse::<SocketAddr>().unwrap());
        assert_eq!(config.cors_origin, "http://localhost:8080");
        assert_eq!(config.db_max_connections, 5);
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
        assert!(config.static_dir.is_none());
    }

    #[test]
    fn test_overrides() {
        let config = config(&[
            ("ARQUEO_DATABASE_URL", "sqlite:/var/lib/arqueo/data.db"),
            ("ARQUEO_BIND_ADDR", "0.0.0.0:8000"),
            ("ARQUEO_DB_MAX_CONNECTIONS", "12"),
            ("ARQUEO_STATIC_DIR", "frontend/dist"),
            ("ARQUEO_LOG", "  "),
        ])
        .unwrap();
        assert_eq!(config.database_url, "sqlite:/var/lib/arqueo/data.db");
        assert_eq!(config.bind_addr.port(), 8000);
        assert_eq!(config.db_max_connections, 12);
        assert_eq!(config.static_dir, Some(PathBuf::from("frontend/dist")));
        assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
    }

    #[test]
    fn test_invalid_values() {
        let err = config(&[("ARQUEO_BIND_ADDR", "localhost")]).unwrap_err();
        assert!(err.to_string().starts_with("ARQUEO_BIND_ADDR"));

        assert!(config(&[("ARQUEO_DB_MAX_CONNECTIONS", "0")]).is_err());
        assert!(config(&[("ARQUEO_DB_MAX_CONNECTIONS", "many")]).is_err());
        assert!(config(&[("ARQUEO_CORS_ORIGIN", "http://bad\norigin")]).is_err());
    }
}
