//! Runtime settings loaded from environment variables

use super::credentials::{parse_token, SecretString};
use crate::error::{OdinError, Result};
use candid::Principal;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.odin.fun/v1";
pub const DEFAULT_IC_HOST: &str = "https://ic0.app";
pub const DEFAULT_CANISTER_ID: &str = "z2vm5-gaaaa-aaaaj-azw6q-cai";
pub const DEFAULT_LOG_DIR: &str = "./logs";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 10;

/// Provider configuration
///
/// | Variable | Default |
/// |---|---|
/// | `ODIN_API_BASE_URL` | `https://api.odin.fun/v1` |
/// | `ODIN_API_TOKEN` | unset |
/// | `ODIN_HTTP_TIMEOUT_SECS` | `10` |
/// | `ODIN_IC_HOST` | `https://ic0.app` |
/// | `ODIN_CANISTER_ID` | `z2vm5-gaaaa-aaaaj-azw6q-cai` |
/// | `ODIN_IDENTITY_PEM` | unset (anonymous) |
/// | `ODIN_LOG_DIR` | `./logs` |
#[derive(Debug, Clone)]
pub struct OdinConfig {
    pub api_base_url: String,
    pub api_token: Option<SecretString>,
    pub http_timeout: Duration,
    pub canister: CanisterConfig,
    pub log_dir: PathBuf,
}

/// Internet Computer connection settings
#[derive(Debug, Clone)]
pub struct CanisterConfig {
    pub ic_host: String,
    pub canister_id: Principal,
    pub identity_pem: Option<PathBuf>,
}

impl OdinConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_base_url = get("ODIN_API_BASE_URL")
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs = match get("ODIN_HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse::<u64>().ok().filter(|s| *s > 0).ok_or_else(|| {
                OdinError::Config(format!(
                    "ODIN_HTTP_TIMEOUT_SECS must be a positive integer, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };

        let canister_text =
            get("ODIN_CANISTER_ID").unwrap_or_else(|| DEFAULT_CANISTER_ID.to_string());
        let canister_id = Principal::from_text(&canister_text).map_err(|e| {
            OdinError::Config(format!("Invalid ODIN_CANISTER_ID '{}': {}", canister_text, e))
        })?;

        Ok(Self {
            api_base_url,
            api_token: parse_token(lookup("ODIN_API_TOKEN")),
            http_timeout: Duration::from_secs(timeout_secs),
            canister: CanisterConfig {
                ic_host: get("ODIN_IC_HOST").unwrap_or_else(|| DEFAULT_IC_HOST.to_string()),
                canister_id,
                identity_pem: get("ODIN_IDENTITY_PEM").map(PathBuf::from),
            },
            log_dir: get("ODIN_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_DIR)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = OdinConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert!(config.api_token.is_none());
        assert_eq!(config.http_timeout, Duration::from_secs(10));
        assert_eq!(config.canister.ic_host, DEFAULT_IC_HOST);
        assert_eq!(config.canister.canister_id.to_text(), DEFAULT_CANISTER_ID);
        assert!(config.canister.identity_pem.is_none());
        assert_eq!(config.log_dir, PathBuf::from("./logs"));
    }

    #[test]
    fn test_overrides() {
        let config = OdinConfig::from_lookup(lookup(&[
            ("ODIN_API_BASE_URL", "http://127.0.0.1:9000/v1/"),
            ("ODIN_API_TOKEN", " secret-token-value "),
            ("ODIN_HTTP_TIMEOUT_SECS", "3"),
            ("ODIN_IDENTITY_PEM", "/tmp/id.pem"),
            ("ODIN_LOG_DIR", "/var/log/odin"),
        ]))
        .unwrap();

        assert_eq!(config.api_base_url, "http://127.0.0.1:9000/v1");
        assert_eq!(
            config.api_token.as_ref().map(|t| t.expose_secret()),
            Some("secret-token-value")
        );
        assert_eq!(config.http_timeout, Duration::from_secs(3));
        assert_eq!(config.canister.identity_pem, Some(PathBuf::from("/tmp/id.pem")));
        assert_eq!(config.log_dir, PathBuf::from("/var/log/odin"));
    }

    #[test]
    fn test_invalid_timeout_is_config_error() {
        for bad in ["abc", "0", "-1"] {
            let err = OdinConfig::from_lookup(lookup(&[("ODIN_HTTP_TIMEOUT_SECS", bad)]))
                .unwrap_err();
            assert!(matches!(err, OdinError::Config(_)), "{}", bad);
        }
    }

    #[test]
    fn test_invalid_canister_id_is_config_error() {
        let err = OdinConfig::from_lookup(lookup(&[("ODIN_CANISTER_ID", "not-a-principal")]))
            .unwrap_err();
        assert!(matches!(err, OdinError::Config(_)));
    }
}
