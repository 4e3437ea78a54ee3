// ============================================================================
// Configuration
// ============================================================================
// Lue depuis les variables d'environnement, éventuellement depuis un
// fichier .env (dotenv) :
//
//   LAZYBANK_API_URL       URL de base de l'API   (http://localhost:8080/api)
//   LAZYBANK_LOG_DIR       dossier des logs       (<data dir>/lazybank/logs)
//   LAZYBANK_TIMEOUT_SECS  timeout HTTP (s)       (30)
//
// CONCEPT RUST : Injection de la source
// - from_lookup() prend une closure key -> Option<String>
// - from_env() la branche sur dotenv ; les tests sur un HashMap
// ============================================================================

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::api::DEFAULT_TIMEOUT;

pub const API_URL_VAR: &str = "LAZYBANK_API_URL";
pub const LOG_DIR_VAR: &str = "LAZYBANK_LOG_DIR";
pub const TIMEOUT_VAR: &str = "LAZYBANK_TIMEOUT_SECS";

pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive number of seconds, got `{value}`")]
    InvalidTimeout { var: &'static str, value: String },

    #[error("{0} must not be empty")]
    Empty(&'static str),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base_url: String,
    pub log_dir: PathBuf,
    pub request_timeout: Duration,
}

impl Config {
    /// Lit la configuration depuis l'environnement (+ .env s'il existe)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| dotenv::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_base_url = match lookup(API_URL_VAR) {
            Some(url) if url.trim().is_empty() => return Err(ConfigError::Empty(API_URL_VAR)),
            Some(url) => url.trim().to_string(),
            None => DEFAULT_API_URL.to_string(),
        };

        let log_dir = lookup(LOG_DIR_VAR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);

        let request_timeout = match lookup(TIMEOUT_VAR) {
            Some(value) => parse_timeout(&value)?,
            None => DEFAULT_TIMEOUT,
        };

        Ok(Self {
            api_base_url,
            log_dir,
            request_timeout,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_string(),
            log_dir: default_log_dir(),
            request_timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn parse_timeout(value: &str) -> Result<Duration, ConfigError> {
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        _ => Err(ConfigError::InvalidTimeout {
            var: TIMEOUT_VAR,
            value: value.to_string(),
        }),
    }
}

/// Dossier de logs par défaut
///
/// - Linux : ~/.local/share/lazybank/logs
/// - macOS : ~/Library/Application Support/lazybank/logs
/// - Windows : C:\Users\<user>\AppData\Local\lazybank\logs
/// - Sans dossier de données connu : ./logs
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("lazybank").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8080/api");
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.log_dir, default_log_dir());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            (API_URL_VAR, " https://bank.example.com/api "),
            (LOG_DIR_VAR, "/tmp/lazybank"),
            (TIMEOUT_VAR, "5"),
        ])
        .unwrap();

        assert_eq!(config.api_base_url, "https://bank.example.com/api");
        assert_eq!(config.log_dir, PathBuf::from("/tmp/lazybank"));
        assert_eq!(config.request_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values() {
        assert_eq!(
            config_from(&[(TIMEOUT_VAR, "0")]),
            Err(ConfigError::InvalidTimeout { var: TIMEOUT_VAR, value: "0".to_string() })
        );
        assert!(config_from(&[(TIMEOUT_VAR, "soon")]).is_err());
        assert_eq!(config_from(&[(API_URL_VAR, "  ")]), Err(ConfigError::Empty(API_URL_VAR)));
    }
}
