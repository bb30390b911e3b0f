//! Application settings loaded from environment variables.

use std::env;
use std::time::Duration;

use super::constants::{
    DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT, DEFAULT_STORE_TIMEOUT_MS,
    MAX_PAGE_SIZE,
};
use crate::domain::NameMatch;

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub server_host: String,
    pub server_port: u16,
    /// Largest page size the service passes down to the repository
    pub max_page_size: u64,
    /// How name filters compare against stored names
    pub name_match: NameMatch,
    /// Upper bound for a single repository call
    pub store_timeout: Duration,
    /// Populate reference benefits and sample employees when serving
    pub seed_on_startup: bool,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("max_page_size", &self.max_page_size)
            .field("name_match", &self.name_match)
            .field("store_timeout", &self.store_timeout)
            .field("seed_on_startup", &self.seed_on_startup)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            max_page_size: MAX_PAGE_SIZE,
            name_match: NameMatch::CaseInsensitive,
            store_timeout: Duration::from_millis(DEFAULT_STORE_TIMEOUT_MS),
            seed_on_startup: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Unset or unparsable variables fall back to the defaults in
    /// [`constants`](super::constants).
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let case_sensitive = env_flag("NAME_FILTER_CASE_SENSITIVE");

        Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            max_page_size: env::var("MAX_PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse::<u64>().ok())
                .filter(|size| *size > 0)
                .unwrap_or(MAX_PAGE_SIZE),
            name_match: if case_sensitive {
                NameMatch::CaseSensitive
            } else {
                NameMatch::CaseInsensitive
            },
            store_timeout: Duration::from_millis(
                env::var("STORE_TIMEOUT_MS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(DEFAULT_STORE_TIMEOUT_MS),
            ),
            seed_on_startup: env_flag("SEED_ON_STARTUP"),
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Read a boolean environment variable (`1`/`true`/`yes`, case-insensitive).
fn env_flag(name: &str) -> bool {
    env::var(name)
        .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_database_url() {
        let config = Config {
            database_url: "postgres://user:secret@db/employees".to_string(),
            ..Config::default()
        };

        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("[REDACTED]"));
    }

    #[test]
    fn test_default_filters_ignore_case() {
        assert_eq!(Config::default().name_match, NameMatch::CaseInsensitive);
    }

    #[test]
    fn test_server_addr() {
        let config = Config {
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            ..Config::default()
        };
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }
}
