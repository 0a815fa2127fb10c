//! Environment-driven portal configuration.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use intranet_auth::{AccessPolicy, MenuConfigError, MenuTable};

pub const AUTH_LATENCY_ENV: &str = "INTRANET_AUTH_LATENCY_MS";
pub const MENU_PATH_ENV: &str = "INTRANET_MENU_PATH";

const DEFAULT_AUTH_LATENCY: Duration = Duration::from_millis(1000);

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read menu file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Menu(#[from] MenuConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalConfig {
    /// Delay applied to every login attempt.
    pub auth_latency: Duration,
    /// JSON menu table; the built-in table is used when unset.
    pub menu_path: Option<PathBuf>,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            auth_latency: DEFAULT_AUTH_LATENCY,
            menu_path: None,
        }
    }
}

impl PortalConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let auth_latency = match lookup(AUTH_LATENCY_ENV) {
            None => DEFAULT_AUTH_LATENCY,
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => Duration::from_millis(ms),
                Err(_) => {
                    tracing::warn!(
                        value = %raw,
                        default_ms = DEFAULT_AUTH_LATENCY.as_millis() as u64,
                        "{AUTH_LATENCY_ENV} is not a whole number of milliseconds; using default"
                    );
                    DEFAULT_AUTH_LATENCY
                }
            },
        };

        let menu_path = lookup(MENU_PATH_ENV)
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Self {
            auth_latency,
            menu_path,
        }
    }

    /// Build the access policy, loading the menu file if one is configured.
    ///
    /// A configured but unreadable or invalid file is an error; it never falls
    /// back to the built-in table.
    pub fn load_policy(&self) -> Result<AccessPolicy, ConfigError> {
        let Some(path) = &self.menu_path else {
            tracing::debug!("no menu file configured; using built-in menu");
            return Ok(AccessPolicy::standard());
        };

        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let menu = MenuTable::from_json(&json)?;
        tracing::info!(path = %path.display(), views = menu.len(), "menu loaded");
        Ok(AccessPolicy::new(menu))
    }
}
