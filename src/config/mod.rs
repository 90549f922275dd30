#[cfg(feature = "cli")]
pub mod cli;
pub mod input;
pub mod toml_config;

use crate::utils::error::Result;
use crate::utils::validation::{
    validate_non_empty_string, validate_range, validate_url, Validate,
};
use std::time::Duration;
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

pub const DEFAULT_API: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const API_ENV: &str = "MJML_MAILER_API";
pub const TOKEN_ENV: &str = "MJML_MAILER_TOKEN";

/// Values given explicitly for this invocation, usually from flags.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub api: Option<String>,
    pub token: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub domain: Option<String>,
    pub locale: Option<String>,
    pub sender: Option<String>,
}

/// Effective settings after layering flags, environment, config file and
/// built-in defaults, in that order.
#[derive(Clone)]
pub struct Settings {
    pub api: String,
    pub token: Option<String>,
    pub timeout_seconds: u64,
    pub domain: String,
    pub locale: Option<String>,
    pub sender: Option<String>,
}

impl Settings {
    pub fn resolve(overrides: &Overrides, file: Option<&TomlConfig>) -> Self {
        Self::resolve_with_env(overrides, file, |key| std::env::var(key).ok())
    }

    pub fn resolve_with_env<F>(overrides: &Overrides, file: Option<&TomlConfig>, env: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = file.cloned().unwrap_or_default();

        Self {
            api: overrides
                .api
                .clone()
                .or_else(|| env(API_ENV))
                .or(file.server.api)
                .unwrap_or_else(|| DEFAULT_API.to_string()),
            token: overrides
                .token
                .clone()
                .or_else(|| env(TOKEN_ENV))
                .or(file.auth.token),
            timeout_seconds: overrides
                .timeout_seconds
                .or(file.server.timeout_seconds)
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
            domain: overrides
                .domain
                .clone()
                .or(file.defaults.domain)
                .unwrap_or_default(),
            locale: overrides.locale.clone().or(file.defaults.locale),
            sender: overrides.sender.clone().or(file.defaults.sender),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("api", &self.api)
            .field("token", &self.token.as_ref().map(|_| "***"))
            .field("timeout_seconds", &self.timeout_seconds)
            .field("domain", &self.domain)
            .field("locale", &self.locale)
            .field("sender", &self.sender)
            .finish()
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_url("api", &self.api)?;
        validate_range("timeout", self.timeout_seconds, 1, 600)?;
        if let Some(token) = &self.token {
            validate_non_empty_string("token", token)?;
        }
        Ok(())
    }
}
