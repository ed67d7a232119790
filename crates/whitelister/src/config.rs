//! Runtime configuration.
//!
//! Sources, later ones overriding earlier ones:
//! 1. Built-in defaults
//! 2. `whitelister.toml` in the working directory (optional)
//! 3. An explicit file passed with `--config`
//! 4. `WHITELISTER_*` environment variables
//!
//! The bot token is not part of this struct; see [`BotToken`].

use config::{Config, Environment, File};
use derive_getters::Getters;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};
use whitelister_error::ConfigError;

/// Base name of the optional configuration file in the working directory.
pub const CONFIG_FILE_NAME: &str = "whitelister";

/// Prefix for configuration environment variables.
pub const ENV_PREFIX: &str = "WHITELISTER";

/// Settings for a bot process.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Getters)]
pub struct WhitelisterConfig {
    /// SQLite database path.
    database_url: String,
    /// Append-only audit log file.
    audit_log_path: PathBuf,
    /// Directory `>data` exports are staged in.
    export_dir: PathBuf,
    /// Default log filter when `RUST_LOG` is unset.
    log_level: String,
    /// Emit logs as JSON.
    json_logs: bool,
}

impl WhitelisterConfig {
    /// Load configuration from the standard sources.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit file is missing or any source fails
    /// to parse.
    #[instrument]
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(explicit, None)
    }

    /// Load configuration, reading environment overrides from `env` instead
    /// of the process environment when given.
    pub fn load_with(
        explicit: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("database_url", "data.db")
            .and_then(|b| b.set_default("audit_log_path", "log.txt"))
            .and_then(|b| b.set_default("export_dir", "."))
            .and_then(|b| b.set_default("log_level", "info"))
            .and_then(|b| b.set_default("json_logs", false))
            .map_err(|e| ConfigError::new(format!("Invalid default configuration: {}", e)))?
            .add_source(File::with_name(CONFIG_FILE_NAME).required(false));

        if let Some(path) = explicit {
            debug!(path = %path.display(), "Adding explicit configuration file");
            builder = builder.add_source(File::from(path));
        }

        builder = builder.add_source(
            Environment::with_prefix(ENV_PREFIX)
                .try_parsing(true)
                .source(env),
        );

        builder
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build configuration: {}", e)))?
            .try_deserialize()
            .map_err(|e| ConfigError::new(format!("Failed to parse configuration: {}", e)))
    }
}

/// Discord bot token.
///
/// `Debug` and `Display` never show the value.
#[derive(Clone, PartialEq, Eq)]
pub struct BotToken(String);

impl BotToken {
    /// Read the token from `DISCORD_TOKEN`, falling back to `ACCESS_TOKEN`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::resolve(
            std::env::var("DISCORD_TOKEN").ok(),
            std::env::var("ACCESS_TOKEN").ok(),
        )
    }

    /// Pick the first non-empty candidate.
    pub fn resolve(
        discord_token: Option<String>,
        access_token: Option<String>,
    ) -> Result<Self, ConfigError> {
        [discord_token, access_token]
            .into_iter()
            .flatten()
            .map(|token| token.trim().to_string())
            .find(|token| !token.is_empty())
            .map(Self)
            .ok_or_else(|| ConfigError::new("Missing DISCORD_TOKEN (or ACCESS_TOKEN)"))
    }

    /// The raw token.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BotToken(***)")
    }
}

impl fmt::Display for BotToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}
