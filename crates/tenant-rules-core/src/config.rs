//! Configuration types for tenant-rules.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::schema::DEFAULT_DIRECTIVE;

/// Top-level configuration, read from `tenant-rules.toml`.
///
/// `[[extra-rules]]` tables live in the same file but are loaded separately
/// by [`crate::extra_rules::load_rules_from_toml`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Rules document settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Schema input settings.
    #[serde(default)]
    pub schema: SchemaConfig,
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is invalid.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            message: e.to_string(),
        })
    }
}

/// Envelope of the generated rules document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Service name after the `service` keyword.
    #[serde(default = "default_service")]
    pub service: String,

    /// Value of the `rules_version` line; `None` or an empty string omits it.
    #[serde(default = "default_rules_version")]
    pub rules_version: Option<String>,

    /// Root match path wrapping every rule block.
    #[serde(default = "default_root")]
    pub root: String,

    /// File the CLI writes to when `--output` is not given.
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            service: default_service(),
            rules_version: default_rules_version(),
            root: default_root(),
            file: None,
        }
    }
}

fn default_service() -> String {
    "cloud.firestore".to_string()
}

#[allow(clippy::unnecessary_wraps)] // serde default for an Option field
fn default_rules_version() -> Option<String> {
    Some("2".to_string())
}

fn default_root() -> String {
    "/databases/{database}/documents".to_string()
}

/// Schema input settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SchemaConfig {
    /// Directive marking collection types.
    #[serde(default = "default_directive")]
    pub directive: String,

    /// Schema file the CLI reads when no path is given.
    #[serde(default = "default_schema_path")]
    pub path: PathBuf,
}

impl Default for SchemaConfig {
    fn default() -> Self {
        Self {
            directive: default_directive(),
            path: default_schema_path(),
        }
    }
}

fn default_directive() -> String {
    DEFAULT_DIRECTIVE.to_string()
}

fn default_schema_path() -> PathBuf {
    PathBuf::from("schema.graphql")
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Parse error in config file.
    #[error("Failed to parse config: {message}")]
    Parse {
        /// Parse error message.
        message: String,
    },
}
