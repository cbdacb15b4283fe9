//! Configuration file support.
//!
//! The config file is YAML. Every section and field is optional:
//!
//! ```yaml
//! export:
//!   policy: lenient            # or strict
//!   collisions: last-write-wins  # or fail
//!   includeTokensByMode: false
//!   stylesheet:
//!     preserveAliases: true
//!     modeStrategy: suffix     # or first
//! transport:
//!   chunkSize: 1048576
//! output:
//!   directory: dist/tokens
//!   format: both               # json, scss or both
//!   tokensFile: tokens.json
//!   stylesheetFile: variables.scss
//! logging:
//!   level: warn
//!   json: false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use varsmith_tokens::ExportOptions;
use varsmith_transport::{is_plain_filename, DEFAULT_CHUNK_SIZE};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Which artifacts to write.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    Json,
    Scss,
    #[default]
    Both,
}

impl OutputFormat {
    pub fn includes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    pub fn includes_scss(self) -> bool {
        matches!(self, OutputFormat::Scss | OutputFormat::Both)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TransportConfig {
    /// Maximum bytes per chunk message.
    pub chunk_size: usize,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OutputConfig {
    pub directory: PathBuf,
    pub format: OutputFormat,
    pub tokens_file: String,
    pub stylesheet_file: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            format: OutputFormat::Both,
            tokens_file: "tokens.json".to_string(),
            stylesheet_file: "variables.scss".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive used when `RUST_LOG` is unset, e.g. `warn` or
    /// `varsmith_tokens=debug`.
    pub level: String,
    /// Emit JSON lines instead of human-readable logs.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            json: false,
        }
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub export: ExportOptions,
    pub transport: TransportConfig,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Parses YAML config content. `origin` is used in error messages.
    pub fn from_yaml(yaml: &str, origin: &Path) -> Result<Self, ConfigError> {
        // An empty file is a valid, all-default config
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content, path)
    }

    /// Loads `path` if given, otherwise the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Checks values that parse but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.transport.chunk_size == 0 {
            return Err(ConfigError::Invalid(
                "transport.chunkSize must be greater than zero".into(),
            ));
        }
        if self.output.format.includes_json() {
            check_filename("output.tokensFile", &self.output.tokens_file)?;
        }
        if self.output.format.includes_scss() {
            check_filename("output.stylesheetFile", &self.output.stylesheet_file)?;
        }
        Ok(())
    }
}

/// Artifact names are written inside the output directory and may not
/// carry directory components of their own.
fn check_filename(field: &str, name: &str) -> Result<(), ConfigError> {
    if name.trim().is_empty() {
        return Err(ConfigError::Invalid(format!("{} is empty", field)));
    }
    if !is_plain_filename(name) {
        return Err(ConfigError::Invalid(format!(
            "{} must be a plain file name, got '{}'",
            field, name
        )));
    }
    Ok(())
}
