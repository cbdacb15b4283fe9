//! Command-line interface.

use std::path::PathBuf;

use clap::Parser;
use varsmith_tokens::{CollisionPolicy, ModeStrategy, ResolvePolicy};

use crate::config::{Config, ConfigError, OutputFormat};

/// Export design variables as design tokens and SCSS
#[derive(Debug, Parser)]
#[command(name = "varsmith")]
#[command(version)]
#[command(about = "Export design variables as design tokens and SCSS")]
#[command(long_about = "Reads a design-variable graph snapshot (.json, .yaml or .yml) \
    and writes a design-token JSON document and an SCSS stylesheet.\n\n\
    Settings come from the config file, then command-line flags. \
    RUST_LOG overrides the log level.")]
pub struct Cli {
    /// Graph snapshot to export
    pub snapshot: PathBuf,

    /// YAML config file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory the artifacts are written to
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Which artifacts to write
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Fail on unresolvable aliases instead of skipping them
    #[arg(long)]
    pub strict: bool,

    /// Fail when two variables map to the same token key
    #[arg(long)]
    pub fail_on_collision: bool,

    /// Write resolved values instead of SCSS variable references
    #[arg(long)]
    pub no_preserve_aliases: bool,

    /// How multi-mode variables appear in the stylesheet (suffix or first)
    #[arg(long, value_name = "STRATEGY")]
    pub mode_strategy: Option<ModeStrategy>,

    /// Include per-mode token maps and collection summaries
    #[arg(long)]
    pub tokens_by_mode: bool,

    /// Maximum bytes per transport chunk
    #[arg(long, value_name = "BYTES")]
    pub chunk_size: Option<usize>,

    /// Log filter, e.g. `info` or `varsmith_tokens=debug`
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Loads the config file (if any), applies flag overrides and validates
    /// the result.
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        let mut config = Config::load(self.config.as_deref())?;
        self.apply(&mut config);
        config.validate()?;
        Ok(config)
    }

    /// Overrides config values with any flags that were given. Boolean
    /// flags only ever turn a setting on.
    pub fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.out_dir {
            config.output.directory = dir.clone();
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        if self.strict {
            config.export.policy = ResolvePolicy::Strict;
        }
        if self.fail_on_collision {
            config.export.collisions = CollisionPolicy::Fail;
        }
        if self.no_preserve_aliases {
            config.export.stylesheet.preserve_aliases = false;
        }
        if let Some(strategy) = self.mode_strategy {
            config.export.stylesheet.mode_strategy = strategy;
        }
        if self.tokens_by_mode {
            config.export.include_tokens_by_mode = true;
        }
        if let Some(size) = self.chunk_size {
            config.transport.chunk_size = size;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.log_json {
            config.logging.json = true;
        }
    }
}
