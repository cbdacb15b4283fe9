//! Export options.
//!
//! All options deserialize from a config file section with camelCase keys,
//! and every field has a default, so an empty section is valid.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What to do when an alias cannot be resolved (dangling target or cycle).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResolvePolicy {
    /// Skip the affected leaf or line and keep going.
    #[default]
    Lenient,
    /// Abort the export with [`TokenError::Unresolved`](crate::TokenError::Unresolved).
    Strict,
}

/// What to do when two variables produce the same canonical key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CollisionPolicy {
    /// The later variable overwrites the earlier one.
    #[default]
    LastWriteWins,
    /// Abort the export with [`TokenError::KeyCollision`](crate::TokenError::KeyCollision).
    Fail,
}

/// How mode-color variables are emitted in the stylesheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModeStrategy {
    /// One declaration per mode, named `<key>--<mode>`.
    #[default]
    Suffix,
    /// Only the first mode, without a suffix.
    First,
}

impl fmt::Display for ModeStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeStrategy::Suffix => write!(f, "suffix"),
            ModeStrategy::First => write!(f, "first"),
        }
    }
}

impl FromStr for ModeStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "suffix" => Ok(ModeStrategy::Suffix),
            "first" => Ok(ModeStrategy::First),
            other => Err(format!(
                "unknown mode strategy '{}' (expected 'suffix' or 'first')",
                other
            )),
        }
    }
}

/// Default comment written above stylesheet declarations.
pub const DEFAULT_STYLESHEET_HEADER: &str = "// Generated from design variables";

/// Options for the stylesheet emitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct StylesheetOptions {
    /// Emit `$name: $target;` for alias values instead of resolving them.
    pub preserve_aliases: bool,
    pub mode_strategy: ModeStrategy,
    /// Comment line written before the declarations. `None` disables it.
    pub header: Option<String>,
}

impl Default for StylesheetOptions {
    fn default() -> Self {
        Self {
            preserve_aliases: true,
            mode_strategy: ModeStrategy::Suffix,
            header: Some(DEFAULT_STYLESHEET_HEADER.to_string()),
        }
    }
}

/// Default font family used until a `font-family` variable overrides it.
pub const DEFAULT_FONT_FAMILY: &str = "Inter";

/// Options for a whole export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    pub policy: ResolvePolicy,
    pub collisions: CollisionPolicy,
    pub stylesheet: StylesheetOptions,
    /// Also export the flat `tokensByMode` map and `$collections` summary.
    pub include_tokens_by_mode: bool,
    pub default_font_family: String,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            policy: ResolvePolicy::default(),
            collisions: CollisionPolicy::default(),
            stylesheet: StylesheetOptions::default(),
            include_tokens_by_mode: false,
            default_font_family: DEFAULT_FONT_FAMILY.to_string(),
        }
    }
}
