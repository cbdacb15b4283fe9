//! Local text and effect styles.
//!
//! Styles are not variables, but they ride along in the same snapshot and
//! are summarized into typography and shadow tokens. Only the properties
//! needed for those summaries are modeled.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// Font family plus the style name (e.g. "Semi Bold Italic").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontName {
    pub family: String,
    pub style: String,
}

/// Line height of a text style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineHeight {
    Auto,
    Pixels { value: f64 },
    Percent { value: f64 },
}

impl Default for LineHeight {
    fn default() -> Self {
        LineHeight::Auto
    }
}

/// Letter spacing of a text style.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LetterSpacing {
    Pixels { value: f64 },
    Percent { value: f64 },
}

impl Default for LetterSpacing {
    fn default() -> Self {
        LetterSpacing::Pixels { value: 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub font_name: FontName,
    pub font_size: f64,
    #[serde(default)]
    pub line_height: LineHeight,
    #[serde(default)]
    pub letter_spacing: LetterSpacing,
}

/// Kind of a style effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectKind {
    DropShadow,
    InnerShadow,
    LayerBlur,
    BackgroundBlur,
}

impl EffectKind {
    pub fn is_shadow(self) -> bool {
        matches!(self, EffectKind::DropShadow | EffectKind::InnerShadow)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Offset {
    pub x: f64,
    pub y: f64,
}

/// A single effect. Blur effects carry no color or offset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: EffectKind,
    #[serde(default)]
    pub color: Option<Rgba>,
    #[serde(default)]
    pub offset: Option<Offset>,
    #[serde(default)]
    pub radius: f64,
    #[serde(default)]
    pub spread: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectStyle {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub effects: Vec<Effect>,
}
