//! RGBA color literals and canonical hex conversion.
//!
//! Host graphs store colors as floating point components in `0.0..=1.0`.
//! Token output always uses the canonical hex form:
//!
//! - `#rrggbb` when alpha is 1
//! - `#rrggbbaa` when alpha is below 1
//!
//! Each byte is `round(component * 255)` rendered as zero-padded lowercase hex.
//!
//! # Example
//!
//! ```rust
//! use varsmith_graph::Rgba;
//!
//! let opaque = Rgba::new(1.0, 0.5, 0.0, 1.0);
//! assert_eq!(opaque.to_hex(), "#ff8000");
//!
//! let translucent = Rgba::new(0.0, 0.0, 0.0, 0.5);
//! assert_eq!(translucent.to_hex(), "#00000080");
//!
//! let parsed = Rgba::from_hex("#ff8000").unwrap();
//! assert_eq!(parsed.to_hex(), "#ff8000");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

/// A color with floating point components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Alpha channel. Missing alpha means fully opaque.
    #[serde(default = "opaque")]
    pub a: f64,
}

fn opaque() -> f64 {
    1.0
}

impl Rgba {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque color from three components.
    pub fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self::new(r, g, b, 1.0)
    }

    /// Canonical hex form: alpha is appended only when it is below 1.
    pub fn to_hex(&self) -> String {
        let mut hex = format!(
            "#{}{}{}",
            hex_byte(self.r),
            hex_byte(self.g),
            hex_byte(self.b)
        );
        if self.a < 1.0 {
            hex.push_str(&hex_byte(self.a));
        }
        hex
    }

    /// Hex form that always carries the alpha byte (`#rrggbbaa`).
    ///
    /// Shadow summaries use this form regardless of opacity.
    pub fn to_hex_with_alpha(&self) -> String {
        format!(
            "#{}{}{}{}",
            hex_byte(self.r),
            hex_byte(self.g),
            hex_byte(self.b),
            hex_byte(self.a)
        )
    }

    /// Parses a hex color string.
    ///
    /// Accepts `#rgb`, `#rgba`, `#rrggbb` and `#rrggbbaa`. The leading `#`
    /// is optional.
    pub fn from_hex(input: &str) -> Result<Self, GraphError> {
        let trimmed = input.trim();
        let hex = trimmed.strip_prefix('#').unwrap_or(trimmed);
        let invalid = || GraphError::InvalidColor {
            value: input.to_string(),
        };

        if !hex.is_ascii() {
            return Err(invalid());
        }

        let bytes: Vec<u8> = match hex.len() {
            // Short forms: each digit is doubled (#f80 -> #ff8800)
            3 | 4 => hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| (d * 17) as u8))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(invalid)?,
            6 | 8 => (0..hex.len())
                .step_by(2)
                .map(|i| u8::from_str_radix(&hex[i..i + 2], 16).ok())
                .collect::<Option<Vec<_>>>()
                .ok_or_else(invalid)?,
            _ => return Err(invalid()),
        };

        let component = |i: usize| f64::from(bytes[i]) / 255.0;
        let alpha = if bytes.len() == 4 { component(3) } else { 1.0 };
        Ok(Self::new(component(0), component(1), component(2), alpha))
    }
}

/// Converts a `0.0..=1.0` component into a two-digit lowercase hex byte.
fn hex_byte(component: f64) -> String {
    let clamped = if component.is_nan() {
        0.0
    } else {
        component.clamp(0.0, 1.0)
    };
    format!("{:02x}", (clamped * 255.0).round() as u8)
}
