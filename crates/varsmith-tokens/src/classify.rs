//! Variable classification.
//!
//! Every variable falls into exactly one [`Category`], decided only by its
//! collection's name and its own name:
//!
//! | Rule                                                     | Category            |
//! |----------------------------------------------------------|---------------------|
//! | collection name contains "mode" and "color"              | `SemanticModeColor` |
//! | first segment `palette`                                  | `Palette`           |
//! | first segment `spacing`                                  | `Spacing`           |
//! | first segment `border radius`, or `border` then `radius` | `Radius`            |
//! | first segment `typography` or `font`                     | `Typography`        |
//! | anything else                                            | `Unclassified`      |
//!
//! Segment comparison ignores case and surrounding whitespace, and treats
//! runs of whitespace like hyphens.

use std::fmt;

use serde::Serialize;
use varsmith_graph::{Collection, Variable};

use crate::normalize::{fold, path_segments};

/// Output category of a variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Palette,
    SemanticModeColor,
    Spacing,
    Radius,
    Typography,
    Unclassified,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Palette => "palette",
            Category::SemanticModeColor => "mode-color",
            Category::Spacing => "spacing",
            Category::Radius => "radius",
            Category::Typography => "typography",
            Category::Unclassified => "unclassified",
        }
    }

    /// Prefix for stylesheet variable names.
    pub fn style_prefix(self) -> Option<&'static str> {
        match self {
            Category::Palette | Category::SemanticModeColor => Some("color"),
            Category::Spacing => Some("spacing"),
            Category::Radius => Some("radius"),
            Category::Typography | Category::Unclassified => None,
        }
    }

    /// Whether values of this category vary by mode in the output.
    pub fn is_mode_sensitive(self) -> bool {
        self == Category::SemanticModeColor
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a collection holds per-mode semantic colors.
pub fn is_mode_color_collection(collection_name: &str) -> bool {
    let lower = collection_name.to_lowercase();
    lower.contains("mode") && lower.contains("color")
}

/// Classifies a variable by its collection name and its own name.
///
/// ```rust
/// use varsmith_tokens::{classify, Category};
///
/// assert_eq!(classify("Mode Colors", "accent/base"), Category::SemanticModeColor);
/// assert_eq!(classify("Core", "palette/gray/100"), Category::Palette);
/// assert_eq!(classify("Core", "border radius/md"), Category::Radius);
/// assert_eq!(classify("Core", "shadow/sm"), Category::Unclassified);
/// ```
pub fn classify(collection_name: &str, variable_name: &str) -> Category {
    if is_mode_color_collection(collection_name) {
        return Category::SemanticModeColor;
    }

    let segments = path_segments(variable_name);
    let head = match segments.first() {
        Some(s) => fold(s),
        None => return Category::Unclassified,
    };

    match head.as_str() {
        "palette" => Category::Palette,
        "spacing" => Category::Spacing,
        "border-radius" => Category::Radius,
        "border" if segments.get(1).map(|s| fold(s)).as_deref() == Some("radius") => {
            Category::Radius
        }
        "typography" | "font" => Category::Typography,
        _ => Category::Unclassified,
    }
}

/// Classifies `variable` within `collection`. A variable whose collection is
/// unknown is classified by name alone.
pub fn classify_variable(collection: Option<&Collection>, variable: &Variable) -> Category {
    let collection_name = collection.map(|c| c.name.as_str()).unwrap_or("");
    classify(collection_name, &variable.name)
}
