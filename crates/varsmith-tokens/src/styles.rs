//! Typography and shadow summaries of local styles.

use serde_json::{json, Value};
use varsmith_graph::{EffectKind, EffectStyle, LetterSpacing, LineHeight, Rgba, TextStyle};

use crate::normalize::kebab;
use crate::tree::{dimension_value, TokenGroup, TokenLeaf, TokenType};

/// Reference to the shared font family token.
pub const FONT_FAMILY_REF: &str = "{typography.font-family}";

/// Numeric font weight for a font style name such as "Semi Bold Italic".
///
/// Matching ignores case and spaces. Unknown styles are regular (400).
///
/// ```rust
/// use varsmith_tokens::weight_from_style;
///
/// assert_eq!(weight_from_style("Semi Bold"), 600);
/// assert_eq!(weight_from_style("ExtraBold Italic"), 800);
/// assert_eq!(weight_from_style("Italic"), 400);
/// ```
pub fn weight_from_style(style: &str) -> u16 {
    let s: String = style
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '-' && *c != '_')
        .collect::<String>()
        .to_lowercase();

    const TABLE: &[(&[&str], u16)] = &[
        (&["thin", "hairline"], 100),
        (&["extralight", "ultralight"], 200),
        (&["light"], 300),
        (&["medium"], 500),
        (&["semibold", "demibold"], 600),
        (&["extrabold", "ultrabold"], 800),
        (&["bold"], 700),
        (&["black", "heavy"], 900),
    ];

    TABLE
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| s.contains(k)))
        .map(|(_, weight)| *weight)
        .unwrap_or(400)
}

fn line_height_value(line_height: LineHeight) -> Value {
    match line_height {
        LineHeight::Auto => json!(1),
        LineHeight::Pixels { value } => dimension_value(value, "px"),
        LineHeight::Percent { value } => dimension_value(value, "%"),
    }
}

fn letter_spacing_value(letter_spacing: LetterSpacing) -> Value {
    match letter_spacing {
        LetterSpacing::Pixels { value } => dimension_value(value, "px"),
        LetterSpacing::Percent { value } => dimension_value(value, "%"),
    }
}

/// One `typography` token per text style, keyed by the kebab-cased style name.
pub fn build_type_styles(styles: &[TextStyle]) -> TokenGroup {
    styles
        .iter()
        .map(|style| {
            let value = json!({
                "fontFamily": FONT_FAMILY_REF,
                "fontWeight": weight_from_style(&style.font_name.style),
                "fontSize": dimension_value(style.font_size, "px"),
                "lineHeight": line_height_value(style.line_height),
                "letterSpacing": letter_spacing_value(style.letter_spacing),
            });
            (kebab(&style.name), TokenLeaf::new(TokenType::Typography, value))
        })
        .collect()
}

/// One `shadow` token per effect style that has drop or inner shadows.
///
/// Shadow colors always carry alpha (`#rrggbbaa`). Blur effects are not
/// summarized.
pub fn build_shadows(styles: &[EffectStyle]) -> TokenGroup {
    let mut out = TokenGroup::new();
    for style in styles {
        let layers: Vec<Value> = style
            .effects
            .iter()
            .filter(|effect| effect.kind.is_shadow())
            .map(|effect| {
                let color = effect
                    .color
                    .unwrap_or(Rgba::rgb(0.0, 0.0, 0.0))
                    .to_hex_with_alpha();
                let offset = effect.offset.unwrap_or_default();
                json!({
                    "color": color,
                    "offsetX": dimension_value(offset.x, "px"),
                    "offsetY": dimension_value(offset.y, "px"),
                    "blur": dimension_value(effect.radius, "px"),
                    "spread": dimension_value(effect.spread, "px"),
                    "inset": effect.kind == EffectKind::InnerShadow,
                })
            })
            .collect();

        if !layers.is_empty() {
            out.insert(
                kebab(&style.name),
                TokenLeaf::new(TokenType::Shadow, Value::Array(layers)),
            );
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use varsmith_graph::{Effect, FontName, Offset};

    #[test]
    fn test_weight_table() {
        let cases = [
            ("Thin", 100),
            ("Hairline", 100),
            ("Extra Light", 200),
            ("UltraLight", 200),
            ("Light Italic", 300),
            ("Regular", 400),
            ("Book", 400),
            ("Medium", 500),
            ("SemiBold", 600),
            ("Demi Bold", 600),
            ("Bold", 700),
            ("Extra Bold", 800),
            ("Ultra-Bold", 800),
            ("Black", 900),
            ("Heavy", 900),
            ("", 400),
        ];
        for (style, weight) in cases {
            assert_eq!(weight_from_style(style), weight, "{}", style);
        }
    }

    fn text_style(name: &str, style: &str) -> TextStyle {
        TextStyle {
            id: "s1".into(),
            name: name.into(),
            description: String::new(),
            font_name: FontName {
                family: "Inter".into(),
                style: style.into(),
            },
            font_size: 32.0,
            line_height: LineHeight::Pixels { value: 40.0 },
            letter_spacing: LetterSpacing::Percent { value: -2.0 },
        }
    }

    #[test]
    fn test_type_styles() {
        let group = build_type_styles(&[text_style("Heading XL", "Bold")]);
        let leaf = &group["heading-xl"];
        assert_eq!(leaf.token_type, TokenType::Typography);
        assert_eq!(
            leaf.value,
            json!({
                "fontFamily": "{typography.font-family}",
                "fontWeight": 700,
                "fontSize": {"value": 32, "unit": "px"},
                "lineHeight": {"value": 40, "unit": "px"},
                "letterSpacing": {"value": -2, "unit": "%"}
            })
        );
    }

    #[test]
    fn test_type_style_auto_line_height() {
        let mut style = text_style("Body", "Regular");
        style.line_height = LineHeight::Auto;
        let group = build_type_styles(&[style]);
        assert_eq!(group["body"].value["lineHeight"], json!(1));
    }

    #[test]
    fn test_shadows() {
        let style = EffectStyle {
            id: "e1".into(),
            name: "Elevation 1".into(),
            description: String::new(),
            effects: vec![
                Effect {
                    kind: EffectKind::DropShadow,
                    color: Some(Rgba::new(0.0, 0.0, 0.0, 0.25)),
                    offset: Some(Offset { x: 0.0, y: 2.0 }),
                    radius: 4.0,
                    spread: 0.0,
                },
                Effect {
                    kind: EffectKind::LayerBlur,
                    color: None,
                    offset: None,
                    radius: 8.0,
                    spread: 0.0,
                },
            ],
        };
        let group = build_shadows(&[style]);
        let leaf = &group["elevation-1"];
        assert_eq!(leaf.token_type, TokenType::Shadow);
        assert_eq!(
            leaf.value,
            json!([{
                "color": "#00000040",
                "offsetX": {"value": 0, "unit": "px"},
                "offsetY": {"value": 2, "unit": "px"},
                "blur": {"value": 4, "unit": "px"},
                "spread": {"value": 0, "unit": "px"},
                "inset": false
            }])
        );
    }

    #[test]
    fn test_blur_only_style_is_omitted() {
        let style = EffectStyle {
            id: "e2".into(),
            name: "Frosted".into(),
            description: String::new(),
            effects: vec![Effect {
                kind: EffectKind::BackgroundBlur,
                color: None,
                offset: None,
                radius: 12.0,
                spread: 0.0,
            }],
        };
        assert!(build_shadows(&[style]).is_empty());
    }
}
