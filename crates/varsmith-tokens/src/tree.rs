//! Token tree building.
//!
//! The tree groups classified variables by category, resolved at their
//! collection's first mode:
//!
//! ```json
//! {
//!   "core": {
//!     "color": { "palette": { "gray.100": { "$type": "color", "$value": "#f2f2f2" } } },
//!     "radius": { "md": { "$type": "dimension", "$value": { "value": 8, "unit": "px" } } },
//!     "spacing": { ... },
//!     "typography": { "font-family": { ... }, "font-size": { ... }, ... }
//!   },
//!   "modeColors": { "color": { "accent.base": { "$type": "color", "$value": "#ffffff" } } },
//!   "$themes": [
//!     { "id": "dark", "name": "Dark",
//!       "overrides": { "modeColors": { "color": { "accent.base": { "$value": "#000000" } } } } }
//!   ]
//! }
//! ```
//!
//! Every map is ordered, so building twice from the same graph serializes
//! to identical bytes.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use serde_json::{json, Value};
use tracing::debug;
use varsmith_graph::{Collection, SourceGraph, Variable, VariableType};

use crate::classify::{classify_variable, is_mode_color_collection, Category};
use crate::error::TokenError;
use crate::normalize::{kebab, normalize, KeyLedger};
use crate::options::ExportOptions;
use crate::resolve::ResolutionContext;
use crate::value::{json_number, ResolvedValue};

/// The `$type` of a token leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TokenType {
    Color,
    Dimension,
    Number,
    String,
    Boolean,
    FontFamily,
    Typography,
    Shadow,
}

impl From<VariableType> for TokenType {
    fn from(t: VariableType) -> Self {
        match t {
            VariableType::Color => TokenType::Color,
            VariableType::Number => TokenType::Number,
            VariableType::String => TokenType::String,
            VariableType::Boolean => TokenType::Boolean,
        }
    }
}

/// A single token: `{"$type": ..., "$value": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenLeaf {
    #[serde(rename = "$type")]
    pub token_type: TokenType,
    #[serde(rename = "$value")]
    pub value: Value,
}

impl TokenLeaf {
    pub fn new(token_type: TokenType, value: Value) -> Self {
        Self { token_type, value }
    }

    pub fn color(value: &ResolvedValue) -> Self {
        Self::new(TokenType::Color, value.to_json())
    }

    /// A pixel dimension, `{"value": n, "unit": "px"}`.
    pub fn dimension(n: f64) -> Self {
        Self::new(TokenType::Dimension, dimension_value(n, "px"))
    }

    pub fn number(n: f64) -> Self {
        Self::new(TokenType::Number, json_number(n))
    }

    pub fn font_family(family: impl Into<String>) -> Self {
        Self::new(TokenType::FontFamily, Value::String(family.into()))
    }
}

/// `{"value": n, "unit": unit}` with `n` coerced to a finite number.
pub fn dimension_value(n: f64, unit: &str) -> Value {
    json!({ "value": json_number(n), "unit": unit })
}

/// Flat map of dotted keys to leaves.
pub type TokenGroup = BTreeMap<String, TokenLeaf>;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PaletteGroup {
    pub palette: TokenGroup,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypographyTokens {
    #[serde(rename = "font-family")]
    pub font_family: TokenLeaf,
    #[serde(rename = "font-size")]
    pub font_size: TokenGroup,
    #[serde(rename = "line-height")]
    pub line_height: TokenGroup,
    #[serde(rename = "letter-spacing")]
    pub letter_spacing: TokenGroup,
    #[serde(rename = "font-weight")]
    pub font_weight: TokenGroup,
    /// Whether a variable replaced the default family.
    #[serde(skip)]
    pub family_from_variable: bool,
}

impl TypographyTokens {
    fn new(default_family: &str) -> Self {
        Self {
            font_family: TokenLeaf::font_family(default_family),
            font_size: TokenGroup::new(),
            line_height: TokenGroup::new(),
            letter_spacing: TokenGroup::new(),
            font_weight: TokenGroup::new(),
            family_from_variable: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoreTokens {
    pub color: PaletteGroup,
    pub radius: TokenGroup,
    pub spacing: TokenGroup,
    pub typography: TypographyTokens,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ModeColorTokens {
    pub color: TokenGroup,
}

/// Override value for one mode-color key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThemeValue {
    #[serde(rename = "$value")]
    pub value: Value,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThemeColors {
    pub color: BTreeMap<String, ThemeValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThemeOverrides {
    #[serde(rename = "modeColors")]
    pub mode_colors: ThemeColors,
}

/// Per-mode overrides applied on top of the baseline `modeColors`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Theme {
    pub id: String,
    pub name: String,
    pub overrides: ThemeOverrides,
}

impl Theme {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: kebab(&name),
            name,
            overrides: ThemeOverrides::default(),
        }
    }
}

/// The complete token tree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenTree {
    pub core: CoreTokens,
    #[serde(rename = "modeColors")]
    pub mode_colors: ModeColorTokens,
    #[serde(rename = "$themes")]
    pub themes: Vec<Theme>,
}

impl TokenTree {
    /// An empty tree whose font family is `default_family`.
    pub fn new(default_family: &str) -> Self {
        Self {
            core: CoreTokens {
                color: PaletteGroup::default(),
                radius: TokenGroup::new(),
                spacing: TokenGroup::new(),
                typography: TypographyTokens::new(default_family),
            },
            mode_colors: ModeColorTokens::default(),
            themes: Vec::new(),
        }
    }

    /// Number of leaves produced from variables. The default font family
    /// and theme overrides (per-mode copies of `modeColors`) are not counted.
    pub fn leaf_count(&self) -> usize {
        let typography = &self.core.typography;
        usize::from(typography.family_from_variable)
            + self.core.color.palette.len()
            + self.core.radius.len()
            + self.core.spacing.len()
            + typography.font_size.len()
            + typography.line_height.len()
            + typography.letter_spacing.len()
            + typography.font_weight.len()
            + self.mode_colors.color.len()
    }
}

/// Typography facets that produce tree leaves.
const TYPOGRAPHY_FACETS: [&str; 5] = [
    "font-family",
    "font-size",
    "line-height",
    "letter-spacing",
    "font-weight",
];

async fn resolve_leaf<G>(
    graph: &G,
    ctx: &mut ResolutionContext,
    variable: &Variable,
    mode_id: &str,
) -> Result<Option<ResolvedValue>, TokenError>
where
    G: SourceGraph + ?Sized,
{
    let resolution = ctx.resolve_variable(graph, variable, mode_id).await?;
    ctx.accept(resolution, &variable.name, mode_id)
}

fn requires(variable: &Variable, expected: VariableType, category: Category) -> bool {
    if variable.resolved_type == expected {
        return true;
    }
    debug!(
        variable = %variable.name,
        %category,
        expected = expected.as_str(),
        actual = variable.resolved_type.as_str(),
        "skipping variable with unexpected type"
    );
    false
}

/// Builds the token tree from `variables`.
///
/// Unclassified variables and variables of the wrong type for their category
/// are skipped. Missing references are handled by `ctx`'s policy, and key
/// collisions by `options.collisions`.
pub async fn build_tree<G>(
    graph: &G,
    collections: &[Collection],
    variables: &[Variable],
    ctx: &mut ResolutionContext,
    options: &ExportOptions,
) -> Result<TokenTree, TokenError>
where
    G: SourceGraph + ?Sized,
{
    let by_id: HashMap<&str, &Collection> =
        collections.iter().map(|c| (c.id.as_str(), c)).collect();
    let mut tree = TokenTree::new(&options.default_font_family);
    let mut ledger = KeyLedger::new(options.collisions);

    for variable in variables {
        let collection = by_id.get(variable.collection_id.as_str()).copied();
        let category = classify_variable(collection, variable);
        if category == Category::Unclassified {
            debug!(variable = %variable.name, "skipping unclassified variable");
            continue;
        }

        let key = normalize(category, &variable.name);
        if key.is_empty() {
            debug!(variable = %variable.id, "skipping variable with empty name");
            continue;
        }
        let mode_id = collection.map(Collection::first_mode_id).unwrap_or("");

        match category {
            Category::Palette | Category::SemanticModeColor => {
                if !requires(variable, VariableType::Color, category) {
                    continue;
                }
                let Some(value) = resolve_leaf(graph, ctx, variable, mode_id).await? else {
                    continue;
                };
                ledger.claim(category, &key.tree_key, &variable.id)?;
                let group = if category == Category::Palette {
                    &mut tree.core.color.palette
                } else {
                    &mut tree.mode_colors.color
                };
                group.insert(key.tree_key, TokenLeaf::color(&value));
            }
            Category::Spacing | Category::Radius => {
                if !requires(variable, VariableType::Number, category) {
                    continue;
                }
                let Some(value) = resolve_leaf(graph, ctx, variable, mode_id).await? else {
                    continue;
                };
                ledger.claim(category, &key.tree_key, &variable.id)?;
                let group = if category == Category::Spacing {
                    &mut tree.core.spacing
                } else {
                    &mut tree.core.radius
                };
                group.insert(key.tree_key, TokenLeaf::dimension(value.as_number()));
            }
            Category::Typography => {
                let facet = key.segments[0].as_str();
                let leaf_key = if key.segments.len() > 1 {
                    key.segments[1..].join(".")
                } else {
                    "value".to_string()
                };

                if !TYPOGRAPHY_FACETS.contains(&facet) {
                    debug!(variable = %variable.name, facet, "ignoring typography facet");
                    continue;
                }
                let Some(value) = resolve_leaf(graph, ctx, variable, mode_id).await? else {
                    continue;
                };

                let typography = &mut tree.core.typography;
                if facet == "font-family" {
                    match value {
                        ResolvedValue::String(family) => {
                            ledger.claim(category, "font-family", &variable.id)?;
                            typography.font_family = TokenLeaf::font_family(family);
                            typography.family_from_variable = true;
                        }
                        _ => debug!(variable = %variable.name, "font family is not a string"),
                    }
                    continue;
                }

                ledger.claim(category, &key.tree_key, &variable.id)?;
                let number = value.as_number();
                let (group, leaf) = match facet {
                    "font-size" => (&mut typography.font_size, TokenLeaf::dimension(number)),
                    "line-height" => (&mut typography.line_height, TokenLeaf::dimension(number)),
                    "letter-spacing" => {
                        (&mut typography.letter_spacing, TokenLeaf::dimension(number))
                    }
                    _ => (&mut typography.font_weight, TokenLeaf::number(number)),
                };
                group.insert(leaf_key, leaf);
            }
            Category::Unclassified => {}
        }
    }

    tree.themes = build_themes(graph, collections, variables, &by_id, ctx).await?;
    Ok(tree)
}

/// One theme per mode name of the mode-color collections, in first-seen
/// order, carrying every mode-color variable's value for that mode.
async fn build_themes<G>(
    graph: &G,
    collections: &[Collection],
    variables: &[Variable],
    by_id: &HashMap<&str, &Collection>,
    ctx: &mut ResolutionContext,
) -> Result<Vec<Theme>, TokenError>
where
    G: SourceGraph + ?Sized,
{
    let mut themes: Vec<Theme> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    for collection in collections {
        if !is_mode_color_collection(&collection.name) {
            continue;
        }
        for mode in &collection.modes {
            if !index.contains_key(&mode.name) {
                index.insert(mode.name.clone(), themes.len());
                themes.push(Theme::new(mode.name.clone()));
            }
        }
    }

    for variable in variables {
        let Some(collection) = by_id.get(variable.collection_id.as_str()).copied() else {
            continue;
        };
        if classify_variable(Some(collection), variable) != Category::SemanticModeColor
            || variable.resolved_type != VariableType::Color
        {
            continue;
        }
        let key = normalize(Category::SemanticModeColor, &variable.name);
        if key.is_empty() {
            continue;
        }

        for mode in &collection.modes {
            let Some(value) = resolve_leaf(graph, ctx, variable, &mode.mode_id).await? else {
                continue;
            };
            if let Some(&slot) = index.get(&mode.name) {
                themes[slot]
                    .overrides
                    .mode_colors
                    .color
                    .insert(key.tree_key.clone(), ThemeValue { value: value.to_json() });
            }
        }
    }

    Ok(themes)
}
