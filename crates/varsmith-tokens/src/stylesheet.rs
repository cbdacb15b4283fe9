//! SCSS variable emission.
//!
//! Each classified variable becomes one `$<style-key>: <value>;` line, taken
//! from its collection's first mode. Mode colors instead produce one line
//! per mode, suffixed `--<mode>`, unless [`ModeStrategy::First`] is chosen.
//!
//! With alias preservation on (the default), a variable that aliases another
//! is written as a reference to the target's stylesheet name rather than as
//! the resolved value:
//!
//! ```scss
//! // Generated from design variables
//!
//! $color-gray-900: #111111;
//! $color-accent-base--light: #ffffff;
//! $color-accent-base--dark: $color-gray-900;
//! $spacing-4: 16px;
//! ```
//!
//! A mode color aliasing another mode color under the suffix strategy
//! refers to the target's declaration for the same mode name, since the
//! target only exists in suffixed form. When the target's collection has
//! no mode of that name, its first mode is used.

use std::collections::HashMap;

use tracing::debug;
use varsmith_graph::{Collection, RawValue, SourceGraph, Variable, VariableId};

use crate::classify::{classify_variable, Category};
use crate::error::TokenError;
use crate::normalize::{kebab, normalize};
use crate::options::{ModeStrategy, StylesheetOptions};
use crate::resolve::{MissingReason, ResolutionContext};
use crate::value::{format_number, ResolvedValue};

/// Whole output when no declaration was produced.
pub const EMPTY_STYLESHEET: &str = "/* (No variables emitted) */\n";

/// Renders a resolved value for the declaration named `style_key`.
pub fn format_value(value: &ResolvedValue, style_key: &str) -> String {
    match value {
        ResolvedValue::Color(hex) => hex.clone(),
        ResolvedValue::Number(n) => {
            if style_key.to_lowercase().contains("font-weight") {
                format_number(*n)
            } else {
                format!("{}px", format_number(*n))
            }
        }
        ResolvedValue::String(s) => format!("\"{}\"", s.replace('"', "\\\"")),
        ResolvedValue::Boolean(b) => b.to_string(),
    }
}

/// What the stylesheet needs to know about an alias target.
#[derive(Debug, Clone)]
struct TargetKey {
    style_key: String,
    category: Category,
    /// Mode names of the target's collection, in order.
    modes: Vec<String>,
}

impl TargetKey {
    /// Declaration name to reference from a line emitted for `mode_name`.
    fn reference(&self, per_mode: bool, mode_name: &str) -> String {
        if !per_mode || !self.category.is_mode_sensitive() {
            return self.style_key.clone();
        }
        let mode = self
            .modes
            .iter()
            .find(|name| *name == mode_name)
            .or_else(|| self.modes.first());
        match mode {
            Some(mode) => format!("{}--{}", self.style_key, kebab(mode)),
            None => self.style_key.clone(),
        }
    }
}

/// Stylesheet names of alias targets, looked up once each.
struct TargetKeys<'a> {
    collections: &'a HashMap<&'a str, &'a Collection>,
    keys: HashMap<VariableId, Option<TargetKey>>,
}

impl<'a> TargetKeys<'a> {
    fn new(collections: &'a HashMap<&'a str, &'a Collection>) -> Self {
        Self {
            collections,
            keys: HashMap::new(),
        }
    }

    /// Key of `target`, classified within its own collection. `None` when
    /// the target does not exist.
    async fn get<G>(&mut self, graph: &G, target: &str) -> Result<Option<TargetKey>, TokenError>
    where
        G: SourceGraph + ?Sized,
    {
        if let Some(key) = self.keys.get(target) {
            return Ok(key.clone());
        }
        let key = graph.variable_by_id(target).await?.map(|variable| {
            let collection = self
                .collections
                .get(variable.collection_id.as_str())
                .copied();
            let category = classify_variable(collection, &variable);
            TargetKey {
                style_key: normalize(category, &variable.name).style_key,
                category,
                modes: collection
                    .map(|c| c.modes.iter().map(|m| m.name.clone()).collect())
                    .unwrap_or_default(),
            }
        });
        self.keys.insert(target.to_string(), key.clone());
        Ok(key)
    }
}

/// Emits SCSS declarations for `variables`.
///
/// Variables outside any known collection, or whose collection has no
/// modes, are skipped.
pub async fn emit_stylesheet<G>(
    graph: &G,
    collections: &[Collection],
    variables: &[Variable],
    ctx: &mut ResolutionContext,
    options: &StylesheetOptions,
) -> Result<String, TokenError>
where
    G: SourceGraph + ?Sized,
{
    let by_id: HashMap<&str, &Collection> =
        collections.iter().map(|c| (c.id.as_str(), c)).collect();
    let mut targets = TargetKeys::new(&by_id);
    let mut lines: Vec<String> = Vec::new();

    for variable in variables {
        let Some(collection) = by_id.get(variable.collection_id.as_str()).copied() else {
            debug!(variable = %variable.name, "skipping variable outside known collections");
            continue;
        };
        let category = classify_variable(Some(collection), variable);
        if category == Category::Unclassified {
            continue;
        }
        let base = normalize(category, &variable.name).style_key;
        if base.is_empty() {
            continue;
        }

        let per_mode =
            category.is_mode_sensitive() && options.mode_strategy == ModeStrategy::Suffix;
        let first_mode_id = collection.first_mode_id();

        for (index, mode) in collection.modes.iter().enumerate() {
            if index > 0 && !per_mode {
                break;
            }
            let raw = variable
                .values_by_mode
                .get(&mode.mode_id)
                .or_else(|| variable.values_by_mode.get(first_mode_id));
            let Some(raw) = raw else {
                continue;
            };

            let name = if per_mode {
                format!("{}--{}", base, kebab(&mode.name))
            } else {
                base.clone()
            };

            if let RawValue::Alias(target) = raw {
                if options.preserve_aliases {
                    match targets.get(graph, target).await? {
                        Some(target_key) if !target_key.style_key.is_empty() => {
                            let reference = target_key.reference(per_mode, &mode.name);
                            lines.push(format!("${}: ${};", name, reference));
                        }
                        _ => {
                            let reason = MissingReason::UnknownVariable { id: target.clone() };
                            ctx.missing(reason, &variable.name, &mode.mode_id)?;
                        }
                    }
                    continue;
                }
            }

            let resolution = ctx.resolve(graph, raw, &mode.mode_id).await?;
            if let Some(value) = ctx.accept(resolution, &variable.name, &mode.mode_id)? {
                lines.push(format!("${}: {};", name, format_value(&value, &base)));
            }
        }
    }

    if lines.is_empty() {
        return Ok(EMPTY_STYLESHEET.to_string());
    }

    let mut out = String::new();
    if let Some(header) = &options.header {
        out.push_str(header);
        out.push_str("\n\n");
    }
    for line in lines {
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}
