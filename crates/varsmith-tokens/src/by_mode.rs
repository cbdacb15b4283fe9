//! Flat per-mode export of every variable.
//!
//! Unlike the token tree, this view ignores classification: every variable
//! of every collection appears once per mode of its collection, keyed by its
//! dotted name, with its declared type.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use varsmith_graph::{Collection, SourceGraph, Variable};

use crate::error::TokenError;
use crate::normalize::pathify;
use crate::resolve::ResolutionContext;
use crate::tree::{TokenGroup, TokenLeaf, TokenType};

/// Mode name → dotted variable name → token.
pub type TokensByMode = BTreeMap<String, TokenGroup>;

/// Summary of a collection for the `$collections` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectionSummary {
    pub id: String,
    pub name: String,
    pub modes: Vec<String>,
}

impl From<&Collection> for CollectionSummary {
    fn from(collection: &Collection) -> Self {
        Self {
            id: collection.id.clone(),
            name: collection.name.clone(),
            modes: collection.modes.iter().map(|m| m.name.clone()).collect(),
        }
    }
}

pub fn summarize_collections(collections: &[Collection]) -> Vec<CollectionSummary> {
    collections.iter().map(CollectionSummary::from).collect()
}

/// Resolves every variable for every mode of its collection.
///
/// Modes that share a name across collections share one map.
pub async fn build_tokens_by_mode<G>(
    graph: &G,
    collections: &[Collection],
    variables: &[Variable],
    ctx: &mut ResolutionContext,
) -> Result<TokensByMode, TokenError>
where
    G: SourceGraph + ?Sized,
{
    let mut members: HashMap<&str, Vec<&Variable>> = HashMap::new();
    for variable in variables {
        members
            .entry(variable.collection_id.as_str())
            .or_default()
            .push(variable);
    }

    let mut out = TokensByMode::new();
    for collection in collections {
        let vars = members.get(collection.id.as_str());
        for mode in &collection.modes {
            let group = out.entry(mode.name.clone()).or_default();
            for variable in vars.into_iter().flatten() {
                let resolution = ctx.resolve_variable(graph, variable, &mode.mode_id).await?;
                let Some(value) = ctx.accept(resolution, &variable.name, &mode.mode_id)? else {
                    continue;
                };
                group.insert(
                    pathify(&variable.name),
                    TokenLeaf::new(TokenType::from(variable.resolved_type), value.to_json()),
                );
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use varsmith_graph::{GraphSnapshot, RawValue, Rgba, VariableType};

    #[tokio::test]
    async fn test_every_variable_every_mode() {
        let collection = Collection::new("c1", "Theme")
            .with_mode("l", "Light")
            .with_mode("d", "Dark");
        let graph = GraphSnapshot::new(
            vec![collection],
            vec![
                Variable::new("v1", "surface/bg", "c1", VariableType::Color)
                    .with_value("l", Rgba::rgb(1.0, 1.0, 1.0))
                    .with_value("d", Rgba::rgb(0.0, 0.0, 0.0)),
                Variable::new("v2", "flags/dense", "c1", VariableType::Boolean)
                    .with_value("l", true),
                Variable::new("v3", "broken", "c1", VariableType::String)
                    .with_value("l", RawValue::alias("missing")),
            ],
        );
        let mut ctx = ResolutionContext::default();
        let out = build_tokens_by_mode(&graph, graph.collections(), graph.variables(), &mut ctx)
            .await
            .unwrap();

        assert_eq!(out.len(), 2);
        assert_eq!(out["Light"]["surface.bg"].value, json!("#ffffff"));
        assert_eq!(out["Dark"]["surface.bg"].value, json!("#000000"));
        // Boolean has no Dark value and falls back to its first mode
        assert_eq!(out["Dark"]["flags.dense"].token_type, TokenType::Boolean);
        assert!(!out["Light"].contains_key("broken"));
        assert!(!ctx.diagnostics().is_empty());
    }

    #[test]
    fn test_summarize_collections() {
        let summaries = summarize_collections(&[Collection::new("c1", "Theme")
            .with_mode("l", "Light")
            .with_mode("d", "Dark")]);
        assert_eq!(
            serde_json::to_value(&summaries).unwrap(),
            json!([{"id": "c1", "name": "Theme", "modes": ["Light", "Dark"]}])
        );
    }
}
