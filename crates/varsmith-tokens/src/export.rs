//! One complete export pass over a graph.

use serde::Serialize;
use tracing::info;
use varsmith_graph::SourceGraph;

use crate::by_mode::{build_tokens_by_mode, summarize_collections, CollectionSummary, TokensByMode};
use crate::error::TokenError;
use crate::options::ExportOptions;
use crate::resolve::{Diagnostic, ResolutionContext};
use crate::styles::{build_shadows, build_type_styles};
use crate::stylesheet::emit_stylesheet;
use crate::tree::{build_tree, TokenGroup, TokenTree};

/// The JSON token document: the tree plus style summaries.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TokenDocument {
    #[serde(flatten)]
    pub tree: TokenTree,
    #[serde(rename = "type styles")]
    pub type_styles: TokenGroup,
    pub shadows: TokenGroup,
    #[serde(rename = "tokensByMode", skip_serializing_if = "Option::is_none")]
    pub tokens_by_mode: Option<TokensByMode>,
    #[serde(rename = "$collections", skip_serializing_if = "Option::is_none")]
    pub collections: Option<Vec<CollectionSummary>>,
}

/// Counts describing an export, for reporting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportStats {
    pub collections: usize,
    pub variables: usize,
    pub tokens: usize,
    pub declarations: usize,
}

/// Everything produced by [`export`].
#[derive(Debug, Clone)]
pub struct ExportArtifacts {
    pub document: TokenDocument,
    /// `document` pretty-printed with two-space indentation.
    pub tokens_json: String,
    pub stylesheet: String,
    /// Missing references that were skipped.
    pub diagnostics: Vec<Diagnostic>,
    pub stats: ExportStats,
}

/// Reads the graph and produces the token document and stylesheet.
///
/// All phases share one [`ResolutionContext`], so each alias is walked at
/// most once per mode.
///
/// # Errors
///
/// Accessor failures, missing references under the strict policy, and key
/// collisions under the fail policy abort the export.
pub async fn export<G>(graph: &G, options: &ExportOptions) -> Result<ExportArtifacts, TokenError>
where
    G: SourceGraph + ?Sized,
{
    let collections = graph.list_collections().await?;
    let variables = graph.list_variables().await?;
    let text_styles = graph.list_text_styles().await?;
    let effect_styles = graph.list_effect_styles().await?;
    info!(
        collections = collections.len(),
        variables = variables.len(),
        text_styles = text_styles.len(),
        effect_styles = effect_styles.len(),
        "graph loaded"
    );

    let mut ctx = ResolutionContext::new(options.policy);
    let tree = build_tree(graph, &collections, &variables, &mut ctx, options).await?;

    let (tokens_by_mode, summaries) = if options.include_tokens_by_mode {
        let by_mode = build_tokens_by_mode(graph, &collections, &variables, &mut ctx).await?;
        (Some(by_mode), Some(summarize_collections(&collections)))
    } else {
        (None, None)
    };

    let document = TokenDocument {
        tree,
        type_styles: build_type_styles(&text_styles),
        shadows: build_shadows(&effect_styles),
        tokens_by_mode,
        collections: summaries,
    };
    let tokens_json = serde_json::to_string_pretty(&document)?;

    let stylesheet =
        emit_stylesheet(graph, &collections, &variables, &mut ctx, &options.stylesheet).await?;

    let stats = ExportStats {
        collections: collections.len(),
        variables: variables.len(),
        tokens: document.tree.leaf_count()
            + document.type_styles.len()
            + document.shadows.len(),
        declarations: stylesheet.lines().filter(|l| l.starts_with('$')).count(),
    };
    info!(
        tokens = stats.tokens,
        declarations = stats.declarations,
        lookups = ctx.lookups(),
        unresolved = ctx.diagnostics().len(),
        "export complete"
    );

    Ok(ExportArtifacts {
        document,
        tokens_json,
        stylesheet,
        diagnostics: ctx.into_diagnostics(),
        stats,
    })
}
