//! End-to-end tests for the export pipeline.
//!
//! Graphs are built from YAML snapshots, the same format the CLI reads, and
//! checked against the JSON document and stylesheet they produce.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use serde_json::{json, Value};
use varsmith_graph::{
    Collection, EffectStyle, GraphError, GraphSnapshot, RawValue, SourceGraph, TextStyle,
    Variable,
};
use varsmith_tokens::{
    export, CollisionPolicy, ExportOptions, MissingReason, ModeStrategy, ResolutionContext,
    ResolvePolicy, ResolvedValue, TokenError, EMPTY_STYLESHEET,
};

// ============================================================================
// Test helpers
// ============================================================================

const DESIGN_SYSTEM: &str = r##"
collections:
  - id: core
    name: Core
    modes:
      - { modeId: "0:0", name: Default }
  - id: mc
    name: Mode Colors
    modes:
      - { modeId: "1:0", name: Light }
      - { modeId: "1:1", name: Dark }
variables:
  - id: gray-900
    name: palette/gray/900
    variableCollectionId: core
    resolvedType: COLOR
    valuesByMode:
      "0:0": "#111111"
  - id: base-16
    name: spacing/4
    variableCollectionId: core
    resolvedType: FLOAT
    valuesByMode:
      "0:0": 16
  - id: body-size
    name: typography/font size/body
    variableCollectionId: core
    resolvedType: FLOAT
    valuesByMode:
      "0:0": { type: VARIABLE_ALIAS, id: base-16 }
  - id: family
    name: typography/font family
    variableCollectionId: core
    resolvedType: STRING
    valuesByMode:
      "0:0": "IBM Plex Sans"
  - id: accent
    name: accent/base
    variableCollectionId: mc
    resolvedType: COLOR
    valuesByMode:
      "1:0": "#ffffff"
      "1:1": "#000000"
  - id: text
    name: text/primary
    variableCollectionId: mc
    resolvedType: COLOR
    valuesByMode:
      "1:0": { type: VARIABLE_ALIAS, id: gray-900 }
      "1:1": "#eeeeee"
  - id: misc
    name: shadow/raw
    variableCollectionId: core
    resolvedType: FLOAT
    valuesByMode:
      "0:0": 3
textStyles:
  - id: t1
    name: Body/Regular
    fontName: { family: Inter, style: Regular }
    fontSize: 16
    lineHeight: { unit: PIXELS, value: 24 }
    letterSpacing: { unit: PERCENT, value: 0 }
effectStyles:
  - id: e1
    name: Card
    effects:
      - type: DROP_SHADOW
        color: { r: 0, g: 0, b: 0, a: 0.5 }
        offset: { x: 0, y: 1 }
        radius: 3
        spread: 0
"##;

fn design_system() -> GraphSnapshot {
    GraphSnapshot::from_yaml(DESIGN_SYSTEM).unwrap()
}

fn no_header() -> ExportOptions {
    let mut options = ExportOptions::default();
    options.stylesheet.header = None;
    options
}

fn tokens(json: &str) -> Value {
    serde_json::from_str(json).unwrap()
}

/// Wraps a snapshot and counts accessor lookups.
struct CountingGraph {
    inner: GraphSnapshot,
    lookups: AtomicUsize,
}

impl CountingGraph {
    fn new(inner: GraphSnapshot) -> Self {
        Self {
            inner,
            lookups: AtomicUsize::new(0),
        }
    }

    fn lookups(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SourceGraph for CountingGraph {
    async fn list_collections(&self) -> Result<Vec<Collection>, GraphError> {
        self.inner.list_collections().await
    }

    async fn list_variables(&self) -> Result<Vec<Variable>, GraphError> {
        self.inner.list_variables().await
    }

    async fn variable_by_id(&self, id: &str) -> Result<Option<Variable>, GraphError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.inner.variable_by_id(id).await
    }

    async fn list_text_styles(&self) -> Result<Vec<TextStyle>, GraphError> {
        self.inner.list_text_styles().await
    }

    async fn list_effect_styles(&self) -> Result<Vec<EffectStyle>, GraphError> {
        self.inner.list_effect_styles().await
    }
}

/// Accessor whose variable listing always fails.
struct BrokenGraph;

#[async_trait]
impl SourceGraph for BrokenGraph {
    async fn list_collections(&self) -> Result<Vec<Collection>, GraphError> {
        Ok(Vec::new())
    }

    async fn list_variables(&self) -> Result<Vec<Variable>, GraphError> {
        Err(GraphError::Source("host went away".into()))
    }

    async fn variable_by_id(&self, _id: &str) -> Result<Option<Variable>, GraphError> {
        Ok(None)
    }
}

// ============================================================================
// Token document
// ============================================================================

#[tokio::test]
async fn document_has_expected_tree() {
    let artifacts = export(&design_system(), &ExportOptions::default())
        .await
        .unwrap();
    let doc = tokens(&artifacts.tokens_json);

    assert_eq!(
        doc["core"]["color"]["palette"]["gray.900"],
        json!({"$type": "color", "$value": "#111111"})
    );
    assert_eq!(
        doc["core"]["spacing"]["4"],
        json!({"$type": "dimension", "$value": {"value": 16, "unit": "px"}})
    );
    assert_eq!(
        doc["core"]["typography"]["font-family"],
        json!({"$type": "fontFamily", "$value": "IBM Plex Sans"})
    );
    assert_eq!(
        doc["modeColors"]["color"]["text.primary"],
        json!({"$type": "color", "$value": "#111111"})
    );
    assert!(doc.get("tokensByMode").is_none());
    assert!(doc.get("$collections").is_none());
}

#[tokio::test]
async fn font_size_alias_resolves_to_dimension() {
    let artifacts = export(&design_system(), &ExportOptions::default())
        .await
        .unwrap();
    let doc = tokens(&artifacts.tokens_json);
    assert_eq!(
        doc["core"]["typography"]["font-size"]["body"],
        json!({"$type": "dimension", "$value": {"value": 16, "unit": "px"}})
    );
}

#[tokio::test]
async fn themes_follow_mode_order() {
    let artifacts = export(&design_system(), &ExportOptions::default())
        .await
        .unwrap();
    let doc = tokens(&artifacts.tokens_json);
    assert_eq!(
        doc["$themes"],
        json!([
            {
                "id": "light",
                "name": "Light",
                "overrides": {"modeColors": {"color": {
                    "accent.base": {"$value": "#ffffff"},
                    "text.primary": {"$value": "#111111"}
                }}}
            },
            {
                "id": "dark",
                "name": "Dark",
                "overrides": {"modeColors": {"color": {
                    "accent.base": {"$value": "#000000"},
                    "text.primary": {"$value": "#eeeeee"}
                }}}
            }
        ])
    );
}

#[tokio::test]
async fn style_summaries_are_included() {
    let artifacts = export(&design_system(), &ExportOptions::default())
        .await
        .unwrap();
    let doc = tokens(&artifacts.tokens_json);
    assert_eq!(doc["type styles"]["body/regular"]["$value"]["fontWeight"], json!(400));
    assert_eq!(doc["shadows"]["card"]["$value"][0]["color"], json!("#00000080"));
}

#[tokio::test]
async fn unclassified_variables_are_dropped() {
    let artifacts = export(&design_system(), &no_header()).await.unwrap();
    assert!(!artifacts.tokens_json.contains("shadow/raw"));
    assert!(!artifacts.stylesheet.contains("raw"));
}

#[tokio::test]
async fn tokens_by_mode_when_enabled() {
    let options = ExportOptions {
        include_tokens_by_mode: true,
        ..ExportOptions::default()
    };
    let artifacts = export(&design_system(), &options).await.unwrap();
    let doc = tokens(&artifacts.tokens_json);

    assert_eq!(
        doc["tokensByMode"]["Dark"]["text.primary"],
        json!({"$type": "color", "$value": "#eeeeee"})
    );
    assert_eq!(
        doc["tokensByMode"]["Default"]["shadow.raw"],
        json!({"$type": "number", "$value": 3})
    );
    assert_eq!(doc["$collections"][1]["modes"], json!(["Light", "Dark"]));
}

#[tokio::test]
async fn rebuild_is_byte_identical() {
    let graph = design_system();
    let first = export(&graph, &ExportOptions::default()).await.unwrap();
    let second = export(&graph, &ExportOptions::default()).await.unwrap();
    assert_eq!(first.tokens_json, second.tokens_json);
    assert_eq!(first.stylesheet, second.stylesheet);
}

// ============================================================================
// Stylesheet
// ============================================================================

#[tokio::test]
async fn stylesheet_declarations() {
    let artifacts = export(&design_system(), &no_header()).await.unwrap();
    assert_eq!(
        artifacts.stylesheet,
        "$color-gray-900: #111111;\n\
         $spacing-4: 16px;\n\
         $font-size-body: $spacing-4;\n\
         $font-family: \"IBM Plex Sans\";\n\
         $color-accent-base--light: #ffffff;\n\
         $color-accent-base--dark: #000000;\n\
         $color-text-primary--light: $color-gray-900;\n\
         $color-text-primary--dark: #eeeeee;\n"
    );
    assert_eq!(artifacts.stats.declarations, 8);
}

#[tokio::test]
async fn stylesheet_first_mode_strategy_resolved() {
    let mut options = no_header();
    options.stylesheet.mode_strategy = ModeStrategy::First;
    options.stylesheet.preserve_aliases = false;
    let artifacts = export(&design_system(), &options).await.unwrap();
    assert!(artifacts.stylesheet.contains("$font-size-body: 16px;\n"));
    assert!(artifacts.stylesheet.contains("$color-text-primary: #111111;\n"));
    assert!(!artifacts.stylesheet.contains("--"));
}

#[tokio::test]
async fn empty_graph_produces_placeholder() {
    let artifacts = export(&GraphSnapshot::default(), &ExportOptions::default())
        .await
        .unwrap();
    assert_eq!(artifacts.stylesheet, EMPTY_STYLESHEET);
    assert_eq!(artifacts.stylesheet.lines().count(), 1);
    assert_eq!(artifacts.stats.declarations, 0);
    assert_eq!(artifacts.stats.tokens, 0);

    let doc = tokens(&artifacts.tokens_json);
    assert_eq!(doc["$themes"], json!([]));
    assert_eq!(doc["core"]["typography"]["font-family"]["$value"], json!("Inter"));
}

// ============================================================================
// Missing references and policies
// ============================================================================

const CYCLE: &str = r##"
collections:
  - id: core
    name: Core
    modes: [{ modeId: m, name: Default }]
variables:
  - id: a
    name: spacing/a
    variableCollectionId: core
    resolvedType: FLOAT
    valuesByMode: { m: { type: VARIABLE_ALIAS, id: b } }
  - id: b
    name: spacing/b
    variableCollectionId: core
    resolvedType: FLOAT
    valuesByMode: { m: { type: VARIABLE_ALIAS, id: a } }
  - id: ok
    name: spacing/ok
    variableCollectionId: core
    resolvedType: FLOAT
    valuesByMode: { m: 4 }
"##;

#[tokio::test]
async fn lenient_cycle_is_skipped_and_reported() {
    let graph = GraphSnapshot::from_yaml(CYCLE).unwrap();
    let mut options = no_header();
    options.stylesheet.preserve_aliases = false;
    let artifacts = export(&graph, &options).await.unwrap();

    let doc = tokens(&artifacts.tokens_json);
    assert_eq!(doc["core"]["spacing"].as_object().map(|m| m.len()), Some(1));
    assert_eq!(artifacts.stylesheet, "$spacing-ok: 4px;\n");
    assert!(artifacts
        .diagnostics
        .iter()
        .all(|d| matches!(d.reason, MissingReason::Cycle { .. })));
    assert_eq!(artifacts.diagnostics.len(), 2);
}

#[tokio::test]
async fn strict_cycle_is_an_error() {
    let graph = GraphSnapshot::from_yaml(CYCLE).unwrap();
    let options = ExportOptions {
        policy: ResolvePolicy::Strict,
        ..ExportOptions::default()
    };
    let err = export(&graph, &options).await.unwrap_err();
    match err {
        TokenError::Unresolved { variable, reason, .. } => {
            assert_eq!(variable, "spacing/a");
            assert!(matches!(reason, MissingReason::Cycle { .. }));
        }
        other => panic!("expected unresolved error, got {:?}", other),
    }
}

#[tokio::test]
async fn fail_policy_rejects_duplicate_keys() {
    let graph = GraphSnapshot::from_yaml(
        r##"
collections:
  - { id: core, name: Core, modes: [{ modeId: m, name: Default }] }
variables:
  - { id: x, name: "palette/gray", variableCollectionId: core, resolvedType: COLOR, valuesByMode: { m: "#000000" } }
  - { id: y, name: "Palette/Gray ", variableCollectionId: core, resolvedType: COLOR, valuesByMode: { m: "#ffffff" } }
"##,
    )
    .unwrap();

    // Case differs, so the keys are distinct
    assert!(export(&graph, &ExportOptions::default()).await.is_ok());

    let graph = GraphSnapshot::from_yaml(
        r##"
collections:
  - { id: core, name: Core, modes: [{ modeId: m, name: Default }] }
variables:
  - { id: x, name: "palette/gray", variableCollectionId: core, resolvedType: COLOR, valuesByMode: { m: "#000000" } }
  - { id: y, name: "palette / gray", variableCollectionId: core, resolvedType: COLOR, valuesByMode: { m: "#ffffff" } }
"##,
    )
    .unwrap();
    let options = ExportOptions {
        collisions: CollisionPolicy::Fail,
        ..ExportOptions::default()
    };
    let err = export(&graph, &options).await.unwrap_err();
    assert!(matches!(err, TokenError::KeyCollision { .. }));

    let artifacts = export(&graph, &ExportOptions::default()).await.unwrap();
    let doc = tokens(&artifacts.tokens_json);
    assert_eq!(doc["core"]["color"]["palette"]["gray"]["$value"], json!("#ffffff"));
}

#[tokio::test]
async fn accessor_failure_propagates() {
    let err = export(&BrokenGraph, &ExportOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, TokenError::Graph(GraphError::Source(_))));
}

// ============================================================================
// Caching
// ============================================================================

#[tokio::test]
async fn repeated_resolution_does_not_requery() {
    let graph = CountingGraph::new(design_system());
    let mut ctx = ResolutionContext::default();
    let alias = RawValue::alias("body-size");

    let first = ctx.resolve(&graph, &alias, "0:0").await.unwrap();
    let after_first = graph.lookups();
    assert_eq!(after_first, 2);

    let second = ctx.resolve(&graph, &alias, "0:0").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.value(), Some(&ResolvedValue::Number(16.0)));
    assert_eq!(graph.lookups(), after_first);
}

#[tokio::test]
async fn export_shares_cache_across_phases() {
    let graph = CountingGraph::new(design_system());
    let mut options = no_header();
    options.stylesheet.preserve_aliases = false;
    export(&graph, &options).await.unwrap();

    // Two aliases, each walked once: body-size -> base-16 and text -> gray-900 (Light)
    assert_eq!(graph.lookups(), 2);
}
