//! In-memory graph snapshots loaded from JSON or YAML files.
//!
//! A snapshot captures the host graph at one moment: its collections,
//! variables and local styles. It is the [`SourceGraph`] used by the CLI and
//! by tests.
//!
//! # File Shape
//!
//! ```yaml
//! collections:
//!   - id: c1
//!     name: Mode Colors
//!     modes:
//!       - { modeId: "1:0", name: Light }
//!       - { modeId: "1:1", name: Dark }
//! variables:
//!   - id: v1
//!     name: accent/base
//!     variableCollectionId: c1
//!     resolvedType: COLOR
//!     valuesByMode:
//!       "1:0": "#ffffff"
//!       "1:1": { type: VARIABLE_ALIAS, id: v2 }
//! textStyles: []
//! effectStyles: []
//! ```
//!
//! # Example
//!
//! ```rust
//! use varsmith_graph::GraphSnapshot;
//!
//! let snapshot = GraphSnapshot::from_json(r#"{
//!     "collections": [{"id": "c1", "name": "Core", "modes": [{"modeId": "m1", "name": "Default"}]}],
//!     "variables": [{
//!         "id": "v1", "name": "spacing/4", "variableCollectionId": "c1",
//!         "resolvedType": "FLOAT", "valuesByMode": {"m1": 16}
//!     }]
//! }"#).unwrap();
//!
//! assert_eq!(snapshot.variables().len(), 1);
//! assert!(snapshot.variable("v1").is_some());
//! ```

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::GraphError;
use crate::model::{Collection, Variable};
use crate::source::SourceGraph;
use crate::styles::{EffectStyle, TextStyle};

/// Recognized snapshot file extensions.
pub const SNAPSHOT_EXTENSIONS: &[&str] = &[".json", ".yaml", ".yml"];

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotFile {
    #[serde(default)]
    collections: Vec<Collection>,
    #[serde(default)]
    variables: Vec<Variable>,
    #[serde(default)]
    text_styles: Vec<TextStyle>,
    #[serde(default)]
    effect_styles: Vec<EffectStyle>,
}

/// An immutable, fully loaded variable graph.
#[derive(Debug, Clone, Default)]
pub struct GraphSnapshot {
    collections: Vec<Collection>,
    variables: Vec<Variable>,
    text_styles: Vec<TextStyle>,
    effect_styles: Vec<EffectStyle>,
    /// Variable id → index into `variables`.
    index: HashMap<String, usize>,
}

impl GraphSnapshot {
    /// Creates a snapshot from collections and variables.
    pub fn new(collections: Vec<Collection>, variables: Vec<Variable>) -> Self {
        Self::default()
            .with_collections(collections)
            .with_variables(variables)
    }

    /// Replaces the collections, returning `self` for chaining.
    pub fn with_collections(mut self, collections: Vec<Collection>) -> Self {
        self.collections = collections;
        self
    }

    /// Replaces the variables and rebuilds the id index.
    ///
    /// If two variables share an id, lookups return the later one.
    pub fn with_variables(mut self, variables: Vec<Variable>) -> Self {
        self.index = variables
            .iter()
            .enumerate()
            .map(|(i, v)| (v.id.clone(), i))
            .collect();
        self.variables = variables;
        self
    }

    pub fn with_text_styles(mut self, styles: Vec<TextStyle>) -> Self {
        self.text_styles = styles;
        self
    }

    pub fn with_effect_styles(mut self, styles: Vec<EffectStyle>) -> Self {
        self.effect_styles = styles;
        self
    }

    /// Parses a snapshot from JSON content.
    pub fn from_json(json: &str) -> Result<Self, GraphError> {
        let file: SnapshotFile = serde_json::from_str(json)?;
        Ok(Self::from_file_contents(file))
    }

    /// Parses a snapshot from YAML content.
    pub fn from_yaml(yaml: &str) -> Result<Self, GraphError> {
        let file: SnapshotFile = serde_yaml::from_str(yaml)?;
        Ok(Self::from_file_contents(file))
    }

    /// Loads a snapshot from disk, choosing the parser by file extension.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnsupportedFormat`] for extensions outside
    /// [`SNAPSHOT_EXTENSIONS`], [`GraphError::Io`] if the file cannot be read,
    /// and a parse error if the content is malformed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GraphError> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| format!(".{}", e.to_ascii_lowercase()))
            .unwrap_or_default();

        if !SNAPSHOT_EXTENSIONS.contains(&extension.as_str()) {
            return Err(GraphError::UnsupportedFormat {
                path: path.to_path_buf(),
                expected: SNAPSHOT_EXTENSIONS.join(", "),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|source| GraphError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        if extension == ".json" {
            Self::from_json(&content)
        } else {
            Self::from_yaml(&content)
        }
    }

    fn from_file_contents(file: SnapshotFile) -> Self {
        Self::new(file.collections, file.variables)
            .with_text_styles(file.text_styles)
            .with_effect_styles(file.effect_styles)
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn text_styles(&self) -> &[TextStyle] {
        &self.text_styles
    }

    pub fn effect_styles(&self) -> &[EffectStyle] {
        &self.effect_styles
    }

    /// Synchronous lookup by id.
    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.index.get(id).map(|&i| &self.variables[i])
    }

    /// Looks up a collection by id.
    pub fn collection(&self, id: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }
}

#[async_trait]
impl SourceGraph for GraphSnapshot {
    async fn list_collections(&self) -> Result<Vec<Collection>, GraphError> {
        Ok(self.collections.clone())
    }

    async fn list_variables(&self) -> Result<Vec<Variable>, GraphError> {
        Ok(self.variables.clone())
    }

    async fn variable_by_id(&self, id: &str) -> Result<Option<Variable>, GraphError> {
        Ok(self.variable(id).cloned())
    }

    async fn list_text_styles(&self) -> Result<Vec<TextStyle>, GraphError> {
        Ok(self.text_styles.clone())
    }

    async fn list_effect_styles(&self) -> Result<Vec<EffectStyle>, GraphError> {
        Ok(self.effect_styles.clone())
    }
}
