//! Collections, modes, variables and their raw per-mode values.
//!
//! The model mirrors what a design tool exposes for its variables:
//!
//! - A [`Collection`] groups variables and declares an ordered list of [`Mode`]s.
//! - A [`Variable`] has a slash-delimited name, a declared [`VariableType`] and
//!   one [`RawValue`] per mode.
//! - A [`RawValue`] is either a [`Literal`] or an alias to another variable.
//!
//! Literal-versus-alias is decided once, when a snapshot is deserialized. Code
//! further down never inspects value shapes to guess whether something is a
//! reference.
//!
//! # Wire Format
//!
//! Variables deserialize from the host's JSON shape:
//!
//! ```json
//! {
//!   "id": "VariableID:1:7",
//!   "name": "accent/base",
//!   "variableCollectionId": "VariableCollectionId:1:0",
//!   "resolvedType": "COLOR",
//!   "valuesByMode": {
//!     "1:0": { "r": 1, "g": 1, "b": 1, "a": 1 },
//!     "1:1": { "type": "VARIABLE_ALIAS", "id": "VariableID:1:2" }
//!   }
//! }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::error::GraphError;

pub type VariableId = String;
pub type CollectionId = String;
pub type ModeId = String;

/// A named dimension of variation within a collection (e.g. "Light").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Mode {
    pub mode_id: ModeId,
    pub name: String,
}

impl Mode {
    pub fn new(mode_id: impl Into<ModeId>, name: impl Into<String>) -> Self {
        Self {
            mode_id: mode_id.into(),
            name: name.into(),
        }
    }
}

/// A named group of variables sharing one ordered set of modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub id: CollectionId,
    pub name: String,
    #[serde(default)]
    pub modes: Vec<Mode>,
}

impl Collection {
    pub fn new(id: impl Into<CollectionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            modes: Vec::new(),
        }
    }

    /// Appends a mode, returning `self` for chaining.
    pub fn with_mode(mut self, mode_id: impl Into<ModeId>, name: impl Into<String>) -> Self {
        self.modes.push(Mode::new(mode_id, name));
        self
    }

    /// The canonical first mode. Mode order is the collection's declared order.
    pub fn first_mode(&self) -> Option<&Mode> {
        self.modes.first()
    }

    /// Id of the first mode, or an empty string for a mode-less collection.
    pub fn first_mode_id(&self) -> &str {
        self.first_mode().map(|m| m.mode_id.as_str()).unwrap_or("")
    }

    /// Looks up a mode's display name by id.
    pub fn mode_name(&self, mode_id: &str) -> Option<&str> {
        self.modes
            .iter()
            .find(|m| m.mode_id == mode_id)
            .map(|m| m.name.as_str())
    }
}

/// Declared type of a variable's values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariableType {
    #[serde(rename = "COLOR")]
    Color,
    #[serde(rename = "FLOAT", alias = "NUMBER")]
    Number,
    #[serde(rename = "STRING")]
    String,
    #[serde(rename = "BOOLEAN")]
    Boolean,
}

impl VariableType {
    /// Lowercase name used in token `$type` fields and messages.
    pub fn as_str(self) -> &'static str {
        match self {
            VariableType::Color => "color",
            VariableType::Number => "number",
            VariableType::String => "string",
            VariableType::Boolean => "boolean",
        }
    }
}

/// A literal value of one of the declared types.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Color(Rgba),
    Number(f64),
    String(String),
    Boolean(bool),
}

impl Literal {
    /// The declared type this literal belongs to.
    pub fn value_type(&self) -> VariableType {
        match self {
            Literal::Color(_) => VariableType::Color,
            Literal::Number(_) => VariableType::Number,
            Literal::String(_) => VariableType::String,
            Literal::Boolean(_) => VariableType::Boolean,
        }
    }
}

/// A variable's value for one mode: a literal, or a reference to another variable.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Literal(Literal),
    /// Alias to the variable with this id.
    Alias(VariableId),
}

impl RawValue {
    /// Creates an alias to the given variable id.
    pub fn alias(target: impl Into<VariableId>) -> Self {
        RawValue::Alias(target.into())
    }

    /// Creates a string literal.
    pub fn string(value: impl Into<String>) -> Self {
        RawValue::Literal(Literal::String(value.into()))
    }

    /// Returns true if this is an alias.
    pub fn is_alias(&self) -> bool {
        matches!(self, RawValue::Alias(_))
    }

    /// Returns the alias target if this is an alias, None otherwise.
    pub fn alias_target(&self) -> Option<&str> {
        match self {
            RawValue::Alias(target) => Some(target),
            RawValue::Literal(_) => None,
        }
    }
}

impl From<Literal> for RawValue {
    fn from(literal: Literal) -> Self {
        RawValue::Literal(literal)
    }
}

impl From<Rgba> for RawValue {
    fn from(color: Rgba) -> Self {
        RawValue::Literal(Literal::Color(color))
    }
}

impl From<f64> for RawValue {
    fn from(n: f64) -> Self {
        RawValue::Literal(Literal::Number(n))
    }
}

impl From<bool> for RawValue {
    fn from(b: bool) -> Self {
        RawValue::Literal(Literal::Boolean(b))
    }
}

/// A typed, named value that may differ per mode.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "WireVariable")]
pub struct Variable {
    pub id: VariableId,
    /// Slash-delimited name, e.g. `palette/gray/100`.
    pub name: String,
    pub collection_id: CollectionId,
    pub resolved_type: VariableType,
    /// Values keyed by mode id. Ordered, so the first key is stable.
    pub values_by_mode: BTreeMap<ModeId, RawValue>,
}

impl Variable {
    pub fn new(
        id: impl Into<VariableId>,
        name: impl Into<String>,
        collection_id: impl Into<CollectionId>,
        resolved_type: VariableType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            collection_id: collection_id.into(),
            resolved_type,
            values_by_mode: BTreeMap::new(),
        }
    }

    /// Sets the value for a mode, returning `self` for chaining.
    pub fn with_value(mut self, mode_id: impl Into<ModeId>, value: impl Into<RawValue>) -> Self {
        self.values_by_mode.insert(mode_id.into(), value.into());
        self
    }

    /// Mode id used when a requested mode has no value: the first key of
    /// `values_by_mode`.
    pub fn fallback_mode_id(&self) -> Option<&str> {
        self.values_by_mode.keys().next().map(String::as_str)
    }

    /// Value for `mode_id`, falling back to the first stored mode's value.
    pub fn value_for_mode(&self, mode_id: &str) -> Option<&RawValue> {
        self.values_by_mode
            .get(mode_id)
            .or_else(|| self.values_by_mode.values().next())
    }
}

// =========================================================================
// Wire format
// =========================================================================

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireVariable {
    id: VariableId,
    name: String,
    variable_collection_id: CollectionId,
    resolved_type: VariableType,
    #[serde(default)]
    values_by_mode: BTreeMap<ModeId, Option<WireValue>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum WireValue {
    Alias(WireAlias),
    Color(Rgba),
    Boolean(bool),
    Number(f64),
    String(String),
}

#[derive(Deserialize)]
struct WireAlias {
    #[serde(rename = "type")]
    #[allow(dead_code)]
    kind: AliasTag,
    id: VariableId,
}

#[derive(Deserialize)]
enum AliasTag {
    #[serde(rename = "VARIABLE_ALIAS")]
    VariableAlias,
}

impl WireValue {
    fn kind_name(&self) -> &'static str {
        match self {
            WireValue::Alias(_) => "alias",
            WireValue::Color(_) => "color",
            WireValue::Boolean(_) => "boolean",
            WireValue::Number(_) => "number",
            WireValue::String(_) => "string",
        }
    }

    /// Converts a wire value into a typed raw value for the declared type.
    ///
    /// Hex strings are accepted for color variables.
    fn into_raw(
        self,
        declared: VariableType,
        variable: &str,
        mode: &str,
    ) -> Result<RawValue, GraphError> {
        let actual = self.kind_name();
        let literal = match (declared, self) {
            (_, WireValue::Alias(alias)) => return Ok(RawValue::Alias(alias.id)),
            (VariableType::Color, WireValue::Color(c)) => Literal::Color(c),
            (VariableType::Color, WireValue::String(s)) => Literal::Color(Rgba::from_hex(&s)?),
            (VariableType::Number, WireValue::Number(n)) => Literal::Number(n),
            (VariableType::String, WireValue::String(s)) => Literal::String(s),
            (VariableType::Boolean, WireValue::Boolean(b)) => Literal::Boolean(b),
            _ => {
                return Err(GraphError::TypeMismatch {
                    variable: variable.to_string(),
                    mode: mode.to_string(),
                    expected: declared.as_str(),
                    actual,
                })
            }
        };
        Ok(RawValue::Literal(literal))
    }
}

impl TryFrom<WireVariable> for Variable {
    type Error = GraphError;

    fn try_from(wire: WireVariable) -> Result<Self, Self::Error> {
        let mut values_by_mode = BTreeMap::new();
        for (mode_id, value) in wire.values_by_mode {
            // Null entries mean "no value for this mode"
            let Some(value) = value else { continue };
            let raw = value.into_raw(wire.resolved_type, &wire.name, &mode_id)?;
            values_by_mode.insert(mode_id, raw);
        }

        Ok(Variable {
            id: wire.id,
            name: wire.name,
            collection_id: wire.variable_collection_id,
            resolved_type: wire.resolved_type,
            values_by_mode,
        })
    }
}
