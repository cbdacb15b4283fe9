//! # Varsmith Graph - Design Variable Model
//!
//! `varsmith-graph` holds the data model for a host's design variables and
//! the accessor trait the token engine reads them through.
//!
//! ## Core Concepts
//!
//! - [`Collection`]: a named group of variables with an ordered list of [`Mode`]s
//! - [`Variable`]: a typed, slash-named value per mode
//! - [`RawValue`]: a [`Literal`] or an alias to another variable
//! - [`SourceGraph`]: async, read-only access to collections and variables
//! - [`GraphSnapshot`]: an in-memory graph loaded from a JSON or YAML file
//!
//! ## Example
//!
//! ```rust
//! use varsmith_graph::{Collection, GraphSnapshot, RawValue, Rgba, Variable, VariableType};
//!
//! let core = Collection::new("c1", "Core").with_mode("m1", "Default");
//! let gray = Variable::new("v1", "palette/gray/100", "c1", VariableType::Color)
//!     .with_value("m1", Rgba::rgb(0.95, 0.95, 0.95));
//! let surface = Variable::new("v2", "surface", "c1", VariableType::Color)
//!     .with_value("m1", RawValue::alias("v1"));
//!
//! let snapshot = GraphSnapshot::new(vec![core], vec![gray, surface]);
//! assert_eq!(snapshot.variables().len(), 2);
//! ```

mod color;
mod error;
mod model;
mod snapshot;
mod source;
pub mod styles;

pub use color::Rgba;
pub use error::{GraphError, Result};
pub use model::{
    Collection, CollectionId, Literal, Mode, ModeId, RawValue, Variable, VariableId, VariableType,
};
pub use snapshot::{GraphSnapshot, SNAPSHOT_EXTENSIONS};
pub use source::SourceGraph;
pub use styles::{
    Effect, EffectKind, EffectStyle, FontName, LetterSpacing, LineHeight, Offset, TextStyle,
};
