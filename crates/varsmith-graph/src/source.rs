//! The accessor seam between the host graph and the token engine.

use async_trait::async_trait;

use crate::error::GraphError;
use crate::model::{Collection, Variable};
use crate::styles::{EffectStyle, TextStyle};

/// Read-only access to a host variable graph.
///
/// Lookups are asynchronous because real hosts answer them over a process
/// boundary. Callers await them one at a time; implementations need not
/// support concurrent queries in any particular order.
///
/// The engine never mutates the graph.
#[async_trait]
pub trait SourceGraph: Send + Sync {
    /// All local collections, in host order.
    async fn list_collections(&self) -> Result<Vec<Collection>, GraphError>;

    /// All local variables, in host order.
    async fn list_variables(&self) -> Result<Vec<Variable>, GraphError>;

    /// Looks up a single variable. `Ok(None)` means the id does not exist.
    async fn variable_by_id(&self, id: &str) -> Result<Option<Variable>, GraphError>;

    /// Local text styles. Sources without styles return an empty list.
    async fn list_text_styles(&self) -> Result<Vec<TextStyle>, GraphError> {
        Ok(Vec::new())
    }

    /// Local effect styles. Sources without styles return an empty list.
    async fn list_effect_styles(&self) -> Result<Vec<EffectStyle>, GraphError> {
        Ok(Vec::new())
    }
}
