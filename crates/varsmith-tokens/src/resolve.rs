//! Alias resolution.
//!
//! A variable's value for a mode is either a literal or an alias to another
//! variable. [`ResolutionContext::resolve`] follows alias chains to their
//! terminal literal, using the same mode id at every hop and falling back to
//! a variable's first stored mode when the requested mode has no value.
//!
//! # Missing references
//!
//! A chain can fail to reach a literal in three ways, each reported as a
//! [`MissingReason`]:
//!
//! - the alias target does not exist in the graph
//! - a variable on the chain has no values at all
//! - the chain revisits a variable (a cycle)
//!
//! These outcomes are values, not errors. Callers pass them through
//! [`ResolutionContext::accept`], which applies the [`ResolvePolicy`]: skip
//! the leaf (lenient) or abort with [`TokenError::Unresolved`] (strict).
//! Accessor failures are real errors and propagate immediately.
//!
//! # Caching
//!
//! Outcomes are cached per `(variable id, mode id)` for every hop of a walked
//! chain, so resolving the same value again never touches the accessor.
//!
//! ```rust
//! # tokio_test_block(async {
//! use varsmith_graph::{Collection, GraphSnapshot, RawValue, Variable, VariableType};
//! use varsmith_tokens::{ResolutionContext, ResolvePolicy, ResolvedValue};
//!
//! let base = Variable::new("v1", "spacing/4", "c1", VariableType::Number).with_value("m1", 16.0);
//! let alias = Variable::new("v2", "spacing/md", "c1", VariableType::Number)
//!     .with_value("m1", RawValue::alias("v1"));
//! let graph = GraphSnapshot::new(vec![Collection::new("c1", "Core")], vec![base, alias.clone()]);
//!
//! let mut ctx = ResolutionContext::new(ResolvePolicy::Lenient);
//! let resolution = ctx.resolve_variable(&graph, &alias, "m1").await.unwrap();
//! assert_eq!(resolution.value(), Some(&ResolvedValue::Number(16.0)));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};
use varsmith_graph::{GraphError, ModeId, RawValue, SourceGraph, Variable, VariableId};

use crate::error::TokenError;
use crate::options::ResolvePolicy;
use crate::value::ResolvedValue;

/// Why a value could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MissingReason {
    /// An alias points at a variable the graph does not know.
    UnknownVariable { id: VariableId },
    /// A variable on the chain has no value for any mode.
    NoValue { id: VariableId },
    /// The chain revisited a variable. `chain` ends with the repeated id.
    Cycle { chain: Vec<VariableId> },
}

impl fmt::Display for MissingReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingReason::UnknownVariable { id } => {
                write!(f, "alias target '{}' does not exist", id)
            }
            MissingReason::NoValue { id } => write!(f, "variable '{}' has no value", id),
            MissingReason::Cycle { chain } => write!(f, "alias cycle {}", chain.join(" -> ")),
        }
    }
}

/// Outcome of resolving one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Resolved(ResolvedValue),
    Missing(MissingReason),
}

impl Resolution {
    pub fn value(&self) -> Option<&ResolvedValue> {
        match self {
            Resolution::Resolved(value) => Some(value),
            Resolution::Missing(_) => None,
        }
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, Resolution::Missing(_))
    }
}

/// A missing reference encountered during an export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Name of the variable whose value was being produced.
    pub variable: String,
    pub mode: ModeId,
    pub reason: MissingReason,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]: {}", self.variable, self.mode, self.reason)
    }
}

/// Variables visited by one top-level resolve call.
#[derive(Debug, Default)]
struct AliasChain(Vec<VariableId>);

impl AliasChain {
    fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|v| v == id)
    }

    fn push(&mut self, id: VariableId) {
        self.0.push(id);
    }

    /// The loop closed by revisiting `id`: from its first visit to the repeat.
    fn closed_at(&self, id: &str) -> Vec<VariableId> {
        let start = self.0.iter().position(|v| v == id).unwrap_or(0);
        let mut cycle = self.0[start..].to_vec();
        cycle.push(id.to_string());
        cycle
    }

    fn iter(&self) -> impl Iterator<Item = &VariableId> {
        self.0.iter()
    }
}

/// Per-export resolution state: outcome cache, diagnostics and policy.
///
/// One context is shared by every phase of an export so that a value
/// resolved for the token tree is not fetched again for the stylesheet.
#[derive(Debug)]
pub struct ResolutionContext {
    policy: ResolvePolicy,
    cache: HashMap<(VariableId, ModeId), Resolution>,
    diagnostics: Vec<Diagnostic>,
    lookups: usize,
}

impl ResolutionContext {
    pub fn new(policy: ResolvePolicy) -> Self {
        Self {
            policy,
            cache: HashMap::new(),
            diagnostics: Vec::new(),
            lookups: 0,
        }
    }

    pub fn policy(&self) -> ResolvePolicy {
        self.policy
    }

    /// Number of accessor lookups performed so far.
    pub fn lookups(&self) -> usize {
        self.lookups
    }

    /// Number of cached `(variable, mode)` outcomes.
    pub fn cached(&self) -> usize {
        self.cache.len()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }

    /// Resolves `value` for `mode_id`.
    ///
    /// Literals come back unchanged. Aliases are followed until a literal,
    /// a missing variable, an empty variable or a cycle.
    ///
    /// # Errors
    ///
    /// Only accessor failures are errors. Missing references are returned
    /// as [`Resolution::Missing`].
    pub async fn resolve<G>(
        &mut self,
        graph: &G,
        value: &RawValue,
        mode_id: &str,
    ) -> Result<Resolution, GraphError>
    where
        G: SourceGraph + ?Sized,
    {
        let mut current = match value {
            RawValue::Literal(literal) => {
                return Ok(Resolution::Resolved(ResolvedValue::from(literal)))
            }
            RawValue::Alias(target) => target.clone(),
        };

        let mut chain = AliasChain::default();
        let outcome = loop {
            if let Some(cached) = self.cache.get(&(current.clone(), mode_id.to_string())) {
                break cached.clone();
            }

            if chain.contains(&current) {
                let cycle = chain.closed_at(&current);
                warn!(
                    chain = %cycle.join(" -> "),
                    mode = mode_id,
                    "alias cycle detected"
                );
                break Resolution::Missing(MissingReason::Cycle { chain: cycle });
            }
            chain.push(current.clone());

            self.lookups += 1;
            let variable = match graph.variable_by_id(&current).await? {
                Some(variable) => variable,
                None => break Resolution::Missing(MissingReason::UnknownVariable { id: current }),
            };

            match variable.value_for_mode(mode_id) {
                None => break Resolution::Missing(MissingReason::NoValue { id: variable.id }),
                Some(RawValue::Literal(literal)) => {
                    break Resolution::Resolved(ResolvedValue::from(literal))
                }
                Some(RawValue::Alias(next)) => current = next.clone(),
            }
        };

        for id in chain.iter() {
            self.cache
                .insert((id.clone(), mode_id.to_string()), outcome.clone());
        }

        Ok(outcome)
    }

    /// Resolves `variable`'s own value for `mode_id`, falling back to its
    /// first stored mode.
    pub async fn resolve_variable<G>(
        &mut self,
        graph: &G,
        variable: &Variable,
        mode_id: &str,
    ) -> Result<Resolution, GraphError>
    where
        G: SourceGraph + ?Sized,
    {
        match variable.value_for_mode(mode_id) {
            Some(raw) => self.resolve(graph, raw, mode_id).await,
            None => Ok(Resolution::Missing(MissingReason::NoValue {
                id: variable.id.clone(),
            })),
        }
    }

    /// Applies the resolve policy to an outcome.
    ///
    /// Returns the value when resolved. A missing outcome is recorded as a
    /// diagnostic and yields `Ok(None)` under the lenient policy, or
    /// [`TokenError::Unresolved`] under the strict one.
    pub fn accept(
        &mut self,
        resolution: Resolution,
        variable: &str,
        mode_id: &str,
    ) -> Result<Option<ResolvedValue>, TokenError> {
        match resolution {
            Resolution::Resolved(value) => Ok(Some(value)),
            Resolution::Missing(reason) => {
                self.missing(reason, variable, mode_id)?;
                Ok(None)
            }
        }
    }

    /// Records a missing reference and applies the resolve policy.
    pub fn missing(
        &mut self,
        reason: MissingReason,
        variable: &str,
        mode_id: &str,
    ) -> Result<(), TokenError> {
        let diagnostic = Diagnostic {
            variable: variable.to_string(),
            mode: mode_id.to_string(),
            reason,
        };
        if !self.diagnostics.contains(&diagnostic) {
            self.diagnostics.push(diagnostic.clone());
        }

        match self.policy {
            ResolvePolicy::Lenient => {
                debug!(
                    variable,
                    mode = mode_id,
                    reason = %diagnostic.reason,
                    "skipping unresolved value"
                );
                Ok(())
            }
            ResolvePolicy::Strict => Err(TokenError::Unresolved {
                variable: diagnostic.variable,
                mode: diagnostic.mode,
                reason: diagnostic.reason,
            }),
        }
    }
}

impl Default for ResolutionContext {
    fn default() -> Self {
        Self::new(ResolvePolicy::default())
    }
}
