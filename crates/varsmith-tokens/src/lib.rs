//! # Varsmith Tokens - Design Token Generation
//!
//! `varsmith-tokens` turns a design variable graph into two artifacts:
//!
//! - a JSON token document (category tree, per-mode themes, style summaries)
//! - an SCSS stylesheet of `$variables`
//!
//! ## Pipeline
//!
//! 1. [`classify`] assigns each variable a [`Category`] from its collection
//!    and name.
//! 2. [`normalize`] derives the tree key and stylesheet key.
//! 3. [`ResolutionContext`] follows alias chains to literal values.
//! 4. [`build_tree`] and [`emit_stylesheet`] assemble the outputs.
//!
//! [`export`] runs the whole pipeline against any [`SourceGraph`](varsmith_graph::SourceGraph).
//!
//! ## Example
//!
//! ```rust
//! # tokio_test_block(async {
//! use varsmith_graph::{Collection, GraphSnapshot, Rgba, Variable, VariableType};
//! use varsmith_tokens::{export, ExportOptions};
//!
//! let graph = GraphSnapshot::new(
//!     vec![Collection::new("c1", "Mode Colors").with_mode("l", "Light").with_mode("d", "Dark")],
//!     vec![Variable::new("v1", "accent/base", "c1", VariableType::Color)
//!         .with_value("l", Rgba::rgb(1.0, 1.0, 1.0))
//!         .with_value("d", Rgba::rgb(0.0, 0.0, 0.0))],
//! );
//!
//! let artifacts = export(&graph, &ExportOptions::default()).await.unwrap();
//! assert!(artifacts.stylesheet.contains("$color-accent-base--dark: #000000;"));
//! assert!(artifacts.tokens_json.contains("\"accent.base\""));
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```
//!
//! ## Missing References
//!
//! Dangling aliases and alias cycles are skipped by default and reported as
//! [`Diagnostic`]s. [`ResolvePolicy::Strict`] turns them into errors.

pub mod by_mode;
pub mod classify;
mod error;
mod export;
pub mod normalize;
mod options;
pub mod resolve;
pub mod styles;
pub mod stylesheet;
pub mod tree;
mod value;

pub use by_mode::{build_tokens_by_mode, CollectionSummary, TokensByMode};
pub use classify::{classify, classify_variable, Category};
pub use error::{Result, TokenError};
pub use export::{export, ExportArtifacts, ExportStats, TokenDocument};
pub use normalize::{normalize, CanonicalKey};
pub use options::{
    CollisionPolicy, ExportOptions, ModeStrategy, ResolvePolicy, StylesheetOptions,
    DEFAULT_FONT_FAMILY, DEFAULT_STYLESHEET_HEADER,
};
pub use resolve::{Diagnostic, MissingReason, Resolution, ResolutionContext};
pub use styles::{build_shadows, build_type_styles, weight_from_style};
pub use stylesheet::{emit_stylesheet, EMPTY_STYLESHEET};
pub use tree::{build_tree, TokenLeaf, TokenTree, TokenType};
pub use value::{json_number, ResolvedValue};
