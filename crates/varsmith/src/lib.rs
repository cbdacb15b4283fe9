//! # Varsmith
//!
//! Command-line front end for the varsmith exporter. It reads a design
//! variable graph snapshot, builds the design-token document and SCSS
//! stylesheet with [`varsmith_tokens`], and delivers both through the
//! chunked transport in [`varsmith_transport`] into an output directory.
//!
//! The binary is a thin wrapper; the pieces are public so other hosts can
//! drive a run with their own [`SourceGraph`](varsmith_graph::SourceGraph)
//! and [`Transport`](varsmith_transport::Transport):
//!
//! ```rust,no_run
//! use varsmith::{run, Config};
//! use varsmith_graph::GraphSnapshot;
//! use varsmith_transport::Message;
//!
//! # async fn demo() -> Result<(), varsmith::RunError> {
//! let graph = GraphSnapshot::from_file("design.json")?;
//! let mut wire: Vec<Message> = Vec::new();
//! let summary = run(&graph, &Config::default(), &mut wire).await?;
//! println!("{} tokens", summary.stats.tokens);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod logging;
pub mod report;
pub mod run;

pub use cli::Cli;
pub use config::{Config, ConfigError, LoggingConfig, OutputConfig, OutputFormat, TransportConfig};
pub use logging::{init_logging, LoggingError};
pub use report::render_summary;
pub use run::{run, run_snapshot, RunError, RunReport, RunSummary};

// Library crates, for hosts that drive a run themselves
pub use varsmith_graph as graph;
pub use varsmith_tokens as tokens;
pub use varsmith_transport as transport;

pub use varsmith_graph::{GraphError, GraphSnapshot, SourceGraph};
pub use varsmith_tokens::{export, Diagnostic, ExportArtifacts, ExportOptions, TokenError};
pub use varsmith_transport::{DirectorySink, Message, Transport, TransportError};
