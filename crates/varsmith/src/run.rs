//! The export pipeline: snapshot in, artifacts out over the transport.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, error, info};
use varsmith_graph::{GraphError, GraphSnapshot, SourceGraph};
use varsmith_tokens::{export, Diagnostic, ExportStats, TokenError};
use varsmith_transport::{send_artifact, send_error, Artifact, DirectorySink, Transport, TransportError};

use crate::config::{Config, ConfigError};
use crate::logging::LoggingError;

pub const JSON_MIME: &str = "application/json";
pub const SCSS_MIME: &str = "text/x-scss";

#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error(transparent)]
    Tokens(#[from] TokenError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Logging(#[from] LoggingError),
}

/// What one export delivered.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub stats: ExportStats,
    pub diagnostics: Vec<Diagnostic>,
    /// `(filename, chunk count)` per artifact sent, in send order.
    pub artifacts: Vec<(String, usize)>,
}

/// [`RunSummary`] plus the files the directory sink wrote.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub summary: RunSummary,
    pub written: Vec<PathBuf>,
}

/// Exports `graph` and sends the selected artifacts over `transport`.
///
/// If the export or a transfer fails, a single `ERROR` message is sent and
/// the original error is returned. Receivers discard anything received
/// before it.
pub async fn run<G, T>(graph: &G, config: &Config, transport: &mut T) -> Result<RunSummary, RunError>
where
    G: SourceGraph + ?Sized,
    T: Transport,
{
    let artifacts = match export(graph, &config.export).await {
        Ok(artifacts) => artifacts,
        Err(err) => {
            report_failure(transport, &err);
            return Err(err.into());
        }
    };

    let mut outgoing = Vec::new();
    if config.output.format.includes_json() {
        outgoing.push(Artifact::new(
            config.output.tokens_file.clone(),
            JSON_MIME,
            artifacts.tokens_json,
        ));
    }
    if config.output.format.includes_scss() {
        outgoing.push(Artifact::new(
            config.output.stylesheet_file.clone(),
            SCSS_MIME,
            artifacts.stylesheet,
        ));
    }

    let mut sent = Vec::with_capacity(outgoing.len());
    for artifact in &outgoing {
        let chunks = match send_artifact(transport, artifact, config.transport.chunk_size) {
            Ok(chunks) => chunks,
            Err(err) => {
                report_failure(transport, &err);
                return Err(err.into());
            }
        };
        debug!(filename = %artifact.filename, chunks, "artifact sent");
        sent.push((artifact.filename.clone(), chunks));
    }

    info!(
        tokens = artifacts.stats.tokens,
        declarations = artifacts.stats.declarations,
        diagnostics = artifacts.diagnostics.len(),
        "export complete"
    );

    Ok(RunSummary {
        stats: artifacts.stats,
        diagnostics: artifacts.diagnostics,
        artifacts: sent,
    })
}

/// Loads a snapshot file and writes the artifacts into the configured
/// output directory.
pub async fn run_snapshot(snapshot: &Path, config: &Config) -> Result<RunReport, RunError> {
    config.validate()?;
    let mut sink = DirectorySink::new(config.output.directory.clone());

    let graph = match GraphSnapshot::from_file(snapshot) {
        Ok(graph) => graph,
        Err(err) => {
            report_failure(&mut sink, &err);
            return Err(err.into());
        }
    };

    let summary = run(&graph, config, &mut sink).await?;
    let written = sink.finish()?;
    Ok(RunReport { summary, written })
}

fn report_failure<T: Transport>(transport: &mut T, err: &dyn std::error::Error) {
    error!(error = %err, "export failed");
    // Receivers answer ERROR with their own error; the original failure wins
    if let Err(reply) = send_error(transport, err.to_string()) {
        debug!(reply = %reply, "receiver acknowledged the error");
    }
}
