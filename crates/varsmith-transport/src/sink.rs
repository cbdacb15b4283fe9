//! A transport that writes reassembled artifacts to a directory.

use std::path::{Component, Path, PathBuf};

use tracing::{debug, info, warn};

use crate::chunk::{Artifact, Transport};
use crate::error::TransportError;
use crate::message::Message;
use crate::reassemble::Reassembler;

/// Whether `name` is a bare file name with no directory component.
pub fn is_plain_filename(name: &str) -> bool {
    let path = Path::new(name);
    path.components().count() == 1
        && matches!(path.components().next(), Some(Component::Normal(_)))
}

/// Receives chunked artifacts and writes each one to `dir/<filename>`.
///
/// Completed artifacts are staged in memory and only written by
/// [`finish`](DirectorySink::finish), so a transfer that fails part way
/// leaves the directory untouched. An `ERROR` message or a rejected
/// artifact discards everything staged.
///
/// Filenames must be plain file names; anything with a directory component
/// is rejected.
#[derive(Debug)]
pub struct DirectorySink {
    dir: PathBuf,
    reassembler: Reassembler,
    staged: Vec<Artifact>,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            reassembler: Reassembler::new(),
            staged: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Artifacts received and waiting to be written, in arrival order.
    pub fn staged(&self) -> &[Artifact] {
        &self.staged
    }

    /// Closes the sink and writes the staged artifacts. Fails without
    /// writing anything if a transfer was left incomplete.
    pub fn finish(self) -> Result<Vec<PathBuf>, TransportError> {
        self.reassembler.finish()?;
        if self.staged.is_empty() {
            return Ok(Vec::new());
        }

        std::fs::create_dir_all(&self.dir).map_err(|source| TransportError::Sink {
            path: self.dir.clone(),
            source,
        })?;
        let mut written = Vec::with_capacity(self.staged.len());
        for artifact in &self.staged {
            let path = self.dir.join(&artifact.filename);
            if let Err(source) = std::fs::write(&path, artifact.data.as_bytes()) {
                remove_written(&written);
                return Err(TransportError::Sink { path, source });
            }
            info!(path = %path.display(), bytes = artifact.data.len(), mime = %artifact.mime, "artifact written");
            written.push(path);
        }
        Ok(written)
    }

    fn stage(&mut self, artifact: Artifact) -> Result<(), TransportError> {
        if !is_plain_filename(&artifact.filename) {
            return Err(TransportError::InvalidFilename(artifact.filename));
        }
        debug!(filename = %artifact.filename, "artifact staged");
        self.staged.push(artifact);
        Ok(())
    }
}

fn remove_written(paths: &[PathBuf]) {
    for path in paths {
        if let Err(err) = std::fs::remove_file(path) {
            warn!(path = %path.display(), error = %err, "failed to remove partial output");
        }
    }
}

impl Transport for DirectorySink {
    fn send(&mut self, message: Message) -> Result<(), TransportError> {
        let result = match self.reassembler.accept(message) {
            Ok(Some(artifact)) => self.stage(artifact),
            Ok(None) => Ok(()),
            Err(err) => Err(err),
        };
        if result.is_err() && !self.staged.is_empty() {
            debug!(discarded = self.staged.len(), "discarding staged artifacts");
            self.staged.clear();
        }
        result
    }
}
