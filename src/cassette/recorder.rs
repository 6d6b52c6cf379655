//! Accumulates port interactions and writes them as a YAML cassette.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use chrono::Utc;
use tracing::warn;

use super::format::{Cassette, Interaction};

/// A recorder shared by every recording adapter of one run.
pub type SharedRecorder = Arc<Mutex<CassetteRecorder>>;

/// Collects interactions in call order for one cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    commit: String,
    interactions: Vec<Interaction>,
}

impl CassetteRecorder {
    /// Create a recorder that will write to `path` on [`finish`](Self::finish).
    pub fn new(
        path: impl Into<PathBuf>,
        name: impl Into<String>,
        commit: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            name: name.into(),
            commit: commit.into(),
            interactions: Vec::new(),
        }
    }

    /// Create a recorder for `<base_dir>/<timestamp>.cassette.yaml`, stamped
    /// with the current git commit.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_dir` cannot be created or the cassette file
    /// already exists.
    pub fn start(base_dir: &Path) -> Result<Self, String> {
        std::fs::create_dir_all(base_dir).map_err(|e| {
            format!("Failed to create cassette directory {}: {e}", base_dir.display())
        })?;

        let name = Utc::now().format("%Y-%m-%dT%H-%M-%S%.3f").to_string();
        let path = base_dir.join(format!("{name}.cassette.yaml"));
        if path.exists() {
            return Err(format!("Cassette already exists: {}", path.display()));
        }
        Ok(Self::new(path, name, commit_hash()))
    }

    /// Path the cassette is written to.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append an interaction; its `seq` is its position in the cassette.
    pub fn record(
        &mut self,
        port: impl Into<String>,
        method: impl Into<String>,
        input: serde_json::Value,
        output: serde_json::Value,
    ) {
        let seq = self.interactions.len() as u64;
        self.interactions.push(Interaction {
            seq,
            port: port.into(),
            method: method.into(),
            input,
            output,
        });
    }

    /// Write the cassette to disk and return its path.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML cannot be produced or the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette = Cassette {
            name: self.name,
            recorded_at: Utc::now(),
            commit: self.commit,
            interactions: self.interactions,
        };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }

    /// Finish a shared recorder once every adapter holding it is dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if an adapter still holds the recorder or the
    /// cassette cannot be written.
    pub fn finish_shared(shared: SharedRecorder) -> Result<PathBuf, String> {
        let recorder = Arc::try_unwrap(shared)
            .map_err(|_| "Recording adapters still hold the recorder".to_string())?
            .into_inner()
            .map_err(|e| format!("Recorder lock poisoned: {e}"))?;
        let path = recorder.path.clone();
        recorder.finish().map_err(|e| format!("Failed to write cassette {}: {e}", path.display()))
    }
}

/// Current git commit hash, or "unknown" with a warning if unavailable.
fn commit_hash() -> String {
    let hash = std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string());

    hash.unwrap_or_else(|| {
        warn!("could not get git commit hash, recording 'unknown'");
        "unknown".to_string()
    })
}
