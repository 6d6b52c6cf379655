//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::filesystem::LiveFileSystem;
use crate::adapters::live::shell::LiveShellExecutor;
use crate::adapters::recording::{RecordingFileSystem, RecordingShellExecutor};
use crate::adapters::replaying::{ReplayingFileSystem, ReplayingShellExecutor};
use crate::cassette::recorder::{CassetteRecorder, SharedRecorder};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;
use crate::ports::shell::ShellExecutor;

/// Bundles the port trait objects into a single context.
///
/// Constructors wire up different adapter implementations (live, replaying,
/// recording).
pub struct ServiceContext {
    /// Shell executor running the directory comparison.
    pub shell: Box<dyn ShellExecutor>,
    /// Filesystem for reading config files.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a live context with real adapters.
    #[must_use]
    pub fn live() -> Self {
        Self { shell: Box::new(LiveShellExecutor), fs: Box::new(LiveFileSystem) }
    }

    /// Creates a live context whose port calls are recorded to a new
    /// cassette under `base_dir`.
    ///
    /// Drop the context before calling [`CassetteRecorder::finish_shared`].
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette directory cannot be created.
    pub fn recording_at(base_dir: &Path) -> Result<(Self, SharedRecorder), String> {
        let recorder: SharedRecorder = Arc::new(Mutex::new(CassetteRecorder::start(base_dir)?));
        let ctx = Self {
            shell: Box::new(RecordingShellExecutor::new(
                Box::new(LiveShellExecutor),
                Arc::clone(&recorder),
            )),
            fs: Box::new(RecordingFileSystem::new(Box::new(LiveFileSystem), Arc::clone(&recorder))),
        };
        Ok((ctx, recorder))
    }

    /// Creates a context answering every port call from a recorded cassette.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let replayer = Arc::new(Mutex::new(CassetteReplayer::load(path)?));
        Ok(Self {
            shell: Box::new(ReplayingShellExecutor::new(Arc::clone(&replayer))),
            fs: Box::new(ReplayingFileSystem::new(replayer)),
        })
    }
}
