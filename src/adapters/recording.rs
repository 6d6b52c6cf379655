//! Adapters that delegate to a live port and append each call to a cassette.

use std::path::Path;

use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use super::{command_input, path_input};
use crate::cassette::recorder::SharedRecorder;
use crate::ports::{FileSystem, ShellExecutor, ShellOutput};

/// Records shell interactions while delegating to an inner implementation.
pub struct RecordingShellExecutor {
    inner: Box<dyn ShellExecutor>,
    recorder: SharedRecorder,
}

impl RecordingShellExecutor {
    /// Creates a new recording shell executor wrapping the given implementation.
    pub fn new(inner: Box<dyn ShellExecutor>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl ShellExecutor for RecordingShellExecutor {
    fn run(&self, command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.run(command);
        record(&self.recorder, "shell", "run", command_input(command), result_output(&result));
        result
    }
}

/// Records filesystem interactions while delegating to an inner implementation.
pub struct RecordingFileSystem {
    inner: Box<dyn FileSystem>,
    recorder: SharedRecorder,
}

impl RecordingFileSystem {
    /// Creates a new recording filesystem wrapping the given implementation.
    pub fn new(inner: Box<dyn FileSystem>, recorder: SharedRecorder) -> Self {
        Self { inner, recorder }
    }
}

impl FileSystem for RecordingFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let result = self.inner.read_to_string(path);
        record(&self.recorder, "fs", "read_to_string", path_input(path), result_output(&result));
        result
    }

    fn exists(&self, path: &Path) -> bool {
        let exists = self.inner.exists(path);
        record(&self.recorder, "fs", "exists", path_input(path), json!(exists));
        exists
    }
}

/// Encode a result as `{"ok": v}` or `{"err": message}`.
fn result_output<T: Serialize, E: std::fmt::Display>(result: &Result<T, E>) -> Value {
    match result {
        Ok(v) => match serde_json::to_value(v) {
            Ok(v) => json!({ "ok": v }),
            Err(e) => json!({ "err": format!("unrecordable output: {e}") }),
        },
        Err(e) => json!({ "err": e.to_string() }),
    }
}

fn record(recorder: &SharedRecorder, port: &str, method: &str, input: Value, output: Value) {
    match recorder.lock() {
        Ok(mut recorder) => recorder.record(port, method, input, output),
        Err(_) => warn!(port, method, "recorder lock poisoned, interaction not recorded"),
    }
}
