//! Adapters that answer port calls from a recorded cassette.

use std::path::Path;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{command_input, path_input};
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::{FileSystem, ShellExecutor, ShellOutput};

/// A replayer shared by the replaying adapters of one context.
pub type SharedReplayer = Arc<Mutex<CassetteReplayer>>;

/// Replays recorded shell command results from a cassette.
pub struct ReplayingShellExecutor {
    replayer: SharedReplayer,
}

impl ReplayingShellExecutor {
    /// Creates a new replaying shell executor.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }
}

impl ShellExecutor for ReplayingShellExecutor {
    fn run(&self, command: &str) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "shell", "run", &command_input(command));
        replay_result(output, "shell::run")
    }
}

/// Replays recorded filesystem operations from a cassette.
pub struct ReplayingFileSystem {
    replayer: SharedReplayer,
}

impl ReplayingFileSystem {
    /// Creates a new replaying filesystem.
    #[must_use]
    pub fn new(replayer: SharedReplayer) -> Self {
        Self { replayer }
    }
}

impl FileSystem for ReplayingFileSystem {
    fn read_to_string(
        &self,
        path: &Path,
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        let output = next_output(&self.replayer, "fs", "read_to_string", &path_input(path));
        replay_result(output, "fs::read_to_string")
    }

    fn exists(&self, path: &Path) -> bool {
        next_output(&self.replayer, "fs", "exists", &path_input(path))
            .as_bool()
            .expect("fs::exists: expected boolean output")
    }
}

fn next_output(replayer: &SharedReplayer, port: &str, method: &str, input: &Value) -> Value {
    let mut replayer = replayer.lock().expect("replayer lock poisoned");
    replayer.next_interaction(port, method, input).output
}

/// Decode a recorded `{"ok": v}` / `{"err": message}` output.
fn replay_result<T: DeserializeOwned>(
    output: Value,
    context: &str,
) -> Result<T, Box<dyn std::error::Error + Send + Sync>> {
    if let Some(err) = output.get("err") {
        return Err(err.as_str().unwrap_or("unknown error").into());
    }
    let value = match output {
        Value::Object(mut map) if map.contains_key("ok") => map.remove("ok").unwrap_or_default(),
        other => other,
    };
    serde_json::from_value(value)
        .map_err(|e| format!("{context}: failed to deserialize: {e}").into())
}
