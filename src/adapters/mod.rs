//! Port implementations: live, recording and replaying.
//!
//! Recording and replaying adapters key every call by the same JSON input,
//! built here, so a replay answers only the calls that were recorded.

pub mod live;
pub mod recording;
pub mod replaying;

use std::path::Path;

use serde_json::{json, Value};

/// Cassette input for `shell::run`.
pub(crate) fn command_input(command: &str) -> Value {
    json!({ "command": command })
}

/// Cassette input for `fs` calls.
pub(crate) fn path_input(path: &Path) -> Value {
    json!({ "path": path.display().to_string() })
}
