//! Serves recorded interactions back, matched on the exact call.

use std::collections::{HashMap, VecDeque};
use std::path::Path;

use super::format::{Cassette, Interaction};

/// `(port, method, input as JSON text)`.
type CallKey = (String, String, String);

/// Replays interactions from a loaded cassette.
///
/// A call is answered only by an interaction recorded with the same port,
/// method and input, so a replayed comparison must run the exact `diff`
/// command that was recorded. Repeated identical calls are served in
/// recording order.
#[derive(Debug)]
pub struct CassetteReplayer {
    pending: HashMap<CallKey, VecDeque<Interaction>>,
}

impl CassetteReplayer {
    /// Create a new replayer from a loaded cassette.
    #[must_use]
    pub fn new(cassette: &Cassette) -> Self {
        let mut pending: HashMap<CallKey, VecDeque<Interaction>> = HashMap::new();
        for interaction in &cassette.interactions {
            pending
                .entry(call_key(&interaction.port, &interaction.method, &interaction.input))
                .or_default()
                .push_back(interaction.clone());
        }
        Self { pending }
    }

    /// Read and parse a cassette file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;
        Ok(Self::new(&cassette))
    }

    /// Take the next interaction recorded for this exact call.
    ///
    /// # Panics
    ///
    /// Panics if no unconsumed interaction matches, listing the inputs the
    /// cassette holds for the same port and method.
    pub fn next_interaction(
        &mut self,
        port: &str,
        method: &str,
        input: &serde_json::Value,
    ) -> Interaction {
        let key = call_key(port, method, input);
        if let Some(interaction) = self.pending.get_mut(&key).and_then(VecDeque::pop_front) {
            return interaction;
        }

        let mut recorded: Vec<&str> = self
            .pending
            .iter()
            .filter(|((p, m, _), queue)| p == port && m == method && !queue.is_empty())
            .map(|((_, _, i), _)| i.as_str())
            .collect();
        recorded.sort_unstable();
        panic!(
            "Cassette exhausted: no recorded {port}::{method} call with input {}. \
             Remaining inputs: [{}]",
            key.2,
            recorded.join(", ")
        );
    }
}

fn call_key(port: &str, method: &str, input: &serde_json::Value) -> CallKey {
    (port.to_string(), method.to_string(), input.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn make_cassette(interactions: Vec<Interaction>) -> Cassette {
        Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            commit: "abc".into(),
            interactions,
        }
    }

    fn diff_run(seq: u64, command: &str, stdout: &str) -> Interaction {
        Interaction {
            seq,
            port: "shell".into(),
            method: "run".into(),
            input: json!({ "command": command }),
            output: json!({"ok": {"exit_code": 1, "stdout": stdout, "stderr": ""}}),
        }
    }

    #[test]
    fn matches_calls_by_input() {
        let cassette = make_cassette(vec![
            diff_run(0, "LC_ALL=C diff -q -r a b", "first"),
            Interaction {
                seq: 1,
                port: "fs".into(),
                method: "exists".into(),
                input: json!({"path": ".builddiff.yaml"}),
                output: json!(true),
            },
            diff_run(2, "LC_ALL=C diff -q -r c d", "second"),
        ]);

        let mut replayer = CassetteReplayer::new(&cassette);

        let second = replayer.next_interaction(
            "shell",
            "run",
            &json!({"command": "LC_ALL=C diff -q -r c d"}),
        );
        assert_eq!(second.output["ok"]["stdout"], "second");

        let exists = replayer.next_interaction("fs", "exists", &json!({"path": ".builddiff.yaml"}));
        assert_eq!(exists.output, json!(true));

        let first = replayer.next_interaction(
            "shell",
            "run",
            &json!({"command": "LC_ALL=C diff -q -r a b"}),
        );
        assert_eq!(first.seq, 0);
    }

    #[test]
    fn repeated_calls_are_served_in_order() {
        let command = "LC_ALL=C diff -q -r a b";
        let cassette =
            make_cassette(vec![diff_run(0, command, "first"), diff_run(1, command, "second")]);

        let mut replayer = CassetteReplayer::new(&cassette);
        let input = json!({ "command": command });
        assert_eq!(replayer.next_interaction("shell", "run", &input).seq, 0);
        assert_eq!(replayer.next_interaction("shell", "run", &input).seq, 1);
    }

    #[test]
    #[should_panic(expected = "Remaining inputs: [{\"command\":\"LC_ALL=C diff -q -r a b\"}]")]
    fn other_command_panics_naming_recorded_one() {
        let cassette = make_cassette(vec![diff_run(0, "LC_ALL=C diff -q -r a b", "")]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let _ = replayer.next_interaction("shell", "run", &json!({"command": "diff x y"}));
    }

    #[test]
    #[should_panic(expected = "Cassette exhausted")]
    fn consumed_call_panics() {
        let cassette = make_cassette(vec![diff_run(0, "c", "")]);
        let mut replayer = CassetteReplayer::new(&cassette);
        let input = json!({"command": "c"});
        let _ = replayer.next_interaction("shell", "run", &input);
        let _ = replayer.next_interaction("shell", "run", &input);
    }

    #[test]
    fn load_reports_missing_file() {
        let err = CassetteReplayer::load(Path::new("/nonexistent/x.cassette.yaml")).unwrap_err();
        assert!(err.contains("Failed to read cassette file"));
    }
}
