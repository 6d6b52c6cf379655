//! `builddiff diff` command.

use crate::classify::DiffResult;
use crate::cli::{DiffArgs, OutputFormat};
use crate::context::ServiceContext;
use crate::diff::diff_directories;

/// Execute the `diff` command.
///
/// # Errors
///
/// Returns an error string if configuration, the comparison, or rendering fails.
pub fn run(ctx: &ServiceContext, args: &DiffArgs) -> Result<(), String> {
    let options = super::resolve_options(ctx, &args.config, args.quiet, args.validate_roots)?;
    let result =
        diff_directories(ctx, &args.old, &args.new, &options).map_err(|e| e.to_string())?;
    println!("{}", render(&result, args.format)?);
    Ok(())
}

/// Render a result in the requested format.
///
/// # Errors
///
/// Returns an error string if serialization fails.
pub fn render(result: &DiffResult, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Text => Ok(format_text(result)),
        OutputFormat::Json => serde_json::to_string_pretty(result)
            .map_err(|e| format!("failed to serialize result as JSON: {e}")),
        OutputFormat::Yaml => serde_yaml::to_string(result)
            .map(|yaml| yaml.trim_end().to_string())
            .map_err(|e| format!("failed to serialize result as YAML: {e}")),
    }
}

/// Format a `DiffResult` for human-readable display.
#[must_use]
pub fn format_text(result: &DiffResult) -> String {
    if result.is_empty() {
        return "No differences.".to_string();
    }

    let sections = [
        ("Added", "+", &result.files_added),
        ("Updated", "~", &result.files_updated),
        ("Deleted", "-", &result.files_deleted),
    ];

    let mut lines = Vec::new();
    for (title, marker, paths) in sections {
        if paths.is_empty() {
            continue;
        }
        lines.push(format!("{title}:"));
        lines.extend(paths.iter().map(|p| format!("  {marker} {p}")));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::recorder::CassetteRecorder;
    use crate::cli::ConfigArgs;
    use serde_json::json;

    fn sample() -> DiffResult {
        DiffResult {
            files_added: vec!["a.txt".into()],
            files_updated: vec![],
            files_deleted: vec!["b.txt".into(), "c.txt".into()],
        }
    }

    #[test]
    fn format_text_no_changes() {
        assert_eq!(format_text(&DiffResult::default()), "No differences.");
    }

    #[test]
    fn format_text_lists_nonempty_sections() {
        assert_eq!(format_text(&sample()), "Added:\n  + a.txt\nDeleted:\n  - b.txt\n  - c.txt");
    }

    #[test]
    fn render_json_uses_camel_case() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["filesDeleted"], json!(["b.txt", "c.txt"]));
    }

    #[test]
    fn render_yaml_parses_back() {
        let yaml = render(&sample(), OutputFormat::Yaml).unwrap();
        let parsed: DiffResult = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn run_replays_recorded_comparison() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("diff.cassette.yaml");
        let mut recorder = CassetteRecorder::new(&path, "cli-diff", "abc123");
        recorder.record("fs", "exists", json!({"path": ".builddiff.yaml"}), json!(false));
        recorder.record(
            "shell",
            "run",
            json!({"command": "LC_ALL=C diff -q -r /b/old /b/new"}),
            json!({"ok": {"exit_code": 1, "stdout": "Only in /b/new: a.txt\n", "stderr": ""}}),
        );
        recorder.finish().unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        let args = DiffArgs {
            old: "/b/old".into(),
            new: "/b/new".into(),
            format: OutputFormat::Json,
            quiet: true,
            validate_roots: true,
            config: ConfigArgs { config: None, ignore: vec![], no_default_blacklist: false },
        };
        assert!(run(&ctx, &args).is_ok());
    }
}
