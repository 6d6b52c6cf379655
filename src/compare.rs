//! Recursive directory comparison through the shell port.
//!
//! Runs `diff -q -r` and turns its exit status into a [`ComparisonOutcome`].
//! `diff` exits with 1 when it finds differences, so only other non-zero
//! statuses count as failures.

use std::fmt;

use shlex::{try_join, QuoteError};
use tracing::debug;

use crate::ports::shell::ShellExecutor;

/// Exit status `diff` uses to signal that differences were found.
const DIFFERENCES_FOUND: i32 = 1;

/// Result of running the directory comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ComparisonOutcome {
    /// Both trees are identical.
    NoDifferences,
    /// The trees differ; carries the full report.
    DifferencesFound(String),
    /// The comparison could not run to completion.
    ExecutionFailed(ExecutionFailure),
}

/// Why a comparison did not produce a report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionFailure {
    /// A root cannot be expressed as a shell word.
    Quote(String),
    /// The process could not be started.
    Spawn(String),
    /// The process exited with an unexpected status.
    Exit {
        /// Exit status reported by the shell.
        code: i32,
        /// Captured standard error, trimmed.
        stderr: String,
    },
}

impl fmt::Display for ExecutionFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quote(message) => write!(f, "cannot quote root: {message}"),
            Self::Spawn(message) => write!(f, "could not start: {message}"),
            Self::Exit { code, stderr } if stderr.is_empty() => write!(f, "exit status {code}"),
            Self::Exit { code, stderr } => write!(f, "exit status {code}: {stderr}"),
        }
    }
}

/// Build the shell command comparing `old_root` with `new_root`.
///
/// `LC_ALL=C` pins the report wording to the untranslated line shapes.
///
/// # Errors
///
/// Returns [`QuoteError`] if a root cannot be quoted, e.g. it holds a NUL byte.
pub fn comparison_command(old_root: &str, new_root: &str) -> Result<String, QuoteError> {
    let words = try_join(["diff", "-q", "-r", old_root, new_root])?;
    Ok(format!("LC_ALL=C {words}"))
}

/// The comparison command for messages, unquoted if quoting fails.
#[must_use]
pub fn describe_command(old_root: &str, new_root: &str) -> String {
    comparison_command(old_root, new_root)
        .unwrap_or_else(|_| format!("LC_ALL=C diff -q -r {old_root} {new_root}"))
}

/// Compare two directory trees and classify the process result.
pub fn compare_directories(
    shell: &dyn ShellExecutor,
    old_root: &str,
    new_root: &str,
) -> ComparisonOutcome {
    let command = match comparison_command(old_root, new_root) {
        Ok(command) => command,
        Err(e) => return ComparisonOutcome::ExecutionFailed(ExecutionFailure::Quote(e.to_string())),
    };
    debug!(%command, "running directory comparison");

    let output = match shell.run(&command) {
        Ok(output) => output,
        Err(e) => return ComparisonOutcome::ExecutionFailed(ExecutionFailure::Spawn(e.to_string())),
    };

    debug!(exit_code = output.exit_code, bytes = output.stdout.len(), "comparison finished");
    match output.exit_code {
        0 => ComparisonOutcome::NoDifferences,
        DIFFERENCES_FOUND => ComparisonOutcome::DifferencesFound(output.stdout),
        code => ComparisonOutcome::ExecutionFailed(ExecutionFailure::Exit {
            code,
            stderr: output.stderr.trim().to_string(),
        }),
    }
}
