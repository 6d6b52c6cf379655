//! Error types for directory diffing.

use std::path::PathBuf;

use crate::compare::ExecutionFailure;

/// Errors that can occur while diffing two directories.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// The comparison process failed for a reason other than finding differences.
    #[error("directory comparison `{command}` failed: {cause}")]
    UpstreamExecution {
        /// Command line handed to the shell.
        command: String,
        /// Why the comparison did not produce a report.
        cause: ExecutionFailure,
    },

    /// A difference line names neither of the supplied roots.
    #[error("comparison report does not match the supplied roots: {line:?}")]
    RootNotObserved {
        /// The first offending report line.
        line: String,
    },

    /// The config file could not be read or parsed.
    #[error("invalid config {}: {message}", path.display())]
    Config {
        /// Path of the config file.
        path: PathBuf,
        /// Underlying read or parse error.
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upstream_error_names_command_and_cause() {
        let err = DiffError::UpstreamExecution {
            command: "LC_ALL=C diff -q -r a b".into(),
            cause: ExecutionFailure::Exit {
                code: 2,
                stderr: "diff: a: No such file or directory".into(),
            },
        };
        let msg = err.to_string();
        assert!(msg.contains("LC_ALL=C diff -q -r a b"));
        assert!(msg.contains("exit status 2"));
        assert!(msg.contains("No such file or directory"));
    }

    #[test]
    fn config_error_names_path() {
        let err =
            DiffError::Config { path: PathBuf::from("/x/.builddiff.yaml"), message: "bad".into() };
        assert_eq!(err.to_string(), "invalid config /x/.builddiff.yaml: bad");
    }
}
