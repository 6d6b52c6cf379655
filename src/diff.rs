//! Entry point: compare two directories and classify the differences.

use tracing::{info, warn};

use crate::classify::{self, DiffResult};
use crate::compare::{self, ComparisonOutcome};
use crate::config::DiffOptions;
use crate::context::ServiceContext;
use crate::error::DiffError;
use crate::progress::Progress;

/// Compute the added, updated and deleted paths between `old_root` and `new_root`.
///
/// Both roots are passed to the comparison verbatim and then used as literal
/// prefixes when classifying its report.
///
/// # Errors
///
/// Returns [`DiffError::UpstreamExecution`] if the comparison fails for a
/// reason other than finding differences (missing directory, permission
/// denied), and [`DiffError::RootNotObserved`] if `options.validate_roots`
/// is set and the report names other roots.
pub fn diff_directories(
    ctx: &ServiceContext,
    old_root: &str,
    new_root: &str,
    options: &DiffOptions,
) -> Result<DiffResult, DiffError> {
    let progress = Progress::new(options.quiet);

    progress.start("Diffing directories");
    let report = match compare::compare_directories(ctx.shell.as_ref(), old_root, new_root) {
        ComparisonOutcome::NoDifferences => None,
        ComparisonOutcome::DifferencesFound(report) => Some(report),
        ComparisonOutcome::ExecutionFailed(cause) => {
            progress.failed();
            warn!(%cause, old_root, new_root, "directory comparison failed");
            return Err(DiffError::UpstreamExecution {
                command: compare::describe_command(old_root, new_root),
                cause,
            });
        }
    };
    progress.done();

    progress.start("Parsing diff results");
    let result = match report {
        None => DiffResult::default(),
        Some(report) => {
            if options.validate_roots {
                if let Some(line) = classify::first_foreign_line(&report, old_root, new_root) {
                    progress.failed();
                    return Err(DiffError::RootNotObserved { line: line.to_string() });
                }
            }
            classify::classify(&report, old_root, new_root, &options.blacklist)
        }
    };
    progress.done();

    info!(
        added = result.files_added.len(),
        updated = result.files_updated.len(),
        deleted = result.files_deleted.len(),
        "classified directory differences"
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Blacklist;
    use crate::compare::ExecutionFailure;
    use crate::ports::filesystem::FileSystem;
    use crate::ports::shell::{ShellExecutor, ShellOutput};

    struct CannedShell {
        exit_code: i32,
        stdout: &'static str,
        stderr: &'static str,
    }

    impl ShellExecutor for CannedShell {
        fn run(
            &self,
            command: &str,
        ) -> Result<ShellOutput, Box<dyn std::error::Error + Send + Sync>> {
            assert!(command.contains("diff -q -r"));
            Ok(ShellOutput {
                exit_code: self.exit_code,
                stdout: self.stdout.to_string(),
                stderr: self.stderr.to_string(),
            })
        }
    }

    struct NoFs;

    impl FileSystem for NoFs {
        fn read_to_string(
            &self,
            _path: &std::path::Path,
        ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
            Err("unused".into())
        }

        fn exists(&self, _path: &std::path::Path) -> bool {
            false
        }
    }

    fn ctx(exit_code: i32, stdout: &'static str, stderr: &'static str) -> ServiceContext {
        ServiceContext {
            shell: Box::new(CannedShell { exit_code, stdout, stderr }),
            fs: Box::new(NoFs),
        }
    }

    fn quiet() -> DiffOptions {
        DiffOptions { quiet: true, ..DiffOptions::default() }
    }

    #[test]
    fn no_differences_is_empty() {
        let result = diff_directories(&ctx(0, "", ""), "old", "new", &quiet()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn differences_are_classified() {
        let report =
            "Only in new: a.txt\nOnly in old: b.txt\nFiles old/c.txt and new/c.txt differ\n";
        let result = diff_directories(&ctx(1, report, ""), "old", "new", &quiet()).unwrap();
        assert_eq!(result.files_added, vec!["a.txt"]);
        assert_eq!(result.files_deleted, vec!["b.txt"]);
        assert_eq!(result.files_updated, vec!["c.txt"]);
    }

    #[test]
    fn failure_status_is_upstream_error() {
        let err = diff_directories(
            &ctx(2, "", "diff: old: No such file or directory\n"),
            "old",
            "new",
            &quiet(),
        )
        .unwrap_err();
        match err {
            DiffError::UpstreamExecution { command, cause } => {
                assert!(command.ends_with("diff -q -r old new"));
                assert!(cause.to_string().contains("No such file or directory"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn unquotable_root_is_upstream_error() {
        let err = diff_directories(&ctx(1, "", ""), "old\0", "new", &quiet()).unwrap_err();
        assert!(matches!(
            err,
            DiffError::UpstreamExecution { cause: ExecutionFailure::Quote(_), .. }
        ));
    }

    #[test]
    fn validate_roots_accepts_roots_containing_and() {
        let options = DiffOptions { validate_roots: true, ..quiet() };
        let report = "Files salt and pepper/a.txt and new/a.txt differ\n";
        let result = diff_directories(&ctx(1, report, ""), "salt and pepper", "new", &options)
            .unwrap();
        assert_eq!(result.files_updated, vec!["a.txt"]);
    }

    #[test]
    fn validate_roots_rejects_foreign_report() {
        let options = DiffOptions { validate_roots: true, ..quiet() };
        let err = diff_directories(&ctx(1, "Only in other: a.txt\n", ""), "old", "new", &options)
            .unwrap_err();
        assert!(
            matches!(err, DiffError::RootNotObserved { line } if line == "Only in other: a.txt")
        );
    }

    #[test]
    fn foreign_report_without_validation_is_silently_empty() {
        let shell = ctx(1, "Only in other: a.txt\n", "");
        let result = diff_directories(&shell, "old", "new", &quiet()).unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn blacklist_option_applies() {
        let options = DiffOptions { blacklist: Blacklist::new(["a.txt"]), ..quiet() };
        let shell = ctx(1, "Only in new: a.txt\nOnly in new: b.txt\n", "");
        let result = diff_directories(&shell, "old", "new", &options).unwrap();
        assert_eq!(result.files_added, vec!["b.txt"]);
    }
}
