//! Classification of a directory comparison report into added, updated and
//! deleted relative paths.

pub mod blacklist;
pub mod line;

use serde::{Deserialize, Serialize};
use tracing::trace;

pub use blacklist::{Blacklist, DEFAULT_BLACKLIST};

/// Paths that changed between two directory trees, relative to their roots.
///
/// Each list is sorted lexicographically, deduplicated and free of
/// blacklisted entries. A path may appear in more than one list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    /// Paths present only under the new root.
    pub files_added: Vec<String>,
    /// Paths present under both roots with differing contents.
    pub files_updated: Vec<String>,
    /// Paths present only under the old root.
    pub files_deleted: Vec<String>,
}

impl DiffResult {
    /// Returns `true` if no category holds a path.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files_added.is_empty()
            && self.files_updated.is_empty()
            && self.files_deleted.is_empty()
    }

    /// Total number of paths across all categories.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files_added.len() + self.files_updated.len() + self.files_deleted.len()
    }
}

/// Classify every line of a comparison report.
///
/// `old_root` and `new_root` must be the exact strings the comparison was
/// run with. Lines matching none of the difference shapes are skipped.
#[must_use]
pub fn classify(
    report: &str,
    old_root: &str,
    new_root: &str,
    blacklist: &Blacklist,
) -> DiffResult {
    let mut added = Vec::new();
    let mut updated = Vec::new();
    let mut deleted = Vec::new();

    for report_line in report.lines().filter(|l| !l.is_empty()) {
        let mut recognized = false;

        if let Some(entry) = line::only_in(report_line, old_root) {
            deleted.push(entry.relative_path());
            recognized = true;
        }
        if let Some(entry) = line::only_in(report_line, new_root) {
            added.push(entry.relative_path());
            recognized = true;
        }
        if let Some(pair) = line::files_differ(report_line, old_root, new_root) {
            updated.push(line::relative_to(pair.old_path, old_root));
            recognized = true;
        }

        if !recognized {
            trace!(line = report_line, "skipping unrecognized report line");
        }
    }

    DiffResult {
        files_added: finish(added, blacklist),
        files_updated: finish(updated, blacklist),
        files_deleted: finish(deleted, blacklist),
    }
}

/// Returns the first difference line that names neither root, if any.
///
/// An `Only in` line must be anchored on one of the roots; a `Files` line
/// must start with `old_root`.
#[must_use]
pub fn first_foreign_line<'a>(
    report: &'a str,
    old_root: &str,
    new_root: &str,
) -> Option<&'a str> {
    report.lines().filter(|l| line::is_difference_line(l)).find(|l| {
        let anchored = line::only_in(l, old_root).is_some()
            || line::only_in(l, new_root).is_some()
            || line::files_differ(l, old_root, new_root)
                .is_some_and(|pair| pair.old_path.starts_with(old_root));
        !anchored
    })
}

fn finish(mut paths: Vec<String>, blacklist: &Blacklist) -> Vec<String> {
    paths.retain(|p| !blacklist.contains(p));
    paths.sort();
    paths.dedup();
    paths
}
