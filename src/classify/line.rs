//! Line shapes emitted by a brief recursive directory comparison.
//!
//! Three shapes carry a difference:
//!
//! ```text
//! Only in <old_root>/sub: deleted.txt
//! Only in <new_root>/sub: added.txt
//! Files <old_root>/sub/a.txt and <new_root>/sub/a.txt differ
//! ```
//!
//! Roots are matched as literal prefixes. The keywords and the `Only in`
//! roots compare ASCII case-insensitively.

use std::path::{is_separator, MAIN_SEPARATOR};

const ONLY_IN: &str = "Only in ";
const FILES: &str = "Files ";
const AND: &str = " and ";
const DIFFER: &str = " differ";
const NAME_DELIMITER: &str = ": ";

/// An `Only in <root><subdir>: <name>` line split into its parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OnlyIn<'a> {
    /// Text between the root and the colon, leading separators trimmed.
    pub subdir: &'a str,
    /// Entry name after the colon.
    pub name: &'a str,
}

impl OnlyIn<'_> {
    /// Joins the subdirectory and name into a root-relative path.
    #[must_use]
    pub fn relative_path(&self) -> String {
        if self.subdir.is_empty() {
            self.name.to_string()
        } else {
            format!("{}{MAIN_SEPARATOR}{}", self.subdir, self.name)
        }
    }
}

/// Matches an `Only in` line anchored on `root`.
///
/// The root must end at a path boundary: `build` does not claim
/// `Only in build-new: x`.
#[must_use]
pub fn only_in<'a>(line: &'a str, root: &str) -> Option<OnlyIn<'a>> {
    let rest = strip_prefix_ignore_case(line, ONLY_IN)?;
    let rest = strip_prefix_ignore_case(rest, root)?;
    let split = rest.find(NAME_DELIMITER)?;
    let (subdir, name) = (&rest[..split], &rest[split + NAME_DELIMITER.len()..]);

    let at_boundary =
        subdir.is_empty() || subdir.starts_with(is_separator) || root.ends_with(is_separator);
    if !at_boundary || name.is_empty() {
        return None;
    }

    Some(OnlyIn { subdir: trim_leading_separators(subdir), name })
}

/// A `Files <old_path> and <new_path> differ` line split into its paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilesDiffer<'a> {
    /// Path under the old root.
    pub old_path: &'a str,
    /// Path under the new root.
    pub new_path: &'a str,
}

/// Matches a `Files <path1> and <path2> differ` line.
///
/// Paths may themselves contain ` and `, so the split is anchored on the
/// roots: `path1` starts with `old_root` and `path2` with `new_root`, and the
/// split whose remainders agree wins. Without anchors the line is cut at the
/// first ` and `.
#[must_use]
pub fn files_differ<'a>(line: &'a str, old_root: &str, new_root: &str) -> Option<FilesDiffer<'a>> {
    let body = files_body(line)?;
    let split = anchored_split(body, old_root, new_root).or_else(|| find_ignore_case(body, AND))?;
    Some(FilesDiffer { old_path: &body[..split], new_path: &body[split + AND.len()..] })
}

/// Strips `old_root` from the front of `path` and trims leading separators.
///
/// Only the old side of an updated pair is used; the remainder is assumed
/// identical on the new side.
#[must_use]
pub fn relative_to(path: &str, old_root: &str) -> String {
    trim_leading_separators(path.strip_prefix(old_root).unwrap_or(path)).to_string()
}

/// Returns `true` if the line has the outline of a difference line,
/// regardless of which roots it names.
#[must_use]
pub fn is_difference_line(line: &str) -> bool {
    strip_prefix_ignore_case(line, ONLY_IN).is_some_and(|rest| rest.contains(NAME_DELIMITER))
        || files_body(line).is_some_and(|body| find_ignore_case(body, AND).is_some())
}

/// Text between `Files ` and ` differ`.
fn files_body(line: &str) -> Option<&str> {
    strip_suffix_ignore_case(strip_prefix_ignore_case(line, FILES)?, DIFFER)
}

/// Offset of the ` and <new_root>` separator in `body`, if `body` starts
/// with `old_root`.
fn anchored_split(body: &str, old_root: &str, new_root: &str) -> Option<usize> {
    let start = body.len() - strip_prefix_ignore_case(body, old_root)?.len();
    let mut first = None;

    for split in (start..body.len()).filter(|&i| body.is_char_boundary(i)) {
        let Some(new_rest) = strip_prefix_ignore_case(&body[split..], AND)
            .and_then(|path| strip_prefix_ignore_case(path, new_root))
        else {
            continue;
        };
        if new_rest == &body[start..split] {
            return Some(split);
        }
        first.get_or_insert(split);
    }
    first
}

fn trim_leading_separators(path: &str) -> &str {
    path.trim_start_matches(is_separator)
}

fn strip_prefix_ignore_case<'a>(s: &'a str, prefix: &str) -> Option<&'a str> {
    let head = s.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &s[prefix.len()..])
}

fn strip_suffix_ignore_case<'a>(s: &'a str, suffix: &str) -> Option<&'a str> {
    let split = s.len().checked_sub(suffix.len())?;
    let tail = s.get(split..)?;
    tail.eq_ignore_ascii_case(suffix).then(|| &s[..split])
}

fn find_ignore_case(haystack: &str, needle: &str) -> Option<usize> {
    haystack.char_indices().map(|(i, _)| i).find(|&i| {
        haystack.get(i..i + needle.len()).is_some_and(|window| window.eq_ignore_ascii_case(needle))
    })
}
