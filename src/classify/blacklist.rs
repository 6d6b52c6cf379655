//! Relative paths excluded from every result category.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Conventionally ignorable build artifacts and OS metadata files.
pub const DEFAULT_BLACKLIST: &[&str] = &[
    ".DS_Store",
    "Thumbs.db",
    "asset-manifest.json",
    "desktop.ini",
    "service-worker.js",
];

/// Immutable set of relative paths to drop from a [`DiffResult`](super::DiffResult).
///
/// Matching is exact: no globs and no prefix matching, so `.DS_Store` does
/// not exclude `assets/.DS_Store`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Blacklist {
    paths: BTreeSet<String>,
}

impl Blacklist {
    /// Creates a blacklist from the given relative paths.
    pub fn new<I, S>(paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { paths: paths.into_iter().map(Into::into).collect() }
    }

    /// Creates a blacklist that excludes nothing.
    #[must_use]
    pub fn empty() -> Self {
        Self { paths: BTreeSet::new() }
    }

    /// Returns a copy with `extra` paths added.
    #[must_use]
    pub fn with<I, S>(mut self, extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.paths.extend(extra.into_iter().map(Into::into));
        self
    }

    /// Returns `true` if `path` is excluded.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Iterates the excluded paths in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }

    /// Number of excluded paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

impl Default for Blacklist {
    fn default() -> Self {
        Self::new(DEFAULT_BLACKLIST.iter().copied())
    }
}
