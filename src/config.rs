//! Diff options and the optional YAML config file.
//!
//! ```yaml
//! # .builddiff.yaml
//! blacklist:        # replaces the built-in list when present
//!   - asset-manifest.json
//! ignore:           # added on top of the blacklist
//!   - version.txt
//! quiet: false
//! validate_roots: true
//! ```

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::classify::Blacklist;
use crate::error::DiffError;
use crate::ports::filesystem::FileSystem;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "BUILDDIFF_CONFIG";

/// Config file picked up from the working directory when nothing else is given.
pub const DEFAULT_CONFIG_FILE: &str = ".builddiff.yaml";

/// Options for a single [`diff_directories`](crate::diff::diff_directories) call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffOptions {
    /// Relative paths excluded from every category.
    pub blacklist: Blacklist,
    /// Suppress progress output. Does not affect the result.
    pub quiet: bool,
    /// Fail when a difference line names neither root.
    pub validate_roots: bool,
}

/// On-disk configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DiffConfig {
    /// Replacement for the built-in blacklist.
    pub blacklist: Option<Vec<String>>,
    /// Extra paths added to the blacklist.
    pub ignore: Vec<String>,
    /// Suppress progress output.
    pub quiet: bool,
    /// Fail when a difference line names neither root.
    pub validate_roots: bool,
}

impl DiffConfig {
    /// Read and parse a config file.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::Config`] if the file cannot be read or parsed.
    pub fn load(fs: &dyn FileSystem, path: &Path) -> Result<Self, DiffError> {
        let config_error =
            |message: String| DiffError::Config { path: path.to_path_buf(), message };

        let content = fs.read_to_string(path).map_err(|e| config_error(e.to_string()))?;
        let config = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(&content).map_err(|e| config_error(e.to_string()))?
        };
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Locate and load the config file, falling back to defaults.
    ///
    /// Lookup order: `explicit`, then `env_path` (the value of
    /// [`CONFIG_ENV_VAR`]), then [`DEFAULT_CONFIG_FILE`] if it exists.
    ///
    /// # Errors
    ///
    /// Returns [`DiffError::Config`] if a located file cannot be loaded.
    pub fn discover(
        fs: &dyn FileSystem,
        explicit: Option<&Path>,
        env_path: Option<OsString>,
    ) -> Result<Self, DiffError> {
        if let Some(path) = explicit {
            return Self::load(fs, path);
        }
        if let Some(path) = env_path.filter(|p| !p.is_empty()) {
            return Self::load(fs, &PathBuf::from(path));
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fs.exists(fallback) {
            return Self::load(fs, fallback);
        }
        Ok(Self::default())
    }

    /// Resolve into the options passed to the diff entry point.
    #[must_use]
    pub fn into_options(self) -> DiffOptions {
        let base = match self.blacklist {
            Some(paths) => Blacklist::new(paths),
            None => Blacklist::default(),
        };
        DiffOptions {
            blacklist: base.with(self.ignore),
            quiet: self.quiet,
            validate_roots: self.validate_roots,
        }
    }
}
