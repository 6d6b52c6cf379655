//! Classify the files added, updated and deleted between two directory trees.
//!
//! The comparison itself is delegated to `diff -q -r` through the
//! [`ShellExecutor`](ports::ShellExecutor) port; this crate turns its report
//! into a sorted, blacklist-filtered [`DiffResult`].
//!
//! ```no_run
//! use builddiff::{diff_directories, DiffOptions, ServiceContext};
//!
//! let ctx = ServiceContext::live();
//! let result = diff_directories(&ctx, "build-old", "build-new", &DiffOptions::default())?;
//! for path in &result.files_updated {
//!     println!("changed: {path}");
//! }
//! # Ok::<(), builddiff::DiffError>(())
//! ```

pub mod adapters;
pub mod cassette;
pub mod classify;
pub mod cli;
pub mod commands;
pub mod compare;
pub mod config;
pub mod context;
pub mod diff;
pub mod error;
pub mod ports;
pub mod progress;

pub use classify::{classify, Blacklist, DiffResult, DEFAULT_BLACKLIST};
pub use config::DiffOptions;
pub use context::ServiceContext;
pub use diff::diff_directories;
pub use error::DiffError;

use clap::error::ErrorKind;
use clap::Parser;

/// Run the CLI with the provided arguments.
///
/// # Errors
///
/// Returns an error string when argument parsing fails or command execution fails.
pub fn run<I, T>(args: I) -> Result<(), String>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = match cli::Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            print!("{err}");
            return Ok(());
        }
        Err(err) => return Err(err.to_string()),
    };
    commands::dispatch(&cli.command)
}
