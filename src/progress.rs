//! Progress lines for interactive runs.

use std::io::Write;

use colored::Colorize;
use tracing::debug;

/// Writes `Step... Done` progress lines to stderr unless quiet.
///
/// Every step is also emitted as a `tracing` event, quiet or not.
#[derive(Debug, Clone, Copy)]
pub struct Progress {
    quiet: bool,
}

impl Progress {
    /// Creates a reporter; `quiet` suppresses terminal output.
    #[must_use]
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    /// Announce the start of a step.
    pub fn start(&self, step: &str) {
        debug!(step, "started");
        if !self.quiet {
            let mut stderr = std::io::stderr().lock();
            let _ = write!(stderr, "{} ", format!("{step}...").yellow());
            let _ = stderr.flush();
        }
    }

    /// Mark the current step as finished.
    pub fn done(&self) {
        if !self.quiet {
            eprintln!("{}", "Done".green());
        }
    }

    /// Mark the current step as failed.
    pub fn failed(&self) {
        debug!("step failed");
        if !self.quiet {
            eprintln!("{}", "Failed".red());
        }
    }
}
