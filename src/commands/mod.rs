//! Command dispatch and handlers.

pub mod blacklist;
pub mod diff;

use std::env;
use std::path::Path;

use crate::cassette::recorder::{CassetteRecorder, SharedRecorder};
use crate::cli::{Command, ConfigArgs};
use crate::config::{DiffConfig, DiffOptions, CONFIG_ENV_VAR};
use crate::context::ServiceContext;

/// Environment variable that turns on cassette recording.
pub const RECORD_ENV_VAR: &str = "BUILDDIFF_RECORD";

/// Dispatch a parsed command to its handler.
///
/// When `BUILDDIFF_RECORD` is set to a directory path, all port interactions
/// are recorded to a cassette file under that directory.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails, or if the
/// command succeeded but its recording could not be written.
pub fn dispatch(command: &Command) -> Result<(), String> {
    let (ctx, recorder) = if let Some(path) = env::var_os(RECORD_ENV_VAR) {
        let (ctx, recorder) = ServiceContext::recording_at(Path::new(&path))?;
        (ctx, Some(recorder))
    } else {
        (ServiceContext::live(), None)
    };

    let result = dispatch_with_context(command, &ctx);

    // Recording is written even when the command failed.
    if let Some(recorder) = recorder {
        drop(ctx);
        return command_error_first(result, finish_recording(recorder));
    }

    result
}

/// Dispatch a command with the given service context.
///
/// # Errors
///
/// Returns an error string if the selected command handler fails.
pub fn dispatch_with_context(command: &Command, ctx: &ServiceContext) -> Result<(), String> {
    match command {
        Command::Diff(args) => diff::run(ctx, args),
        Command::Blacklist(args) => blacklist::run(ctx, &args.config),
    }
}

/// Load the config file and apply command-line overrides.
fn resolve_config(ctx: &ServiceContext, args: &ConfigArgs) -> Result<DiffConfig, String> {
    let mut config =
        DiffConfig::discover(ctx.fs.as_ref(), args.config.as_deref(), env::var_os(CONFIG_ENV_VAR))
            .map_err(|e| e.to_string())?;
    if args.no_default_blacklist && config.blacklist.is_none() {
        config.blacklist = Some(Vec::new());
    }
    config.ignore.extend(args.ignore.iter().cloned());
    Ok(config)
}

/// Resolve the options for a diff run.
fn resolve_options(
    ctx: &ServiceContext,
    args: &ConfigArgs,
    quiet: bool,
    validate_roots: bool,
) -> Result<DiffOptions, String> {
    let mut config = resolve_config(ctx, args)?;
    config.quiet |= quiet;
    config.validate_roots |= validate_roots;
    Ok(config.into_options())
}

/// Combine a command result with its recording result.
///
/// A failed command reports its own error; a recording failure is then only
/// printed.
fn command_error_first(
    result: Result<(), String>,
    recorded: Result<(), String>,
) -> Result<(), String> {
    match (result, recorded) {
        (Err(command_err), Err(recording_err)) => {
            eprintln!("{recording_err}");
            Err(command_err)
        }
        (result, recorded) => result.and(recorded),
    }
}

/// Write the cassette and print where it went.
fn finish_recording(recorder: SharedRecorder) -> Result<(), String> {
    let path = CassetteRecorder::finish_shared(recorder)?;
    eprintln!("Recording saved to: {}", path.display());
    Ok(())
}
