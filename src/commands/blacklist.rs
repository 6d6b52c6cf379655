//! `builddiff blacklist` command.

use crate::cli::ConfigArgs;
use crate::context::ServiceContext;

/// Execute the `blacklist` command: print every excluded path, one per line.
///
/// # Errors
///
/// Returns an error string if the config file cannot be loaded.
pub fn run(ctx: &ServiceContext, args: &ConfigArgs) -> Result<(), String> {
    let blacklist = super::resolve_config(ctx, args)?.into_options().blacklist;
    if blacklist.is_empty() {
        println!("Blacklist is empty.");
    }
    for path in blacklist.iter() {
        println!("{path}");
    }
    Ok(())
}
