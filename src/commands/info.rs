//! Info and current command implementations

use std::path::PathBuf;

use crate::cli::InfoArgs;
use crate::error::Result;
use crate::ui::display::print_info;

use super::Context;

/// Run info command
pub fn run(root: Option<PathBuf>, verbose: bool, args: InfoArgs) -> Result<()> {
    let ctx = Context::open(root, verbose)?;
    print_info(&ctx.rollout.info(args.target.as_deref())?);
    Ok(())
}

/// Run current command
///
/// Unlike `info` without a target, having no current version is not an error.
pub fn run_current(root: Option<PathBuf>, verbose: bool) -> Result<()> {
    let ctx = Context::open(root, verbose)?;
    match ctx.rollout.current()? {
        Some(current) => print_info(&current),
        None => println!("No version is currently in use."),
    }
    Ok(())
}
