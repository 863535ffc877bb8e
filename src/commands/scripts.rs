//! Scripts and run command implementations

use std::path::PathBuf;

use crate::cli::RunArgs;
use crate::error::{Result, RolloutError};
use crate::operations::RunOptions;
use crate::ui::display::print_scripts;

use super::Context;

/// Run scripts command
pub fn run_list(root: Option<PathBuf>, verbose: bool) -> Result<()> {
    let ctx = Context::open(root, verbose)?;
    let current = ctx.rollout.current()?.ok_or(RolloutError::NoCurrentVersion)?;
    print_scripts(&current.descriptor.scripts);
    Ok(())
}

/// Run run command
pub fn run(root: Option<PathBuf>, verbose: bool, args: RunArgs) -> Result<()> {
    let ctx = Context::open(root, verbose)?;
    // script output always goes to the terminal
    let options = RunOptions {
        verbose: true,
        ..RunOptions::default()
    };
    ctx.rollout.run_script(&args.script, &options)
}
