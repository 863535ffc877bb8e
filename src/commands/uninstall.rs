//! Uninstall command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::UninstallArgs;
use crate::error::Result;

use super::Context;

/// Run uninstall command
pub fn run(root: Option<PathBuf>, verbose: bool, args: UninstallArgs) -> Result<()> {
    let ctx = Context::open(root, verbose)?;
    let options = ctx.run_options(&args.hooks);

    let id = ctx.rollout.uninstall(&args.target, &options)?;

    println!("{} {}", Style::new().green().bold().apply_to("Uninstalled"), id);
    Ok(())
}
