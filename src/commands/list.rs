//! List command implementation

use std::path::PathBuf;

use crate::cli::ListArgs;
use crate::error::Result;
use crate::ui::display::print_list;

use super::Context;

/// Run list command
pub fn run(root: Option<PathBuf>, verbose: bool, args: ListArgs) -> Result<()> {
    let ctx = Context::open(root, verbose)?;
    print_list(&ctx.rollout.list()?, args.info);
    Ok(())
}
