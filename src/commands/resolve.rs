//! Resolve command implementation

use std::path::PathBuf;

use crate::cli::ResolveArgs;
use crate::error::Result;

use super::Context;

/// Run resolve command, printing the bare id for use in scripts
pub fn run(root: Option<PathBuf>, verbose: bool, args: ResolveArgs) -> Result<()> {
    let ctx = Context::open(root, verbose)?;
    println!("{}", ctx.rollout.resolve(&args.target)?);
    Ok(())
}
