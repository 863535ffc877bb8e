//! Use command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::UseArgs;
use crate::error::Result;
use crate::ui::display::version_line;

use super::Context;

/// Run use command
pub fn run(root: Option<PathBuf>, verbose: bool, args: UseArgs) -> Result<()> {
    let ctx = Context::open(root, verbose)?;
    let options = ctx.run_options(&args.hooks);

    let switched = ctx.rollout.use_version(&args.target, &options)?;

    let Some(current) = ctx.rollout.current()? else {
        return Ok(());
    };
    if switched {
        println!(
            "{} {}",
            Style::new().green().bold().apply_to("Switched to"),
            version_line(&current)
        );
    } else {
        println!("Already using {}", version_line(&current));
    }

    Ok(())
}
