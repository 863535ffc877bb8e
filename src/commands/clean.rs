//! Clean command implementation

use std::path::PathBuf;

use console::Style;
use inquire::Confirm;

use crate::cli::CleanArgs;
use crate::error::Result;
use crate::operations::CleanOptions;
use crate::progress::Spinner;
use crate::store::InstalledVersion;
use crate::ui::display::version_line;

use super::Context;

/// Run clean command
pub fn run(root: Option<PathBuf>, verbose: bool, args: CleanArgs) -> Result<()> {
    let ctx = Context::open(root, verbose)?;

    let candidates: Vec<InstalledVersion> = ctx
        .rollout
        .list()?
        .into_iter()
        .filter(|version| !version.is_current)
        .collect();

    if candidates.is_empty() {
        println!("Nothing to clean.");
        return Ok(());
    }

    if !args.yes && !confirm_clean(&candidates)? {
        println!("Clean cancelled. No changes were made.");
        return Ok(());
    }

    let options = CleanOptions {
        keep_going: args.keep_going,
        run: ctx.run_options(&args.hooks),
    };

    let spinner = Spinner::new("Removing old versions", verbose);
    let result = ctx.rollout.clean(&options);
    spinner.finish();
    let removed = result?;

    println!(
        "{} {} version(s)",
        Style::new().green().bold().apply_to("Removed"),
        removed.len()
    );
    Ok(())
}

fn confirm_clean(candidates: &[InstalledVersion]) -> Result<bool> {
    println!("\nThe following version(s) will be uninstalled:");
    for version in candidates {
        println!("  - {}", version_line(version));
    }
    println!();

    let confirmed = Confirm::new("Proceed with clean?")
        .with_default(true)
        .with_help_message("Press Enter to confirm, or 'n' to cancel")
        .prompt()?;
    Ok(confirmed)
}
