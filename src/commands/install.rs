//! Install command implementation

use std::path::PathBuf;

use console::Style;

use crate::cli::InstallArgs;
use crate::config::Overrides;
use crate::error::Result;
use crate::operations::InstallOptions;
use crate::progress::Spinner;
use crate::source::Credentials;
use crate::ui::display::version_line;

use super::Context;

/// Run install command
pub fn run(root: Option<PathBuf>, verbose: bool, args: InstallArgs) -> Result<()> {
    let overrides = Overrides {
        sync_mode: args.sync_mode,
        npm: args.npm.clone(),
        ..Overrides::default()
    };
    let ctx = Context::load(root, verbose, overrides)?;

    let options = InstallOptions {
        force: args.force,
        activate: args.activate,
        sync_mode: ctx.settings.sync_mode,
        npm: ctx.settings.npm.clone(),
        auth: args.auth.as_deref().map(Credentials::parse).transpose()?,
        run: ctx.run_options(&args.hooks),
    };

    let spinner = Spinner::new(format!("Installing {}", args.source), verbose);
    let result = ctx.rollout.install(&args.source, &options);
    spinner.finish();
    let installed = result?;

    println!(
        "{} {}",
        Style::new().green().bold().apply_to("Installed"),
        version_line(&installed)
    );
    Ok(())
}
