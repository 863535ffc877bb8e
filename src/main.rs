//! Rollout - local release manager
//!
//! Installs server-side application packages into a versioned store,
//! switches the current version atomically and runs the package's
//! lifecycle hooks around every transition.

use clap::Parser;
use miette::Diagnostic;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

mod activator;
mod cli;
mod commands;
mod common;
mod compat;
mod config;
mod deps;
mod descriptor;
mod error;
mod hooks;
mod operations;
mod process;
mod progress;
mod source;
mod store;
mod ui;

#[cfg(test)]
mod test_fixtures;

use cli::{Cli, Commands};
use error::RolloutError;

/// Environment variable holding the log filter
const LOG_ENV: &str = "ROLLOUT_LOG";

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (root, verbose) = (cli.root, cli.verbose);
    let result = match cli.command {
        Commands::Install(args) => commands::install::run(root, verbose, args),
        Commands::Use(args) => commands::use_version::run(root, verbose, args),
        Commands::Uninstall(args) => commands::uninstall::run(root, verbose, args),
        Commands::Clean(args) => commands::clean::run(root, verbose, args),
        Commands::List(args) => commands::list::run(root, verbose, args),
        Commands::Info(args) => commands::info::run(root, verbose, args),
        Commands::Current => commands::info::run_current(root, verbose),
        Commands::Resolve(args) => commands::resolve::run(root, verbose, args),
        Commands::Scripts => commands::scripts::run_list(root, verbose),
        Commands::Run(args) => commands::scripts::run(root, verbose, args),
        Commands::Version => commands::version::run(),
        Commands::Completions(args) => commands::completions::run(args),
    };

    if let Err(e) = result {
        report(&e);
        std::process::exit(1);
    }
}

/// Print an error with its related errors and help text to stderr
fn report(err: &RolloutError) {
    eprintln!("Error: {err}");
    for related in err.related().into_iter().flatten() {
        eprintln!("  - {related}");
        if let Some(help) = related.help() {
            eprintln!("{}", indent(&help.to_string(), "    "));
        }
    }
    if let Some(help) = err.help() {
        eprintln!("{}", indent(&help.to_string(), "  "));
    }
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}
