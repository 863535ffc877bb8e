//! CLI definitions using clap derive API

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::deps::SyncMode;
use crate::descriptor::Hook;

/// Rollout - local release manager
///
/// Install application packages as immutable versions and switch between them.
#[derive(Parser, Debug)]
#[command(
    name = "rollout",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Local release manager for server-side application packages",
    long_about = "Rollout is a local release manager for server-side application packages. \
                  It installs packages (directories, .tar.gz archives or http(s) URLs) into a \
                  versioned store, switches the current version atomically and runs the \
                  package's lifecycle hooks around every transition.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  rollout -r /srv/app install ./app-1.2.0.tgz --activate\n    \
                  rollout -r /srv/app list\n    \
                  rollout -r /srv/app use 1\n    \
                  rollout -r /srv/app clean -y"
)]
pub struct Cli {
    /// Store root directory
    #[arg(long, short = 'r', global = true, env = "ROLLOUT_ROOT")]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install a package as a new version
    Install(InstallArgs),

    /// Switch to an installed version
    Use(UseArgs),

    /// Remove an installed version
    Uninstall(UninstallArgs),

    /// Remove every version except the current one
    Clean(CleanArgs),

    /// List installed versions, newest first
    List(ListArgs),

    /// Show version information
    Info(InfoArgs),

    /// Show the current version
    Current,

    /// Print the id a version reference resolves to
    Resolve(ResolveArgs),

    /// List scripts of the current version
    Scripts,

    /// Run a script of the current version
    Run(RunArgs),

    /// Show rollout version information
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Hook switches shared by every command that runs hooks
#[derive(Args, Debug, Default)]
pub struct HookArgs {
    /// Skip a lifecycle hook (repeatable)
    #[arg(long = "disable-hook", value_name = "HOOK", value_enum)]
    pub disabled_hooks: Vec<Hook>,
}

/// Arguments for the install command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Install from a local directory:\n    rollout install ./build/app\n\n\
                  Install a tarball and switch to it:\n    rollout install ./app-1.2.0.tgz --activate\n\n\
                  Install from a server with basic auth:\n    rollout install https://ci.example.com/app.tgz --auth deploy:secret\n\n\
                  Reinstall the same name and version:\n    rollout install ./app-1.2.0.tgz --force\n\n\
                  Install dependencies from the lock file:\n    rollout install ./app-1.2.0.tgz --sync-mode ci")]
pub struct InstallArgs {
    /// Package source (directory, .tar.gz archive, or http(s) URL)
    pub source: String,

    /// Install even if the same name and version is installed
    #[arg(long, short = 'f')]
    pub force: bool,

    /// Switch to the new version after installing
    #[arg(long, short = 'a')]
    pub activate: bool,

    /// How dependencies are synchronized
    #[arg(long, value_enum)]
    pub sync_mode: Option<SyncMode>,

    /// Basic-auth credentials for remote sources
    #[arg(long, value_name = "USER:PASSWORD", env = "ROLLOUT_AUTH", hide_env_values = true)]
    pub auth: Option<String>,

    /// Dependency manager command
    #[arg(long, value_name = "COMMAND")]
    pub npm: Option<String>,

    #[command(flatten)]
    pub hooks: HookArgs,
}

/// Arguments for the use command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Switch to the newest version:\n    rollout use 0\n\n\
                  Switch to a version by id:\n    rollout use 20261017-093015-042")]
pub struct UseArgs {
    /// Version id or index in the list (0 is newest)
    pub target: String,

    #[command(flatten)]
    pub hooks: HookArgs,
}

/// Arguments for the uninstall command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Uninstall the oldest of three versions:\n    rollout uninstall 2\n\n\
                  Uninstall by id:\n    rollout uninstall 20261016-181200-007")]
pub struct UninstallArgs {
    /// Version id or index in the list (0 is newest)
    pub target: String,

    #[command(flatten)]
    pub hooks: HookArgs,
}

/// Arguments for the clean command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Remove old versions after confirmation:\n    rollout clean\n\n\
                  Remove old versions in scripts:\n    rollout clean -y\n\n\
                  Continue past versions that fail to uninstall:\n    rollout clean -y --keep-going")]
pub struct CleanArgs {
    /// Skip confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Continue after a version fails to uninstall
    #[arg(long, short = 'k')]
    pub keep_going: bool,

    #[command(flatten)]
    pub hooks: HookArgs,
}

/// Arguments for the list command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  List installed versions:\n    rollout list\n\n\
                  Show hooks and scripts of each version:\n    rollout list --info")]
pub struct ListArgs {
    /// Show detailed output
    #[arg(long, short = 'i')]
    pub info: bool,
}

/// Arguments for the info command
#[derive(Parser, Debug)]
pub struct InfoArgs {
    /// Version id or index in the list (defaults to the current version)
    pub target: Option<String>,
}

/// Arguments for the resolve command
#[derive(Parser, Debug)]
pub struct ResolveArgs {
    /// Version id or index in the list (0 is newest)
    pub target: String,
}

/// Arguments for the run command
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Script name as listed by `rollout scripts`
    pub script: String,
}

/// Arguments for completions command
#[derive(Parser, Debug)]
#[command(after_help = "EXAMPLES:\n  \
                  Generate bash completions:\n    rollout completions --shell bash > ~/.bash_completion.d/rollout\n\n\
                  Generate zsh completions:\n    rollout completions --shell zsh > ~/.zfunc/_rollout\n\n\
                  Generate fish completions:\n    rollout completions --shell fish > ~/.config/fish/completions/rollout.fish")]
pub struct CompletionsArgs {
    /// Shell type
    #[arg(long, value_enum)]
    pub shell: clap_complete::Shell,
}
