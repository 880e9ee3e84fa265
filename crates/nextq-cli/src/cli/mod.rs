//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums. No business logic lives here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

pub mod global;
pub use global::{ENVIRONMENT_HELP, GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

const EXAMPLES_HELP: &str = "EXAMPLES:\n\
    \x20 nextq new my-app\n\
    \x20 nextq new my-app --yes --dry-run\n\
    \x20 nextq run \"npm install\" --cwd my-app --attempts 3\n\
    \x20 nextq completions bash > /usr/share/bash-completion/completions/nextq";

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name    = "nextq",
    bin_name = "nextq",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{26a1} Quick Next.js project setup",
    long_about = "nextq asks a few questions about your new Next.js project, \
                  then runs create-next-app and the follow-up installers for you.",
    after_help = EXAMPLES_HELP,
    after_long_help = format!("{EXAMPLES_HELP}\n\n{ENVIRONMENT_HELP}"),
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    /// Flags available on every subcommand.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

/// All available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new Next.js project.
    #[command(
        visible_alias = "n",
        about = "Create a new Next.js project",
        after_help = "EXAMPLES:\n\
            \x20 nextq new                 # ask for everything\n\
            \x20 nextq new my-app          # ask for everything but the name\n\
            \x20 nextq new my-app --yes    # accept every default\n\
            \x20 echo \"my-app\" | nextq new   # answers from piped input"
    )]
    New(NewArgs),

    /// Run one shell command with retry.
    #[command(
        about = "Run a shell command with retry",
        after_help = "EXAMPLES:\n\
            \x20 nextq run \"pnpm install\" --attempts 3 --retry-delay-ms 2000\n\
            \x20 nextq run \"git init\" --cwd my-app --silent"
    )]
    Run(RunArgs),

    /// Initialise a nextq configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 nextq init\n\
            \x20 nextq init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 nextq completions bash > ~/.local/share/bash-completion/completions/nextq\n\
            \x20 nextq completions zsh  > ~/.zfunc/_nextq\n\
            \x20 nextq completions fish > ~/.config/fish/completions/nextq.fish"
    )]
    Completions(CompletionsArgs),

    /// Inspect the nextq configuration.
    #[command(
        about = "Configuration management",
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 nextq config get runner.max_attempts\n\
            \x20 nextq config list\n\
            \x20 nextq config path"
    )]
    Config(ConfigCommands),
}

// ── new ───────────────────────────────────────────────────────────────────────

/// Arguments for `nextq new`.
#[derive(Debug, Args)]
pub struct NewArgs {
    /// Project directory name, or `.` for the current directory.
    #[arg(value_name = "NAME", help = "Project name (skips the name question)")]
    pub name: Option<String>,

    /// Accept every default without prompting.
    #[arg(
        short = 'y',
        long = "yes",
        requires = "name",
        help = "Accept all defaults without prompting"
    )]
    pub yes: bool,

    /// Print the answers and the commands instead of running them.
    #[arg(long = "dry-run", help = "Show what would be run without running it")]
    pub dry_run: bool,

    /// Attempts per command, overriding `runner.max_attempts`.
    #[arg(
        long = "attempts",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Attempts per command"
    )]
    pub attempts: Option<u32>,

    /// Delay between attempts, overriding `runner.retry_delay_ms`.
    #[arg(
        long = "retry-delay-ms",
        value_name = "MS",
        help = "Delay between attempts in milliseconds"
    )]
    pub retry_delay_ms: Option<u64>,

    /// Pick options by typing their number, even on a live terminal.
    #[arg(
        long = "numbered",
        help = "Use numbered lists instead of arrow-key selection"
    )]
    pub numbered: bool,
}

// ── run ───────────────────────────────────────────────────────────────────────

/// Arguments for `nextq run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Command line, passed to the platform shell as-is.
    #[arg(value_name = "COMMAND", help = "Command to run")]
    pub command: String,

    /// Working directory for the command.
    #[arg(long = "cwd", value_name = "DIR", help = "Working directory")]
    pub cwd: Option<PathBuf>,

    /// Capture output instead of passing it through.
    #[arg(short = 's', long = "silent", help = "Capture output instead of streaming it")]
    pub silent: bool,

    /// Maximum number of attempts.
    #[arg(
        short = 'n',
        long = "attempts",
        value_name = "N",
        value_parser = clap::value_parser!(u32).range(1..),
        help = "Maximum number of attempts"
    )]
    pub attempts: Option<u32>,

    /// Delay between attempts.
    #[arg(
        long = "retry-delay-ms",
        value_name = "MS",
        help = "Delay between attempts in milliseconds"
    )]
    pub retry_delay_ms: Option<u64>,
}

// ── init ──────────────────────────────────────────────────────────────────────

/// Arguments for `nextq init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

/// Arguments for `nextq completions`.
#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

/// Subcommands for `nextq config`.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `runner.max_attempts`.
        key: String,
    },
    /// Print all configuration values.
    List,
    /// Print the path to the active configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────
