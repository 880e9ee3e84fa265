//! Global arguments that apply to every subcommand.
//!
//! Declared here and flattened into [`super::Cli`] so that `-v`, `-q`, etc.
//! are available on any invocation without repetition.

use clap::Args;
use std::path::PathBuf;

/// `ENVIRONMENT` section appended to `nextq --help`.
///
/// Config keys map to `NEXTQ_<SECTION>__<KEY>`; `new.package_managers`
/// takes a comma-separated list.
pub const ENVIRONMENT_HELP: &str = "ENVIRONMENT:
  NEXTQ_RUNNER__MAX_ATTEMPTS=5              Attempts per command (runner.max_attempts)
  NEXTQ_RUNNER__RETRY_DELAY_MS=500          Delay between attempts (runner.retry_delay_ms)
  NEXTQ_NEW__PACKAGE_MANAGERS=pnpm,bun      Package manager choices (new.package_managers)
  NEXTQ_NEW__DEFAULT_PACKAGE_MANAGER=pnpm   Preselected package manager
  NO_COLOR=1                                Same as --no-color
  RUST_LOG=nextq_core=debug                 Log every runner attempt and prompt decision";

/// Global arguments for all commands.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO (`-v`), twice for DEBUG (`-vv`), three times for
    /// TRACE (`-vvv`). Conflicts with `--quiet`.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Increase verbosity (-v, -vv, -vvv)",
        long_help = "Increase logging verbosity:
    (none)  - Only warnings and errors
    -v      - Info level (attempts, results)
    -vv     - Debug level (each question, each prompt decision)
    -vvv    - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>). Prompts fall back to the plain theme.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output",
        long_help = "Disable colored output and log lines.
Prompts switch to the plain theme: the highlighted option keeps its '>'
marker but loses the cyan, and numbered lists drop the colored digits.
Also set by NO_COLOR or `output.no_color = true` in the config file."
    )]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,

    /// Machine-readable output format.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Output format"
    )]
    pub output_format: OutputFormat,
}

impl GlobalArgs {
    /// Whether `--output-format` rules out ANSI colour regardless of the
    /// terminal. Plain and JSON output are often piped into other tools.
    pub fn forbids_color(&self) -> bool {
        self.no_color || matches!(self.output_format, OutputFormat::Plain | OutputFormat::Json)
    }
}

/// How the CLI should render its output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Auto-detect based on terminal.
    #[default]
    Auto,
    /// Human-readable with colors.
    Human,
    /// Plain text without colors.
    Plain,
    /// JSON output.
    Json,
}
