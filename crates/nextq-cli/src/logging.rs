//! Tracing subscriber initialisation.
//!
//! Only the CLI crate calls [`init_logging`]. `nextq-core` and
//! `nextq-adapters` only emit spans and events; they never touch subscribers.
//!
//! # Verbosity mapping
//!
//! | Flag(s)  | Filter level |
//! |----------|--------------|
//! | (none)   | WARN         |
//! | `-v`     | INFO         |
//! | `-vv`    | DEBUG        |
//! | `-vvv`   | TRACE        |
//! | `--quiet`| ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set. Useful targets:
//!
//! | Target                      | Shows                                      |
//! |-----------------------------|--------------------------------------------|
//! | `nextq_core`                | each question, each runner attempt         |
//! | `nextq_adapters::shell`     | spawn failures and progress write errors   |
//! | `nextq_adapters::terminal`  | stdin hand-back after the prompts          |
//!
//! Log lines are never coloured when `--no-color`, `NO_COLOR`, or a
//! `plain`/`json` output format is in effect, so a JSON consumer that merges
//! stderr into its input does not see escape codes.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::GlobalArgs;

/// Initialise the global tracing subscriber.
///
/// Must be called exactly once, before any tracing macros fire.
/// Returns an error if the subscriber could not be registered, e.g. when one
/// was already set earlier in the same process.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = derive_level(args);

    // RUST_LOG wins; otherwise build our own filter string so each crate gets
    // the same level as the top-level filter.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "nextq={level},nextq_core={level},nextq_adapters={level}"
        ))
    });

    let use_ansi = ansi_logs(args, std::io::stderr().is_terminal());

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    // Logs go to stderr so prompts and command output on stdout stay clean.
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

fn ansi_logs(args: &GlobalArgs, stderr_is_terminal: bool) -> bool {
    stderr_is_terminal && !args.forbids_color()
}

/// Translate the verbosity counter + quiet flag to a level string.
fn derive_level(args: &GlobalArgs) -> &'static str {
    if args.quiet {
        return "error";
    }
    match args.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn args_with(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
            output_format: OutputFormat::Auto,
        }
    }

    #[test]
    fn json_output_keeps_logs_free_of_ansi() {
        let mut args = args_with(0, false);
        args.no_color = false;
        assert!(ansi_logs(&args, true));
        assert!(!ansi_logs(&args, false));

        args.output_format = OutputFormat::Json;
        assert!(!ansi_logs(&args, true));
    }

    #[test]
    fn no_color_disables_ansi_logs_on_a_terminal() {
        assert!(!ansi_logs(&args_with(0, false), true));
    }

    #[test]
    fn verbosity_maps_to_level() {
        let cases = [(0, "warn"), (1, "info"), (2, "debug"), (3, "trace"), (9, "trace")];
        for (verbose, expected) in cases {
            assert_eq!(derive_level(&args_with(verbose, false)), expected, "-v x{verbose}");
        }
    }

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(derive_level(&args_with(0, true)), "error");
        assert_eq!(derive_level(&args_with(3, true)), "error");
    }
}
