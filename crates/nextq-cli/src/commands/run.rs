//! `nextq run`: run one shell command through the retrying runner.

use tracing::{info, instrument};

use nextq_adapters::SystemShell;
use nextq_core::{application::CommandRunner, domain::CommandRequest};

use crate::{
    cli::RunArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Execute the command, retrying per `--attempts` / `runner.max_attempts`.
///
/// Exhausting every attempt is reported as [`CliError::ExternalCommandFailed`]
/// so the process exits 1.
#[instrument(skip_all, fields(command = %args.command))]
pub fn execute(args: RunArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let cwd = match args.cwd {
        Some(dir) => dir,
        None => {
            std::env::current_dir().with_cli_context(|| "Failed to read the current directory")?
        }
    };

    let request = CommandRequest::new(&args.command, &cwd)
        .silent(args.silent)
        .retry(config.runner.retry_policy(args.attempts, args.retry_delay_ms));

    let shell = SystemShell::new().with_color(output.supports_color());
    let outcome = CommandRunner::new(Box::new(shell))
        .execute(&request)
        .with_cli_context(|| "Failed to run command")?;

    info!(
        succeeded = outcome.succeeded,
        attempts = outcome.attempts_used,
        elapsed_ms = outcome.elapsed.as_millis() as u64,
        "Command finished"
    );

    if output.is_json() {
        output.json(&outcome)?;
    } else if args.silent && !outcome.stdout.trim().is_empty() {
        output.print(outcome.stdout.trim_end())?;
    }

    if !outcome.succeeded {
        return Err(CliError::ExternalCommandFailed {
            command: args.command,
            attempts: outcome.attempts_used,
            exit_code: outcome.exit_code,
            stderr: outcome.stderr,
        });
    }

    if !output.is_json() && outcome.was_retried() {
        output.success(&format!("Succeeded on attempt {}", outcome.attempts_used))?;
    }

    Ok(())
}
