//! Command Runner - executes external commands with retry.
//!
//! Each attempt goes through the [`Shell`] port. A non-zero exit, a signal,
//! or a failure to start the process all count as a failed attempt. After
//! the last failed attempt the runner returns a failed [`CommandOutcome`]
//! rather than an error; callers decide whether that is fatal.

use std::path::Path;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, warn};

use crate::{
    application::ports::{RunnerEvent, Shell, ShellOutput},
    domain::{CommandOutcome, CommandRequest, DomainValidator as validator, RetryPolicy},
    error::NextqResult,
};

type Sleeper = Box<dyn Fn(Duration) + Send + Sync>;

/// Runs commands through a [`Shell`], retrying failed attempts.
pub struct CommandRunner {
    shell: Box<dyn Shell>,
    sleep: Sleeper,
}

impl CommandRunner {
    pub fn new(shell: Box<dyn Shell>) -> Self {
        Self {
            shell,
            sleep: Box::new(std::thread::sleep),
        }
    }

    /// Replace the function used to wait between attempts.
    pub fn with_sleeper<F>(mut self, sleep: F) -> Self
    where
        F: Fn(Duration) + Send + Sync + 'static,
    {
        self.sleep = Box::new(sleep);
        self
    }

    /// Execute `request`, retrying up to `request.retry.max_attempts` times.
    ///
    /// Returns `Err` only for a malformed request. Success is reported as soon
    /// as one attempt exits with status 0; the remaining attempts are skipped.
    #[instrument(
        skip_all,
        fields(
            command = %request.command,
            cwd = %request.working_dir.display(),
            max_attempts = request.retry.max_attempts
        )
    )]
    pub fn execute(&self, request: &CommandRequest) -> NextqResult<CommandOutcome> {
        validator::validate_request(request)?;

        let RetryPolicy {
            max_attempts,
            delay,
        } = request.retry;
        let started = Instant::now();
        let mut attempt = 0;

        loop {
            attempt += 1;
            self.shell.notify(&RunnerEvent::Started {
                command: request.command.clone(),
                attempt,
                silent: request.silent,
            });

            let output = self.attempt(request);

            if output.success() {
                info!(attempt, "Command succeeded");
                return Ok(finish(output, true, attempt, started));
            }

            if attempt >= max_attempts {
                info!(
                    attempt,
                    exit_code = ?output.exit_code,
                    "Command failed, no attempts left"
                );
                return Ok(finish(output, false, attempt, started));
            }

            warn!(
                attempt,
                exit_code = ?output.exit_code,
                delay_ms = delay.as_millis() as u64,
                "Command failed, retrying"
            );
            self.shell.notify(&RunnerEvent::RetryScheduled {
                attempt,
                max_attempts,
                delay,
            });
            (self.sleep)(delay);
        }
    }

    /// Convenience wrapper building the request from its parts.
    pub fn run(
        &self,
        command: &str,
        cwd: impl AsRef<Path>,
        silent: bool,
        max_attempts: u32,
        retry_delay: Duration,
    ) -> NextqResult<CommandOutcome> {
        let request = CommandRequest::new(command, cwd)
            .silent(silent)
            .retry(RetryPolicy::new(max_attempts, retry_delay));
        self.execute(&request)
    }

    fn attempt(&self, request: &CommandRequest) -> ShellOutput {
        match self.shell.spawn(request) {
            Ok(output) => {
                debug!(exit_code = ?output.exit_code, "Attempt finished");
                output
            }
            Err(e) => {
                debug!(error = %e, "Attempt could not start");
                ShellOutput {
                    exit_code: None,
                    stdout: String::new(),
                    stderr: e.to_string(),
                }
            }
        }
    }
}

fn finish(output: ShellOutput, succeeded: bool, attempts: u32, started: Instant) -> CommandOutcome {
    CommandOutcome {
        succeeded,
        stdout: output.stdout,
        stderr: output.stderr,
        attempts_used: attempts,
        exit_code: output.exit_code,
        elapsed: started.elapsed(),
    }
}
