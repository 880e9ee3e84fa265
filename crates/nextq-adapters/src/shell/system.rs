//! Shell adapter that runs commands through the platform shell.

use std::process::{Command, Output, Stdio};

use console::Term;
use owo_colors::OwoColorize;
use tracing::debug;

use nextq_core::{
    application::{
        ApplicationError,
        ports::{RunnerEvent, Shell, ShellOutput},
    },
    domain::CommandRequest,
    error::NextqResult,
};

/// Production shell: `sh -c` on Unix, `cmd /C` on Windows.
///
/// Silent requests have their output captured; otherwise the child inherits
/// this process's stdout and stderr and nothing is captured.
#[derive(Debug, Clone)]
pub struct SystemShell {
    color: bool,
    term: Term,
}

impl SystemShell {
    pub fn new() -> Self {
        Self {
            color: true,
            term: Term::stdout(),
        }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    fn command(request: &CommandRequest) -> Command {
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C");
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c");
            c
        };
        cmd.arg(&request.command)
            .current_dir(&request.working_dir)
            .stdin(Stdio::null());
        cmd
    }

    fn say(&self, line: &str) {
        if let Err(e) = self.term.write_line(line) {
            debug!(error = %e, "Could not write runner progress");
        }
    }
}

impl Default for SystemShell {
    fn default() -> Self {
        Self::new()
    }
}

impl Shell for SystemShell {
    fn spawn(&self, request: &CommandRequest) -> NextqResult<ShellOutput> {
        let mut cmd = Self::command(request);
        let spawn_failed = |e: std::io::Error| ApplicationError::SpawnFailed {
            command: request.command.clone(),
            reason: e.to_string(),
        };

        if request.silent {
            let output = cmd.output().map_err(spawn_failed)?;
            Ok(captured(output))
        } else {
            let status = cmd
                .stdout(Stdio::inherit())
                .stderr(Stdio::inherit())
                .status()
                .map_err(spawn_failed)?;
            Ok(ShellOutput {
                exit_code: status.code(),
                ..ShellOutput::default()
            })
        }
    }

    fn notify(&self, event: &RunnerEvent) {
        match event {
            RunnerEvent::Started {
                command,
                silent: false,
                ..
            } => {
                self.say("");
                if self.color {
                    self.say(&format!("{} {}", "Running:".dimmed(), command));
                } else {
                    self.say(&format!("Running: {command}"));
                }
            }
            RunnerEvent::Started { .. } => {}
            RunnerEvent::RetryScheduled {
                attempt,
                max_attempts,
                delay,
            } => {
                let line = retry_message(*attempt, *max_attempts, delay.as_secs_f64());
                if self.color {
                    self.say(&line.yellow().to_string());
                } else {
                    self.say(&line);
                }
            }
        }
    }
}

fn captured(output: Output) -> ShellOutput {
    ShellOutput {
        exit_code: output.status.code(),
        stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
        stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
    }
}

/// `Command failed. Retrying in 1s... (Attempt 1/3)`
fn retry_message(attempt: u32, max_attempts: u32, delay_secs: f64) -> String {
    format!("Command failed. Retrying in {delay_secs}s... (Attempt {attempt}/{max_attempts})")
}
