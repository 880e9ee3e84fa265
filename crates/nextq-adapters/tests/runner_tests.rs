//! Command runner against real processes.
#![cfg(unix)]

use std::time::{Duration, Instant};

use nextq_adapters::{ScriptedShell, SystemShell};
use nextq_core::prelude::*;

#[test]
fn failing_command_uses_every_attempt_and_waits_between() {
    let dir = tempfile::tempdir().unwrap();
    let runner = CommandRunner::new(Box::new(SystemShell::new().with_color(false)));

    let start = Instant::now();
    let outcome = runner
        .run("exit 1", dir.path(), true, 3, Duration::from_millis(10))
        .unwrap();

    assert!(!outcome.succeeded);
    assert_eq!(outcome.attempts_used, 3);
    assert_eq!(outcome.exit_code, Some(1));
    assert!(start.elapsed() >= Duration::from_millis(20));
}

#[test]
fn command_that_succeeds_on_second_try() {
    let dir = tempfile::tempdir().unwrap();
    // First attempt creates the marker and fails, second finds it and passes.
    let script = "if [ -f marker ]; then echo done; else touch marker; exit 1; fi";
    let runner = CommandRunner::new(Box::new(SystemShell::new().with_color(false)));

    let outcome = runner
        .run(script, dir.path(), true, 3, Duration::from_millis(1))
        .unwrap();

    assert!(outcome.succeeded);
    assert_eq!(outcome.attempts_used, 2);
    assert_eq!(outcome.stdout.trim(), "done");
}

#[test]
fn missing_program_fails_without_error() {
    let dir = tempfile::tempdir().unwrap();
    let runner = CommandRunner::new(Box::new(SystemShell::new().with_color(false)));

    let outcome = runner
        .run("definitely-not-a-real-program-nextq", dir.path(), true, 1, Duration::ZERO)
        .unwrap();

    assert!(!outcome.succeeded);
    assert_eq!(outcome.exit_code, Some(127));
}

#[test]
fn scripted_shell_records_each_attempt() {
    let shell = ScriptedShell::with_exit_codes([1, 0]);
    let handle = shell.clone();
    let runner = CommandRunner::new(Box::new(shell)).with_sleeper(|_| {});

    let outcome = runner
        .run("pnpm install", ".", false, 4, Duration::from_secs(1))
        .unwrap();

    assert!(outcome.succeeded);
    assert_eq!(handle.commands(), ["pnpm install", "pnpm install"]);
    assert_eq!(
        handle.events()[1],
        RunnerEvent::RetryScheduled {
            attempt: 1,
            max_attempts: 4,
            delay: Duration::from_secs(1),
        }
    );
}
