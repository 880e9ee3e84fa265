//! Integration tests for nextq-core, driven only through the public API.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use nextq_core::prelude::*;

/// Piped-input terminal shared with the test through an `Arc`.
#[derive(Clone, Default)]
struct PipedTerminal {
    state: Arc<Mutex<PipedState>>,
}

#[derive(Default)]
struct PipedState {
    input: VecDeque<String>,
    output: Vec<String>,
    released: u32,
}

impl PipedTerminal {
    fn with_input(lines: &[&str]) -> Self {
        let term = Self::default();
        term.state.lock().unwrap().input = lines.iter().map(|l| l.to_string()).collect();
        term
    }

    fn transcript(&self) -> String {
        self.state.lock().unwrap().output.join("\n")
    }

    fn released(&self) -> u32 {
        self.state.lock().unwrap().released
    }
}

impl Terminal for PipedTerminal {
    fn is_interactive(&self) -> bool {
        false
    }

    fn write_line(&mut self, line: &str) -> NextqResult<()> {
        self.state.lock().unwrap().output.push(line.to_string());
        Ok(())
    }

    fn write_prompt(&mut self, prompt: &str) -> NextqResult<()> {
        self.write_line(prompt)
    }

    fn read_line(&mut self) -> NextqResult<Option<String>> {
        Ok(self.state.lock().unwrap().input.pop_front())
    }

    fn read_key(&mut self) -> NextqResult<Key> {
        Err(PromptError::Terminal {
            reason: "no keyboard attached".into(),
        }
        .into())
    }

    fn clear_lines(&mut self, _count: usize) -> NextqResult<()> {
        Ok(())
    }

    fn enter_key_capture(&mut self) -> NextqResult<()> {
        Ok(())
    }

    fn leave_key_capture(&mut self) -> NextqResult<()> {
        Ok(())
    }

    fn release(&mut self) -> NextqResult<()> {
        self.state.lock().unwrap().released += 1;
        Ok(())
    }
}

/// Shell that exits with queued codes, one per attempt.
struct CountdownShell {
    codes: Mutex<VecDeque<i32>>,
}

impl Shell for CountdownShell {
    fn spawn(&self, _request: &CommandRequest) -> NextqResult<ShellOutput> {
        let code = self.codes.lock().unwrap().pop_front().unwrap_or(0);
        Ok(ShellOutput {
            exit_code: Some(code),
            ..ShellOutput::default()
        })
    }
}

fn setup_questions() -> Vec<Question> {
    vec![
        Question::text("project_name", "What is your project named?")
            .default("my-app")
            .validate_with(|name| {
                if name.chars().any(char::is_uppercase) {
                    Err("Project name must be in lowercase.".into())
                } else {
                    Ok(())
                }
            })
            .into(),
        Question::select("package_manager", "Which package manager?", ["npm", "pnpm", "yarn"])
            .default("npm")
            .into(),
        Question::confirm("use_typescript", "Would you like to use TypeScript?")
            .default(true)
            .into(),
    ]
}

#[test]
fn piped_answers_resolve_full_question_list() {
    let term = PipedTerminal::with_input(&["Shop", "shop", "pnpm", ""]);
    let handle = term.clone();

    let answers = PromptEngine::scoped(term, Box::new(PlainTheme), |engine| {
        engine.resolve(&setup_questions())
    })
    .unwrap();

    assert_eq!(answers.text("project_name"), Some("shop"));
    assert_eq!(answers.choice("package_manager"), Some("pnpm"));
    assert_eq!(answers.flag("use_typescript"), Some(true));

    let transcript = handle.transcript();
    assert!(transcript.contains("Project name must be in lowercase."));
    assert!(transcript.contains("  1) npm (default)"));
    assert_eq!(handle.released(), 1);
}

#[test]
fn running_out_of_input_still_releases_terminal() {
    let term = PipedTerminal::with_input(&["shop"]);
    let handle = term.clone();

    let err = PromptEngine::scoped(term, Box::new(PlainTheme), |engine| {
        engine.resolve(&setup_questions())
    })
    .unwrap_err();

    assert!(!err.is_interrupt());
    assert_eq!(handle.released(), 1);
}

#[test]
fn answers_serialize_in_question_order() {
    let term = PipedTerminal::with_input(&["", "", "n"]);
    let mut engine = PromptEngine::new(term);
    let answers = engine.resolve(&setup_questions()).unwrap();

    let json = serde_json::to_string(&answers).unwrap();
    assert_eq!(
        json,
        r#"{"project_name":"my-app","package_manager":"npm","use_typescript":false}"#
    );
}

#[test]
fn runner_retries_until_success() {
    let shell = CountdownShell {
        codes: Mutex::new(VecDeque::from([1, 1, 0])),
    };
    let runner = CommandRunner::new(Box::new(shell)).with_sleeper(|_| {});

    let outcome = runner
        .run("npm install", ".", true, 5, Duration::from_millis(10))
        .unwrap();

    assert!(outcome.succeeded);
    assert_eq!(outcome.attempts_used, 3);
}
