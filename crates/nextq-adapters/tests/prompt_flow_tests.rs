//! End-to-end prompt flows against the scripted terminal.

use nextq_adapters::{ColorTheme, ScriptedTerminal};
use nextq_core::prelude::*;

fn package_manager() -> Question {
    Question::select(
        "package_manager",
        "Which package manager would you like to use?",
        ["npm", "pnpm", "yarn", "bun"],
    )
    .default("npm")
    .into()
}

#[test]
fn interactive_select_renders_highlight_and_collapses_on_enter() {
    let term = ScriptedTerminal::interactive([Key::Down, Key::Enter]);
    let handle = term.clone();

    let answer = PromptEngine::new(term).ask(&package_manager()).unwrap();

    assert_eq!(answer, Answer::Choice("pnpm".into()));
    assert_eq!(
        handle.output(),
        ["? Which package manager would you like to use? > pnpm"]
    );
    assert!(!handle.is_capturing());
    assert_eq!(handle.capture_sessions(), 1);
}

#[test]
fn up_from_first_option_wraps_to_last() {
    let term = ScriptedTerminal::interactive([Key::Up, Key::Enter]);
    let answer = PromptEngine::new(term).ask(&package_manager()).unwrap();
    assert_eq!(answer, Answer::Choice("bun".into()));
}

#[test]
fn unknown_keys_are_ignored() {
    let term = ScriptedTerminal::interactive([Key::Other, Key::Other, Key::Enter]);
    let answer = PromptEngine::new(term).ask(&package_manager()).unwrap();
    assert_eq!(answer, Answer::Choice("npm".into()));
}

#[test]
fn interrupt_restores_terminal_and_releases_input() {
    let term = ScriptedTerminal::interactive([Key::Down, Key::Interrupt]);
    let handle = term.clone();

    let err = PromptEngine::scoped(term, Box::new(ColorTheme), |engine| {
        engine.resolve(&[package_manager()])
    })
    .unwrap_err();

    assert!(err.is_interrupt());
    assert!(!handle.is_capturing());
    assert_eq!(handle.release_count(), 1);
}

#[test]
fn piped_select_lists_numbered_options_and_accepts_default() {
    let term = ScriptedTerminal::piped([""]);
    let handle = term.clone();

    let answer = PromptEngine::new(term).ask(&package_manager()).unwrap();

    assert_eq!(answer, Answer::Choice("npm".into()));
    assert_eq!(
        handle.output(),
        [
            "? Which package manager would you like to use? ",
            "  1) npm (default)",
            "  2) pnpm",
            "  3) yarn",
            "  4) bun",
            "  Answer: ",
        ]
    );
}

#[test]
fn piped_select_keeps_asking_until_matched() {
    let term = ScriptedTerminal::piped(["0", "five", "Yarn"]);
    let handle = term.clone();

    let answer = PromptEngine::new(term).ask(&package_manager()).unwrap();

    assert_eq!(answer, Answer::Choice("yarn".into()));
    let errors = handle
        .output()
        .iter()
        .filter(|l| l.contains("Please enter a number between 1 and 4 or the option name"))
        .count();
    assert_eq!(errors, 2);
}

#[test]
fn piped_select_without_default_rejects_empty_line() {
    let q: Question = Question::select("linter", "Linter?", ["none", "eslint"]).into();
    let term = ScriptedTerminal::piped(["", "2"]);
    let handle = term.clone();

    let answer = PromptEngine::new(term).ask(&q).unwrap();

    assert_eq!(answer, Answer::Choice("eslint".into()));
    assert!(handle.transcript().contains("between 1 and 2"));
}

#[test]
fn free_text_filter_runs_before_validation() {
    let q: Question = Question::text("project_name", "What is your project named?")
        .filter_with(|s| s.replace(' ', "-"))
        .validate_with(|s| {
            if s.contains(' ') {
                Err("no spaces".into())
            } else {
                Ok(())
            }
        })
        .into();
    let term = ScriptedTerminal::piped(["  my app  "]);

    let answer = PromptEngine::new(term).ask(&q).unwrap();
    assert_eq!(answer, Answer::Text("my-app".into()));
}

#[test]
fn confirm_without_default_treats_empty_as_no() {
    let q: Question = Question::confirm("use_shadcn", "Add shadcn/ui?").into();
    let term = ScriptedTerminal::piped([""]);
    let handle = term.clone();

    let answer = PromptEngine::new(term).ask(&q).unwrap();

    assert_eq!(answer, Answer::Bool(false));
    assert!(handle.transcript().contains("(y/N)"));
}

#[test]
fn mixed_question_list_resolves_in_order() {
    let questions: Vec<Question> = vec![
        Question::text("project_name", "Name").default("my-app").into(),
        package_manager(),
        Question::confirm("use_typescript", "TypeScript?").default(true).into(),
    ];
    let term = ScriptedTerminal::piped(["shop", "4", "no"]);

    let answers = PromptEngine::new(term).resolve(&questions).unwrap();

    let pairs: Vec<String> = answers.iter().map(|(k, v)| format!("{k}={v}")).collect();
    assert_eq!(
        pairs,
        ["project_name=shop", "package_manager=bun", "use_typescript=No"]
    );
}

#[test]
fn terminal_released_exactly_once_after_explicit_close() {
    let term = ScriptedTerminal::piped(Vec::<String>::new());
    let handle = term.clone();

    let mut engine = PromptEngine::new(term);
    engine.close().unwrap();
    drop(engine);

    assert_eq!(handle.release_count(), 1);
}
