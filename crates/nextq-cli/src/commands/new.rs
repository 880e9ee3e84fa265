//! Implementation of the `nextq new` command.
//!
//! Responsibility: collect the setup answers, turn them into a step plan, and
//! run each step through the core command runner. Prompting and retrying live
//! in `nextq-core`; this module only decides *what* to ask and *what* to run.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use nextq_adapters::{ConsoleTerminal, SystemShell, theme_for};
use nextq_core::{
    application::{CommandRunner, PromptEngine},
    domain::{Answer, AnswerSet, CommandRequest, DomainError, Question, RetryPolicy},
    error::NextqError,
};

use crate::{
    cli::{GlobalArgs, NewArgs},
    config::{AppConfig, NewConfig},
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

const PROJECT_NAME: &str = "project_name";
const PACKAGE_MANAGER: &str = "package_manager";
const USE_TYPESCRIPT: &str = "use_typescript";
const USE_TAILWIND: &str = "use_tailwind";
const USE_SRC_DIR: &str = "use_src_dir";
const USE_APP_DIR: &str = "use_app_dir";
const LINTER: &str = "linter";
const USE_SHADCN: &str = "use_shadcn";
const ORM: &str = "orm";
const TESTING: &str = "testing";
const AUTH: &str = "auth";

/// Execute the `nextq new` command.
///
/// Dispatch sequence:
/// 1. Validate NAME, if given (an invalid one is asked for again)
/// 2. Resolve the remaining answers, from defaults with `--yes`
/// 3. Build the step plan
/// 4. Early-exit with the answers and plan if `--dry-run`
/// 5. Run each step; a critical failure aborts, others only warn
/// 6. Print next-steps guidance
///
/// A critical failure removes the project directory again when this run
/// created it.
#[instrument(skip_all, fields(name = args.name.as_deref().unwrap_or("")))]
pub fn execute(
    args: NewArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let cwd =
        std::env::current_dir().with_cli_context(|| "Failed to read the current directory")?;

    // 1. NAME from the command line
    let preset = match args.name.as_deref().map(filter_project_name) {
        Some(name) => match validate_project_name(&name, &cwd) {
            Ok(()) => Some(name),
            Err(reason) if args.yes => {
                return Err(CliError::InvalidProjectName { name, reason });
            }
            Err(reason) => {
                output.warning(&reason)?;
                None
            }
        },
        None => None,
    };

    // 2. Answers
    let questions = setup_questions(&config.new, &cwd, preset.is_none());
    let mut answers = AnswerSet::new();
    if let Some(name) = preset {
        answers
            .insert(PROJECT_NAME, Answer::Text(name))
            .map_err(domain_error)?;
    }

    let resolved = if args.yes {
        default_answers(&questions)?
    } else {
        let theme = theme_for(output.supports_color());
        let mut terminal = ConsoleTerminal::new();
        if args.numbered {
            terminal = terminal.without_key_navigation();
        }
        PromptEngine::scoped(terminal, theme, |engine| {
            engine.resolve(&questions)
        })
        .map_err(CliError::from_core)?
    };
    answers.extend(resolved).map_err(domain_error)?;
    debug!(answers = answers.len(), "Answers resolved");

    // 3. Plan
    let setup = ProjectSetup::from_answers(&answers, &cwd)?;
    let plan = build_plan(&setup, &config.new);

    // 4. Dry run: describe but do not execute.
    if args.dry_run {
        return show_dry_run(&answers, &plan, &output);
    }

    // 5. Execute
    output.header(&format!("Creating project: {}", setup.name))?;
    info!(
        project = %setup.name,
        dir = %setup.dir.display(),
        steps = plan.len(),
        "Setup started"
    );

    let policy = config.runner.retry_policy(args.attempts, args.retry_delay_ms);
    let shell = SystemShell::new().with_color(output.supports_color());
    let runner = CommandRunner::new(Box::new(shell));

    let created_here = setup.name != "." && !setup.dir.exists();
    for step in &plan {
        if let Err(err) = run_step(&runner, step, policy, &output) {
            if created_here {
                if let Err(e) = discard_partial_project(&setup.dir, &output) {
                    debug!(error = %e, "Could not report project cleanup");
                }
            }
            return Err(err);
        }
    }

    info!(project = %setup.name, "Setup completed");

    // 6. Success + next steps
    output.success(&format!("Project '{}' is ready!", setup.name))?;

    if !global.quiet {
        output.print("")?;
        output.print("Next steps:")?;
        if setup.name != "." {
            output.print(&format!("  cd {}", setup.name))?;
        }
        output.print(&format!("  {} run dev", setup.package_manager))?;
    }

    Ok(())
}

fn run_step(
    runner: &CommandRunner,
    step: &Step,
    policy: RetryPolicy,
    output: &OutputManager,
) -> CliResult<()> {
    output.info(&step.label)?;

    let request = CommandRequest::new(&step.command, &step.working_dir).retry(policy);
    let outcome = runner.execute(&request).map_err(CliError::from_core)?;

    if outcome.succeeded {
        return Ok(());
    }

    if step.critical {
        return Err(CliError::ExternalCommandFailed {
            command: step.command.clone(),
            attempts: outcome.attempts_used,
            exit_code: outcome.exit_code,
            stderr: outcome.stderr,
        });
    }

    warn!(step = %step.label, exit_code = ?outcome.exit_code, "Optional step failed");
    output.warning(&format!(
        "{} failed after {} attempt(s); continuing without it",
        step.label, outcome.attempts_used
    ))?;
    Ok(())
}

/// Remove a project directory left behind by a failed setup.
fn discard_partial_project(dir: &Path, output: &OutputManager) -> std::io::Result<()> {
    if !dir.exists() {
        return Ok(());
    }

    output.warning(&format!(
        "Cleaning up incomplete project directory: {}",
        dir.display()
    ))?;
    if let Err(e) = std::fs::remove_dir_all(dir) {
        warn!(dir = %dir.display(), error = %e, "Could not remove project directory");
        output.warning(&format!("Could not remove {}: {e}", dir.display()))?;
    }
    Ok(())
}

fn show_dry_run(answers: &AnswerSet, plan: &[Step], output: &OutputManager) -> CliResult<()> {
    if output.is_json() {
        #[derive(Serialize)]
        struct DryRun<'a> {
            answers: &'a AnswerSet,
            plan: &'a [Step],
        }
        output.json(&DryRun { answers, plan })?;
        return Ok(());
    }

    output.header("Answers")?;
    for (key, answer) in answers.iter() {
        output.print(&format!("  {key:<16} {answer}"))?;
    }

    output.header("Plan")?;
    for (i, step) in plan.iter().enumerate() {
        let marker = if step.critical { "" } else { "  (optional)" };
        output.print(&format!("  {}. {}{marker}", i + 1, step.label))?;
        output.print(&format!("     $ {}", step.command))?;
        output.print(&format!("     in {}", step.working_dir.display()))?;
    }
    Ok(())
}

// ── Questions ─────────────────────────────────────────────────────────────────

/// Empty input means the current directory.
fn filter_project_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        ".".into()
    } else {
        trimmed.into()
    }
}

/// Check a filtered project name against `root`, the directory the project
/// would be created in.
fn validate_project_name(name: &str, root: &Path) -> Result<(), String> {
    if name != name.to_lowercase() {
        return Err("Project name must be in lowercase.".into());
    }
    if name.contains('/') || name.contains('\\') {
        return Err("Project name cannot contain path separators.".into());
    }
    if name == "." {
        let occupied = std::fs::read_dir(root)
            .map(|mut entries| entries.next().is_some())
            .unwrap_or(false);
        if occupied {
            return Err(
                "The current directory is not empty. Please use a different project name.".into(),
            );
        }
    } else if root.join(name).exists() {
        return Err(format!(
            "A directory named \"{name}\" already exists. Please use a different project name."
        ));
    }
    Ok(())
}

fn setup_questions(config: &NewConfig, cwd: &Path, ask_name: bool) -> Vec<Question> {
    let mut questions = Vec::with_capacity(11);

    if ask_name {
        let root = cwd.to_path_buf();
        questions.push(
            Question::text(PROJECT_NAME, "Enter project name:")
                .filter_with(filter_project_name)
                .validate_with(move |name| validate_project_name(name, &root))
                .into(),
        );
    }

    let rest: [Question; 10] = [
        Question::select(
            PACKAGE_MANAGER,
            "Choose a package manager:",
            config.package_managers.iter().cloned(),
        )
        .default(config.default_package_manager.as_str())
        .into(),
        Question::confirm(USE_TYPESCRIPT, "Do you want to use TypeScript?")
            .default(true)
            .into(),
        Question::confirm(USE_TAILWIND, "Do you want to use Tailwind CSS?")
            .default(true)
            .into(),
        Question::confirm(USE_SRC_DIR, "Do you want to use src directory?")
            .default(true)
            .into(),
        Question::confirm(USE_APP_DIR, "Do you want to use the app directory?")
            .default(true)
            .into(),
        Question::select(LINTER, "Choose a linter:", Linter::ALL.map(Linter::as_str))
            .default(Linter::None.as_str())
            .into(),
        Question::select(ORM, "Choose an ORM:", Orm::ALL.map(Orm::as_str))
            .default(Orm::None.as_str())
            .into(),
        Question::confirm(USE_SHADCN, "Do you want to use Shadcn UI?")
            .default(false)
            .into(),
        Question::select(
            TESTING,
            "Choose a testing framework:",
            Testing::ALL.map(Testing::as_str),
        )
        .default(Testing::None.as_str())
        .into(),
        Question::select(
            AUTH,
            "Choose an authentication solution:",
            Auth::ALL.map(Auth::as_str),
        )
        .default(Auth::None.as_str())
        .into(),
    ];
    questions.extend(rest);

    questions
}

/// Answer every question with its default, as `--yes` does.
fn default_answers(questions: &[Question]) -> CliResult<AnswerSet> {
    let mut answers = AnswerSet::new();
    for question in questions {
        question.validate().map_err(domain_error)?;
        let answer = question.default_answer().ok_or_else(|| CliError::NoDefault {
            key: question.key().into(),
        })?;
        answers.insert(question.key(), answer).map_err(domain_error)?;
    }
    Ok(answers)
}

fn domain_error(err: DomainError) -> CliError {
    CliError::Core(err.into())
}

// ── Plan ──────────────────────────────────────────────────────────────────────

/// A select question's option set as an enum: `ALL` in display order,
/// `as_str` for the option label, `parse` for the answer.
macro_rules! choice_enum {
    ($name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        enum $name {
            $($variant),+
        }

        impl $name {
            const ALL: [$name; [$($label),+].len()] = [$($name::$variant),+];

            const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }

            fn parse(s: &str) -> Option<Self> {
                Self::ALL.into_iter().find(|c| c.as_str() == s)
            }
        }
    };
}

choice_enum!(Linter { None => "none", Eslint => "eslint", Biome => "biome" });
choice_enum!(Orm { None => "none", Prisma => "prisma", Drizzle => "drizzle" });
choice_enum!(Testing { None => "none", Vitest => "vitest", Jest => "jest" });
choice_enum!(Auth {
    None => "none",
    NextAuth => "next-auth",
    Clerk => "clerk",
    Lucia => "lucia",
});

/// Typed view of the answers.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ProjectSetup {
    name: String,
    /// Where create-next-app runs.
    parent: PathBuf,
    /// The project directory itself; follow-up steps run here.
    dir: PathBuf,
    package_manager: String,
    typescript: bool,
    tailwind: bool,
    src_dir: bool,
    app_dir: bool,
    linter: Linter,
    orm: Orm,
    shadcn: bool,
    testing: Testing,
    auth: Auth,
}

impl ProjectSetup {
    fn from_answers(answers: &AnswerSet, cwd: &Path) -> CliResult<Self> {
        let name = require(answers.text(PROJECT_NAME), PROJECT_NAME)?.to_string();
        let dir = if name == "." {
            cwd.to_path_buf()
        } else {
            cwd.join(&name)
        };

        Ok(Self {
            package_manager: require(answers.choice(PACKAGE_MANAGER), PACKAGE_MANAGER)?.into(),
            typescript: require(answers.flag(USE_TYPESCRIPT), USE_TYPESCRIPT)?,
            tailwind: require(answers.flag(USE_TAILWIND), USE_TAILWIND)?,
            src_dir: require(answers.flag(USE_SRC_DIR), USE_SRC_DIR)?,
            app_dir: require(answers.flag(USE_APP_DIR), USE_APP_DIR)?,
            linter: choice(answers, LINTER, Linter::parse)?,
            orm: choice(answers, ORM, Orm::parse)?,
            shadcn: require(answers.flag(USE_SHADCN), USE_SHADCN)?,
            testing: choice(answers, TESTING, Testing::parse)?,
            auth: choice(answers, AUTH, Auth::parse)?,
            parent: cwd.to_path_buf(),
            dir,
            name,
        })
    }
}

fn require<T>(value: Option<T>, key: &str) -> CliResult<T> {
    value.ok_or_else(|| {
        CliError::Core(NextqError::Internal {
            message: format!("missing answer for '{key}'"),
        })
    })
}

fn choice<T>(answers: &AnswerSet, key: &str, parse: fn(&str) -> Option<T>) -> CliResult<T> {
    let value = require(answers.choice(key), key)?;
    parse(value).ok_or_else(|| {
        CliError::Core(NextqError::Internal {
            message: format!("unknown {key} '{value}'"),
        })
    })
}

/// One command of the setup plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct Step {
    label: String,
    command: String,
    working_dir: PathBuf,
    /// A failed critical step aborts the setup.
    critical: bool,
}

impl Step {
    fn critical(label: &str, command: String, working_dir: &Path) -> Self {
        Self {
            label: label.into(),
            command,
            working_dir: working_dir.to_path_buf(),
            critical: true,
        }
    }

    fn optional(label: &str, command: String, working_dir: &Path) -> Self {
        Self {
            critical: false,
            ..Self::critical(label, command, working_dir)
        }
    }
}

fn create_next_app_command(setup: &ProjectSetup, config: &NewConfig) -> String {
    let mut command = format!(
        "{} {} --use-{} --yes --import-alias \"@/*\"",
        config.create_next_app, setup.name, setup.package_manager
    );

    command.push_str(if setup.typescript { " --ts" } else { " --js" });
    command.push_str(if setup.tailwind { " --tailwind" } else { " --no-tailwind" });
    command.push_str(if setup.src_dir { " --src-dir" } else { " --no-src-dir" });
    command.push_str(if setup.app_dir { " --app" } else { " --no-app" });
    if setup.linter == Linter::None {
        command.push_str(" --no-eslint");
    }

    command
}

fn build_plan(setup: &ProjectSetup, config: &NewConfig) -> Vec<Step> {
    let pm = &setup.package_manager;
    let mut plan = vec![Step::critical(
        "Creating Next.js app",
        create_next_app_command(setup, config),
        &setup.parent,
    )];

    if setup.linter == Linter::Biome {
        plan.push(Step::optional(
            "Installing Biome",
            format!("{pm} install --save-dev @biomejs/biome"),
            &setup.dir,
        ));
        plan.push(Step::optional(
            "Configuring Biome",
            "npx @biomejs/biome init".into(),
            &setup.dir,
        ));
    }

    match setup.orm {
        Orm::None => {}
        Orm::Prisma => {
            plan.push(Step::optional(
                "Installing Prisma",
                format!("{pm} install --save-dev prisma"),
                &setup.dir,
            ));
            plan.push(Step::optional(
                "Installing Prisma client",
                format!("{pm} install @prisma/client"),
                &setup.dir,
            ));
            plan.push(Step::optional(
                "Initialising Prisma",
                "npx prisma init".into(),
                &setup.dir,
            ));
            // Fails until the schema has a model; the user reruns it later.
            plan.push(Step::optional(
                "Generating Prisma client",
                "npx prisma generate".into(),
                &setup.dir,
            ));
        }
        Orm::Drizzle => {
            plan.push(Step::optional(
                "Installing Drizzle ORM",
                format!("{pm} install drizzle-orm @vercel/postgres"),
                &setup.dir,
            ));
            plan.push(Step::optional(
                "Installing Drizzle Kit",
                format!("{pm} install --save-dev drizzle-kit"),
                &setup.dir,
            ));
        }
    }

    if setup.shadcn {
        plan.push(Step::optional(
            "Installing Shadcn UI dependencies",
            format!("{pm} install class-variance-authority"),
            &setup.dir,
        ));
        plan.push(Step::optional(
            "Installing Shadcn UI animations",
            format!("{pm} install --save-dev tailwindcss-animate"),
            &setup.dir,
        ));
        plan.push(Step::optional(
            "Initialising Shadcn UI",
            "npx shadcn@latest init --yes".into(),
            &setup.dir,
        ));
    }

    let test_packages = match setup.testing {
        Testing::None => None,
        Testing::Vitest => Some((
            "Installing Vitest",
            "vitest @vitejs/plugin-react jsdom @testing-library/react @testing-library/dom",
        )),
        Testing::Jest if setup.typescript => Some((
            "Installing Jest",
            "jest jest-environment-jsdom @testing-library/react @testing-library/jest-dom \
             @types/jest ts-node",
        )),
        Testing::Jest => Some((
            "Installing Jest",
            "jest jest-environment-jsdom @testing-library/react @testing-library/jest-dom",
        )),
    };
    if let Some((label, packages)) = test_packages {
        plan.push(Step::optional(
            label,
            format!("{pm} install --save-dev {packages}"),
            &setup.dir,
        ));
    }

    let auth_package = match setup.auth {
        Auth::None => None,
        Auth::NextAuth => Some(("Installing NextAuth.js", "next-auth@beta")),
        Auth::Clerk => Some(("Installing Clerk", "@clerk/nextjs")),
        Auth::Lucia => Some(("Installing Lucia", "lucia")),
    };
    if let Some((label, package)) = auth_package {
        plan.push(Step::optional(
            label,
            format!("{pm} install {package}"),
            &setup.dir,
        ));
    }

    plan
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults(cwd: &Path, name: &str) -> AnswerSet {
        let mut answers = AnswerSet::new();
        answers
            .insert(PROJECT_NAME, Answer::Text(name.into()))
            .unwrap();
        let questions = setup_questions(&NewConfig::default(), cwd, false);
        answers.extend(default_answers(&questions).unwrap()).unwrap();
        answers
    }

    fn setup(name: &str) -> ProjectSetup {
        let cwd = PathBuf::from("/work");
        ProjectSetup::from_answers(&defaults(&cwd, name), &cwd).unwrap()
    }

    // ── project name ──────────────────────────────────────────────────────────

    #[test]
    fn empty_name_filters_to_current_dir() {
        assert_eq!(filter_project_name("   "), ".");
        assert_eq!(filter_project_name("  shop "), "shop");
    }

    #[test]
    fn uppercase_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let err = validate_project_name("MyProj", dir.path()).unwrap_err();
        assert_eq!(err, "Project name must be in lowercase.");
        assert!(validate_project_name("myproj", dir.path()).is_ok());
    }

    #[test]
    fn existing_directory_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("taken")).unwrap();

        let err = validate_project_name("taken", dir.path()).unwrap_err();
        assert!(err.contains("\"taken\" already exists"));
    }

    #[test]
    fn dot_requires_empty_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_project_name(".", dir.path()).is_ok());

        std::fs::write(dir.path().join("README.md"), "# hi").unwrap();
        let err = validate_project_name(".", dir.path()).unwrap_err();
        assert!(err.contains("not empty"));
    }

    #[test]
    fn path_separator_in_name_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        assert!(validate_project_name("a/b", dir.path()).is_err());
        assert!(validate_project_name("a\\b", dir.path()).is_err());
    }

    // ── questions ─────────────────────────────────────────────────────────────

    #[test]
    fn name_question_is_skipped_when_preset() {
        let cwd = PathBuf::from("/work");
        let asked = setup_questions(&NewConfig::default(), &cwd, true);
        let skipped = setup_questions(&NewConfig::default(), &cwd, false);

        assert_eq!(asked[0].key(), PROJECT_NAME);
        assert_eq!(asked.len(), skipped.len() + 1);
        assert!(skipped.iter().all(|q| q.key() != PROJECT_NAME));
    }

    #[test]
    fn defaults_follow_config() {
        let config = NewConfig {
            package_managers: vec!["pnpm".into(), "bun".into()],
            default_package_manager: "bun".into(),
            ..NewConfig::default()
        };
        let questions = setup_questions(&config, Path::new("/work"), false);
        let answers = default_answers(&questions).unwrap();

        assert_eq!(answers.choice(PACKAGE_MANAGER), Some("bun"));
        assert_eq!(answers.flag(USE_TYPESCRIPT), Some(true));
        assert_eq!(answers.choice(LINTER), Some("none"));
        assert_eq!(answers.choice(ORM), Some("none"));
        assert_eq!(answers.flag(USE_SHADCN), Some(false));
        assert_eq!(answers.choice(TESTING), Some("none"));
        assert_eq!(answers.choice(AUTH), Some("none"));
    }

    #[test]
    fn questions_follow_setup_order() {
        let questions = setup_questions(&NewConfig::default(), Path::new("/work"), true);
        let keys: Vec<_> = questions.iter().map(|q| q.key()).collect();
        assert_eq!(
            keys,
            [
                PROJECT_NAME,
                PACKAGE_MANAGER,
                USE_TYPESCRIPT,
                USE_TAILWIND,
                USE_SRC_DIR,
                USE_APP_DIR,
                LINTER,
                ORM,
                USE_SHADCN,
                TESTING,
                AUTH,
            ]
        );
    }

    #[test]
    fn choice_labels_parse_back() {
        for auth in Auth::ALL {
            assert_eq!(Auth::parse(auth.as_str()), Some(auth));
        }
        assert_eq!(Auth::parse("next-auth"), Some(Auth::NextAuth));
        assert_eq!(Orm::parse("mongoose"), None);
    }

    #[test]
    fn default_outside_options_is_configuration_error() {
        let config = NewConfig {
            default_package_manager: "deno".into(),
            ..NewConfig::default()
        };
        let questions = setup_questions(&config, Path::new("/work"), false);
        let err = default_answers(&questions).unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }

    #[test]
    fn name_question_without_usable_default_fails_yes() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("occupied"), "").unwrap();

        let questions = setup_questions(&NewConfig::default(), dir.path(), true);
        assert!(matches!(
            default_answers(&questions),
            Err(CliError::NoDefault { ref key }) if key == PROJECT_NAME
        ));
    }

    // ── plan ──────────────────────────────────────────────────────────────────

    #[test]
    fn default_plan_is_single_critical_step() {
        let setup = setup("shop");
        let plan = build_plan(&setup, &NewConfig::default());

        assert_eq!(plan.len(), 1);
        assert!(plan[0].critical);
        assert_eq!(plan[0].working_dir, PathBuf::from("/work"));
        assert_eq!(
            plan[0].command,
            "npx --yes create-next-app@latest shop --use-npm --yes --import-alias \"@/*\" \
             --ts --tailwind --src-dir --app --no-eslint"
        );
    }

    #[test]
    fn javascript_pages_router_flags() {
        let mut setup = setup("shop");
        setup.typescript = false;
        setup.tailwind = false;
        setup.src_dir = false;
        setup.app_dir = false;
        setup.linter = Linter::Eslint;

        let command = create_next_app_command(&setup, &NewConfig::default());
        assert!(command.ends_with("--js --no-tailwind --no-src-dir --no-app"));
    }

    #[test]
    fn biome_and_shadcn_add_optional_steps_in_project_dir() {
        let mut setup = setup("shop");
        setup.package_manager = "pnpm".into();
        setup.linter = Linter::Biome;
        setup.shadcn = true;

        let plan = build_plan(&setup, &NewConfig::default());
        let commands: Vec<_> = plan.iter().map(|s| s.command.as_str()).collect();

        assert_eq!(
            commands[1..],
            [
                "pnpm install --save-dev @biomejs/biome",
                "npx @biomejs/biome init",
                "pnpm install class-variance-authority",
                "pnpm install --save-dev tailwindcss-animate",
                "npx shadcn@latest init --yes",
            ]
        );
        assert!(plan[1..].iter().all(|s| !s.critical));
        assert!(plan[1..].iter().all(|s| s.working_dir == Path::new("/work/shop")));
    }

    #[test]
    fn prisma_installs_then_initialises() {
        let mut setup = setup("shop");
        setup.orm = Orm::Prisma;

        let plan = build_plan(&setup, &NewConfig::default());
        let commands: Vec<_> = plan.iter().map(|s| s.command.as_str()).collect();

        assert_eq!(
            commands[1..],
            [
                "npm install --save-dev prisma",
                "npm install @prisma/client",
                "npx prisma init",
                "npx prisma generate",
            ]
        );
        assert!(plan[1..].iter().all(|s| !s.critical));
    }

    #[test]
    fn orm_testing_and_auth_steps_run_in_setup_order() {
        let mut setup = setup("shop");
        setup.package_manager = "bun".into();
        setup.linter = Linter::Biome;
        setup.orm = Orm::Drizzle;
        setup.shadcn = true;
        setup.testing = Testing::Vitest;
        setup.auth = Auth::Clerk;

        let plan = build_plan(&setup, &NewConfig::default());
        let commands: Vec<_> = plan.iter().map(|s| s.command.as_str()).collect();

        assert_eq!(
            commands[1..],
            [
                "bun install --save-dev @biomejs/biome",
                "npx @biomejs/biome init",
                "bun install drizzle-orm @vercel/postgres",
                "bun install --save-dev drizzle-kit",
                "bun install class-variance-authority",
                "bun install --save-dev tailwindcss-animate",
                "npx shadcn@latest init --yes",
                "bun install --save-dev vitest @vitejs/plugin-react jsdom \
                 @testing-library/react @testing-library/dom",
                "bun install @clerk/nextjs",
            ]
        );
        assert!(plan[1..].iter().all(|s| !s.critical));
        assert!(plan[1..].iter().all(|s| s.working_dir == Path::new("/work/shop")));
    }

    #[test]
    fn jest_adds_type_packages_only_for_typescript() {
        let mut setup = setup("shop");
        setup.testing = Testing::Jest;

        let ts = build_plan(&setup, &NewConfig::default());
        assert!(ts[1].command.ends_with("@testing-library/jest-dom @types/jest ts-node"));

        setup.typescript = false;
        let js = build_plan(&setup, &NewConfig::default());
        assert!(js[1].command.ends_with("@testing-library/jest-dom"));
    }

    #[test]
    fn each_auth_choice_installs_one_package() {
        let cases = [
            (Auth::NextAuth, "npm install next-auth@beta"),
            (Auth::Clerk, "npm install @clerk/nextjs"),
            (Auth::Lucia, "npm install lucia"),
        ];
        for (auth, expected) in cases {
            let mut setup = setup("shop");
            setup.auth = auth;
            let plan = build_plan(&setup, &NewConfig::default());
            assert_eq!(plan.len(), 2, "{auth:?}");
            assert_eq!(plan[1].command, expected);
        }
    }

    // ── cleanup ───────────────────────────────────────────────────────────────

    fn quiet_output() -> OutputManager {
        let global = GlobalArgs {
            verbose: 0,
            quiet: true,
            no_color: true,
            config: None,
            output_format: crate::cli::OutputFormat::Plain,
        };
        OutputManager::new(&global, &AppConfig::default())
    }

    #[test]
    fn partial_project_is_removed_with_contents() {
        let root = tempfile::tempdir().unwrap();
        let project = root.path().join("shop");
        std::fs::create_dir_all(project.join("node_modules/.bin")).unwrap();
        std::fs::write(project.join("package.json"), "{}").unwrap();

        discard_partial_project(&project, &quiet_output()).unwrap();

        assert!(!project.exists());
        assert!(root.path().exists());
    }

    #[test]
    fn missing_partial_project_is_not_an_error() {
        let root = tempfile::tempdir().unwrap();
        discard_partial_project(&root.path().join("never-created"), &quiet_output()).unwrap();
    }

    #[test]
    fn dot_name_sets_up_in_place() {
        let setup = setup(".");
        assert_eq!(setup.dir, PathBuf::from("/work"));
        assert!(build_plan(&setup, &NewConfig::default())[0]
            .command
            .contains("create-next-app@latest . --use-npm"));
    }

    #[test]
    fn missing_answer_is_internal_error() {
        let answers = AnswerSet::new();
        let err = ProjectSetup::from_answers(&answers, Path::new("/work")).unwrap_err();
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn unknown_choice_is_internal_error() {
        let mut answers = AnswerSet::new();
        answers
            .insert(ORM, Answer::Choice("mongoose".into()))
            .unwrap();
        let err = choice(&answers, ORM, Orm::parse).unwrap_err();
        assert!(err.to_string().contains("unknown orm 'mongoose'"));
    }
}
