use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

use git_gate::cli::{open_repository, run_action, Action, GateOutcome};
use git_gate::config::{self, Config};
use git_gate::git::{Git2Repository, Repository};
use git_gate::hooks::{HookInstaller, HookType, InstallOutcome};
use git_gate::{testframe, ui, GateError};

#[derive(Parser)]
#[command(
    name = "git-gate",
    version,
    about = "Pre-commit and pre-push gatekeeper for Go repositories"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Log diagnostics to stderr")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check that the git hooks are installed
    Hooks,
    /// Run every check guarding a commit
    #[command(name = "pre-commit")]
    PreCommit,
    /// Check that the standard files exist
    #[command(name = "stdfiles")]
    StdFiles,
    /// Check that every source has a test, then run the tests
    #[command(name = "gotests")]
    GoTests,
    /// Run vet on the local packages
    #[command(name = "govets")]
    GoVets,
    /// Refresh the README table of contents
    #[command(name = "mdtoc")]
    MdToc,
    /// Run every check guarding a push
    #[command(name = "pre-push")]
    PrePush,
    /// Check that nothing is left uncommitted
    #[command(name = "allcommitted")]
    AllCommitted,
    /// Check that a remote is configured
    #[command(name = "haveremote")]
    HaveRemote,
    /// Check that the local tag is ahead of the remote one
    #[command(name = "gittag")]
    GitTag,
    /// Write an empty test file next to each source
    #[command(name = "make-test-frame")]
    MakeTestFrame {
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Install the pre-commit and pre-push hooks
    #[command(name = "install-hooks")]
    InstallHooks {
        #[arg(short, long, help = "Replace existing hooks without asking")]
        force: bool,
    },
}

impl Command {
    fn action(&self) -> Option<Action> {
        let action = match self {
            Command::Hooks => Action::Hooks,
            Command::PreCommit => Action::PreCommit,
            Command::StdFiles => Action::StdFiles,
            Command::GoTests => Action::GoTests,
            Command::GoVets => Action::GoVets,
            Command::MdToc => Action::MdToc,
            Command::PrePush => Action::PrePush,
            Command::AllCommitted => Action::AllCommitted,
            Command::HaveRemote => Action::HaveRemote,
            Command::GitTag => Action::GitTag,
            Command::MakeTestFrame { .. } | Command::InstallHooks { .. } => return None,
        };
        Some(action)
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            match e.downcast_ref::<GateError>() {
                Some(gate_err) => report_error(gate_err),
                None => ui::display_error(&format!("{:#}", e)),
            }
            ExitCode::FAILURE
        }
    }
}

/// Returns whether the gate let the operation through
fn run(args: Args) -> Result<bool> {
    match &args.command {
        Command::MakeTestFrame { files } => Ok(make_test_frames(files)),
        Command::InstallHooks { force } => {
            let (repo, config) = open_with_config(args.config.as_deref())?;
            install_hooks(&repo, &config.binary, *force)
        }
        command => {
            let Some(action) = command.action() else {
                return Ok(false);
            };
            let (repo, config) = open_with_config(args.config.as_deref())?;
            let outcome = run_action(action, &repo, &config)?;
            Ok(finish(outcome))
        }
    }
}

fn open_with_config(config_path: Option<&Path>) -> Result<(Git2Repository, Config)> {
    let repo = open_repository(Path::new("."))?;
    let top_level = repo.top_level()?;
    let config = config::load_config(config_path, Some(top_level.as_path()))?;
    Ok((repo, config))
}

fn finish(outcome: GateOutcome) -> bool {
    if let Some(err) = &outcome.failure {
        ui::display_error(&err.user_lines().join("\n"));
    }
    for warning in outcome.report.warnings() {
        ui::display_boundary_warning(warning);
    }
    ui::display_suggestions(outcome.report.suggestions());

    if outcome.is_success() {
        ui::display_success(&format!(
            "all checks passed: {}",
            outcome.report.passed().join(", ")
        ));
    }
    outcome.is_success()
}

fn report_error(err: &GateError) {
    ui::display_error(&err.user_lines().join("\n"));
    ui::display_suggestions(err.suggestions());
}

fn make_test_frames(files: &[PathBuf]) -> bool {
    let mut ok = true;
    for src in files {
        match testframe::make(src) {
            Ok(path) => ui::display_success(&format!("wrote {}", path.display())),
            Err(e) => {
                report_error(&e);
                ok = false;
            }
        }
    }
    ok
}

fn install_hooks(repo: &dyn Repository, binary: &str, force: bool) -> Result<bool> {
    let hooks_dir = repo.hooks_dir()?;
    let installer = HookInstaller::new(&hooks_dir, binary);

    for hook in HookType::ALL {
        let mut outcome = installer.install(hook, force)?;
        if let InstallOutcome::Skipped { path, .. } = outcome.clone() {
            let prompt = format!(
                "{} already exists and doesn't run {}, replace it?",
                path.display(),
                binary
            );
            if ui::confirm_action(&prompt)? {
                outcome = installer.install(hook, true)?;
            }
        }

        match outcome {
            InstallOutcome::Installed { path, .. } => {
                ui::display_success(&format!("installed {}", path.display()))
            }
            InstallOutcome::AlreadyPresent { path, .. } => {
                ui::display_status(&format!("{} already installed", path.display()))
            }
            InstallOutcome::Skipped { path, .. } => {
                ui::display_status(&format!("left {} untouched", path.display()))
            }
        }
    }
    Ok(true)
}
