//! Gate workflow orchestration
//!
//! Maps each command-line action onto the ordered list of checks it runs,
//! and runs them against a repository. Kept apart from `main.rs` so the
//! workflow can be driven programmatically (and tested against a
//! [`MockRepository`](crate::git::MockRepository)) without clap.

use std::path::Path;

use crate::checks::{Check, CheckContext};
use crate::config::Config;
use crate::error::{CheckFailure, GateError, Result};
use crate::git::{Git2Repository, Repository};
use crate::report::Report;
use crate::ui;

const PRE_COMMIT: [Check; 5] = [
    Check::HooksInstalled,
    Check::StdFiles,
    Check::SourceTests,
    Check::Vet,
    Check::Toc,
];

const PUSH_ONLY: [Check; 3] = [Check::AllCommitted, Check::HaveRemote, Check::GitTag];

/// What the user asked the gate to verify
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Hooks,
    PreCommit,
    StdFiles,
    GoTests,
    GoVets,
    MdToc,
    PrePush,
    AllCommitted,
    HaveRemote,
    GitTag,
}

impl Action {
    pub const ALL: [Action; 10] = [
        Action::Hooks,
        Action::PreCommit,
        Action::StdFiles,
        Action::GoTests,
        Action::GoVets,
        Action::MdToc,
        Action::PrePush,
        Action::AllCommitted,
        Action::HaveRemote,
        Action::GitTag,
    ];

    /// The command-line spelling of the action
    pub fn name(&self) -> &'static str {
        match self {
            Action::Hooks => "hooks",
            Action::PreCommit => "pre-commit",
            Action::StdFiles => "stdfiles",
            Action::GoTests => "gotests",
            Action::GoVets => "govets",
            Action::MdToc => "mdtoc",
            Action::PrePush => "pre-push",
            Action::AllCommitted => "allcommitted",
            Action::HaveRemote => "haveremote",
            Action::GitTag => "gittag",
        }
    }

    pub fn from_name(name: &str) -> Option<Action> {
        Action::ALL.into_iter().find(|action| action.name() == name)
    }

    /// Checks in the order they run.
    ///
    /// Single-check actions verify the hooks first, except `mdtoc`, which
    /// only touches the README.
    pub fn checks(&self) -> Vec<Check> {
        let single = |check: Check| vec![Check::HooksInstalled, check];
        match self {
            Action::Hooks => vec![Check::HooksInstalled],
            Action::PreCommit => PRE_COMMIT.to_vec(),
            Action::StdFiles => single(Check::StdFiles),
            Action::GoTests => single(Check::SourceTests),
            Action::GoVets => single(Check::Vet),
            Action::MdToc => vec![Check::Toc],
            Action::PrePush => PRE_COMMIT.iter().chain(PUSH_ONLY.iter()).copied().collect(),
            Action::AllCommitted => single(Check::AllCommitted),
            Action::HaveRemote => single(Check::HaveRemote),
            Action::GitTag => single(Check::GitTag),
        }
    }
}

/// Result of running an action: the failure that stopped it, if any, and
/// everything the checks asked to show the user.
#[derive(Debug)]
pub struct GateOutcome {
    pub failure: Option<GateError>,
    pub report: Report,
}

impl GateOutcome {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }
}

/// Run every check of `action` in order, stopping at the first failure.
///
/// The suggestions of a failed check are moved into the report, after any
/// non-fatal ones issued by earlier checks.
///
/// # Errors
/// Only when the repository's top level cannot be determined; check
/// failures are returned inside [`GateOutcome`].
pub fn run_action(action: Action, repo: &dyn Repository, config: &Config) -> Result<GateOutcome> {
    let mut ctx = CheckContext::new(repo, config)?;
    tracing::debug!(action = action.name(), root = %ctx.root().display(), "running action");

    let failure = run_checks(&action.checks(), &mut ctx);
    if let Some(err) = &failure {
        ctx.report.absorb_failure(err);
    }

    Ok(GateOutcome {
        failure,
        report: ctx.report,
    })
}

/// Run `checks` against `ctx`, returning the first failure
pub fn run_checks(checks: &[Check], ctx: &mut CheckContext<'_>) -> Option<GateError> {
    for check in checks {
        ui::display_title(check.title());
        match check.run(ctx) {
            Ok(()) => {
                tracing::debug!(check = check.name(), "check passed");
                ctx.report.pass(check.name());
            }
            Err(err) => {
                tracing::debug!(check = check.name(), error = %err, "check failed");
                return Some(err);
            }
        }
    }
    None
}

/// Open the repository containing `path`.
///
/// Outside a repository this fails with a check failure suggesting
/// `git init`, so the user gets the same guidance as for any other check.
pub fn open_repository(path: &Path) -> Result<Git2Repository> {
    Git2Repository::open(path).map_err(|err| match err {
        GateError::Git(git_err) if git_err.code() == git2::ErrorCode::NotFound => {
            CheckFailure::new(format!(
                "{} is not inside a git repository",
                path.display()
            ))
            .suggest("git init")
            .into()
        }
        other => other,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;
    use tempfile::TempDir;

    #[test]
    fn test_action_names_round_trip() {
        for action in Action::ALL {
            assert_eq!(Action::from_name(action.name()), Some(action));
        }
        assert_eq!(Action::from_name("publish"), None);
    }

    #[test]
    fn test_pre_push_extends_pre_commit() {
        let pre_commit = Action::PreCommit.checks();
        let pre_push = Action::PrePush.checks();
        assert_eq!(&pre_push[..pre_commit.len()], &pre_commit[..]);
        assert_eq!(
            &pre_push[pre_commit.len()..],
            &[Check::AllCommitted, Check::HaveRemote, Check::GitTag]
        );
    }

    #[test]
    fn test_single_actions_check_hooks_first() {
        assert_eq!(
            Action::GitTag.checks(),
            vec![Check::HooksInstalled, Check::GitTag]
        );
        assert_eq!(Action::MdToc.checks(), vec![Check::Toc]);
        assert_eq!(Action::Hooks.checks(), vec![Check::HooksInstalled]);
    }

    #[test]
    fn test_run_action_stops_at_first_failure() {
        let dir = TempDir::new().unwrap();
        let repo = MockRepository::new(dir.path());
        let config = Config::default();

        let outcome = run_action(Action::StdFiles, &repo, &config).unwrap();
        assert!(!outcome.is_success());
        assert!(outcome.report.passed().is_empty());
        assert_eq!(
            outcome.report.suggestions().last().map(String::as_str),
            Some("git-gate install-hooks")
        );
    }

    #[test]
    fn test_open_repository_outside_git() {
        let dir = TempDir::new().unwrap();
        match open_repository(dir.path()) {
            Err(err) => assert_eq!(err.suggestions(), ["git init"]),
            Ok(_) => panic!("a bare temp dir is not a repository"),
        }
    }
}
