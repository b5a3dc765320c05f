//! Hygiene checks run before a commit or push.
//!
//! Each check reads the repository through [`Repository`], runs external
//! tools through the context's [`CommandRunner`], and either passes or
//! returns a [`GateError::Check`] whose suggestions tell the user what to
//! run next. Non-fatal findings go into the context's [`Report`].

pub mod files;
pub mod sources;
pub mod status;
pub mod tags;
pub mod toc;

use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{CheckFailure, GateError, Result};
use crate::git::Repository;
use crate::report::Report;
use crate::run::CommandRunner;

/// Everything a check may look at or write to during one run
pub struct CheckContext<'a> {
    pub repo: &'a dyn Repository,
    pub config: &'a Config,
    pub runner: CommandRunner,
    pub report: Report,
    root: PathBuf,
}

impl<'a> CheckContext<'a> {
    /// Context rooted at the repository's top level; commands run there too
    pub fn new(repo: &'a dyn Repository, config: &'a Config) -> Result<Self> {
        let root = repo.top_level()?;
        Ok(CheckContext {
            repo,
            config,
            runner: CommandRunner::in_dir(&root),
            report: Report::new(),
            root,
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Run an external command, turning a failure into a check failure
    pub fn run_command(&mut self, command: &[String]) -> Result<Vec<String>> {
        self.runner.exec(command).map_err(command_failure)
    }
}

/// A single named check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    HooksInstalled,
    StdFiles,
    SourceTests,
    Vet,
    Toc,
    AllCommitted,
    HaveRemote,
    GitTag,
}

impl Check {
    /// Short name, matching the command-line action that runs it
    pub fn name(&self) -> &'static str {
        match self {
            Check::HooksInstalled => "hooks",
            Check::StdFiles => "stdfiles",
            Check::SourceTests => "gotests",
            Check::Vet => "govets",
            Check::Toc => "mdtoc",
            Check::AllCommitted => "allcommitted",
            Check::HaveRemote => "haveremote",
            Check::GitTag => "gittag",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Check::HooksInstalled => "checking that git hooks are installed",
            Check::StdFiles => "checking that standard files are present",
            Check::SourceTests => "checking for tests",
            Check::Vet => "checking vet on local packages",
            Check::Toc => "checking the table of contents",
            Check::AllCommitted => "checking that everything is locally committed",
            Check::HaveRemote => "checking for remote repositories",
            Check::GitTag => "checking git tags",
        }
    }

    pub fn run(&self, ctx: &mut CheckContext<'_>) -> Result<()> {
        match self {
            Check::HooksInstalled => files::hooks_installed(ctx),
            Check::StdFiles => files::std_files(ctx),
            Check::SourceTests => sources::source_tests(ctx),
            Check::Vet => sources::vet(ctx),
            Check::Toc => toc::toc(ctx),
            Check::AllCommitted => status::all_committed(ctx),
            Check::HaveRemote => status::have_remote(ctx),
            Check::GitTag => tags::git_tag(ctx),
        }
    }
}

/// Present a failed external command as a check failure with its output
pub fn command_failure(err: GateError) -> GateError {
    match err {
        GateError::Command { .. } | GateError::Io(_) => {
            let mut failure = CheckFailure::default();
            for line in err.user_lines() {
                failure = failure.problem(line);
            }
            GateError::Check(failure)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::MockRepository;

    #[test]
    fn test_check_names_are_unique() {
        let all = [
            Check::HooksInstalled,
            Check::StdFiles,
            Check::SourceTests,
            Check::Vet,
            Check::Toc,
            Check::AllCommitted,
            Check::HaveRemote,
            Check::GitTag,
        ];
        let names: std::collections::HashSet<_> = all.iter().map(Check::name).collect();
        assert_eq!(names.len(), all.len());
    }

    #[test]
    fn test_command_failure_keeps_output() {
        let err = command_failure(GateError::Command {
            command: "go vet ./...".to_string(),
            code: Some(1),
            output: vec!["vet: x.go:1: bad".to_string()],
        });
        match err {
            GateError::Check(failure) => {
                assert_eq!(failure.problems.len(), 3);
                assert_eq!(failure.problems[2], "vet: x.go:1: bad");
            }
            other => panic!("expected check failure, got {:?}", other),
        }
    }

    #[test]
    fn test_command_failure_passes_other_errors_through() {
        assert!(matches!(
            command_failure(GateError::EmptySet),
            GateError::EmptySet
        ));
    }

    #[test]
    fn test_context_is_rooted_at_top_level() {
        let repo = MockRepository::new("/work/project");
        let config = Config::default();
        let ctx = CheckContext::new(&repo, &config).unwrap();
        assert_eq!(ctx.root(), Path::new("/work/project"));
    }
}
