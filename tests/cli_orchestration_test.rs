use std::fs;
use std::path::Path;

use git_gate::checks::Check;
use git_gate::cli::{run_action, Action};
use git_gate::config::Config;
use git_gate::git::MockRepository;
use git_gate::GateError;
use tempfile::TempDir;

/// A project that passes every pre-commit check with stand-in tools
fn healthy_project() -> (TempDir, Config) {
    let dir = TempDir::new().unwrap();
    let root = dir.path();

    let hooks = root.join(".git").join("hooks");
    fs::create_dir_all(&hooks).unwrap();
    fs::write(hooks.join("pre-commit"), "exec git-gate pre-commit\n").unwrap();
    fs::write(hooks.join("pre-push"), "exec git-gate pre-push\n").unwrap();

    for name in ["LICENSE.md", ".gitignore", "go.mod"] {
        fs::write(root.join(name), "").unwrap();
    }
    fs::write(root.join("README.md"), "# widget\n").unwrap();
    write_source(root, "main.go");
    write_source(root, "main_test.go");

    let mut config = Config::default();
    config.commands.test = vec!["true".to_string()];
    config.commands.vet = vec!["true".to_string()];
    config.commands.toc = vec!["true".to_string()];
    (dir, config)
}

fn write_source(root: &Path, name: &str) {
    fs::write(root.join(name), "package main\n").unwrap();
}

#[cfg(unix)]
#[test]
fn test_pre_commit_passes() {
    let (dir, config) = healthy_project();
    let repo = MockRepository::new(dir.path());

    let outcome = run_action(Action::PreCommit, &repo, &config).unwrap();
    assert!(outcome.is_success(), "failure: {:?}", outcome.failure);
    assert_eq!(
        outcome.report.passed(),
        ["hooks", "stdfiles", "gotests", "govets", "mdtoc"]
    );
    // README without markers is only a warning
    assert_eq!(outcome.report.warnings().len(), 1);
}

#[cfg(unix)]
#[test]
fn test_pre_push_passes_when_tag_is_ahead() {
    let (dir, config) = healthy_project();
    let mut repo = MockRepository::new(dir.path());
    repo.add_tag("v0.1.0").add_tag("v0.2.0");
    repo.add_remote("origin", &["v0.1.0"]);

    let outcome = run_action(Action::PrePush, &repo, &config).unwrap();
    assert!(outcome.is_success(), "failure: {:?}", outcome.failure);
    assert_eq!(outcome.report.passed().len(), 8);
    assert_eq!(
        outcome.report.suggestions().last().map(String::as_str),
        Some("git push origin v0.2.0")
    );
}

#[cfg(unix)]
#[test]
fn test_pre_push_stops_at_uncommitted_work() {
    let (dir, config) = healthy_project();
    let mut repo = MockRepository::new(dir.path());
    repo.add_uncommitted("modified: main.go");
    repo.add_tag("v0.2.0");
    repo.add_remote("origin", &["v0.1.0"]);

    let outcome = run_action(Action::PrePush, &repo, &config).unwrap();
    assert!(!outcome.is_success());
    assert_eq!(outcome.report.passed().len(), 5);
    assert!(!outcome.report.passed().contains(&Check::GitTag.name()));
    assert!(outcome
        .report
        .suggestions()
        .contains(&"git commit -m $MESSAGE".to_string()));
}

#[cfg(unix)]
#[test]
fn test_pre_push_rejects_stale_tag() {
    let (dir, config) = healthy_project();
    let mut repo = MockRepository::new(dir.path());
    repo.add_tag("v1.0.0");
    repo.add_remote("origin", &["v1.0.0"]);

    let outcome = run_action(Action::PrePush, &repo, &config).unwrap();
    match &outcome.failure {
        Some(GateError::Check(failure)) => {
            assert!(failure.problems[0].contains("not ahead"));
        }
        other => panic!("expected check failure, got {:?}", other),
    }
    let suggestions = outcome.report.suggestions();
    assert!(suggestions.contains(&"git tag -a v1.0.1 -m v1.0.1".to_string()));
    assert_eq!(suggestions.last().map(String::as_str), Some("git push --no-verify"));
}

#[test]
fn test_mdtoc_skips_hook_check() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("README.md"), "# widget\n").unwrap();
    let repo = MockRepository::new(dir.path());

    let outcome = run_action(Action::MdToc, &repo, &Config::default()).unwrap();
    assert!(outcome.is_success());
    assert_eq!(outcome.report.passed(), ["mdtoc"]);
}

#[cfg(unix)]
#[test]
fn test_failing_tests_surface_tool_output() {
    let (dir, mut config) = healthy_project();
    config.commands.test = vec![
        "sh".to_string(),
        "-c".to_string(),
        "echo '--- FAIL: TestAll'; exit 1".to_string(),
    ];
    let repo = MockRepository::new(dir.path());

    let outcome = run_action(Action::GoTests, &repo, &config).unwrap();
    let lines = outcome.failure.expect("tests should fail").user_lines();
    assert!(lines.iter().any(|line| line == "--- FAIL: TestAll"));
}
