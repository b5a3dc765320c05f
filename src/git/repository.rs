use std::cell::Cell;
use std::path::{Path, PathBuf};

use git2::{Repository as Git2Repo, Status, StatusOptions};

use crate::domain::REMOTE_TAG_MARKER;
use crate::error::{GateError, Result};

/// Give up on a remote after this many rejected credentials
const MAX_CREDENTIAL_ATTEMPTS: usize = 4;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open the repository containing `path`, searching parent directories
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }
}

impl super::Repository for Git2Repository {
    fn top_level(&self) -> Result<PathBuf> {
        self.repo
            .workdir()
            .map(Path::to_path_buf)
            .ok_or_else(|| GateError::config("repository is bare, there is no work tree to check"))
    }

    fn hooks_dir(&self) -> Result<PathBuf> {
        let config = self.repo.config()?;
        match config.get_path("core.hooksPath") {
            Ok(path) if path.is_absolute() => Ok(path),
            Ok(path) => Ok(self.top_level()?.join(path)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(self.repo.path().join("hooks")),
            Err(e) => Err(e.into()),
        }
    }

    fn local_tags(&self) -> Result<Vec<String>> {
        let tags = self.repo.tag_names(None)?;

        // same order as `git tag`
        let mut names: Vec<String> = tags.iter().flatten().map(|s| s.to_string()).collect();
        names.sort();
        Ok(names)
    }

    fn uncommitted(&self) -> Result<Vec<String>> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .exclude_submodules(true);

        let statuses = self.repo.statuses(Some(&mut options))?;
        let entries = statuses
            .iter()
            .filter(|entry| entry.status() != Status::CURRENT && !entry.status().is_ignored())
            .map(|entry| {
                format!(
                    "{}: {}",
                    describe_status(entry.status()),
                    entry.path().unwrap_or("(non-utf8 path)")
                )
            })
            .collect();

        Ok(entries)
    }

    fn remotes(&self) -> Result<Vec<String>> {
        let names = self.repo.remotes()?;

        Ok(names.iter().flatten().map(|s| s.to_string()).collect())
    }

    fn remote_tag_refs(&self, remote: &str) -> Result<Vec<String>> {
        let mut remote = self.repo.find_remote(remote)?;

        let mut connection =
            remote.connect_auth(git2::Direction::Fetch, Some(credential_callbacks()), None)?;
        let refs = connection
            .remote()
            .list()?
            .iter()
            .filter(|head| head.name().starts_with(REMOTE_TAG_MARKER))
            .map(|head| format!("{}\t{}", head.oid(), head.name()))
            .collect();

        Ok(refs)
    }
}

fn describe_status(status: Status) -> &'static str {
    if status.is_wt_new() {
        "untracked"
    } else if status.is_index_new() {
        "new file"
    } else if status.is_wt_deleted() || status.is_index_deleted() {
        "deleted"
    } else if status.is_wt_renamed() || status.is_index_renamed() {
        "renamed"
    } else if status.is_conflicted() {
        "conflicted"
    } else {
        "modified"
    }
}

/// Credentials for talking to a remote.
///
/// Tries SSH keys from ~/.ssh/, then the SSH agent, then the default
/// credential helper. libgit2 re-invokes the callback after every rejected
/// credential, so attempts are capped.
fn credential_callbacks<'a>() -> git2::RemoteCallbacks<'a> {
    let attempts = Cell::new(0usize);
    let mut callbacks = git2::RemoteCallbacks::new();

    callbacks.credentials(move |_url, username_from_url, allowed_types| {
        attempts.set(attempts.get() + 1);
        if attempts.get() > MAX_CREDENTIAL_ATTEMPTS {
            return Err(git2::Error::from_str("no usable credentials for remote"));
        }
        let username = username_from_url.unwrap_or("git");

        if allowed_types.contains(git2::CredentialType::SSH_KEY) {
            if let Some(home) = dirs::home_dir() {
                for key in ["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let path = home.join(".ssh").join(key);
                    if path.exists() {
                        if let Ok(cred) = git2::Cred::ssh_key(username, None, &path, None) {
                            return Ok(cred);
                        }
                    }
                }
            }

            if let Ok(cred) = git2::Cred::ssh_key_from_agent(username) {
                return Ok(cred);
            }
        }

        git2::Cred::default()
    });

    callbacks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::Repository;
    use std::fs;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, Git2Repo) {
        let dir = TempDir::new().unwrap();
        let repo = Git2Repo::init(dir.path()).unwrap();
        {
            let mut config = repo.config().unwrap();
            config.set_str("user.name", "Test User").unwrap();
            config.set_str("user.email", "test@example.com").unwrap();
        }
        (dir, repo)
    }

    fn commit_all(repo: &Git2Repo, message: &str) -> git2::Oid {
        let mut index = repo.index().unwrap();
        index
            .add_all(["*"].iter(), git2::IndexAddOption::DEFAULT, None)
            .unwrap();
        index.write().unwrap();
        let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
        let sig = repo.signature().unwrap();
        let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
        let parents: Vec<&git2::Commit> = parent.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    #[test]
    fn test_top_level_and_hooks_dir() {
        let (dir, repo) = init_repo();
        let wrapped = Git2Repository::from_git2(repo);

        let top = wrapped.top_level().unwrap();
        assert_eq!(
            top.canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
        assert!(wrapped.hooks_dir().unwrap().ends_with(".git/hooks"));
    }

    #[test]
    fn test_hooks_path_override() {
        let (_dir, repo) = init_repo();
        repo.config()
            .unwrap()
            .set_str("core.hooksPath", "githooks")
            .unwrap();
        let wrapped = Git2Repository::from_git2(repo);

        let hooks = wrapped.hooks_dir().unwrap();
        assert!(hooks.ends_with("githooks"));
        assert!(hooks.starts_with(wrapped.top_level().unwrap()));
    }

    #[test]
    fn test_open_discovers_from_subdirectory() {
        let (dir, _repo) = init_repo();
        let sub = dir.path().join("pkg").join("inner");
        fs::create_dir_all(&sub).unwrap();

        let wrapped = Git2Repository::open(&sub).unwrap();
        assert_eq!(
            wrapped.top_level().unwrap().canonicalize().unwrap(),
            dir.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_local_tags_and_clean_state() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("README.md"), "hello\n").unwrap();
        let oid = commit_all(&repo, "Initial commit");
        let target = repo.find_object(oid, None).unwrap();
        repo.tag_lightweight("v0.0.1", &target, false).unwrap();
        repo.tag_lightweight("v0.0.2", &target, false).unwrap();
        drop(target);

        let wrapped = Git2Repository::from_git2(repo);
        assert_eq!(wrapped.local_tags().unwrap(), vec!["v0.0.1", "v0.0.2"]);
        assert!(wrapped.uncommitted().unwrap().is_empty());
    }

    #[test]
    fn test_uncommitted_lists_changes() {
        let (dir, repo) = init_repo();
        fs::write(dir.path().join("README.md"), "hello\n").unwrap();
        commit_all(&repo, "Initial commit");

        fs::write(dir.path().join("README.md"), "changed\n").unwrap();
        fs::write(dir.path().join("new.go"), "package main\n").unwrap();

        let wrapped = Git2Repository::from_git2(repo);
        let mut dirty = wrapped.uncommitted().unwrap();
        dirty.sort();
        assert_eq!(dirty, vec!["modified: README.md", "untracked: new.go"]);
    }

    #[test]
    fn test_remotes() {
        let (_dir, repo) = init_repo();
        repo.remote("origin", "https://example.com/me/repo.git")
            .unwrap();
        let wrapped = Git2Repository::from_git2(repo);
        assert_eq!(wrapped.remotes().unwrap(), vec!["origin"]);
    }

    #[test]
    fn test_remote_tag_refs_from_local_remote() {
        let (upstream_dir, upstream) = init_repo();
        fs::write(upstream_dir.path().join("README.md"), "hello\n").unwrap();
        let oid = commit_all(&upstream, "Initial commit");
        let target = upstream.find_object(oid, None).unwrap();
        upstream.tag_lightweight("v1.0.0", &target, false).unwrap();
        upstream.tag_lightweight("v1.0.10", &target, false).unwrap();

        let (_dir, repo) = init_repo();
        let url = upstream_dir.path().to_str().unwrap().to_string();
        repo.remote("origin", &url).unwrap();

        let wrapped = Git2Repository::from_git2(repo);
        let mut refs = wrapped.remote_tag_refs("origin").unwrap();
        refs.sort();
        assert_eq!(refs.len(), 2);
        assert!(refs[0].ends_with("\trefs/tags/v1.0.0"));
        assert!(refs[1].ends_with("\trefs/tags/v1.0.10"));
    }

    #[test]
    fn test_remote_tag_refs_unknown_remote() {
        let (_dir, repo) = init_repo();
        let wrapped = Git2Repository::from_git2(repo);
        assert!(wrapped.remote_tag_refs("nowhere").is_err());
    }
}
