use crate::error::{GateError, Result};
use crate::git::Repository;
use std::collections::HashMap;
use std::path::PathBuf;

/// Mock repository for testing without actual git operations
pub struct MockRepository {
    top_level: PathBuf,
    hooks_dir: PathBuf,
    tags: Vec<String>,
    uncommitted: Vec<String>,
    remotes: Vec<String>,
    remote_refs: HashMap<String, Vec<String>>,
}

impl MockRepository {
    /// Create a mock repository rooted at `top_level` with hooks under
    /// `<top_level>/.git/hooks`
    pub fn new(top_level: impl Into<PathBuf>) -> Self {
        let top_level = top_level.into();
        MockRepository {
            hooks_dir: top_level.join(".git").join("hooks"),
            top_level,
            tags: Vec::new(),
            uncommitted: Vec::new(),
            remotes: Vec::new(),
            remote_refs: HashMap::new(),
        }
    }

    /// Add a local tag
    pub fn add_tag(&mut self, name: impl Into<String>) -> &mut Self {
        self.tags.push(name.into());
        self
    }

    /// Mark a path as not committed, e.g. `modified: main.go`
    pub fn add_uncommitted(&mut self, entry: impl Into<String>) -> &mut Self {
        self.uncommitted.push(entry.into());
        self
    }

    /// Configure a remote with the tags it advertises
    pub fn add_remote(&mut self, name: impl Into<String>, tags: &[&str]) -> &mut Self {
        let name = name.into();
        let refs = tags
            .iter()
            .enumerate()
            .map(|(i, tag)| format!("{:040x}\trefs/tags/{}", i + 1, tag))
            .collect();
        self.remotes.push(name.clone());
        self.remote_refs.insert(name, refs);
        self
    }
}

impl Repository for MockRepository {
    fn top_level(&self) -> Result<PathBuf> {
        Ok(self.top_level.clone())
    }

    fn hooks_dir(&self) -> Result<PathBuf> {
        Ok(self.hooks_dir.clone())
    }

    fn local_tags(&self) -> Result<Vec<String>> {
        Ok(self.tags.clone())
    }

    fn uncommitted(&self) -> Result<Vec<String>> {
        Ok(self.uncommitted.clone())
    }

    fn remotes(&self) -> Result<Vec<String>> {
        Ok(self.remotes.clone())
    }

    fn remote_tag_refs(&self, remote: &str) -> Result<Vec<String>> {
        self.remote_refs.get(remote).cloned().ok_or_else(|| {
            GateError::Git(git2::Error::from_str(&format!(
                "remote '{}' does not exist",
                remote
            )))
        })
    }
}
