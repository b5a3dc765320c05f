//! Git operations abstraction layer
//!
//! The checks only need a handful of read-only facts about the repository:
//! where it lives, where its hooks go, which tags and remotes it has, and
//! whether the work tree is clean. The [Repository] trait captures exactly
//! that, so checks can be exercised against [mock::MockRepository] while the
//! binary uses [repository::Git2Repository].
//!
//! ```no_run
//! # use git_gate::git::{Git2Repository, Repository};
//! # fn example() -> git_gate::Result<()> {
//! let repo = Git2Repository::open(".")?;
//! for tag in repo.local_tags()? {
//!     println!("{}", tag);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use std::path::PathBuf;

use crate::error::Result;

/// Read-only view of a git repository used by the checks.
///
/// ## Error Handling
///
/// Implementations map underlying errors (like `git2::Error`) to
/// [crate::error::GateError] variants.
pub trait Repository {
    /// Top level of the work tree
    ///
    /// # Returns
    /// * `Ok(PathBuf)` - Absolute path of the work tree root
    /// * `Err` - For bare repositories, which have no work tree
    fn top_level(&self) -> Result<PathBuf>;

    /// Directory git runs hooks from, honouring `core.hooksPath`
    fn hooks_dir(&self) -> Result<PathBuf>;

    /// Names of all local tags (the `git tag` listing)
    fn local_tags(&self) -> Result<Vec<String>>;

    /// Paths that are modified, staged or untracked.
    ///
    /// An empty list is the "working tree clean" state. Each entry reads
    /// `<state>: <path>`, e.g. `modified: src/main.go`.
    fn uncommitted(&self) -> Result<Vec<String>>;

    /// Configured remote names
    fn remotes(&self) -> Result<Vec<String>>;

    /// Refs advertised by `remote`, one `<oid>\t<ref name>` line per ref.
    ///
    /// This is the `git ls-remote --tags <remote>` equivalent; only tag refs
    /// are returned.
    ///
    /// # Arguments
    /// * `remote` - Name of the remote (e.g., "origin")
    fn remote_tag_refs(&self, remote: &str) -> Result<Vec<String>>;
}
