//! Git hooks git-gate runs from
//!
//! - pre-commit: hygiene checks before a commit is recorded
//! - pre-push: the pre-commit checks plus commit, remote and tag checks

pub mod installer;
pub mod lifecycle;

pub use installer::{HookInstaller, InstallOutcome};
pub use lifecycle::HookType;
