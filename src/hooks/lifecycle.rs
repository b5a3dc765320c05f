use std::path::{Path, PathBuf};

/// Git hooks git-gate guards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookType {
    PreCommit,
    PrePush,
}

impl HookType {
    pub const ALL: [HookType; 2] = [HookType::PreCommit, HookType::PrePush];

    /// Get the hook name as a string
    pub fn name(&self) -> &'static str {
        match self {
            HookType::PreCommit => "pre-commit",
            HookType::PrePush => "pre-push",
        }
    }

    /// Location of this hook inside `hooks_dir`
    pub fn path_in(&self, hooks_dir: &Path) -> PathBuf {
        hooks_dir.join(self.name())
    }

    /// Script body that hands the hook over to `binary`.
    ///
    /// The hook name doubles as the action name, so `pre-push` runs
    /// `<binary> pre-push`.
    pub fn script(&self, binary: &str) -> String {
        format!("#!/bin/sh\nexec {} {}\n", binary, self.name())
    }
}
