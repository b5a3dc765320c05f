use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::hooks::HookType;

/// What happened to one hook during installation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed { hook: HookType, path: PathBuf },
    AlreadyPresent { hook: HookType, path: PathBuf },
    /// An unrelated hook is in the way and overwriting was not allowed
    Skipped { hook: HookType, path: PathBuf },
}

/// Writes and inspects the git hooks that call back into git-gate
pub struct HookInstaller<'a> {
    hooks_dir: &'a Path,
    binary: &'a str,
}

impl<'a> HookInstaller<'a> {
    pub fn new(hooks_dir: &'a Path, binary: &'a str) -> Self {
        HookInstaller { hooks_dir, binary }
    }

    /// Hooks that do not exist yet
    pub fn missing(&self) -> Vec<HookType> {
        HookType::ALL
            .into_iter()
            .filter(|hook| !hook.path_in(self.hooks_dir).exists())
            .collect()
    }

    /// Whether an existing hook already hands over to our binary
    pub fn is_ours(&self, hook: HookType) -> Result<bool> {
        let path = hook.path_in(self.hooks_dir);
        if !path.is_file() {
            return Ok(false);
        }
        let content = fs::read_to_string(&path)?;
        Ok(content.contains(&format!("{} {}", self.binary, hook.name())))
    }

    /// Install `hook`, replacing a foreign script only when `overwrite` is set
    pub fn install(&self, hook: HookType, overwrite: bool) -> Result<InstallOutcome> {
        let path = hook.path_in(self.hooks_dir);

        if self.is_ours(hook)? {
            return Ok(InstallOutcome::AlreadyPresent { hook, path });
        }
        if path.exists() && !overwrite {
            return Ok(InstallOutcome::Skipped { hook, path });
        }

        fs::create_dir_all(self.hooks_dir)?;
        fs::write(&path, hook.script(self.binary))?;
        make_executable(&path)?;
        tracing::info!(hook = hook.name(), path = %path.display(), "hook installed");

        Ok(InstallOutcome::Installed { hook, path })
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mut perms = fs::metadata(path)?.permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms)?;
    Ok(())
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
