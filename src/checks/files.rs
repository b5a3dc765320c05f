use crate::checks::CheckContext;
use crate::error::{CheckFailure, Result};
use crate::hooks::HookInstaller;

/// Both hooks must exist in the hooks directory
pub fn hooks_installed(ctx: &mut CheckContext<'_>) -> Result<()> {
    let hooks_dir = ctx.repo.hooks_dir()?;
    let installer = HookInstaller::new(&hooks_dir, &ctx.config.binary);

    let mut collected = CheckFailure::default();
    for hook in installer.missing() {
        let path = hook.path_in(&hooks_dir);
        collected.absorb(
            CheckFailure::new(format!(
                "hook '{}' doesn't exist, run:",
                path.display()
            ))
            .suggest(format!(
                "echo exec {} {} > {}",
                ctx.config.binary,
                hook.name(),
                path.display()
            ))
            .suggest(format!("chmod +x {}", path.display())),
        );
    }
    if !collected.is_empty() {
        collected = collected
            .problem("or install all hooks at once:")
            .suggest(format!("{} install-hooks", ctx.config.binary));
    }
    collected.into_result()
}

/// Every configured scaffold file must exist at the top level
pub fn std_files(ctx: &mut CheckContext<'_>) -> Result<()> {
    let mut collected = CheckFailure::default();

    for file in &ctx.config.files {
        if ctx.root().join(&file.path).exists() {
            continue;
        }
        let failure = if file.suggestions.is_empty() {
            CheckFailure::new(format!("file {} not found, create one and retry", file.path))
        } else {
            file.suggestions.iter().fold(
                CheckFailure::new(format!(
                    "`{}` not found, create one and retry, at a minimum run:",
                    file.path
                )),
                |failure, command| failure.suggest(command.clone()),
            )
        };
        collected.absorb(failure);
    }

    collected.into_result()
}
