use std::path::Path;

use crate::checks::CheckContext;
use crate::error::{CheckFailure, Result};

/// Nothing may be left modified, staged or untracked
pub fn all_committed(ctx: &mut CheckContext<'_>) -> Result<()> {
    let entries = ctx.repo.uncommitted()?;
    if entries.is_empty() {
        return Ok(());
    }

    let failure = entries.iter().fold(
        CheckFailure::new("not everything is committed:"),
        |failure, entry| failure.problem(format!("  {}", entry)),
    );
    Err(failure
        .suggest("git status")
        .suggest("git add $FILE(s)")
        .suggest("git commit -m $MESSAGE")
        .into())
}

/// At least one remote, and the configured one among them
pub fn have_remote(ctx: &mut CheckContext<'_>) -> Result<()> {
    let remotes = ctx.repo.remotes()?;
    if remotes.is_empty() {
        let suggestion = remote_add_suggestion(ctx.root());
        return Err(CheckFailure::new("no remote repository is configured")
            .suggest(suggestion)
            .into());
    }

    crate::ui::display_status(&format!("remotes: {}", remotes.join(", ")));

    let wanted = &ctx.config.remote;
    if !remotes.iter().any(|remote| remote == wanted) {
        return Err(CheckFailure::new(format!(
            "remote '{}' is not configured, have: {}",
            wanted,
            remotes.join(", ")
        ))
        .suggest(format!("git remote add {} $URL", wanted))
        .into());
    }
    Ok(())
}

/// Guess the remote URL from a `.../github.com/<owner>/<repo>` checkout path
pub fn remote_add_suggestion(root: &Path) -> String {
    let shown = root.to_string_lossy();
    match shown.split_once("github.com") {
        Some((_, rest)) if !rest.trim_start_matches('/').is_empty() => format!(
            "git remote add origin https://github.com/{}.git",
            rest.trim_start_matches('/')
        ),
        _ => "git remote add $REMOTE".to_string(),
    }
}
