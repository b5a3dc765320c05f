use crate::boundary::BoundaryWarning;
use crate::checks::CheckContext;
use crate::domain::{extract_remote_tags, is_zero_or_absent, Version, VersionSet};
use crate::error::{CheckFailure, GateError, Result};

const BOOTSTRAP_TAG: &str = "v0.0.0";

/// Push gate: the highest local tag must be ahead of the highest remote tag.
///
/// A remote without tags, or whose highest tag is `v0.0.0`, lets any local
/// tag through.
pub fn git_tag(ctx: &mut CheckContext<'_>) -> Result<()> {
    let local = local_versions(ctx)?;
    let local_max = local.highest()?;

    let remote_name = ctx.config.remote.clone();
    let remote = remote_versions(ctx, &remote_name)?;
    let remote_max = if remote.has_any() {
        Some(remote.highest()?)
    } else {
        None
    };

    crate::ui::display_status(&format!(
        "local tag: {}, remote tag: {}",
        local_max,
        remote_max.map_or_else(|| "none".to_string(), |v| v.to_string())
    ));
    tracing::debug!(local = local.len(), remote = remote.len(), "tag sets collected");

    match remote_max {
        None => ctx.report.warn(BoundaryWarning::NoRemoteTags {
            remote: remote_name.clone(),
        }),
        Some(max) if !is_zero_or_absent(Some(&max)) && local_max <= max => {
            return Err(behind_remote(local_max, max, &remote_name).into());
        }
        Some(_) => {}
    }

    ctx.report.warn(BoundaryWarning::UnpushedTag {
        tag: local_max.to_string(),
        remote: remote_name.clone(),
    });
    ctx.report
        .suggest(format!("git push {} {}", remote_name, local_max));
    Ok(())
}

fn local_versions(ctx: &CheckContext<'_>) -> Result<VersionSet> {
    let tags = ctx.repo.local_tags()?;
    if tags.is_empty() {
        return Err(CheckFailure::new("no local tags, at a minimum run:")
            .suggest(format!("git tag -a {0} -m {0}", BOOTSTRAP_TAG))
            .into());
    }

    let mut set = VersionSet::new();
    for tag in &tags {
        if let Err(err) = set.add(tag) {
            return Err(CheckFailure::new(format!("bad local tag: {}", err))
                .problem("manually correct using:")
                .suggest(format!("git tag -d {}", tag))
                .into());
        }
    }
    Ok(set)
}

fn remote_versions(ctx: &CheckContext<'_>, remote: &str) -> Result<VersionSet> {
    let refs = ctx.repo.remote_tag_refs(remote).map_err(|err| match err {
        GateError::Git(git_err) => GateError::from(
            CheckFailure::new(format!(
                "cannot list tags of remote '{}': {}",
                remote,
                git_err.message()
            ))
            .problem("check the remote is reachable, or push without checks:")
            .suggest(format!("git ls-remote --tags {}", remote))
            .suggest("git push --no-verify"),
        ),
        other => other,
    })?;
    let tags = extract_remote_tags(&refs);
    VersionSet::from_lines(&tags).map_err(|err| {
        GateError::from(
            CheckFailure::new(format!("bad remote tag on '{}': {}", remote, err))
                .suggest(format!("git tag -a {0} -m {0}", BOOTSTRAP_TAG)),
        )
    })
}

fn behind_remote(local: Version, remote: Version, remote_name: &str) -> CheckFailure {
    let mut failure = CheckFailure::new(format!(
        "local tag {} is not ahead of remote tag {}, tag a new version and push it:",
        local, remote
    ));
    match next_release(remote) {
        Some(next) => {
            failure = failure
                .suggest(format!("git tag -a {0} -m {0}", next))
                .suggest("git push")
                .suggest(format!("git push {} {}", remote_name, next));
        }
        None => {
            failure = failure.problem(format!("no version above {} can be tagged", remote));
        }
    }
    failure
        .problem("or push without checks:")
        .suggest("git push --no-verify")
}

/// The patch release after `remote`, or the next minor or major release
/// once the lower component is exhausted
fn next_release(remote: Version) -> Option<Version> {
    remote
        .next()
        .or_else(|| {
            let minor = remote.minor.checked_add(1)?;
            Some(Version::new(remote.major, minor, 0))
        })
        .or_else(|| {
            let major = remote.major.checked_add(1)?;
            Some(Version::new(major, 0, 0))
        })
}
