use std::fmt;

/// Warnings raised at the edges of the workflow: first-time setups and
/// reminders. These are non-fatal and never block a commit or push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryWarning {
    /// The README carries no table-of-contents markers, so it is not refreshed
    MissingToc { file: String },
    /// The remote has no version tags yet; any local tag is ahead
    NoRemoteTags { remote: String },
    /// The local tag is ahead of the remote and still needs pushing
    UnpushedTag { tag: String, remote: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::MissingToc { file } => {
                write!(f, "(Not fatal) {} has no Table of Contents section", file)
            }
            BoundaryWarning::NoRemoteTags { remote } => {
                write!(f, "remote '{}' has no version tags yet", remote)
            }
            BoundaryWarning::UnpushedTag { tag, remote } => {
                write!(
                    f,
                    "local tag {} will need pushing to '{}', remember to run: git push {} {}",
                    tag, remote, remote, tag
                )
            }
        }
    }
}
