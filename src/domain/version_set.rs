use crate::domain::{TagFormatError, Version};
use crate::error::{GateError, Result};

/// Accumulates the versions found among a repository's tags.
///
/// Versions keep their insertion order and duplicates are kept. A raw string
/// that fails to parse is never stored; the error goes back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VersionSet {
    versions: Vec<Version>,
}

impl VersionSet {
    pub fn new() -> Self {
        VersionSet {
            versions: Vec::new(),
        }
    }

    /// Build a set from lines of command output, stopping at the first line
    /// that is not a version tag.
    pub fn from_lines<I, S>(lines: I) -> std::result::Result<Self, TagFormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut set = VersionSet::new();
        for line in lines {
            set.add(line.as_ref())?;
        }
        Ok(set)
    }

    /// Parse `raw` and append it
    pub fn add(&mut self, raw: &str) -> std::result::Result<(), TagFormatError> {
        let version = Version::parse(raw)?;
        self.versions.push(version);
        Ok(())
    }

    pub fn has_any(&self) -> bool {
        !self.versions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Version> {
        self.versions.iter()
    }

    /// The maximum version held.
    ///
    /// Fails with [`GateError::EmptySet`] when nothing was added; callers
    /// treat that as "no tags yet" rather than a crash.
    pub fn highest(&self) -> Result<Version> {
        self.versions.iter().max().copied().ok_or(GateError::EmptySet)
    }
}
