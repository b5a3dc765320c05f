use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Literal prefix every version tag carries
pub const TAG_PREFIX: char = 'v';

/// Which part of a `vMAJOR.MINOR.PATCH` tag was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Component {
    Prefix,
    Segments,
    Major,
    Minor,
    Patch,
}

impl fmt::Display for Component {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Component::Prefix => "prefix",
            Component::Segments => "segment count",
            Component::Major => "major",
            Component::Minor => "minor",
            Component::Patch => "patch",
        };
        f.write_str(name)
    }
}

/// A raw tag string that is not of the form `vMAJOR.MINOR.PATCH`
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagFormatError {
    #[error("tag '{raw}' doesn't start with 'v'")]
    MissingPrefix { raw: String },

    #[error("tag '{raw}' doesn't have 3 parts, found {found}")]
    SegmentCount { raw: String, found: usize },

    #[error("can't parse {component} number '{segment}' of tag '{raw}'")]
    InvalidNumber {
        raw: String,
        component: Component,
        segment: String,
    },
}

impl TagFormatError {
    /// The offending input, verbatim
    pub fn raw(&self) -> &str {
        match self {
            TagFormatError::MissingPrefix { raw }
            | TagFormatError::SegmentCount { raw, .. }
            | TagFormatError::InvalidNumber { raw, .. } => raw,
        }
    }

    pub fn component(&self) -> Component {
        match self {
            TagFormatError::MissingPrefix { .. } => Component::Prefix,
            TagFormatError::SegmentCount { .. } => Component::Segments,
            TagFormatError::InvalidNumber { component, .. } => *component,
        }
    }
}

/// Semantic version parsed from a `vMAJOR.MINOR.PATCH` tag.
///
/// Ordering is lexicographic over (major, minor, patch), which the derived
/// `Ord` provides through field declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a tag such as "v1.2.3".
    ///
    /// The `v` prefix is mandatory and each of the three segments must be a
    /// non-empty run of ASCII digits. Leading zeros are accepted, so "v01.2.3"
    /// parses but does not format back to the same text.
    pub fn parse(raw: &str) -> Result<Self, TagFormatError> {
        let body = raw
            .strip_prefix(TAG_PREFIX)
            .ok_or_else(|| TagFormatError::MissingPrefix {
                raw: raw.to_string(),
            })?;

        let parts: Vec<&str> = body.split('.').collect();
        if parts.len() != 3 {
            return Err(TagFormatError::SegmentCount {
                raw: raw.to_string(),
                found: parts.len(),
            });
        }

        Ok(Version {
            major: parse_component(raw, parts[0], Component::Major)?,
            minor: parse_component(raw, parts[1], Component::Minor)?,
            patch: parse_component(raw, parts[2], Component::Patch)?,
        })
    }

    /// Three-way comparison, major first, then minor, then patch
    pub fn compare(&self, other: &Version) -> Ordering {
        self.cmp(other)
    }

    /// True for v0.0.0
    pub fn is_zero(&self) -> bool {
        self.major == 0 && self.minor == 0 && self.patch == 0
    }

    /// The next patch release: only `patch` moves, nothing carries into
    /// minor or major.
    ///
    /// `None` when `patch` is already `u32::MAX`.
    pub fn next(&self) -> Option<Self> {
        let patch = self.patch.checked_add(1)?;
        Some(Version {
            major: self.major,
            minor: self.minor,
            patch,
        })
    }
}

/// An absent version (no tags yet) counts as zero.
pub fn is_zero_or_absent(version: Option<&Version>) -> bool {
    version.map_or(true, Version::is_zero)
}

fn parse_component(raw: &str, segment: &str, component: Component) -> Result<u32, TagFormatError> {
    let invalid = || TagFormatError::InvalidNumber {
        raw: raw.to_string(),
        component,
        segment: segment.to_string(),
    };

    // u32::from_str would accept a leading '+'
    if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    segment.parse::<u32>().map_err(|_| invalid())
}

impl FromStr for Version {
    type Err = TagFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}.{}.{}",
            TAG_PREFIX, self.major, self.minor, self.patch
        )
    }
}
