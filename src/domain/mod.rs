//! Domain logic - version tags and their ordering, independent of git

pub mod tag;
pub mod version;
pub mod version_set;

pub use tag::{extract_remote_tag, extract_remote_tags, REMOTE_TAG_MARKER};
pub use version::{is_zero_or_absent, Component, TagFormatError, Version, TAG_PREFIX};
pub use version_set::VersionSet;
