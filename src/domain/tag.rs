use std::sync::OnceLock;

use regex::Regex;

/// Marker that identifies tag refs in a remote listing
pub const REMOTE_TAG_MARKER: &str = "refs/tags/";

// ASCII digits only; `\d` would also match other Unicode digits
const TAG_FORMAT: &str = r"v[0-9]+\.[0-9]+\.[0-9]+";

fn tag_regex() -> Option<&'static Regex> {
    static TAG_RE: OnceLock<Option<Regex>> = OnceLock::new();
    TAG_RE.get_or_init(|| Regex::new(TAG_FORMAT).ok()).as_ref()
}

/// Pull the version tag out of one line of a remote tag listing.
///
/// Accepts both `git ls-remote --tags` lines (`<sha>\trefs/tags/v1.2.3`) and
/// bare ref names, including peeled entries such as `refs/tags/v1.2.3^{}`.
/// Lines that are not tag refs, or carry no `vX.Y.Z`, give `None`.
///
/// # Example
/// ```
/// use git_gate::domain::extract_remote_tag;
/// assert_eq!(extract_remote_tag("abc123\trefs/tags/v1.2.3"), Some("v1.2.3"));
/// assert_eq!(extract_remote_tag("abc123\trefs/heads/main"), None);
/// ```
pub fn extract_remote_tag(line: &str) -> Option<&str> {
    if !line.contains(REMOTE_TAG_MARKER) {
        return None;
    }
    tag_regex()?.find(line).map(|m| m.as_str())
}

/// Extract every version tag from a remote listing, in order
pub fn extract_remote_tags<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .filter_map(|line| extract_remote_tag(line.as_ref()))
        .map(str::to_string)
        .collect()
}
