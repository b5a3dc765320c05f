//! Scaffolding of empty Go test files for sources that lack one.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CheckFailure, GateError, Result};

const TEST_SUFFIX: &str = "_test.go";

/// Test file path for a Go source: `a/b.go` gives `a/b_test.go`
pub fn test_path_for(src: &Path) -> PathBuf {
    let stem = src
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    src.with_file_name(format!("{}{}", stem, TEST_SUFFIX))
}

/// Package name from the first line starting with `package`.
///
/// The line must have exactly two whitespace-separated words.
pub fn package_name(content: &str, src: &str) -> Result<String> {
    let line = content
        .lines()
        .find(|line| line.starts_with("package"))
        .ok_or_else(|| failure(format!("failed to extract package name from {}", src)))?;

    let parts: Vec<&str> = line.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(failure(format!(
            "package statement '{}' must have just 2 parts",
            line
        )));
    }
    Ok(parts[1].to_string())
}

/// Body of a fresh test file for `package`
pub fn render(package: &str) -> String {
    format!(
        "package {}\n\nimport (\n\t\"testing\"\n)\n\nfunc TestAll(t *testing.T) {{\n\t// TODO: Add tests\n}}\n",
        package
    )
}

/// Create the test frame next to `src`, never overwriting.
///
/// # Returns
/// * `Ok(path)` - The test file that was written
/// * `Err` - If `src` is itself a test, is missing, has no package clause,
///   or its test file already exists
pub fn make(src: &Path) -> Result<PathBuf> {
    let shown = src.display().to_string();
    if shown.ends_with(TEST_SUFFIX) {
        return Err(failure(format!("{} looks like a test file already", shown)));
    }

    let content = fs::read_to_string(src)
        .map_err(|e| failure(format!("can't read {}: {}", shown, e)))?;

    let test_path = test_path_for(src);
    if test_path.exists() {
        return Err(failure(format!(
            "test file {} already exists, won't overwrite",
            test_path.display()
        )));
    }

    let package = package_name(&content, &shown)?;
    fs::write(&test_path, render(&package)).map_err(|e| {
        failure(format!("failed to write {}: {}", test_path.display(), e))
    })?;
    tracing::info!(path = %test_path.display(), package = %package, "test frame written");

    Ok(test_path)
}

fn failure(message: String) -> GateError {
    GateError::Check(CheckFailure::new(message))
}
