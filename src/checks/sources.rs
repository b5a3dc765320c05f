use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::checks::CheckContext;
use crate::config::SourcesConfig;
use crate::error::{CheckFailure, GateError, Result};

/// Sources and tests found under the project root, relative to it
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SourceScan {
    pub sources: BTreeSet<PathBuf>,
    pub tests: BTreeSet<PathBuf>,
}

impl SourceScan {
    /// Walk `root`, classifying files by extension and test suffix
    pub fn collect(root: &Path, config: &SourcesConfig) -> Result<Self> {
        let mut scan = SourceScan::default();

        let walker = WalkDir::new(root).into_iter().filter_entry(|entry| {
            entry.depth() == 0
                || !entry.file_type().is_dir()
                || !config
                    .skip_dirs
                    .iter()
                    .any(|skip| entry.file_name().to_str() == Some(skip.as_str()))
        });

        for entry in walker {
            let entry = entry.map_err(|e| {
                GateError::Check(CheckFailure::new(format!("cannot scan sources: {}", e)))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(config.extension.as_str()) {
                continue;
            }
            let relative = path.strip_prefix(root).unwrap_or(path).to_path_buf();
            if is_test(&relative, config) {
                scan.tests.insert(relative);
            } else {
                scan.sources.insert(relative);
            }
        }

        Ok(scan)
    }

    /// Sources whose expected test file is absent, with that test path
    pub fn untested(&self, config: &SourcesConfig) -> Vec<(PathBuf, PathBuf)> {
        self.sources
            .iter()
            .map(|src| (src.clone(), expected_test(src, config)))
            .filter(|(_, test)| !self.tests.contains(test))
            .collect()
    }
}

fn is_test(path: &Path, config: &SourcesConfig) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .map_or(false, |stem| stem.ends_with(&config.test_suffix))
}

/// `a/b.go` expects `a/b_test.go`
pub fn expected_test(src: &Path, config: &SourcesConfig) -> PathBuf {
    let stem = src
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    src.with_file_name(format!(
        "{}{}.{}",
        stem, config.test_suffix, config.extension
    ))
}

/// Every source needs a test, and the test suite must pass
pub fn source_tests(ctx: &mut CheckContext<'_>) -> Result<()> {
    let config = ctx.config;
    let sources = &config.sources;
    let scan = SourceScan::collect(ctx.root(), sources)?;
    let untested = scan.untested(sources);
    tracing::debug!(
        sources = scan.sources.len(),
        tests = scan.tests.len(),
        untested = untested.len(),
        "source scan finished"
    );

    let mut collected = CheckFailure::default();
    for (src, test) in &untested {
        collected.absorb(CheckFailure::new(format!(
            "source '{}' lacks a test '{}'",
            src.display(),
            test.display()
        )));
    }

    if !scan.tests.is_empty() {
        crate::ui::display_status(&format!("running {}", config.commands.test.join(" ")));
        if let Err(err) = ctx.run_command(&config.commands.test) {
            match err {
                GateError::Check(failure) => collected.absorb(failure),
                other => return Err(other),
            }
        }
    }

    if !untested.is_empty() {
        collected = collected.problem("at a minimum run:");
        for (src, _) in &untested {
            collected = collected.suggest(format!(
                "{} make-test-frame {}",
                config.binary,
                src.display()
            ));
        }
    }

    collected.into_result()
}

/// Static analysis must pass
pub fn vet(ctx: &mut CheckContext<'_>) -> Result<()> {
    let config = ctx.config;
    crate::ui::display_status(&format!("running {}", config.commands.vet.join(" ")));
    ctx.run_command(&config.commands.vet)?;
    Ok(())
}
