use std::fs;

use crate::boundary::BoundaryWarning;
use crate::checks::CheckContext;
use crate::config::TocConfig;
use crate::error::{CheckFailure, Result};

/// How many lines open and close a table of contents
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerCount {
    pub start: usize,
    pub end: usize,
}

impl MarkerCount {
    pub fn scan(content: &str, toc: &TocConfig) -> Self {
        let mut count = MarkerCount { start: 0, end: 0 };
        for line in content.lines() {
            if line.starts_with(&toc.start) {
                count.start += 1;
            } else if line.starts_with(&toc.end) {
                count.end += 1;
            }
        }
        count
    }

    pub fn total(&self) -> usize {
        self.start + self.end
    }
}

/// Refresh the README table of contents when it has one
pub fn toc(ctx: &mut CheckContext<'_>) -> Result<()> {
    let config = ctx.config;
    let toc = &config.toc;
    let path = ctx.root().join(&toc.file);
    let content = fs::read_to_string(&path).map_err(|e| {
        CheckFailure::new(format!("failed to read {}: {}", path.display(), e))
    })?;

    let count = MarkerCount::scan(&content, toc);
    tracing::debug!(start = count.start, end = count.end, file = %toc.file, "toc markers");

    match (count.start, count.end) {
        (0, 0) => {
            ctx.report.warn(BoundaryWarning::MissingToc {
                file: toc.file.clone(),
            });
            let program = config.commands.toc.first().map(String::as_str);
            if program == Some("mdtoc") {
                ctx.report
                    .suggest("go install github.com/kubernetes-sigs/mdtoc@latest");
            }
            ctx.report.suggest(format!(
                "add '{}' and '{}' lines to {}",
                toc.start, toc.end, toc.file
            ));
            Ok(())
        }
        (1, 1) => {
            crate::ui::display_status(&format!("running {}", config.commands.toc.join(" ")));
            ctx.run_command(&config.commands.toc)?;
            Ok(())
        }
        _ => Err(CheckFailure::new(format!(
            "{} has {} table of contents markers ({} start, {} end), expected one of each",
            toc.file,
            count.total(),
            count.start,
            count.end
        ))
        .into()),
    }
}
