//! Per-run collection of suggestions and warnings.
//!
//! Checks push what they want the user to see at the end of the run into a
//! [`Report`] owned by the orchestration, instead of a process-wide list.

use crate::boundary::BoundaryWarning;
use crate::error::GateError;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Report {
    suggestions: Vec<String>,
    warnings: Vec<BoundaryWarning>,
    passed: Vec<&'static str>,
}

impl Report {
    pub fn new() -> Self {
        Report::default()
    }

    /// Queue a command for the trailing "suggestion(s):" block
    pub fn suggest(&mut self, command: impl Into<String>) {
        self.suggestions.push(command.into());
    }

    pub fn warn(&mut self, warning: BoundaryWarning) {
        tracing::debug!(%warning, "boundary warning");
        self.warnings.push(warning);
    }

    /// Record that the named check passed
    pub fn pass(&mut self, check: &'static str) {
        self.passed.push(check);
    }

    /// Copy the corrective commands of a failure into the report
    pub fn absorb_failure(&mut self, err: &GateError) {
        self.suggestions
            .extend(err.suggestions().iter().cloned());
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    pub fn warnings(&self) -> &[BoundaryWarning] {
        &self.warnings
    }

    pub fn passed(&self) -> &[&'static str] {
        &self.passed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CheckFailure;

    #[test]
    fn test_report_keeps_order() {
        let mut report = Report::new();
        report.suggest("git status");
        report.suggest("git add $FILE(s)");
        assert_eq!(report.suggestions(), ["git status", "git add $FILE(s)"]);
    }

    #[test]
    fn test_report_absorbs_failure_suggestions() {
        let mut report = Report::new();
        report.suggest("mdtoc setup");
        let err = GateError::Check(
            CheckFailure::new("no remote repository is configured")
                .suggest("git remote add $REMOTE"),
        );
        report.absorb_failure(&err);
        assert_eq!(
            report.suggestions(),
            ["mdtoc setup", "git remote add $REMOTE"]
        );

        report.absorb_failure(&GateError::EmptySet);
        assert_eq!(report.suggestions().len(), 2);
    }

    #[test]
    fn test_report_warnings_and_passes() {
        let mut report = Report::new();
        report.warn(BoundaryWarning::NoRemoteTags {
            remote: "origin".to_string(),
        });
        report.pass("stdfiles");
        assert_eq!(report.warnings().len(), 1);
        assert_eq!(report.passed(), ["stdfiles"]);
    }
}
