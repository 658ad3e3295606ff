use std::time::Duration;

use crate::outcome::ExampleStatus;

/// Totals of a finished suite run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct SuiteReport {
    pub passed: usize,
    pub failed: usize,
    pub errored: usize,
    pub duration: Duration,
}

impl SuiteReport {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.errored
    }

    /// Whether no example failed or errored. An empty run is a success.
    pub fn is_success(&self) -> bool {
        self.failed == 0 && self.errored == 0
    }

    pub(crate) fn count(&mut self, status: ExampleStatus) {
        match status {
            ExampleStatus::Success => self.passed += 1,
            ExampleStatus::Failure => self.failed += 1,
            ExampleStatus::Error => self.errored += 1,
        }
    }
}
