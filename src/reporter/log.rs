use tracing::{debug, info, warn};

use crate::{
    ExampleGroup, SuiteReport,
    outcome::ExampleOutcome,
    reporter::{ExampleRan, Reporter},
};

/// A reporter that turns the run into `tracing` events.
///
/// Successful examples are logged at `info`, failed and errored ones at
/// `warn`. Whatever subscriber the caller installed decides where they go.
#[derive(Debug, Default, Clone)]
pub struct LogReporter;

impl<W> Reporter<W> for LogReporter {
    fn group_started(&mut self, group: &ExampleGroup<W>, depth: usize) {
        debug!(group = group.description(), depth, "group started");
    }

    fn example_ran(&mut self, ran: ExampleRan<'_, W>) {
        let example = ran.full_description();
        match &ran.outcome {
            ExampleOutcome::Success => info!(%example, status = "success", "example ran"),
            ExampleOutcome::Failure(failure) => {
                warn!(%example, status = "failure", %failure, "example ran")
            }
            ExampleOutcome::Error(error) => {
                warn!(%example, status = "error", %error, "example ran")
            }
        }
    }

    fn group_finished(&mut self, group: &ExampleGroup<W>, success: bool) {
        debug!(group = group.description(), success, "group finished");
    }

    fn run_finished(&mut self, report: &SuiteReport) {
        info!(
            passed = report.passed,
            failed = report.failed,
            errored = report.errored,
            duration = ?report.duration,
            "run finished"
        );
    }
}
