use std::time::Instant;

use tracing::debug;

use crate::{
    ExampleGroup, ExampleSuite,
    capture::PanicCaptureGuard,
    group::Lineage,
    report::SuiteReport,
    reporter::{ExampleRan, NoReporter, Reporter},
};

/// What happens to the output of panicking examples.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum PanicOutput {
    /// Swap the panic hook for the duration of the run, so failing assertions
    /// print nothing and their location ends up in the failure instead.
    #[default]
    Capture,

    /// Leave the panic hook alone.
    Passthrough,
}

/// A configured run of a suite.
///
/// Created by [`harness`], configured with the `with_*` methods and consumed
/// by [`run`](Self::run).
#[derive(Debug)]
pub struct SuiteHarness<'s, W, R> {
    suite: &'s ExampleSuite<W>,
    reporter: R,
    panic_output: PanicOutput,
}

/// Start configuring a run of `suite`.
///
/// Without further configuration every event is discarded and panics are
/// captured.
pub fn harness<W>(suite: &ExampleSuite<W>) -> SuiteHarness<'_, W, NoReporter> {
    SuiteHarness {
        suite,
        reporter: NoReporter,
        panic_output: PanicOutput::default(),
    }
}

impl<'s, W, R> SuiteHarness<'s, W, R> {
    pub fn with_reporter<WithReporter: Reporter<W>>(
        self,
        reporter: WithReporter,
    ) -> SuiteHarness<'s, W, WithReporter> {
        SuiteHarness {
            suite: self.suite,
            reporter,
            panic_output: self.panic_output,
        }
    }

    pub fn with_panic_output(self, panic_output: PanicOutput) -> Self {
        Self {
            panic_output,
            ..self
        }
    }
}

impl<W: Default, R: Reporter<W>> SuiteHarness<'_, W, R> {
    /// Run all top-level groups in declaration order.
    ///
    /// The reporter hears about every example and gets
    /// [`run_finished`](Reporter::run_finished) exactly once at the end.
    pub fn run(self) -> SuiteReport {
        let now = Instant::now();
        let _panic_capture = match self.panic_output {
            PanicOutput::Capture => Some(PanicCaptureGuard::install()),
            PanicOutput::Passthrough => None,
        };

        let mut tally = Tally {
            inner: self.reporter,
            report: SuiteReport::default(),
        };
        let root = Lineage::root();
        for group in self.suite.groups() {
            group.run_in(&root, &mut tally);
        }

        let Tally {
            inner: mut reporter,
            mut report,
        } = tally;
        report.duration = now.elapsed();
        debug!(
            passed = report.passed,
            failed = report.failed,
            errored = report.errored,
            "suite finished"
        );
        reporter.run_finished(&report);
        report
    }
}

/// Counts outcomes on their way to the actual reporter.
struct Tally<R> {
    inner: R,
    report: SuiteReport,
}

impl<W, R: Reporter<W>> Reporter<W> for Tally<R> {
    fn group_started(&mut self, group: &ExampleGroup<W>, depth: usize) {
        self.inner.group_started(group, depth);
    }

    fn example_ran(&mut self, ran: ExampleRan<'_, W>) {
        self.report.count(ran.outcome.status());
        self.inner.example_ran(ran);
    }

    fn group_finished(&mut self, group: &ExampleGroup<W>, success: bool) {
        self.inner.group_finished(group, success);
    }
}
