use crate::reporter::{ExampleRan, Reporter};

/// A reporter that discards every event.
///
/// Useful when only the returned success flag or [`SuiteReport`](crate::SuiteReport)
/// matters.
#[derive(Debug, Default, Clone)]
pub struct NoReporter;

impl<W> Reporter<W> for NoReporter {
    fn example_ran(&mut self, _: ExampleRan<'_, W>) {}
}
