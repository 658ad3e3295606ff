//! Reporting hooks for example runs.
//!
//! The engine never prints anything itself. While it walks the example tree it
//! tells a [`Reporter`] what happened, and the reporter decides what to do with
//! that: print it, log it, count it or ship it somewhere else.
//!
//! A few reporters come with the crate:
//! - [`NoReporter`] discards everything
//! - [`RecordingReporter`] keeps every outcome around for inspection
//! - [`LogReporter`] turns the run into `tracing` events
//! - [`ChannelReporter`] forwards owned events over a channel, for example to a
//!   printing thread

use crate::{ExampleGroup, SuiteReport, example::Example, outcome::ExampleOutcome};

mod no;
pub use no::*;

mod recording;
pub use recording::*;

mod log;
pub use log::*;

mod channel;
pub use channel::*;

/// A finished example run, handed to [`Reporter::example_ran`].
#[derive(Debug)]
#[non_exhaustive]
pub struct ExampleRan<'r, W> {
    /// Descriptions of the enclosing groups, outermost first.
    pub groups: &'r [&'r str],
    pub example: &'r Example<W>,
    pub outcome: ExampleOutcome,
}

impl<W> ExampleRan<'_, W> {
    /// The group descriptions and the example description joined by spaces.
    pub fn full_description(&self) -> String {
        self.groups
            .iter()
            .copied()
            .chain([self.example.description()])
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Receives the events of an example run.
///
/// Only [`example_ran`](Self::example_ran) has to be implemented. The group
/// callbacks fire around every group, including nested ones, and
/// [`run_finished`](Self::run_finished) fires once after a whole suite ran.
pub trait Reporter<W> {
    fn group_started(&mut self, group: &ExampleGroup<W>, depth: usize) {
        let _ = (group, depth);
    }

    fn example_ran(&mut self, ran: ExampleRan<'_, W>);

    fn group_finished(&mut self, group: &ExampleGroup<W>, success: bool) {
        let _ = (group, success);
    }

    fn run_finished(&mut self, report: &SuiteReport) {
        let _ = report;
    }
}

impl<W, R: Reporter<W> + ?Sized> Reporter<W> for &mut R {
    fn group_started(&mut self, group: &ExampleGroup<W>, depth: usize) {
        (**self).group_started(group, depth)
    }

    fn example_ran(&mut self, ran: ExampleRan<'_, W>) {
        (**self).example_ran(ran)
    }

    fn group_finished(&mut self, group: &ExampleGroup<W>, success: bool) {
        (**self).group_finished(group, success)
    }

    fn run_finished(&mut self, report: &SuiteReport) {
        (**self).run_finished(report)
    }
}
