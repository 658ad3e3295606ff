use crossbeam_channel::{Receiver, Sender};

use crate::{
    ExampleGroup, SuiteReport,
    outcome::ExampleStatus,
    reporter::{ExampleRan, Reporter},
};

/// An owned copy of a reporter event.
///
/// Unlike [`ExampleRan`] these borrow nothing from the suite, so they can be
/// sent to another thread.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ReportEvent {
    GroupStarted {
        description: String,
        depth: usize,
    },
    ExampleRan {
        groups: Vec<String>,
        description: String,
        status: ExampleStatus,
        message: Option<String>,
    },
    GroupFinished {
        description: String,
        success: bool,
    },
    RunFinished(SuiteReport),
}

/// A reporter that forwards every event as a [`ReportEvent`].
///
/// Events are dropped silently once the receiving side is gone.
#[derive(Debug, Clone)]
pub struct ChannelReporter {
    tx: Sender<ReportEvent>,
}

impl ChannelReporter {
    pub fn new(tx: Sender<ReportEvent>) -> Self {
        Self { tx }
    }

    pub fn unbounded() -> (Self, Receiver<ReportEvent>) {
        let (tx, rx) = crossbeam_channel::unbounded();
        (Self::new(tx), rx)
    }

    /// A channel holding at most `cap` events.
    ///
    /// The run blocks whenever the channel is full, so the receiver has to be
    /// drained from another thread.
    pub fn bounded(cap: usize) -> (Self, Receiver<ReportEvent>) {
        let (tx, rx) = crossbeam_channel::bounded(cap);
        (Self::new(tx), rx)
    }
}

impl<W> Reporter<W> for ChannelReporter {
    fn group_started(&mut self, group: &ExampleGroup<W>, depth: usize) {
        let _ = self.tx.send(ReportEvent::GroupStarted {
            description: group.description().to_owned(),
            depth,
        });
    }

    fn example_ran(&mut self, ran: ExampleRan<'_, W>) {
        let _ = self.tx.send(ReportEvent::ExampleRan {
            groups: ran.groups.iter().map(|group| group.to_string()).collect(),
            description: ran.example.description().to_owned(),
            status: ran.outcome.status(),
            message: ran.outcome.message(),
        });
    }

    fn group_finished(&mut self, group: &ExampleGroup<W>, success: bool) {
        let _ = self.tx.send(ReportEvent::GroupFinished {
            description: group.description().to_owned(),
            success,
        });
    }

    fn run_finished(&mut self, report: &SuiteReport) {
        let _ = self.tx.send(ReportEvent::RunFinished(report.clone()));
    }
}

#[cfg(test)]
mod tests {
    use std::thread;

    use super::*;
    use crate::{ExampleSuite, harness};
    use pretty_assertions::assert_eq;

    fn suite_with(examples: usize) -> ExampleSuite {
        let mut suite = ExampleSuite::new();
        let group = suite.add_group("many");
        for index in 0..examples {
            group.it(format!("example {index}"), |_| ());
        }
        suite
    }

    #[test]
    fn bounded_channel_is_drained_while_the_run_waits() {
        let suite = suite_with(8);
        let (reporter, rx) = ChannelReporter::bounded(1);
        let drain = thread::spawn(move || rx.iter().collect::<Vec<_>>());

        let report = harness(&suite).with_reporter(reporter).run();
        let events = drain.join().expect("the draining thread does not panic");

        // group started, eight examples, group finished, run finished
        assert_eq!(events.len(), 11);
        assert_eq!(events.last(), Some(&ReportEvent::RunFinished(report)));
        assert_eq!(
            events[1],
            ReportEvent::ExampleRan {
                groups: vec!["many".into()],
                description: "example 0".into(),
                status: ExampleStatus::Success,
                message: None,
            }
        );
    }

    #[test]
    fn a_dropped_receiver_does_not_stop_the_run() {
        let suite = suite_with(3);
        let (reporter, rx) = ChannelReporter::bounded(1);
        drop(rx);

        let report = harness(&suite).with_reporter(reporter).run();
        assert_eq!(report.passed, 3);
    }
}
