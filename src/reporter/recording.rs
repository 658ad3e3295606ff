use crate::{
    ExampleGroup, SuiteReport,
    outcome::{ExampleOutcome, ExampleStatus},
    reporter::{ExampleRan, Reporter},
};

#[derive(Debug)]
#[non_exhaustive]
pub struct RecordedExample {
    pub groups: Vec<String>,
    pub description: String,
    pub outcome: ExampleOutcome,
}

impl RecordedExample {
    pub fn full_description(&self) -> String {
        self.groups
            .iter()
            .map(String::as_str)
            .chain([self.description.as_str()])
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A reporter that keeps everything it is told.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    examples: Vec<RecordedExample>,
    groups_started: Vec<String>,
    report: Option<SuiteReport>,
    finished_calls: usize,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every example in the order it ran.
    pub fn examples(&self) -> &[RecordedExample] {
        &self.examples
    }

    pub fn statuses(&self) -> Vec<(&str, ExampleStatus)> {
        self.examples
            .iter()
            .map(|example| (example.description.as_str(), example.outcome.status()))
            .collect()
    }

    /// Descriptions of the groups in the order they started.
    pub fn groups_started(&self) -> &[String] {
        &self.groups_started
    }

    /// The report passed to `run_finished`, if a suite run finished.
    pub fn report(&self) -> Option<&SuiteReport> {
        self.report.as_ref()
    }

    pub fn finished_calls(&self) -> usize {
        self.finished_calls
    }
}

impl<W> Reporter<W> for RecordingReporter {
    fn group_started(&mut self, group: &ExampleGroup<W>, _: usize) {
        self.groups_started.push(group.description().to_owned());
    }

    fn example_ran(&mut self, ran: ExampleRan<'_, W>) {
        self.examples.push(RecordedExample {
            groups: ran.groups.iter().map(|group| group.to_string()).collect(),
            description: ran.example.description().to_owned(),
            outcome: ran.outcome,
        });
    }

    fn run_finished(&mut self, report: &SuiteReport) {
        self.report = Some(report.clone());
        self.finished_calls += 1;
    }
}
