//! The root of the example tree.
//!
//! Besides owning the top-level groups, the suite keeps the declaration stack:
//! the chain of groups that are currently being declared, with the suite
//! itself at the bottom. Whatever is on top receives new groups, examples and
//! hooks. The stack is never empty.
//!
//! # Threading
//!
//! A suite is plain data with a single owner, and declaring through it takes
//! `&mut self`, so there is exactly one writer to the stack at any time.
//! Running suites on several threads at once means one suite per thread.

use std::borrow::Cow;

use tracing::debug;

use crate::{
    ExampleGroup, GroupPath, SuiteError, capture::PanicCaptureGuard, group::Lineage,
    harness::harness, report::SuiteReport, reporter::Reporter, world::World,
};

/// An entry of the declaration stack.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    Suite,
    Group(GroupPath),
}

#[derive(Debug)]
pub struct ExampleSuite<W = World> {
    groups: Vec<ExampleGroup<W>>,
    stack: Vec<Scope>,
}

impl ExampleSuite<World> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<W> Default for ExampleSuite<W> {
    fn default() -> Self {
        Self {
            groups: Vec::new(),
            stack: vec![Scope::Suite],
        }
    }
}

impl<W> ExampleSuite<W> {
    /// Create a new top-level group.
    pub fn add_group(
        &mut self,
        description: impl Into<Cow<'static, str>>,
    ) -> &mut ExampleGroup<W> {
        let index = self.groups.len();
        self.groups
            .push(ExampleGroup::new(GroupPath::top_level(index), description.into()));
        &mut self.groups[index]
    }

    pub fn groups(&self) -> &[ExampleGroup<W>] {
        &self.groups
    }

    pub fn group(&self, path: &GroupPath) -> Option<&ExampleGroup<W>> {
        let (first, rest) = path.indices().split_first()?;
        rest.iter()
            .try_fold(self.groups.get(*first)?, |group, &index| {
                group.child_groups().get(index)
            })
    }

    pub fn group_mut(&mut self, path: &GroupPath) -> Option<&mut ExampleGroup<W>> {
        let (first, rest) = path.indices().split_first()?;
        let mut group = self.groups.get_mut(*first)?;
        for &index in rest {
            group = group.child_groups_mut().get_mut(index)?;
        }
        Some(group)
    }

    /// Make the group at `path` the current one.
    pub fn push(&mut self, path: GroupPath) -> Result<(), SuiteError> {
        if self.group(&path).is_none() {
            return Err(SuiteError::UnknownGroup(path));
        }

        debug!(%path, depth = self.stack.len(), "entering group");
        self.stack.push(Scope::Group(path));
        Ok(())
    }

    /// Drop the current group, making the one below it current again.
    ///
    /// The suite itself always stays at the bottom of the stack.
    pub fn pop(&mut self) -> Result<GroupPath, SuiteError> {
        if self.stack.len() <= 1 {
            return Err(SuiteError::StackUnderflow);
        }

        match self.stack.pop() {
            Some(Scope::Group(path)) => {
                debug!(%path, depth = self.stack.len(), "leaving group");
                Ok(path)
            }
            Some(Scope::Suite) | None => Err(SuiteError::StackUnderflow),
        }
    }

    pub fn current(&self) -> &Scope {
        // The suite scope is never popped.
        self.stack.last().unwrap_or(&Scope::Suite)
    }

    /// The current group, `None` while the suite itself is current.
    pub fn current_group_mut(&mut self) -> Option<&mut ExampleGroup<W>> {
        let Some(Scope::Group(path)) = self.stack.last().cloned() else {
            return None;
        };
        self.group_mut(&path)
    }

    /// How many groups are open, 0 outside of any `describe`.
    pub fn depth(&self) -> usize {
        self.stack.len() - 1
    }

    pub fn example_count(&self) -> usize {
        self.groups.iter().map(ExampleGroup::example_count).sum()
    }

    /// Throw away all groups and open scopes, leaving an empty suite.
    pub fn reset(&mut self) {
        self.groups.clear();
        self.stack.clear();
        self.stack.push(Scope::Suite);
    }
}

impl<W: Default> ExampleSuite<W> {
    /// Run every group and report the totals.
    ///
    /// This is [`harness`] with the given reporter and default settings.
    pub fn run<R: Reporter<W>>(&self, reporter: R) -> SuiteReport {
        harness(self).with_reporter(reporter).run()
    }

    /// Run the group at `path` and everything below it.
    ///
    /// Unlike [`ExampleGroup::run`], the hooks and world factories of the
    /// group's ancestors apply, just like in a full run.
    pub fn run_group<R: Reporter<W>>(
        &self,
        path: &GroupPath,
        reporter: &mut R,
    ) -> Result<bool, SuiteError> {
        let group = self
            .group(path)
            .ok_or_else(|| SuiteError::UnknownGroup(path.clone()))?;

        let mut lineage = Lineage::root();
        for ancestor in path.ancestors() {
            let ancestor = self
                .group(&ancestor)
                .ok_or(SuiteError::UnknownGroup(ancestor))?;
            lineage = lineage.descend(ancestor);
        }

        let _panic_capture = PanicCaptureGuard::install();
        Ok(group.run_in(&lineage, reporter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        outcome::ExampleStatus,
        reporter::{NoReporter, RecordingReporter},
        test_support::*,
    };
    use pretty_assertions::assert_eq;

    fn nested_suite(trail: &Trail) -> ExampleSuite {
        let mut suite = ExampleSuite::new();
        let outer = suite.add_group("outer");
        outer.before(trail.mark("outer hook"));
        outer.it("outer example", trail.mark("outer example"));
        let inner = outer.add_child_group("inner");
        inner.before(trail.mark("inner hook"));
        inner.it("inner example", trail.mark("inner example"));
        suite.add_group("sibling").it("sibling example", |_| ());
        suite
    }

    #[test]
    fn starts_with_only_the_suite_on_the_stack() {
        let suite = ExampleSuite::new();
        assert_eq!(suite.current(), &Scope::Suite);
        assert_eq!(suite.depth(), 0);
        assert!(suite.groups().is_empty());
    }

    #[test]
    fn push_and_pop_are_symmetric() {
        let mut suite = ExampleSuite::new();
        suite.add_group("first");
        let path = GroupPath::top_level(0);

        suite.push(path.clone()).unwrap();
        assert_eq!(suite.current(), &Scope::Group(path.clone()));
        assert_eq!(suite.depth(), 1);
        assert!(suite.current_group_mut().is_some());

        assert_eq!(suite.pop(), Ok(path));
        assert_eq!(suite.current(), &Scope::Suite);
        assert!(suite.current_group_mut().is_none());
    }

    #[test]
    fn the_suite_scope_cannot_be_popped() {
        let mut suite = ExampleSuite::new();
        assert_eq!(suite.pop(), Err(SuiteError::StackUnderflow));
        assert_eq!(suite.current(), &Scope::Suite);
    }

    #[test]
    fn unknown_groups_cannot_be_pushed() {
        let mut suite = ExampleSuite::new();
        let missing = GroupPath::top_level(3);
        assert_eq!(
            suite.push(missing.clone()),
            Err(SuiteError::UnknownGroup(missing))
        );
        assert_eq!(suite.depth(), 0);
    }

    #[test]
    fn groups_are_found_by_path() {
        let trail = Trail::default();
        let mut suite = nested_suite(&trail);

        let inner = GroupPath::top_level(0).child(0);
        assert_eq!(suite.group(&inner).map(ExampleGroup::description), Some("inner"));
        assert!(suite.group(&GroupPath::top_level(0).child(1)).is_none());
        assert!(suite.group(&GroupPath::top_level(2)).is_none());

        suite
            .group_mut(&inner)
            .unwrap()
            .it("added later", |_| ());
        assert_eq!(suite.group(&inner).unwrap().examples().len(), 2);
        assert_eq!(suite.example_count(), 4);
    }

    #[test]
    fn run_group_applies_ancestor_hooks() {
        let trail = Trail::default();
        let suite = nested_suite(&trail);

        let mut reporter = RecordingReporter::new();
        let inner = GroupPath::top_level(0).child(0);
        assert_eq!(suite.run_group(&inner, &mut reporter), Ok(true));
        assert_eq!(
            trail.entries(),
            ["outer hook", "inner hook", "inner example"]
        );
        assert_eq!(
            reporter.examples()[0].full_description(),
            "outer inner inner example"
        );
    }

    #[test]
    fn run_group_rejects_unknown_paths() {
        let suite = ExampleSuite::new();
        let missing = GroupPath::top_level(0);
        assert_eq!(
            suite.run_group(&missing, &mut NoReporter),
            Err(SuiteError::UnknownGroup(missing))
        );
    }

    #[test]
    fn run_covers_every_group() {
        let trail = Trail::default();
        let suite = nested_suite(&trail);

        let mut reporter = RecordingReporter::new();
        let report = suite.run(&mut reporter);
        assert!(report.is_success());
        assert_eq!(report.passed, 3);
        assert_eq!(
            reporter.statuses(),
            vec![
                ("outer example", ExampleStatus::Success),
                ("inner example", ExampleStatus::Success),
                ("sibling example", ExampleStatus::Success),
            ]
        );
        assert_eq!(
            trail.entries(),
            [
                "outer hook",
                "outer example",
                "outer hook",
                "inner hook",
                "inner example",
            ]
        );
    }

    #[test]
    fn reset_leaves_an_empty_suite() {
        let trail = Trail::default();
        let mut suite = nested_suite(&trail);
        suite.push(GroupPath::top_level(1)).unwrap();

        suite.reset();
        assert!(suite.groups().is_empty());
        assert_eq!(suite.current(), &Scope::Suite);
        assert_eq!(suite.example_count(), 0);
    }
}
