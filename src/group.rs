//! Example groups and how they run.
//!
//! A group owns its examples and its child groups. Running a group runs its
//! own examples first, in declaration order, and then every child group the
//! same way, depth first.
//!
//! Every example gets a world of its own. Before the example body sees it, the
//! before hooks of all enclosing groups run on it, outermost group first, so a
//! hook can build on what the hooks of its ancestors set up. A hook that panics
//! or returns an error ends the example right there, and the example is
//! classified exactly as if its own body had done that.

use std::{borrow::Cow, fmt::Display};

use tracing::{debug_span, trace, warn};

use crate::{
    capture::PanicCaptureGuard,
    example::{Example, ExampleFnHandle, ExampleResult},
    outcome::{ExampleOutcome, classify},
    reporter::{ExampleRan, Reporter},
    world::{World, WorldFactory},
};

/// The address of a group inside a suite.
///
/// Every entry is an index into the child groups of the previous level, the
/// first one indexes the top-level groups of the suite. The parent of a group
/// is found by dropping the last entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupPath(Vec<usize>);

impl GroupPath {
    pub fn top_level(index: usize) -> Self {
        Self(vec![index])
    }

    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.0.clone();
        indices.push(index);
        Self(indices)
    }

    /// `None` for top-level groups, whose parent is the suite.
    pub fn parent(&self) -> Option<Self> {
        match self.0.as_slice() {
            [] | [_] => None,
            [rest @ .., _] => Some(Self(rest.to_vec())),
        }
    }

    /// Paths of all enclosing groups, outermost first.
    pub fn ancestors(&self) -> impl Iterator<Item = GroupPath> + '_ {
        (1..self.0.len()).map(|len| Self(self.0[..len].to_vec()))
    }

    pub fn indices(&self) -> &[usize] {
        &self.0
    }

    /// 1 for top-level groups.
    pub fn depth(&self) -> usize {
        self.0.len()
    }
}

impl Display for GroupPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut indices = self.0.iter();
        if let Some(first) = indices.next() {
            write!(f, "{first}")?;
        }
        for index in indices {
            write!(f, ".{index}")?;
        }
        Ok(())
    }
}

pub type BeforeHook<W> = ExampleFnHandle<W>;

pub struct ExampleGroup<W = World> {
    path: GroupPath,
    description: Cow<'static, str>,
    examples: Vec<Example<W>>,
    child_groups: Vec<ExampleGroup<W>>,
    before: Option<BeforeHook<W>>,
    world_factory: Option<WorldFactory<W>>,
}

impl<W> std::fmt::Debug for ExampleGroup<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExampleGroup")
            .field("path", &self.path)
            .field("description", &self.description)
            .field("examples", &self.examples)
            .field("child_groups", &self.child_groups)
            .field("before", &self.before)
            .field("world_factory", &self.world_factory.as_ref().map(|_| ".."))
            .finish()
    }
}

impl<W> ExampleGroup<W> {
    pub(crate) fn new(path: GroupPath, description: Cow<'static, str>) -> Self {
        Self {
            path,
            description,
            examples: Vec::new(),
            child_groups: Vec::new(),
            before: None,
            world_factory: None,
        }
    }

    pub fn path(&self) -> &GroupPath {
        &self.path
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn examples(&self) -> &[Example<W>] {
        &self.examples
    }

    pub fn child_groups(&self) -> &[ExampleGroup<W>] {
        &self.child_groups
    }

    pub(crate) fn child_groups_mut(&mut self) -> &mut [ExampleGroup<W>] {
        &mut self.child_groups
    }

    pub fn before_hook(&self) -> Option<&BeforeHook<W>> {
        self.before.as_ref()
    }

    /// The factory set on this very group, ancestors are not consulted.
    pub fn world_factory(&self) -> Option<&WorldFactory<W>> {
        self.world_factory.as_ref()
    }

    /// Examples in this group and all of its descendants.
    pub fn example_count(&self) -> usize {
        self.examples.len()
            + self
                .child_groups
                .iter()
                .map(ExampleGroup::example_count)
                .sum::<usize>()
    }

    pub fn add_child_group(
        &mut self,
        description: impl Into<Cow<'static, str>>,
    ) -> &mut ExampleGroup<W> {
        let index = self.child_groups.len();
        self.child_groups
            .push(ExampleGroup::new(self.path.child(index), description.into()));
        &mut self.child_groups[index]
    }

    pub fn add_example(&mut self, example: Example<W>) -> &Example<W> {
        let index = self.examples.len();
        self.examples.push(example);
        &self.examples[index]
    }

    /// Set the before hook of this group.
    ///
    /// A group has at most one hook. Setting another one replaces the first,
    /// which is allowed but logged as a warning.
    pub fn add_before(&mut self, hook: BeforeHook<W>) {
        if self.before.replace(hook).is_some() {
            warn!(
                group = %self.description,
                path = %self.path,
                "before hook replaced, only the last one registered runs"
            );
        }
    }

    /// Build an example from `f` and add it to this group.
    pub fn it<F, T>(&mut self, description: impl Into<Cow<'static, str>>, f: F) -> &Example<W>
    where
        F: Fn(&mut W) -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.add_example(Example::from_fn(description, f))
    }

    pub fn before<F, T>(&mut self, f: F)
    where
        F: Fn(&mut W) -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.add_before(ExampleFnHandle::from_boxed(f))
    }

    /// Replace how worlds are built for this group and its descendants.
    ///
    /// Descendants that set a factory of their own use theirs instead.
    pub fn set_world_factory<F>(&mut self, factory: F)
    where
        F: Fn() -> W + 'static,
    {
        self.world_factory = Some(Box::new(factory));
    }
}

impl<W: Default> ExampleGroup<W> {
    /// Run this group as the root of the tree.
    ///
    /// Hooks and world factories of groups above this one are not known to it.
    /// Use [`ExampleSuite::run_group`](crate::ExampleSuite::run_group) to run a
    /// nested group with its ancestors' hooks.
    ///
    /// Returns whether every example in this group and its descendants
    /// succeeded. Failing examples never stop the run.
    pub fn run<R: Reporter<W>>(&self, reporter: &mut R) -> bool {
        let _panic_capture = PanicCaptureGuard::install();
        self.run_in(&Lineage::root(), reporter)
    }

    pub(crate) fn run_in<'g, R: Reporter<W> + ?Sized>(
        &'g self,
        parent: &Lineage<'g, W>,
        reporter: &mut R,
    ) -> bool {
        let lineage = parent.descend(self);
        let _span = debug_span!("group", description = %self.description, path = %self.path)
            .entered();
        reporter.group_started(self, self.path.depth());

        let mut success = true;
        for example in &self.examples {
            let outcome = lineage.run_example(example);
            trace!(example = example.description(), status = %outcome.status(), "example ran");
            success &= outcome.is_success();
            reporter.example_ran(ExampleRan {
                groups: &lineage.descriptions,
                example,
                outcome,
            });
        }

        for child in &self.child_groups {
            success &= child.run_in(&lineage, reporter);
        }

        reporter.group_finished(self, success);
        success
    }
}

/// What a group inherits from its ancestors when it runs.
pub(crate) struct Lineage<'g, W> {
    descriptions: Vec<&'g str>,
    hooks: Vec<&'g BeforeHook<W>>,
    world_factory: Option<&'g WorldFactory<W>>,
}

impl<'g, W> Lineage<'g, W> {
    pub(crate) fn root() -> Self {
        Self {
            descriptions: Vec::new(),
            hooks: Vec::new(),
            world_factory: None,
        }
    }

    /// The lineage the children of `group` see.
    pub(crate) fn descend(&self, group: &'g ExampleGroup<W>) -> Self {
        let mut descriptions = self.descriptions.clone();
        descriptions.push(group.description());
        let mut hooks = self.hooks.clone();
        hooks.extend(group.before.as_ref());

        Self {
            descriptions,
            hooks,
            world_factory: group.world_factory.as_ref().or(self.world_factory),
        }
    }
}

impl<W: Default> Lineage<'_, W> {
    fn run_example(&self, example: &Example<W>) -> ExampleOutcome {
        classify(|| {
            let mut world = match self.world_factory {
                Some(factory) => factory(),
                None => W::default(),
            };

            for hook in &self.hooks {
                if let err @ ExampleResult(Err(_)) = hook.call(&mut world) {
                    return err;
                }
            }

            example.call(&mut world)
        })
    }
}
