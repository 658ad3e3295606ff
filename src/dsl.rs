//! The `describe` / `it` / `before` declaration style.
//!
//! ```
//! use rgf::{ExampleSuite, SuiteError, example::SpecResult};
//!
//! let mut suite = ExampleSuite::new();
//! suite.describe("Outer", |s| {
//!     s.before(|w| w.set("a", 1))?;
//!     s.describe("Inner", |s| {
//!         s.before(|w| -> SpecResult {
//!             let a = *w.fetch::<i32>("a")?;
//!             w.set("b", a + 1);
//!             Ok(())
//!         })?;
//!         s.it("sees both hooks", |w| assert_eq!(w.get::<i32>("b"), Some(&2)))?;
//!         Ok(())
//!     })?;
//!     Ok(())
//! })?;
//!
//! assert!(suite.run(rgf::reporter::NoReporter).is_success());
//! # Ok::<(), SuiteError>(())
//! ```
//!
//! `describe` opens a new group below the current one and makes it current
//! for the duration of its body. The group is closed again when the body
//! returns, when it fails and also when it panics, so a broken declaration
//! never leaves the suite pointing at the wrong group.

use std::{
    borrow::Cow,
    ops::{Deref, DerefMut},
};

use tracing::error;

use crate::{
    ExampleGroup, ExampleSuite, GroupPath, Scope, SuiteError,
    example::{Example, ExampleResult},
};

/// An open `describe` block.
///
/// While it lives, the group it opened is the current group of the suite.
/// Dropping it makes the enclosing scope current again. The suite is
/// reachable through `Deref`, so declarations go through the scope.
pub struct DescribeScope<'s, W> {
    suite: &'s mut ExampleSuite<W>,
    path: GroupPath,
}

impl<W> DescribeScope<'_, W> {
    /// The path of the group this scope opened.
    pub fn path(&self) -> &GroupPath {
        &self.path
    }
}

impl<W> Deref for DescribeScope<'_, W> {
    type Target = ExampleSuite<W>;

    fn deref(&self) -> &Self::Target {
        self.suite
    }
}

impl<W> DerefMut for DescribeScope<'_, W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.suite
    }
}

impl<W> Drop for DescribeScope<'_, W> {
    fn drop(&mut self) {
        match self.suite.pop() {
            Ok(popped) if popped == self.path => {}
            Ok(popped) => error!(
                expected = %self.path,
                %popped,
                "describe scope closed a different group than it opened"
            ),
            Err(err) => error!(%err, path = %self.path, "describe scope found no group to close"),
        }
    }
}

impl<W> ExampleSuite<W> {
    /// Open a new group below the current scope and make it current.
    ///
    /// The returned scope closes the group again when dropped.
    pub fn enter(
        &mut self,
        description: impl Into<Cow<'static, str>>,
    ) -> Result<DescribeScope<'_, W>, SuiteError> {
        let path = match self.current().clone() {
            Scope::Suite => self.add_group(description).path().clone(),
            Scope::Group(parent) => self
                .group_mut(&parent)
                .ok_or_else(|| SuiteError::UnknownGroup(parent.clone()))?
                .add_child_group(description)
                .path()
                .clone(),
        };

        self.push(path.clone())?;
        Ok(DescribeScope { suite: self, path })
    }

    /// Declare a group, with `body` declaring its contents.
    ///
    /// Errors from `body` are passed on after the group was closed.
    pub fn describe<F>(
        &mut self,
        description: impl Into<Cow<'static, str>>,
        body: F,
    ) -> Result<GroupPath, SuiteError>
    where
        F: FnOnce(&mut ExampleSuite<W>) -> Result<(), SuiteError>,
    {
        let mut scope = self.enter(description)?;
        body(&mut *scope)?;
        Ok(scope.path().clone())
    }

    /// Add an example to the current group.
    pub fn it<F, T>(
        &mut self,
        description: impl Into<Cow<'static, str>>,
        f: F,
    ) -> Result<&Example<W>, SuiteError>
    where
        F: Fn(&mut W) -> T + 'static,
        T: Into<ExampleResult>,
    {
        Ok(self.current_group_or_err("it")?.it(description, f))
    }

    /// Set the before hook of the current group.
    pub fn before<F, T>(&mut self, f: F) -> Result<(), SuiteError>
    where
        F: Fn(&mut W) -> T + 'static,
        T: Into<ExampleResult>,
    {
        self.current_group_or_err("before")?.before(f);
        Ok(())
    }

    /// Set the world factory of the current group.
    pub fn world<F>(&mut self, factory: F) -> Result<(), SuiteError>
    where
        F: Fn() -> W + 'static,
    {
        self.current_group_or_err("world")?
            .set_world_factory(factory);
        Ok(())
    }

    fn current_group_or_err(
        &mut self,
        operation: &'static str,
    ) -> Result<&mut ExampleGroup<W>, SuiteError> {
        self.current_group_mut()
            .ok_or(SuiteError::NoCurrentGroup { operation })
    }
}
