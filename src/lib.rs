//! Nested example groups in the `describe` / `it` style.
//!
//! An [`ExampleSuite`] holds a tree of [`ExampleGroup`]s. Each group has
//! [`Example`](example::Example)s, child groups, an optional before hook and
//! an optional world factory. Running a group gives every example a fresh
//! world, runs the before hooks of all enclosing groups on it (outermost
//! first) and then the example itself. Each run is classified as a success, a
//! failure (a failed assertion) or an error (anything else).
//!
//! Nothing here prints. Results go to a [`Reporter`](reporter::Reporter) and
//! come back as a [`SuiteReport`].

pub mod capture;
pub mod example;
pub mod outcome;
pub mod reporter;
pub mod world;

mod dsl;
pub use dsl::*;

mod error;
pub use error::*;

mod group;
pub use group::*;

mod harness;
pub use harness::*;

mod report;
pub use report::*;

mod suite;
pub use suite::*;

pub mod prelude {
    pub use crate::{
        ExampleGroup, ExampleSuite, GroupPath, PanicOutput, Scope, SuiteError, SuiteReport,
        example::{Example, SpecResult},
        harness::harness,
        outcome::{AssertionFailed, ExampleOutcome, ExampleStatus},
        reporter::{ExampleRan, NoReporter, RecordingReporter, Reporter},
        world::{World, WorldError},
    };
}

#[cfg(test)]
mod test_support;
