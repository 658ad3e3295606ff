//! Classification of example runs.
//!
//! An example run ends in one of three ways:
//! - [`Success`](ExampleOutcome::Success) when the body returned normally
//! - [`Failure`](ExampleOutcome::Failure) when an assertion did not hold
//! - [`Error`](ExampleOutcome::Error) when anything else went wrong
//!
//! The assertion category is told apart by kind, never by message. A returned
//! [`AssertionFailed`] is a failure, and so is every panic, because that is
//! how `assert!` and friends report. A panic cannot be told apart from a
//! failed assertion, so panics from `unwrap()`, out of bounds indexing or a
//! division by zero are failures too.
//!
//! Any other returned error makes the example errored. To end up there
//! instead of panicking, return a `Result` and use `?`, for example with
//! [`World::fetch`](crate::world::World::fetch) in place of indexing or
//! unwrapping:
//!
//! ```
//! use rgf::{example::{Example, SpecResult}, outcome::ExampleStatus, world::World};
//!
//! let unwrapping = Example::<World>::from_fn("unwraps", |w| {
//!     let _ = w.get::<i32>("missing").unwrap();
//! });
//! let fetching = Example::<World>::from_fn("fetches", |w| -> SpecResult {
//!     w.fetch::<i32>("missing")?;
//!     Ok(())
//! });
//!
//! assert_eq!(unwrapping.run(&mut World::new()).status(), ExampleStatus::Failure);
//! assert_eq!(fetching.run(&mut World::new()).status(), ExampleStatus::Error);
//! ```

use std::{
    any::Any,
    error::Error,
    fmt::{Debug, Display},
    panic::{AssertUnwindSafe, catch_unwind},
};

use crate::{
    capture,
    example::{BoxedError, ExampleResult},
};

/// The status of an example run, without its details.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExampleStatus {
    Success,
    Failure,
    Error,
}

impl Display for ExampleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Success => "SUCCESS",
            Self::Failure => "FAILURE",
            Self::Error => "ERROR",
        })
    }
}

#[derive(Debug)]
pub enum ExampleOutcome {
    Success,
    Failure(ExampleFailure),
    Error(ExampleError),
}

impl ExampleOutcome {
    pub fn status(&self) -> ExampleStatus {
        match self {
            Self::Success => ExampleStatus::Success,
            Self::Failure(_) => ExampleStatus::Failure,
            Self::Error(_) => ExampleStatus::Error,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success)
    }

    pub fn failure(&self) -> Option<&ExampleFailure> {
        match self {
            Self::Failure(failure) => Some(failure),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&ExampleError> {
        match self {
            Self::Error(error) => Some(error),
            _ => None,
        }
    }

    /// A one line description of what went wrong, if anything did.
    pub fn message(&self) -> Option<String> {
        match self {
            Self::Success => None,
            Self::Failure(failure) => Some(failure.to_string()),
            Self::Error(error) => Some(error.to_string()),
        }
    }
}

/// Returned from examples or hooks to fail them like a broken `assert!`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("assertion failed: {message}")]
pub struct AssertionFailed {
    message: String,
}

impl AssertionFailed {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ExampleFailure {
    #[error("{message}")]
    Panicked {
        message: String,
        location: Option<String>,
    },

    #[error(transparent)]
    Assertion(#[from] AssertionFailed),
}

/// The error an errored example returned, kept as is.
pub struct ExampleError(BoxedError);

impl ExampleError {
    pub fn get(&self) -> &(dyn Error + Send + Sync + 'static) {
        self.0.as_ref()
    }

    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref()
    }

    pub fn into_inner(self) -> BoxedError {
        self.0
    }
}

impl Debug for ExampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ExampleError").field(&self.0).finish()
    }
}

impl Display for ExampleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Display::fmt(&self.0, f)
    }
}

/// Execute `f` and classify how it ended.
///
/// Panics are caught here and nowhere else, so every example run gets
/// exactly one outcome no matter where inside `f` things broke.
pub fn classify<F: FnOnce() -> ExampleResult>(f: F) -> ExampleOutcome {
    capture::clear_panic_location();
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(ExampleResult(Ok(()))) => ExampleOutcome::Success,
        Ok(ExampleResult(Err(err))) => match err.downcast::<AssertionFailed>() {
            Ok(assertion) => ExampleOutcome::Failure(ExampleFailure::Assertion(*assertion)),
            Err(err) => ExampleOutcome::Error(ExampleError(err)),
        },
        Err(payload) => ExampleOutcome::Failure(ExampleFailure::Panicked {
            message: payload_as_string(payload),
            location: capture::take_panic_location(),
        }),
    }
}

/// Convert a panic payload into a string.
///
/// This matches the payload types produced by `panic!` (`&'static str` and
/// `String`). Other payload types are formatted as a generic placeholder.
pub fn payload_as_string(payload: Box<dyn Any + Send + 'static>) -> String {
    payload
        .downcast::<&'static str>()
        .map(|s| s.to_string())
        .or_else(|payload| payload.downcast::<String>().map(|s| *s))
        .unwrap_or_else(|_| String::from("Box<dyn Any>"))
}
