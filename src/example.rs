use std::{borrow::Cow, error::Error, fmt::Debug};

use crate::{
    outcome::{ExampleOutcome, classify},
    world::World,
};

pub type BoxedError = Box<dyn Error + Send + Sync + 'static>;

/// The return type to spell out on examples and hooks that use `?`.
pub type SpecResult = Result<(), BoxedError>;

/// A single test case: a description and the function checking it.
///
/// Examples only ever see the world they are handed. Building that world and
/// running the before hooks of the surrounding groups is left to
/// [`ExampleGroup`](crate::ExampleGroup).
pub struct Example<W = World> {
    description: Cow<'static, str>,
    function: ExampleFnHandle<W>,
}

impl<W> Debug for Example<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Example")
            .field("description", &self.description)
            .field("function", &self.function)
            .finish()
    }
}

impl<W> Example<W> {
    pub const fn new(description: Cow<'static, str>, function: ExampleFnHandle<W>) -> Self {
        Self {
            description,
            function,
        }
    }

    pub fn from_fn<F, T>(description: impl Into<Cow<'static, str>>, f: F) -> Self
    where
        F: Fn(&mut W) -> T + 'static,
        T: Into<ExampleResult>,
    {
        Self::new(description.into(), ExampleFnHandle::from_boxed(f))
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Run the example body against `world` and classify what happened.
    pub fn run(&self, world: &mut W) -> ExampleOutcome {
        classify(|| self.call(world))
    }

    pub(crate) fn call(&self, world: &mut W) -> ExampleResult {
        self.function.call(world)
    }
}

/// Something an example or before hook can be built from.
pub trait ExampleFn<W> {
    fn call_example(&self, world: &mut W) -> ExampleResult;
}

impl<F, T, W> ExampleFn<W> for F
where
    F: Fn(&mut W) -> T,
    T: Into<ExampleResult>,
{
    fn call_example(&self, world: &mut W) -> ExampleResult {
        (self)(world).into()
    }
}

/// Example bodies and before hooks, stored behind one type.
#[non_exhaustive]
pub enum ExampleFnHandle<W> {
    Ptr(fn(&mut W) -> ExampleResult),
    Owned(Box<dyn ExampleFn<W>>),
}

impl<W> Debug for ExampleFnHandle<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ptr(ptr) => f.debug_tuple("Ptr").field(ptr).finish(),
            Self::Owned(_) => write!(f, "Owned(...)"),
        }
    }
}

impl<W> ExampleFnHandle<W> {
    pub const fn from_const_fn(f: fn(&mut W) -> ExampleResult) -> Self {
        Self::Ptr(f)
    }

    pub fn from_boxed<F, T>(f: F) -> Self
    where
        F: Fn(&mut W) -> T + 'static,
        T: Into<ExampleResult>,
    {
        Self::Owned(Box::new(f))
    }

    pub fn call(&self, world: &mut W) -> ExampleResult {
        match self {
            Self::Ptr(f) => f(world),
            Self::Owned(f) => f.call_example(world),
        }
    }
}

/// What an example body or hook returned, before classification.
#[derive(Debug)]
pub struct ExampleResult(pub Result<(), BoxedError>);

impl From<()> for ExampleResult {
    fn from(_: ()) -> Self {
        Self(Ok(()))
    }
}

impl<E: Into<BoxedError>> From<Result<(), E>> for ExampleResult {
    fn from(v: Result<(), E>) -> Self {
        Self(v.map_err(Into::into))
    }
}
