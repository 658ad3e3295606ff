//! The per-example context.
//!
//! Every example runs against its own freshly built world. Before hooks write
//! into it, and the example body reads what they left behind. Once the example
//! is classified, the world is dropped.
//!
//! [`World`] is the default world type: a map from string keys to values of
//! any type. Groups can swap it for their own type through a world factory,
//! see [`ExampleGroup::set_world_factory`](crate::ExampleGroup::set_world_factory).

use std::{
    any::{Any, type_name},
    borrow::Cow,
    collections::HashMap,
    fmt::Debug,
};

/// Builds a fresh world for one example run.
pub type WorldFactory<W> = Box<dyn Fn() -> W>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    #[error("nothing was set for {key:?} in this world")]
    Missing { key: Cow<'static, str> },

    #[error("{key:?} does not hold a value of type `{expected}`")]
    TypeMismatch {
        key: Cow<'static, str>,
        expected: &'static str,
    },
}

/// String keyed storage for values handed from before hooks to examples.
#[derive(Default)]
pub struct World(HashMap<Cow<'static, str>, Box<dyn Any>>);

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key`, replacing whatever was there.
    pub fn set<T: Any>(&mut self, key: impl Into<Cow<'static, str>>, value: T) {
        self.0.insert(key.into(), Box::new(value));
    }

    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.0.get(key)?.downcast_ref()
    }

    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.0.get_mut(key)?.downcast_mut()
    }

    /// Like [`get`](Self::get), but says why nothing came back.
    ///
    /// Meant for use with `?` inside hooks and examples, where a missing value
    /// turns into an errored example.
    pub fn fetch<T: Any>(&self, key: &str) -> Result<&T, WorldError> {
        self.0
            .get(key)
            .ok_or_else(|| WorldError::Missing {
                key: key.to_owned().into(),
            })?
            .downcast_ref()
            .ok_or_else(|| WorldError::TypeMismatch {
                key: key.to_owned().into(),
                expected: type_name::<T>(),
            })
    }

    pub fn fetch_mut<T: Any>(&mut self, key: &str) -> Result<&mut T, WorldError> {
        self.0
            .get_mut(key)
            .ok_or_else(|| WorldError::Missing {
                key: key.to_owned().into(),
            })?
            .downcast_mut()
            .ok_or_else(|| WorldError::TypeMismatch {
                key: key.to_owned().into(),
                expected: type_name::<T>(),
            })
    }

    /// Remove the value under `key`.
    ///
    /// If the value has a different type it is left in place.
    pub fn take<T: Any>(&mut self, key: &str) -> Option<T> {
        if !self.0.get(key)?.is::<T>() {
            return None;
        }

        self.0.remove(key)?.downcast().ok().map(|b| *b)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(AsRef::as_ref)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Debug for World {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.keys().collect();
        keys.sort_unstable();
        f.debug_tuple("World").field(&keys).finish()
    }
}
