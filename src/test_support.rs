use std::{
    cell::{Cell, RefCell},
    rc::Rc,
};

use crate::world::World;

/// Counts how often a world factory was asked for a world.
#[derive(Debug, Default, Clone)]
pub struct FactoryCalls(Rc<Cell<usize>>);

impl FactoryCalls {
    pub fn factory(&self) -> impl Fn() -> World + 'static {
        let calls = Rc::clone(&self.0);
        move || {
            calls.set(calls.get() + 1);
            World::new()
        }
    }

    pub fn count(&self) -> usize {
        self.0.get()
    }
}

/// A shared log that examples and hooks append to, to check execution order.
#[derive(Debug, Default, Clone)]
pub struct Trail(Rc<RefCell<Vec<&'static str>>>);

impl Trail {
    pub fn mark(&self, label: &'static str) -> impl Fn(&mut World) + 'static {
        let trail = Rc::clone(&self.0);
        move |_| trail.borrow_mut().push(label)
    }

    pub fn entries(&self) -> Vec<&'static str> {
        self.0.borrow().clone()
    }
}
