use std::{cell::RefCell, rc::Rc};

use rgf::{
    ExampleGroup,
    reporter::{ExampleRan, Reporter},
};

/// Writes the run down as indented lines, the way a console reporter would.
#[derive(Debug, Default, Clone)]
pub struct Transcript(Rc<RefCell<Vec<String>>>);

impl Transcript {
    pub fn lines(&self) -> Vec<String> {
        self.0.borrow().clone()
    }
}

impl<W> Reporter<W> for Transcript {
    fn group_started(&mut self, group: &ExampleGroup<W>, depth: usize) {
        let indent = "  ".repeat(depth - 1);
        self.0
            .borrow_mut()
            .push(format!("{indent}{}", group.description()));
    }

    fn example_ran(&mut self, ran: ExampleRan<'_, W>) {
        let indent = "  ".repeat(ran.groups.len());
        self.0.borrow_mut().push(format!(
            "{indent}{} [{}]",
            ran.example.description(),
            ran.outcome.status()
        ));
    }
}
