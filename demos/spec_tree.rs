use std::{
    io::{self, Stdout, Write},
    process::ExitCode,
};

use rgf::{outcome::ExampleOutcome, prelude::*};

struct TreeReporter(Stdout);

impl<W> Reporter<W> for TreeReporter {
    fn group_started(&mut self, group: &ExampleGroup<W>, depth: usize) {
        let indent = "  ".repeat(depth - 1);
        let _ = writeln!(self.0, "{indent}{}", group.description());
    }

    fn example_ran(&mut self, ran: ExampleRan<'_, W>) {
        let indent = "  ".repeat(ran.groups.len());
        let description = ran.example.description();
        let _ = match &ran.outcome {
            ExampleOutcome::Success => writeln!(self.0, "{indent}{description} ... ok"),
            outcome => writeln!(
                self.0,
                "{indent}{description} ... {}: {}",
                outcome.status(),
                outcome.message().unwrap_or_default()
            ),
        };
    }

    fn run_finished(&mut self, report: &SuiteReport) {
        let _ = writeln!(
            self.0,
            "\n{} passed, {} failed, {} errored in {:.2?}",
            report.passed, report.failed, report.errored, report.duration
        );
    }
}

fn declare(suite: &mut ExampleSuite) -> Result<(), SuiteError> {
    suite.describe("Math", |s| {
        s.it("adds", |_| assert_eq!(1 + 1, 2))?;
        s.it("adds wrong", |_| assert_eq!(1 + 1, 3))?;
        Ok(())
    })?;

    suite.describe("Account", |s| {
        s.before(|w| w.set("balance", 100_i64))?;
        s.it("starts with the opening balance", |w| {
            assert_eq!(w.get::<i64>("balance"), Some(&100))
        })?;

        s.describe("after a withdrawal", |s| {
            s.before(|w| -> SpecResult {
                *w.fetch_mut::<i64>("balance")? -= 30;
                Ok(())
            })?;
            s.it("has less money", |w| {
                assert_eq!(w.get::<i64>("balance"), Some(&70))
            })?;
            s.it("looks up a key nobody set", |w| -> SpecResult {
                w.fetch::<i64>("overdraft")?;
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })?;

    Ok(())
}

fn main() -> ExitCode {
    let mut suite = ExampleSuite::new();
    if let Err(err) = declare(&mut suite) {
        eprintln!("could not declare examples: {err}");
        return ExitCode::FAILURE;
    }

    let report = harness(&suite)
        .with_reporter(TreeReporter(io::stdout()))
        .run();
    match report.is_success() {
        true => ExitCode::SUCCESS,
        false => ExitCode::FAILURE,
    }
}
