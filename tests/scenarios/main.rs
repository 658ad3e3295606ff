use pretty_assertions::assert_eq;
use rgf::{outcome::ExampleOutcome, prelude::*, reporter::LogReporter};
use tracing_test::traced_test;

mod lib;
use lib::Transcript;

#[test]
fn math() -> Result<(), SuiteError> {
    let mut suite = ExampleSuite::new();
    suite.describe("Math", |s| {
        s.it("E1", |_| assert_eq!(1 + 1, 2))?;
        s.it("E2", |_| assert_eq!(1 + 1, 3))?;
        Ok(())
    })?;

    let transcript = Transcript::default();
    let report = suite.run(transcript.clone());

    assert_eq!(
        transcript.lines(),
        ["Math", "  E1 [SUCCESS]", "  E2 [FAILURE]"]
    );
    assert_eq!((report.passed, report.failed, report.errored), (1, 1, 0));
    assert!(!report.is_success());
    Ok(())
}

#[test]
fn outer_inner_hooks_cascade() -> Result<(), SuiteError> {
    let mut suite = ExampleSuite::new();
    suite.describe("Outer", |s| {
        s.before(|w| w.set("a", 1_i32))?;
        s.describe("Inner", |s| {
            s.before(|w| -> SpecResult {
                let a = *w.fetch::<i32>("a")?;
                w.set("b", a + 1);
                Ok(())
            })?;
            s.it("X", |w| {
                assert_eq!(w.get::<i32>("a"), Some(&1));
                assert_eq!(w.get::<i32>("b"), Some(&2));
            })?;
            Ok(())
        })?;
        Ok(())
    })?;

    let mut reporter = RecordingReporter::new();
    let report = suite.run(&mut reporter);
    assert!(report.is_success(), "{:#?}", reporter.examples());
    assert_eq!(reporter.examples()[0].full_description(), "Outer Inner X");
    Ok(())
}

#[test]
fn the_stack_returns_to_the_suite_after_declaring() -> Result<(), SuiteError> {
    let mut suite = ExampleSuite::new();
    suite.describe("first", |s| {
        assert_eq!(s.depth(), 1);
        s.describe("second", |s| {
            assert_eq!(s.depth(), 2);
            Ok(())
        })?;
        assert_eq!(s.depth(), 1);
        Ok(())
    })?;

    assert_eq!(suite.depth(), 0);
    assert_eq!(suite.current(), &Scope::Suite);
    assert_eq!(
        suite.it("stray", |_| ()).err(),
        Some(SuiteError::NoCurrentGroup { operation: "it" })
    );
    Ok(())
}

#[test]
fn declaration_errors_close_their_groups() {
    let mut suite = ExampleSuite::new();
    let result = suite.describe("broken", |s| {
        s.it("fine", |_| ())?;
        Err(SuiteError::StackUnderflow)
    });

    assert_eq!(result, Err(SuiteError::StackUnderflow));
    assert_eq!(suite.depth(), 0);
    assert_eq!(suite.example_count(), 1);
}

#[test]
fn siblings_and_children_run_depth_first() -> Result<(), SuiteError> {
    let mut suite = ExampleSuite::new();
    suite.describe("a", |s| {
        s.it("a1", |_| ())?;
        s.describe("b", |s| {
            s.it("b1", |_| -> SpecResult { Err("not wired up".into()) })?;
            Ok(())
        })?;
        s.it("a2", |_| ())?;
        Ok(())
    })?;
    suite.describe("c", |s| {
        s.it("c1", |_| -> SpecResult {
            Err(AssertionFailed::new("c1 is wrong").into())
        })?;
        Ok(())
    })?;

    let transcript = Transcript::default();
    let report = harness(&suite).with_reporter(transcript.clone()).run();

    assert_eq!(
        transcript.lines(),
        [
            "a",
            "  a1 [SUCCESS]",
            "  a2 [SUCCESS]",
            "  b",
            "    b1 [ERROR]",
            "c",
            "  c1 [FAILURE]",
        ]
    );
    assert_eq!(report.total(), 4);
    Ok(())
}

#[test]
fn outcomes_carry_their_cause() -> Result<(), SuiteError> {
    let mut suite = ExampleSuite::new();
    suite.describe("causes", |s| {
        s.it("panics", |_| -> SpecResult { panic!("plain panic") })?;
        s.it("asserts", |_| -> SpecResult {
            Err(AssertionFailed::new("explicit").into())
        })?;
        s.it("misses a key", |w| -> SpecResult {
            w.fetch::<String>("name")?;
            Ok(())
        })?;
        Ok(())
    })?;

    let mut reporter = RecordingReporter::new();
    suite.run(&mut reporter);
    let outcomes: Vec<_> = reporter.examples().iter().map(|e| &e.outcome).collect();

    assert!(matches!(outcomes[0], ExampleOutcome::Failure(_)));
    assert!(outcomes[0].message().unwrap().contains("plain panic"));
    assert!(matches!(outcomes[1], ExampleOutcome::Failure(_)));
    assert!(outcomes[1].message().unwrap().contains("explicit"));
    let error = outcomes[2].error().unwrap();
    assert!(matches!(
        error.downcast_ref::<WorldError>(),
        Some(WorldError::Missing { .. })
    ));
    Ok(())
}

#[test]
#[traced_test]
fn log_reporter_logs_every_example() -> Result<(), SuiteError> {
    let mut suite = ExampleSuite::new();
    suite.describe("logged", |s| {
        s.it("passes", |_| ())?;
        s.it("fails", |_| assert!(false, "nope"))?;
        Ok(())
    })?;

    suite.run(LogReporter);
    assert!(logs_contain("logged passes"));
    assert!(logs_contain("logged fails"));
    assert!(logs_contain("run finished"));
    Ok(())
}
