// tests/property_runner.rs

use proptest::prelude::*;

use freshtask::fs::mock::MockFileSystem;
use freshtask::registry::{Registry, TaskDecl};
use freshtask::runner::{RunCause, Runner, TaskOutcome};

/// Filesystem state of one generated task.
#[derive(Debug, Clone, Copy)]
enum OutputState {
    /// The task declares no outputs.
    Undeclared,
    Missing,
    OlderThanInput,
    SameAsInput,
    NewerThanInput,
}

fn output_state() -> impl Strategy<Value = OutputState> {
    prop_oneof![
        Just(OutputState::Undeclared),
        Just(OutputState::Missing),
        Just(OutputState::OlderThanInput),
        Just(OutputState::SameAsInput),
        Just(OutputState::NewerThanInput),
    ]
}

/// Build a registry of `states.len()` tasks named `task_<i>`, each with one
/// input at t=100 and (depending on its state) one output.
fn setup(states: &[OutputState]) -> (MockFileSystem, Registry) {
    let fs = MockFileSystem::new();
    let mut registry = Registry::new();

    for (i, state) in states.iter().enumerate() {
        let input = format!("in_{i}");
        let output = format!("out_{i}");
        fs.add_file(&input, MockFileSystem::at(100));

        let mut decl = TaskDecl::new(format!("task_{i}")).input(&input);
        match state {
            OutputState::Undeclared => {}
            OutputState::Missing => decl = decl.output(&output),
            OutputState::OlderThanInput => {
                fs.add_file(&output, MockFileSystem::at(50));
                decl = decl.output(&output);
            }
            OutputState::SameAsInput => {
                fs.add_file(&output, MockFileSystem::at(100));
                decl = decl.output(&output);
            }
            OutputState::NewerThanInput => {
                fs.add_file(&output, MockFileSystem::at(150));
                decl = decl.output(&output);
            }
        }
        registry.declare(decl, || Ok(())).unwrap();
    }

    (fs, registry)
}

fn expected_skip(state: OutputState) -> bool {
    matches!(state, OutputState::SameAsInput | OutputState::NewerThanInput)
}

proptest! {
    #[test]
    fn outcome_order_matches_registration(
        states in proptest::collection::vec(output_state(), 1..12),
        forced in any::<bool>(),
    ) {
        let (fs, registry) = setup(&states);
        let report = Runner::new(&fs).force(forced).run(&registry).unwrap();

        let expected: Vec<String> = (0..states.len()).map(|i| format!("task_{i}")).collect();
        let names: Vec<String> = report.names().into_iter().map(str::to_string).collect();
        prop_assert_eq!(names, expected);
    }

    #[test]
    fn verdicts_follow_timestamps(
        states in proptest::collection::vec(output_state(), 1..12),
    ) {
        let (fs, registry) = setup(&states);
        let report = Runner::new(&fs).run(&registry).unwrap();

        for (state, outcome) in states.iter().zip(report.outcomes()) {
            prop_assert_eq!(outcome.is_skipped(), expected_skip(*state), "{:?} -> {:?}", state, outcome);
        }
    }

    #[test]
    fn forced_runs_everything(
        states in proptest::collection::vec(output_state(), 1..12),
    ) {
        let (fs, registry) = setup(&states);
        let report = Runner::new(&fs).force(true).run(&registry).unwrap();

        for outcome in report.outcomes() {
            let forced = matches!(outcome, TaskOutcome::Ran { cause: RunCause::Forced, .. });
            prop_assert!(forced, "{:?}", outcome);
        }
    }

    #[test]
    fn tasks_without_outputs_never_skip(runs in 1..5usize) {
        let (fs, registry) = setup(&[OutputState::Undeclared, OutputState::NewerThanInput]);
        let runner = Runner::new(&fs);

        for _ in 0..runs {
            let report = runner.run(&registry).unwrap();
            prop_assert!(report.outcomes()[0].is_ran());
            prop_assert!(report.outcomes()[1].is_skipped());
        }
    }
}
