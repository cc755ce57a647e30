// src/runner/report.rs

//! Reporting: the observer seam, console lines and the run summary.
//!
//! The console lines are a contract with anything that parses our output:
//!
//! ```text
//! Skipped task <name>
//! Running task <name> (out of date outputs: <a, b>)...
//! Running task <name> (missing output: <path>)...
//! Running task <name> (no declared outputs)...
//! Running task <name> (forced)...
//! Task <name> failed: <error>
//! ```

use std::io::Write;

use tracing::warn;

use crate::errors::{join_paths, FreshtaskError, Result};
use crate::oracle::StaleReason;
use crate::registry::Task;
use crate::runner::{RunCause, TaskOutcome};

/// Observer notified while a run progresses.
///
/// `task_started` fires right before a body is invoked, so anything the body
/// prints appears after the "Running task" line.
pub trait Reporter {
    fn task_started(&mut self, _task: &Task, _cause: &RunCause) {}

    fn task_finished(&mut self, _outcome: &TaskOutcome) {}
}

/// Reporter that ignores everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {}

/// Writes the console lines to any writer (stdout in the binary).
#[derive(Debug)]
pub struct ConsoleReporter<W: Write> {
    out: W,
}

impl<W: Write> ConsoleReporter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    fn line(&mut self, line: String) {
        if let Err(e) = writeln!(self.out, "{line}").and_then(|_| self.out.flush()) {
            warn!(error = %e, "failed to write console line");
        }
    }
}

impl ConsoleReporter<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> Reporter for ConsoleReporter<W> {
    fn task_started(&mut self, task: &Task, cause: &RunCause) {
        self.line(running_line(task.name(), cause));
    }

    fn task_finished(&mut self, outcome: &TaskOutcome) {
        match outcome {
            TaskOutcome::Skipped { name } => self.line(skipped_line(name)),
            TaskOutcome::Ran { .. } => {}
            TaskOutcome::Failed { name, error } => self.line(failed_line(name, error)),
        }
    }
}

pub fn skipped_line(name: &str) -> String {
    format!("Skipped task {name}")
}

pub fn running_line(name: &str, cause: &RunCause) -> String {
    let detail = match cause {
        RunCause::Forced => "forced".to_string(),
        RunCause::Stale(StaleReason::InputNewer { outdated }) => {
            format!("out of date outputs: {}", join_paths(outdated))
        }
        RunCause::Stale(StaleReason::MissingOutput(path)) => {
            format!("missing output: {}", path.display())
        }
        RunCause::Stale(StaleReason::NoOutputs) => "no declared outputs".to_string(),
    };
    format!("Running task {name} ({detail})...")
}

pub fn failed_line(name: &str, error: &anyhow::Error) -> String {
    format!("Task {name} failed: {error:#}")
}

/// Outcomes of one run, in the order the tasks were attempted.
#[derive(Debug, Default)]
pub struct RunReport {
    outcomes: Vec<TaskOutcome>,
}

impl RunReport {
    pub(crate) fn push(&mut self, outcome: TaskOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[TaskOutcome] {
        &self.outcomes
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Names of every task attempted, in order.
    pub fn names(&self) -> Vec<&str> {
        self.outcomes.iter().map(TaskOutcome::name).collect()
    }

    pub fn ran(&self) -> Vec<&str> {
        self.names_where(TaskOutcome::is_ran)
    }

    pub fn skipped(&self) -> Vec<&str> {
        self.names_where(TaskOutcome::is_skipped)
    }

    /// The failed task and its error, if the run stopped on a failure.
    pub fn failure(&self) -> Option<(&str, &anyhow::Error)> {
        self.outcomes.iter().find_map(|outcome| match outcome {
            TaskOutcome::Failed { name, error } => Some((name.as_str(), error)),
            _ => None,
        })
    }

    pub fn is_success(&self) -> bool {
        self.failure().is_none()
    }

    /// Process exit code for a CLI: non-zero if any task failed.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() { 0 } else { 1 }
    }

    /// Turn a failed outcome into [`FreshtaskError::TaskExecution`].
    pub fn into_result(mut self) -> Result<Self> {
        match self.outcomes.iter().position(TaskOutcome::is_failed) {
            None => Ok(self),
            Some(index) => match self.outcomes.swap_remove(index) {
                TaskOutcome::Failed { name, error } => Err(FreshtaskError::TaskExecution {
                    task: name,
                    source: error,
                }),
                _ => unreachable!("position() matched a failed outcome"),
            },
        }
    }

    fn names_where(&self, pred: impl Fn(&TaskOutcome) -> bool) -> Vec<&str> {
        self.outcomes
            .iter()
            .filter(|outcome| pred(*outcome))
            .map(TaskOutcome::name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn console_lines_match_contract() {
        assert_eq!(skipped_line("build"), "Skipped task build");
        assert_eq!(
            running_line("build", &RunCause::Forced),
            "Running task build (forced)..."
        );
        assert_eq!(
            running_line(
                "build",
                &RunCause::Stale(StaleReason::InputNewer {
                    outdated: vec![PathBuf::from("a.o"), PathBuf::from("b.o")],
                })
            ),
            "Running task build (out of date outputs: a.o, b.o)..."
        );
        assert_eq!(
            running_line(
                "build",
                &RunCause::Stale(StaleReason::MissingOutput(PathBuf::from("a.o")))
            ),
            "Running task build (missing output: a.o)..."
        );
        assert_eq!(
            running_line("build", &RunCause::Stale(StaleReason::NoOutputs)),
            "Running task build (no declared outputs)..."
        );
    }

    #[test]
    fn report_exit_code_and_into_result() {
        let mut report = RunReport::default();
        report.push(TaskOutcome::Skipped { name: "a".into() });
        assert_eq!(report.exit_code(), 0);

        report.push(TaskOutcome::Failed {
            name: "b".into(),
            error: anyhow::anyhow!("boom"),
        });
        assert_eq!(report.exit_code(), 1);
        assert_eq!(report.names(), vec!["a", "b"]);

        match report.into_result() {
            Err(FreshtaskError::TaskExecution { task, source }) => {
                assert_eq!(task, "b");
                assert_eq!(source.to_string(), "boom");
            }
            other => panic!("expected TaskExecution, got {other:?}"),
        }
    }
}
