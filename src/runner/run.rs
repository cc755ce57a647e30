// src/runner/run.rs

//! The run loop.

use std::any::Any;
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::anyhow;
use tracing::{debug, error, info};

use crate::errors::Result;
use crate::fs::{FileSystem, RealFileSystem};
use crate::oracle::{evaluate_task, StalenessVerdict};
use crate::registry::{Registry, Task, TaskId};
use crate::runner::report::{NullReporter, Reporter, RunReport};
use crate::runner::{RunCause, TaskOutcome};

/// Run every stale task in `registry` against the real filesystem.
///
/// With `forced` every task runs regardless of timestamps.
pub fn run_all(registry: &Registry, forced: bool) -> Result<RunReport> {
    Runner::new(RealFileSystem::new())
        .force(forced)
        .run(registry)
}

/// Verdict for one task, computed without running anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedTask {
    pub id: TaskId,
    pub name: String,
    pub verdict: StalenessVerdict,
}

/// Sequential runner over a [`FileSystem`].
///
/// Tasks are evaluated and executed strictly in registration order, one at a
/// time. The first failing body stops the run; an oracle error (such as a
/// missing input) aborts it and is returned as `Err`.
#[derive(Debug, Clone)]
pub struct Runner<F> {
    fs: F,
    forced: bool,
}

impl<F: FileSystem> Runner<F> {
    pub fn new(fs: F) -> Self {
        Self { fs, forced: false }
    }

    pub fn force(mut self, forced: bool) -> Self {
        self.forced = forced;
        self
    }

    pub fn run(&self, registry: &Registry) -> Result<RunReport> {
        self.run_with(registry, &mut NullReporter)
    }

    /// Like [`Runner::run`], notifying `reporter` as tasks start and finish.
    pub fn run_with<R: Reporter + ?Sized>(
        &self,
        registry: &Registry,
        reporter: &mut R,
    ) -> Result<RunReport> {
        info!(tasks = registry.len(), forced = self.forced, "starting run");
        let mut report = RunReport::default();

        for task in registry {
            let verdict = evaluate_task(&self.fs, task, self.forced)?;
            debug!(task = %task.name(), %verdict, "evaluated task");

            let outcome = match RunCause::from_verdict(verdict) {
                None => {
                    info!(task = %task.name(), "outputs up to date; skipping");
                    TaskOutcome::Skipped {
                        name: task.name().to_string(),
                    }
                }
                Some(cause) => {
                    reporter.task_started(task, &cause);
                    execute(task, cause)
                }
            };

            reporter.task_finished(&outcome);
            let stop = outcome.is_failed();
            report.push(outcome);

            if stop {
                info!(
                    attempted = report.len(),
                    remaining = registry.len() - report.len(),
                    "stopping run after failed task"
                );
                break;
            }
        }

        debug!(outcomes = report.len(), "run finished");
        Ok(report)
    }

    /// Evaluate every task without running any of them.
    ///
    /// Outputs of tasks that would run are treated as freshly written when
    /// later tasks are evaluated, so a task reading a file that an earlier
    /// task generates is planned as stale rather than missing an input.
    /// Inputs that nothing earlier produces are still a
    /// [`FreshtaskError::MissingInput`](crate::errors::FreshtaskError::MissingInput).
    pub fn plan(&self, registry: &Registry) -> Result<Vec<PlannedTask>> {
        let mut projected = Projected::new(&self.fs);
        let mut planned = Vec::with_capacity(registry.len());

        for task in registry {
            let verdict = evaluate_task(&projected, task, self.forced)?;
            debug!(task = %task.name(), %verdict, "planned task");
            if verdict.needs_run() {
                projected.produce(task.outputs());
            }
            planned.push(PlannedTask {
                id: task.id(),
                name: task.name().to_string(),
                verdict,
            });
        }

        Ok(planned)
    }
}

/// Filesystem view used while planning: the real one plus the outputs that
/// tasks planned so far would write.
#[derive(Debug)]
struct Projected<'a, F> {
    fs: &'a F,
    produced: HashMap<PathBuf, SystemTime>,
    clock: SystemTime,
}

impl<'a, F: FileSystem> Projected<'a, F> {
    fn new(fs: &'a F) -> Self {
        Self {
            fs,
            produced: HashMap::new(),
            clock: SystemTime::now(),
        }
    }

    /// Each planned task writes strictly after the previous one.
    fn produce(&mut self, outputs: &[PathBuf]) {
        self.clock += Duration::from_secs(1);
        for output in outputs {
            self.produced.insert(output.clone(), self.clock);
        }
    }
}

impl<F: FileSystem> FileSystem for Projected<'_, F> {
    fn exists(&self, path: &Path) -> bool {
        self.produced.contains_key(path) || self.fs.exists(path)
    }

    fn modified(&self, path: &Path) -> anyhow::Result<SystemTime> {
        match self.produced.get(path) {
            Some(time) => Ok(*time),
            None => self.fs.modified(path),
        }
    }
}

fn execute(task: &Task, cause: RunCause) -> TaskOutcome {
    info!(task = %task.name(), %cause, "running task");
    let name = task.name().to_string();

    let result = panic::catch_unwind(AssertUnwindSafe(|| task.call()))
        .unwrap_or_else(|payload| Err(anyhow!("task panicked: {}", panic_message(&*payload))));

    match result {
        Ok(()) => {
            debug!(task = %name, "task completed");
            TaskOutcome::Ran { name, cause }
        }
        Err(err) => {
            error!(task = %name, error = %format!("{err:#}"), "task failed");
            TaskOutcome::Failed { name, error: err }
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
