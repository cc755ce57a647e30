// src/runner/mod.rs

//! Sequential task runner.
//!
//! - [`run`] walks a [`Registry`](crate::registry::Registry) in registration
//!   order, asks the oracle about each task and runs the stale ones.
//! - [`report`] holds the [`Reporter`] observer seam, the console line
//!   format and the per-run [`RunReport`].

pub mod report;
pub mod run;

use std::fmt;

use crate::oracle::{StaleReason, StalenessVerdict};

pub use report::{ConsoleReporter, NullReporter, Reporter, RunReport};
pub use run::{run_all, PlannedTask, Runner};

/// Why a task body was invoked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunCause {
    Stale(StaleReason),
    Forced,
}

impl RunCause {
    /// `None` for [`StalenessVerdict::UpToDate`].
    pub fn from_verdict(verdict: StalenessVerdict) -> Option<Self> {
        match verdict {
            StalenessVerdict::Stale(reason) => Some(RunCause::Stale(reason)),
            StalenessVerdict::Forced => Some(RunCause::Forced),
            StalenessVerdict::UpToDate => None,
        }
    }
}

impl fmt::Display for RunCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunCause::Stale(reason) => fmt::Display::fmt(reason, f),
            RunCause::Forced => write!(f, "forced"),
        }
    }
}

/// Result of one task within one run.
#[derive(Debug)]
pub enum TaskOutcome {
    /// Outputs were up to date; the body was not invoked.
    Skipped { name: String },
    /// The body was invoked and returned `Ok`.
    Ran { name: String, cause: RunCause },
    /// The body returned an error or panicked. Always the last outcome of a run.
    Failed { name: String, error: anyhow::Error },
}

impl TaskOutcome {
    pub fn name(&self) -> &str {
        match self {
            TaskOutcome::Skipped { name }
            | TaskOutcome::Ran { name, .. }
            | TaskOutcome::Failed { name, .. } => name,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, TaskOutcome::Skipped { .. })
    }

    pub fn is_ran(&self) -> bool {
        matches!(self, TaskOutcome::Ran { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TaskOutcome::Failed { .. })
    }
}
