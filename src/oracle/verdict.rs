// src/oracle/verdict.rs

//! Verdict types returned by the oracle.

use std::fmt;
use std::path::PathBuf;

/// Why a task has to run even though nobody forced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StaleReason {
    /// The task declares no outputs, so there is nothing to compare against.
    NoOutputs,
    /// The first declared output (in declaration order) that does not exist.
    MissingOutput(PathBuf),
    /// Some input was modified after the oldest output.
    ///
    /// `outdated` holds the outputs strictly older than the newest input, in
    /// declaration order. It is never empty.
    InputNewer { outdated: Vec<PathBuf> },
}

impl fmt::Display for StaleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaleReason::NoOutputs => write!(f, "no declared outputs"),
            StaleReason::MissingOutput(path) => write!(f, "missing output: {}", path.display()),
            StaleReason::InputNewer { .. } => write!(f, "input newer than output"),
        }
    }
}

/// Result of evaluating one task. Recomputed from the filesystem every run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StalenessVerdict {
    Stale(StaleReason),
    UpToDate,
    Forced,
}

impl StalenessVerdict {
    /// Whether the task body should be invoked.
    pub fn needs_run(&self) -> bool {
        !matches!(self, StalenessVerdict::UpToDate)
    }
}

impl fmt::Display for StalenessVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StalenessVerdict::Stale(reason) => write!(f, "stale ({reason})"),
            StalenessVerdict::UpToDate => write!(f, "up to date"),
            StalenessVerdict::Forced => write!(f, "forced"),
        }
    }
}
