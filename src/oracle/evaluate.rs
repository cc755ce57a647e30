// src/oracle/evaluate.rs

//! The up-to-date check.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, trace};

use crate::errors::{FreshtaskError, Result};
use crate::fs::FileSystem;
use crate::oracle::verdict::{StaleReason, StalenessVerdict};
use crate::registry::Task;

/// Decide whether a task with the given inputs and outputs is up to date.
///
/// `name` is only used to label a [`FreshtaskError::MissingInput`] error.
///
/// Order of checks:
/// 1. `forced` wins without touching the filesystem.
/// 2. Every input must exist, otherwise the whole run is aborted.
/// 3. No outputs, or a missing output, makes the task stale.
/// 4. Otherwise the task is stale only if the newest input is strictly newer
///    than the oldest output. Equal timestamps count as up to date.
pub fn evaluate<F: FileSystem + ?Sized>(
    fs: &F,
    name: &str,
    inputs: &[PathBuf],
    outputs: &[PathBuf],
    forced: bool,
) -> Result<StalenessVerdict> {
    evaluate_with_source(fs, name, inputs, outputs, None, forced)
}

/// Evaluate a registered task, including its defining source file (if any)
/// as an implicit input.
pub fn evaluate_task<F: FileSystem + ?Sized>(
    fs: &F,
    task: &Task,
    forced: bool,
) -> Result<StalenessVerdict> {
    evaluate_with_source(
        fs,
        task.name(),
        task.inputs(),
        task.outputs(),
        task.source(),
        forced,
    )
}

fn evaluate_with_source<F: FileSystem + ?Sized>(
    fs: &F,
    name: &str,
    inputs: &[PathBuf],
    outputs: &[PathBuf],
    source: Option<&Path>,
    forced: bool,
) -> Result<StalenessVerdict> {
    if forced {
        return Ok(StalenessVerdict::Forced);
    }

    let missing: Vec<PathBuf> = inputs
        .iter()
        .filter(|path| !fs.exists(path))
        .cloned()
        .collect();
    if !missing.is_empty() {
        return Err(FreshtaskError::MissingInput {
            task: name.to_string(),
            missing,
        });
    }

    if outputs.is_empty() {
        return Ok(StalenessVerdict::Stale(StaleReason::NoOutputs));
    }

    if let Some(path) = outputs.iter().find(|path| !fs.exists(path)) {
        debug!(task = %name, output = %path.display(), "output missing");
        return Ok(StalenessVerdict::Stale(StaleReason::MissingOutput(
            path.clone(),
        )));
    }

    let output_times = outputs
        .iter()
        .map(|path| -> Result<(&PathBuf, SystemTime)> { Ok((path, fs.modified(path)?)) })
        .collect::<Result<Vec<_>>>()?;
    let oldest_output = output_times
        .iter()
        .map(|(_, modified)| *modified)
        .min();

    let newest_input = newest_input_time(fs, inputs, source)?;

    trace!(
        task = %name,
        ?oldest_output,
        ?newest_input,
        "comparing modification times"
    );

    match (newest_input, oldest_output) {
        (Some(newest), Some(oldest)) if newest > oldest => {
            let outdated = output_times
                .into_iter()
                .filter(|(_, modified)| *modified < newest)
                .map(|(path, _)| path.clone())
                .collect();
            Ok(StalenessVerdict::Stale(StaleReason::InputNewer { outdated }))
        }
        _ => Ok(StalenessVerdict::UpToDate),
    }
}

/// Latest modification time among the inputs and the source file.
///
/// The source file is optional: if it has gone missing it simply does not
/// take part in the comparison.
fn newest_input_time<F: FileSystem + ?Sized>(
    fs: &F,
    inputs: &[PathBuf],
    source: Option<&Path>,
) -> Result<Option<SystemTime>> {
    let mut newest: Option<SystemTime> = None;

    for path in inputs {
        let modified = fs.modified(path)?;
        newest = newest.max(Some(modified));
    }

    if let Some(source) = source.filter(|path| fs.exists(path)) {
        newest = newest.max(Some(fs.modified(source)?));
    }

    Ok(newest)
}
