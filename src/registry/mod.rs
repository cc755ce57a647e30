// src/registry/mod.rs

//! Ordered, append-only collection of declared tasks.
//!
//! The registry is an ordinary value owned by the caller. Tasks are appended
//! with [`Registry::register`] or [`Registry::declare`] and are never removed;
//! insertion order is the order in which the runner evaluates them.

pub mod task;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, warn};

use crate::errors::{FreshtaskError, Result};

pub use task::{Task, TaskBody, TaskDecl, TaskHandle, TaskId};

#[derive(Debug, Default, Clone)]
pub struct Registry {
    tasks: Vec<Task>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task built from its name, inputs and outputs.
    pub fn register<I, O, P, Q, F>(
        &mut self,
        name: impl Into<String>,
        inputs: I,
        outputs: O,
        body: F,
    ) -> Result<TaskHandle>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
        O: IntoIterator<Item = Q>,
        Q: Into<PathBuf>,
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.declare(TaskDecl::new(name).inputs(inputs).outputs(outputs), body)
    }

    /// Append a task from a [`TaskDecl`].
    ///
    /// Fails with [`FreshtaskError::ConfigError`] if the name is blank or a
    /// path is empty or contains a NUL byte. Nothing is appended on error.
    pub fn declare<F>(&mut self, decl: TaskDecl, body: F) -> Result<TaskHandle>
    where
        F: Fn() -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.declare_shared(decl, Arc::new(body))
    }

    /// Like [`Registry::declare`] for a body that is already shared.
    pub fn declare_shared(&mut self, decl: TaskDecl, body: TaskBody) -> Result<TaskHandle> {
        validate_decl(&decl)?;

        if self.find(&decl.name).is_some() {
            warn!(
                task = %decl.name,
                "task name registered more than once; reports will be ambiguous"
            );
        }

        let task = Task {
            id: TaskId(self.tasks.len()),
            decl,
            body,
        };
        debug!(
            task = %task.name(),
            id = %task.id(),
            inputs = task.inputs().len(),
            outputs = task.outputs().len(),
            "registered task"
        );

        let handle = TaskHandle::for_task(&task);
        self.tasks.push(task);
        Ok(handle)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id.0)
    }

    /// The most recently registered task with this name.
    pub fn find(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().rev().find(|task| task.name() == name)
    }

    pub fn task_names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(Task::name)
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}

fn validate_decl(decl: &TaskDecl) -> Result<()> {
    if decl.name.trim().is_empty() {
        return Err(FreshtaskError::ConfigError(
            "task name must not be empty".to_string(),
        ));
    }

    let declared = decl
        .inputs
        .iter()
        .map(|p| ("inputs", p.as_path()))
        .chain(decl.outputs.iter().map(|p| ("outputs", p.as_path())))
        .chain(decl.source.iter().map(|p| ("source", p.as_path())));

    for (field, path) in declared {
        validate_path(&decl.name, field, path)?;
    }
    Ok(())
}

fn validate_path(task: &str, field: &str, path: &Path) -> Result<()> {
    if path.as_os_str().is_empty() {
        return Err(FreshtaskError::ConfigError(format!(
            "task '{}' has an empty path in `{}`",
            task, field
        )));
    }
    if path.to_string_lossy().contains('\0') {
        return Err(FreshtaskError::ConfigError(format!(
            "task '{}' has a path containing a NUL byte in `{}`: {:?}",
            task, field, path
        )));
    }
    Ok(())
}
