// src/registry/task.rs

//! Task declarations, registered tasks and handles.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// A task body: zero arguments, fails by returning an error.
///
/// Bodies are shared between the registry and any [`TaskHandle`]s so that a
/// caller can still invoke a task directly outside of a run.
pub type TaskBody = Arc<dyn Fn() -> anyhow::Result<()> + Send + Sync>;

/// Position of a task in its registry (registration order, starting at 0).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(pub(crate) usize);

impl TaskId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Everything about a task except its body.
///
/// ```
/// use freshtask::registry::TaskDecl;
///
/// let decl = TaskDecl::new("compile")
///     .input("main.c")
///     .output("main.o");
/// assert_eq!(decl.name(), "compile");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDecl {
    pub(crate) name: String,
    pub(crate) inputs: Vec<PathBuf>,
    pub(crate) outputs: Vec<PathBuf>,
    pub(crate) source: Option<PathBuf>,
}

impl TaskDecl {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn input(mut self, path: impl Into<PathBuf>) -> Self {
        self.inputs.push(path.into());
        self
    }

    pub fn inputs<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.inputs.extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.outputs.push(path.into());
        self
    }

    pub fn outputs<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.outputs.extend(paths.into_iter().map(Into::into));
        self
    }

    /// File that defines the task. When it exists, its modification time is
    /// compared like an input, so editing the definition re-runs the task.
    pub fn source(mut self, path: impl Into<PathBuf>) -> Self {
        self.source = Some(path.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn declared_outputs(&self) -> &[PathBuf] {
        &self.outputs
    }
}

/// A registered task. Immutable once it is in a [`Registry`](super::Registry).
#[derive(Clone)]
pub struct Task {
    pub(crate) id: TaskId,
    pub(crate) decl: TaskDecl,
    pub(crate) body: TaskBody,
}

impl Task {
    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.decl.name
    }

    pub fn inputs(&self) -> &[PathBuf] {
        &self.decl.inputs
    }

    pub fn outputs(&self) -> &[PathBuf] {
        &self.decl.outputs
    }

    pub fn source(&self) -> Option<&Path> {
        self.decl.source.as_deref()
    }

    /// Invoke the body once.
    pub fn call(&self) -> anyhow::Result<()> {
        (self.body)()
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("id", &self.id)
            .field("name", &self.decl.name)
            .field("inputs", &self.decl.inputs)
            .field("outputs", &self.decl.outputs)
            .field("source", &self.decl.source)
            .finish_non_exhaustive()
    }
}

/// Returned by registration; lets the caller run the body directly.
#[derive(Clone)]
pub struct TaskHandle {
    id: TaskId,
    name: String,
    body: TaskBody,
}

impl TaskHandle {
    pub(crate) fn for_task(task: &Task) -> Self {
        Self {
            id: task.id,
            name: task.decl.name.clone(),
            body: Arc::clone(&task.body),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Run the task body directly, bypassing the staleness check.
    pub fn call(&self) -> anyhow::Result<()> {
        (self.body)()
    }
}

impl fmt::Debug for TaskHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TaskHandle")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
