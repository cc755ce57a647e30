#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use freshtask::fs::mock::MockFileSystem;
use freshtask::registry::{Registry, TaskDecl, TaskHandle};

/// Shared record of which task bodies ran, in order.
#[derive(Debug, Clone, Default)]
pub struct ExecutionLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, name: &str) {
        self.entries.lock().unwrap().push(name.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.as_str() == name)
            .count()
    }
}

/// How a test task body behaves when invoked.
#[derive(Debug, Clone)]
enum Behaviour {
    /// Record and succeed.
    Succeed,
    /// Record, then "write" every output on the mock filesystem.
    WriteOutputs(MockFileSystem),
    /// Record, then fail with the message.
    Fail(String),
}

/// Builder for registries of test tasks.
///
/// Every body records its task name in the [`ExecutionLog`] before doing
/// anything else.
pub struct RegistryBuilder {
    registry: Registry,
    log: ExecutionLog,
    handles: Vec<TaskHandle>,
}

impl RegistryBuilder {
    pub fn new(log: &ExecutionLog) -> Self {
        Self {
            registry: Registry::new(),
            log: log.clone(),
            handles: Vec::new(),
        }
    }

    /// A task whose body only records itself.
    pub fn task(self, decl: TaskDecl) -> Self {
        self.add(decl, Behaviour::Succeed)
    }

    /// A task whose body touches all of its outputs on `fs`.
    pub fn writing_task(self, decl: TaskDecl, fs: &MockFileSystem) -> Self {
        self.add(decl, Behaviour::WriteOutputs(fs.clone()))
    }

    /// A task whose body fails with `message`.
    pub fn failing_task(self, decl: TaskDecl, message: &str) -> Self {
        self.add(decl, Behaviour::Fail(message.to_string()))
    }

    pub fn build(self) -> Registry {
        self.registry
    }

    pub fn build_with_handles(self) -> (Registry, Vec<TaskHandle>) {
        (self.registry, self.handles)
    }

    fn add(mut self, decl: TaskDecl, behaviour: Behaviour) -> Self {
        let log = self.log.clone();
        let name = decl.name().to_string();
        let outputs: Vec<PathBuf> = decl.declared_outputs().to_vec();

        let handle = self
            .registry
            .declare(decl, move || {
                log.record(&name);
                match &behaviour {
                    Behaviour::Succeed => Ok(()),
                    Behaviour::WriteOutputs(fs) => {
                        for output in &outputs {
                            fs.touch(output);
                        }
                        Ok(())
                    }
                    Behaviour::Fail(message) => Err(anyhow::anyhow!("{message}")),
                }
            })
            .expect("test task declaration should be valid");

        self.handles.push(handle);
        self
    }
}
