// src/config/model.rs

use std::path::PathBuf;

use serde::Deserialize;

/// Task file as read from TOML, before validation.
///
/// ```toml
/// [config]
/// track_task_file = true
///
/// [[task]]
/// name = "compile"
/// cmd = "cc -c main.c -o main.o"
/// inputs = ["main.c", "main.h"]
/// outputs = ["main.o"]
///
/// [[task]]
/// name = "link"
/// cmd = "cc main.o -o app"
/// inputs = ["main.o"]
/// outputs = ["app"]
/// ```
///
/// `[[task]]` is an array of tables, so the order in the file is the order in
/// which tasks are registered and run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RawConfigFile {
    #[serde(default)]
    pub config: ConfigSection,

    #[serde(default)]
    pub task: Vec<TaskConfig>,
}

/// Validated task file. Build one with `ConfigFile::try_from(raw)`.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub config: ConfigSection,
    pub task: Vec<TaskConfig>,
}

impl ConfigFile {
    pub(crate) fn new_unchecked(config: ConfigSection, task: Vec<TaskConfig>) -> Self {
        Self { config, task }
    }
}

/// `[config]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigSection {
    /// Treat the task file itself as an extra input of every task, so that
    /// editing a command re-runs it.
    #[serde(default = "default_track_task_file")]
    pub track_task_file: bool,
}

fn default_track_task_file() -> bool {
    true
}

impl Default for ConfigSection {
    fn default() -> Self {
        Self {
            track_task_file: default_track_task_file(),
        }
    }
}

/// One `[[task]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskConfig {
    pub name: String,

    /// Shell command run in the task file's directory.
    pub cmd: String,

    /// Files the command reads, relative to the task file's directory.
    #[serde(default)]
    pub inputs: Vec<PathBuf>,

    /// Files the command writes. Leave empty for a task that always runs.
    #[serde(default)]
    pub outputs: Vec<PathBuf>,
}
