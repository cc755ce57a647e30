// src/config/loader.rs

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::Result;
use crate::exec::ShellCommand;
use crate::registry::{Registry, TaskDecl};

/// Load a task file from a given path and return the raw `RawConfigFile`.
///
/// This only performs TOML deserialization; it does **not** perform semantic
/// validation. Use [`load_and_validate`] for that.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<RawConfigFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path)?;
    load_from_str(&contents)
}

pub fn load_from_str(contents: &str) -> Result<RawConfigFile> {
    let config: RawConfigFile = toml::from_str(contents)?;
    Ok(config)
}

/// Load a task file from path and run validation.
///
/// - Reads TOML (wrong types, unknown keys and a missing `cmd` fail here).
/// - Checks for: no tasks, blank or repeated names, empty commands, empty
///   paths.
pub fn load_and_validate(path: impl AsRef<Path>) -> Result<ConfigFile> {
    let raw_config = load_from_path(&path)?;
    let config = ConfigFile::try_from(raw_config)?;
    info!(
        path = %path.as_ref().display(),
        tasks = config.task.len(),
        "loaded task file"
    );
    Ok(config)
}

/// Default task file location: `Freshtask.toml` in the working directory.
pub fn default_config_path() -> PathBuf {
    PathBuf::from("Freshtask.toml")
}

/// Directory that relative task paths and commands are resolved against.
///
/// - If the task file path has a non-empty parent (e.g. "build/Freshtask.toml"),
///   we use that directory.
/// - If it's just a bare filename like "Freshtask.toml" (parent = ""),
///   we fall back to the current working directory "."
pub fn config_root_dir(config_path: &Path) -> PathBuf {
    match config_path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    }
}

/// Register every task of a validated task file, in file order.
///
/// Task bodies run their `cmd` through the shell inside `root`. Paths are kept
/// exactly as written; pair the registry with a
/// [`RealFileSystem::rooted`](crate::fs::RealFileSystem::rooted) at the same
/// `root`. When `[config].track_task_file` is on, `task_file` (relative to
/// `root`) becomes each task's source.
pub fn build_registry(cfg: &ConfigFile, root: &Path, task_file: Option<&Path>) -> Result<Registry> {
    let mut registry = Registry::new();
    let source = task_file.filter(|_| cfg.config.track_task_file);

    for task in cfg.task.iter() {
        let mut decl = TaskDecl::new(task.name.clone())
            .inputs(task.inputs.iter().cloned())
            .outputs(task.outputs.iter().cloned());
        if let Some(source) = source {
            decl = decl.source(source);
        }

        let command = ShellCommand::new(task.cmd.clone()).current_dir(root);
        debug!(task = %task.name, cmd = %task.cmd, "declaring shell task");
        registry.declare_shared(decl, Arc::new(move || command.run()))?;
    }

    Ok(registry)
}
