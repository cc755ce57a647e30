// src/config/validate.rs

use std::collections::HashSet;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{FreshtaskError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::FreshtaskError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.config, raw.task))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_task_names(cfg)?;
    validate_commands(cfg)?;
    validate_paths(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(FreshtaskError::ConfigError(
            "task file must contain at least one [[task]] entry".to_string(),
        ));
    }
    Ok(())
}

fn validate_task_names(cfg: &RawConfigFile) -> Result<()> {
    let mut seen = HashSet::new();
    for (index, task) in cfg.task.iter().enumerate() {
        if task.name.trim().is_empty() {
            return Err(FreshtaskError::ConfigError(format!(
                "[[task]] #{} has an empty `name`",
                index + 1
            )));
        }
        // Names only label console lines, but in a task file a repeated
        // name is almost always a copy/paste mistake.
        if !seen.insert(task.name.as_str()) {
            return Err(FreshtaskError::ConfigError(format!(
                "task '{}' is declared more than once",
                task.name
            )));
        }
    }
    Ok(())
}

fn validate_commands(cfg: &RawConfigFile) -> Result<()> {
    for task in cfg.task.iter() {
        if task.cmd.trim().is_empty() {
            return Err(FreshtaskError::ConfigError(format!(
                "task '{}' has an empty `cmd`",
                task.name
            )));
        }
    }
    Ok(())
}

fn validate_paths(cfg: &RawConfigFile) -> Result<()> {
    for task in cfg.task.iter() {
        let declared = task
            .inputs
            .iter()
            .map(|p| ("inputs", p))
            .chain(task.outputs.iter().map(|p| ("outputs", p)));

        for (field, path) in declared {
            if path.as_os_str().is_empty() {
                return Err(FreshtaskError::ConfigError(format!(
                    "task '{}' has an empty path in `{}`",
                    task.name, field
                )));
            }
        }
    }
    Ok(())
}
