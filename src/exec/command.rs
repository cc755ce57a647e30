// src/exec/command.rs

//! Shell command task bodies.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use anyhow::{bail, Context, Result};
use tracing::{debug, info};

/// A command line run through the platform shell.
///
/// stdout and stderr are inherited so the command's own output shows up
/// right after the "Running task" line.
#[derive(Debug, Clone)]
pub struct ShellCommand {
    cmd: String,
    cwd: Option<PathBuf>,
}

impl ShellCommand {
    pub fn new(cmd: impl Into<String>) -> Self {
        Self {
            cmd: cmd.into(),
            cwd: None,
        }
    }

    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Run to completion. A non-zero exit (or death by signal) is an error.
    pub fn run(&self) -> Result<()> {
        info!(cmd = %self.cmd, cwd = ?self.cwd, "starting process");

        let status = self
            .build()
            .status()
            .with_context(|| format!("spawning `{}`", self.cmd))?;

        debug!(cmd = %self.cmd, exit_code = ?status.code(), "process exited");

        if status.success() {
            return Ok(());
        }
        match status.code() {
            Some(code) => bail!("`{}` exited with code {}", self.cmd, code),
            None => bail!("`{}` was terminated by a signal", self.cmd),
        }
    }

    // Build a shell command appropriate for the platform.
    fn build(&self) -> Command {
        let mut cmd = if cfg!(windows) {
            let mut c = Command::new("cmd");
            c.arg("/C").arg(&self.cmd);
            c
        } else {
            let mut c = Command::new("sh");
            c.arg("-c").arg(&self.cmd);
            c
        };

        cmd.stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[test]
    fn successful_command_runs_in_its_directory() {
        let dir = tempfile::tempdir().unwrap();
        ShellCommand::new("echo hi > out.txt")
            .current_dir(dir.path())
            .run()
            .unwrap();
        let written = std::fs::read_to_string(dir.path().join("out.txt")).unwrap();
        assert_eq!(written.trim(), "hi");
    }

    #[test]
    fn non_zero_exit_is_an_error_with_the_code() {
        let err = ShellCommand::new("exit 3").run().unwrap_err();
        assert!(err.to_string().contains("exited with code 3"), "{err}");
    }
}
