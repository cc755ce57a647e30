// src/exec/mod.rs

//! Process execution for task-file tasks.
//!
//! - [`command`] provides [`ShellCommand`], a task body that runs a shell
//!   command synchronously and fails on a non-zero exit status.

pub mod command;

pub use command::ShellCommand;
