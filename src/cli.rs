// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::default_config_path;

/// Command-line arguments for `freshtask`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "freshtask",
    version,
    about = "Run tasks whose outputs are missing or older than their inputs.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the task file (TOML).
    ///
    /// Relative task paths and commands are resolved against its directory.
    #[arg(long, value_name = "PATH", default_value_os_t = default_config_path())]
    pub config: PathBuf,

    /// Run every task, even those whose outputs are up to date.
    #[arg(long)]
    pub force: bool,

    /// Print what each task's status is, but don't execute any commands.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `FRESHTASK_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn force_flag_and_defaults() {
        let args = CliArgs::try_parse_from(["freshtask", "--force"]).unwrap();
        assert!(args.force);
        assert!(!args.dry_run);
        assert_eq!(args.config, PathBuf::from("Freshtask.toml"));
        assert!(args.log_level.is_none());
    }

    #[test]
    fn config_and_log_level() {
        let args = CliArgs::try_parse_from([
            "freshtask",
            "--config",
            "build/tasks.toml",
            "--log-level",
            "debug",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(args.config, PathBuf::from("build/tasks.toml"));
        assert!(matches!(args.log_level, Some(LogLevel::Debug)));
        assert!(args.dry_run);
        assert!(!args.force);
    }
}
