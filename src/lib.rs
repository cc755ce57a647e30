// src/lib.rs

//! Minimal incremental task runner.
//!
//! Declare tasks with the files they read and write, then run only the ones
//! whose outputs are missing or older than their inputs:
//!
//! ```no_run
//! use freshtask::registry::Registry;
//!
//! let mut registry = Registry::new();
//! registry.register("copy", ["input.txt"], ["output.txt"], || {
//!     std::fs::copy("input.txt", "output.txt")?;
//!     Ok(())
//! })?;
//!
//! let report = freshtask::run_all(&registry, false)?;
//! std::process::exit(report.exit_code());
//! # Ok::<(), freshtask::errors::FreshtaskError>(())
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod exec;
pub mod fs;
pub mod logging;
pub mod oracle;
pub mod registry;
pub mod runner;

use anyhow::Result;
use tracing::debug;

use crate::cli::CliArgs;
use crate::config::{build_registry, config_root_dir, load_and_validate};
use crate::fs::RealFileSystem;
use crate::registry::Registry;
use crate::runner::{ConsoleReporter, PlannedTask, Runner};

pub use crate::runner::run_all;

/// High-level entry point used by `main.rs`. Returns the process exit code.
///
/// This wires together:
/// - task file loading
/// - registry construction
/// - the runner with a console reporter on stdout
pub fn run(args: CliArgs) -> Result<i32> {
    let cfg = load_and_validate(&args.config)?;
    let root = config_root_dir(&args.config);
    let task_file = args.config.file_name().map(std::path::Path::new);
    let registry = build_registry(&cfg, &root, task_file)?;

    let runner = Runner::new(RealFileSystem::rooted(&root)).force(args.force);

    if args.dry_run {
        let plan = runner.plan(&registry)?;
        print_dry_run(&registry, &plan, args.force);
        return Ok(0);
    }

    let mut reporter = ConsoleReporter::stdout();
    let report = runner.run_with(&registry, &mut reporter)?;
    debug!(
        ran = report.ran().len(),
        skipped = report.skipped().len(),
        "run complete"
    );
    Ok(report.exit_code())
}

/// Simple dry-run output: print tasks, their paths and current verdicts.
fn print_dry_run(registry: &Registry, plan: &[PlannedTask], forced: bool) {
    println!("freshtask dry-run");
    println!("  forced = {forced}");
    println!();

    println!("tasks ({}):", registry.len());
    for (task, planned) in registry.iter().zip(plan) {
        println!("  - {}", task.name());
        if !task.inputs().is_empty() {
            println!("      inputs: {}", errors::join_paths(task.inputs()));
        }
        if !task.outputs().is_empty() {
            println!("      outputs: {}", errors::join_paths(task.outputs()));
        }
        println!("      status: {}", planned.verdict);
    }
}
