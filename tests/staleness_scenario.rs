// tests/staleness_scenario.rs
//
// The classic input.txt -> output.txt walkthrough against the real
// filesystem, with modification times pinned explicitly so the test does not
// depend on timestamp granularity.

use freshtask::errors::FreshtaskError;
use freshtask::fs::RealFileSystem;
use freshtask::oracle::StaleReason;
use freshtask::registry::Registry;
use freshtask::runner::{run_all, RunCause, Runner, TaskOutcome};
use freshtask_test_utils::init_tracing;

use std::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

type TestResult = Result<(), Box<dyn Error>>;

fn write_with_mtime(path: &Path, contents: &str, modified: SystemTime) -> TestResult {
    fs::write(path, contents)?;
    File::options().write(true).open(path)?.set_modified(modified)?;
    Ok(())
}

fn copy_task(registry: &mut Registry, dir: &Path) -> TestResult {
    let input = dir.join("input.txt");
    let output = dir.join("output.txt");
    registry.register("copy", ["input.txt"], ["output.txt"], move || {
        fs::copy(&input, &output)?;
        Ok(())
    })?;
    Ok(())
}

fn cause_of(outcome: &TaskOutcome) -> Option<&RunCause> {
    match outcome {
        TaskOutcome::Ran { cause, .. } => Some(cause),
        _ => None,
    }
}

#[test]
fn skip_then_rebuild_on_newer_input_then_rebuild_on_missing_output() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let now = SystemTime::now();
    let t0 = now - Duration::from_secs(300);
    let t1 = now - Duration::from_secs(200);
    let t2 = now - Duration::from_secs(100);

    write_with_mtime(&dir.path().join("input.txt"), "hello", t0)?;
    write_with_mtime(&dir.path().join("output.txt"), "hello", t1)?;

    let mut registry = Registry::new();
    copy_task(&mut registry, dir.path())?;
    let runner = Runner::new(RealFileSystem::rooted(dir.path()));

    // 1. Output newer than input.
    let first = runner.run(&registry)?;
    assert_eq!(first.skipped(), vec!["copy"]);

    // 2. Input touched after the output.
    write_with_mtime(&dir.path().join("input.txt"), "hello again", t2)?;
    let second = runner.run(&registry)?;
    assert_eq!(
        cause_of(&second.outcomes()[0]),
        Some(&RunCause::Stale(StaleReason::InputNewer {
            outdated: vec![PathBuf::from("output.txt")]
        }))
    );
    assert_eq!(fs::read_to_string(dir.path().join("output.txt"))?, "hello again");

    // 3. Output deleted.
    fs::remove_file(dir.path().join("output.txt"))?;
    let third = runner.run(&registry)?;
    let cause = cause_of(&third.outcomes()[0]).ok_or("expected the task to run")?;
    assert_eq!(cause.to_string(), "missing output: output.txt");
    assert!(dir.path().join("output.txt").exists());

    // And settled again afterwards.
    assert_eq!(runner.run(&registry)?.skipped(), vec!["copy"]);
    Ok(())
}

#[test]
fn equal_timestamps_count_as_up_to_date() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let t = SystemTime::now() - Duration::from_secs(60);
    write_with_mtime(&dir.path().join("input.txt"), "same", t)?;
    write_with_mtime(&dir.path().join("output.txt"), "same", t)?;

    let mut registry = Registry::new();
    copy_task(&mut registry, dir.path())?;

    let report = Runner::new(RealFileSystem::rooted(dir.path())).run(&registry)?;
    assert_eq!(report.skipped(), vec!["copy"]);
    Ok(())
}

#[test]
fn missing_input_aborts_before_running_anything() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let mut registry = Registry::new();
    copy_task(&mut registry, dir.path())?;

    let err = Runner::new(RealFileSystem::rooted(dir.path()))
        .run(&registry)
        .unwrap_err();

    match err {
        FreshtaskError::MissingInput { task, missing } => {
            assert_eq!(task, "copy");
            assert_eq!(missing, vec![PathBuf::from("input.txt")]);
        }
        other => panic!("expected MissingInput, got {other:?}"),
    }
    assert!(!dir.path().join("output.txt").exists());
    Ok(())
}

#[test]
fn forcing_ignores_the_filesystem() -> TestResult {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let mut registry = Registry::new();
    registry.register("stamp", ["never-created.txt"], ["stamp.txt"], || Ok(()))?;

    let report = Runner::new(RealFileSystem::rooted(dir.path()))
        .force(true)
        .run(&registry)?;
    assert_eq!(cause_of(&report.outcomes()[0]), Some(&RunCause::Forced));
    Ok(())
}

#[test]
fn run_all_uses_absolute_paths_on_the_real_filesystem() -> TestResult {
    init_tracing();
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("input.txt");
    let output = dir.path().join("output.txt");
    let t0 = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000);
    write_with_mtime(&input, "hello", t0)?;

    let mut registry = Registry::new();
    let (from, to) = (input.clone(), output.clone());
    registry.register("copy", [input.clone()], [output.clone()], move || {
        fs::copy(&from, &to)?;
        Ok(())
    })?;

    let report = run_all(&registry, false)?;
    assert_eq!(report.ran(), vec!["copy"]);
    assert_eq!(
        cause_of(&report.outcomes()[0]),
        Some(&RunCause::Stale(StaleReason::MissingOutput(output.clone())))
    );

    File::options()
        .write(true)
        .open(&output)?
        .set_modified(t0 + Duration::from_secs(10))?;
    let report = run_all(&registry, false)?;
    assert_eq!(report.skipped(), vec!["copy"]);
    Ok(())
}
