use std::error::Error;

use cmdmux::{Executor, ShellTask, StdoutMode};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn finish_allows_transparent_recreation() -> TestResult {
    let mut exe = Executor::new()?;
    exe.submit(&ShellTask::new("true"))?;
    exe.finish();
    assert!(exe.handles().is_empty());

    // The same executor keeps working: a fresh runtime is acquired silently.
    let again = ShellTask::new("printf again").with_stdout(StdoutMode::Capture);
    let out = exe.run_wait(&again)?;
    assert_eq!(out.as_deref(), Some("again"));

    exe.submit(&ShellTask::new("true"))?;
    exe.wait();
    assert_eq!(exe.handles().len(), 1);
    exe.finish();

    // So does a brand-new executor created after the close.
    let mut fresh = Executor::new()?;
    let task = ShellTask::new("printf fresh").with_stdout(StdoutMode::Capture);
    let out = fresh.run_wait(&task)?;
    assert_eq!(out.as_deref(), Some("fresh"));
    fresh.finish();
    Ok(())
}

#[test]
fn executors_run_side_by_side() -> TestResult {
    let mut a = Executor::new()?;
    let mut b = Executor::new()?;

    let ta = ShellTask::new("printf a").with_stdout(StdoutMode::Capture);
    let tb = ShellTask::new("printf b").with_stdout(StdoutMode::Capture);

    a.submit(&ta)?;
    b.submit(&tb)?;

    a.wait();
    b.wait();

    assert_eq!(ta.stdout(), Some("a"));
    assert_eq!(tb.stdout(), Some("b"));
    // Submission bookkeeping stays per-executor.
    assert_eq!(a.handles().len(), 1);
    assert_eq!(b.handles().len(), 1);
    Ok(())
}
