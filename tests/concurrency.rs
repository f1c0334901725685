use std::error::Error;
use std::time::{Duration, Instant};

use cmdmux::{Executor, ShellTask};

type TestResult = Result<(), Box<dyn Error>>;

// Timing-sensitive, so it lives alone in this file: tests in other files run
// in their own processes and cannot hold the shared runtime while the clock
// here is running.
#[test]
fn submitted_tasks_overlap_in_time() -> TestResult {
    let mut exe = Executor::new()?;

    let start = Instant::now();
    for _ in 0..3 {
        exe.submit(&ShellTask::new("sleep 0.4"))?;
    }
    exe.wait();
    let elapsed = start.elapsed();

    // Three 0.4s sleeps in parallel: well under the 1.2s sequential total.
    assert!(
        elapsed < Duration::from_millis(1100),
        "tasks did not overlap: {elapsed:?}"
    );
    assert!(
        elapsed >= Duration::from_millis(380),
        "sleeps cannot have run: {elapsed:?}"
    );

    // Later submissions overlap the same way and can be awaited again.
    let start = Instant::now();
    exe.submit(&ShellTask::new("sleep 0.4"))?;
    exe.submit(&ShellTask::new("sleep 0.4"))?;
    exe.wait();
    let elapsed = start.elapsed();
    assert!(
        elapsed < Duration::from_millis(1100),
        "second round did not overlap: {elapsed:?}"
    );

    exe.finish();
    Ok(())
}
