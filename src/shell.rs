// src/shell.rs

//! Local shell command tasks.

use std::process::Stdio;
use std::sync::{Arc, OnceLock};

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::errors::{CmdmuxError, Result};
use crate::runnable::{Runnable, TaskFuture};

/// What to do with a task's stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdoutMode {
    /// Send the stream to the null device; nothing is captured.
    #[default]
    Discard,
    /// Pipe the stream back and capture it as text.
    Capture,
}

/// What to do with a task's stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StderrMode {
    /// Send the stream to the null device; nothing is captured.
    Discard,
    /// Pipe the stream back and capture it as text.
    #[default]
    Capture,
    /// Redirect the stream into stdout; the stderr field stays unset.
    MergeIntoStdout,
}

/// Everything recorded when a task's process exits. Set once, as a group;
/// streams that were not captured stay `None`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskReport {
    pub exit_code: i32,
    pub stdout: Option<String>,
    pub stderr: Option<String>,
}

/// One local shell command.
///
/// Constructed with configuration only; the process is spawned when an
/// [`Executor`](crate::executor::Executor) begins the task's computation.
/// After the process exits the task is inspectable through
/// [`report`](ShellTask::report) and the per-field accessors, which return
/// the same values forever after.
#[derive(Debug)]
pub struct ShellTask {
    cmd: String,
    title: String,
    stdout_mode: StdoutMode,
    stderr_mode: StderrMode,
    report: Arc<OnceLock<TaskReport>>,
}

impl ShellTask {
    /// A task that runs `cmd` through the platform shell. Defaults: stdout
    /// discarded, stderr captured, title equal to the command text.
    pub fn new(cmd: impl Into<String>) -> Self {
        let cmd = cmd.into();
        ShellTask {
            title: cmd.clone(),
            cmd,
            stdout_mode: StdoutMode::default(),
            stderr_mode: StderrMode::default(),
            report: Arc::new(OnceLock::new()),
        }
    }

    /// Label used in log events instead of the full command text.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_stdout(mut self, mode: StdoutMode) -> Self {
        self.stdout_mode = mode;
        self
    }

    pub fn with_stderr(mut self, mode: StderrMode) -> Self {
        self.stderr_mode = mode;
        self
    }

    pub fn cmd(&self) -> &str {
        &self.cmd
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// The full completion record, once the process has exited.
    pub fn report(&self) -> Option<&TaskReport> {
        self.report.get()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.report().map(|r| r.exit_code)
    }

    /// Captured stdout; `None` until completion or if stdout was not captured.
    pub fn stdout(&self) -> Option<&str> {
        self.report().and_then(|r| r.stdout.as_deref())
    }

    /// Captured stderr; `None` until completion or if stderr was not captured.
    pub fn stderr(&self) -> Option<&str> {
        self.report().and_then(|r| r.stderr.as_deref())
    }
}

impl Runnable for ShellTask {
    fn run(&self) -> TaskFuture {
        let launch = Launch {
            cmd: self.cmd.clone(),
            title: self.title.clone(),
            stdout_mode: self.stdout_mode,
            stderr_mode: self.stderr_mode,
            report: Arc::clone(&self.report),
        };
        Box::pin(run_command(launch))
    }
}

/// Owned snapshot of a task's configuration, moved into its future.
struct Launch {
    cmd: String,
    title: String,
    stdout_mode: StdoutMode,
    stderr_mode: StderrMode,
    report: Arc<OnceLock<TaskReport>>,
}

async fn run_command(launch: Launch) -> Result<Option<String>> {
    // Merging happens inside the shell so it covers compound commands.
    let effective = match launch.stderr_mode {
        StderrMode::MergeIntoStdout => merged_cmd(&launch.cmd),
        _ => launch.cmd.clone(),
    };

    debug!(title = %launch.title, cmd = %effective, "starting shell command");

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&effective);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&effective);
        c
    };

    cmd.stdout(stdout_stdio(launch.stdout_mode))
        .stderr(stderr_stdio(launch.stderr_mode))
        .kill_on_drop(true);

    let mut child = cmd.spawn().map_err(|source| CmdmuxError::Launch {
        command: launch.cmd.clone(),
        source,
    })?;

    // Drain piped streams concurrently with the wait so a full OS pipe
    // buffer can never stall the child.
    let stdout_drain = child.stdout.take().map(|s| tokio::spawn(drain_stream(s)));
    let stderr_drain = child.stderr.take().map(|s| tokio::spawn(drain_stream(s)));

    let status = child.wait().await?;

    let stdout_bytes = join_drain(stdout_drain).await?;
    let stderr_bytes = join_drain(stderr_drain).await?;

    let code = status.code().unwrap_or(-1);
    let report = TaskReport {
        exit_code: code,
        stdout: stdout_bytes.map(|b| decode_trimmed(&b)),
        stderr: stderr_bytes.map(|b| decode_trimmed(&b)),
    };

    debug!(
        title = %launch.title,
        exit_code = code,
        success = status.success(),
        "shell command exited"
    );

    let _ = launch.report.set(report.clone());

    if !status.success() {
        warn!(title = %launch.title, exit_code = code, "shell command failed");
        return Err(CmdmuxError::CommandFailed {
            exit_code: code,
            command: launch.cmd,
            stdout: report.stdout,
            stderr: report.stderr,
        });
    }

    Ok(report.stdout)
}

fn merged_cmd(cmd: &str) -> String {
    if cfg!(windows) {
        format!("({cmd}) 2>&1")
    } else {
        format!("exec 2>&1; {cmd}")
    }
}

fn stdout_stdio(mode: StdoutMode) -> Stdio {
    match mode {
        StdoutMode::Discard => Stdio::null(),
        StdoutMode::Capture => Stdio::piped(),
    }
}

fn stderr_stdio(mode: StderrMode) -> Stdio {
    match mode {
        // Under merge the shell rewires fd 2 itself; nothing arrives here.
        StderrMode::Discard | StderrMode::MergeIntoStdout => Stdio::null(),
        StderrMode::Capture => Stdio::piped(),
    }
}

async fn drain_stream<R>(mut stream: R) -> std::io::Result<Vec<u8>>
where
    R: AsyncRead + Unpin,
{
    let mut buf = Vec::new();
    stream.read_to_end(&mut buf).await?;
    Ok(buf)
}

async fn join_drain(
    drain: Option<JoinHandle<std::io::Result<Vec<u8>>>>,
) -> Result<Option<Vec<u8>>> {
    match drain {
        None => Ok(None),
        Some(join) => match join.await {
            Ok(bytes) => Ok(Some(bytes?)),
            Err(err) => Err(CmdmuxError::Aborted(err.to_string())),
        },
    }
}

fn decode_trimmed(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).trim_end().to_string()
}
