// src/ssh.rs

//! Remote commands over ssh, composed on top of [`ShellTask`].

use crate::runnable::{Runnable, TaskFuture};
use crate::shell::{ShellTask, StderrMode, StdoutMode, TaskReport};

/// One command run on a remote host through the local `ssh` binary.
///
/// The capture modes do double duty: besides driving local stream handling
/// exactly as on [`ShellTask`], they are mapped onto remote-side redirections
/// appended to the wrapped command, so output the caller discards never
/// crosses the connection.
#[derive(Debug)]
pub struct SshTask {
    params: String,
    remote_cmd: String,
    title: Option<String>,
    stdout_mode: StdoutMode,
    stderr_mode: StderrMode,
    local: ShellTask,
}

impl SshTask {
    /// A task running `cmd` on the host described by the ssh connection
    /// parameters `params` (e.g. `-p 2022 user@host`). Capture defaults
    /// match [`ShellTask`]: stdout discarded, stderr captured.
    pub fn new(params: impl Into<String>, cmd: impl Into<String>) -> Self {
        let params = params.into();
        let remote_cmd = cmd.into();
        let local = build_local(
            &params,
            &remote_cmd,
            None,
            StdoutMode::default(),
            StderrMode::default(),
        );
        SshTask {
            params,
            remote_cmd,
            title: None,
            stdout_mode: StdoutMode::default(),
            stderr_mode: StderrMode::default(),
            local,
        }
    }

    /// Label used in log events. Defaults to the effective local command.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self.rebuild();
        self
    }

    pub fn with_stdout(mut self, mode: StdoutMode) -> Self {
        self.stdout_mode = mode;
        self.rebuild();
        self
    }

    pub fn with_stderr(mut self, mode: StderrMode) -> Self {
        self.stderr_mode = mode;
        self.rebuild();
        self
    }

    fn rebuild(&mut self) {
        self.local = build_local(
            &self.params,
            &self.remote_cmd,
            self.title.as_deref(),
            self.stdout_mode,
            self.stderr_mode,
        );
    }

    /// The effective local command: `ssh {params} {quoted remote command}`.
    pub fn cmd(&self) -> &str {
        self.local.cmd()
    }

    /// The wrapped command as supplied, without remote redirections.
    pub fn remote_cmd(&self) -> &str {
        &self.remote_cmd
    }

    pub fn title(&self) -> &str {
        self.local.title()
    }

    pub fn exit_code(&self) -> Option<i32> {
        self.local.exit_code()
    }

    pub fn stdout(&self) -> Option<&str> {
        self.local.stdout()
    }

    pub fn stderr(&self) -> Option<&str> {
        self.local.stderr()
    }

    pub fn report(&self) -> Option<&TaskReport> {
        self.local.report()
    }
}

impl Runnable for SshTask {
    fn run(&self) -> TaskFuture {
        self.local.run()
    }
}

fn build_local(
    params: &str,
    remote_cmd: &str,
    title: Option<&str>,
    stdout_mode: StdoutMode,
    stderr_mode: StderrMode,
) -> ShellTask {
    let remote = format!(
        "{}{}",
        remote_cmd,
        redirect_suffix(stdout_mode, stderr_mode)
    );
    let cmd = format!("ssh {} {}", params, shell_words::quote(&remote));
    let mut task = ShellTask::new(cmd)
        .with_stdout(stdout_mode)
        .with_stderr(stderr_mode);
    if let Some(title) = title {
        task = task.with_title(title);
    }
    task
}

/// Remote-side redirections implied by the capture modes, in Bourne shell
/// syntax. Captured streams contribute nothing.
fn redirect_suffix(stdout_mode: StdoutMode, stderr_mode: StderrMode) -> String {
    let mut suffix = String::new();
    if stdout_mode == StdoutMode::Discard {
        suffix.push_str(" 1>/dev/null");
    }
    match stderr_mode {
        StderrMode::Discard => suffix.push_str(" 2>/dev/null"),
        StderrMode::MergeIntoStdout => suffix.push_str(" 2>&1"),
        StderrMode::Capture => {}
    }
    suffix
}
