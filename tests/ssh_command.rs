use std::error::Error;

use cmdmux::{SshTask, StderrMode, StdoutMode};

type TestResult = Result<(), Box<dyn Error>>;

#[test]
fn default_modes_discard_remote_stdout() -> TestResult {
    let task = SshTask::new("-p 2022 user@host", "uptime");

    // stdout is discarded by default, so the remote side nulls it; stderr is
    // captured by default, so it travels untouched.
    let words = shell_words::split(task.cmd())?;
    assert_eq!(
        words,
        vec!["ssh", "-p", "2022", "user@host", "uptime 1>/dev/null"]
    );
    assert_eq!(task.remote_cmd(), "uptime");
    assert_eq!(task.title(), task.cmd());
    assert_eq!(task.exit_code(), None);
    Ok(())
}

#[test]
fn capturing_both_streams_adds_no_redirection() -> TestResult {
    let task = SshTask::new("host", "uptime").with_stdout(StdoutMode::Capture);
    assert_eq!(task.cmd(), "ssh host uptime");
    Ok(())
}

#[test]
fn discarding_both_streams_redirects_remotely() -> TestResult {
    let task = SshTask::new("user@host", "uptime").with_stderr(StderrMode::Discard);

    let cmd = task.cmd();
    assert!(cmd.starts_with("ssh user@host "));
    assert!(cmd.contains("1>/dev/null"));
    assert!(cmd.contains("2>/dev/null"));

    // The wrapped command stays one shell word after `ssh` and the params.
    let words = shell_words::split(cmd)?;
    assert_eq!(
        words,
        vec!["ssh", "user@host", "uptime 1>/dev/null 2>/dev/null"]
    );
    Ok(())
}

#[test]
fn merge_mode_redirects_remote_stderr_into_stdout() -> TestResult {
    let task = SshTask::new("host", "make test")
        .with_stdout(StdoutMode::Capture)
        .with_stderr(StderrMode::MergeIntoStdout);

    let words = shell_words::split(task.cmd())?;
    assert_eq!(words, vec!["ssh", "host", "make test 2>&1"]);
    Ok(())
}

#[test]
fn remote_command_is_quoted_as_one_argument() -> TestResult {
    let task = SshTask::new("host", "grep 'a b' /var/log/syslog").with_stdout(StdoutMode::Capture);

    let words = shell_words::split(task.cmd())?;
    assert_eq!(words.len(), 3);
    assert_eq!(words[2], "grep 'a b' /var/log/syslog");
    Ok(())
}

#[test]
fn custom_title_passes_through() -> TestResult {
    let task = SshTask::new("host", "uptime").with_title("uptime-check");
    assert_eq!(task.title(), "uptime-check");
    // Completion fields stay unset until the task actually runs.
    assert!(task.report().is_none());
    assert_eq!(task.stdout(), None);
    assert_eq!(task.stderr(), None);
    Ok(())
}
