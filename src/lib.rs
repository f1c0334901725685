// src/lib.rs

//! Run many shell and ssh commands concurrently on one shared runtime.
//!
//! An [`Executor`] spawns [`Runnable`] tasks onto a process-wide
//! single-threaded runtime and blocks for them in bulk, so a batch of slow
//! external commands takes about as long as its slowest member:
//!
//! ```no_run
//! use cmdmux::{Executor, ShellTask};
//!
//! fn main() -> cmdmux::Result<()> {
//!     let mut exe = Executor::new()?;
//!     exe.submit(&ShellTask::new("date > /tmp/first; sleep 1"))?;
//!     exe.submit(&ShellTask::new("sleep 1; date > /tmp/second"))?;
//!     // Both finish roughly one second from now, not two.
//!     exe.finish();
//!     Ok(())
//! }
//! ```
//!
//! Tasks configure per-stream capture modes; captured output and the exit
//! code are readable from the task (or its [`Handle`]) after completion.

pub mod errors;
pub mod executor;
pub mod handle;
pub mod logging;
pub mod runnable;
mod runtime;
pub mod shell;
pub mod ssh;

pub use crate::errors::{CmdmuxError, Result};
pub use crate::executor::Executor;
pub use crate::handle::Handle;
pub use crate::runnable::{Runnable, TaskFuture, TaskResult};
pub use crate::shell::{ShellTask, StderrMode, StdoutMode, TaskReport};
pub use crate::ssh::SshTask;
