// src/runnable.rs

//! The unit-of-work contract consumed by [`Executor`](crate::executor::Executor).

use std::future::Future;
use std::pin::Pin;

use crate::errors::Result;

/// What a finished computation resolves to: the captured stdout text, or
/// `None` when stdout was not captured.
pub type TaskResult = Result<Option<String>>;

/// Boxed computation produced by [`Runnable::run`]. Owns everything it needs
/// so it can be spawned onto the shared runtime and outlive the task value
/// that built it.
pub type TaskFuture = Pin<Box<dyn Future<Output = TaskResult> + Send + 'static>>;

/// Anything the executor can begin running.
///
/// Implementations build the returned future from their own configuration;
/// calling `run` spawns nothing by itself and may be done any number of
/// times, each call describing one fresh execution.
pub trait Runnable {
    fn run(&self) -> TaskFuture;
}
