// src/executor.rs

//! The executor: submit units, await them, drain and close.

use std::future::Future;
use std::sync::Arc;

use tracing::debug;

use crate::errors::Result;
use crate::handle::Handle;
use crate::runnable::{Runnable, TaskResult};
use crate::runtime::SharedRuntime;

/// Runs [`Runnable`] units concurrently on the process-wide shared runtime.
///
/// All executors alive at the same time share one runtime; each keeps its
/// own list of outstanding submissions. A typical session submits any number
/// of units, then either `wait`s and inspects the handles, or `finish`es to
/// also close the shared runtime.
///
/// The blocking methods (`run_wait`, `wait`, `finish`) drive the runtime
/// from the calling thread and must not be used from inside a task already
/// running on it.
#[derive(Debug)]
pub struct Executor {
    runtime: Arc<SharedRuntime>,
    handles: Vec<Handle>,
}

impl Executor {
    /// Bind to the shared runtime, building it if this is the first use or
    /// the previous one was closed.
    pub fn new() -> Result<Self> {
        Ok(Executor {
            runtime: SharedRuntime::acquire()?,
            handles: Vec::new(),
        })
    }

    /// The live shared runtime, re-acquired transparently if someone closed
    /// the one this executor was using.
    fn live_runtime(&mut self) -> Result<&SharedRuntime> {
        if self.runtime.is_closed() {
            debug!("cached runtime is closed, acquiring a fresh one");
            self.runtime = SharedRuntime::acquire()?;
        }
        Ok(&self.runtime)
    }

    /// Begin `unit` concurrently. Returns immediately; the handle can be
    /// inspected later or ignored, and `wait`/`finish` cover it either way.
    pub fn submit<R>(&mut self, unit: &R) -> Result<Handle>
    where
        R: Runnable + ?Sized,
    {
        let join = self.live_runtime()?.spawn(unit.run());
        let handle = Handle::new(join);
        self.handles.push(handle.clone());
        Ok(handle)
    }

    /// Begin a bare computation concurrently, like
    /// [`submit`](Executor::submit) but without a task value.
    pub fn submit_future<F>(&mut self, future: F) -> Result<Handle>
    where
        F: Future<Output = TaskResult> + Send + 'static,
    {
        let join = self.live_runtime()?.spawn(future);
        let handle = Handle::new(join);
        self.handles.push(handle.clone());
        Ok(handle)
    }

    /// Add an already-obtained handle to the outstanding list so `wait` and
    /// `finish` cover it too.
    pub fn track(&mut self, handle: &Handle) {
        self.handles.push(handle.clone());
    }

    /// Run one unit to completion on the calling thread and return its
    /// result, propagating its failure directly to the caller. Outstanding
    /// submissions progress while this blocks; the outstanding list itself
    /// is not touched.
    pub fn run_wait<R>(&mut self, unit: &R) -> TaskResult
    where
        R: Runnable + ?Sized,
    {
        let future = unit.run();
        self.live_runtime()?.block_on(future)
    }

    /// Bare-computation form of [`run_wait`](Executor::run_wait).
    pub fn run_wait_future<F>(&mut self, future: F) -> TaskResult
    where
        F: Future<Output = TaskResult>,
    {
        self.live_runtime()?.block_on(future)
    }

    /// Block until every outstanding submission has resolved, success or
    /// failure. Failures are not raised here; inspect the handles or task
    /// values afterwards. The outstanding list is kept, so submissions made
    /// later can be awaited by calling this again.
    pub fn wait(&self) {
        if self.handles.is_empty() {
            return;
        }
        debug!(
            outstanding = self.handles.len(),
            "waiting for outstanding submissions"
        );
        self.runtime.block_on(async {
            for handle in &self.handles {
                let _ = handle.wait().await;
            }
        });
    }

    /// Drain and shut down: [`wait`](Executor::wait), clear the outstanding
    /// list, close the shared runtime. Terminal for this usage session; a
    /// later submit on any executor starts a fresh runtime.
    pub fn finish(&mut self) {
        self.wait();
        self.handles.clear();
        self.runtime.close();
    }

    /// Handles for every submission recorded since the last `finish`, in
    /// submission order.
    pub fn handles(&self) -> &[Handle] {
        &self.handles
    }
}
