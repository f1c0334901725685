// src/runtime.rs

//! Process-wide shared scheduling runtime.
//!
//! Every [`Executor`](crate::executor::Executor) created while a runtime is
//! live shares the same instance. `close` flips the closed flag and empties
//! the global slot, so the next `acquire` builds a fresh runtime; executors
//! still holding the old one keep a usable reference until the last of them
//! goes away.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use tokio::runtime::{Builder, Runtime};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::errors::{CmdmuxError, Result};

static SHARED: Mutex<Option<Arc<SharedRuntime>>> = Mutex::new(None);

/// A single-threaded cooperative runtime plus its closed flag.
///
/// Spawned futures only make progress while some caller is blocked inside
/// [`block_on`](SharedRuntime::block_on); tasks interleave at their await
/// points instead of running on parallel threads.
#[derive(Debug)]
pub(crate) struct SharedRuntime {
    runtime: Runtime,
    closed: AtomicBool,
}

impl SharedRuntime {
    /// Return the live shared runtime, building one if none exists or the
    /// previous one was closed.
    pub(crate) fn acquire() -> Result<Arc<SharedRuntime>> {
        let mut slot = SHARED.lock().expect("shared runtime slot poisoned");
        match slot.as_ref() {
            Some(shared) if !shared.is_closed() => Ok(Arc::clone(shared)),
            _ => {
                let fresh = SharedRuntime::build()?;
                *slot = Some(Arc::clone(&fresh));
                Ok(fresh)
            }
        }
    }

    fn build() -> Result<Arc<SharedRuntime>> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(CmdmuxError::ContextUnavailable)?;
        debug!("built fresh shared runtime");
        Ok(Arc::new(SharedRuntime {
            runtime,
            closed: AtomicBool::new(false),
        }))
    }

    pub(crate) fn is_closed(&self) -> bool {
        self.closed.load(Ordering::Acquire)
    }

    /// Mark this runtime closed and unhook it from the global slot so the
    /// next [`acquire`](SharedRuntime::acquire) builds a fresh one. The tokio
    /// runtime itself shuts down once the last reference drops, cancelling
    /// any still-pending tasks.
    pub(crate) fn close(&self) {
        self.closed.store(true, Ordering::Release);
        let mut slot = SHARED.lock().expect("shared runtime slot poisoned");
        if slot
            .as_deref()
            .is_some_and(|current| std::ptr::eq(current, self))
        {
            *slot = None;
        }
        debug!("shared runtime closed");
    }

    pub(crate) fn spawn<F>(&self, future: F) -> JoinHandle<F::Output>
    where
        F: Future + Send + 'static,
        F::Output: Send + 'static,
    {
        self.runtime.spawn(future)
    }

    /// Drive `future` to completion on the calling thread, running every
    /// spawned task alongside it. Must not be called from inside a task that
    /// is itself running on this runtime.
    pub(crate) fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}
