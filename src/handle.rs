// src/handle.rs

//! Handles to submitted computations.

use std::sync::{Arc, OnceLock};

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::errors::CmdmuxError;
use crate::runnable::TaskResult;

/// Cloneable reference to one submitted computation.
///
/// The underlying join handle is awaited at most once; the outcome is cached
/// so any number of holders can inspect it afterwards.
#[derive(Clone, Debug)]
pub struct Handle {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    join: Mutex<JoinHandle<TaskResult>>,
    done: OnceLock<TaskResult>,
}

impl Handle {
    pub(crate) fn new(join: JoinHandle<TaskResult>) -> Self {
        Handle {
            inner: Arc::new(Inner {
                join: Mutex::new(join),
                done: OnceLock::new(),
            }),
        }
    }

    /// Suspend until the computation resolves, then return its outcome.
    ///
    /// Safe to call repeatedly and from clones; the first resolution is
    /// cached. A computation that was cancelled or panicked resolves to
    /// [`CmdmuxError::Aborted`].
    pub async fn wait(&self) -> &TaskResult {
        if self.inner.done.get().is_none() {
            let mut join = self.inner.join.lock().await;
            if self.inner.done.get().is_none() {
                let outcome = match (&mut *join).await {
                    Ok(result) => result,
                    Err(err) => Err(CmdmuxError::Aborted(err.to_string())),
                };
                let _ = self.inner.done.set(outcome);
            }
        }
        self.inner.done.get().expect("handle outcome present")
    }

    /// The outcome, if the computation has already been resolved through
    /// [`wait`](Handle::wait).
    pub fn outcome(&self) -> Option<&TaskResult> {
        self.inner.done.get()
    }

    /// Whether the computation has finished running. May briefly report
    /// `false` while another holder is in the middle of waiting on it.
    pub fn is_finished(&self) -> bool {
        if self.inner.done.get().is_some() {
            return true;
        }
        match self.inner.join.try_lock() {
            Ok(join) => join.is_finished(),
            Err(_) => false,
        }
    }
}
