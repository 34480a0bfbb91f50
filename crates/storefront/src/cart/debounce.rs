//! Trailing-edge debouncer for line updates.
//!
//! Each call schedules its task after a quiet period and supersedes the
//! previously scheduled one. A task that has started running is detached
//! from the debouncer and always completes; only tasks still waiting out
//! their quiet period are cancelled.

use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::task::{Context, Poll};
use std::time::Duration;

use tokio::runtime::{Handle, TryCurrentError};
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tracing::debug;

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    pending: Option<JoinHandle<()>>,
}

/// Runs only the last of a burst of calls.
#[derive(Debug)]
pub struct Debouncer<T> {
    wait: Duration,
    slot: Arc<Mutex<Slot>>,
    _output: std::marker::PhantomData<fn() -> T>,
}

impl<T: Send + 'static> Debouncer<T> {
    /// Create a debouncer with the given quiet period.
    #[must_use]
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            slot: Arc::new(Mutex::new(Slot::default())),
            _output: std::marker::PhantomData,
        }
    }

    /// The quiet period.
    #[must_use]
    pub const fn wait(&self) -> Duration {
        self.wait
    }

    /// Schedule `task` to run once the quiet period passes with no newer call.
    ///
    /// The task is spawned immediately on the current Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if called outside a Tokio runtime. The pending call,
    /// if any, is left scheduled.
    pub fn call<F, Fut>(&self, task: F) -> Result<Debounced<T>, TryCurrentError>
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = T> + Send + 'static,
    {
        let runtime = Handle::try_current()?;
        let (tx, rx) = oneshot::channel();
        let slot = Arc::clone(&self.slot);
        let wait = self.wait;

        let mut guard = lock(&self.slot);
        guard.generation = guard.generation.wrapping_add(1);
        let generation = guard.generation;

        if let Some(previous) = guard.pending.take() {
            previous.abort();
            debug!(generation, "Superseded pending call");
        }

        let handle = runtime.spawn(async move {
            tokio::time::sleep(wait).await;

            {
                let mut guard = lock(&slot);
                if guard.generation != generation {
                    return;
                }
                // Detach: from here on no newer call can abort this task
                guard.pending = None;
            }

            let output = task().await;
            // Receiver gone means the caller stopped waiting
            let _ = tx.send(output);
        });

        guard.pending = Some(handle);
        drop(guard);

        Ok(Debounced { rx })
    }
}

fn lock(slot: &Mutex<Slot>) -> MutexGuard<'_, Slot> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Result of a debounced call.
///
/// Resolves to `Some(output)` once the task ran, or `None` if a newer call
/// superseded it before it started.
#[derive(Debug)]
#[must_use = "a debounced call resolves to its task's output"]
pub struct Debounced<T> {
    rx: oneshot::Receiver<T>,
}

impl<T> Future for Debounced<T> {
    type Output = Option<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.rx).poll(cx).map(Result::ok)
    }
}
