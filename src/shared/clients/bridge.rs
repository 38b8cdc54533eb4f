//! Blocking bridge over the async transport
//!
//! The blocking client hands each request future to a runtime owned by the
//! bridge and parks the calling thread on a one-shot gate until the future
//! finishes. The sender half of the gate moves into the spawned task: it is
//! either consumed by the single `send` on completion, or dropped if the
//! task dies first, which also wakes the caller. A value sent before the
//! caller starts waiting is kept by the channel.

use std::future::Future;
use std::time::Duration;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use tokio::sync::oneshot;
use tracing::{debug, warn};

use super::classify::HttpOutcome;
use crate::errors::PushError;
use crate::pushbullet::REQUEST_TIMEOUT;

/// Slack allowed on top of the request timeout before the bridge gives up
pub const TRANSPORT_GRACE: Duration = Duration::from_secs(5);

/// Runs transport futures on a private runtime and blocks until they finish
pub struct Bridge {
    runtime: Option<Runtime>,
    deadline: Duration,
}

impl Bridge {
    pub fn new() -> Result<Self, PushError> {
        Self::with_deadline(REQUEST_TIMEOUT + TRANSPORT_GRACE)
    }

    pub fn with_deadline(deadline: Duration) -> Result<Self, PushError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("spush-transport")
            .enable_all()
            .build()
            .map_err(|e| PushError::runtime(format!("failed to start transport runtime: {e}")))?;

        Ok(Self {
            runtime: Some(runtime),
            deadline,
        })
    }

    /// Dispatch `request` and block the calling thread until it completes
    ///
    /// Fails only when the current thread cannot block, which is checked
    /// before anything is dispatched.
    pub fn execute<F>(&self, request: F) -> Result<HttpOutcome, PushError>
    where
        F: Future<Output = HttpOutcome> + Send + 'static,
    {
        let inside_runtime = blocking_allowed()?;
        let runtime = self
            .runtime
            .as_ref()
            .ok_or_else(|| PushError::runtime("transport runtime has been shut down"))?;

        let (gate, wait) = oneshot::channel();
        let deadline = self.deadline;

        runtime.spawn(async move {
            let outcome = match tokio::time::timeout(deadline, request).await {
                Ok(outcome) => outcome,
                Err(_) => HttpOutcome::Transport(format!(
                    "request did not complete within {}s",
                    deadline.as_secs()
                )),
            };
            // The caller is parked on the other half; nothing else can observe this.
            let _ = gate.send(outcome);
        });

        let received = if inside_runtime {
            tokio::task::block_in_place(|| wait.blocking_recv())
        } else {
            wait.blocking_recv()
        };

        Ok(received.unwrap_or_else(|_| {
            warn!("transport task ended without reporting an outcome");
            HttpOutcome::Empty
        }))
    }
}

impl Drop for Bridge {
    fn drop(&mut self) {
        if let Some(runtime) = self.runtime.take() {
            debug!("shutting down transport runtime");
            // Unlike a plain drop, this is safe from inside another runtime.
            runtime.shutdown_background();
        }
    }
}

/// Whether blocking is possible here, and whether it needs `block_in_place`
fn blocking_allowed() -> Result<bool, PushError> {
    match Handle::try_current() {
        Err(_) => Ok(false),
        Ok(handle) => match handle.runtime_flavor() {
            RuntimeFlavor::MultiThread => Ok(true),
            _ => Err(PushError::runtime(
                "blocking client used from a current-thread async runtime; use AsyncPushbulletClient instead",
            )),
        },
    }
}
