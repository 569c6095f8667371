//! Request Dispatcher
//!
//! Serializes every outbound provider call into one ordered queue drained
//! by a single worker task, so at most one request is in flight at a time.
//! Consecutive requests are spaced by a fixed delay to respect upstream
//! rate limits. Transport-level failures are retried with growing backoff,
//! re-entering the queue at the front so a retry runs before any request
//! that has not had its first attempt yet.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::api::transport::{ProviderResponse, RequestTarget, Transport};
use crate::error::{RecipeError, Result};

// == Queued Request ==
/// One request waiting in (or re-entering) the queue.
struct QueuedRequest {
    target: RequestTarget,
    /// Attempts already failed; bounded by `max_retries`
    retry_count: u32,
    /// Outcome hook for the original caller
    responder: oneshot::Sender<Result<ProviderResponse>>,
}

// == Dispatcher ==
/// Single-flight request queue in front of the provider API.
#[derive(Debug)]
pub struct Dispatcher {
    queue_tx: mpsc::UnboundedSender<QueuedRequest>,
    worker: JoinHandle<()>,
}

impl Dispatcher {
    // == Constructor ==
    /// Spawns the worker task draining the queue.
    ///
    /// # Arguments
    /// * `transport` - Executes the actual HTTP exchanges
    /// * `rate_limit_delay` - Minimum spacing between consecutive requests
    /// * `max_retries` - Retry bound for transport-level failures
    pub fn new<T: Transport>(
        transport: T,
        rate_limit_delay: Duration,
        max_retries: u32,
    ) -> Self {
        let (queue_tx, queue_rx) = mpsc::unbounded_channel();
        let worker = tokio::spawn(run_worker(transport, queue_rx, rate_limit_delay, max_retries));

        Self { queue_tx, worker }
    }

    // == Dispatch ==
    /// Enqueues a request and waits for its outcome.
    ///
    /// Resolves with whatever HTTP response eventually arrives, error
    /// statuses included. Only transport failures surface as errors, and
    /// only once the retry bound is exhausted.
    pub async fn dispatch(&self, target: RequestTarget) -> Result<ProviderResponse> {
        let (responder, outcome) = oneshot::channel();

        self.queue_tx
            .send(QueuedRequest {
                target,
                retry_count: 0,
                responder,
            })
            .map_err(|_| RecipeError::Transport("request queue is closed".to_string()))?;

        outcome
            .await
            .map_err(|_| RecipeError::Transport("request was dropped by the queue".to_string()))?
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        // The worker also exits on its own once the channel closes and the
        // queue drains; aborting just skips any remaining backoff sleeps.
        self.worker.abort();
    }
}

// == Worker ==
/// Queue-draining loop. Exactly one request is in flight at any instant.
async fn run_worker<T: Transport>(
    transport: T,
    mut queue_rx: mpsc::UnboundedReceiver<QueuedRequest>,
    rate_limit_delay: Duration,
    max_retries: u32,
) {
    let mut queue: VecDeque<QueuedRequest> = VecDeque::new();

    loop {
        if queue.is_empty() {
            // Idle: block until work arrives or every sender is gone
            match queue_rx.recv().await {
                Some(request) => queue.push_back(request),
                None => break,
            }
        }
        drain_pending(&mut queue_rx, &mut queue);

        let mut request = queue.pop_front().expect("queue is non-empty");
        debug!(
            "Dispatching {} (attempt {})",
            request.target.url,
            request.retry_count + 1
        );

        match transport.fetch(request.target.clone()).await {
            Ok(response) => {
                let _ = request.responder.send(Ok(response));
            }
            Err(err) if request.retry_count < max_retries => {
                request.retry_count += 1;
                let backoff = rate_limit_delay * (request.retry_count + 1);
                warn!(
                    "Transport failure ({}); retry {}/{} after {:?}",
                    err, request.retry_count, max_retries, backoff
                );
                // Retries jump the queue: ahead of never-attempted requests
                queue.push_front(request);
                tokio::time::sleep(backoff).await;
                // Backoff already exceeds the pacing delay
                continue;
            }
            Err(err) => {
                warn!(
                    "Request failed after {} attempts: {}",
                    request.retry_count + 1,
                    err
                );
                let _ = request.responder.send(Err(err));
            }
        }

        // Pick up anything enqueued while the request was in flight, then
        // pace before the next dequeue if work remains
        drain_pending(&mut queue_rx, &mut queue);
        if !queue.is_empty() {
            tokio::time::sleep(rate_limit_delay).await;
        }
    }
}

/// Moves everything already sitting in the channel into the local queue
/// without blocking.
fn drain_pending(
    queue_rx: &mut mpsc::UnboundedReceiver<QueuedRequest>,
    queue: &mut VecDeque<QueuedRequest>,
) {
    while let Ok(request) = queue_rx.try_recv() {
        queue.push_back(request);
    }
}
