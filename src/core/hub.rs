//! # Hub: public entry point for publishing and subscribing.
//!
//! A [`Hub`] owns one coordinator task and hands every request to it through a
//! single ordered queue with room for one buffered request.
//!
//! ## Variants
//! - **Plain** ([`Hub::new`]): subscribers only see events published after they join.
//! - **History-preserving** ([`Hub::with_history`]): a new subscriber first replays
//!   the most recent events, then goes live with no gap and no duplicate.
//!
//! ## Architecture
//! ```text
//! publish(&token, ev) ─┐
//! subscribe()         ─┼─► handoff mutex ─► [request queue, cap 1] ─► Coordinator task
//! close()             ─┘    (serializes        Subscribe / Publish      (owns live set
//!                            hand-offs only)   closed = shutdown         and history)
//! ```
//!
//! ## Rules
//! - `publish` waits only for the hand-off, and never once `token` is cancelled.
//! - `publish` after `close` panics; `close` twice panics.
//! - `close` wakes every consumer blocked in `next` with `None` and returns once
//!   the coordinator has stopped.
//! - Dropping the last `Hub` handle stops the coordinator as if closed.
//!
//! ## Example
//! ```rust
//! use hubcast::Hub;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let hub = Hub::with_history(8).expect("positive capacity");
//!     let token = CancellationToken::new();
//!
//!     hub.publish(&token, "warmup").await;
//!
//!     let mut sub = hub.subscribe().await;
//!     let consumer = tokio::spawn(async move {
//!         let token = CancellationToken::new();
//!         let mut seen = Vec::new();
//!         while seen.len() < 2 {
//!             match sub.next(&token).await {
//!                 Some(ev) => seen.push(ev),
//!                 None => break,
//!             }
//!         }
//!         sub.close();
//!         seen
//!     });
//!
//!     hub.publish(&token, "live").await;
//!     assert_eq!(consumer.await.unwrap(), vec!["warmup", "live"]);
//!     hub.close().await;
//! }
//! ```

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::Config;
use crate::core::coordinator::{Coordinator, Request};
use crate::delivery::pair;
use crate::error::HubError;
use crate::subscribers::Subscription;

/// State guarded by the hand-off mutex.
struct Handoff<E> {
    requests: Option<mpsc::Sender<Request<E>>>,
    worker: Option<JoinHandle<()>>,
}

struct Inner<E> {
    handoff: Mutex<Handoff<E>>,
    closing: CancellationToken,
    next_id: AtomicU64,
    slot_capacity: usize,
    history: Option<usize>,
}

impl<E> Drop for Inner<E> {
    fn drop(&mut self) {
        self.closing.cancel();
    }
}

/// Fan-out hub: one producer side, many independently paced subscribers.
///
/// Cheap to clone; all clones share the same coordinator.
pub struct Hub<E> {
    inner: Arc<Inner<E>>,
}

impl<E> Clone for Hub<E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<E: Clone + Send + 'static> Hub<E> {
    /// Creates a plain hub without replay history.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    #[must_use]
    pub fn new() -> Self {
        Self::start(Config::default())
    }

    /// Creates a hub that replays up to `capacity` recent events to new subscribers.
    ///
    /// Returns [`HubError::InvalidCapacity`] for a zero capacity.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn with_history(capacity: usize) -> Result<Self, HubError> {
        Ok(Self::start(Config::with_history(capacity)?))
    }

    /// Creates a hub from a full [`Config`].
    ///
    /// `history == 0` builds a plain hub. Returns
    /// [`HubError::NoRetainedHistory`] when the eviction policy would keep no
    /// history at the configured capacity.
    ///
    /// # Panics
    /// Panics if called outside a Tokio runtime.
    pub fn with_config(cfg: Config) -> Result<Self, HubError> {
        cfg.validate()?;
        Ok(Self::start(cfg))
    }

    fn start(cfg: Config) -> Self {
        let (tx, rx) = mpsc::channel(1);
        let closing = CancellationToken::new();
        let coordinator = Coordinator::new(&cfg, rx, closing.clone());
        let worker = tokio::spawn(coordinator.run());

        Self {
            inner: Arc::new(Inner {
                handoff: Mutex::new(Handoff {
                    requests: Some(tx),
                    worker: Some(worker),
                }),
                closing,
                next_id: AtomicU64::new(0),
                slot_capacity: cfg.slot_capacity(),
                history: cfg.history_capacity(),
            }),
        }
    }

    /// Hands `event` to the coordinator.
    ///
    /// Returns `false` without recording the event if `token` is cancelled
    /// before the hand-off completes.
    ///
    /// # Panics
    /// Panics if the hub has been closed.
    pub async fn publish(&self, token: &CancellationToken, event: E) -> bool {
        if token.is_cancelled() {
            return false;
        }

        let handoff = tokio::select! {
            biased;
            _ = token.cancelled() => return false,
            guard = self.inner.handoff.lock() => guard,
        };
        let Some(requests) = handoff.requests.as_ref() else {
            panic!("{}", HubError::Closed);
        };

        tokio::select! {
            biased;
            _ = token.cancelled() => false,
            sent = requests.send(Request::Publish(event)) => match sent {
                Ok(()) => true,
                Err(_) => {
                    warn!("coordinator is gone; event discarded");
                    false
                }
            },
        }
    }

    /// Creates a subscription and hands it to the coordinator.
    ///
    /// Returns without waiting for history replay; replay proceeds as the consumer
    /// pulls. On a closed hub the returned subscription is already severed and
    /// `next` yields `None`.
    pub async fn subscribe(&self) -> Subscription<E> {
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let (puller, offerer) = pair(id, self.inner.slot_capacity);

        let handoff = self.inner.handoff.lock().await;
        match handoff.requests.as_ref() {
            Some(requests) => {
                if requests.send(Request::Subscribe(offerer)).await.is_err() {
                    warn!(subscription = id, "coordinator is gone; subscription severed");
                }
            }
            None => {
                debug!(subscription = id, "subscribe on closed hub; subscription severed");
            }
        }

        Subscription::new(id, puller)
    }

    /// Stops the hub and waits for the coordinator to release every subscription.
    ///
    /// Events already handed off are still offered, but only to consumers that
    /// are waiting at that moment.
    ///
    /// # Panics
    /// Panics if the hub has already been closed.
    pub async fn close(&self) {
        // Signal first so a coordinator blocked on an idle subscriber lets go of
        // any publish holding the hand-off lock.
        self.inner.closing.cancel();

        let worker = {
            let mut handoff = self.inner.handoff.lock().await;
            if handoff.requests.take().is_none() {
                panic!("{}", HubError::AlreadyClosed);
            }
            handoff.worker.take()
        };

        if let Some(worker) = worker {
            if let Err(err) = worker.await {
                warn!(error = %err, "coordinator task failed");
            }
        }
        debug!("hub closed");
    }

    /// True once [`close`](Self::close) has started.
    ///
    /// A publish already waiting on the hand-off may still be accepted until
    /// `close` takes the hand-off lock.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.inner.closing.is_cancelled()
    }

    /// Replay capacity, or `None` for a plain hub.
    #[must_use]
    pub fn history_capacity(&self) -> Option<usize> {
        self.inner.history
    }
}

impl<E: Clone + Send + 'static> Default for Hub<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Hub<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hub")
            .field("history", &self.inner.history)
            .field("closed", &self.inner.closing.is_cancelled())
            .finish_non_exhaustive()
    }
}
