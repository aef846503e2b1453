//! # Coordinator: single owner of the live set and the replay history.
//!
//! The [`Coordinator`] runs as one tokio task per hub and processes an ordered
//! queue of [`Request`]s. It is the only code that touches the live set and the
//! history, so neither needs a lock.
//!
//! ## State machine
//! ```text
//! Running ── Request::Subscribe(offerer) ──► admit():   replay history, then push to live
//! Running ── Request::Publish(ev)        ──► fan_out(): deliver to each live sub,
//!                                                      drop withdrawn, then history.enqueue(ev)
//! Running ── queue closed & drained      ──► sever():   drop every offerer ──► Closed
//! ```
//!
//! ## Delivery per subscriber
//! ```text
//! wait_request(closing, timeout)
//!   ├─ Withdrawn ─► remove from live set (or abort replay)
//!   ├─ Idle      ─► event dropped for this subscriber only
//!   └─ Requested ─► offer(ev) = try_send
//!                     ├─ Ok     ─► delivered
//!                     ├─ Full   ─► dropped for this subscriber only
//!                     └─ Closed ─► withdrawn
//! ```
//!
//! Replay ignores `request_timeout`: each history entry waits for its request
//! until the subscriber withdraws or the hub starts closing, and either of those
//! discards the subscription instead of admitting it with a gap.
//!
//! Subscribe and publish requests share one queue, so a subscription never sees
//! live events that were handed off before it.

use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::config::Config;
use crate::delivery::{Offerer, Readiness};
use crate::history::BoundedHistory;

/// Tagged request handed from a [`Hub`](crate::Hub) to its coordinator.
pub(crate) enum Request<E> {
    /// Admit a new subscription (after replay, for history hubs).
    Subscribe(Offerer<E>),
    /// Fan out one event.
    Publish(E),
}

/// Outcome of one delivery attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delivery {
    Delivered,
    Dropped,
    Withdrawn,
}

/// Wait rules applied to every delivery attempt.
struct Courier {
    closing: CancellationToken,
    timeout: Option<Duration>,
}

impl Courier {
    async fn deliver<E>(&self, sub: &mut Offerer<E>, event: E) -> Delivery {
        match sub.wait_request(&self.closing, self.timeout).await {
            Readiness::Withdrawn => Delivery::Withdrawn,
            Readiness::Idle => {
                trace!(subscription = sub.id(), "no pending request; event dropped");
                Delivery::Dropped
            }
            Readiness::Requested => match sub.offer(event) {
                Ok(()) => Delivery::Delivered,
                Err(TrySendError::Full(_)) => {
                    trace!(subscription = sub.id(), "delivery slot full; event dropped");
                    Delivery::Dropped
                }
                Err(TrySendError::Closed(_)) => Delivery::Withdrawn,
            },
        }
    }

    /// Replay step: waits for the request without the timeout, so a slow joiner
    /// never goes live with a hole in its history. Only closing ends the wait.
    async fn replay<E>(&self, sub: &mut Offerer<E>, event: E) -> Delivery {
        match sub.wait_request(&self.closing, None).await {
            Readiness::Requested => match sub.offer(event) {
                Ok(()) => Delivery::Delivered,
                Err(_) => Delivery::Withdrawn,
            },
            Readiness::Withdrawn | Readiness::Idle => Delivery::Withdrawn,
        }
    }
}

/// Owns subscriber membership and drives delivery.
pub(crate) struct Coordinator<E> {
    requests: mpsc::Receiver<Request<E>>,
    courier: Courier,
    live: Vec<Offerer<E>>,
    history: Option<BoundedHistory<E>>,
}

impl<E: Clone + Send + 'static> Coordinator<E> {
    pub(crate) fn new(
        cfg: &Config,
        requests: mpsc::Receiver<Request<E>>,
        closing: CancellationToken,
    ) -> Self {
        Self {
            requests,
            courier: Courier {
                closing,
                timeout: cfg.request_timeout(),
            },
            live: Vec::new(),
            history: cfg
                .history_capacity()
                .map(|capacity| BoundedHistory::with_policy(capacity, cfg.eviction)),
        }
    }

    /// Processes requests until the queue is closed and drained, then severs
    /// every remaining subscription.
    pub(crate) async fn run(mut self) {
        debug!(
            history = ?self.history.as_ref().map(BoundedHistory::retained),
            "coordinator started"
        );

        while let Some(request) = self.requests.recv().await {
            match request {
                Request::Subscribe(sub) => self.admit(sub).await,
                Request::Publish(event) => self.fan_out(event).await,
            }
        }

        self.sever();
    }

    /// Replays the history to `sub` one pull at a time, then makes it live.
    async fn admit(&mut self, mut sub: Offerer<E>) {
        let backlog: Vec<E> = match &self.history {
            Some(history) => history.iter().cloned().collect(),
            None => Vec::new(),
        };
        let replayed = backlog.len();

        for event in backlog {
            if self.courier.replay(&mut sub, event).await != Delivery::Delivered {
                debug!(
                    subscription = sub.id(),
                    "replay interrupted by withdrawal or shutdown; discarded"
                );
                return;
            }
        }

        debug!(subscription = sub.id(), replayed, "subscription admitted");
        self.live.push(sub);
    }

    /// Offers `event` to every live subscription, then records it in the history.
    async fn fan_out(&mut self, event: E) {
        let mut kept = Vec::with_capacity(self.live.len());

        for mut sub in std::mem::take(&mut self.live) {
            match self.courier.deliver(&mut sub, event.clone()).await {
                Delivery::Withdrawn => {
                    debug!(subscription = sub.id(), "subscription withdrawn; removed");
                }
                Delivery::Delivered | Delivery::Dropped => kept.push(sub),
            }
        }
        self.live = kept;

        if let Some(history) = self.history.as_mut() {
            history.enqueue(event);
        }
    }

    /// Drops every offerer; consumers observe `None` once their slot is drained.
    fn sever(&mut self) {
        let severed = self.live.len();
        self.live.clear();
        debug!(severed, "coordinator stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::pair;
    use crate::policies::EvictionPolicy;

    fn spawn(cfg: Config) -> (mpsc::Sender<Request<i32>>, tokio::task::JoinHandle<()>) {
        let (tx, rx) = mpsc::channel(1);
        let coordinator = Coordinator::new(&cfg, rx, CancellationToken::new());
        (tx, tokio::spawn(coordinator.run()))
    }

    #[tokio::test]
    async fn publish_without_subscribers_fills_history() {
        let cfg = Config {
            history: 2,
            eviction: EvictionPolicy::AtCapacity,
            ..Config::default()
        };
        let (tx, rx) = mpsc::channel(1);
        let mut coordinator = Coordinator::new(&cfg, rx, CancellationToken::new());
        drop(tx);

        for ev in 1..=3 {
            coordinator.fan_out(ev).await;
        }

        let history = coordinator.history.as_ref().unwrap();
        assert_eq!(history.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[tokio::test]
    async fn withdrawn_subscriptions_leave_live_set() {
        let (tx, rx) = mpsc::channel(1);
        let mut coordinator = Coordinator::new(&Config::default(), rx, CancellationToken::new());
        drop(tx);

        let (puller, offerer) = pair::<i32>(0, 1);
        coordinator.admit(offerer).await;
        assert_eq!(coordinator.live.len(), 1);

        drop(puller);
        coordinator.fan_out(1).await;
        assert!(coordinator.live.is_empty());
    }

    #[tokio::test]
    async fn replay_waits_past_request_timeout() {
        let cfg = Config {
            request_timeout: Duration::from_millis(5),
            ..Config::with_history(4).unwrap()
        };
        let (tx, rx) = mpsc::channel(1);
        let mut coordinator = Coordinator::new(&cfg, rx, CancellationToken::new());
        drop(tx);
        for ev in 1..=2 {
            coordinator.fan_out(ev).await;
        }

        let (mut puller, offerer) = pair::<i32>(0, 4);
        let reader = tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            let token = CancellationToken::new();
            let first = puller.pull(&token).await;
            let second = puller.pull(&token).await;
            (first, second)
        });

        coordinator.admit(offerer).await;
        assert_eq!(reader.await.unwrap(), (Some(1), Some(2)));
        assert_eq!(coordinator.live.len(), 1);
    }

    #[tokio::test]
    async fn replay_interrupted_by_closing_discards_subscription() {
        let closing = CancellationToken::new();
        let (tx, rx) = mpsc::channel(1);
        let mut coordinator =
            Coordinator::new(&Config::with_history(4).unwrap(), rx, closing.clone());
        drop(tx);
        coordinator.fan_out(1).await;

        let (_puller, offerer) = pair::<i32>(0, 4);
        closing.cancel();
        coordinator.admit(offerer).await;
        assert!(coordinator.live.is_empty());
    }

    #[tokio::test]
    async fn replay_aborts_on_withdrawal() {
        let cfg = Config::with_history(4).unwrap();
        let (tx, rx) = mpsc::channel(1);
        let mut coordinator = Coordinator::new(&cfg, rx, CancellationToken::new());
        drop(tx);
        coordinator.fan_out(1).await;

        let (puller, offerer) = pair::<i32>(0, 4);
        drop(puller);
        coordinator.admit(offerer).await;
        assert!(coordinator.live.is_empty());
    }

    #[tokio::test]
    async fn closed_queue_stops_coordinator() {
        let (tx, handle) = spawn(Config::default());
        let (mut puller, offerer) = pair::<i32>(0, 1);
        tx.send(Request::Subscribe(offerer)).await.unwrap();
        drop(tx);

        handle.await.unwrap();
        assert_eq!(puller.pull(&CancellationToken::new()).await, None);
    }
}
