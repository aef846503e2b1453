//! # Two-phase request/offer handshake between a consumer and the coordinator.
//!
//! Every subscription is backed by one [`pair`]: a [`Puller`] held by the consumer
//! and an [`Offerer`] held by the coordinator.
//!
//! ```text
//!   consumer (Puller)                         coordinator (Offerer)
//!   ─────────────────                         ─────────────────────
//!   pull():
//!     ready.send(())  ───── ready (cap 1) ───►  wait_request() → Requested
//!                                               offer(ev) = slot.try_send(ev)
//!     slot.recv()     ◄──── slot (cap N) ─────
//! ```
//!
//! ## Rules
//! - The consumer must request before anything is offered to it.
//! - `offer` never waits: a full or closed slot hands the event back.
//! - Dropping the `Puller` closes the ready signal; the coordinator reads that as
//!   withdrawal.
//! - Dropping the `Offerer` closes the slot; pending and later pulls see buffered
//!   events first, then `None`.

use std::time::Duration;

use tokio::sync::mpsc::{self, error::TryRecvError, error::TrySendError};
use tokio_util::sync::CancellationToken;

/// Creates a connected consumer/coordinator pair.
///
/// `slot_capacity` is clamped to a minimum of 1.
pub(crate) fn pair<E>(id: u64, slot_capacity: usize) -> (Puller<E>, Offerer<E>) {
    let (ready_tx, ready_rx) = mpsc::channel(1);
    let (slot_tx, slot_rx) = mpsc::channel(slot_capacity.max(1));
    (
        Puller {
            ready: ready_tx,
            slot: slot_rx,
        },
        Offerer {
            id,
            ready: ready_rx,
            slot: slot_tx,
        },
    )
}

/// Consumer half: requests the next event and waits for it.
pub(crate) struct Puller<E> {
    ready: mpsc::Sender<()>,
    slot: mpsc::Receiver<E>,
}

impl<E> Puller<E> {
    /// Runs one request/response cycle.
    ///
    /// Returns `None` if `token` fires first or the coordinator side is gone and
    /// nothing is left in the slot.
    pub(crate) async fn pull(&mut self, token: &CancellationToken) -> Option<E> {
        if token.is_cancelled() {
            return None;
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => return None,
            // An error means the coordinator dropped its half; fall through and
            // drain whatever is still buffered.
            _ = self.ready.send(()) => {}
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => None,
            ev = self.slot.recv() => ev,
        }
    }
}

/// What the coordinator learned from a subscriber's ready signal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Readiness {
    /// The consumer is waiting for an event.
    Requested,
    /// The consumer dropped or closed its handle.
    Withdrawn,
    /// No request arrived in time.
    Idle,
}

/// Coordinator half: observes requests and offers events without blocking.
pub(crate) struct Offerer<E> {
    id: u64,
    ready: mpsc::Receiver<()>,
    slot: mpsc::Sender<E>,
}

impl<E> Offerer<E> {
    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    /// Waits for the consumer's next request.
    ///
    /// The wait ends early when `closing` fires or `timeout` elapses; either way a
    /// request that is already pending is still honored.
    pub(crate) async fn wait_request(
        &mut self,
        closing: &CancellationToken,
        timeout: Option<Duration>,
    ) -> Readiness {
        let wait = async {
            tokio::select! {
                biased;
                req = self.ready.recv() => Some(req),
                _ = closing.cancelled() => None,
            }
        };

        let outcome = match timeout {
            Some(limit) => tokio::time::timeout(limit, wait).await.ok().flatten(),
            None => wait.await,
        };

        match outcome {
            Some(Some(())) => Readiness::Requested,
            Some(None) => Readiness::Withdrawn,
            None => self.poll_request(),
        }
    }

    /// Non-blocking inspection of the ready signal.
    pub(crate) fn poll_request(&mut self) -> Readiness {
        match self.ready.try_recv() {
            Ok(()) => Readiness::Requested,
            Err(TryRecvError::Empty) => Readiness::Idle,
            Err(TryRecvError::Disconnected) => Readiness::Withdrawn,
        }
    }

    /// Writes `event` into the slot if it has room right now.
    pub(crate) fn offer(&self, event: E) -> Result<(), TrySendError<E>> {
        self.slot.try_send(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn request_then_offer_delivers() {
        let (mut puller, mut offerer) = pair::<u32>(0, 1);
        let closing = CancellationToken::new();

        let consumer = tokio::spawn(async move {
            let token = CancellationToken::new();
            puller.pull(&token).await
        });

        assert_eq!(
            offerer.wait_request(&closing, None).await,
            Readiness::Requested
        );
        assert!(offerer.offer(7).is_ok());
        assert_eq!(consumer.await.unwrap(), Some(7));
    }

    #[tokio::test]
    async fn nothing_pending_is_idle() {
        let (_puller, mut offerer) = pair::<u32>(0, 1);
        assert_eq!(offerer.poll_request(), Readiness::Idle);
    }

    #[tokio::test]
    async fn dropped_puller_is_withdrawn() {
        let (puller, mut offerer) = pair::<u32>(0, 1);
        drop(puller);
        let closing = CancellationToken::new();
        assert_eq!(
            offerer.wait_request(&closing, None).await,
            Readiness::Withdrawn
        );
        assert!(matches!(offerer.offer(1), Err(TrySendError::Closed(1))));
    }

    #[tokio::test]
    async fn full_slot_hands_event_back() {
        let (_puller, offerer) = pair::<u32>(0, 1);
        assert!(offerer.offer(1).is_ok());
        assert!(matches!(offerer.offer(2), Err(TrySendError::Full(2))));
    }

    #[tokio::test]
    async fn timeout_degrades_to_idle() {
        let (_puller, mut offerer) = pair::<u32>(0, 1);
        let closing = CancellationToken::new();
        let readiness = offerer
            .wait_request(&closing, Some(Duration::from_millis(10)))
            .await;
        assert_eq!(readiness, Readiness::Idle);
    }

    #[tokio::test]
    async fn closing_degrades_to_idle() {
        let (_puller, mut offerer) = pair::<u32>(0, 1);
        let closing = CancellationToken::new();
        closing.cancel();
        assert_eq!(
            offerer.wait_request(&closing, None).await,
            Readiness::Idle
        );
    }

    #[tokio::test]
    async fn cancelled_pull_returns_immediately() {
        let (mut puller, mut offerer) = pair::<u32>(0, 1);
        let token = CancellationToken::new();
        token.cancel();
        assert_eq!(puller.pull(&token).await, None);
        assert_eq!(offerer.poll_request(), Readiness::Idle);
    }

    #[tokio::test]
    async fn dropped_offerer_drains_then_ends() {
        let (mut puller, offerer) = pair::<u32>(0, 2);
        assert!(offerer.offer(1).is_ok());
        drop(offerer);

        let token = CancellationToken::new();
        assert_eq!(puller.pull(&token).await, Some(1));
        assert_eq!(puller.pull(&token).await, None);
    }
}
