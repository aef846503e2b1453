//! # Subscription: a consumer's handle on a hub.
//!
//! A [`Subscription`] is returned by [`Hub::subscribe`](crate::Hub::subscribe) and
//! pulls events one at a time with [`Subscription::next`].
//!
//! ## Lifecycle
//! ```text
//! subscribe() ──► created ──(replay, history hubs only)──► live
//!                                                           │
//!                        close() / drop ◄───────────────────┤ withdrawn
//!                        Hub::close()   ◄───────────────────┘ severed
//! ```
//!
//! ## Rules
//! - Events arrive in publish order. Some may be missing if the consumer was not
//!   waiting when they were fanned out.
//! - A consumer that never calls `next` never receives anything and builds no
//!   backlog.
//! - `close` must be called at most once, and `next` must not be called after it.
//!   Both violations panic.
//! - A handle that is kept alive but never pulled or closed keeps its bookkeeping
//!   in the coordinator for as long as it lives. Dropping the handle withdraws it.

use std::fmt;

use tokio_util::sync::CancellationToken;

use crate::delivery::Puller;
use crate::error::HubError;

/// Consumer handle for pulling events from a [`Hub`](crate::Hub).
pub struct Subscription<E> {
    id: u64,
    puller: Option<Puller<E>>,
}

impl<E> Subscription<E> {
    pub(crate) fn new(id: u64, puller: Puller<E>) -> Self {
        Self {
            id,
            puller: Some(puller),
        }
    }

    /// Identifier of this subscription, unique per hub.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Waits for the next event.
    ///
    /// Returns `None` if the hub is closed or `token` is cancelled before an event
    /// arrives. An already-cancelled token returns immediately.
    ///
    /// A call cancelled after its request reached the coordinator leaves that
    /// request standing: the coordinator may still place the next event in the
    /// slot, where the following `next` finds it. Nothing is lost or reordered.
    ///
    /// # Panics
    /// Panics if the subscription was closed by its owner.
    pub async fn next(&mut self, token: &CancellationToken) -> Option<E> {
        let Some(puller) = self.puller.as_mut() else {
            panic!("{}", HubError::Withdrawn { id: self.id });
        };
        puller.pull(token).await
    }

    /// Withdraws the subscription; the coordinator drops it on its next pass.
    ///
    /// # Panics
    /// Panics if called more than once.
    pub fn close(&mut self) {
        if self.puller.take().is_none() {
            panic!("{}", HubError::Withdrawn { id: self.id });
        }
    }

    /// True once [`close`](Self::close) has been called.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.puller.is_none()
    }
}

impl<E> fmt::Debug for Subscription<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("closed", &self.is_closed())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::delivery::{Readiness, pair};

    #[tokio::test]
    async fn next_after_coordinator_gone_is_none() {
        let (puller, offerer) = pair::<u8>(4, 1);
        drop(offerer);
        let mut sub = Subscription::new(4, puller);
        assert_eq!(sub.id(), 4);
        assert_eq!(sub.next(&CancellationToken::new()).await, None);
    }

    #[tokio::test]
    #[should_panic(expected = "subscription 1 used after close")]
    async fn next_after_close_panics() {
        let (puller, _offerer) = pair::<u8>(1, 1);
        let mut sub = Subscription::new(1, puller);
        sub.close();
        let _ = sub.next(&CancellationToken::new()).await;
    }

    #[test]
    #[should_panic(expected = "subscription 2 used after close")]
    fn double_close_panics() {
        let (puller, _offerer) = pair::<u8>(2, 1);
        let mut sub = Subscription::new(2, puller);
        sub.close();
        sub.close();
    }

    #[tokio::test]
    async fn cancelled_next_leaves_request_standing() {
        let (puller, mut offerer) = pair::<u8>(5, 1);
        let mut sub = Subscription::new(5, puller);

        let token = CancellationToken::new();
        let canceller = token.clone();
        tokio::spawn(async move {
            tokio::time::sleep(std::time::Duration::from_millis(20)).await;
            canceller.cancel();
        });
        assert_eq!(sub.next(&token).await, None);

        assert_eq!(offerer.poll_request(), Readiness::Requested);
        offerer.offer(7).unwrap();
        offerer.offer(8).unwrap_err();

        assert_eq!(sub.next(&CancellationToken::new()).await, Some(7));
    }

    #[test]
    fn debug_shows_state() {
        let (puller, _offerer) = pair::<u8>(9, 1);
        let mut sub = Subscription::new(9, puller);
        assert_eq!(format!("{sub:?}"), "Subscription { id: 9, closed: false }");
        sub.close();
        assert!(sub.is_closed());
    }
}
