//! # hubcast
//!
//! **hubcast** is an in-process event fan-out primitive for Tokio.
//!
//! One producer publishes events to any number of subscribers. Each subscriber
//! pulls at its own pace; a subscriber that is not waiting simply misses the
//! event instead of queueing it. An optional bounded history replays recent
//! events to late joiners before they see live traffic.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!     ┌──────────────┐   ┌──────────────┐
//!     │  publisher   │   │  subscriber  │      (any tasks)
//!     │ publish(ev)  │   │ subscribe()  │
//!     └──────┬───────┘   └──────┬───────┘
//!            ▼                  ▼
//! ┌───────────────────────────────────────────────────────┐
//! │  Hub (cloneable handle)                               │
//! │  - handoff mutex → request queue (cap 1)              │
//! │  - closing token                                      │
//! └──────────────────────────┬────────────────────────────┘
//!                            ▼
//! ┌───────────────────────────────────────────────────────┐
//! │  Coordinator (one tokio task per hub)                 │
//! │  - live set of Offerers (owned, no lock)              │
//! │  - BoundedHistory (history hubs only)                 │
//! └──────┬──────────────────┬──────────────────┬──────────┘
//!        ▼                  ▼                  ▼
//!   [ready│slot]       [ready│slot]       [ready│slot]     handshake per subscriber
//!        ▼                  ▼                  ▼
//!   Subscription       Subscription       Subscription     next(&token) in consumer tasks
//! ```
//!
//! ### Delivery
//! ```text
//! consumer: next() ─► ready.send(()) ─► wait on slot
//! coordinator, per live subscriber:
//!   wait for request ─┬─ withdrawn   → remove
//!                     ├─ timed out   → drop event for this subscriber
//!                     └─ requested   → slot.try_send(ev) (never blocks)
//! ```
//!
//! ## Features
//! | Area              | Description                                                   | Key types                          |
//! |-------------------|---------------------------------------------------------------|------------------------------------|
//! | **Fan-out**       | Publish once, deliver to every waiting subscriber.            | [`Hub`], [`Subscription`]          |
//! | **Replay**        | Late subscribers catch up on recent events first.             | [`BoundedHistory`]                 |
//! | **Policies**      | Choose the history eviction boundary.                         | [`EvictionPolicy`]                 |
//! | **Configuration** | History size, eviction, per-subscriber request timeout.       | [`Config`]                         |
//! | **Errors**        | Configuration errors and usage-violation messages.            | [`HubError`]                       |
//!
//! ## Contract
//! - Per subscription, events arrive in publish order; some may be missing.
//! - Publishing or closing on a closed hub, and pulling after `close`, panic.
//! - Cancellation and shutdown both surface as `false` / `None`.
//!
//! ## Example
//! ```rust
//! use hubcast::Hub;
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let hub = Hub::new();
//!     let mut sub = hub.subscribe().await;
//!
//!     let consumer = tokio::spawn(async move {
//!         let token = CancellationToken::new();
//!         let mut total = 0;
//!         while let Some(n) = sub.next(&token).await {
//!             total += n;
//!             if total >= 6 {
//!                 break;
//!             }
//!         }
//!         sub.close();
//!         total
//!     });
//!
//!     let token = CancellationToken::new();
//!     for n in 1..=3 {
//!         hub.publish(&token, n).await;
//!     }
//!
//!     assert_eq!(consumer.await.unwrap(), 6);
//!     hub.close().await;
//! }
//! ```
mod config;
mod core;
mod delivery;
mod error;
mod history;
mod policies;
mod subscribers;

// ---- Public re-exports ----

pub use config::Config;
pub use crate::core::Hub;
pub use error::HubError;
pub use history::BoundedHistory;
pub use policies::EvictionPolicy;
pub use subscribers::Subscription;
