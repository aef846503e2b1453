//! # Consumer-facing handles.
//!
//! This module provides [`Subscription`], the per-consumer handle returned by
//! [`Hub::subscribe`](crate::Hub::subscribe).
//!
//! ## Architecture
//! ```text
//! Hub::subscribe()
//!   ├─► delivery::pair() ──► Puller  ──► Subscription (returned to caller)
//!   │                    └─► Offerer ──► Request::Subscribe ──► Coordinator
//!   └─► consumer task loops on Subscription::next(&token)
//! ```

mod subscription;

pub use subscription::Subscription;
