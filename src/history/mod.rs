//! Replay history for late subscribers.
//!
//! ## Contents
//! - [`BoundedHistory`] fixed-window, oldest-evicting record of recent events
//!
//! Only a history-preserving hub owns one; it lives inside the coordinator and is
//! never shared with other tasks.

mod bounded;

pub use bounded::BoundedHistory;
