//! Retention policies.
//!
//! ## Contents
//! - [`EvictionPolicy`] how many entries the replay history keeps for a given capacity
//!
//! ## Quick wiring
//! ```text
//! Config { history, eviction, .. }
//!      └─► core::coordinator builds BoundedHistory::with_policy(history, eviction)
//!           - eviction.retained(history) is the steady-state replay window
//! ```
//!
//! ## Defaults
//! - `EvictionPolicy::AtCapacity` (the window equals the configured capacity).

mod eviction;

pub use eviction::EvictionPolicy;
