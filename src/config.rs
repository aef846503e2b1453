//! # Hub configuration.
//!
//! Provides [`Config`], the settings a [`Hub`](crate::Hub) is built from.
//!
//! Config is used in two ways:
//! 1. **Shortcuts**: `Hub::new()` uses `Config::default()`, `Hub::with_history(n)`
//!    uses `Config::with_history(n)`.
//! 2. **Full control**: `Hub::with_config(config)`.
//!
//! ## Sentinel values
//! - `history = 0` → plain hub (no replay for late subscribers)
//! - `request_timeout = 0s` → the coordinator waits for each subscriber's next
//!   request until it arrives, the subscriber withdraws, or the hub starts closing

use std::time::Duration;

use crate::error::HubError;
use crate::policies::EvictionPolicy;

/// Configuration for a hub.
///
/// ## Field semantics
/// - `history`: replay capacity for late subscribers (`0` = plain hub)
/// - `eviction`: how many of those `history` slots are kept in steady state
/// - `request_timeout`: how long delivery waits on one subscriber (`0s` = no limit)
///
/// ## Notes
/// All fields are public. Prefer the helper accessors over checking the `0`
/// sentinels directly.
#[derive(Clone, Debug)]
pub struct Config {
    /// Number of recent events replayed to a new subscriber before it goes live.
    ///
    /// Also sizes each subscription's delivery slot, so the full replay plus one
    /// live event never overflows it. A plain hub uses a slot of 1.
    pub history: usize,

    /// Eviction boundary of the replay history.
    ///
    /// Ignored when `history == 0`.
    pub eviction: EvictionPolicy,

    /// Upper bound on how long a fan-out pass waits for one subscriber to ask
    /// for its next event.
    ///
    /// - `Duration::ZERO` = wait until the request arrives, the subscriber
    ///   withdraws, or the hub starts closing
    /// - `> 0` = on expiry the event is dropped for that subscriber only
    ///
    /// Applies to live fan-out only. History replay to a new subscriber waits
    /// for each request regardless, so a slow joiner still gets a contiguous
    /// history.
    pub request_timeout: Duration,
}

impl Config {
    /// Builds a history-preserving configuration.
    ///
    /// Returns [`HubError::InvalidCapacity`] for a zero capacity.
    pub fn with_history(capacity: usize) -> Result<Self, HubError> {
        if capacity == 0 {
            return Err(HubError::InvalidCapacity { capacity });
        }
        Ok(Self {
            history: capacity,
            ..Self::default()
        })
    }

    /// Checks that the configuration describes a usable hub.
    ///
    /// A history hub whose eviction policy retains nothing (for example
    /// `BeforeCapacity` with `history == 1`) is rejected with
    /// [`HubError::NoRetainedHistory`].
    pub fn validate(&self) -> Result<(), HubError> {
        match self.history_capacity() {
            Some(capacity) if self.eviction.retained(capacity) == 0 => {
                Err(HubError::NoRetainedHistory { capacity })
            }
            _ => Ok(()),
        }
    }

    /// Returns the replay capacity as an `Option`.
    ///
    /// - `None` → plain hub
    /// - `Some(n)` → history-preserving hub with capacity `n`
    #[inline]
    pub fn history_capacity(&self) -> Option<usize> {
        if self.history == 0 {
            None
        } else {
            Some(self.history)
        }
    }

    /// Returns the per-subscriber request timeout as an `Option`.
    ///
    /// - `None` → wait without a deadline
    /// - `Some(d)` → give up on a subscriber after `d`
    #[inline]
    pub fn request_timeout(&self) -> Option<Duration> {
        if self.request_timeout == Duration::ZERO {
            None
        } else {
            Some(self.request_timeout)
        }
    }

    /// Returns the buffering capacity of each subscription's delivery slot.
    #[inline]
    pub fn slot_capacity(&self) -> usize {
        self.history.max(1)
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `history = 0` (plain hub)
    /// - `eviction = EvictionPolicy::AtCapacity`
    /// - `request_timeout = 0s` (no deadline)
    fn default() -> Self {
        Self {
            history: 0,
            eviction: EvictionPolicy::default(),
            request_timeout: Duration::ZERO,
        }
    }
}
