//! # Eviction policies for the bounded history.
//!
//! [`EvictionPolicy`] decides how many entries a
//! [`BoundedHistory`](crate::BoundedHistory) keeps for a configured capacity.
//!
//! - [`EvictionPolicy::AtCapacity`] keeps exactly `capacity` entries (default).
//! - [`EvictionPolicy::BeforeCapacity`] evicts as soon as the length reaches
//!   `capacity - 1`, keeping one entry less than configured.
//!
//! ## Boundary
//! ```text
//! capacity = 4, publish -4 -3 -2 -1
//!
//! AtCapacity      → [-4, -3, -2, -1]
//! BeforeCapacity  → [-3, -2, -1]
//! ```
//!
//! Pick `BeforeCapacity` only if consumers depend on the shorter window.

/// Policy controlling the steady-state length of a bounded history.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EvictionPolicy {
    /// Evict the oldest entry once `capacity` entries are stored.
    #[default]
    AtCapacity,
    /// Evict the oldest entry once `capacity - 1` entries are stored.
    ///
    /// With `capacity == 1` nothing is retained.
    BeforeCapacity,
}

impl EvictionPolicy {
    /// Returns how many entries a history with the given capacity retains.
    ///
    /// # Example
    /// ```
    /// use hubcast::EvictionPolicy;
    ///
    /// assert_eq!(EvictionPolicy::AtCapacity.retained(4), 4);
    /// assert_eq!(EvictionPolicy::BeforeCapacity.retained(4), 3);
    /// ```
    #[inline]
    pub fn retained(self, capacity: usize) -> usize {
        match self {
            EvictionPolicy::AtCapacity => capacity,
            EvictionPolicy::BeforeCapacity => capacity.saturating_sub(1),
        }
    }
}
