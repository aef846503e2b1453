//! # BoundedHistory: fixed-window record of recent events.
//!
//! [`BoundedHistory`] keeps the most recent events in publish order and evicts the
//! oldest entry once the window is full. The window size is
//! [`EvictionPolicy::retained`] of the configured capacity.
//!
//! ## Rules
//! - Entries are appended exactly once, after the live fan-out pass for that event.
//! - Iteration yields entries oldest first.
//! - A window of zero stores nothing.

use std::collections::VecDeque;

use crate::policies::EvictionPolicy;

/// Ordered, fixed-capacity sequence of events with oldest-eviction.
#[derive(Clone, Debug)]
pub struct BoundedHistory<E> {
    capacity: usize,
    policy: EvictionPolicy,
    data: VecDeque<E>,
}

impl<E> BoundedHistory<E> {
    /// Creates an empty history that keeps `capacity` entries.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self::with_policy(capacity, EvictionPolicy::AtCapacity)
    }

    /// Creates an empty history with an explicit eviction boundary.
    #[must_use]
    pub fn with_policy(capacity: usize, policy: EvictionPolicy) -> Self {
        Self {
            capacity,
            policy,
            data: VecDeque::with_capacity(policy.retained(capacity)),
        }
    }

    /// Appends an event, evicting the oldest one if the window is full.
    pub fn enqueue(&mut self, event: E) {
        let retained = self.retained();
        if retained == 0 {
            return;
        }
        if self.data.len() >= retained {
            self.data.pop_front();
        }
        self.data.push_back(event);
    }

    /// Iterates over stored events, oldest first.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &E> + '_ {
        self.data.iter()
    }

    /// Configured capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Steady-state number of entries kept under the eviction policy.
    #[must_use]
    pub fn retained(&self) -> usize {
        self.policy.retained(self.capacity)
    }

    /// Number of stored events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing has been stored yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled(capacity: usize, policy: EvictionPolicy, events: &[i32]) -> Vec<i32> {
        let mut h = BoundedHistory::with_policy(capacity, policy);
        for &e in events {
            h.enqueue(e);
        }
        h.iter().copied().collect()
    }

    #[test]
    fn keeps_publish_order() {
        assert_eq!(
            filled(8, EvictionPolicy::AtCapacity, &[1, 2, 3]),
            vec![1, 2, 3]
        );
    }

    #[test]
    fn at_capacity_fills_whole_window() {
        assert_eq!(
            filled(4, EvictionPolicy::AtCapacity, &[-4, -3, -2, -1]),
            vec![-4, -3, -2, -1]
        );
    }

    #[test]
    fn at_capacity_evicts_oldest_on_overflow() {
        assert_eq!(
            filled(4, EvictionPolicy::AtCapacity, &[-4, -3, -2, -1, 1]),
            vec![-3, -2, -1, 1]
        );
    }

    #[test]
    fn before_capacity_evicts_one_early() {
        assert_eq!(
            filled(4, EvictionPolicy::BeforeCapacity, &[-4, -3, -2]),
            vec![-4, -3, -2]
        );
        assert_eq!(
            filled(4, EvictionPolicy::BeforeCapacity, &[-4, -3, -2, -1]),
            vec![-3, -2, -1]
        );
    }

    #[test]
    fn before_capacity_of_one_stores_nothing() {
        let mut h = BoundedHistory::with_policy(1, EvictionPolicy::BeforeCapacity);
        h.enqueue(1);
        h.enqueue(2);
        assert!(h.is_empty());
        assert_eq!(h.retained(), 0);
        assert_eq!(h.capacity(), 1);
    }

    #[test]
    fn long_run_stays_bounded() {
        let mut h = BoundedHistory::new(3);
        for e in 0..1000 {
            h.enqueue(e);
        }
        assert_eq!(h.len(), 3);
        assert_eq!(h.iter().copied().collect::<Vec<_>>(), vec![997, 998, 999]);
    }
}
