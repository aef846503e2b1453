//! Error type used by the hub and its subscriptions.
//!
//! [`HubError`] covers two kinds of failures:
//!
//! - **Configuration errors** (`InvalidCapacity`, `NoRetainedHistory`) are
//!   returned from constructors.
//! - **Usage violations** (`Closed`, `AlreadyClosed`, `Withdrawn`) indicate a
//!   caller bug. The hub never returns them: the offending call panics with the
//!   error's message instead, so misuse fails loudly rather than silently dropping
//!   caller intent.
//!
//! Best-effort drops and cancellation are not errors and never show up here.

use thiserror::Error;

/// # Errors produced by the hub.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HubError {
    /// A history-preserving hub was configured with a zero capacity.
    #[error("history capacity must be positive, got {capacity}")]
    InvalidCapacity {
        /// The rejected capacity.
        capacity: usize,
    },

    /// The eviction policy keeps no entries for the configured history capacity.
    #[error("history capacity {capacity} retains no events under the eviction policy")]
    NoRetainedHistory {
        /// The configured capacity.
        capacity: usize,
    },

    /// An event was published on a hub that has already been closed.
    #[error("publish on a closed hub")]
    Closed,

    /// `close` was called on a hub that has already been closed.
    #[error("hub closed more than once")]
    AlreadyClosed,

    /// A subscription was used after its owner withdrew it.
    #[error("subscription {id} used after close")]
    Withdrawn {
        /// Identifier of the withdrawn subscription.
        id: u64,
    },
}

impl HubError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use hubcast::HubError;
    ///
    /// let err = HubError::InvalidCapacity { capacity: 0 };
    /// assert_eq!(err.as_label(), "hub_invalid_capacity");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            HubError::InvalidCapacity { .. } => "hub_invalid_capacity",
            HubError::NoRetainedHistory { .. } => "hub_no_retained_history",
            HubError::Closed => "hub_closed",
            HubError::AlreadyClosed => "hub_already_closed",
            HubError::Withdrawn { .. } => "subscription_withdrawn",
        }
    }

    /// Indicates whether the error is a caller bug rather than a configuration problem.
    ///
    /// Usage violations are raised as panics by the hub; this helper exists for
    /// code that wants to classify a message it caught.
    pub fn is_usage_violation(&self) -> bool {
        !matches!(
            self,
            HubError::InvalidCapacity { .. } | HubError::NoRetainedHistory { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_are_stable() {
        assert_eq!(HubError::Closed.as_label(), "hub_closed");
        assert_eq!(HubError::AlreadyClosed.as_label(), "hub_already_closed");
        assert_eq!(
            HubError::Withdrawn { id: 3 }.as_label(),
            "subscription_withdrawn"
        );
    }

    #[test]
    fn messages_carry_details() {
        assert_eq!(
            HubError::InvalidCapacity { capacity: 0 }.to_string(),
            "history capacity must be positive, got 0"
        );
        assert_eq!(
            HubError::Withdrawn { id: 7 }.to_string(),
            "subscription 7 used after close"
        );
        let err = HubError::NoRetainedHistory { capacity: 1 };
        assert_eq!(
            err.to_string(),
            "history capacity 1 retains no events under the eviction policy"
        );
        assert_eq!(err.as_label(), "hub_no_retained_history");
    }

    #[test]
    fn only_configuration_errors_are_not_usage_violations() {
        assert!(!HubError::InvalidCapacity { capacity: 0 }.is_usage_violation());
        assert!(!HubError::NoRetainedHistory { capacity: 1 }.is_usage_violation());
        assert!(HubError::Closed.is_usage_violation());
        assert!(HubError::AlreadyClosed.is_usage_violation());
        assert!(HubError::Withdrawn { id: 1 }.is_usage_violation());
    }
}
