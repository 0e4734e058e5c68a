//! Payment request tracker
//!
//! In-process map from reference id to the last observed settlement
//! status, shared between the payment controller and the webhook
//! receiver. Durable persistence stays with the caller.

use crate::status::PaymentStatus;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Cheaply cloneable lookup handle over shared state
#[derive(Debug, Clone, Default)]
pub struct PaymentRequestTracker {
    entries: Arc<RwLock<HashMap<String, PaymentStatus>>>,
}

impl PaymentRequestTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest observed status for a reference id,
    /// overwriting any earlier observation
    pub async fn record(&self, reference_id: impl Into<String>, status: PaymentStatus) {
        self.entries.write().await.insert(reference_id.into(), status);
    }

    /// Last observed status, or `None` for an unknown reference id
    pub async fn lookup(&self, reference_id: &str) -> Option<PaymentStatus> {
        self.entries.read().await.get(reference_id).copied()
    }

    /// Drop a settled reference from the tracker
    pub async fn forget(&self, reference_id: &str) -> Option<PaymentStatus> {
        self.entries.write().await.remove(reference_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_reference_looks_up_as_none() {
        let tracker = PaymentRequestTracker::new();
        assert_eq!(tracker.lookup("missing").await, None);
    }

    #[tokio::test]
    async fn record_then_lookup_round_trips() {
        let tracker = PaymentRequestTracker::new();
        tracker.record("ref-1", PaymentStatus::Pending).await;
        assert_eq!(tracker.lookup("ref-1").await, Some(PaymentStatus::Pending));
    }

    #[tokio::test]
    async fn later_observation_overwrites_earlier() {
        let tracker = PaymentRequestTracker::new();
        tracker.record("ref-1", PaymentStatus::Pending).await;
        tracker.record("ref-1", PaymentStatus::Successful).await;
        assert_eq!(
            tracker.lookup("ref-1").await,
            Some(PaymentStatus::Successful)
        );
    }

    #[tokio::test]
    async fn clones_share_state() {
        let tracker = PaymentRequestTracker::new();
        let clone = tracker.clone();
        tracker.record("ref-1", PaymentStatus::Failed).await;
        assert_eq!(clone.lookup("ref-1").await, Some(PaymentStatus::Failed));
    }

    #[tokio::test]
    async fn forget_removes_the_entry() {
        let tracker = PaymentRequestTracker::new();
        tracker.record("ref-1", PaymentStatus::Cancelled).await;
        assert_eq!(
            tracker.forget("ref-1").await,
            Some(PaymentStatus::Cancelled)
        );
        assert_eq!(tracker.lookup("ref-1").await, None);
    }
}
