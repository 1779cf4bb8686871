//! Client metrics
//!
//! Plain atomic counters updated by the enqueue paths and the worker, read
//! through point-in-time snapshots.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for one client instance
#[derive(Debug, Default)]
pub struct ClientMetrics {
    /// Records accepted onto the queue
    pub records_enqueued: AtomicU64,

    /// Records delivered in accepted batches (queued path only)
    pub records_delivered: AtomicU64,

    /// Records in batches that failed to deliver
    pub records_failed: AtomicU64,

    /// Batches accepted by the endpoint
    pub batches_delivered: AtomicU64,

    /// Batches rejected or lost to transport errors
    pub batches_failed: AtomicU64,

    /// Wire payload bytes of accepted batches
    pub bytes_delivered: AtomicU64,
}

impl ClientMetrics {
    /// Create zeroed metrics
    pub const fn new() -> Self {
        Self {
            records_enqueued: AtomicU64::new(0),
            records_delivered: AtomicU64::new(0),
            records_failed: AtomicU64::new(0),
            batches_delivered: AtomicU64::new(0),
            batches_failed: AtomicU64::new(0),
            bytes_delivered: AtomicU64::new(0),
        }
    }

    /// Record a successful enqueue
    #[inline]
    pub fn record_enqueued(&self) {
        self.records_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    /// Record an accepted batch
    #[inline]
    pub fn record_batch_delivered(&self, record_count: u64, byte_count: u64) {
        self.batches_delivered.fetch_add(1, Ordering::Relaxed);
        self.records_delivered
            .fetch_add(record_count, Ordering::Relaxed);
        self.bytes_delivered.fetch_add(byte_count, Ordering::Relaxed);
    }

    /// Record a failed batch
    #[inline]
    pub fn record_batch_failed(&self, record_count: u64) {
        self.batches_failed.fetch_add(1, Ordering::Relaxed);
        self.records_failed
            .fetch_add(record_count, Ordering::Relaxed);
    }

    /// Get a snapshot of the counters
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            records_enqueued: self.records_enqueued.load(Ordering::Relaxed),
            records_delivered: self.records_delivered.load(Ordering::Relaxed),
            records_failed: self.records_failed.load(Ordering::Relaxed),
            batches_delivered: self.batches_delivered.load(Ordering::Relaxed),
            batches_failed: self.batches_failed.load(Ordering::Relaxed),
            bytes_delivered: self.bytes_delivered.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of client metrics
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsSnapshot {
    pub records_enqueued: u64,
    pub records_delivered: u64,
    pub records_failed: u64,
    pub batches_delivered: u64,
    pub batches_failed: u64,
    pub bytes_delivered: u64,
}
