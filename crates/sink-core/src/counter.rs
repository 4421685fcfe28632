use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};

#[derive(Debug, Default)]
struct InnerCounter {
    batch_empty: AtomicU64,
    batch_underflow: AtomicU64,
    batch_complete: AtomicU64,
    drain_success: AtomicU64,
    delivery_failures: AtomicU64,
}

/// Lifecycle counters for one sink instance. Cheap to clone; clones share
/// the same underlying counts.
#[derive(Debug, Clone)]
pub struct SinkCounter {
    inner: Arc<InnerCounter>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkCounterSnapshot {
    pub batch_empty: u64,
    pub batch_underflow: u64,
    pub batch_complete: u64,
    pub drain_success: u64,
    pub delivery_failures: u64,
}

impl SinkCounter {
    pub fn new() -> Self {
        SinkCounter {
            inner: Arc::new(InnerCounter::default()),
        }
    }

    pub fn increment_batch_empty(&self) {
        self.inner.batch_empty.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_batch_underflow(&self) {
        self.inner.batch_underflow.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_batch_complete(&self) {
        self.inner.batch_complete.fetch_add(1, Ordering::Relaxed);
    }

    pub fn add_drain_success(&self, count: u64) {
        self.inner.drain_success.fetch_add(count, Ordering::Relaxed);
    }

    pub fn increment_delivery_failures(&self) {
        self.inner.delivery_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> SinkCounterSnapshot {
        SinkCounterSnapshot {
            batch_empty: self.inner.batch_empty.load(Ordering::Relaxed),
            batch_underflow: self.inner.batch_underflow.load(Ordering::Relaxed),
            batch_complete: self.inner.batch_complete.load(Ordering::Relaxed),
            drain_success: self.inner.drain_success.load(Ordering::Relaxed),
            delivery_failures: self.inner.delivery_failures.load(Ordering::Relaxed),
        }
    }
}

impl Default for SinkCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accumulate_into_snapshot() {
        let counter = SinkCounter::new();
        counter.increment_batch_empty();
        counter.increment_batch_underflow();
        counter.increment_batch_complete();
        counter.add_drain_success(7);
        counter.add_drain_success(3);
        counter.increment_delivery_failures();

        let snapshot = counter.snapshot();
        assert_eq!(snapshot.batch_empty, 1);
        assert_eq!(snapshot.batch_underflow, 1);
        assert_eq!(snapshot.batch_complete, 1);
        assert_eq!(snapshot.drain_success, 10);
        assert_eq!(snapshot.delivery_failures, 1);
    }

    #[test]
    fn clones_share_counts() {
        let counter = SinkCounter::new();
        let clone = counter.clone();
        clone.increment_batch_empty();
        assert_eq!(counter.snapshot().batch_empty, 1);
    }
}
