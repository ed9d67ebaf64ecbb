//! Lock-free metrics collection and periodic reporting
//!
//! Uses atomics for hot-path operations to avoid mutex contention.
//! All counter updates are lock-free; reporting is the only operation
//! that needs synchronization (via atomic swap).
//!
//! NOTE: All atomics use Relaxed ordering intentionally—these are statistical
//! counters only. Do NOT use these atomics for coordination or logic decisions.

use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// Exponential bucket boundaries for point-lookup latency (microseconds)
/// Buckets: ≤100, ≤200, ≤400, ≤800, ≤1600, ≤3200, ≤6400, ≤12800, ≤25600, ≤51200, >51200
const BUCKET_BOUNDS: [u64; 10] = [100, 200, 400, 800, 1600, 3200, 6400, 12800, 25600, 51200];
const NUM_BUCKETS: usize = 11;

/// Upper bound reported for each bucket (last bucket uses 2x the previous bound)
const BUCKET_UPPER_BOUNDS: [u64; NUM_BUCKETS] =
    [100, 200, 400, 800, 1600, 3200, 6400, 12800, 25600, 51200, 102400];

/// Compute bucket index for a latency value using binary search
#[inline]
fn bucket_index(latency_us: u64) -> usize {
    BUCKET_BOUNDS.partition_point(|&bound| bound < latency_us)
}

/// Swap all buckets to zero and return their values
#[inline]
fn swap_buckets(buckets: &[AtomicU64; NUM_BUCKETS]) -> [u64; NUM_BUCKETS] {
    let mut result = [0u64; NUM_BUCKETS];
    for (i, bucket) in buckets.iter().enumerate() {
        result[i] = bucket.swap(0, Ordering::Relaxed);
    }
    result
}

/// Compute percentile from histogram buckets
/// Returns the upper bound of the bucket containing the percentile
fn percentile_from_buckets(buckets: &[u64; NUM_BUCKETS], percentile: f64) -> u64 {
    let total: u64 = buckets.iter().sum();
    if total == 0 {
        return 0;
    }

    let target = (total as f64 * percentile) as u64;
    let mut cumulative = 0u64;

    for (i, &count) in buckets.iter().enumerate() {
        cumulative += count;
        if cumulative >= target {
            return BUCKET_UPPER_BOUNDS[i];
        }
    }
    BUCKET_UPPER_BOUNDS[NUM_BUCKETS - 1]
}

/// Metrics collector for the tracking and reward pipeline
#[derive(Default)]
pub struct Metrics {
    /// Positions recorded by tracking cycles
    positions_tracked: AtomicU64,
    /// Reward fan-out tasks executed (including near-miss pairs)
    reward_tasks: AtomicU64,
    /// Rewards actually granted
    rewards_granted: AtomicU64,
    /// Point lookups that failed or timed out
    lookup_failures: AtomicU64,
    /// Point-lookup latency histogram
    lookup_latency_buckets: [AtomicU64; NUM_BUCKETS],
}

impl Metrics {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_position_tracked(&self) {
        self.positions_tracked.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_reward_task(&self) {
        self.reward_tasks.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_reward_granted(&self) {
        self.rewards_granted.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_lookup_failure(&self) {
        self.lookup_failures.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_lookup_latency(&self, latency_us: u64) {
        let idx = bucket_index(latency_us);
        self.lookup_latency_buckets[idx].fetch_add(1, Ordering::Relaxed);
    }

    /// Snapshot and reset all counters, returning a report for this interval
    pub fn report(&self) -> MetricsSummary {
        let latency_buckets = swap_buckets(&self.lookup_latency_buckets);

        MetricsSummary {
            positions_tracked: self.positions_tracked.swap(0, Ordering::Relaxed),
            reward_tasks: self.reward_tasks.swap(0, Ordering::Relaxed),
            rewards_granted: self.rewards_granted.swap(0, Ordering::Relaxed),
            lookup_failures: self.lookup_failures.swap(0, Ordering::Relaxed),
            lookup_p50_us: percentile_from_buckets(&latency_buckets, 0.50),
            lookup_p99_us: percentile_from_buckets(&latency_buckets, 0.99),
        }
    }
}

/// One reporting interval's worth of counters
#[derive(Debug, Clone, Copy)]
pub struct MetricsSummary {
    pub positions_tracked: u64,
    pub reward_tasks: u64,
    pub rewards_granted: u64,
    pub lookup_failures: u64,
    pub lookup_p50_us: u64,
    pub lookup_p99_us: u64,
}

impl MetricsSummary {
    pub fn log(&self) {
        info!(
            positions_tracked = %self.positions_tracked,
            reward_tasks = %self.reward_tasks,
            rewards_granted = %self.rewards_granted,
            lookup_failures = %self.lookup_failures,
            lookup_p50_us = %self.lookup_p50_us,
            lookup_p99_us = %self.lookup_p99_us,
            "metrics_report"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_index_boundaries() {
        assert_eq!(bucket_index(0), 0);
        assert_eq!(bucket_index(100), 0);
        assert_eq!(bucket_index(101), 1);
        assert_eq!(bucket_index(51200), 9);
        assert_eq!(bucket_index(51201), 10);
    }

    #[test]
    fn test_report_swaps_counters() {
        let metrics = Metrics::new();
        metrics.record_position_tracked();
        metrics.record_reward_task();
        metrics.record_reward_task();
        metrics.record_reward_granted();
        metrics.record_lookup_latency(150);
        metrics.record_lookup_latency(150);
        metrics.record_lookup_latency(150);

        let summary = metrics.report();
        assert_eq!(summary.positions_tracked, 1);
        assert_eq!(summary.reward_tasks, 2);
        assert_eq!(summary.rewards_granted, 1);
        assert_eq!(summary.lookup_failures, 0);
        assert_eq!(summary.lookup_p50_us, 200);

        // Counters reset after the swap
        let summary = metrics.report();
        assert_eq!(summary.positions_tracked, 0);
        assert_eq!(summary.reward_tasks, 0);
        assert_eq!(summary.lookup_p50_us, 0);
    }

    #[test]
    fn test_percentile_from_empty_buckets() {
        let buckets = [0u64; NUM_BUCKETS];
        assert_eq!(percentile_from_buckets(&buckets, 0.99), 0);
    }
}
