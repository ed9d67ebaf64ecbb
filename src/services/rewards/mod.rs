//! Reward computation engine
//!
//! The concurrent core of the system: for every (position, attraction)
//! pair in a user's history it decides whether a new reward is due, fans
//! the qualifying lookups out across a bounded worker pool, and joins
//! every task before returning. The one-reward-per-attraction invariant
//! is enforced twice: a cheap pre-check before scheduling, and the
//! compare-and-insert on the user's reward map at execution time.


use crate::domain::types::Reward;
use crate::domain::user::User;
use crate::error::TrackError;
use crate::infra::config::Config;
use crate::infra::metrics::Metrics;
use crate::io::rewards::RewardLookup;
use crate::services::catalog::AttractionCatalog;
use crate::services::proximity::ProximityPolicy;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, warn};

pub struct RewardEngine {
    catalog: Arc<AttractionCatalog>,
    policy: Arc<ProximityPolicy>,
    lookup: Arc<dyn RewardLookup>,
    /// Bounds concurrent lookup work; created once and reused across calls
    permits: Arc<Semaphore>,
    lookup_timeout: Duration,
    metrics: Arc<Metrics>,
}

impl RewardEngine {
    pub fn new(
        config: &Config,
        catalog: Arc<AttractionCatalog>,
        policy: Arc<ProximityPolicy>,
        lookup: Arc<dyn RewardLookup>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            catalog,
            policy,
            lookup,
            permits: Arc::new(Semaphore::new(config.reward_workers())),
            lookup_timeout: Duration::from_millis(config.lookup_timeout_ms()),
            metrics,
        }
    }

    /// Compute and record any newly earned rewards for the user.
    ///
    /// Returns once every scheduled task has finished. Task failures are
    /// isolated: a failing lookup does not abort its siblings, and rewards
    /// recorded by tasks that succeeded remain recorded even when the call
    /// returns the aggregate error. Calling again with an unchanged
    /// history is a no-op.
    pub async fn calculate_rewards(&self, user: &Arc<User>) -> Result<(), TrackError> {
        let positions = user.positions();
        if positions.is_empty() {
            return Ok(());
        }
        let attractions = self.catalog.attractions().await?;

        let mut tasks: JoinSet<Result<(), TrackError>> = JoinSet::new();
        let mut scheduled = 0usize;

        for position in &positions {
            for attraction in &attractions {
                // Dedup pre-check: don't schedule work for attractions the
                // user already holds a reward for
                if user.has_reward(attraction.id) {
                    continue;
                }
                scheduled += 1;

                let user = Arc::clone(user);
                let attraction = attraction.clone();
                let position = position.clone();
                let policy = Arc::clone(&self.policy);
                let lookup = Arc::clone(&self.lookup);
                let permits = Arc::clone(&self.permits);
                let metrics = Arc::clone(&self.metrics);
                let timeout = self.lookup_timeout;

                tasks.spawn(async move {
                    let _permit = permits
                        .acquire_owned()
                        .await
                        .map_err(|_| TrackError::Task("reward worker pool closed".to_string()))?;
                    metrics.record_reward_task();

                    // Re-check at execution time: a sibling task for the same
                    // attraction may have completed since scheduling
                    if user.has_reward(attraction.id) {
                        return Ok(());
                    }
                    if !policy.is_near_for_reward(position.coordinate, &attraction) {
                        return Ok(());
                    }

                    let start = Instant::now();
                    let lookup_result =
                        tokio::time::timeout(timeout, lookup.reward_points(attraction.id, user.id()))
                            .await;
                    let points = match lookup_result {
                        Ok(Ok(points)) => {
                            metrics.record_lookup_latency(start.elapsed().as_micros() as u64);
                            points
                        }
                        Ok(Err(e)) => {
                            metrics.record_lookup_failure();
                            return Err(e);
                        }
                        Err(_) => {
                            metrics.record_lookup_failure();
                            return Err(TrackError::ProviderTimeout {
                                service: "reward-central",
                                timeout_ms: timeout.as_millis() as u64,
                            });
                        }
                    };

                    // Compare-and-insert: loses cleanly if another task for
                    // this attraction got there first
                    if user.try_add_reward(Reward::new(position, attraction.clone(), points)) {
                        metrics.record_reward_granted();
                        debug!(
                            user = %user.id(),
                            attraction = %attraction.name,
                            points = %points,
                            "reward_granted"
                        );
                    }
                    Ok(())
                });
            }
        }

        // Barrier: every task joins before the call returns, failed or not
        let mut failures = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Ok(())) => {}
                Ok(Err(e)) => failures.push(e),
                Err(join_err) => failures.push(TrackError::Task(join_err.to_string())),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            warn!(
                user = %user.id(),
                failed = %failures.len(),
                scheduled = %scheduled,
                "reward_tasks_failed"
            );
            Err(TrackError::Aggregate { total: scheduled, failures })
        }
    }
}
