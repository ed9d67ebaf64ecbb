//! Reward point lookup service
//!
//! The scoring algorithm behind a point value is opaque to this system;
//! the lookup is treated as a remote oracle, one call per qualifying
//! (attraction, user) pair.

use crate::domain::types::{AttractionId, UserId};
use crate::error::TrackError;
use async_trait::async_trait;
use rand::Rng;
use std::time::Duration;

#[async_trait]
pub trait RewardLookup: Send + Sync {
    /// Point value of an attraction for a specific user
    async fn reward_points(
        &self,
        attraction_id: AttractionId,
        user_id: UserId,
    ) -> Result<i32, TrackError>;
}

/// Simulated reward central: random point values with latency jitter
pub struct SimulatedRewardCentral {
    max_latency: Duration,
}

impl SimulatedRewardCentral {
    pub fn new() -> Self {
        Self { max_latency: Duration::from_millis(10) }
    }
}

impl Default for SimulatedRewardCentral {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RewardLookup for SimulatedRewardCentral {
    async fn reward_points(
        &self,
        _attraction_id: AttractionId,
        _user_id: UserId,
    ) -> Result<i32, TrackError> {
        let (latency_ms, points) = {
            let mut rng = rand::thread_rng();
            (
                rng.gen_range(0..=self.max_latency.as_millis() as u64),
                rng.gen_range(1..=1000),
            )
        };
        if latency_ms > 0 {
            tokio::time::sleep(Duration::from_millis(latency_ms)).await;
        }
        Ok(points)
    }
}
