//! Location tracking cycles
//!
//! One cycle for one user: fetch the current position from the feed,
//! append it to the history, run the reward engine to completion, hand
//! the new position back. Bulk tracking fans the same cycle out across
//! users with no shared state between them; one user's failure never
//! touches another's cycle.

use crate::domain::types::{Position, PriceOffer, UserId};
use crate::domain::user::User;
use crate::error::TrackError;
use crate::infra::config::Config;
use crate::infra::metrics::Metrics;
use crate::io::gps::GpsProvider;
use crate::io::pricing::TripPricing;
use crate::services::rewards::RewardEngine;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{debug, info};

pub struct LocationTracker {
    gps: Arc<dyn GpsProvider>,
    engine: Arc<RewardEngine>,
    pricing: Arc<dyn TripPricing>,
    pricing_api_key: String,
    metrics: Arc<Metrics>,
}

impl LocationTracker {
    pub fn new(
        config: &Config,
        gps: Arc<dyn GpsProvider>,
        engine: Arc<RewardEngine>,
        pricing: Arc<dyn TripPricing>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self {
            gps,
            engine,
            pricing,
            pricing_api_key: config.pricing_api_key().to_string(),
            metrics,
        }
    }

    /// Where the user currently is.
    ///
    /// Memoized: a user with recorded history gets the most recent
    /// position back without a feed call or a reward pass. Only a user
    /// with no history at all triggers a full tracking cycle.
    pub async fn current_location(&self, user: &Arc<User>) -> Result<Position, TrackError> {
        match user.last_position() {
            Some(position) => Ok(position),
            None => self.track(user).await,
        }
    }

    /// Run one full tracking cycle for the user.
    ///
    /// Fetches a fresh position, appends it, and runs the reward engine
    /// to completion before returning the new position. A feed or engine
    /// failure is fatal for this cycle.
    pub async fn track(&self, user: &Arc<User>) -> Result<Position, TrackError> {
        let cycle_start = Instant::now();

        let position = self.gps.user_location(user.id()).await?;
        user.add_position(position.clone());
        self.metrics.record_position_tracked();

        self.engine.calculate_rewards(user).await?;

        debug!(
            user = %user.id(),
            latitude = %position.coordinate.latitude,
            longitude = %position.coordinate.longitude,
            cycle_us = %cycle_start.elapsed().as_micros(),
            "user_tracked"
        );
        Ok(position)
    }

    /// Track every user concurrently, one isolated cycle each.
    ///
    /// No ordering between users; a failed cycle is reported in that
    /// user's slot and leaves the others untouched.
    pub async fn track_all(
        self: &Arc<Self>,
        users: &[Arc<User>],
    ) -> Vec<(UserId, Result<Position, TrackError>)> {
        let mut cycles: JoinSet<(UserId, Result<Position, TrackError>)> = JoinSet::new();

        for user in users {
            let tracker = Arc::clone(self);
            let user = Arc::clone(user);
            cycles.spawn(async move {
                let result = tracker.track(&user).await;
                (user.id(), result)
            });
        }

        let mut results = Vec::with_capacity(users.len());
        while let Some(joined) = cycles.join_next().await {
            match joined {
                Ok(entry) => results.push(entry),
                Err(join_err) => {
                    // The cycle task itself died; the user id is gone with it
                    debug!(error = %join_err, "tracking_cycle_panicked");
                }
            }
        }

        let failed = results.iter().filter(|(_, r)| r.is_err()).count();
        info!(
            users = %users.len(),
            failed = %failed,
            "tracking_sweep_complete"
        );
        results
    }

    /// Quote trip offers priced against the user's accumulated points and
    /// store them on the user.
    pub async fn trip_deals(&self, user: &Arc<User>) -> Result<Vec<PriceOffer>, TrackError> {
        let points = user.reward_points_total();
        let offers = self
            .pricing
            .quote(&self.pricing_api_key, user.id(), user.preferences(), points)
            .await?;

        user.set_trip_offers(offers.clone());
        debug!(
            user = %user.id(),
            offers = %offers.len(),
            points = %points,
            "trip_deals_quoted"
        );
        Ok(offers)
    }
}
