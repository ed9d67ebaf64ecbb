//! Trip pricing service
//!
//! Consumes a user's accumulated reward points to discount quoted trips.
//! Only the quote contract belongs to this system; pricing internals are
//! the provider's business.

use crate::domain::types::{PriceOffer, TripPreferences, UserId};
use crate::error::TrackError;
use async_trait::async_trait;
use rand::Rng;
use uuid::Uuid;

#[async_trait]
pub trait TripPricing: Send + Sync {
    /// Quote trip offers for a user, factoring in accumulated points
    async fn quote(
        &self,
        api_key: &str,
        user_id: UserId,
        preferences: TripPreferences,
        reward_points: i32,
    ) -> Result<Vec<PriceOffer>, TrackError>;
}

const PROVIDER_NAMES: [&str; 10] = [
    "Holiday Travels",
    "Enterprize Ventures Limited",
    "Sunny Days",
    "FlyAway Trips",
    "United Partners Vacations",
    "Dream Trips",
    "Live Free",
    "Dancing Waves Cruselines and Partners",
    "AdventureCo",
    "Cure-Your-Blues",
];

/// Simulated trip pricer: five named providers with randomized prices,
/// each discounted by the user's accumulated points.
pub struct SimulatedTripPricer;

impl SimulatedTripPricer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for SimulatedTripPricer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TripPricing for SimulatedTripPricer {
    async fn quote(
        &self,
        _api_key: &str,
        _user_id: UserId,
        preferences: TripPreferences,
        reward_points: i32,
    ) -> Result<Vec<PriceOffer>, TrackError> {
        let mut rng = rand::thread_rng();
        let mut offers = Vec::with_capacity(5);

        for _ in 0..5 {
            let name = PROVIDER_NAMES[rng.gen_range(0..PROVIDER_NAMES.len())];
            let nightly: f64 = rng.gen_range(80.0..220.0);
            let base = nightly
                * preferences.trip_duration_days as f64
                * (preferences.adults as f64 + 0.5 * preferences.children as f64);
            let price = (base - f64::from(reward_points) / 10.0).max(0.0);

            offers.push(PriceOffer {
                provider_name: name.to_string(),
                price,
                trip_id: Uuid::new_v4(),
            });
        }

        Ok(offers)
    }
}
