//! GPS provider - attraction catalog and live position feed
//!
//! Both calls may be slow or remote; the catalog is fetched at most once
//! per process by the attraction cache, positions once per tracking cycle.

use crate::domain::types::{Attraction, AttractionId, Coordinate, Position, UserId};
use crate::error::TrackError;
use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use std::time::Duration;

/// Latitude bound used when generating random positions (Web Mercator limit)
pub const MAX_LATITUDE: f64 = 85.051_128_78;

#[async_trait]
pub trait GpsProvider: Send + Sync {
    /// Fetch the full attraction catalog
    async fn attractions(&self) -> Result<Vec<Attraction>, TrackError>;

    /// Fetch the user's current position
    async fn user_location(&self, user_id: UserId) -> Result<Position, TrackError>;
}

/// Simulated GPS provider: a fixed catalog and random user positions,
/// with a small latency jitter to behave like a remote call.
pub struct SimulatedGps {
    max_latency: Duration,
}

impl SimulatedGps {
    pub fn new() -> Self {
        Self { max_latency: Duration::from_millis(10) }
    }

    async fn jitter(&self) {
        let ms = rand::thread_rng().gen_range(0..=self.max_latency.as_millis() as u64);
        if ms > 0 {
            tokio::time::sleep(Duration::from_millis(ms)).await;
        }
    }
}

impl Default for SimulatedGps {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GpsProvider for SimulatedGps {
    async fn attractions(&self) -> Result<Vec<Attraction>, TrackError> {
        self.jitter().await;
        Ok(simulated_catalog())
    }

    async fn user_location(&self, user_id: UserId) -> Result<Position, TrackError> {
        self.jitter().await;

        let mut rng = rand::thread_rng();
        let coordinate = Coordinate::new(
            rng.gen_range(-MAX_LATITUDE..MAX_LATITUDE),
            rng.gen_range(-180.0..180.0),
        );
        Ok(Position::new(user_id, coordinate, Utc::now()))
    }
}

fn attraction(name: &str, city: &str, state: &str, lat: f64, lon: f64) -> Attraction {
    Attraction {
        id: AttractionId::random(),
        name: name.to_string(),
        city: city.to_string(),
        state: state.to_string(),
        coordinate: Coordinate::new(lat, lon),
    }
}

/// The fixed demo catalog served by [`SimulatedGps`]
pub fn simulated_catalog() -> Vec<Attraction> {
    vec![
        attraction("Disneyland", "Anaheim", "CA", 33.817595, -117.922008),
        attraction("Jackson Hole", "Jackson Hole", "WY", 43.582767, -110.821999),
        attraction("Mojave National Preserve", "Kelso", "CA", 35.141689, -115.510399),
        attraction("Joshua Tree National Park", "Joshua Tree National Park", "CA", 33.881866, -115.90065),
        attraction("Buffalo National River", "St Joe", "AR", 35.985512, -92.757652),
        attraction("Hot Springs National Park", "Hot Springs", "AR", 34.52153, -93.042267),
        attraction("Kartchner Caverns State Park", "Benson", "AZ", 31.837551, -110.347382),
        attraction("Legend Valley", "Thornville", "OH", 39.937778, -82.40667),
        attraction("Flatiron Building", "New York City", "NY", 40.741112, -73.989723),
        attraction("McKinley Tower", "Anchorage", "AK", 61.218887, -149.877502),
        attraction("Franklin Park Zoo", "Boston", "MA", 42.302601, -71.086731),
        attraction("Zoo Tampa at Lowry Park", "Tampa", "FL", 28.012804, -82.469269),
    ]
}
