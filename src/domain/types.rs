//! Shared value types for tracking and rewards

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Newtype wrapper for user IDs to provide type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Newtype wrapper for attraction IDs to provide type safety
///
/// Attraction names are display data and are not unique; every identity
/// comparison in the system goes through this ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct AttractionId(pub Uuid);

impl AttractionId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for AttractionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// A catalogued point of interest with fixed coordinates
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attraction {
    pub id: AttractionId,
    pub name: String,
    pub city: String,
    pub state: String,
    pub coordinate: Coordinate,
}

/// A timestamped coordinate recorded for a specific user
///
/// Positions are append-only: once recorded they are never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub user_id: UserId,
    pub coordinate: Coordinate,
    pub recorded_at: DateTime<Utc>,
}

impl Position {
    pub fn new(user_id: UserId, coordinate: Coordinate, recorded_at: DateTime<Utc>) -> Self {
        Self { user_id, coordinate, recorded_at }
    }
}

/// A one-time point award for visiting near an attraction
///
/// At most one reward per (user, attraction id) pair ever exists; the
/// triggering position is kept for auditing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    pub position: Position,
    pub attraction: Attraction,
    pub points: i32,
}

impl Reward {
    pub fn new(position: Position, attraction: Attraction, points: i32) -> Self {
        Self { position, attraction, points }
    }
}

/// One entry of a ranked nearest-attraction query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyAttraction {
    pub attraction_name: String,
    pub attraction_coordinate: Coordinate,
    pub user_coordinate: Coordinate,
    pub distance_miles: f64,
    pub reward_points: i32,
}

/// Trip parameters a user has expressed, consumed by the pricing service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripPreferences {
    pub adults: u32,
    pub children: u32,
    pub trip_duration_days: u32,
}

impl Default for TripPreferences {
    fn default() -> Self {
        Self { adults: 1, children: 0, trip_duration_days: 1 }
    }
}

/// A priced trip offer from an external provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOffer {
    pub provider_name: String,
    pub price: f64,
    pub trip_id: Uuid,
}
