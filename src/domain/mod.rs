//! Domain models - core business types and geometry
//!
//! This module contains the canonical data types used throughout the system:
//! - `Coordinate` / `Position` - where a user was, and when
//! - `Attraction` - a catalogued point of interest
//! - `Reward` - a one-time point award for visiting near an attraction
//! - `User` - position history, reward collection, trip preferences
//! - `geo` - great-circle distance between coordinates

pub mod geo;
pub mod types;
pub mod user;

// Re-export commonly used types at module level
pub use types::{Attraction, AttractionId, Coordinate, Position, Reward, UserId};
pub use user::User;
