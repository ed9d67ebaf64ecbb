//! IO modules - external collaborator interfaces
//!
//! This module contains the contracts for every external system the core
//! consumes, plus the simulated implementations the binary runs against:
//! - `gps` - attraction catalog and live position feed
//! - `rewards` - per-attraction reward point lookup
//! - `pricing` - trip quote service
//! - `users` - user repository (injected storage abstraction)

pub mod gps;
pub mod pricing;
pub mod rewards;
pub mod users;

// Re-export commonly used types
pub use gps::{GpsProvider, SimulatedGps};
pub use pricing::{SimulatedTripPricer, TripPricing};
pub use rewards::{RewardLookup, SimulatedRewardCentral};
pub use users::{InMemoryUserRepository, UserRepository};
