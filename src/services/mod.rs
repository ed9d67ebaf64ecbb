//! Services - business logic and state management
//!
//! This module contains the core business logic services:
//! - `catalog` - single-flight attraction cache
//! - `proximity` - reward and containment distance thresholds
//! - `rewards` - concurrent reward computation engine
//! - `tracker` - per-user tracking cycles and bulk sweeps
//! - `nearby` - ranked nearest-attraction queries

pub mod catalog;
pub mod nearby;
pub mod proximity;
pub mod rewards;
pub mod tracker;

// Re-export commonly used types
pub use catalog::AttractionCatalog;
pub use nearby::NearbyRanker;
pub use proximity::ProximityPolicy;
pub use rewards::RewardEngine;
pub use tracker::LocationTracker;
