//! Proximity policy - the two distance thresholds
//!
//! `reward_radius_miles` decides whether a visit is close enough to earn
//! an attraction's reward; `attraction_range_miles` decides whether a
//! coordinate counts as being at an attraction at all. The two knobs are
//! independent. Both are read from many concurrent reward tasks and
//! written rarely (administrative), so they are plain atomics with
//! Relaxed ordering—readers only need to see some recent value, there is
//! no read+decide atomicity to preserve.

use crate::domain::geo::distance_miles;
use crate::domain::types::{Attraction, Coordinate};
use crate::infra::config::Config;
use std::sync::atomic::{AtomicU64, Ordering};

pub struct ProximityPolicy {
    /// Bit pattern of the f64 reward radius
    reward_radius: AtomicU64,
    /// Radius the policy was constructed with, restored by reset
    default_reward_radius: f64,
    /// Bit pattern of the f64 attraction containment range
    attraction_range: AtomicU64,
}

impl ProximityPolicy {
    pub fn new(config: &Config) -> Self {
        Self::with_radii(config.proximity_miles(), config.attraction_range_miles())
    }

    pub fn with_radii(reward_radius_miles: f64, attraction_range_miles: f64) -> Self {
        Self {
            reward_radius: AtomicU64::new(reward_radius_miles.to_bits()),
            default_reward_radius: reward_radius_miles,
            attraction_range: AtomicU64::new(attraction_range_miles.to_bits()),
        }
    }

    pub fn reward_radius_miles(&self) -> f64 {
        f64::from_bits(self.reward_radius.load(Ordering::Relaxed))
    }

    pub fn set_reward_radius_miles(&self, miles: f64) {
        self.reward_radius.store(miles.to_bits(), Ordering::Relaxed);
    }

    /// Restore the reward radius the policy was constructed with
    pub fn reset_reward_radius(&self) {
        self.set_reward_radius_miles(self.default_reward_radius);
    }

    pub fn attraction_range_miles(&self) -> f64 {
        f64::from_bits(self.attraction_range.load(Ordering::Relaxed))
    }

    pub fn set_attraction_range_miles(&self, miles: f64) {
        self.attraction_range.store(miles.to_bits(), Ordering::Relaxed);
    }

    /// Whether a visit at `coordinate` earns `attraction`'s reward
    pub fn is_near_for_reward(&self, coordinate: Coordinate, attraction: &Attraction) -> bool {
        distance_miles(coordinate, attraction.coordinate) <= self.reward_radius_miles()
    }

    /// Whether `coordinate` counts as being within `attraction`
    pub fn is_within_attraction(&self, attraction: &Attraction, coordinate: Coordinate) -> bool {
        distance_miles(attraction.coordinate, coordinate) <= self.attraction_range_miles()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::AttractionId;

    fn policy() -> ProximityPolicy {
        ProximityPolicy::new(&Config::default())
    }

    fn attraction_at(lat: f64, lon: f64) -> Attraction {
        Attraction {
            id: AttractionId::random(),
            name: "Disneyland".to_string(),
            city: "Anaheim".to_string(),
            state: "CA".to_string(),
            coordinate: Coordinate::new(lat, lon),
        }
    }

    #[test]
    fn test_defaults_from_config() {
        let policy = policy();
        assert_eq!(policy.reward_radius_miles(), 10.0);
        assert_eq!(policy.attraction_range_miles(), 1_000_000.0);
    }

    #[test]
    fn test_near_for_reward_respects_radius() {
        let policy = policy();
        let attraction = attraction_at(0.0, 0.0);

        // ~6.9 miles east
        assert!(policy.is_near_for_reward(Coordinate::new(0.0, 0.1), &attraction));
        // ~690 miles east
        assert!(!policy.is_near_for_reward(Coordinate::new(0.0, 10.0), &attraction));
    }

    #[test]
    fn test_set_and_reset_reward_radius() {
        let policy = policy();
        let attraction = attraction_at(0.0, 0.0);
        let far = Coordinate::new(0.0, 10.0);

        policy.set_reward_radius_miles(1_000.0);
        assert!(policy.is_near_for_reward(far, &attraction));

        policy.reset_reward_radius();
        assert_eq!(policy.reward_radius_miles(), 10.0);
        assert!(!policy.is_near_for_reward(far, &attraction));
    }

    #[test]
    fn test_containment_is_independent_of_reward_radius() {
        let policy = policy();
        let attraction = attraction_at(0.0, 0.0);
        let antipodal_ish = Coordinate::new(0.0, 179.0);

        policy.set_reward_radius_miles(0.001);
        // Sentinel range covers the globe regardless of the reward radius
        assert!(policy.is_within_attraction(&attraction, antipodal_ish));

        policy.set_attraction_range_miles(5.0);
        assert!(!policy.is_within_attraction(&attraction, antipodal_ish));
    }
}
