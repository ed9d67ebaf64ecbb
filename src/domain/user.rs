//! Tracked user state: position history and reward collection
//!
//! A `User` is shared behind an `Arc` and mutated from concurrent reward
//! tasks, so both collections live behind locks. The reward map is keyed
//! by attraction id; insertion is compare-and-insert under the write
//! lock, which is what upholds the one-reward-per-attraction invariant
//! under arbitrary task interleaving.

use crate::domain::types::{AttractionId, Position, PriceOffer, Reward, TripPreferences, UserId};
use parking_lot::RwLock;
use rustc_hash::FxHashMap;

pub struct User {
    id: UserId,
    user_name: String,
    phone_number: String,
    email_address: String,
    positions: RwLock<Vec<Position>>,
    rewards: RwLock<FxHashMap<AttractionId, Reward>>,
    preferences: RwLock<TripPreferences>,
    trip_offers: RwLock<Vec<PriceOffer>>,
}

impl User {
    pub fn new(id: UserId, user_name: &str, phone_number: &str, email_address: &str) -> Self {
        Self {
            id,
            user_name: user_name.to_string(),
            phone_number: phone_number.to_string(),
            email_address: email_address.to_string(),
            positions: RwLock::new(Vec::new()),
            rewards: RwLock::new(FxHashMap::default()),
            preferences: RwLock::new(TripPreferences::default()),
            trip_offers: RwLock::new(Vec::new()),
        }
    }

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn email_address(&self) -> &str {
        &self.email_address
    }

    /// Append a freshly recorded position to the history
    pub fn add_position(&self, position: Position) {
        self.positions.write().push(position);
    }

    /// Snapshot of the full position history, oldest first
    pub fn positions(&self) -> Vec<Position> {
        self.positions.read().clone()
    }

    /// The most recently recorded position, if any
    pub fn last_position(&self) -> Option<Position> {
        self.positions.read().last().cloned()
    }

    pub fn has_positions(&self) -> bool {
        !self.positions.read().is_empty()
    }

    /// Whether a reward for this attraction id has already been granted
    pub fn has_reward(&self, attraction_id: AttractionId) -> bool {
        self.rewards.read().contains_key(&attraction_id)
    }

    /// Insert the reward unless one already exists for its attraction id.
    ///
    /// Returns whether the reward was inserted. The existence check and
    /// the insert happen under one write lock, so two tasks racing on the
    /// same attraction can never both succeed.
    pub fn try_add_reward(&self, reward: Reward) -> bool {
        use std::collections::hash_map::Entry;

        match self.rewards.write().entry(reward.attraction.id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(reward);
                true
            }
        }
    }

    /// Snapshot of all granted rewards, in no particular order
    pub fn rewards(&self) -> Vec<Reward> {
        self.rewards.read().values().cloned().collect()
    }

    pub fn reward_count(&self) -> usize {
        self.rewards.read().len()
    }

    /// Sum of all granted reward points
    pub fn reward_points_total(&self) -> i32 {
        self.rewards.read().values().map(|r| r.points).sum()
    }

    pub fn preferences(&self) -> TripPreferences {
        *self.preferences.read()
    }

    pub fn set_preferences(&self, preferences: TripPreferences) {
        *self.preferences.write() = preferences;
    }

    /// Replace the stored trip offers with a fresh quote result
    pub fn set_trip_offers(&self, offers: Vec<PriceOffer>) {
        *self.trip_offers.write() = offers;
    }

    pub fn trip_offers(&self) -> Vec<PriceOffer> {
        self.trip_offers.read().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Attraction, Coordinate};
    use chrono::Utc;

    fn attraction(name: &str) -> Attraction {
        Attraction {
            id: AttractionId::random(),
            name: name.to_string(),
            city: "Anaheim".to_string(),
            state: "CA".to_string(),
            coordinate: Coordinate::new(33.817595, -117.922008),
        }
    }

    fn position(user_id: UserId) -> Position {
        Position::new(user_id, Coordinate::new(33.8, -117.9), Utc::now())
    }

    #[test]
    fn test_positions_append_in_order() {
        let user = User::new(UserId::random(), "internalUser0", "000", "u0@tourtrack.com");
        assert!(user.last_position().is_none());

        let first = position(user.id());
        let second = position(user.id());
        user.add_position(first.clone());
        user.add_position(second.clone());

        assert_eq!(user.positions(), vec![first, second.clone()]);
        assert_eq!(user.last_position(), Some(second));
    }

    #[test]
    fn test_try_add_reward_dedups_by_attraction_id() {
        let user = User::new(UserId::random(), "internalUser0", "000", "u0@tourtrack.com");
        let attraction = attraction("Disneyland");
        let pos = position(user.id());

        assert!(user.try_add_reward(Reward::new(pos.clone(), attraction.clone(), 100)));
        assert!(!user.try_add_reward(Reward::new(pos, attraction.clone(), 999)));

        assert_eq!(user.reward_count(), 1);
        assert!(user.has_reward(attraction.id));
        assert_eq!(user.reward_points_total(), 100);
    }

    #[test]
    fn test_same_name_different_id_gets_both_rewards() {
        let user = User::new(UserId::random(), "internalUser0", "000", "u0@tourtrack.com");
        let pos = position(user.id());
        let a = attraction("Legend Valley");
        let b = attraction("Legend Valley");

        assert!(user.try_add_reward(Reward::new(pos.clone(), a, 10)));
        assert!(user.try_add_reward(Reward::new(pos, b, 20)));
        assert_eq!(user.reward_count(), 2);
        assert_eq!(user.reward_points_total(), 30);
    }

    #[test]
    fn test_trip_offers_round_trip() {
        let user = User::new(UserId::random(), "internalUser0", "000", "u0@tourtrack.com");
        assert!(user.trip_offers().is_empty());

        let offers = vec![PriceOffer {
            provider_name: "Holiday Travels".to_string(),
            price: 420.0,
            trip_id: uuid::Uuid::new_v4(),
        }];
        user.set_trip_offers(offers.clone());
        assert_eq!(user.trip_offers(), offers);
    }
}
