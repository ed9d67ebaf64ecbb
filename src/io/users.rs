//! User repository - injected storage abstraction
//!
//! Production deployments back this with a real store; the in-memory
//! implementation doubles as the home of the synthetic internal-user
//! population used by the demo binary.

use crate::domain::types::{Coordinate, Position, UserId};
use crate::domain::user::User;
use crate::io::gps::MAX_LATITUDE;
use chrono::{Duration as ChronoDuration, Utc};
use parking_lot::RwLock;
use rand::Rng;
use rustc_hash::FxHashMap;
use std::sync::Arc;
use tracing::debug;

pub trait UserRepository: Send + Sync {
    /// Look up a user by user name
    fn get(&self, user_name: &str) -> Option<Arc<User>>;

    /// Register a user; a name already present is left untouched
    fn add(&self, user: Arc<User>);

    /// All registered users, in no particular order
    fn all(&self) -> Vec<Arc<User>>;
}

/// In-memory user store keyed by user name
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<FxHashMap<String, Arc<User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a repository seeded with `count` synthetic users, each with a
    /// short random position history (three positions within the last 30
    /// days).
    pub fn with_internal_users(count: usize) -> Self {
        let repo = Self::new();

        for i in 0..count {
            let user_name = format!("internalUser{}", i);
            let email = format!("{}@tourtrack.com", user_name);
            let user = Arc::new(User::new(UserId::random(), &user_name, "000", &email));
            seed_location_history(&user);
            repo.add(user);
        }

        debug!(count = %count, "internal_users_seeded");
        repo
    }

    pub fn user_count(&self) -> usize {
        self.users.read().len()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn get(&self, user_name: &str) -> Option<Arc<User>> {
        self.users.read().get(user_name).cloned()
    }

    fn add(&self, user: Arc<User>) {
        self.users
            .write()
            .entry(user.user_name().to_string())
            .or_insert(user);
    }

    fn all(&self) -> Vec<Arc<User>> {
        self.users.read().values().cloned().collect()
    }
}

fn seed_location_history(user: &Arc<User>) {
    let mut rng = rand::thread_rng();

    for _ in 0..3 {
        let coordinate = Coordinate::new(
            rng.gen_range(-MAX_LATITUDE..MAX_LATITUDE),
            rng.gen_range(-180.0..180.0),
        );
        let recorded_at = Utc::now() - ChronoDuration::days(rng.gen_range(0..30));
        user.add_position(Position::new(user.id(), coordinate, recorded_at));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get() {
        let repo = InMemoryUserRepository::new();
        let user = Arc::new(User::new(UserId::random(), "jon", "000", "jon@tourtrack.com"));
        repo.add(user.clone());

        let found = repo.get("jon").unwrap();
        assert_eq!(found.id(), user.id());
        assert!(repo.get("nobody").is_none());
    }

    #[test]
    fn test_add_does_not_replace_existing_name() {
        let repo = InMemoryUserRepository::new();
        let first = Arc::new(User::new(UserId::random(), "jon", "000", "jon@tourtrack.com"));
        let second = Arc::new(User::new(UserId::random(), "jon", "111", "jon2@tourtrack.com"));

        repo.add(first.clone());
        repo.add(second);

        assert_eq!(repo.user_count(), 1);
        assert_eq!(repo.get("jon").unwrap().id(), first.id());
    }

    #[test]
    fn test_internal_users_have_history() {
        let repo = InMemoryUserRepository::with_internal_users(5);
        let users = repo.all();
        assert_eq!(users.len(), 5);

        for user in users {
            assert_eq!(user.positions().len(), 3);
            assert!(user.rewards().is_empty());
        }
    }
}
