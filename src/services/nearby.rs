//! Ranked nearest-attraction query
//!
//! Full catalog scan: distance plus a per-user point value for every
//! attraction, sorted ascending by distance and cut to the five closest.

use crate::domain::geo::distance_miles;
use crate::domain::types::{NearbyAttraction, Position};
use crate::error::TrackError;
use crate::io::rewards::RewardLookup;
use crate::services::catalog::AttractionCatalog;
use std::sync::Arc;
use tracing::debug;

/// Number of attractions a query returns at most
const MAX_RESULTS: usize = 5;

pub struct NearbyRanker {
    catalog: Arc<AttractionCatalog>,
    lookup: Arc<dyn RewardLookup>,
}

impl NearbyRanker {
    pub fn new(catalog: Arc<AttractionCatalog>, lookup: Arc<dyn RewardLookup>) -> Self {
        Self { catalog, lookup }
    }

    /// The closest attractions to the queried position, nearest first.
    ///
    /// Every catalog attraction is scored with one point lookup for the
    /// position's owning user; a catalog smaller than five returns whole.
    pub async fn nearby(&self, position: &Position) -> Result<Vec<NearbyAttraction>, TrackError> {
        let attractions = self.catalog.attractions().await?;
        let mut ranked = Vec::with_capacity(attractions.len());

        for attraction in attractions {
            let distance = distance_miles(position.coordinate, attraction.coordinate);
            let points = self
                .lookup
                .reward_points(attraction.id, position.user_id)
                .await?;

            ranked.push(NearbyAttraction {
                attraction_name: attraction.name,
                attraction_coordinate: attraction.coordinate,
                user_coordinate: position.coordinate,
                distance_miles: distance,
                reward_points: points,
            });
        }

        // Stable sort keeps catalog order for equal distances
        ranked.sort_by(|a, b| {
            a.distance_miles
                .partial_cmp(&b.distance_miles)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(MAX_RESULTS);

        debug!(
            user = %position.user_id,
            results = %ranked.len(),
            "nearby_attractions_ranked"
        );
        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Attraction, AttractionId, Coordinate, UserId};
    use crate::io::gps::GpsProvider;
    use async_trait::async_trait;
    use chrono::Utc;

    struct StaticGps {
        attractions: Vec<Attraction>,
    }

    #[async_trait]
    impl GpsProvider for StaticGps {
        async fn attractions(&self) -> Result<Vec<Attraction>, TrackError> {
            Ok(self.attractions.clone())
        }

        async fn user_location(&self, _user_id: UserId) -> Result<Position, TrackError> {
            unimplemented!("not used by ranking tests")
        }
    }

    struct FixedLookup;

    #[async_trait]
    impl RewardLookup for FixedLookup {
        async fn reward_points(
            &self,
            _attraction_id: AttractionId,
            _user_id: UserId,
        ) -> Result<i32, TrackError> {
            Ok(42)
        }
    }

    fn attraction_at(name: &str, lon: f64) -> Attraction {
        Attraction {
            id: AttractionId::random(),
            name: name.to_string(),
            city: "Testville".to_string(),
            state: "TS".to_string(),
            coordinate: Coordinate::new(0.0, lon),
        }
    }

    fn ranker_over(attractions: Vec<Attraction>) -> NearbyRanker {
        let catalog = Arc::new(AttractionCatalog::new(Arc::new(StaticGps { attractions })));
        NearbyRanker::new(catalog, Arc::new(FixedLookup))
    }

    fn origin_position() -> Position {
        Position::new(UserId::random(), Coordinate::new(0.0, 0.0), Utc::now())
    }

    #[tokio::test]
    async fn test_returns_five_closest_sorted_ascending() {
        // Eight attractions marching east, shuffled into the catalog
        let attractions: Vec<Attraction> = [3.0, 7.0, 1.0, 5.0, 2.0, 8.0, 4.0, 6.0]
            .iter()
            .map(|&lon| attraction_at(&format!("A{}", lon), lon))
            .collect();
        let ranker = ranker_over(attractions);

        let ranked = ranker.nearby(&origin_position()).await.unwrap();

        assert_eq!(ranked.len(), 5);
        let names: Vec<&str> = ranked.iter().map(|r| r.attraction_name.as_str()).collect();
        assert_eq!(names, vec!["A1", "A2", "A3", "A4", "A5"]);
        for pair in ranked.windows(2) {
            assert!(pair[0].distance_miles <= pair[1].distance_miles);
        }
        assert!(ranked.iter().all(|r| r.reward_points == 42));
    }

    #[tokio::test]
    async fn test_small_catalog_returns_everything() {
        let ranker = ranker_over(vec![attraction_at("A1", 1.0), attraction_at("A2", 2.0)]);

        let ranked = ranker.nearby(&origin_position()).await.unwrap();

        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].attraction_name, "A1");
    }

    #[tokio::test]
    async fn test_ties_keep_catalog_order() {
        // Same longitude offset east and west: identical distances
        let east = attraction_at("East", 1.0);
        let west = attraction_at("West", -1.0);
        let ranker = ranker_over(vec![east, west]);

        let ranked = ranker.nearby(&origin_position()).await.unwrap();

        assert_eq!(ranked[0].attraction_name, "East");
        assert_eq!(ranked[1].attraction_name, "West");
    }

    #[tokio::test]
    async fn test_record_carries_both_coordinates() {
        let ranker = ranker_over(vec![attraction_at("A1", 1.0)]);
        let position = origin_position();

        let ranked = ranker.nearby(&position).await.unwrap();

        assert_eq!(ranked[0].user_coordinate, position.coordinate);
        assert_eq!(ranked[0].attraction_coordinate, Coordinate::new(0.0, 1.0));
    }
}
