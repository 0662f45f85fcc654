//! Rating Repository

use super::{BaseRepository, RepoError, RepoResult};
use serde::Deserialize;
use serde_json::Value;
use shared::models::Rating;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const RATING_TABLE: &str = "rating";

/// One row of the per-value aggregation
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ValueBucket {
    pub value: i64,
    pub count: i64,
}

#[derive(Clone)]
pub struct RatingRepository {
    base: BaseRepository,
}

impl RatingRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Insert a new rating
    ///
    /// The unique `orderId` index turns a concurrent double-write into a
    /// [`RepoError::Duplicate`].
    pub async fn create(&self, rating: &Rating) -> RepoResult<Rating> {
        let doc = serde_json::to_value(rating)
            .map_err(|e| RepoError::Validation(format!("Unserializable rating: {e}")))?;
        self.base
            .db()
            .query(format!("CREATE {RATING_TABLE} CONTENT $doc"))
            .bind(("doc", doc))
            .await?
            .check()?;
        Ok(rating.clone())
    }

    /// Whether the order has already been rated
    pub async fn exists_for_order(&self, order_id: &str) -> RepoResult<bool> {
        let found: Vec<Value> = self
            .base
            .db()
            .query("SELECT _id FROM rating WHERE orderId = $id LIMIT 1")
            .bind(("id", order_id.to_string()))
            .await?
            .take(0)?;
        Ok(!found.is_empty())
    }

    /// Public ratings for a restaurant, newest first
    pub async fn find_public_by_restaurant(&self, restaurant_id: &str) -> RepoResult<Vec<Rating>> {
        let ratings: Vec<Rating> = self
            .base
            .db()
            .query(
                "SELECT * OMIT id FROM rating \
                 WHERE restaurantId = $id AND isPublic = true \
                 ORDER BY createdAt DESC",
            )
            .bind(("id", restaurant_id.to_string()))
            .await?
            .take(0)?;
        Ok(ratings)
    }

    /// Count public ratings per value for a restaurant
    ///
    /// This is the full rescan the aggregate is derived from.
    pub async fn public_value_counts(&self, restaurant_id: &str) -> RepoResult<Vec<ValueBucket>> {
        // count() first: a leading `value` would parse as a SELECT VALUE form
        let buckets: Vec<ValueBucket> = self
            .base
            .db()
            .query(
                "SELECT count() AS count, value FROM rating \
                 WHERE restaurantId = $id AND isPublic = true \
                 GROUP BY value",
            )
            .bind(("id", restaurant_id.to_string()))
            .await?
            .take(0)?;
        Ok(buckets)
    }
}
