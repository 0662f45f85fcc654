//! Restaurant Repository

use super::{BaseRepository, RepoError, RepoResult};
use serde_json::Value;
use shared::models::{RatingSummary, Restaurant};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const RESTAURANT_TABLE: &str = "restaurant";

#[derive(Clone)]
pub struct RestaurantRepository {
    base: BaseRepository,
}

impl RestaurantRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    pub async fn find_by_id(&self, restaurant_id: &str) -> RepoResult<Option<Restaurant>> {
        let restaurants: Vec<Restaurant> = self
            .base
            .db()
            .query("SELECT * OMIT id FROM restaurant WHERE _id = $id LIMIT 1")
            .bind(("id", restaurant_id.to_string()))
            .await?
            .take(0)?;
        Ok(restaurants.into_iter().next())
    }

    /// Identifiers of every restaurant (full recompute pass)
    pub async fn all_ids(&self) -> RepoResult<Vec<String>> {
        let ids: Vec<String> = self
            .base
            .db()
            .query("SELECT VALUE _id FROM restaurant")
            .await?
            .take(0)?;
        Ok(ids)
    }

    /// Persist the derived rating aggregate via a partial update
    ///
    /// Only the three aggregate fields are touched.
    pub async fn merge_rating_summary(
        &self,
        restaurant_id: &str,
        summary: &RatingSummary,
    ) -> RepoResult<()> {
        let patch = serde_json::to_value(summary)
            .map_err(|e| RepoError::Validation(format!("Unserializable summary: {e}")))?;
        let updated: Vec<Value> = self
            .base
            .db()
            .query("UPDATE restaurant MERGE $patch WHERE _id = $id RETURN AFTER")
            .bind(("patch", patch))
            .bind(("id", restaurant_id.to_string()))
            .await?
            .take(0)?;
        if updated.is_empty() {
            return Err(RepoError::NotFound(format!(
                "Restaurant {} not found",
                restaurant_id
            )));
        }
        Ok(())
    }

    /// Insert a restaurant document (onboarding and import paths)
    pub async fn create(&self, restaurant: &Restaurant) -> RepoResult<()> {
        let doc = serde_json::to_value(restaurant)
            .map_err(|e| RepoError::Validation(format!("Unserializable restaurant: {e}")))?;
        self.base
            .db()
            .query(format!("CREATE {RESTAURANT_TABLE} CONTENT $doc"))
            .bind(("doc", doc))
            .await?
            .check()?;
        Ok(())
    }
}
