//! Profile Repository

use super::{BaseRepository, RepoResult};
use serde_json::{Map, Value, json};
use shared::models::{UserProfile, UserProfileUpdate};
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const PROFILE_TABLE: &str = "profile";

#[derive(Clone)]
pub struct ProfileRepository {
    base: BaseRepository,
}

impl ProfileRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Fetch the raw profile document for shape inspection
    ///
    /// The schema guard works on the stored document as-is, before any
    /// typed deserialization fills defaults in.
    pub async fn find_raw(&self, user_id: &str) -> RepoResult<Option<Value>> {
        let docs: Vec<Value> = self
            .base
            .db()
            .query("SELECT * OMIT id FROM profile WHERE _id = $id LIMIT 1")
            .bind(("id", user_id.to_string()))
            .await?
            .take(0)?;
        Ok(docs.into_iter().next())
    }

    /// Fetch a profile in its typed form (post-guard read path)
    pub async fn find_by_id(&self, user_id: &str) -> RepoResult<Option<UserProfile>> {
        let profiles: Vec<UserProfile> = self
            .base
            .db()
            .query("SELECT * OMIT id FROM profile WHERE _id = $id LIMIT 1")
            .bind(("id", user_id.to_string()))
            .await?
            .take(0)?;
        Ok(profiles.into_iter().next())
    }

    /// Fetch every profile document raw (bulk backfill pass)
    pub async fn find_all_raw(&self) -> RepoResult<Vec<Value>> {
        let docs: Vec<Value> = self
            .base
            .db()
            .query("SELECT * OMIT id FROM profile")
            .await?
            .take(0)?;
        Ok(docs)
    }

    /// Persist only the given fields via a partial update
    pub async fn merge(&self, user_id: &str, patch: Map<String, Value>) -> RepoResult<()> {
        self.base
            .db()
            .query("UPDATE profile MERGE $patch WHERE _id = $id")
            .bind(("patch", Value::Object(patch)))
            .bind(("id", user_id.to_string()))
            .await?
            .check()?;
        Ok(())
    }

    /// Apply an explicit profile update (favorite/notification operations)
    pub async fn update(
        &self,
        user_id: &str,
        data: UserProfileUpdate,
    ) -> RepoResult<Option<UserProfile>> {
        let mut patch = Map::new();
        if let Some(v) = data.name {
            patch.insert("name".to_string(), json!(v));
        }
        if let Some(v) = data.phone {
            patch.insert("phone".to_string(), json!(v));
        }
        if let Some(v) = data.favorite_restaurants {
            patch.insert("favoriteRestaurants".to_string(), json!(v));
        }
        if let Some(v) = data.notification_preferences {
            patch.insert("notificationPreferences".to_string(), json!(v));
        }

        if !patch.is_empty() {
            self.merge(user_id, patch).await?;
        }
        self.find_by_id(user_id).await
    }

    /// Insert a profile document as-is (signup and import paths)
    pub async fn create_raw(&self, doc: Value) -> RepoResult<()> {
        self.base
            .db()
            .query(format!("CREATE {PROFILE_TABLE} CONTENT $doc"))
            .bind(("doc", doc))
            .await?
            .check()?;
        Ok(())
    }
}
