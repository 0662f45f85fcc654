//! Profile schema detection and backfill
//!
//! The profile schema grew field by field: favorites, push tokens, in-app
//! notifications, then per-channel notification preferences. Records predate
//! each addition, so every read path runs through the guard first and
//! backfills whatever the record is missing via a partial update.

use crate::db::repository::ProfileRepository;
use serde_json::{Map, Value, json};
use shared::models::NotificationPreferences;
use shared::{AppError, AppResult};

/// Current profile schema version, stamped with every backfill write
pub const PROFILE_SCHEMA_VERSION: u32 = 3;

// ==================== Shape Check ====================

/// The defaults contract for `notificationPreferences`
fn default_preferences() -> Map<String, Value> {
    serde_json::to_value(NotificationPreferences::default())
        .ok()
        .and_then(|v| v.as_object().cloned())
        .unwrap_or_default()
}

/// Compute the partial update bringing a profile document up to the current
/// schema, or `None` when the record already conforms
///
/// Pure function: the per-request guard and the bulk backfill pass both run
/// records through here. The patch contains only the fields that change,
/// plus the version stamp.
pub fn schema_patch(doc: &Value) -> Option<Map<String, Value>> {
    // Fast path: stamped by a previous backfill
    if let Some(version) = doc.get("schemaVersion").and_then(Value::as_u64)
        && version >= u64::from(PROFILE_SCHEMA_VERSION)
    {
        return None;
    }

    let mut patch = Map::new();

    match doc.get("favoriteRestaurants") {
        Some(Value::Array(_)) => {}
        // The oldest records stored a single favorite: keep it, wrapped
        Some(scalar @ (Value::String(_) | Value::Number(_))) => {
            patch.insert("favoriteRestaurants".to_string(), json!([scalar]));
        }
        _ => {
            patch.insert("favoriteRestaurants".to_string(), json!([]));
        }
    }

    for key in ["pushTokens", "inAppNotifications"] {
        if !matches!(doc.get(key), Some(Value::Array(_))) {
            patch.insert(key.to_string(), json!([]));
        }
    }

    match doc.get("notificationPreferences") {
        Some(Value::Object(prefs)) => {
            // Fill flags added after the record was written
            let mut merged = prefs.clone();
            let mut changed = false;
            for (key, value) in default_preferences() {
                if !merged.get(&key).is_some_and(Value::is_boolean) {
                    merged.insert(key, value);
                    changed = true;
                }
            }
            if changed {
                patch.insert("notificationPreferences".to_string(), Value::Object(merged));
            }
        }
        _ => {
            patch.insert(
                "notificationPreferences".to_string(),
                Value::Object(default_preferences()),
            );
        }
    }

    if patch.is_empty() {
        return None;
    }
    patch.insert("schemaVersion".to_string(), json!(PROFILE_SCHEMA_VERSION));
    Some(patch)
}

// ==================== Guard ====================

/// Outcome of a bulk backfill pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillReport {
    pub scanned: u64,
    pub patched: u64,
    pub failed: u64,
}

/// Ensures a profile record exposes every currently-expected field
#[derive(Clone)]
pub struct ProfileSchemaGuard {
    profiles: ProfileRepository,
}

impl ProfileSchemaGuard {
    pub fn new(profiles: ProfileRepository) -> Self {
        Self { profiles }
    }

    /// Bring one profile up to the current schema, if needed
    ///
    /// Runs before business logic on every authenticated request. Read and
    /// write errors are logged and swallowed so the request proceeds against
    /// the record as stored. Concurrent callers may both compute the same
    /// patch; the merge is convergent, last write wins.
    pub async fn ensure(&self, user_id: &str) {
        let doc = match self.profiles.find_raw(user_id).await {
            Ok(Some(doc)) => doc,
            Ok(None) => {
                tracing::warn!(user_id, "Profile missing, schema guard skipped");
                return;
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "Profile read failed, schema guard skipped");
                return;
            }
        };

        let Some(patch) = schema_patch(&doc) else {
            return;
        };

        tracing::debug!(user_id, fields = patch.len(), "Backfilling profile schema fields");
        if let Err(e) = self.profiles.merge(user_id, patch).await {
            tracing::warn!(user_id, error = %e, "Profile backfill write failed");
        }
    }

    /// One-time bulk pass over every profile record
    ///
    /// Reuses the per-record detection-and-default logic unchanged.
    /// Per-record failures are logged and counted; the pass continues.
    pub async fn backfill_all(&self) -> AppResult<BackfillReport> {
        let docs = self.profiles.find_all_raw().await.map_err(AppError::from)?;
        let mut report = BackfillReport::default();

        for doc in docs {
            report.scanned += 1;
            let Some(user_id) = doc.get("_id").and_then(Value::as_str) else {
                report.failed += 1;
                tracing::warn!("Profile document without _id skipped");
                continue;
            };
            let Some(patch) = schema_patch(&doc) else {
                continue;
            };
            match self.profiles.merge(user_id, patch).await {
                Ok(()) => report.patched += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::warn!(user_id, error = %e, "Profile backfill write failed");
                }
            }
        }

        tracing::info!(
            scanned = report.scanned,
            patched = report.patched,
            failed = report.failed,
            "Profile backfill pass complete"
        );
        Ok(report)
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    /// Apply a patch the way the store's MERGE does (top-level fields)
    fn apply(doc: &Value, patch: Map<String, Value>) -> Value {
        let mut merged = doc.as_object().cloned().unwrap_or_default();
        for (key, value) in patch {
            merged.insert(key, value);
        }
        Value::Object(merged)
    }

    #[test]
    fn test_bare_record_gets_all_defaults() {
        let doc = json!({"_id": "user-1", "name": "Ayşe", "email": "a@example.com"});
        let patch = schema_patch(&doc).unwrap();

        assert_eq!(patch["favoriteRestaurants"], json!([]));
        assert_eq!(patch["pushTokens"], json!([]));
        assert_eq!(patch["inAppNotifications"], json!([]));
        assert_eq!(
            patch["notificationPreferences"],
            json!({"push": true, "email": true, "favorites": true, "proximity": true, "promotions": true})
        );
        assert_eq!(patch["schemaVersion"], json!(PROFILE_SCHEMA_VERSION));
    }

    #[test]
    fn test_conforming_record_produces_no_patch() {
        let doc = json!({
            "_id": "user-1",
            "favoriteRestaurants": ["rest-1"],
            "pushTokens": [],
            "inAppNotifications": [],
            "notificationPreferences": {"push": true, "email": true, "favorites": true, "proximity": true, "promotions": true}
        });
        assert_eq!(schema_patch(&doc), None);
    }

    #[test]
    fn test_version_stamp_short_circuits() {
        let doc = json!({"_id": "user-1", "schemaVersion": PROFILE_SCHEMA_VERSION});
        assert_eq!(schema_patch(&doc), None);
    }

    #[test]
    fn test_scalar_favorite_wrapped_not_dropped() {
        // Single-favorite era record
        let doc = json!({"_id": "user-1", "favoriteRestaurants": "rest-42"});
        let patch = schema_patch(&doc).unwrap();
        assert_eq!(patch["favoriteRestaurants"], json!(["rest-42"]));
    }

    #[test]
    fn test_wrong_kind_collection_defaulted() {
        let doc = json!({"_id": "user-1", "pushTokens": "not-a-list", "inAppNotifications": 7});
        let patch = schema_patch(&doc).unwrap();
        assert_eq!(patch["pushTokens"], json!([]));
        assert_eq!(patch["inAppNotifications"], json!([]));
    }

    #[test]
    fn test_missing_preference_flags_filled_existing_kept() {
        let doc = json!({
            "_id": "user-1",
            "favoriteRestaurants": [],
            "pushTokens": [],
            "inAppNotifications": [],
            "notificationPreferences": {"push": false, "email": true}
        });
        let patch = schema_patch(&doc).unwrap();
        let prefs = &patch["notificationPreferences"];
        assert_eq!(prefs["push"], false);
        assert_eq!(prefs["email"], true);
        assert_eq!(prefs["favorites"], true);
        assert_eq!(prefs["proximity"], true);
        assert_eq!(prefs["promotions"], true);
    }

    #[test]
    fn test_patch_is_idempotent() {
        let doc = json!({"_id": "user-1", "favoriteRestaurants": "rest-42"});
        let patch = schema_patch(&doc).unwrap();
        let migrated = apply(&doc, patch);

        // The corrected record needs no second write
        assert_eq!(schema_patch(&migrated), None);
    }
}
