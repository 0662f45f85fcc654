//! User Profile Model

use super::default_true;
use serde::{Deserialize, Serialize};

/// Prefix of push tokens issued under the currently supported scheme (Expo).
///
/// Entries from the retired scheme stay in `pushTokens` with
/// `isActive = false`; nothing in this layer rewrites or deletes them.
pub const SUPPORTED_TOKEN_PREFIX: &str = "ExponentPushToken[";

/// Notification preference flags
///
/// Contract: every flag defaults to `true`, including on records created
/// before the flag existed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotificationPreferences {
    #[serde(default = "default_true")]
    pub push: bool,
    #[serde(default = "default_true")]
    pub email: bool,
    #[serde(default = "default_true")]
    pub favorites: bool,
    #[serde(default = "default_true")]
    pub proximity: bool,
    #[serde(default = "default_true")]
    pub promotions: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        Self {
            push: true,
            email: true,
            favorites: true,
            proximity: true,
            promotions: true,
        }
    }
}

/// Push token entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PushToken {
    pub token: String,
    /// Device platform: "ios" | "android"
    pub platform: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_used_at: Option<String>,
}

/// In-app notification record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InAppNotification {
    pub id: String,
    pub title: String,
    pub body: String,
    #[serde(default)]
    pub read: bool,
    pub created_at: String,
}

/// User profile entity
///
/// Once read through the schema guard, all four optional collections/structs
/// are present with their correctly-typed defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Favorited restaurant ids (set semantics, order irrelevant)
    #[serde(default)]
    pub favorite_restaurants: Vec<String>,
    #[serde(default)]
    pub push_tokens: Vec<PushToken>,
    #[serde(default)]
    pub in_app_notifications: Vec<InAppNotification>,
    #[serde(default)]
    pub notification_preferences: NotificationPreferences,
    /// Stamped by the schema guard on backfill
    #[serde(default)]
    pub schema_version: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl UserProfile {
    /// Tokens eligible for push dispatch: active entries of the supported
    /// scheme. Legacy-scheme entries are skipped, never reinterpreted.
    pub fn active_push_tokens(&self) -> Vec<&PushToken> {
        self.push_tokens
            .iter()
            .filter(|t| t.is_active && t.token.starts_with(SUPPORTED_TOKEN_PREFIX))
            .collect()
    }
}

/// Update profile payload (explicit favorite/notification operations)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserProfileUpdate {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub favorite_restaurants: Option<Vec<String>>,
    pub notification_preferences: Option<NotificationPreferences>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(token: &str, active: bool) -> PushToken {
        PushToken {
            token: token.to_string(),
            platform: "ios".to_string(),
            is_active: active,
            last_used_at: None,
        }
    }

    #[test]
    fn test_notification_preferences_default_all_true() {
        let prefs = NotificationPreferences::default();
        assert!(prefs.push && prefs.email && prefs.favorites && prefs.proximity && prefs.promotions);
    }

    #[test]
    fn test_notification_preferences_missing_flags_deserialize_true() {
        // Record written before the promotions flag existed
        let prefs: NotificationPreferences =
            serde_json::from_str(r#"{"push":false,"email":true}"#).unwrap();
        assert!(!prefs.push);
        assert!(prefs.email);
        assert!(prefs.favorites);
        assert!(prefs.proximity);
        assert!(prefs.promotions);
    }

    #[test]
    fn test_active_push_tokens_filters_inactive_and_legacy_scheme() {
        let profile = UserProfile {
            id: "user-1".to_string(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            phone: None,
            favorite_restaurants: vec![],
            push_tokens: vec![
                token("ExponentPushToken[aaa]", true),
                token("ExponentPushToken[bbb]", false),
                // Retired scheme, marked inactive by the external migration
                token("fcm:legacy-token", false),
                // Retired scheme that was never migrated: still excluded
                token("fcm:other-token", true),
            ],
            in_app_notifications: vec![],
            notification_preferences: NotificationPreferences::default(),
            schema_version: 0,
            created_at: None,
        };

        let active = profile.active_push_tokens();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].token, "ExponentPushToken[aaa]");
    }

    #[test]
    fn test_profile_wire_field_names() {
        let profile = UserProfile {
            id: "user-1".to_string(),
            name: "Test".to_string(),
            email: "test@example.com".to_string(),
            phone: None,
            favorite_restaurants: vec!["rest-1".to_string()],
            push_tokens: vec![],
            in_app_notifications: vec![],
            notification_preferences: NotificationPreferences::default(),
            schema_version: 3,
            created_at: None,
        };

        let json = serde_json::to_value(&profile).unwrap();
        assert_eq!(json["_id"], "user-1");
        assert!(json["favoriteRestaurants"].is_array());
        assert!(json["pushTokens"].is_array());
        assert!(json["inAppNotifications"].is_array());
        assert_eq!(json["notificationPreferences"]["promotions"], true);
        assert_eq!(json["schemaVersion"], 3);
    }
}
