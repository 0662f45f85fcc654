//! Rating Model

use super::default_true;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Maximum comment length accepted at the write boundary
pub const RATING_COMMENT_MAX_LEN: usize = 500;

/// Hours after creation during which the author may still edit a rating
pub const RATING_EDIT_WINDOW_HOURS: i64 = 24;

/// Human-readable label derived from the 1-5 value
pub fn rating_text(value: u8) -> &'static str {
    match value {
        1 => "Terrible",
        2 => "Bad",
        3 => "Average",
        4 => "Good",
        5 => "Excellent",
        _ => "",
    }
}

/// Rating entity
///
/// At most one rating per order; at most one photo attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Rating {
    #[serde(rename = "_id")]
    pub id: String,
    pub order_id: String,
    pub consumer_id: String,
    pub restaurant_id: String,
    /// Integer score, 1-5
    pub value: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default = "default_true")]
    pub is_public: bool,
    /// Derived label, see [`rating_text`]
    #[serde(default)]
    pub rating_text: String,
    /// ISO-8601
    pub created_at: String,
}

impl Rating {
    /// Whether the author may still edit this rating at `now`.
    ///
    /// The capability check itself lives outside this layer; it consumes
    /// `createdAt` through this helper. An unparseable timestamp closes the
    /// window.
    pub fn is_editable_at(&self, now: DateTime<Utc>) -> bool {
        match DateTime::parse_from_rfc3339(&self.created_at) {
            Ok(created) => {
                now.signed_duration_since(created.with_timezone(&Utc))
                    < Duration::hours(RATING_EDIT_WINDOW_HOURS)
            }
            Err(_) => false,
        }
    }
}

/// Create rating payload, validated at the write boundary
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RatingCreate {
    pub order_id: String,
    pub consumer_id: String,
    pub restaurant_id: String,
    #[validate(range(min = 1, max = 5))]
    pub value: u8,
    #[validate(length(max = 500))]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// At most one photo attachment
    #[validate(length(max = 1))]
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default = "default_true")]
    pub is_public: bool,
}

/// Derived rating summary persisted onto the restaurant record
///
/// Always recomputed from the full public rating set, never hand-incremented.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Mean value rounded to one decimal
    pub rating: f64,
    pub rating_count: i64,
    /// Count per integer score 1-5
    pub rating_distribution: [i64; 5],
}
