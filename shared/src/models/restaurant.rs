//! Restaurant Model

use super::default_true;
use super::rating::RatingSummary;
use serde::{Deserialize, Serialize};

/// Restaurant entity
///
/// The rating fields form the derived aggregate maintained by the rating
/// recompute step; they are never hand-incremented.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Mean public rating, one decimal
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rating_count: i64,
    /// Count per integer score 1-5
    #[serde(default)]
    pub rating_distribution: [i64; 5],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl Restaurant {
    /// The derived aggregate currently stored on this record
    pub fn rating_summary(&self) -> RatingSummary {
        RatingSummary {
            rating: self.rating,
            rating_count: self.rating_count,
            rating_distribution: self.rating_distribution,
        }
    }
}
