//! Order Model (canonical shape)
//!
//! The single order representation exposed past the normalization layer.
//! Field names and types are load-bearing for every consumer: synchronous
//! API responses, push/event notifications, and background jobs all receive
//! exactly this shape.

use serde::{Deserialize, Serialize};

/// Customer sub-record, identifier always in string form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderCustomer {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
}

/// Restaurant sub-record, identifier always in string form
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRestaurant {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
}

/// Order line item
///
/// Invariant: `total == price * quantity` unless the source record already
/// supplied a total.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderItem {
    #[serde(default)]
    pub package_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub original_price: f64,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub total: f64,
}

/// Canonical order entity
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub pickup_code: String,
    #[serde(default)]
    pub customer: OrderCustomer,
    #[serde(default)]
    pub restaurant: OrderRestaurant,
    #[serde(default)]
    pub items: Vec<OrderItem>,
    /// Sum of item totals, with legacy fallbacks when `items` is empty
    #[serde(default)]
    pub total_price: f64,
    /// Sum over items of `(originalPrice - price) * quantity`
    #[serde(default)]
    pub savings: f64,
    #[serde(default)]
    pub payment_method: String,
    #[serde(default)]
    pub payment_status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_details: Option<serde_json::Value>,
    #[serde(default)]
    pub status: String,
    /// ISO-8601
    #[serde(default)]
    pub created_at: String,
    /// ISO-8601
    #[serde(default)]
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pickup_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_pickup_time: Option<String>,
}
