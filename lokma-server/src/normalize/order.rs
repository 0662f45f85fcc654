//! Order Normalizer
//!
//! Orders were written by three generations of clients and exist in three
//! line-item layouts:
//! - an `items` list (current)
//! - a `packages` list with renamed fields (`packageName` instead of `name`)
//! - a singular `package` struct with the quantity at the order level
//!
//! On top of that, identifiers may be stored as strings, numbers, or
//! reference objects, and timestamps as strings, epoch millis, or `$date`
//! wrappers. This module maps all of it onto the canonical shape.
//!
//! Uses rust_decimal for money arithmetic.

use crate::utils::time::{coerce_rfc3339, coerce_rfc3339_opt};
use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use serde_json::Value;
use shared::models::{Order, OrderCustomer, OrderItem, OrderRestaurant};

/// Rounding strategy for monetary values (2 decimal places, half-up)
const DECIMAL_PLACES: u32 = 2;

// ==================== Coercion Helpers ====================

/// Convert f64 to Decimal for calculation
#[inline]
fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// Convert Decimal back to f64 for the wire, rounded to 2 decimal places
#[inline]
fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// Treat explicit nulls the same as absent fields
fn field<'a>(doc: &'a Value, key: &str) -> Option<&'a Value> {
    doc.get(key).filter(|v| !v.is_null())
}

/// Coerce a numeric field stored as a number or a numeric string
fn coerce_number(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Coerce an identifier stored as a string, a number, or a reference object
fn coerce_id(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(map) => coerce_id(map.get("$oid")).or_else(|| coerce_id(map.get("id"))),
        _ => None,
    }
}

/// Coerce a free-text field, accepting stray numbers
fn coerce_string(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

// ==================== Legacy Dispatch ====================

/// The known legacy line-item layouts, detected once per document
#[derive(Debug, Clone, PartialEq)]
pub enum LegacyLineItems<'a> {
    /// Current layout: an `items` list
    Items(&'a Vec<Value>),
    /// Renamed layout: a `packages` list
    Packages(&'a Vec<Value>),
    /// Singular layout: one `package` struct, quantity at the order level
    Single { package: &'a Value, quantity: i64 },
    /// No recognizable line-item representation
    None,
}

impl<'a> LegacyLineItems<'a> {
    /// Dispatch on the first non-empty representation, in priority order
    pub fn detect(doc: &'a Value) -> Self {
        if let Some(Value::Array(items)) = field(doc, "items")
            && !items.is_empty()
        {
            return Self::Items(items);
        }
        if let Some(Value::Array(packages)) = field(doc, "packages")
            && !packages.is_empty()
        {
            return Self::Packages(packages);
        }
        if let Some(package) = field(doc, "package")
            && package.is_object()
        {
            let quantity = coerce_number(field(doc, "quantity"))
                .map(|q| q as i64)
                .filter(|q| *q > 0)
                .unwrap_or(1);
            return Self::Single { package, quantity };
        }
        Self::None
    }
}

// ==================== Item Mapping ====================

/// Map one line-item element
///
/// `name_key` selects the layout's name field; `quantity_override` carries
/// the order-level quantity of the singular layout.
fn map_item(raw: &Value, name_key: &str, quantity_override: Option<i64>) -> OrderItem {
    let price = coerce_number(field(raw, "price")).unwrap_or(0.0);
    // A missing original price means the item was never discounted
    let original_price = coerce_number(field(raw, "originalPrice")).unwrap_or(price);
    let quantity = quantity_override
        .or_else(|| coerce_number(field(raw, "quantity")).map(|q| q as i64))
        .filter(|q| *q > 0)
        .unwrap_or(1);
    let total = coerce_number(field(raw, "total"))
        .unwrap_or_else(|| to_f64(to_decimal(price) * Decimal::from(quantity)));

    OrderItem {
        package_id: coerce_id(field(raw, "packageId"))
            .or_else(|| coerce_id(field(raw, "_id")))
            .unwrap_or_default(),
        name: coerce_string(field(raw, name_key))
            .or_else(|| coerce_string(field(raw, "name")))
            .unwrap_or_default(),
        description: coerce_string(field(raw, "description")).unwrap_or_default(),
        original_price,
        price,
        quantity,
        total,
    }
}

fn map_customer(doc: &Value) -> OrderCustomer {
    match field(doc, "customer") {
        Some(c) => OrderCustomer {
            id: coerce_id(field(c, "id"))
                .or_else(|| coerce_id(field(c, "_id")))
                .unwrap_or_default(),
            name: coerce_string(field(c, "name")).unwrap_or_default(),
            email: coerce_string(field(c, "email")).unwrap_or_default(),
            phone: coerce_string(field(c, "phone")).unwrap_or_default(),
        },
        None => OrderCustomer::default(),
    }
}

fn map_restaurant(doc: &Value) -> OrderRestaurant {
    match field(doc, "restaurant") {
        Some(r) => OrderRestaurant {
            id: coerce_id(field(r, "id"))
                .or_else(|| coerce_id(field(r, "_id")))
                .unwrap_or_default(),
            name: coerce_string(field(r, "name")).unwrap_or_default(),
            address: coerce_string(field(r, "address")).unwrap_or_default(),
        },
        None => OrderRestaurant::default(),
    }
}

/// Legacy order-total fallbacks, consulted only when the item sum is zero
fn legacy_total_price(doc: &Value) -> f64 {
    coerce_number(field(doc, "totalPrice"))
        .or_else(|| field(doc, "pricing").and_then(|p| coerce_number(field(p, "total"))))
        .or_else(|| coerce_number(field(doc, "totalAmount")))
        .map(|v| to_f64(to_decimal(v)))
        .unwrap_or(0.0)
}

// ==================== Normalization ====================

/// Normalize any stored order document into the canonical shape
///
/// Pure function: no I/O. `now` supplies the fallback for missing
/// timestamps so callers control the clock.
///
/// # Guarantees
/// - Every canonical field is present and correctly typed, whatever the
///   input looked like; an unrecognizable document yields an empty item
///   list with zero totals, never an error.
/// - `total == price * quantity` for every item unless the source already
///   supplied a total.
/// - Normalizing the function's own output reproduces it unchanged.
pub fn normalize_order(doc: &Value, now: DateTime<Utc>) -> Order {
    let items: Vec<OrderItem> = match LegacyLineItems::detect(doc) {
        LegacyLineItems::Items(raw) => raw.iter().map(|i| map_item(i, "name", None)).collect(),
        LegacyLineItems::Packages(raw) => {
            raw.iter().map(|i| map_item(i, "packageName", None)).collect()
        }
        LegacyLineItems::Single { package, quantity } => {
            vec![map_item(package, "name", Some(quantity))]
        }
        LegacyLineItems::None => vec![],
    };

    let items_total = items
        .iter()
        .fold(Decimal::ZERO, |acc, i| acc + to_decimal(i.total));
    let total_price = if items_total > Decimal::ZERO {
        to_f64(items_total)
    } else {
        legacy_total_price(doc)
    };

    let savings = to_f64(items.iter().fold(Decimal::ZERO, |acc, i| {
        acc + (to_decimal(i.original_price) - to_decimal(i.price)) * Decimal::from(i.quantity)
    }));

    Order {
        id: coerce_id(field(doc, "_id")).unwrap_or_default(),
        order_id: coerce_string(field(doc, "orderId")).unwrap_or_default(),
        pickup_code: coerce_string(field(doc, "pickupCode")).unwrap_or_default(),
        customer: map_customer(doc),
        restaurant: map_restaurant(doc),
        items,
        total_price,
        savings,
        payment_method: coerce_string(field(doc, "paymentMethod")).unwrap_or_default(),
        payment_status: coerce_string(field(doc, "paymentStatus")).unwrap_or_default(),
        payment_details: field(doc, "paymentDetails").cloned(),
        status: coerce_string(field(doc, "status")).unwrap_or_default(),
        created_at: coerce_rfc3339(field(doc, "createdAt"), now),
        updated_at: coerce_rfc3339(field(doc, "updatedAt"), now),
        notes: coerce_string(field(doc, "notes")),
        pickup_time: coerce_rfc3339_opt(field(doc, "pickupTime")),
        estimated_pickup_time: coerce_rfc3339_opt(field(doc, "estimatedPickupTime")),
    }
}

// ==================== Tests ====================
