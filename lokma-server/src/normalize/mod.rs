//! Order Normalization
//!
//! Pure reconciliation of every historical order shape into the canonical
//! representation. No I/O; the storage read paths call through here before
//! returning an order to any consumer.

pub mod order;

pub use order::{LegacyLineItems, normalize_order};
