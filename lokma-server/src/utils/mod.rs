//! Utility module - logging and time coercion helpers

pub mod logger;
pub mod time;

pub use time::{coerce_rfc3339, coerce_rfc3339_opt};
