//! Profile Schema Guard
//!
//! Lazy, versioned backfill of profile fields added after a record was
//! written. Runs per request before business logic, and as a one-time bulk
//! pass over the whole collection.

pub mod guard;

pub use guard::{BackfillReport, PROFILE_SCHEMA_VERSION, ProfileSchemaGuard, schema_patch};
