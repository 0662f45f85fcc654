//! Lokma Core - schema-evolution and normalization layer
//!
//! # Architecture Overview
//!
//! This crate is the core of the Lokma food-ordering marketplace backend.
//! It owns the three concerns every request path funnels through:
//!
//! - **Profile schema guard** (`profile`): lazy, versioned backfill of
//!   missing profile fields on first touch per request
//! - **Order normalizer** (`normalize`): pure reconciliation of legacy
//!   order shapes into the canonical representation
//! - **Rating aggregator** (`rating`): write-boundary invariants plus the
//!   explicit post-write recompute of restaurant rating summaries
//!
//! The HTTP surface, session handling, and outbound email live in separate
//! services and call in through these modules.
//!
//! # Module Structure
//!
//! ```text
//! lokma-server/src/
//! ├── core/          # configuration
//! ├── utils/         # logging, time coercion
//! ├── db/            # embedded document store, repositories
//! ├── normalize/     # order normalization
//! ├── profile/       # profile schema guard
//! └── rating/        # rating write boundary + aggregate recompute
//! ```

pub mod core;
pub mod db;
pub mod normalize;
pub mod profile;
pub mod rating;
pub mod utils;

// Re-export public types
pub use crate::core::Config;
pub use crate::db::DbService;
pub use crate::normalize::normalize_order;
pub use crate::profile::{BackfillReport, ProfileSchemaGuard};
pub use crate::rating::{RatingAggregator, RatingService};

// Re-export unified error types from shared
pub use shared::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use crate::utils::logger::{init_logger, init_logger_with_file};
