//! Rating write boundary and aggregate maintenance
//!
//! Ratings are the only place this layer rejects writes: one rating per
//! order, at most one photo, value within 1-5. After a durable write, the
//! restaurant's derived summary is recomputed from a full rescan as an
//! explicit pipeline step.

pub mod aggregator;
pub mod service;

pub use aggregator::{RatingAggregator, RecomputeReport, summarize};
pub use service::RatingService;
