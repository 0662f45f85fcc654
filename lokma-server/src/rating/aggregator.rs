//! Rating Aggregator
//!
//! Maintains the derived rating summary on restaurant records: mean value
//! (one decimal), total count, and the 5-bucket distribution. The summary
//! is always derived from a full rescan of the restaurant's public ratings,
//! never hand-incremented, so concurrent writers converge on the rating set
//! regardless of interleaving.

use crate::db::repository::{RatingRepository, RestaurantRepository, rating::ValueBucket};
use rust_decimal::prelude::*;
use shared::AppResult;
use shared::models::RatingSummary;

// ==================== Summary Calculation ====================

/// Derive the summary from per-value counts
///
/// Values outside 1-5 are ignored. The mean is rounded to one decimal,
/// midpoint away from zero.
pub fn summarize(buckets: &[ValueBucket]) -> RatingSummary {
    let mut distribution = [0i64; 5];
    for bucket in buckets {
        if (1..=5).contains(&bucket.value) {
            distribution[(bucket.value - 1) as usize] += bucket.count;
        }
    }

    let count: i64 = distribution.iter().sum();
    if count == 0 {
        return RatingSummary::default();
    }

    let weighted: i64 = distribution
        .iter()
        .enumerate()
        .map(|(i, c)| (i as i64 + 1) * c)
        .sum();
    let average = (Decimal::from(weighted) / Decimal::from(count))
        .round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default();

    RatingSummary {
        rating: average,
        rating_count: count,
        rating_distribution: distribution,
    }
}

// ==================== Aggregator ====================

/// Outcome of a full recompute sweep
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecomputeReport {
    pub scanned: u64,
    pub failed: u64,
}

#[derive(Clone)]
pub struct RatingAggregator {
    ratings: RatingRepository,
    restaurants: RestaurantRepository,
}

impl RatingAggregator {
    pub fn new(ratings: RatingRepository, restaurants: RestaurantRepository) -> Self {
        Self {
            ratings,
            restaurants,
        }
    }

    /// Recompute and persist one restaurant's aggregate
    pub async fn recompute(&self, restaurant_id: &str) -> AppResult<RatingSummary> {
        let buckets = self.ratings.public_value_counts(restaurant_id).await?;
        let summary = summarize(&buckets);
        self.restaurants
            .merge_rating_summary(restaurant_id, &summary)
            .await?;
        tracing::debug!(
            restaurant_id,
            rating = summary.rating,
            count = summary.rating_count,
            "Rating aggregate recomputed"
        );
        Ok(summary)
    }

    /// Explicit recompute pass over every restaurant
    ///
    /// Operator-invoked reconciliation; there is no scheduler. Per-restaurant
    /// failures are logged and counted, the pass continues.
    pub async fn recompute_all(&self) -> AppResult<RecomputeReport> {
        let ids = self.restaurants.all_ids().await?;
        let mut report = RecomputeReport::default();

        for restaurant_id in ids {
            report.scanned += 1;
            if let Err(e) = self.recompute(&restaurant_id).await {
                report.failed += 1;
                tracing::warn!(
                    restaurant_id = %restaurant_id,
                    error = %e,
                    "Rating aggregate recompute failed"
                );
            }
        }

        tracing::info!(
            scanned = report.scanned,
            failed = report.failed,
            "Rating recompute pass complete"
        );
        Ok(report)
    }
}

// ==================== Tests ====================
