//! Rating Write Boundary
//!
//! Create path for ratings: field validation, the one-rating-per-order and
//! single-photo invariants, the durable write, then the explicit
//! aggregate-recompute step.

use super::RatingAggregator;
use crate::db::repository::{RatingRepository, RepoError};
use crate::utils::time::to_wire;
use chrono::Utc;
use shared::models::{RATING_COMMENT_MAX_LEN, Rating, RatingCreate, rating_text};
use shared::{AppError, AppResult, ErrorCode};
use validator::Validate;

#[derive(Clone)]
pub struct RatingService {
    ratings: RatingRepository,
    aggregator: RatingAggregator,
}

impl RatingService {
    pub fn new(ratings: RatingRepository, aggregator: RatingAggregator) -> Self {
        Self {
            ratings,
            aggregator,
        }
    }

    /// Create a rating and refresh the restaurant's aggregate
    ///
    /// Invariant violations (value outside 1-5, over-long comment, second
    /// photo, already-rated order) are rejected synchronously with a
    /// descriptive error. A failed recompute is logged and never rolls back
    /// the rating write; the aggregate converges on the next successful
    /// write or an explicit recompute pass.
    pub async fn create(&self, data: RatingCreate) -> AppResult<Rating> {
        if let Err(errors) = data.validate() {
            return Err(validation_error(&errors));
        }

        if self
            .ratings
            .exists_for_order(&data.order_id)
            .await
            .map_err(AppError::from)?
        {
            return Err(AppError::new(ErrorCode::RatingAlreadyExists)
                .with_detail("orderId", data.order_id.clone()));
        }

        let rating = Rating {
            id: uuid::Uuid::new_v4().to_string(),
            order_id: data.order_id,
            consumer_id: data.consumer_id,
            restaurant_id: data.restaurant_id,
            value: data.value,
            comment: data.comment,
            photos: data.photos,
            is_public: data.is_public,
            rating_text: rating_text(data.value).to_string(),
            created_at: to_wire(Utc::now()),
        };

        let created = match self.ratings.create(&rating).await {
            Ok(created) => created,
            // The unique index closes the check-then-insert race
            Err(RepoError::Duplicate(_)) => {
                return Err(AppError::new(ErrorCode::RatingAlreadyExists)
                    .with_detail("orderId", rating.order_id));
            }
            Err(e) => return Err(e.into()),
        };

        // Best-effort derived view
        if let Err(e) = self.aggregator.recompute(&created.restaurant_id).await {
            tracing::warn!(
                restaurant_id = %created.restaurant_id,
                error = %e,
                "Rating aggregate recompute failed"
            );
        }

        Ok(created)
    }
}

/// Map field validation failures onto descriptive error codes
fn validation_error(errors: &validator::ValidationErrors) -> AppError {
    let fields = errors.field_errors();
    if fields.contains_key("value") {
        AppError::new(ErrorCode::RatingValueOutOfRange)
    } else if fields.contains_key("photos") {
        AppError::new(ErrorCode::RatingTooManyPhotos)
    } else if fields.contains_key("comment") {
        AppError::with_message(
            ErrorCode::RatingCommentTooLong,
            format!("Rating comment exceeds {RATING_COMMENT_MAX_LEN} characters"),
        )
    } else {
        AppError::validation(errors.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_payload() -> RatingCreate {
        RatingCreate {
            order_id: "order-1".to_string(),
            consumer_id: "user-1".to_string(),
            restaurant_id: "rest-1".to_string(),
            value: 5,
            comment: None,
            photos: vec![],
            is_public: true,
        }
    }

    #[test]
    fn test_validation_error_codes_by_field() {
        let bad_value = RatingCreate {
            value: 7,
            ..create_payload()
        };
        let errors = bad_value.validate().unwrap_err();
        assert_eq!(
            validation_error(&errors).code,
            ErrorCode::RatingValueOutOfRange
        );

        let two_photos = RatingCreate {
            photos: vec!["a.jpg".to_string(), "b.jpg".to_string()],
            ..create_payload()
        };
        let errors = two_photos.validate().unwrap_err();
        assert_eq!(
            validation_error(&errors).code,
            ErrorCode::RatingTooManyPhotos
        );

        let long_comment = RatingCreate {
            comment: Some("x".repeat(RATING_COMMENT_MAX_LEN + 1)),
            ..create_payload()
        };
        let errors = long_comment.validate().unwrap_err();
        assert_eq!(
            validation_error(&errors).code,
            ErrorCode::RatingCommentTooLong
        );
    }
}
