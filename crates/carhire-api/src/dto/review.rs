//! Review DTOs

use crate::dto::BookingResponse;
use carhire_core::models::{DetailedRatings, ReviewRatings};
use carhire_services::ReviewOutcome;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Star ratings submitted after a rental
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct ReviewRequest {
    #[validate(range(min = 1, max = 5))]
    pub cleanliness: u8,

    #[validate(range(min = 1, max = 5))]
    pub condition: u8,

    #[validate(range(min = 1, max = 5))]
    pub value_for_money: u8,

    #[validate(range(min = 1, max = 5))]
    pub pickup_speed: u8,
}

impl From<ReviewRequest> for ReviewRatings {
    fn from(req: ReviewRequest) -> Self {
        ReviewRatings {
            cleanliness: req.cleanliness,
            condition: req.condition,
            value_for_money: req.value_for_money,
            pickup_speed: req.pickup_speed,
        }
    }
}

/// Review result with the updated aggregates
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub booking: BookingResponse,
    pub car_ratings: DetailedRatings,
    pub supplier_rating: Decimal,
}

impl From<ReviewOutcome> for ReviewResponse {
    fn from(outcome: ReviewOutcome) -> Self {
        Self {
            booking: outcome.booking.into(),
            car_ratings: outcome.car_ratings,
            supplier_rating: outcome.supplier_rating,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_review_request_range() {
        let ok = ReviewRequest {
            cleanliness: 5,
            condition: 4,
            value_for_money: 3,
            pickup_speed: 1,
        };
        assert!(ok.validate().is_ok());

        let zero = ReviewRequest { pickup_speed: 0, ..ok };
        assert!(zero.validate().is_err());

        let six = ReviewRequest { cleanliness: 6, ..ok };
        assert!(six.validate().is_err());
    }
}
