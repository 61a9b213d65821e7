//! Review ratings submitted by customers after a rental

use crate::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Star multiplier onto the 0-100 scale used by car rating aggregates
pub const STAR_TO_PERCENT: u8 = 20;

/// Category ratings, each 1-5 stars
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRatings {
    pub cleanliness: u8,
    pub condition: u8,
    pub value_for_money: u8,
    pub pickup_speed: u8,
}

impl ReviewRatings {
    /// Reject any category outside 1..=5
    pub fn validate(&self) -> AppResult<()> {
        let categories = [
            ("cleanliness", self.cleanliness),
            ("condition", self.condition),
            ("value_for_money", self.value_for_money),
            ("pickup_speed", self.pickup_speed),
        ];

        for (name, stars) in categories {
            if !(1..=5).contains(&stars) {
                return Err(AppError::Validation(format!(
                    "{} rating must be between 1 and 5, got {}",
                    name, stars
                )));
            }
        }

        Ok(())
    }

    /// Ratings converted to the 0-100 scale, in
    /// (cleanliness, condition, value_for_money, pickup_speed) order.
    /// Only meaningful after `validate` succeeded.
    pub fn as_percentages(&self) -> [u8; 4] {
        [
            self.cleanliness * STAR_TO_PERCENT,
            self.condition * STAR_TO_PERCENT,
            self.value_for_money * STAR_TO_PERCENT,
            self.pickup_speed * STAR_TO_PERCENT,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_range() {
        let ok = ReviewRatings { cleanliness: 1, condition: 5, value_for_money: 3, pickup_speed: 4 };
        assert!(ok.validate().is_ok());

        let zero = ReviewRatings { cleanliness: 0, ..ok };
        assert!(matches!(zero.validate(), Err(AppError::Validation(_))));

        let six = ReviewRatings { pickup_speed: 6, ..ok };
        let err = six.validate().unwrap_err();
        assert!(err.to_string().contains("pickup_speed"));
    }

    #[test]
    fn test_as_percentages() {
        let ratings = ReviewRatings { cleanliness: 5, condition: 4, value_for_money: 1, pickup_speed: 3 };
        assert_eq!(ratings.as_percentages(), [100, 80, 20, 60]);
    }
}
