//! Search query and normalized offers from the external search provider

use crate::models::{Car, CommissionTerms};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Availability search sent to the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub pickup_code: String,
    pub dropoff_code: String,
    pub pickup_date: NaiveDate,
    pub dropoff_date: NaiveDate,
}

impl SearchQuery {
    /// Rental length in days, at least one
    pub fn duration_days(&self) -> u32 {
        let days = (self.dropoff_date - self.pickup_date).num_days().max(1);
        u32::try_from(days).unwrap_or(u32::MAX)
    }
}

/// One normalized search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchOffer {
    /// Car carrying `external_pricing`
    pub car: Car,
    pub supplier_name: String,
    pub supplier_rating: Decimal,

    /// Terms applied when the provider did not supply a final price
    pub terms: CommissionTerms,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_days() {
        let query = SearchQuery {
            pickup_code: "LIS".to_string(),
            dropoff_code: "LIS".to_string(),
            pickup_date: NaiveDate::from_ymd_opt(2026, 7, 1).unwrap(),
            dropoff_date: NaiveDate::from_ymd_opt(2026, 7, 6).unwrap(),
        };
        assert_eq!(query.duration_days(), 5);

        let same_day = SearchQuery {
            dropoff_date: query.pickup_date,
            ..query
        };
        assert_eq!(same_day.duration_days(), 1);
    }
}
