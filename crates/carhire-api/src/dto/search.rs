//! Search DTOs

use carhire_core::models::{Car, PriceBreakdown, SearchQuery};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query parameters for an availability search
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SearchParams {
    #[validate(length(min = 2, max = 10, message = "Invalid pickup location code"))]
    pub pickup_code: String,

    #[validate(length(min = 2, max = 10, message = "Invalid dropoff location code"))]
    pub dropoff_code: String,

    pub pickup_date: NaiveDate,
    pub dropoff_date: NaiveDate,
}

impl SearchParams {
    /// Convert to the provider query
    pub fn to_query(&self) -> SearchQuery {
        SearchQuery {
            pickup_code: self.pickup_code.trim().to_uppercase(),
            dropoff_code: self.dropoff_code.trim().to_uppercase(),
            pickup_date: self.pickup_date,
            dropoff_date: self.dropoff_date,
        }
    }
}

/// One priced search result
#[derive(Debug, Clone, Serialize)]
pub struct SearchOfferResponse {
    pub car: Car,
    pub supplier_name: String,
    pub supplier_rating: Decimal,
    pub price: PriceBreakdown,
}
