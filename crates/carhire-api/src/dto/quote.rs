//! Quote DTOs

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Price request for a catalog car
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct QuoteRequest {
    #[validate(length(min = 1, max = 64, message = "Car id is required"))]
    pub car_id: String,

    pub pickup: NaiveDateTime,
    pub dropoff: NaiveDateTime,

    #[serde(default)]
    #[validate(length(max = 20, message = "Too many extras"))]
    pub extras: Vec<String>,
}
