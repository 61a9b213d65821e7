//! Supplier model
//!
//! Suppliers own cars and define how the platform's commission is computed
//! and collected for their bookings.

use crate::{AppError, AppResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supplier-specific rule for computing the platform markup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommissionModel {
    /// Percentage markup, paid online
    FullPrepaid,
    /// Percentage markup, paid online
    PartialPrepaid,
    /// Flat fee per booking
    PayAtDesk,
}

impl CommissionModel {
    /// Percentage-based models multiply the net total; the desk model adds a flat fee
    pub fn is_percentage(&self) -> bool {
        matches!(self, CommissionModel::FullPrepaid | CommissionModel::PartialPrepaid)
    }
}

impl fmt::Display for CommissionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommissionModel::FullPrepaid => write!(f, "FULL_PREPAID"),
            CommissionModel::PartialPrepaid => write!(f, "PARTIAL_PREPAID"),
            CommissionModel::PayAtDesk => write!(f, "PAY_AT_DESK"),
        }
    }
}

/// Whether a new booking needs explicit supplier confirmation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingMode {
    /// Bookings start as pending until the supplier confirms
    OnRequest,
    /// Bookings are confirmed immediately
    #[default]
    FreeSale,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GraceUnit {
    #[default]
    Hours,
    Days,
}

/// Late-return allowance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GracePeriod {
    pub value: u32,
    pub unit: GraceUnit,
}

/// Commission terms captured on a booking at creation time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionTerms {
    pub model: CommissionModel,

    /// Fraction for percentage models (0.15 = 15%), currency amount for the
    /// desk model; `None` falls back to configuration
    pub value: Option<Decimal>,

    pub booking_mode: BookingMode,
}

/// Supplier entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Supplier {
    pub id: String,
    pub name: String,
    pub commission_model: CommissionModel,
    #[serde(default)]
    pub commission_value: Option<Decimal>,
    #[serde(default)]
    pub booking_mode: BookingMode,

    /// Overall rating, nominally 0-5 with one decimal; written only by the review aggregator
    #[serde(default)]
    pub rating: Decimal,

    #[serde(default)]
    pub grace_period: GracePeriod,
    #[serde(default)]
    pub terms: String,
    #[serde(default)]
    pub logo_url: Option<String>,
}

impl Supplier {
    /// Reject a negative commission value or rating
    pub fn validate(&self) -> AppResult<()> {
        if self.commission_value.is_some_and(|value| value < Decimal::ZERO) {
            return Err(AppError::Validation(format!(
                "supplier {}: commission value must not be negative",
                self.id
            )));
        }
        if self.rating < Decimal::ZERO {
            return Err(AppError::Validation(format!(
                "supplier {}: rating must not be negative",
                self.id
            )));
        }
        Ok(())
    }

    /// Snapshot of the terms a new price computation should use
    pub fn commission_terms(&self) -> CommissionTerms {
        CommissionTerms {
            model: self.commission_model,
            value: self.commission_value,
            booking_mode: self.booking_mode,
        }
    }
}
