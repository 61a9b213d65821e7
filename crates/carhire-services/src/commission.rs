//! Commission calculator
//!
//! Turns a net daily rate into the customer-facing gross total according to
//! the supplier's commission model.

use carhire_core::models::{CommissionResult, CommissionTerms};
use rust_decimal::Decimal;
use tracing::trace;

/// Apply the supplier's commission model to a net daily rate
///
/// * Percentage models: `gross = net * (1 + value)`, falling back to
///   `default_fraction` when the supplier has no value of its own.
/// * `PAY_AT_DESK`: `gross = net + value`, a flat fee charged once per
///   booking; a missing value means no fee.
pub fn apply_commission(
    net_daily_rate: Decimal,
    duration_days: u32,
    terms: &CommissionTerms,
    default_fraction: Decimal,
) -> CommissionResult {
    let days = Decimal::from(duration_days.max(1));
    let net_total = net_daily_rate * days;

    let gross_total = if terms.model.is_percentage() {
        let fraction = terms.value.unwrap_or(default_fraction);
        net_total * (Decimal::ONE + fraction)
    } else {
        net_total + terms.value.unwrap_or(Decimal::ZERO)
    };

    trace!(
        model = %terms.model,
        %net_total,
        %gross_total,
        "Commission applied"
    );

    CommissionResult {
        gross_total,
        net_total,
        daily_gross_rate: gross_total / days,
    }
}

/// Bypass for externally priced results
///
/// The provider's final price is taken as the gross total unchanged; the
/// net total is still derived from the supplied net rate so the financial
/// split works the same way as for catalog cars.
pub fn pass_through_external(
    net_daily_rate: Decimal,
    duration_days: u32,
    final_price: Decimal,
) -> CommissionResult {
    let days = Decimal::from(duration_days.max(1));

    CommissionResult {
        gross_total: final_price,
        net_total: net_daily_rate * days,
        daily_gross_rate: final_price / days,
    }
}
