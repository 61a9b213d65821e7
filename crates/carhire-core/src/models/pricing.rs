//! Price computation results
//!
//! Value types produced by the rate resolver, the commission calculator and
//! the pricing facade. They carry no behavior of their own.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Output of rate-tier resolution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedRate {
    pub daily_net_rate: Decimal,
    pub tier_name: Option<String>,
    pub promotion_label: Option<String>,
}

/// Output of the commission calculator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommissionResult {
    pub gross_total: Decimal,
    pub net_total: Decimal,
    pub daily_gross_rate: Decimal,
}

impl CommissionResult {
    /// Platform share: markup or flat fee
    #[inline]
    pub fn commission_amount(&self) -> Decimal {
        self.gross_total - self.net_total
    }
}

/// Full price breakdown consumed by quotes, search results and bookings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Rental duration the breakdown was computed for
    pub duration_days: u32,

    /// Customer-facing daily rate (gross, before extras)
    pub daily_rate: Decimal,

    /// Gross rental total before extras
    pub total: Decimal,

    /// Net rental total owed to the supplier
    pub net_total: Decimal,

    pub extras_total: Decimal,

    /// `total + extras_total`
    pub final_total: Decimal,

    /// Charged online at booking time
    pub pay_now: Decimal,

    /// Collected by the supplier at pickup
    pub pay_at_desk: Decimal,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotion_label: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier_name: Option<String>,

    /// True when the gross price came straight from an external provider
    pub externally_priced: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_commission_amount() {
        let result = CommissionResult {
            gross_total: dec!(287.5),
            net_total: dec!(250),
            daily_gross_rate: dec!(57.5),
        };
        assert_eq!(result.commission_amount(), dec!(37.5));
    }
}
