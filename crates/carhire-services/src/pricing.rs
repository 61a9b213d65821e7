//! Pricing engine
//!
//! Single entry point for every price shown or stored: quotes, search
//! results and bookings all go through `compute_price_breakdown`.

use carhire_core::config::PricingConfig;
use carhire_core::models::{Car, CommissionResult, CommissionTerms, Extra, PriceBreakdown};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::debug;

use crate::commission::{apply_commission, pass_through_external};
use crate::rate_resolver::resolve_rate;

/// Online and at-desk shares of a final total
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancialSplit {
    pub pay_now: Decimal,
    pub pay_at_desk: Decimal,
}

/// Sum of the selected extras for a rental
pub fn extras_total(extras: &[Extra], duration_days: u32) -> Decimal {
    extras.iter().map(|extra| extra.total_for(duration_days)).sum()
}

/// Split a price into what the platform collects now and what the supplier
/// collects at pickup
///
/// `pay_now + pay_at_desk` always equals `gross_total + extras_total`.
pub fn financial_split(
    gross_total: Decimal,
    net_total: Decimal,
    extras_total: Decimal,
) -> FinancialSplit {
    FinancialSplit {
        pay_now: gross_total - net_total,
        pay_at_desk: net_total + extras_total,
    }
}

/// Pricing engine
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: PricingConfig,
}

impl PricingEngine {
    pub fn new(config: PricingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    /// Compute the full price breakdown for a rental
    ///
    /// Cars carrying an external final price bypass the rate resolver and
    /// the commission model. A zero duration is priced as one day.
    pub fn compute_price_breakdown(
        &self,
        car: &Car,
        terms: &CommissionTerms,
        duration_days: u32,
        start_date: NaiveDate,
        selected_extras: &[Extra],
    ) -> PriceBreakdown {
        let days = duration_days.max(1);
        let default_fraction = self.config.commission_fraction();

        let (commission, tier_name, promotion_label, externally_priced) =
            match &car.external_pricing {
                Some(external) => {
                    let result = match external.final_price {
                        Some(final_price) => {
                            pass_through_external(external.net_daily_rate, days, final_price)
                        }
                        None => apply_commission(
                            external.net_daily_rate,
                            days,
                            terms,
                            default_fraction,
                        ),
                    };
                    (result, None, None, external.final_price.is_some())
                }
                None => {
                    let rate = resolve_rate(car, start_date, days);
                    let result =
                        apply_commission(rate.daily_net_rate, days, terms, default_fraction);
                    (result, rate.tier_name, rate.promotion_label, false)
                }
            };

        let breakdown = Self::assemble(
            commission,
            days,
            extras_total(selected_extras, days),
            tier_name,
            promotion_label,
            externally_priced,
        );

        debug!(
            car_id = %car.id,
            days,
            final_total = %breakdown.final_total,
            pay_now = %breakdown.pay_now,
            externally_priced,
            "Price breakdown computed"
        );

        breakdown
    }

    fn assemble(
        commission: CommissionResult,
        duration_days: u32,
        extras_total: Decimal,
        tier_name: Option<String>,
        promotion_label: Option<String>,
        externally_priced: bool,
    ) -> PriceBreakdown {
        let split = financial_split(commission.gross_total, commission.net_total, extras_total);

        PriceBreakdown {
            duration_days,
            daily_rate: commission.daily_gross_rate,
            total: commission.gross_total,
            net_total: commission.net_total,
            extras_total,
            final_total: commission.gross_total + extras_total,
            pay_now: split.pay_now,
            pay_at_desk: split.pay_at_desk,
            promotion_label,
            tier_name,
            externally_priced,
        }
    }
}

impl Default for PricingEngine {
    fn default() -> Self {
        Self::new(PricingConfig::default())
    }
}
