//! Rate resolver
//!
//! Picks the daily net rate for a car from its rate tiers.

use carhire_core::models::{Car, ResolvedRate};
use chrono::NaiveDate;
use tracing::debug;

use crate::constants::DEFAULT_DAILY_RATE;

/// Resolve the daily net rate for a rental
///
/// Tiers are scanned in declaration order and the first one whose inclusive
/// window contains `start_date` wins, even when a later tier is narrower.
/// Inside that tier the first band covering `duration_days` applies, else
/// the last declared band. With no applicable tier the fixed default rate
/// is returned without tier name or promotion.
pub fn resolve_rate(car: &Car, start_date: NaiveDate, duration_days: u32) -> ResolvedRate {
    let matched = car.rate_tiers.iter().find_map(|tier| {
        if !tier.applies_on(start_date) {
            return None;
        }
        tier.band_rate(duration_days).map(|rate| (tier, rate))
    });

    match matched {
        Some((tier, rate)) => ResolvedRate {
            daily_net_rate: rate,
            tier_name: Some(tier.name.clone()),
            promotion_label: tier.promotion_label.clone(),
        },
        None => {
            debug!(
                car_id = %car.id,
                %start_date,
                "No rate tier applies, using default daily rate"
            );
            ResolvedRate {
                daily_net_rate: DEFAULT_DAILY_RATE,
                tier_name: None,
                promotion_label: None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{car, date, summer_tier};
    use carhire_core::models::{RateBand, RateTier};
    use proptest::prelude::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_band_selection_inside_tier() {
        let car = car("car-1", "sup-1");
        let three = resolve_rate(&car, date(2026, 7, 1), 3);
        assert_eq!(three.daily_net_rate, dec!(60));
        assert_eq!(three.tier_name.as_deref(), Some("Summer 2026"));
        assert_eq!(three.promotion_label.as_deref(), Some("Early bird"));

        let five = resolve_rate(&car, date(2026, 7, 1), 5);
        assert_eq!(five.daily_net_rate, dec!(50));
    }

    #[test]
    fn test_duration_outside_bands_uses_last_band() {
        let car = car("car-1", "sup-1");
        let rate = resolve_rate(&car, date(2026, 7, 1), 21);
        assert_eq!(rate.daily_net_rate, dec!(50));
        assert_eq!(rate.tier_name.as_deref(), Some("Summer 2026"));
    }

    #[test]
    fn test_end_date_is_inclusive() {
        let car = car("car-1", "sup-1");
        let rate = resolve_rate(&car, date(2026, 8, 31), 2);
        assert_eq!(rate.daily_net_rate, dec!(60));
    }

    #[test]
    fn test_no_tier_falls_back_to_default() {
        let car = car("car-1", "sup-1");
        let rate = resolve_rate(&car, date(2026, 12, 24), 4);
        assert_eq!(rate.daily_net_rate, dec!(50));
        assert_eq!(rate.daily_net_rate, DEFAULT_DAILY_RATE);
        assert!(rate.tier_name.is_none());
        assert!(rate.promotion_label.is_none());
    }

    #[test]
    fn test_first_declared_tier_wins() {
        let mut car = car("car-1", "sup-1");
        let august_deal = RateTier {
            name: "August deal".to_string(),
            start_date: date(2026, 8, 1),
            end_date: date(2026, 8, 15),
            bands: vec![RateBand { min_days: 1, max_days: 30, daily_rate: dec!(35) }],
            promotion_label: None,
        };
        car.rate_tiers = vec![summer_tier(), august_deal.clone()];
        assert_eq!(
            resolve_rate(&car, date(2026, 8, 5), 2).tier_name.as_deref(),
            Some("Summer 2026")
        );

        car.rate_tiers = vec![august_deal, summer_tier()];
        let rate = resolve_rate(&car, date(2026, 8, 5), 2);
        assert_eq!(rate.tier_name.as_deref(), Some("August deal"));
        assert_eq!(rate.daily_net_rate, dec!(35));
    }

    #[test]
    fn test_tier_without_bands_is_skipped() {
        let mut car = car("car-1", "sup-1");
        let empty = RateTier {
            name: "Broken".to_string(),
            bands: vec![],
            ..summer_tier()
        };
        car.rate_tiers = vec![empty, summer_tier()];
        let rate = resolve_rate(&car, date(2026, 7, 1), 2);
        assert_eq!(rate.tier_name.as_deref(), Some("Summer 2026"));
    }

    proptest! {
        #[test]
        fn prop_rate_is_never_negative(day in 0u32..365, duration in 0u32..60) {
            let car = car("car-1", "sup-1");
            let start = date(2026, 1, 1) + chrono::Duration::days(i64::from(day));
            let rate = resolve_rate(&car, start, duration);
            prop_assert!(rate.daily_net_rate >= Decimal::ZERO);
            if rate.tier_name.is_none() {
                prop_assert_eq!(rate.daily_net_rate, dec!(50));
            }
        }
    }
}
