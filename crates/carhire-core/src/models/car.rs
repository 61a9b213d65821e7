//! Car model
//!
//! A rentable unit offered by one supplier, with its date-bounded rate tiers,
//! optional extras and the detailed rating aggregate fed by reviews.

use crate::{AppError, AppResult};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Upper bound of the detailed rating scale
pub const MAX_DETAILED_RATING: u8 = 100;

/// Duration band inside a rate tier: `[min_days, max_days] -> daily_rate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateBand {
    pub min_days: u32,
    pub max_days: u32,
    pub daily_rate: Decimal,
}

impl RateBand {
    /// Check if the rental duration falls inside this band (both ends inclusive)
    #[inline]
    pub fn covers(&self, duration_days: u32) -> bool {
        self.min_days <= duration_days && duration_days <= self.max_days
    }
}

/// Date-bounded pricing scheme
///
/// The validity window is inclusive on both ends: a tier ending on
/// 2026-08-31 still applies to rentals starting at 23:59 that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTier {
    /// Tier name shown to customers (e.g. "Summer 2026")
    pub name: String,

    /// First calendar day the tier applies to
    pub start_date: NaiveDate,

    /// Last calendar day the tier applies to
    pub end_date: NaiveDate,

    /// Duration bands in declaration order
    pub bands: Vec<RateBand>,

    /// Promotion label, display only
    #[serde(default)]
    pub promotion_label: Option<String>,
}

impl RateTier {
    /// Check if a rental starting on `date` falls inside the window
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Daily rate for a duration
    ///
    /// First covering band wins. A duration outside every band is priced at
    /// the last declared band's rate. Returns `None` only for a tier without bands.
    pub fn band_rate(&self, duration_days: u32) -> Option<Decimal> {
        self.bands
            .iter()
            .find(|band| band.covers(duration_days))
            .or_else(|| self.bands.last())
            .map(|band| band.daily_rate)
    }
}

/// How an extra is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtraPricing {
    /// Multiplied by the rental duration
    PerDay,
    /// Charged once per rental
    PerRental,
}

/// Optional add-on (child seat, GPS, additional driver...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extra {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    pub pricing: ExtraPricing,
}

impl Extra {
    /// Price of this extra for a rental of `duration_days`
    #[inline]
    pub fn total_for(&self, duration_days: u32) -> Decimal {
        match self.pricing {
            ExtraPricing::PerDay => self.price * Decimal::from(duration_days),
            ExtraPricing::PerRental => self.price,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Transmission {
    #[default]
    Manual,
    Automatic,
}

impl Transmission {
    /// Parse from string, defaulting to manual
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "automatic" | "auto" => Transmission::Automatic,
            _ => Transmission::Manual,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FuelPolicy {
    #[default]
    FullToFull,
    SameToSame,
    FullToEmpty,
}

impl FuelPolicy {
    /// Parse from string, defaulting to full-to-full
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().replace(['-', ' '], "_").as_str() {
            "same_to_same" => FuelPolicy::SameToSame,
            "full_to_empty" => FuelPolicy::FullToEmpty,
            _ => FuelPolicy::FullToFull,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "type")]
pub enum MileagePolicy {
    #[default]
    Unlimited,
    Limited { km_per_day: u32 },
}

/// Passenger, luggage and door counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Capacity {
    pub passengers: u8,
    pub bags: u8,
    pub doors: u8,
}

/// Review aggregate, each score on a 0-100 scale
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DetailedRatings {
    pub cleanliness: u8,
    pub condition: u8,
    pub value_for_money: u8,
    pub pickup_speed: u8,
}

/// Price supplied by an external search provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalPricing {
    /// Net daily rate quoted by the provider
    pub net_daily_rate: Decimal,

    /// Authoritative gross price for the whole rental, when the provider computed one
    #[serde(default)]
    pub final_price: Option<Decimal>,
}

/// Car entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Car {
    pub id: String,
    pub supplier_id: String,
    pub name: String,
    pub category: String,

    /// Industry classification code (e.g. "CDMR"), carried as data
    #[serde(default)]
    pub sipp_code: Option<String>,

    #[serde(default)]
    pub capacity: Capacity,
    #[serde(default)]
    pub transmission: Transmission,
    #[serde(default)]
    pub fuel_policy: FuelPolicy,
    #[serde(default)]
    pub mileage_policy: MileagePolicy,

    /// Security deposit held at pickup
    #[serde(default)]
    pub deposit: Decimal,

    /// Damage excess
    #[serde(default)]
    pub excess: Decimal,

    /// Rate tiers in declaration order; order decides overlaps
    #[serde(default)]
    pub rate_tiers: Vec<RateTier>,

    #[serde(default)]
    pub extras: Vec<Extra>,

    /// Written only by the review aggregator
    #[serde(default)]
    pub detailed_ratings: DetailedRatings,

    /// Set for cars sourced from an external search provider
    #[serde(default)]
    pub external_pricing: Option<ExternalPricing>,

    #[serde(default)]
    pub image_url: Option<String>,
}

impl Car {
    /// Look up one of this car's extras by id
    pub fn find_extra(&self, extra_id: &str) -> Option<&Extra> {
        self.extras.iter().find(|extra| extra.id == extra_id)
    }

    fn invalid(&self, detail: String) -> AppError {
        AppError::Validation(format!("car {}: {}", self.id, detail))
    }

    /// Reject catalog data the pricing engine cannot price
    ///
    /// Money amounts must be non-negative, tier windows and band ranges
    /// must not be inverted and detailed ratings stay on the 0-100 scale.
    pub fn validate(&self) -> AppResult<()> {
        if self.deposit < Decimal::ZERO || self.excess < Decimal::ZERO {
            return Err(self.invalid("deposit and excess must not be negative".to_string()));
        }

        for tier in &self.rate_tiers {
            if tier.start_date > tier.end_date {
                return Err(self.invalid(format!(
                    "tier {} ends {} before it starts {}",
                    tier.name, tier.end_date, tier.start_date
                )));
            }
            for band in &tier.bands {
                if band.min_days > band.max_days {
                    return Err(self.invalid(format!(
                        "tier {} has band {}-{} days",
                        tier.name, band.min_days, band.max_days
                    )));
                }
                if band.daily_rate < Decimal::ZERO {
                    return Err(self.invalid(format!(
                        "tier {} has negative daily rate {}",
                        tier.name, band.daily_rate
                    )));
                }
            }
        }

        if let Some(extra) = self.extras.iter().find(|extra| extra.price < Decimal::ZERO) {
            return Err(self.invalid(format!(
                "extra {} has negative price {}",
                extra.id, extra.price
            )));
        }

        let ratings = &self.detailed_ratings;
        let max = [
            ratings.cleanliness,
            ratings.condition,
            ratings.value_for_money,
            ratings.pickup_speed,
        ]
        .into_iter()
        .max()
        .unwrap_or_default();
        if max > MAX_DETAILED_RATING {
            return Err(self.invalid(format!("detailed rating {} exceeds 100", max)));
        }

        if let Some(external) = &self.external_pricing {
            let negative_final = external.final_price.is_some_and(|p| p < Decimal::ZERO);
            if external.net_daily_rate < Decimal::ZERO || negative_final {
                return Err(self.invalid("external price must not be negative".to_string()));
            }
        }

        Ok(())
    }
}
