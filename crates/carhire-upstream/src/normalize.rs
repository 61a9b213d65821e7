//! Search result normalization
//!
//! Defaults for fields the provider may omit:
//!
//! | Field | Default |
//! |-------|---------|
//! | `finalPrice` | none, price computed by markup |
//! | `passengers` / `bags` / `doors` | 0 |
//! | `transmission` | manual |
//! | `fuelPolicy` | full to full |
//! | `mileage` | unlimited |
//! | `deposit` / `excess` | 0 |
//! | `supplierRating` | 0 |

use carhire_core::{
    models::{
        BookingMode, Capacity, Car, CommissionModel, CommissionTerms, ExternalPricing, FuelPolicy,
        MileagePolicy, SearchOffer, Transmission,
    },
    AppError, AppResult,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use std::str::FromStr;

const DEFAULT_CATEGORY: &str = "other";
const DEFAULT_SUPPLIER: &str = "external";

/// Raw search result as sent by the provider
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSearchResult {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub sipp_code: Option<String>,
    pub supplier_id: Option<String>,
    pub supplier_name: Option<String>,
    pub supplier_rating: Option<Value>,
    pub passengers: Option<u8>,
    pub bags: Option<u8>,
    pub doors: Option<u8>,
    pub transmission: Option<String>,
    pub fuel_policy: Option<String>,
    pub mileage: Option<Value>,
    pub deposit: Option<Value>,
    pub excess: Option<Value>,
    pub image_url: Option<String>,
    pub net_price: Option<Value>,
    pub final_price: Option<Value>,
}

/// Parse a money amount sent either as a JSON number or a numeric string
pub fn parse_money(value: &Value) -> Option<Decimal> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.trim().to_string(),
        _ => return None,
    };

    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
}

fn optional_money(field: &str, value: Option<&Value>) -> AppResult<Option<Decimal>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => parse_money(v)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("{} is not a valid amount: {}", field, v))),
    }
}

fn parse_mileage(value: Option<&Value>) -> MileagePolicy {
    let km_per_day = match value {
        Some(Value::Number(n)) => n.as_u64(),
        Some(Value::String(s)) => s.trim().parse::<u64>().ok(),
        _ => None,
    };

    match km_per_day.and_then(|km| u32::try_from(km).ok()) {
        Some(km) if km > 0 => MileagePolicy::Limited { km_per_day: km },
        _ => MileagePolicy::Unlimited,
    }
}

/// Map one raw provider item onto a search offer
///
/// `netPrice` is the net daily rate. `finalPrice`, when present, is the
/// authoritative gross price for the whole rental and bypasses markup.
/// Offers carry percentage terms without a supplier value, so the
/// configured commission applies when no final price was sent.
pub fn normalize_search_result(item: &Value) -> AppResult<SearchOffer> {
    let raw: RawSearchResult = serde_json::from_value(item.clone())?;

    let id = raw
        .id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::Validation("search result without id".to_string()))?;

    let net_daily_rate = optional_money("netPrice", raw.net_price.as_ref())?
        .ok_or_else(|| AppError::Validation(format!("search result {} without netPrice", id)))?;
    if net_daily_rate < Decimal::ZERO {
        return Err(AppError::Validation(format!(
            "search result {} has negative netPrice",
            id
        )));
    }
    let final_price = optional_money("finalPrice", raw.final_price.as_ref())?;

    let supplier_id = raw.supplier_id.unwrap_or_else(|| DEFAULT_SUPPLIER.to_string());
    let supplier_name = raw.supplier_name.unwrap_or_else(|| supplier_id.clone());
    let supplier_rating =
        optional_money("supplierRating", raw.supplier_rating.as_ref())?.unwrap_or_default();

    let car = Car {
        name: raw.name.unwrap_or_else(|| id.clone()),
        id,
        supplier_id,
        category: raw.category.unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        sipp_code: raw.sipp_code,
        capacity: Capacity {
            passengers: raw.passengers.unwrap_or(0),
            bags: raw.bags.unwrap_or(0),
            doors: raw.doors.unwrap_or(0),
        },
        transmission: raw
            .transmission
            .as_deref()
            .map(Transmission::from_str)
            .unwrap_or_default(),
        fuel_policy: raw
            .fuel_policy
            .as_deref()
            .map(FuelPolicy::from_str)
            .unwrap_or_default(),
        mileage_policy: parse_mileage(raw.mileage.as_ref()),
        deposit: optional_money("deposit", raw.deposit.as_ref())?.unwrap_or_default(),
        excess: optional_money("excess", raw.excess.as_ref())?.unwrap_or_default(),
        rate_tiers: Vec::new(),
        extras: Vec::new(),
        detailed_ratings: Default::default(),
        external_pricing: Some(ExternalPricing {
            net_daily_rate,
            final_price,
        }),
        image_url: raw.image_url,
    };

    Ok(SearchOffer {
        car,
        supplier_name,
        supplier_rating,
        terms: CommissionTerms {
            model: CommissionModel::FullPrepaid,
            value: None,
            booking_mode: BookingMode::FreeSale,
        },
    })
}
