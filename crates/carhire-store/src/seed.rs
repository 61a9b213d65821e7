//! Catalog seeding
//!
//! Loads suppliers and cars from a JSON document so a fresh process starts
//! with an inventory to price and book against.

use carhire_core::{
    models::{Car, Supplier},
    AppError, AppResult,
};
use serde::Deserialize;
use serde_json::error::Category;
use std::collections::HashSet;
use std::path::Path;
use tracing::{info, warn};

/// Catalog document
#[derive(Debug, Default, Deserialize)]
pub struct SeedData {
    #[serde(default)]
    pub suppliers: Vec<Supplier>,
    #[serde(default)]
    pub cars: Vec<Car>,
}

impl SeedData {
    /// Parse a catalog from JSON text, dropping cars whose supplier is unknown
    ///
    /// A supplier or car with invalid pricing data rejects the whole catalog.
    pub fn from_json(text: &str) -> AppResult<Self> {
        let mut seed: SeedData = serde_json::from_str(text).map_err(|e| match e.classify() {
            // Well-formed JSON with a bad value, e.g. a non-numeric price or date
            Category::Data => AppError::Validation(format!("invalid catalog: {}", e)),
            _ => AppError::from(e),
        })?;
        seed.validate()?;

        let supplier_ids: HashSet<&str> = seed.suppliers.iter().map(|s| s.id.as_str()).collect();
        let before = seed.cars.len();
        let orphans: Vec<String> = seed
            .cars
            .iter()
            .filter(|car| !supplier_ids.contains(car.supplier_id.as_str()))
            .map(|car| car.id.clone())
            .collect();

        if !orphans.is_empty() {
            warn!(cars = ?orphans, "Skipping cars with unknown supplier");
            seed.cars
                .retain(|car| !orphans.iter().any(|orphan| orphan == &car.id));
        }

        info!(
            suppliers = seed.suppliers.len(),
            cars = seed.cars.len(),
            skipped = before - seed.cars.len(),
            "Catalog parsed"
        );

        Ok(seed)
    }

    fn validate(&self) -> AppResult<()> {
        for supplier in &self.suppliers {
            supplier.validate()?;
        }
        for car in &self.cars {
            car.validate().map_err(|e| {
                warn!(car_id = %car.id, error = %e, "Rejecting catalog");
                e
            })?;
        }
        Ok(())
    }
}

/// Load a catalog from disk
pub fn load_seed(path: impl AsRef<Path>) -> AppResult<SeedData> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| {
        AppError::Config(format!("cannot read seed file {}: {}", path.display(), e))
    })?;

    SeedData::from_json(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CATALOG: &str = r#"{
        "suppliers": [
            {
                "id": "sup-1",
                "name": "Sunny Rentals",
                "commission_model": "PARTIAL_PREPAID",
                "commission_value": "0.15",
                "booking_mode": "ON_REQUEST",
                "rating": "4.5"
            }
        ],
        "cars": [
            {"id": "car-1", "supplier_id": "sup-1", "name": "Fiat 500", "category": "mini"},
            {"id": "car-2", "supplier_id": "sup-404", "name": "Ghost", "category": "mini"}
        ]
    }"#;

    #[test]
    fn test_from_json_drops_orphans() {
        let seed = SeedData::from_json(CATALOG).unwrap();
        assert_eq!(seed.suppliers.len(), 1);
        assert_eq!(seed.cars.len(), 1);
        assert_eq!(seed.cars[0].id, "car-1");
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(matches!(
            SeedData::from_json("not json"),
            Err(AppError::Serialization(_))
        ));
    }

    fn catalog_with_car(car: serde_json::Value) -> String {
        serde_json::json!({
            "suppliers": [{
                "id": "sup-1",
                "name": "Sunny Rentals",
                "commission_model": "PARTIAL_PREPAID",
                "commission_value": "0.15",
                "rating": "4.5"
            }],
            "cars": [car]
        })
        .to_string()
    }

    fn tiered_car(tier: serde_json::Value) -> serde_json::Value {
        serde_json::json!({
            "id": "car-1",
            "supplier_id": "sup-1",
            "name": "Fiat 500",
            "category": "mini",
            "rate_tiers": [tier]
        })
    }

    fn assert_rejected(catalog: &str) {
        assert!(matches!(
            SeedData::from_json(catalog),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_rejects_negative_daily_rate() {
        assert_rejected(&catalog_with_car(tiered_car(serde_json::json!({
            "name": "Neg",
            "start_date": "2026-06-01",
            "end_date": "2026-08-31",
            "bands": [{"min_days": 1, "max_days": 7, "daily_rate": "-40"}]
        }))));
    }

    #[test]
    fn test_rejects_inverted_tier_window() {
        assert_rejected(&catalog_with_car(tiered_car(serde_json::json!({
            "name": "Backwards",
            "start_date": "2026-08-31",
            "end_date": "2026-06-01",
            "bands": [{"min_days": 1, "max_days": 7, "daily_rate": "40"}]
        }))));
    }

    #[test]
    fn test_rejects_inverted_band() {
        assert_rejected(&catalog_with_car(tiered_car(serde_json::json!({
            "name": "Summer",
            "start_date": "2026-06-01",
            "end_date": "2026-08-31",
            "bands": [{"min_days": 7, "max_days": 1, "daily_rate": "40"}]
        }))));
    }

    #[test]
    fn test_rejects_negative_extra_price() {
        assert_rejected(&catalog_with_car(serde_json::json!({
            "id": "car-1",
            "supplier_id": "sup-1",
            "name": "Fiat 500",
            "category": "mini",
            "extras": [{"id": "gps", "name": "GPS", "price": "-99", "pricing": "per_day"}]
        })));
    }

    #[test]
    fn test_rejects_rating_above_scale() {
        assert_rejected(&catalog_with_car(serde_json::json!({
            "id": "car-1",
            "supplier_id": "sup-1",
            "name": "Fiat 500",
            "category": "mini",
            "detailed_ratings": {
                "cleanliness": 80, "condition": 120, "value_for_money": 80, "pickup_speed": 80
            }
        })));
    }

    #[test]
    fn test_rejects_negative_commission_value() {
        let catalog = serde_json::json!({
            "suppliers": [{
                "id": "desk",
                "name": "Desk Cars",
                "commission_model": "PAY_AT_DESK",
                "commission_value": "-5"
            }]
        })
        .to_string();
        assert_rejected(&catalog);
    }

    #[test]
    fn test_rejects_non_numeric_price() {
        let catalog = catalog_with_car(serde_json::json!({
            "id": "car-1",
            "supplier_id": "sup-1",
            "name": "Fiat 500",
            "category": "mini",
            "extras": [{"id": "gps", "name": "GPS", "price": "cheap", "pricing": "per_day"}]
        }));
        let err = SeedData::from_json(&catalog).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_rejects_malformed_date() {
        assert_rejected(&catalog_with_car(tiered_car(serde_json::json!({
            "name": "Summer",
            "start_date": "2026-13-01",
            "end_date": "2026-08-31",
            "bands": [{"min_days": 1, "max_days": 7, "daily_rate": "40"}]
        }))));
    }

    #[test]
    fn test_load_seed_missing_file() {
        let err = load_seed("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
