//! Search handlers
//!
//! Offers come from the external provider and are priced locally, so the
//! listing shows the same breakdown a quote would.

use crate::dto::{ApiResponse, SearchOfferResponse, SearchParams};
use actix_web::{web, HttpResponse};
use carhire_core::{traits::SearchProvider, AppError};
use carhire_services::PricingEngine;
use std::sync::Arc;
use tracing::{info, instrument, warn};
use validator::Validate;

/// Search available cars
///
/// GET /api/v1/search
#[instrument(skip(provider, pricing))]
pub async fn search_cars(
    provider: Option<web::Data<Arc<dyn SearchProvider>>>,
    pricing: web::Data<Arc<PricingEngine>>,
    params: web::Query<SearchParams>,
) -> Result<HttpResponse, AppError> {
    params.validate().map_err(|e| {
        warn!("Search validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    if params.dropoff_date < params.pickup_date {
        return Err(AppError::Validation(
            "dropoff_date must not be before pickup_date".to_string(),
        ));
    }

    let provider = provider.ok_or_else(|| AppError::UpstreamUnavailable {
        endpoint: "search".to_string(),
        reason: "no search provider configured".to_string(),
    })?;

    let query = params.to_query();
    let days = query.duration_days();
    let offers = provider.search(&query).await?;

    let mut results: Vec<SearchOfferResponse> = offers
        .into_iter()
        .map(|offer| {
            let price = pricing.compute_price_breakdown(
                &offer.car,
                &offer.terms,
                days,
                query.pickup_date,
                &[],
            );
            SearchOfferResponse {
                car: offer.car,
                supplier_name: offer.supplier_name,
                supplier_rating: offer.supplier_rating,
                price,
            }
        })
        .collect();

    // Cheapest first
    results.sort_by(|a, b| a.price.final_total.cmp(&b.price.final_total));

    info!(
        pickup = %query.pickup_code,
        days,
        offers = results.len(),
        "Search priced"
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(results)))
}

/// Configure search routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/search", web::get().to(search_cars));
}
