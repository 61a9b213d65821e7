//! Quote handlers

use crate::dto::{ApiResponse, QuoteRequest};
use crate::state::BookingService;
use actix_web::{web, HttpResponse};
use carhire_core::AppError;
use std::sync::Arc;
use tracing::{debug, instrument, warn};
use validator::Validate;

/// Price a rental of a catalog car
///
/// POST /api/v1/quotes
#[instrument(skip(service, req), fields(car_id = %req.car_id))]
pub async fn create_quote(
    service: web::Data<Arc<BookingService>>,
    req: web::Json<QuoteRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Quote validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let breakdown = service
        .quote(&req.car_id, req.pickup, req.dropoff, &req.extras)
        .await?;

    debug!(final_total = %breakdown.final_total, "Quote computed");

    Ok(HttpResponse::Ok().json(ApiResponse::success(breakdown)))
}

/// Configure quote routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/quotes", web::post().to(create_quote));
}
