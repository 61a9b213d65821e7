//! Health check handler

use actix_web::{web, HttpResponse};
use carhire_core::traits::SearchProvider;
use chrono::Utc;
use std::sync::Arc;

/// Health check endpoint
///
/// GET /api/v1/health
pub async fn health_check(search: Option<web::Data<Arc<dyn SearchProvider>>>) -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "carhire",
        "version": env!("CARGO_PKG_VERSION"),
        "search_enabled": search.is_some(),
        "timestamp": Utc::now(),
    }))
}

/// Configure health routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health_check));
}
