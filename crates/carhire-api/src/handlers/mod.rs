//! HTTP request handlers

pub mod booking;
pub mod health;
pub mod quote;
pub mod search;

use actix_web::web;

pub use booking::configure as configure_bookings;
pub use health::configure as configure_health;
pub use quote::configure as configure_quotes;
pub use search::configure as configure_search;

/// Configure API routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(configure_health)
            .configure(configure_quotes)
            .configure(configure_search)
            .configure(configure_bookings),
    );
}
