//! API layer for CarHire
//!
//! HTTP handlers for quotes, search, bookings and reviews.

#![forbid(unsafe_code)]

pub mod dto;
pub mod handlers;
pub mod state;

// Re-export DTOs (common types)
pub use dto::ApiResponse;

pub use handlers::configure_routes;
pub use state::{AppServices, BookingService, ReviewService};
