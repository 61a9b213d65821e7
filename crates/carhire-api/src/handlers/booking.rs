//! Booking handlers
//!
//! HTTP handlers for the booking lifecycle and review submission.

use crate::dto::{
    ApiResponse, BookingListParams, BookingResponse, ConfirmBookingRequest, CreateBookingRequest,
    ModifyBookingRequest, ReviewRequest, ReviewResponse,
};
use crate::state::{BookingService, ReviewService};
use actix_web::{web, HttpResponse};
use carhire_core::AppError;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;
use validator::Validate;

/// Create a booking
///
/// POST /api/v1/bookings
#[instrument(skip(service, req), fields(car_id = %req.car_id))]
pub async fn create_booking(
    service: web::Data<Arc<BookingService>>,
    req: web::Json<CreateBookingRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Booking creation validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let booking = service.create_booking(req.into_inner().into_new_booking()).await?;
    info!(booking_id = %booking.id, status = %booking.status, "Booking created via API");

    Ok(HttpResponse::Created().json(ApiResponse::with_message(
        BookingResponse::from(booking),
        "Booking created",
    )))
}

/// List bookings, optionally for one customer
///
/// GET /api/v1/bookings
#[instrument(skip(service))]
pub async fn list_bookings(
    service: web::Data<Arc<BookingService>>,
    query: web::Query<BookingListParams>,
) -> Result<HttpResponse, AppError> {
    query.validate().map_err(|e| {
        warn!("Booking list validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let bookings = service
        .list_bookings(query.customer_email.as_deref())
        .await?;
    debug!(count = bookings.len(), "Listing bookings");

    let data: Vec<BookingResponse> = bookings.into_iter().map(Into::into).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::success(data)))
}

/// Get a booking by id
///
/// GET /api/v1/bookings/{id}
#[instrument(skip(service))]
pub async fn get_booking(
    service: web::Data<Arc<BookingService>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let booking = service.get_booking(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::success(BookingResponse::from(booking))))
}

/// Change dates or extras of a booking
///
/// PATCH /api/v1/bookings/{id}
#[instrument(skip(service, req))]
pub async fn modify_booking(
    service: web::Data<Arc<BookingService>>,
    path: web::Path<Uuid>,
    req: web::Json<ModifyBookingRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Booking modification validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let booking = service
        .modify_booking(path.into_inner(), req.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        BookingResponse::from(booking),
        "Booking modified",
    )))
}

/// Record the supplier's confirmation
///
/// POST /api/v1/bookings/{id}/confirm
#[instrument(skip(service, req))]
pub async fn confirm_booking(
    service: web::Data<Arc<BookingService>>,
    path: web::Path<Uuid>,
    req: web::Json<ConfirmBookingRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Booking confirmation validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let booking = service
        .confirm_booking(path.into_inner(), &req.confirmation_number)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        BookingResponse::from(booking),
        "Booking confirmed",
    )))
}

/// Cancel a booking
///
/// POST /api/v1/bookings/{id}/cancel
#[instrument(skip(service))]
pub async fn cancel_booking(
    service: web::Data<Arc<BookingService>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let booking = service.cancel_booking(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        BookingResponse::from(booking),
        "Booking cancelled",
    )))
}

/// Complete a booking
///
/// POST /api/v1/bookings/{id}/complete
#[instrument(skip(service))]
pub async fn complete_booking(
    service: web::Data<Arc<BookingService>>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let booking = service.complete_booking(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        BookingResponse::from(booking),
        "Booking completed",
    )))
}

/// Submit the review for a booking
///
/// POST /api/v1/bookings/{id}/review
#[instrument(skip(service, req))]
pub async fn submit_review(
    service: web::Data<Arc<ReviewService>>,
    path: web::Path<Uuid>,
    req: web::Json<ReviewRequest>,
) -> Result<HttpResponse, AppError> {
    req.validate().map_err(|e| {
        warn!("Review validation failed: {}", e);
        AppError::Validation(e.to_string())
    })?;

    let outcome = service
        .submit_review(path.into_inner(), req.into_inner().into())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::with_message(
        ReviewResponse::from(outcome),
        "Review submitted",
    )))
}

/// Configure booking routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .route("", web::post().to(create_booking))
            .route("", web::get().to(list_bookings))
            .route("/{id}", web::get().to(get_booking))
            .route("/{id}", web::patch().to(modify_booking))
            .route("/{id}/confirm", web::post().to(confirm_booking))
            .route("/{id}/cancel", web::post().to(cancel_booking))
            .route("/{id}/complete", web::post().to(complete_booking))
            .route("/{id}/review", web::post().to(submit_review)),
    );
}
