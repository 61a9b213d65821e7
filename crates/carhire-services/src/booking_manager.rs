//! Booking lifecycle manager
//!
//! Creates and mutates bookings:
//! - Price new bookings through the pricing engine
//! - Re-price on date or extras changes
//! - Supplier confirmation of on-request bookings
//! - Cancellation and completion
//!
//! Every mutation runs under the booking's lock so concurrent requests for
//! the same booking cannot lose updates.

use carhire_core::{
    models::{
        rental_days, Booking, BookingChanges, BookingMode, BookingStatus, Car, Extra, NewBooking,
        PriceBreakdown, Supplier,
    },
    traits::{BookingRepository, CarRepository, SupplierRepository},
    AppError, AppResult,
};
use chrono::{NaiveDateTime, Utc};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::locks::BookingLocks;
use crate::pricing::PricingEngine;

/// Booking lifecycle manager
pub struct BookingManager<C: CarRepository, S: SupplierRepository, B: BookingRepository> {
    car_repo: Arc<C>,
    supplier_repo: Arc<S>,
    booking_repo: Arc<B>,
    pricing: Arc<PricingEngine>,
    locks: Arc<BookingLocks>,
}

impl<C: CarRepository, S: SupplierRepository, B: BookingRepository> BookingManager<C, S, B> {
    /// Create a new booking manager
    pub fn new(
        car_repo: Arc<C>,
        supplier_repo: Arc<S>,
        booking_repo: Arc<B>,
        pricing: Arc<PricingEngine>,
        locks: Arc<BookingLocks>,
    ) -> Self {
        Self {
            car_repo,
            supplier_repo,
            booking_repo,
            pricing,
            locks,
        }
    }

    async fn load_car(&self, car_id: &str) -> AppResult<Car> {
        self.car_repo
            .get(&car_id.to_string())
            .await?
            .ok_or_else(|| AppError::not_found("car", car_id))
    }

    async fn load_supplier(&self, supplier_id: &str) -> AppResult<Supplier> {
        self.supplier_repo
            .get(&supplier_id.to_string())
            .await?
            .ok_or_else(|| AppError::not_found("supplier", supplier_id))
    }

    async fn load_booking(&self, booking_id: Uuid) -> AppResult<Booking> {
        self.booking_repo
            .get(&booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("booking", booking_id))
    }

    /// Look up the car's extras by id, rejecting unknown or repeated ids
    fn select_extras(car: &Car, extra_ids: &[String]) -> AppResult<Vec<Extra>> {
        let mut seen = HashSet::new();
        extra_ids
            .iter()
            .map(|id| {
                if !seen.insert(id.as_str()) {
                    return Err(AppError::Validation(format!("extra {} selected twice", id)));
                }
                car.find_extra(id).cloned().ok_or_else(|| {
                    AppError::Validation(format!("extra {} is not offered for car {}", id, car.id))
                })
            })
            .collect()
    }

    fn price(
        &self,
        car: &Car,
        booking: &Booking,
        extras: &[Extra],
    ) -> AppResult<PriceBreakdown> {
        let days = booking.rental_days()?;
        Ok(self.pricing.compute_price_breakdown(
            car,
            &booking.terms,
            days,
            booking.pickup.date(),
            extras,
        ))
    }

    /// Price a prospective rental without creating anything
    #[instrument(skip(self, extra_ids))]
    pub async fn quote(
        &self,
        car_id: &str,
        pickup: NaiveDateTime,
        dropoff: NaiveDateTime,
        extra_ids: &[String],
    ) -> AppResult<PriceBreakdown> {
        let days = rental_days(pickup, dropoff)?;
        let car = self.load_car(car_id).await?;
        let supplier = self.load_supplier(&car.supplier_id).await?;
        let extras = Self::select_extras(&car, extra_ids)?;

        Ok(self.pricing.compute_price_breakdown(
            &car,
            &supplier.commission_terms(),
            days,
            pickup.date(),
            &extras,
        ))
    }

    /// Create a booking
    ///
    /// The booking starts `pending` for on-request suppliers and `confirmed`
    /// for free-sale suppliers. The supplier's current commission terms are
    /// snapshotted onto the booking.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The car or its supplier does not exist
    /// - Dropoff is not after pickup
    /// - An extra is not offered for the car
    #[instrument(skip(self, request), fields(car_id = %request.car_id))]
    pub async fn create_booking(&self, request: NewBooking) -> AppResult<Booking> {
        rental_days(request.pickup, request.dropoff)?;
        let car = self.load_car(&request.car_id).await?;
        let supplier = self.load_supplier(&car.supplier_id).await?;
        let extras = Self::select_extras(&car, &request.extras)?;

        let terms = supplier.commission_terms();
        let status = match terms.booking_mode {
            BookingMode::OnRequest => BookingStatus::Pending,
            BookingMode::FreeSale => BookingStatus::Confirmed,
        };

        let now = Utc::now();
        let mut booking = Booking {
            id: Uuid::new_v4(),
            car_id: car.id.clone(),
            supplier_id: supplier.id.clone(),
            customer: request.customer,
            pickup: request.pickup,
            dropoff: request.dropoff,
            pickup_location: request.pickup_location,
            dropoff_location: request.dropoff_location,
            selected_extras: request.extras,
            total_price: Default::default(),
            amount_paid_online: Default::default(),
            amount_to_pay_at_desk: Default::default(),
            status,
            review_submitted: false,
            confirmation_number: None,
            terms,
            created_at: now,
            updated_at: now,
        };

        let breakdown = self.price(&car, &booking, &extras)?;
        booking.apply_breakdown(&breakdown);

        let booking = self.booking_repo.upsert(booking).await?;

        info!(
            booking_id = %booking.id,
            supplier_id = %booking.supplier_id,
            status = %booking.status,
            total = %booking.total_price,
            pay_now = %booking.amount_paid_online,
            "Booking created"
        );

        Ok(booking)
    }

    /// Fetch one booking
    pub async fn get_booking(&self, booking_id: Uuid) -> AppResult<Booking> {
        self.load_booking(booking_id).await
    }

    /// List bookings, optionally only those of one customer (newest first)
    #[instrument(skip(self))]
    pub async fn list_bookings(&self, customer_email: Option<&str>) -> AppResult<Vec<Booking>> {
        match customer_email {
            Some(email) => self.booking_repo.list_by_customer(email).await,
            None => {
                let mut bookings = self.booking_repo.list().await?;
                bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
                Ok(bookings)
            }
        }
    }

    /// Change dates and/or extras of a booking
    ///
    /// When anything actually changed the price is recomputed from the new
    /// start date and duration with the booking's snapshot terms. The status
    /// becomes `modified` either way.
    #[instrument(skip(self, changes))]
    pub async fn modify_booking(
        &self,
        booking_id: Uuid,
        changes: BookingChanges,
    ) -> AppResult<Booking> {
        let _guard = self.locks.acquire(booking_id).await;

        let mut booking = self.load_booking(booking_id).await?;
        booking.ensure_modifiable()?;

        let pickup = changes.pickup.unwrap_or(booking.pickup);
        let dropoff = changes.dropoff.unwrap_or(booking.dropoff);
        let extras = changes
            .extras
            .unwrap_or_else(|| booking.selected_extras.clone());
        rental_days(pickup, dropoff)?;

        let changed =
            pickup != booking.pickup || dropoff != booking.dropoff || extras != booking.selected_extras;

        if changed {
            let car = self.load_car(&booking.car_id).await?;
            let selected = Self::select_extras(&car, &extras)?;

            booking.pickup = pickup;
            booking.dropoff = dropoff;
            booking.selected_extras = extras;

            let breakdown = self.price(&car, &booking, &selected)?;
            debug!(
                %booking_id,
                old_total = %booking.total_price,
                new_total = %breakdown.final_total,
                "Booking re-priced"
            );
            booking.apply_breakdown(&breakdown);
        }

        booking.mark_modified()?;
        let booking = self.booking_repo.upsert(booking).await?;

        info!(%booking_id, repriced = changed, total = %booking.total_price, "Booking modified");
        Ok(booking)
    }

    /// Record the supplier's confirmation of a pending booking
    #[instrument(skip(self))]
    pub async fn confirm_booking(
        &self,
        booking_id: Uuid,
        confirmation_number: &str,
    ) -> AppResult<Booking> {
        let confirmation_number = confirmation_number.trim();
        if confirmation_number.is_empty() {
            return Err(AppError::Validation(
                "confirmation number must not be empty".to_string(),
            ));
        }

        let _guard = self.locks.acquire(booking_id).await;

        let mut booking = self.load_booking(booking_id).await?;
        if let Err(e) = booking.confirm(confirmation_number) {
            warn!(%booking_id, status = %booking.status, "Rejected confirmation");
            return Err(e);
        }

        let booking = self.booking_repo.upsert(booking).await?;
        info!(%booking_id, confirmation_number, "Booking confirmed");
        Ok(booking)
    }

    /// Cancel a booking that has not completed
    #[instrument(skip(self))]
    pub async fn cancel_booking(&self, booking_id: Uuid) -> AppResult<Booking> {
        let _guard = self.locks.acquire(booking_id).await;

        let mut booking = self.load_booking(booking_id).await?;
        booking.cancel()?;

        let booking = self.booking_repo.upsert(booking).await?;
        info!(%booking_id, "Booking cancelled");
        Ok(booking)
    }

    /// Mark the rental as finished
    #[instrument(skip(self))]
    pub async fn complete_booking(&self, booking_id: Uuid) -> AppResult<Booking> {
        let _guard = self.locks.acquire(booking_id).await;

        let mut booking = self.load_booking(booking_id).await?;
        booking.complete()?;

        let booking = self.booking_repo.upsert(booking).await?;
        info!(%booking_id, "Booking completed");
        Ok(booking)
    }
}
