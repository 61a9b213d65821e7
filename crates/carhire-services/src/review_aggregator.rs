//! Review aggregator
//!
//! The only writer of car and supplier rating state. A review is folded into
//! the car's four detailed ratings and into the supplier's overall rating,
//! and the booking's review flag is set.

use carhire_core::{
    models::{Booking, Car, DetailedRatings, ReviewRatings, Supplier},
    traits::{BookingRepository, CarRepository, SupplierRepository},
    AppError, AppResult,
};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::constants::{DETAILED_RATING_DIVISOR, SUPPLIER_PRIOR_REVIEWS, SUPPLIER_RATING_DP};
use crate::locks::BookingLocks;

/// Ratings after a review was applied
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewOutcome {
    pub booking: Booking,
    pub car_ratings: DetailedRatings,
    pub supplier_rating: Decimal,
}

/// Fold one 0-100 score into a running 0-100 average, rounding half up
fn fold_score(old: u8, score: u8) -> u8 {
    let sum = u32::from(old) + u32::from(score);
    let folded = (sum + DETAILED_RATING_DIVISOR / 2) / DETAILED_RATING_DIVISOR;
    u8::try_from(folded).unwrap_or(u8::MAX)
}

/// New detailed ratings for a car after one review
pub fn fold_detailed_ratings(old: DetailedRatings, review: &ReviewRatings) -> DetailedRatings {
    let [cleanliness, condition, value_for_money, pickup_speed] = review.as_percentages();
    DetailedRatings {
        cleanliness: fold_score(old.cleanliness, cleanliness),
        condition: fold_score(old.condition, condition),
        value_for_money: fold_score(old.value_for_money, value_for_money),
        pickup_speed: fold_score(old.pickup_speed, pickup_speed),
    }
}

/// New overall rating for a supplier after one review
///
/// The stored rating is weighted as if it came from a fixed number of prior
/// reviews and the new review contributes its 0-100 mean. The scales differ
/// (0-5 vs 0-100), so a single review can push the rating above 5.
pub fn fold_supplier_rating(old: Decimal, review: &ReviewRatings) -> Decimal {
    let percentages = review.as_percentages();
    let mean = percentages.iter().map(|p| Decimal::from(*p)).sum::<Decimal>()
        / Decimal::from(percentages.len());
    let prior = Decimal::from(SUPPLIER_PRIOR_REVIEWS);

    ((old * prior + mean) / (prior + Decimal::ONE))
        .round_dp_with_strategy(SUPPLIER_RATING_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Review aggregator
pub struct ReviewAggregator<C: CarRepository, S: SupplierRepository, B: BookingRepository> {
    car_repo: Arc<C>,
    supplier_repo: Arc<S>,
    booking_repo: Arc<B>,
    locks: Arc<BookingLocks>,
    /// Serializes rating read-modify-write across bookings
    ratings: Mutex<()>,
}

impl<C: CarRepository, S: SupplierRepository, B: BookingRepository> ReviewAggregator<C, S, B> {
    pub fn new(
        car_repo: Arc<C>,
        supplier_repo: Arc<S>,
        booking_repo: Arc<B>,
        locks: Arc<BookingLocks>,
    ) -> Self {
        Self {
            car_repo,
            supplier_repo,
            booking_repo,
            locks,
            ratings: Mutex::new(()),
        }
    }

    /// Submit the review for a booking
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - A rating is outside 1-5 stars
    /// - The booking, its car or its supplier does not exist
    /// - The booking was already reviewed
    #[instrument(skip(self, ratings))]
    pub async fn submit_review(
        &self,
        booking_id: Uuid,
        ratings: ReviewRatings,
    ) -> AppResult<ReviewOutcome> {
        ratings.validate()?;

        let _booking_guard = self.locks.acquire(booking_id).await;

        let mut booking = self
            .booking_repo
            .get(&booking_id)
            .await?
            .ok_or_else(|| AppError::not_found("booking", booking_id))?;

        if let Err(e) = booking.mark_reviewed() {
            warn!(%booking_id, "Duplicate review rejected");
            return Err(e);
        }

        let _ratings_guard = self.ratings.lock().await;

        let mut car: Car = self
            .car_repo
            .get(&booking.car_id)
            .await?
            .ok_or_else(|| AppError::not_found("car", &booking.car_id))?;
        let mut supplier: Supplier = self
            .supplier_repo
            .get(&booking.supplier_id)
            .await?
            .ok_or_else(|| AppError::not_found("supplier", &booking.supplier_id))?;

        car.detailed_ratings = fold_detailed_ratings(car.detailed_ratings, &ratings);
        let old_rating = supplier.rating;
        supplier.rating = fold_supplier_rating(old_rating, &ratings);

        let car = self.car_repo.upsert(car).await?;
        let supplier = self.supplier_repo.upsert(supplier).await?;
        let booking = self.booking_repo.upsert(booking).await?;

        info!(
            %booking_id,
            car_id = %car.id,
            supplier_id = %supplier.id,
            %old_rating,
            new_rating = %supplier.rating,
            "Review applied"
        );

        Ok(ReviewOutcome {
            booking,
            car_ratings: car.detailed_ratings,
            supplier_rating: supplier.rating,
        })
    }
}
