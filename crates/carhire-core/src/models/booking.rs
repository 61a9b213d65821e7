//! Booking model
//!
//! The transactional record of a rental. Status transitions are enforced
//! here so every caller gets the same rules:
//!
//! ```text
//! pending ──confirm──> confirmed ──complete──> completed
//!    │                    │
//!    └──modify──> modified <──modify──┘
//!
//! modified ──confirm──> confirmed   (on-request, not yet accepted)
//!
//! pending | confirmed | modified ──cancel──> cancelled
//! ```

use crate::models::{CommissionTerms, PriceBreakdown};
use crate::{AppError, AppResult};
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

const MINUTES_PER_DAY: i64 = 24 * 60;

/// Booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Waiting for supplier confirmation (on-request suppliers)
    Pending,
    /// Confirmed by the supplier or free-sale
    Confirmed,
    /// Dates or extras changed after creation
    Modified,
    /// Rental finished
    Completed,
    /// Cancelled before completion
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "pending"),
            BookingStatus::Confirmed => write!(f, "confirmed"),
            BookingStatus::Modified => write!(f, "modified"),
            BookingStatus::Completed => write!(f, "completed"),
            BookingStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl BookingStatus {
    /// Completed and cancelled bookings accept no further transitions
    pub fn is_final(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }
}

/// Customer identity attached to a booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// Input for creating a booking
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub car_id: String,
    pub customer: Customer,
    pub pickup: NaiveDateTime,
    pub dropoff: NaiveDateTime,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub extras: Vec<String>,
}

/// Requested changes to an existing booking; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct BookingChanges {
    pub pickup: Option<NaiveDateTime>,
    pub dropoff: Option<NaiveDateTime>,
    pub extras: Option<Vec<String>>,
}

/// Whole rental days between pickup and dropoff, rounded up, at least one
pub fn rental_days(pickup: NaiveDateTime, dropoff: NaiveDateTime) -> AppResult<u32> {
    let minutes = (dropoff - pickup).num_minutes();
    if minutes <= 0 {
        return Err(AppError::Validation(format!(
            "dropoff {} must be after pickup {}",
            dropoff, pickup
        )));
    }

    let days = (minutes + MINUTES_PER_DAY - 1) / MINUTES_PER_DAY;
    u32::try_from(days.max(1))
        .map_err(|_| AppError::Validation(format!("rental of {} days is too long", days)))
}

/// Booking entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: Uuid,
    pub car_id: String,
    pub supplier_id: String,
    pub customer: Customer,
    pub pickup: NaiveDateTime,
    pub dropoff: NaiveDateTime,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,

    /// Ids of the selected extras
    pub selected_extras: Vec<String>,

    /// Gross price including extras
    pub total_price: Decimal,
    pub amount_paid_online: Decimal,
    pub amount_to_pay_at_desk: Decimal,

    pub status: BookingStatus,
    pub review_submitted: bool,
    pub confirmation_number: Option<String>,

    /// Supplier terms at creation; later supplier edits do not apply
    pub terms: CommissionTerms,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Rental duration in whole days
    pub fn rental_days(&self) -> AppResult<u32> {
        rental_days(self.pickup, self.dropoff)
    }

    /// Overwrite the stored amounts from a price breakdown
    pub fn apply_breakdown(&mut self, breakdown: &PriceBreakdown) {
        self.total_price = breakdown.final_total;
        self.amount_paid_online = breakdown.pay_now;
        self.amount_to_pay_at_desk = breakdown.pay_at_desk;
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    fn invalid_transition(&self, action: &str) -> AppError {
        AppError::InvalidState(format!(
            "cannot {} booking {} in status {}",
            action, self.id, self.status
        ))
    }

    /// Fails for completed or cancelled bookings
    pub fn ensure_modifiable(&self) -> AppResult<()> {
        if self.status.is_final() {
            return Err(self.invalid_transition("modify"));
        }
        Ok(())
    }

    /// Mark as modified after a date or extras edit
    pub fn mark_modified(&mut self) -> AppResult<()> {
        self.ensure_modifiable()?;
        self.status = BookingStatus::Modified;
        self.touch();
        Ok(())
    }

    /// Supplier confirmation
    ///
    /// Legal while pending, or after a modification of an on-request
    /// booking the supplier never accepted.
    pub fn confirm(&mut self, confirmation_number: &str) -> AppResult<()> {
        let allowed = match self.status {
            BookingStatus::Pending => true,
            BookingStatus::Modified => !self.is_accepted(),
            _ => false,
        };
        if !allowed {
            return Err(self.invalid_transition("confirm"));
        }
        self.status = BookingStatus::Confirmed;
        self.confirmation_number = Some(confirmation_number.to_string());
        self.touch();
        Ok(())
    }

    /// Cancel any booking that has not completed
    pub fn cancel(&mut self) -> AppResult<()> {
        if self.status.is_final() {
            return Err(self.invalid_transition("cancel"));
        }
        self.status = BookingStatus::Cancelled;
        self.touch();
        Ok(())
    }

    /// Whether the supplier has accepted this booking at some point
    ///
    /// Free-sale bookings are accepted on creation; on-request bookings
    /// only once a confirmation number was recorded.
    pub fn is_accepted(&self) -> bool {
        use crate::models::BookingMode;

        self.terms.booking_mode == BookingMode::FreeSale || self.confirmation_number.is_some()
    }

    /// Finish the rental
    pub fn complete(&mut self) -> AppResult<()> {
        let allowed = match self.status {
            BookingStatus::Confirmed => true,
            BookingStatus::Modified => self.is_accepted(),
            _ => false,
        };
        if !allowed {
            return Err(self.invalid_transition("complete"));
        }
        self.status = BookingStatus::Completed;
        self.touch();
        Ok(())
    }

    /// Flip the review flag; never flips back
    pub fn mark_reviewed(&mut self) -> AppResult<()> {
        if self.review_submitted {
            return Err(AppError::InvalidState(format!(
                "review already submitted for booking {}",
                self.id
            )));
        }
        self.review_submitted = true;
        self.touch();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BookingMode, CommissionModel};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn at(day: u32, hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 7, day)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn booking(status: BookingStatus, mode: BookingMode) -> Booking {
        let now = Utc::now();
        Booking {
            id: Uuid::new_v4(),
            car_id: "car-1".to_string(),
            supplier_id: "sup-1".to_string(),
            customer: Customer {
                name: "Ana Silva".to_string(),
                email: "ana@example.com".to_string(),
                phone: None,
            },
            pickup: at(1, 10),
            dropoff: at(6, 10),
            pickup_location: None,
            dropoff_location: None,
            selected_extras: vec![],
            total_price: dec!(287.5),
            amount_paid_online: dec!(37.5),
            amount_to_pay_at_desk: dec!(250),
            status,
            review_submitted: false,
            confirmation_number: None,
            terms: CommissionTerms {
                model: CommissionModel::PartialPrepaid,
                value: Some(dec!(0.15)),
                booking_mode: mode,
            },
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_rental_days() {
        assert_eq!(rental_days(at(1, 10), at(6, 10)).unwrap(), 5);
        // Any started day counts
        assert_eq!(rental_days(at(1, 10), at(6, 11)).unwrap(), 6);
        assert_eq!(rental_days(at(1, 10), at(1, 12)).unwrap(), 1);
    }

    #[test]
    fn test_rental_days_rejects_inverted_range() {
        assert!(matches!(
            rental_days(at(6, 10), at(1, 10)),
            Err(AppError::Validation(_))
        ));
        assert!(matches!(
            rental_days(at(1, 10), at(1, 10)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_confirm_only_from_pending() {
        let mut pending = booking(BookingStatus::Pending, BookingMode::OnRequest);
        pending.confirm("SUP-123").unwrap();
        assert_eq!(pending.status, BookingStatus::Confirmed);
        assert_eq!(pending.confirmation_number.as_deref(), Some("SUP-123"));

        for status in [
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            let mut b = booking(status, BookingMode::OnRequest);
            assert!(matches!(b.confirm("X"), Err(AppError::InvalidState(_))));
            assert_eq!(b.status, status);
            assert!(b.confirmation_number.is_none());
        }
    }

    #[test]
    fn test_reconfirm_modified_on_request_booking() {
        let mut unaccepted = booking(BookingStatus::Modified, BookingMode::OnRequest);
        unaccepted.confirm("SUP-5").unwrap();
        assert_eq!(unaccepted.status, BookingStatus::Confirmed);
        assert_eq!(unaccepted.confirmation_number.as_deref(), Some("SUP-5"));

        // Already accepted once: no second confirmation
        let mut accepted = booking(BookingStatus::Modified, BookingMode::OnRequest);
        accepted.confirmation_number = Some("SUP-1".to_string());
        assert!(matches!(accepted.confirm("SUP-2"), Err(AppError::InvalidState(_))));
        assert_eq!(accepted.confirmation_number.as_deref(), Some("SUP-1"));

        let mut free_sale = booking(BookingStatus::Modified, BookingMode::FreeSale);
        assert!(matches!(free_sale.confirm("X"), Err(AppError::InvalidState(_))));
        assert_eq!(free_sale.status, BookingStatus::Modified);
    }

    #[test]
    fn test_cancel_before_completion() {
        for status in [BookingStatus::Pending, BookingStatus::Confirmed, BookingStatus::Modified] {
            let mut b = booking(status, BookingMode::FreeSale);
            b.cancel().unwrap();
            assert_eq!(b.status, BookingStatus::Cancelled);
        }

        let mut done = booking(BookingStatus::Completed, BookingMode::FreeSale);
        assert!(done.cancel().is_err());
        assert_eq!(done.status, BookingStatus::Completed);
    }

    #[test]
    fn test_complete_respects_booking_mode() {
        let mut free_sale = booking(BookingStatus::Modified, BookingMode::FreeSale);
        free_sale.complete().unwrap();
        assert_eq!(free_sale.status, BookingStatus::Completed);

        let mut on_request = booking(BookingStatus::Modified, BookingMode::OnRequest);
        assert!(on_request.complete().is_err());
        assert_eq!(on_request.status, BookingStatus::Modified);

        on_request.confirmation_number = Some("SUP-9".to_string());
        on_request.complete().unwrap();

        let mut pending = booking(BookingStatus::Pending, BookingMode::OnRequest);
        assert!(pending.complete().is_err());
    }

    #[test]
    fn test_modify_rejected_once_final() {
        let mut cancelled = booking(BookingStatus::Cancelled, BookingMode::FreeSale);
        assert!(cancelled.mark_modified().is_err());

        let mut pending = booking(BookingStatus::Pending, BookingMode::OnRequest);
        pending.mark_modified().unwrap();
        assert_eq!(pending.status, BookingStatus::Modified);
    }

    #[test]
    fn test_review_flag_flips_once() {
        let mut b = booking(BookingStatus::Completed, BookingMode::FreeSale);
        b.mark_reviewed().unwrap();
        assert!(b.review_submitted);
        assert!(matches!(b.mark_reviewed(), Err(AppError::InvalidState(_))));
        assert!(b.review_submitted);
    }

    #[test]
    fn test_status_display_matches_serde() {
        for status in [BookingStatus::Modified, BookingStatus::Cancelled] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status));
        }
    }
}
