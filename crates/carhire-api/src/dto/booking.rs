//! Booking DTOs
//!
//! Request and response types for booking lifecycle endpoints.

use carhire_core::models::{
    Booking, BookingChanges, BookingMode, CommissionModel, Customer, NewBooking,
};
use chrono::{DateTime, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Customer details on a booking request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CustomerRequest {
    #[validate(length(min = 1, max = 200, message = "Customer name is required"))]
    pub name: String,

    #[validate(email(message = "Invalid email address"))]
    pub email: String,

    #[validate(length(max = 30))]
    pub phone: Option<String>,
}

impl From<CustomerRequest> for Customer {
    fn from(req: CustomerRequest) -> Self {
        Customer {
            name: req.name.trim().to_string(),
            email: req.email.trim().to_string(),
            phone: req.phone,
        }
    }
}

/// Booking creation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateBookingRequest {
    #[validate(length(min = 1, max = 64, message = "Car id is required"))]
    pub car_id: String,

    #[validate(nested)]
    pub customer: CustomerRequest,

    /// Pickup date and time (local to the pickup location)
    pub pickup: NaiveDateTime,

    /// Dropoff date and time
    pub dropoff: NaiveDateTime,

    /// Pickup location code (e.g. "LIS")
    #[validate(length(min = 2, max = 10))]
    pub pickup_location: Option<String>,

    #[validate(length(min = 2, max = 10))]
    pub dropoff_location: Option<String>,

    /// Selected extra ids
    #[serde(default)]
    #[validate(length(max = 20, message = "Too many extras"))]
    pub extras: Vec<String>,
}

impl CreateBookingRequest {
    /// Convert to the lifecycle manager's input
    pub fn into_new_booking(self) -> NewBooking {
        NewBooking {
            car_id: self.car_id,
            customer: self.customer.into(),
            pickup: self.pickup,
            dropoff: self.dropoff,
            pickup_location: self.pickup_location,
            dropoff_location: self.dropoff_location,
            extras: self.extras,
        }
    }
}

/// Booking modification request; omitted fields keep their stored values
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct ModifyBookingRequest {
    pub pickup: Option<NaiveDateTime>,
    pub dropoff: Option<NaiveDateTime>,

    #[validate(length(max = 20, message = "Too many extras"))]
    pub extras: Option<Vec<String>>,
}

impl From<ModifyBookingRequest> for BookingChanges {
    fn from(req: ModifyBookingRequest) -> Self {
        BookingChanges {
            pickup: req.pickup,
            dropoff: req.dropoff,
            extras: req.extras,
        }
    }
}

/// Supplier confirmation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConfirmBookingRequest {
    #[validate(length(min = 1, max = 64, message = "Confirmation number is required"))]
    pub confirmation_number: String,
}

/// Query parameters for listing bookings
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BookingListParams {
    /// Only bookings of this customer
    #[validate(email)]
    pub customer_email: Option<String>,
}

/// Booking response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: Uuid,
    pub car_id: String,
    pub supplier_id: String,
    pub customer: Customer,
    pub pickup: NaiveDateTime,
    pub dropoff: NaiveDateTime,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
    pub extras: Vec<String>,
    pub total_price: Decimal,
    pub amount_paid_online: Decimal,
    pub amount_to_pay_at_desk: Decimal,
    pub status: String,
    pub review_submitted: bool,
    pub confirmation_number: Option<String>,
    pub commission_model: CommissionModel,
    pub booking_mode: BookingMode,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self {
            id: booking.id,
            car_id: booking.car_id,
            supplier_id: booking.supplier_id,
            customer: booking.customer,
            pickup: booking.pickup,
            dropoff: booking.dropoff,
            pickup_location: booking.pickup_location,
            dropoff_location: booking.dropoff_location,
            extras: booking.selected_extras,
            total_price: booking.total_price,
            amount_paid_online: booking.amount_paid_online,
            amount_to_pay_at_desk: booking.amount_to_pay_at_desk,
            status: booking.status.to_string(),
            review_submitted: booking.review_submitted,
            confirmation_number: booking.confirmation_number,
            commission_model: booking.terms.model,
            booking_mode: booking.terms.booking_mode,
            created_at: booking.created_at,
            updated_at: booking.updated_at,
        }
    }
}
