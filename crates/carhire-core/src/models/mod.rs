//! Domain models for CarHire
//!
//! This module contains all the core domain models used throughout the application.

pub mod booking;
pub mod car;
pub mod pricing;
pub mod review;
pub mod search;
pub mod supplier;

pub use booking::{rental_days, Booking, BookingChanges, BookingStatus, Customer, NewBooking};
pub use car::{
    Capacity, Car, DetailedRatings, Extra, ExtraPricing, ExternalPricing, FuelPolicy,
    MileagePolicy, RateBand, RateTier, Transmission,
};
pub use pricing::{CommissionResult, PriceBreakdown, ResolvedRate};
pub use review::ReviewRatings;
pub use search::{SearchOffer, SearchQuery};
pub use supplier::{BookingMode, CommissionModel, CommissionTerms, GracePeriod, GraceUnit, Supplier};
