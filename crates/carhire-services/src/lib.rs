//! Business logic services for CarHire
//!
//! This crate contains the pricing engine and the services that consume it.
//!
//! # Architecture
//!
//! Pricing is pure and synchronous; lifecycle and review services are async
//! because they go through the repository traits:
//! - Each service owns its dependencies (repositories, pricing engine, locks)
//! - Services are wrapped in Arc for safe sharing across request handlers
//! - Mutations of one booking are serialized through `BookingLocks`
//!
//! # Services
//!
//! - `resolve_rate` - Rate tier and band selection
//! - `apply_commission` / `pass_through_external` - Markup computation
//! - `PricingEngine` - Single price breakdown entry point
//! - `BookingManager` - Booking create/modify/confirm/cancel/complete
//! - `ReviewAggregator` - Folds reviews into car and supplier ratings

pub mod booking_manager;
pub mod commission;
pub mod locks;
pub mod pricing;
pub mod rate_resolver;
pub mod review_aggregator;

pub use booking_manager::BookingManager;
pub use commission::{apply_commission, pass_through_external};
pub use locks::BookingLocks;
pub use pricing::{extras_total, financial_split, FinancialSplit, PricingEngine};
pub use rate_resolver::resolve_rate;
pub use review_aggregator::{ReviewAggregator, ReviewOutcome};

/// Business logic constants
pub mod constants {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    /// Daily net rate used when no rate tier covers the start date
    pub const DEFAULT_DAILY_RATE: Decimal = dec!(50);

    /// Prior review count assumed when folding a review into a supplier rating
    pub const SUPPLIER_PRIOR_REVIEWS: u32 = 250;

    /// Divisor when folding a review into a car's detailed ratings
    pub const DETAILED_RATING_DIVISOR: u32 = 2;

    /// Decimal places kept on supplier ratings
    pub const SUPPLIER_RATING_DP: u32 = 1;
}
