//! Shared application services
//!
//! Builds the service graph over the in-memory store and registers each
//! service as actix app data.

use actix_web::web;
use carhire_core::{config::PricingConfig, traits::SearchProvider};
use carhire_services::{BookingLocks, BookingManager, PricingEngine, ReviewAggregator};
use carhire_store::{
    MemoryBookingRepository, MemoryCarRepository, MemorySupplierRepository, SeedData,
};
use std::sync::Arc;
use tracing::info;

pub type BookingService =
    BookingManager<MemoryCarRepository, MemorySupplierRepository, MemoryBookingRepository>;

pub type ReviewService =
    ReviewAggregator<MemoryCarRepository, MemorySupplierRepository, MemoryBookingRepository>;

/// Every service a handler may extract
#[derive(Clone)]
pub struct AppServices {
    pub pricing: Arc<PricingEngine>,
    pub bookings: Arc<BookingService>,
    pub reviews: Arc<ReviewService>,
    pub search: Option<Arc<dyn SearchProvider>>,
}

impl AppServices {
    /// Wire services over a freshly seeded in-memory store
    pub fn from_seed(seed: SeedData, pricing: PricingConfig) -> Self {
        info!(
            suppliers = seed.suppliers.len(),
            cars = seed.cars.len(),
            commission_percent = %pricing.commission_percent,
            "Building services"
        );

        let cars: Arc<MemoryCarRepository> = Arc::new(seed.cars.into_iter().collect());
        let suppliers: Arc<MemorySupplierRepository> =
            Arc::new(seed.suppliers.into_iter().collect());
        let bookings = Arc::new(MemoryBookingRepository::new());

        let pricing = Arc::new(PricingEngine::new(pricing));
        // Lifecycle and review writes to one booking share the same locks
        let locks = Arc::new(BookingLocks::new());

        let booking_service = Arc::new(BookingManager::new(
            cars.clone(),
            suppliers.clone(),
            bookings.clone(),
            pricing.clone(),
            locks.clone(),
        ));
        let review_service = Arc::new(ReviewAggregator::new(cars, suppliers, bookings, locks));

        Self {
            pricing,
            bookings: booking_service,
            reviews: review_service,
            search: None,
        }
    }

    /// Enable the search endpoint
    pub fn with_search_provider(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.search = Some(provider);
        self
    }

    /// Register services as app data
    pub fn register(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(web::Data::new(self.pricing.clone()))
            .app_data(web::Data::new(self.bookings.clone()))
            .app_data(web::Data::new(self.reviews.clone()));

        if let Some(provider) = &self.search {
            cfg.app_data(web::Data::new(provider.clone()));
        }
    }
}
