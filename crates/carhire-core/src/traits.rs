//! Common traits for repositories and providers
//!
//! Defines the storage and upstream seams. Services depend on these traits,
//! never on a concrete store, so the in-memory store can be swapped for a
//! real persistence backend.

use crate::error::AppError;
use crate::models::{Booking, Car, SearchOffer, SearchQuery, Supplier};
use async_trait::async_trait;
use uuid::Uuid;

/// Generic repository trait
#[async_trait]
pub trait Repository<T, ID>: Send + Sync
where
    ID: Send + Sync,
{
    /// Find entity by ID
    async fn get(&self, id: &ID) -> Result<Option<T>, AppError>;

    /// Insert or replace an entity, returning the stored value
    async fn upsert(&self, entity: T) -> Result<T, AppError>;

    /// List all entities
    async fn list(&self) -> Result<Vec<T>, AppError>;
}

/// Car repository trait
pub trait CarRepository: Repository<Car, String> {}

/// Supplier repository trait
pub trait SupplierRepository: Repository<Supplier, String> {}

/// Booking repository trait with specialized methods
#[async_trait]
pub trait BookingRepository: Repository<Booking, Uuid> {
    /// Bookings made by one customer, newest first
    async fn list_by_customer(&self, email: &str) -> Result<Vec<Booking>, AppError>;
}

/// External car search provider
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Search available cars; results are already normalized
    async fn search(&self, query: &SearchQuery) -> Result<Vec<SearchOffer>, AppError>;

    /// Endpoint used for diagnostics
    fn endpoint(&self) -> &str;
}
