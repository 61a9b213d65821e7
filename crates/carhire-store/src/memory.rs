//! In-memory repository implementation
//!
//! Entities live in a `BTreeMap` keyed by their id. Reads clone out of the
//! map so no lock is ever held across an await point.

use carhire_core::{
    models::{Booking, Car, Supplier},
    traits::{BookingRepository, CarRepository, Repository, SupplierRepository},
    AppResult,
};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use tracing::{debug, instrument};
use uuid::Uuid;

/// Entities that know their own storage key
pub trait Keyed {
    type Key: Ord + Clone + Send + Sync + std::fmt::Debug;

    fn key(&self) -> Self::Key;
}

impl Keyed for Car {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

impl Keyed for Supplier {
    type Key = String;

    fn key(&self) -> String {
        self.id.clone()
    }
}

impl Keyed for Booking {
    type Key = Uuid;

    fn key(&self) -> Uuid {
        self.id
    }
}

/// Generic in-memory repository
pub struct MemoryRepository<T: Keyed> {
    entries: RwLock<BTreeMap<T::Key, T>>,
}

pub type MemoryCarRepository = MemoryRepository<Car>;
pub type MemorySupplierRepository = MemoryRepository<Supplier>;
pub type MemoryBookingRepository = MemoryRepository<Booking>;

impl<T: Keyed> MemoryRepository<T> {
    /// Create an empty repository
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored entities
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<T: Keyed> Default for MemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Keyed> FromIterator<T> for MemoryRepository<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let entries = iter.into_iter().map(|entity| (entity.key(), entity)).collect();
        Self {
            entries: RwLock::new(entries),
        }
    }
}

#[async_trait]
impl<T> Repository<T, T::Key> for MemoryRepository<T>
where
    T: Keyed + Clone + Send + Sync + 'static,
{
    async fn get(&self, id: &T::Key) -> AppResult<Option<T>> {
        Ok(self.entries.read().get(id).cloned())
    }

    async fn upsert(&self, entity: T) -> AppResult<T> {
        let key = entity.key();
        debug!(key = ?key, "Upserting entity");
        self.entries.write().insert(key, entity.clone());
        Ok(entity)
    }

    async fn list(&self) -> AppResult<Vec<T>> {
        Ok(self.entries.read().values().cloned().collect())
    }
}

impl CarRepository for MemoryCarRepository {}

impl SupplierRepository for MemorySupplierRepository {}

#[async_trait]
impl BookingRepository for MemoryBookingRepository {
    #[instrument(skip(self))]
    async fn list_by_customer(&self, email: &str) -> AppResult<Vec<Booking>> {
        let mut bookings: Vec<Booking> = self
            .entries
            .read()
            .values()
            .filter(|booking| booking.customer.email.eq_ignore_ascii_case(email))
            .cloned()
            .collect();

        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(bookings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use carhire_core::models::{
        BookingMode, BookingStatus, CommissionModel, CommissionTerms, Customer,
    };
    use chrono::{Duration, NaiveDate, Utc};
    use rust_decimal_macros::dec;

    fn car(id: &str, supplier_id: &str) -> Car {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "supplier_id": supplier_id,
            "name": "Renault Clio",
            "category": "economy",
        }))
        .unwrap()
    }

    fn booking(email: &str, age_minutes: i64) -> Booking {
        let created = Utc::now() - Duration::minutes(age_minutes);
        let pickup = NaiveDate::from_ymd_opt(2026, 7, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        Booking {
            id: Uuid::new_v4(),
            car_id: "car-1".to_string(),
            supplier_id: "sup-1".to_string(),
            customer: Customer {
                name: "Test".to_string(),
                email: email.to_string(),
                phone: None,
            },
            pickup,
            dropoff: pickup + Duration::days(3),
            pickup_location: None,
            dropoff_location: None,
            selected_extras: vec![],
            total_price: dec!(100),
            amount_paid_online: dec!(10),
            amount_to_pay_at_desk: dec!(90),
            status: BookingStatus::Confirmed,
            review_submitted: false,
            confirmation_number: None,
            terms: CommissionTerms {
                model: CommissionModel::FullPrepaid,
                value: None,
                booking_mode: BookingMode::FreeSale,
            },
            created_at: created,
            updated_at: created,
        }
    }

    #[tokio::test]
    async fn test_upsert_and_get() {
        let repo = MemoryCarRepository::new();
        assert!(repo.is_empty());

        repo.upsert(car("car-1", "sup-1")).await.unwrap();
        let mut updated = car("car-1", "sup-1");
        updated.name = "Renault Clio Hybrid".to_string();
        repo.upsert(updated).await.unwrap();

        assert_eq!(repo.len(), 1);
        let stored = repo.get(&"car-1".to_string()).await.unwrap().unwrap();
        assert_eq!(stored.name, "Renault Clio Hybrid");
        assert!(repo.get(&"missing".to_string()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_key() {
        let repo: MemoryCarRepository = vec![
            car("car-3", "sup-1"),
            car("car-1", "sup-1"),
            car("car-2", "sup-2"),
        ]
        .into_iter()
        .collect();

        let cars = repo.list().await.unwrap();
        let ids: Vec<&str> = cars.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["car-1", "car-2", "car-3"]);
    }

    #[tokio::test]
    async fn test_list_by_customer_newest_first() {
        let repo = MemoryBookingRepository::new();
        let old = booking("ana@example.com", 60);
        let new = booking("ANA@example.com", 5);
        let other = booking("bob@example.com", 1);
        repo.upsert(old.clone()).await.unwrap();
        repo.upsert(new.clone()).await.unwrap();
        repo.upsert(other).await.unwrap();

        let found = repo.list_by_customer("ana@example.com").await.unwrap();
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].id, new.id);
        assert_eq!(found[1].id, old.id);
    }
}
