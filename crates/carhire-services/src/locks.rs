//! Per-booking mutual exclusion
//!
//! Lifecycle operations are read-modify-write sequences over the booking
//! repository. Two concurrent edits of the same booking must not interleave,
//! while edits of different bookings proceed in parallel.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};
use tracing::trace;
use uuid::Uuid;

/// Registry of async locks keyed by booking id
#[derive(Debug, Default)]
pub struct BookingLocks {
    locks: Mutex<HashMap<Uuid, Arc<AsyncMutex<()>>>>,
}

impl BookingLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for exclusive access to one booking
    ///
    /// The guard may be held across await points; dropping it releases the
    /// booking for the next caller.
    pub async fn acquire(&self, booking_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock();
            // Entries only referenced by the map are idle
            locks.retain(|id, lock| *id == booking_id || Arc::strong_count(lock) > 1);
            locks
                .entry(booking_id)
                .or_insert_with(|| Arc::new(AsyncMutex::new(())))
                .clone()
        };

        trace!(%booking_id, "Waiting for booking lock");
        lock.lock_owned().await
    }

    /// Number of tracked lock entries
    pub fn tracked(&self) -> usize {
        self.locks.lock().len()
    }
}
