//! CarHire Store Layer
//!
//! In-memory implementations of the repository traits defined in
//! carhire-core. It includes:
//!
//! - A generic keyed repository guarded by a `parking_lot` lock
//! - Car, supplier and booking repository implementations
//! - Catalog seeding from a JSON file

pub mod memory;
pub mod seed;

pub use memory::{
    Keyed, MemoryBookingRepository, MemoryCarRepository, MemoryRepository,
    MemorySupplierRepository,
};
pub use seed::{load_seed, SeedData};

// Re-export commonly used types
pub use carhire_core::{AppError, AppResult};
