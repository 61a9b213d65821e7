//! Data Transfer Objects (DTOs) for API requests and responses

pub mod booking;
pub mod common;
pub mod quote;
pub mod review;
pub mod search;

pub use booking::*;
pub use common::*;
pub use quote::*;
pub use review::*;
pub use search::*;
