//! External search provider integration
//!
//! The provider is reached over plain HTTP/JSON. Its results use loosely
//! typed camelCase fields; `normalize_search_result` maps them onto `Car`
//! with a fixed set of defaults so no call site has to guess.
//!
//! # Usage
//!
//! ```rust,ignore
//! use carhire_upstream::HttpSearchProvider;
//!
//! let provider = HttpSearchProvider::new("http://search.internal/cars", 5000)?;
//! let offers = provider.search(&query).await?;
//! ```

mod client;
mod normalize;

pub use client::HttpSearchProvider;
pub use normalize::{normalize_search_result, parse_money, RawSearchResult};
