//! Local cache of API data for instant startup rendering.
//!
//! Data is cached as JSON files in the platform cache directory and
//! refreshed in the background when stale.

pub mod manager;

pub use manager::{CacheAges, CacheManager, CachedData};
