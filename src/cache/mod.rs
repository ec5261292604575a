//! Cache module for storing resolved forecasts on disk
//!
//! This module provides a file-backed cache keyed by normalized (city, state)
//! with a fixed TTL. Stale and corrupt entries read as misses, and write failures
//! never reach the caller.

mod manager;

pub use manager::{cache_key, Clock, SystemClock, WeatherCache};
