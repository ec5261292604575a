//! File-backed weather cache
//!
//! Provides a `WeatherCache` that stores one JSON file per (city, state) with the
//! time it was written. Entries older than the TTL are ignored on read but stay
//! on disk until the next successful lookup for the same place overwrites them.

use chrono::{DateTime, TimeDelta, Utc};
use md5::{Digest, Md5};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::Span;

use crate::data::WeatherResult;

/// Source of the current time for expiry checks
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Record stored on disk
#[derive(Debug, Serialize, Deserialize)]
struct CacheEntry<T> {
    /// When the data was cached
    #[serde(rename = "_timestamp")]
    cached_at: DateTime<Utc>,
    /// The cached data
    data: T,
}

/// Derives the lookup key for a place
///
/// Lowercases both parts, joins them with a comma and returns the hex md5 digest,
/// so `("Springfield", "IL")` and `("SPRINGFIELD", "il")` share an entry.
pub fn cache_key(city: &str, state: &str) -> String {
    let normalized = format!("{},{}", city.to_lowercase(), state.to_lowercase());
    hex::encode(Md5::digest(normalized.as_bytes()))
}

/// Reads and writes cached forecasts
///
/// Caching is best-effort: read problems are reported as a miss and write
/// problems are logged and dropped, so callers never see a cache error.
#[derive(Clone)]
pub struct WeatherCache {
    /// Directory where cache files are stored
    cache_dir: PathBuf,
    ttl: TimeDelta,
    clock: Arc<dyn Clock>,
    span: Span,
}

impl std::fmt::Debug for WeatherCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WeatherCache")
            .field("cache_dir", &self.cache_dir)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl WeatherCache {
    /// Creates a cache rooted at `cache_dir`, creating the directory if needed
    ///
    /// A directory that cannot be created is logged; every later write will then
    /// fail quietly and every read will miss.
    pub fn new(cache_dir: impl Into<PathBuf>, ttl: Duration, parent: &Span) -> Self {
        let cache_dir = cache_dir.into();
        let span = tracing::debug_span!(parent: parent, "weather_cache");

        if let Err(e) = fs::create_dir_all(&cache_dir) {
            tracing::warn!(parent: &span, dir = %cache_dir.display(), error = %e, "cannot create cache directory");
        }

        Self {
            cache_dir,
            ttl: TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX),
            clock: Arc::new(SystemClock),
            span,
        }
    }

    /// Replaces the clock used for timestamps and expiry
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    /// Returns the path to the cache file for a place
    pub fn entry_path(&self, city: &str, state: &str) -> PathBuf {
        self.cache_dir.join(format!("{}.json", cache_key(city, state)))
    }

    /// Returns the cached forecast if one exists and is within the TTL
    ///
    /// Missing, unreadable, unparseable and stale entries all return `None`.
    pub fn get(&self, city: &str, state: &str) -> Option<WeatherResult> {
        let path = self.entry_path(city, state);
        if !path.exists() {
            tracing::debug!(parent: &self.span, city, state, "cache miss");
            return None;
        }

        let entry = match read_entry(&path) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::warn!(parent: &self.span, path = %path.display(), error = %e, "cache read error");
                return None;
            }
        };

        let age = self.clock.now() - entry.cached_at;
        if age > self.ttl {
            tracing::debug!(parent: &self.span, city, state, age_secs = age.num_seconds(), "cache expired");
            return None;
        }

        tracing::debug!(parent: &self.span, city, state, "cache hit");
        Some(entry.data)
    }

    /// Stores a forecast, replacing any earlier entry for the same place
    ///
    /// Failures are logged and swallowed.
    pub fn set(&self, city: &str, state: &str, result: &WeatherResult) {
        let path = self.entry_path(city, state);
        let entry = CacheEntry {
            cached_at: self.clock.now(),
            data: result,
        };

        match write_entry(&path, &entry) {
            Ok(()) => tracing::debug!(parent: &self.span, city, state, "cached weather"),
            Err(e) => {
                tracing::warn!(parent: &self.span, path = %path.display(), error = %e, "cache write error")
            }
        }
    }
}

fn read_entry(path: &Path) -> io::Result<CacheEntry<WeatherResult>> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

/// Writes to a sibling temp file and renames it into place so a concurrent
/// reader sees either the old record or the new one
fn write_entry(path: &Path, entry: &CacheEntry<&WeatherResult>) -> io::Result<()> {
    let json = serde_json::to_string(entry)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

    let tmp = path.with_extension(format!("{}.tmp", std::process::id()));
    fs::write(&tmp, json)?;
    fs::rename(&tmp, path).inspect_err(|_| {
        let _ = fs::remove_file(&tmp);
    })
}
