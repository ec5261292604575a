//! Cache-first weather lookup
//!
//! Ties the cache and the resolution pipeline together the way the `weather`
//! command uses them: serve a fresh cached entry when allowed, otherwise resolve
//! and write the result back.

use crate::cache::WeatherCache;
use crate::data::{ForecastFetcher, Geocoder, GridResolver, WeatherError, WeatherResolver, WeatherResult};

/// Where a lookup's result came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    Cache,
    Upstream,
}

/// A resolved forecast and its origin
#[derive(Debug, Clone, PartialEq)]
pub struct Lookup {
    pub result: WeatherResult,
    pub source: Source,
}

/// Looks up the forecast for a place
///
/// With `bypass_cache` the cached entry is not read, but a successful
/// resolution is still written back. Failed resolutions never touch the cache.
///
/// # Errors
/// Any [`WeatherError`] from the resolver; cache problems are never errors.
pub fn lookup_weather<G, R, F>(
    resolver: &WeatherResolver<G, R, F>,
    cache: Option<&WeatherCache>,
    city: &str,
    state: &str,
    bypass_cache: bool,
) -> Result<Lookup, WeatherError>
where
    G: Geocoder,
    R: GridResolver,
    F: ForecastFetcher,
{
    if !bypass_cache {
        if let Some(result) = cache.and_then(|c| c.get(city, state)) {
            return Ok(Lookup {
                result,
                source: Source::Cache,
            });
        }
    }

    let result = resolver.resolve(city, state)?;
    if let Some(cache) = cache {
        cache.set(city, state, &result);
    }

    Ok(Lookup {
        result,
        source: Source::Upstream,
    })
}
