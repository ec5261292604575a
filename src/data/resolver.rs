//! Weather resolution pipeline: geocode, grid lookup, forecast fetch

use tracing::Span;

use super::{
    build_client, ForecastFetcher, Geocoder, GridResolver, NominatimGeocoder, NwsForecastFetcher,
    NwsGridResolver, WeatherError, WeatherResult,
};
use crate::config::Config;

/// Composes the three stages into one normalized [`WeatherResult`]
///
/// Stages run strictly in sequence and the first failure aborts the lookup, so a
/// failed geocode never reaches the grid resolver and a failed grid lookup never
/// reaches the forecast fetcher. Errors are logged once here and returned as-is.
#[derive(Debug)]
pub struct WeatherResolver<G, R, F> {
    geocoder: G,
    grid_resolver: R,
    forecast_fetcher: F,
    span: Span,
}

/// Resolver wired to the public Nominatim and weather.gov services
pub type HttpWeatherResolver = WeatherResolver<NominatimGeocoder, NwsGridResolver, NwsForecastFetcher>;

impl HttpWeatherResolver {
    /// Builds the HTTP-backed pipeline from settings
    ///
    /// # Errors
    /// Returns the client construction error if the HTTP client cannot be built
    /// (e.g. TLS backend initialization failure).
    pub fn from_config(config: &Config, parent: &Span) -> Result<Self, reqwest::Error> {
        let client = build_client(config)?;
        Ok(Self::new(
            NominatimGeocoder::new(client.clone(), config.geocode_url.clone(), parent),
            NwsGridResolver::new(client.clone(), config.weather_base_url.clone(), parent),
            NwsForecastFetcher::new(client, parent),
            parent,
        ))
    }
}

impl<G, R, F> WeatherResolver<G, R, F>
where
    G: Geocoder,
    R: GridResolver,
    F: ForecastFetcher,
{
    pub fn new(geocoder: G, grid_resolver: R, forecast_fetcher: F, parent: &Span) -> Self {
        Self {
            geocoder,
            grid_resolver,
            forecast_fetcher,
            span: tracing::debug_span!(parent: parent, "resolver"),
        }
    }

    /// Resolves the forecast for a US city and state
    ///
    /// # Errors
    /// - [`WeatherError::NotFound`] when the place cannot be geocoded
    /// - [`WeatherError::Upstream`] on network failure, timeout or error status
    /// - [`WeatherError::Malformed`] when a response lacks a required field
    pub fn resolve(&self, city: &str, state: &str) -> Result<WeatherResult, WeatherError> {
        self.run_pipeline(city, state).map_err(|err| {
            tracing::error!(parent: &self.span, city, state, error = %err, "weather fetch failed");
            err
        })
    }

    fn run_pipeline(&self, city: &str, state: &str) -> Result<WeatherResult, WeatherError> {
        let coordinates = self.geocoder.geocode(city, state)?;
        let grid = self.grid_resolver.resolve_grid(coordinates)?;
        let periods = self.forecast_fetcher.fetch_forecast(&grid.forecast_url)?;

        let result = WeatherResult::assemble(coordinates, grid, periods);
        tracing::debug!(
            parent: &self.span,
            location = %result.location_name,
            periods = result.periods.len(),
            "resolved forecast"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Coordinates, ErrorKind, ForecastPeriod, GridPoint, GridPosition, Stage};
    use std::cell::{Cell, RefCell};

    struct StubGeocoder {
        result: Result<Coordinates, WeatherError>,
        calls: Cell<usize>,
    }

    impl Geocoder for StubGeocoder {
        fn geocode(&self, _city: &str, _state: &str) -> Result<Coordinates, WeatherError> {
            self.calls.set(self.calls.get() + 1);
            self.result.clone()
        }
    }

    struct StubGrid {
        result: Result<GridPoint, WeatherError>,
        seen: RefCell<Vec<Coordinates>>,
    }

    impl GridResolver for StubGrid {
        fn resolve_grid(&self, coordinates: Coordinates) -> Result<GridPoint, WeatherError> {
            self.seen.borrow_mut().push(coordinates);
            self.result.clone()
        }
    }

    struct StubForecast {
        result: Result<Vec<ForecastPeriod>, WeatherError>,
        seen: RefCell<Vec<String>>,
    }

    impl ForecastFetcher for StubForecast {
        fn fetch_forecast(&self, forecast_url: &str) -> Result<Vec<ForecastPeriod>, WeatherError> {
            self.seen.borrow_mut().push(forecast_url.to_string());
            self.result.clone()
        }
    }

    fn springfield_grid() -> GridPoint {
        GridPoint {
            grid_id: "LOT".to_string(),
            grid_x: 10,
            grid_y: 20,
            forecast_url: "https://x/forecast".to_string(),
            location_name: "Springfield".to_string(),
        }
    }

    fn periods(count: usize) -> Vec<ForecastPeriod> {
        (0..count)
            .map(|i| ForecastPeriod {
                name: Some(format!("Period {}", i)),
                ..Default::default()
            })
            .collect()
    }

    fn resolver(
        geocode: Result<Coordinates, WeatherError>,
        grid: Result<GridPoint, WeatherError>,
        forecast: Result<Vec<ForecastPeriod>, WeatherError>,
    ) -> WeatherResolver<StubGeocoder, StubGrid, StubForecast> {
        WeatherResolver::new(
            StubGeocoder {
                result: geocode,
                calls: Cell::new(0),
            },
            StubGrid {
                result: grid,
                seen: RefCell::new(Vec::new()),
            },
            StubForecast {
                result: forecast,
                seen: RefCell::new(Vec::new()),
            },
            &Span::none(),
        )
    }

    #[test]
    fn test_springfield_end_to_end() {
        let resolver = resolver(
            Ok(Coordinates::new(39.78, -89.65)),
            Ok(springfield_grid()),
            Ok(periods(14)),
        );

        let result = resolver.resolve("Springfield", "IL").expect("should resolve");

        assert_eq!(result.location_name, "Springfield");
        assert_eq!(result.periods, periods(13));
        assert_eq!(result.grid_id, "LOT");
        assert_eq!(result.grid_point, GridPosition { x: 10, y: 20 });
        assert!((result.latitude - 39.78).abs() < 1e-9);
        assert!((result.longitude + 89.65).abs() < 1e-9);

        assert_eq!(*resolver.grid_resolver.seen.borrow(), vec![Coordinates::new(39.78, -89.65)]);
        assert_eq!(*resolver.forecast_fetcher.seen.borrow(), vec!["https://x/forecast".to_string()]);
    }

    #[test]
    fn test_twenty_periods_truncated_to_thirteen_in_order() {
        let resolver = resolver(
            Ok(Coordinates::new(1.0, 2.0)),
            Ok(springfield_grid()),
            Ok(periods(20)),
        );

        let result = resolver.resolve("a", "b").expect("should resolve");

        assert_eq!(result.periods.len(), 13);
        assert_eq!(result.periods, periods(20)[..13].to_vec());
    }

    #[test]
    fn test_geocode_failure_short_circuits() {
        let resolver = resolver(
            Err(WeatherError::NotFound {
                city: "Nowhere".to_string(),
                state: "ZZ".to_string(),
            }),
            Ok(springfield_grid()),
            Ok(periods(3)),
        );

        let err = resolver.resolve("Nowhere", "ZZ").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(resolver.geocoder.calls.get(), 1);
        assert!(resolver.grid_resolver.seen.borrow().is_empty());
        assert!(resolver.forecast_fetcher.seen.borrow().is_empty());
    }

    #[test]
    fn test_grid_failure_short_circuits() {
        let resolver = resolver(
            Ok(Coordinates::new(39.78, -89.65)),
            Err(WeatherError::upstream(Stage::GridLookup, "503 Service Unavailable")),
            Ok(periods(3)),
        );

        let err = resolver.resolve("Springfield", "IL").unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Upstream);
        assert_eq!(resolver.grid_resolver.seen.borrow().len(), 1);
        assert!(resolver.forecast_fetcher.seen.borrow().is_empty());
    }

    #[test]
    fn test_forecast_error_passes_through_unchanged() {
        let original = WeatherError::malformed(Stage::Forecast, "missing field `periods`");
        let resolver = resolver(
            Ok(Coordinates::new(39.78, -89.65)),
            Ok(springfield_grid()),
            Err(original.clone()),
        );

        let err = resolver.resolve("Springfield", "IL").unwrap_err();

        assert_eq!(err, original);
    }
}
