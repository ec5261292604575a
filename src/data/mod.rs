//! Core data models and upstream clients for CLI-Mate
//!
//! A forecast is resolved in three steps: geocode the place name, look up the
//! weather.gov grid point for the coordinates, then fetch the grid point's
//! forecast periods. Each step sits behind a trait so the orchestration in
//! [`resolver`] can be exercised without a network.

pub mod error;
pub mod forecast;
pub mod geocode;
pub mod grid;
mod http;
pub mod resolver;

pub use error::{ErrorKind, Stage, WeatherError};
pub use forecast::{ForecastFetcher, NwsForecastFetcher};
pub use geocode::{Geocoder, NominatimGeocoder};
pub use grid::{GridResolver, NwsGridResolver};
pub use http::build_client;
pub use resolver::{HttpWeatherResolver, WeatherResolver};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Maximum number of periods kept from a forecast (current + next 12)
pub const MAX_PERIODS: usize = 13;

/// A latitude/longitude pair produced by the geocoder
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Formats as `"{lat},{lon}"` for the points endpoint
    pub fn as_point(&self) -> String {
        format!("{},{}", self.latitude, self.longitude)
    }
}

/// A weather.gov grid cell and where to fetch its forecast
#[derive(Debug, Clone, PartialEq)]
pub struct GridPoint {
    /// Forecast office identifier (e.g. "LOT")
    pub grid_id: String,
    pub grid_x: i64,
    pub grid_y: i64,
    /// Forecast resource for this cell, as returned by the service
    pub forecast_url: String,
    /// City name from the point's relative location
    pub location_name: String,
}

/// One forecast period ("Tonight", "Monday", ...)
///
/// Known fields are typed for display when the service sends them with the
/// expected type. Everything else, including nulls and oddly typed values, is
/// kept in `extra` so the period round-trips through the cache unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>", into = "Map<String, Value>")]
pub struct ForecastPeriod {
    pub name: Option<String>,
    /// Usually a number; left untyped because the service has more than one shape
    pub temperature: Option<Value>,
    pub temperature_unit: Option<String>,
    pub short_forecast: Option<String>,
    pub wind_speed: Option<String>,
    pub wind_direction: Option<String>,
    pub extra: Map<String, Value>,
}

fn take_text(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key)? {
        Value::String(text) => Some(text),
        other => {
            fields.insert(key.to_string(), other);
            None
        }
    }
}

impl From<Map<String, Value>> for ForecastPeriod {
    fn from(mut fields: Map<String, Value>) -> Self {
        let temperature = match fields.remove("temperature") {
            Some(Value::Null) => {
                fields.insert("temperature".to_string(), Value::Null);
                None
            }
            other => other,
        };
        Self {
            name: take_text(&mut fields, "name"),
            temperature,
            temperature_unit: take_text(&mut fields, "temperatureUnit"),
            short_forecast: take_text(&mut fields, "shortForecast"),
            wind_speed: take_text(&mut fields, "windSpeed"),
            wind_direction: take_text(&mut fields, "windDirection"),
            extra: fields,
        }
    }
}

impl From<ForecastPeriod> for Map<String, Value> {
    fn from(period: ForecastPeriod) -> Self {
        let mut fields = period.extra;
        let typed = [
            ("name", period.name.map(Value::String)),
            ("temperature", period.temperature),
            ("temperatureUnit", period.temperature_unit.map(Value::String)),
            ("shortForecast", period.short_forecast.map(Value::String)),
            ("windSpeed", period.wind_speed.map(Value::String)),
            ("windDirection", period.wind_direction.map(Value::String)),
        ];
        for (key, value) in typed {
            if let Some(value) = value {
                fields.insert(key.to_string(), value);
            }
        }
        fields
    }
}

impl ForecastPeriod {
    /// Temperature as display text, whether sent as a bare number or a
    /// `{"value": n}` quantity
    pub fn temperature_text(&self) -> Option<String> {
        match self.temperature.as_ref()? {
            Value::Number(n) => Some(n.to_string()),
            Value::String(s) => Some(s.clone()),
            Value::Object(quantity) => match quantity.get("value")? {
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            },
            _ => None,
        }
    }
}

/// Grid cell position within a forecast office's grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPosition {
    pub x: i64,
    pub y: i64,
}

/// Normalized forecast for a location; the unit that is cached and rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherResult {
    #[serde(rename = "location")]
    pub location_name: String,
    /// At most [`MAX_PERIODS`] entries; index 0 is the current period
    pub periods: Vec<ForecastPeriod>,
    pub grid_id: String,
    pub grid_point: GridPosition,
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lon")]
    pub longitude: f64,
}

impl WeatherResult {
    /// Combines the outputs of the three pipeline stages
    pub fn assemble(
        coordinates: Coordinates,
        grid: GridPoint,
        mut periods: Vec<ForecastPeriod>,
    ) -> Self {
        periods.truncate(MAX_PERIODS);
        Self {
            location_name: grid.location_name,
            periods,
            grid_id: grid.grid_id,
            grid_point: GridPosition {
                x: grid.grid_x,
                y: grid.grid_y,
            },
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
        }
    }

    /// The current (nearest) period
    pub fn current(&self) -> Option<&ForecastPeriod> {
        self.periods.first()
    }

    /// Periods after the current one, in service order
    pub fn upcoming(&self) -> &[ForecastPeriod] {
        self.periods.get(1..).unwrap_or_default()
    }
}
