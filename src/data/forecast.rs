//! weather.gov forecast fetch for a resolved grid point

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::Span;

use super::http::get_json;
use super::{ForecastPeriod, Stage, WeatherError, MAX_PERIODS};

/// Fetches the forecast periods published at a forecast URL
pub trait ForecastFetcher {
    /// Returns at most [`MAX_PERIODS`] periods in service order
    fn fetch_forecast(&self, forecast_url: &str) -> Result<Vec<ForecastPeriod>, WeatherError>;
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<ForecastPeriod>,
}

/// Forecast fetcher backed by weather.gov
#[derive(Debug, Clone)]
pub struct NwsForecastFetcher {
    client: Client,
    span: Span,
}

impl NwsForecastFetcher {
    pub fn new(client: Client, parent: &Span) -> Self {
        Self {
            client,
            span: tracing::debug_span!(parent: parent, "forecast_fetcher"),
        }
    }
}

impl ForecastFetcher for NwsForecastFetcher {
    fn fetch_forecast(&self, forecast_url: &str) -> Result<Vec<ForecastPeriod>, WeatherError> {
        let response: ForecastResponse = get_json(self.client.get(forecast_url), Stage::Forecast)?;
        let mut periods = response.properties.periods;

        tracing::debug!(parent: &self.span, received = periods.len(), "fetched forecast");
        periods.truncate(MAX_PERIODS);
        Ok(periods)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_periods() {
        let body = r#"{
            "properties": {
                "updated": "2024-07-15T14:00:00+00:00",
                "periods": [
                    {"number": 1, "name": "This Afternoon", "temperature": 88, "temperatureUnit": "F",
                     "windSpeed": "10 mph", "windDirection": "SW", "shortForecast": "Sunny"},
                    {"number": 2, "name": "Tonight", "temperature": 67, "temperatureUnit": "F",
                     "windSpeed": "5 mph", "windDirection": "S", "shortForecast": "Clear"}
                ]
            }
        }"#;
        let response: ForecastResponse = serde_json::from_str(body).expect("should parse");
        let periods = response.properties.periods;

        assert_eq!(periods.len(), 2);
        assert_eq!(periods[0].name.as_deref(), Some("This Afternoon"));
        assert_eq!(periods[1].wind_direction.as_deref(), Some("S"));
    }

    #[test]
    fn test_missing_periods_fails_to_decode() {
        assert!(serde_json::from_str::<ForecastResponse>(r#"{"properties": {}}"#).is_err());
        assert!(serde_json::from_str::<ForecastResponse>(r#"{"type": "Feature"}"#).is_err());
    }
}
