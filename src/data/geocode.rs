//! Forward geocoding: convert a US city/state to coordinates.
//! Uses Nominatim (OpenStreetMap) - free, no API key required.

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::Span;

use super::http::get_json;
use super::{Coordinates, Stage, WeatherError};

/// Resolves a place name to coordinates
pub trait Geocoder {
    fn geocode(&self, city: &str, state: &str) -> Result<Coordinates, WeatherError>;
}

/// One search candidate; Nominatim sends coordinates as numeric strings
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: Option<String>,
}

/// Geocoder backed by the Nominatim search endpoint
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: Client,
    url: String,
    span: Span,
}

impl NominatimGeocoder {
    pub fn new(client: Client, url: impl Into<String>, parent: &Span) -> Self {
        Self {
            client,
            url: url.into(),
            span: tracing::debug_span!(parent: parent, "geocoder"),
        }
    }
}

impl Geocoder for NominatimGeocoder {
    /// Takes the first candidate in service order; there is no local
    /// disambiguation between same-named places.
    fn geocode(&self, city: &str, state: &str) -> Result<Coordinates, WeatherError> {
        let request = self.client.get(&self.url).query(&[
            ("city", city),
            ("state", state),
            ("country", "USA"),
            ("format", "json"),
        ]);

        let places: Vec<NominatimPlace> = get_json(request, Stage::Geocode)?;
        tracing::debug!(parent: &self.span, city, state, candidates = places.len(), "geocode response");

        let first = places.into_iter().next().ok_or_else(|| WeatherError::NotFound {
            city: city.to_string(),
            state: state.to_string(),
        })?;

        let coordinates = Coordinates::new(
            parse_degrees(&first.lat, "lat")?,
            parse_degrees(&first.lon, "lon")?,
        );
        tracing::debug!(
            parent: &self.span,
            place = first.display_name.as_deref().unwrap_or("unnamed"),
            latitude = coordinates.latitude,
            longitude = coordinates.longitude,
            "geocoded"
        );
        Ok(coordinates)
    }
}

fn parse_degrees(raw: &str, field: &str) -> Result<f64, WeatherError> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| WeatherError::malformed(Stage::Geocode, format!("invalid {}: {:?}", field, raw)))
}
