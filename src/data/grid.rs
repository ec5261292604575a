//! weather.gov points lookup: coordinates to forecast grid cell

use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::Span;

use super::http::get_json;
use super::{Coordinates, GridPoint, Stage, WeatherError};

/// Resolves coordinates to a forecast grid point
pub trait GridResolver {
    fn resolve_grid(&self, coordinates: Coordinates) -> Result<GridPoint, WeatherError>;
}

/// `/points/{lat},{lon}` response structure
#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointProperties,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PointProperties {
    /// Null for points without a land forecast (e.g. offshore)
    forecast: Option<String>,
    grid_id: String,
    grid_x: i64,
    grid_y: i64,
    relative_location: RelativeLocation,
}

#[derive(Debug, Deserialize)]
struct RelativeLocation {
    properties: RelativeLocationProperties,
}

#[derive(Debug, Deserialize)]
struct RelativeLocationProperties {
    city: String,
}

impl PointsResponse {
    fn into_grid_point(self) -> Result<GridPoint, WeatherError> {
        let properties = self.properties;
        let forecast_url = properties
            .forecast
            .filter(|url| !url.is_empty())
            .ok_or_else(|| WeatherError::malformed(Stage::GridLookup, "missing forecast URL"))?;

        Ok(GridPoint {
            grid_id: properties.grid_id,
            grid_x: properties.grid_x,
            grid_y: properties.grid_y,
            forecast_url,
            location_name: properties.relative_location.properties.city,
        })
    }
}

/// Grid resolver backed by the weather.gov points endpoint
#[derive(Debug, Clone)]
pub struct NwsGridResolver {
    client: Client,
    base_url: String,
    span: Span,
}

impl NwsGridResolver {
    pub fn new(client: Client, base_url: impl Into<String>, parent: &Span) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            span: tracing::debug_span!(parent: parent, "grid_resolver"),
        }
    }

    fn points_url(&self, coordinates: Coordinates) -> String {
        format!(
            "{}/points/{}",
            self.base_url.trim_end_matches('/'),
            coordinates.as_point()
        )
    }
}

impl GridResolver for NwsGridResolver {
    fn resolve_grid(&self, coordinates: Coordinates) -> Result<GridPoint, WeatherError> {
        let url = self.points_url(coordinates);
        tracing::debug!(parent: &self.span, %url, "looking up grid point");

        let response: PointsResponse = get_json(self.client.get(&url), Stage::GridLookup)?;
        let grid = response.into_grid_point()?;

        tracing::debug!(
            parent: &self.span,
            grid_id = %grid.grid_id,
            grid_x = grid.grid_x,
            grid_y = grid.grid_y,
            "resolved grid point"
        );
        Ok(grid)
    }
}
