//! Error taxonomy for the weather resolution pipeline

use std::fmt;

use thiserror::Error;

/// The pipeline stage an error came from
///
/// Carried for diagnostics only; callers branch on [`ErrorKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Geocode,
    GridLookup,
    Forecast,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Geocode => "Geocoding",
            Stage::GridLookup => "Grid point lookup",
            Stage::Forecast => "Forecast fetch",
        };
        f.write_str(name)
    }
}

/// Programmatic kind of a [`WeatherError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Upstream,
    Malformed,
}

/// Errors that can occur while resolving a forecast
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WeatherError {
    /// The geocoder returned no candidates
    #[error("Location not found: {city}, {state}")]
    NotFound { city: String, state: String },

    /// Network failure, timeout, or non-success status
    #[error("{stage} failed: {message}")]
    Upstream { stage: Stage, message: String },

    /// A required field was missing or mistyped in a successful response
    #[error("{stage} returned an unexpected response: {message}")]
    Malformed { stage: Stage, message: String },
}

impl WeatherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherError::NotFound { .. } => ErrorKind::NotFound,
            WeatherError::Upstream { .. } => ErrorKind::Upstream,
            WeatherError::Malformed { .. } => ErrorKind::Malformed,
        }
    }

    pub(crate) fn upstream(stage: Stage, message: impl fmt::Display) -> Self {
        WeatherError::Upstream {
            stage,
            message: message.to_string(),
        }
    }

    pub(crate) fn malformed(stage: Stage, message: impl fmt::Display) -> Self {
        WeatherError::Malformed {
            stage,
            message: message.to_string(),
        }
    }
}
