//! Shared blocking HTTP plumbing for the upstream clients

use reqwest::blocking::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::{Stage, WeatherError};
use crate::config::Config;

/// Builds the HTTP client shared by all three stages
///
/// Every request inherits the configured timeout and user agent.
pub fn build_client(config: &Config) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(config.timeout)
        .user_agent(config.user_agent.clone())
        .build()
}

/// Sends a single request and decodes the JSON body into `T`
///
/// Transport failures, timeouts and non-success statuses become
/// [`WeatherError::Upstream`]; a body that does not match `T` becomes
/// [`WeatherError::Malformed`].
pub(crate) fn get_json<T: DeserializeOwned>(
    request: RequestBuilder,
    stage: Stage,
) -> Result<T, WeatherError> {
    let response = request
        .send()
        .map_err(|e| WeatherError::upstream(stage, e))?
        .error_for_status()
        .map_err(|e| WeatherError::upstream(stage, e))?;

    let body = response
        .text()
        .map_err(|e| WeatherError::upstream(stage, e))?;

    serde_json::from_str(&body).map_err(|e| WeatherError::malformed(stage, e))
}
