//! Runtime settings for the weather lookup
//!
//! Defaults point at the public Nominatim and weather.gov endpoints. Endpoints and
//! the cache directory can be overridden from the environment, which is how the
//! integration tests point the binary at a mock server.

use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;

/// Nominatim search endpoint used for forward geocoding
pub const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org/search";

/// Base URL for the weather.gov API
pub const DEFAULT_WEATHER_BASE_URL: &str = "https://api.weather.gov";

/// Timeout applied to every outbound request
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// How long a cached forecast stays fresh
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(30 * 60);

pub const GEOCODE_URL_ENV: &str = "CLI_MATE_GEOCODE_URL";
pub const WEATHER_URL_ENV: &str = "CLI_MATE_WEATHER_URL";
pub const CACHE_DIR_ENV: &str = "CLI_MATE_CACHE_DIR";

/// Settings shared by the HTTP clients and the cache
#[derive(Debug, Clone)]
pub struct Config {
    pub geocode_url: String,
    pub weather_base_url: String,
    pub timeout: Duration,
    pub cache_ttl: Duration,
    /// `None` when no home directory can be determined; caching is then skipped
    pub cache_dir: Option<PathBuf>,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            geocode_url: DEFAULT_GEOCODE_URL.to_string(),
            weather_base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_dir: default_cache_dir(),
            user_agent: format!("cli-mate/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl Config {
    /// Defaults with any `CLI_MATE_*` environment overrides applied
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(url) = lookup(GEOCODE_URL_ENV).filter(|v| !v.is_empty()) {
            config.geocode_url = url;
        }
        if let Some(url) = lookup(WEATHER_URL_ENV).filter(|v| !v.is_empty()) {
            config.weather_base_url = url;
        }
        if let Some(dir) = lookup(CACHE_DIR_ENV).filter(|v| !v.is_empty()) {
            config.cache_dir = Some(PathBuf::from(dir));
        }
        config
    }

    pub fn with_geocode_url(mut self, url: impl Into<String>) -> Self {
        self.geocode_url = url.into();
        self
    }

    pub fn with_weather_base_url(mut self, url: impl Into<String>) -> Self {
        self.weather_base_url = url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }
}

/// XDG-compliant cache directory (`~/.cache/cli-mate/` on Linux)
fn default_cache_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "cli-mate").map(|dirs| dirs.cache_dir().to_path_buf())
}
