use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use tracing::{debug, instrument};
use url::form_urlencoded;

use crate::{error::WeatherError, model::Conditions, parse::parse_response};

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const WEATHER_PATH: &str = "/data/2.5/weather";

/// Connection settings for [`WeatherClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_key: String,
    /// Scheme and host of the API, without the `/data/...` path.
    pub base_url: String,
    /// Upper bound for the whole request, connect through body.
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Source of current conditions for a free-text location.
#[async_trait]
pub trait WeatherProvider: Send + Sync + std::fmt::Debug {
    async fn get_weather(&self, location: &str) -> Result<Conditions, WeatherError>;
}

/// OpenWeatherMap current-weather client.
///
/// Holds no mutable state, so a single instance can serve concurrent callers.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    config: ClientConfig,
    http: reqwest::Client,
}

impl WeatherClient {
    /// Client with the default endpoint and timeout. An empty key is accepted;
    /// the API will reject it.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(api_key))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            config,
            http: reqwest::Client::new(),
        }
    }

    /// Full request URL for `location`. Location and key are form-encoded.
    pub fn format_url(&self, location: &str) -> String {
        format!(
            "{}{}?q={}&appid={}",
            self.config.base_url.trim_end_matches('/'),
            WEATHER_PATH,
            encode(location),
            encode(&self.config.api_key),
        )
    }
}

fn encode(value: &str) -> String {
    form_urlencoded::byte_serialize(value.as_bytes()).collect()
}

#[async_trait]
impl WeatherProvider for WeatherClient {
    #[instrument(skip(self))]
    async fn get_weather(&self, location: &str) -> Result<Conditions, WeatherError> {
        let url = self.format_url(location);

        debug!("Sending current weather request");
        let res = self
            .http
            .get(url)
            .timeout(self.config.timeout)
            .send()
            .await?;

        let status = res.status();
        debug!(%status, "Received response");

        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::NotFound {
                location: location.to_string(),
            });
        }
        if status != StatusCode::OK {
            return Err(WeatherError::UnexpectedStatus {
                status: status.to_string(),
            });
        }

        let body = res.bytes().await?;
        parse_response(&body)
    }
}
