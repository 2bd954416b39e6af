use thiserror::Error;

/// Everything that can go wrong while fetching conditions for a location.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The HTTP round trip itself failed (DNS, connect, timeout, body read).
    #[error("request to weather API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered 404 for the requested location.
    #[error("could not find location: {location}")]
    NotFound { location: String },

    /// Any other non-200 status.
    #[error("unexpected response status {status:?}")]
    UnexpectedStatus { status: String },

    /// The body is not JSON of the expected shape.
    #[error("invalid API response {payload}: {source}")]
    Decode {
        payload: String,
        #[source]
        source: serde_json::Error,
    },

    /// Well-formed JSON without a single weather entry.
    #[error("invalid API response {payload}: require at least one weather element")]
    Validation { payload: String },
}

impl WeatherError {
    pub fn is_transport(&self) -> bool {
        matches!(self, WeatherError::Transport(_))
    }
}
