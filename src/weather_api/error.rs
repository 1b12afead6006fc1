use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherApiError {
    #[error("Invalid history request: {0}")]
    InvalidRequest(String),

    #[error("Failed to build HTTP client")]
    ClientBuild(#[source] reqwest::Error),

    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("Failed to parse response body from {0}")]
    InvalidBody(String, #[source] serde_json::Error),

    #[error("Response from {0} contains no forecast day")]
    MissingForecastDay(String),

    // Well-formed error object returned by the provider itself
    #[error("Error code {code}: \"{message}\"")]
    Provider { message: String, code: i64 },
}

impl WeatherApiError {
    /// True for failures of the transport or of the response format, as opposed to
    /// errors the provider reported deliberately.
    pub fn is_transport(&self) -> bool {
        !matches!(
            self,
            WeatherApiError::Provider { .. } | WeatherApiError::InvalidRequest(_)
        )
    }
}
