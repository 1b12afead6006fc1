//! Provides [`HistoryClient`], a thin adapter over the provider's historical-weather
//! endpoint. One call is one HTTP request; nothing is cached or retried.

use crate::types::observation::DailyObservation;
use crate::weather_api::error::WeatherApiError;
use crate::weather_api::response::HistoryResponse;
use bon::bon;
use chrono::NaiveDate;
use log::{debug, warn};
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://api.apixu.com";
pub const DEFAULT_LANGUAGE: &str = "pl";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const HISTORY_PATH: &str = "/v1/history.json";
const USER_AGENT: &str = concat!("weather-report/", env!("CARGO_PKG_VERSION"));

/// Authenticated client for the `history.json` endpoint.
///
/// # Examples
///
/// ```no_run
/// # use weather_report::{HistoryClient, WeatherApiError};
/// # use chrono::NaiveDate;
/// # #[tokio::main]
/// # async fn main() -> Result<(), WeatherApiError> {
/// let client = HistoryClient::builder()
///     .api_key("abc123")
///     .language("en")
///     .build()?;
///
/// let date = NaiveDate::from_ymd_opt(2023, 6, 8).unwrap();
/// let observation = client.historical_weather("Lublin", date, 13).await?;
/// println!("{} max {}°C", observation.date, observation.max_temp_c);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HistoryClient {
    http: Client,
    api_key: String,
    base_url: String,
    language: String,
}

#[bon]
impl HistoryClient {
    /// Creates a client. Only `api_key` is required; `base_url`, `language` and
    /// `timeout` fall back to [`DEFAULT_BASE_URL`], [`DEFAULT_LANGUAGE`] and
    /// [`DEFAULT_TIMEOUT`].
    #[builder]
    pub fn new(
        #[builder(into)] api_key: String,
        #[builder(into)] base_url: Option<String>,
        #[builder(into)] language: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, WeatherApiError> {
        let http = Client::builder()
            .timeout(timeout.unwrap_or(DEFAULT_TIMEOUT))
            .user_agent(USER_AGENT)
            .build()
            .map_err(WeatherApiError::ClientBuild)?;
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            language: language.unwrap_or_else(|| DEFAULT_LANGUAGE.to_string()),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    /// Fetches the day-level aggregates for `location` on `date`.
    ///
    /// `hour` (0-23) is forwarded to the provider; only day-level fields are read
    /// from the answer.
    ///
    /// # Errors
    ///
    /// * [`WeatherApiError::InvalidRequest`] for an empty location or an hour past 23.
    /// * [`WeatherApiError::Provider`] when the body carries an `error` object.
    /// * [`WeatherApiError::NetworkRequest`], [`WeatherApiError::HttpStatus`],
    ///   [`WeatherApiError::InvalidBody`] or [`WeatherApiError::MissingForecastDay`]
    ///   when the transport fails or the body is not a usable history response.
    pub async fn historical_weather(
        &self,
        location: &str,
        date: NaiveDate,
        hour: u8,
    ) -> Result<DailyObservation, WeatherApiError> {
        let location = location.trim();
        if location.is_empty() {
            return Err(WeatherApiError::InvalidRequest(
                "location must not be empty".to_string(),
            ));
        }
        if hour > 23 {
            return Err(WeatherApiError::InvalidRequest(format!(
                "hour must be between 0 and 23, got {hour}"
            )));
        }

        let url = format!("{}{}", self.base_url, HISTORY_PATH);
        let dt = date.format("%Y-%m-%d").to_string();
        let hour = hour.to_string();
        debug!(
            "GET {url}?key=***&lang={}&q={location}&dt={dt}&hour={hour}",
            self.language
        );

        let response = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("lang", self.language.as_str()),
                ("q", location),
                ("dt", dt.as_str()),
                ("hour", hour.as_str()),
            ])
            .send()
            .await
            .map_err(|e| WeatherApiError::NetworkRequest(url.clone(), e))?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| WeatherApiError::NetworkRequest(url.clone(), e))?;

        // Providers answer errors with a 4xx status *and* a JSON error object, so the
        // body is decoded before the status is looked at.
        let decoded = serde_json::from_slice::<serde_json::Value>(&body)
            .and_then(serde_json::from_value::<HistoryResponse>);
        let response = match decoded {
            Ok(response) => response,
            Err(_) if !status.is_success() => {
                warn!("HTTP error for {url}: {status}");
                return Err(WeatherApiError::HttpStatus { url, status });
            }
            Err(e) => return Err(WeatherApiError::InvalidBody(url, e)),
        };

        response.into_observation(&url)
    }
}
