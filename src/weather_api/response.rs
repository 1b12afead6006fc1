//! Wire format of the `history.json` endpoint.

use crate::types::observation::{DailyObservation, IconRef};
use crate::weather_api::error::WeatherApiError;
use chrono::NaiveDate;
use serde::Deserialize;

/// Either shape the provider answers with. The `error` key wins when present.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum HistoryResponse {
    Failure { error: ProviderErrorBody },
    Success { forecast: Forecast },
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProviderErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    code: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Forecast {
    #[serde(default)]
    forecastday: Vec<ForecastDay>,
}

#[derive(Debug, Deserialize)]
struct ForecastDay {
    date: NaiveDate,
    day: DaySummary,
}

#[derive(Debug, Deserialize)]
struct DaySummary {
    mintemp_c: f64,
    maxtemp_c: f64,
    avgtemp_c: f64,
    totalprecip_mm: f64,
    maxwind_kph: f64,
    condition: Condition,
}

#[derive(Debug, Deserialize)]
struct Condition {
    #[serde(default)]
    text: String,
    #[serde(default)]
    icon: String,
}

impl HistoryResponse {
    /// Turns the decoded body into the first forecast day, or the provider's error.
    pub(crate) fn into_observation(self, url: &str) -> Result<DailyObservation, WeatherApiError> {
        match self {
            HistoryResponse::Failure { error } => Err(WeatherApiError::Provider {
                message: error.message,
                code: error.code.unwrap_or_default(),
            }),
            HistoryResponse::Success { forecast } => {
                let ForecastDay { date, day } = forecast
                    .forecastday
                    .into_iter()
                    .next()
                    .ok_or_else(|| WeatherApiError::MissingForecastDay(url.to_string()))?;
                Ok(DailyObservation {
                    date,
                    min_temp_c: day.mintemp_c,
                    max_temp_c: day.maxtemp_c,
                    avg_temp_c: day.avgtemp_c,
                    precipitation_mm: day.totalprecip_mm,
                    max_wind_kph: day.maxwind_kph,
                    condition_icon: IconRef::parse(&day.condition.icon),
                    condition_text: day.condition.text,
                })
            }
        }
    }
}
