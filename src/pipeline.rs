//! Drives one report run: the trailing date window, one request per day, one row
//! per answer, then the file.

use crate::config::{Configuration, ConfigurationError, Settings};
use crate::error::WeatherReportError;
use crate::report::error::ReportError;
use crate::report::icon::IconFetcher;
use crate::report::writer::Report;
use crate::types::date_range::{days_between, DateRange};
use crate::weather_api::client::HistoryClient;
use bon::bon;
use chrono::{Days, NaiveDate};
use log::info;
use std::path::PathBuf;

pub const DEFAULT_HOUR: u8 = 13;
const REPORT_EXTENSION: &str = "xlsx";

/// Sequential fetch-and-render pipeline.
///
/// Requests are issued one at a time in date order. The first failure aborts the
/// run before the report is closed, so a failed run produces no file.
///
/// # Examples
///
/// ```no_run
/// # use weather_report::{Configuration, HistoryClient, IconFetcher, ReportPipeline, WeatherReportError};
/// # use std::time::Duration;
/// # #[tokio::main]
/// # async fn main() -> Result<(), WeatherReportError> {
/// let pipeline = ReportPipeline::builder()
///     .client(HistoryClient::builder().api_key("abc123").build()?)
///     .icons(IconFetcher::new(Duration::from_secs(30))?)
///     .output_dir("reports")
///     .build();
///
/// let today = chrono::Local::now().date_naive();
/// let path = pipeline.run(&Configuration::new("Lublin", 7), today).await?;
/// println!("{}", path.display());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ReportPipeline {
    client: HistoryClient,
    icons: IconFetcher,
    output_dir: PathBuf,
    hour: u8,
}

#[bon]
impl ReportPipeline {
    #[builder]
    pub fn new(
        client: HistoryClient,
        icons: IconFetcher,
        #[builder(into)] output_dir: Option<PathBuf>,
        hour: Option<u8>,
    ) -> Self {
        Self {
            client,
            icons,
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(".")),
            hour: hour.unwrap_or(DEFAULT_HOUR),
        }
    }

    /// Builds the HTTP clients and output location from settings that already passed
    /// [`Settings::validate`].
    pub fn from_settings(settings: &Settings) -> Result<Self, WeatherReportError> {
        let api_key = settings.api_key().ok_or(ConfigurationError::MissingApiKey)?;

        let client = HistoryClient::builder()
            .api_key(api_key)
            .base_url(settings.provider.base_url.clone())
            .language(settings.provider.language.clone())
            .timeout(settings.timeout())
            .build()?;
        let icons = IconFetcher::new(settings.timeout())?;

        Ok(Self::builder()
            .client(client)
            .icons(icons)
            .output_dir(settings.report.output_dir.clone())
            .hour(settings.report.hour)
            .build())
    }

    /// Fetches every day of the window ending at `today` (exclusive) and writes the
    /// report. Returns the path of the finished file.
    pub async fn run(
        &self,
        configuration: &Configuration,
        today: NaiveDate,
    ) -> Result<PathBuf, WeatherReportError> {
        configuration.validate()?;
        let location = configuration.location.trim();
        let window = report_window(configuration, today)?;
        let path = self
            .output_dir
            .join(report_file_name(location, window.start, window.end));

        info!(
            "Fetching {} day(s) of weather for {} ({} to {})",
            window.len(),
            location,
            window.start,
            window.end
        );

        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| ReportError::OutputDir(self.output_dir.clone(), e))?;
        let mut report = Report::create(location, path, self.icons.clone())?;
        for date in window {
            info!("Fetching weather for {date}...");
            let observation = self
                .client
                .historical_weather(location, date, self.hour)
                .await?;
            report.append_row(&observation).await?;
        }

        Ok(report.close()?)
    }
}

/// The trailing window `today - lookback_days .. today`.
pub fn report_window(
    configuration: &Configuration,
    today: NaiveDate,
) -> Result<DateRange, ConfigurationError> {
    let from = today
        .checked_sub_days(Days::new(u64::from(configuration.lookback_days)))
        .ok_or(ConfigurationError::LookbackOutOfRange(configuration.lookback_days))?;
    Ok(days_between(from, today))
}

/// `{location}_{from}_{to}.xlsx`, with path separators in the location replaced.
pub fn report_file_name(location: &str, from: NaiveDate, to: NaiveDate) -> String {
    let location: String = location
        .chars()
        .map(|c| if matches!(c, '/' | '\\') { '-' } else { c })
        .collect();
    format!(
        "{}_{}_{}.{}",
        location,
        from.format("%Y-%m-%d"),
        to.format("%Y-%m-%d"),
        REPORT_EXTENSION
    )
}
