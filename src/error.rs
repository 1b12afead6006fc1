use crate::config::ConfigurationError;
use crate::report::error::ReportError;
use crate::weather_api::error::WeatherApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WeatherReportError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    WeatherApi(#[from] WeatherApiError),

    #[error(transparent)]
    Report(#[from] ReportError),
}

/// Coarse classification of a failed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Transport,
    Provider,
    ImageFetch,
    Output,
}

impl ErrorKind {
    /// Process exit code the binary uses for this kind of failure.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Configuration => 2,
            ErrorKind::Transport => 3,
            ErrorKind::Provider => 4,
            ErrorKind::ImageFetch => 5,
            ErrorKind::Output => 6,
        }
    }
}

impl WeatherReportError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            WeatherReportError::Configuration(_) => ErrorKind::Configuration,
            WeatherReportError::WeatherApi(WeatherApiError::Provider { .. }) => {
                ErrorKind::Provider
            }
            WeatherReportError::WeatherApi(WeatherApiError::InvalidRequest(_)) => {
                ErrorKind::Configuration
            }
            WeatherReportError::WeatherApi(_) => ErrorKind::Transport,
            WeatherReportError::Report(e) if e.is_image_fetch() => ErrorKind::ImageFetch,
            WeatherReportError::Report(_) => ErrorKind::Output,
        }
    }
}
