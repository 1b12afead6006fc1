//! Fetch historic daily weather for a location over a trailing window of days and
//! render it as a spreadsheet report, one row per day with the condition icon
//! embedded next to it.
//!
//! The pieces can be used on their own ([`HistoryClient`], [`days_between`],
//! [`Report`]) or together through [`ReportPipeline`].

mod error;
mod pipeline;
mod report;
mod types;
mod weather_api;

pub mod cli;
pub mod config;

pub use error::{ErrorKind, WeatherReportError};
pub use pipeline::*;

pub use config::{Configuration, ConfigurationError, Settings};

pub use report::error::ReportError;
pub use report::icon::IconFetcher;
pub use report::writer::{Cell, Report, ReportRow};

pub use types::date_range::{days_between, DateRange, Days};
pub use types::observation::{DailyObservation, IconRef};
pub use types::units::kph_to_mps;

pub use weather_api::client::{HistoryClient, DEFAULT_BASE_URL, DEFAULT_LANGUAGE, DEFAULT_TIMEOUT};
pub use weather_api::error::WeatherApiError;
