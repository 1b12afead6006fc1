//! Command-line interface for weather-report

use crate::config::Settings;
use argh::FromArgs;
use std::path::PathBuf;

/// Fetch the last N days of weather for a location and write them to an xlsx report
#[derive(FromArgs, Debug, Default, PartialEq)]
pub struct Args {
    /// path to the settings file (default: <config dir>/weather-report/config.toml)
    #[argh(option, short = 'c')]
    pub config: Option<PathBuf>,

    /// location to report on, e.g. "Lublin"
    #[argh(option, short = 'l')]
    pub location: Option<String>,

    /// number of days before today to include
    #[argh(option, short = 'd')]
    pub days: Option<u32>,

    /// weather API key
    #[argh(option)]
    pub api_key: Option<String>,

    /// directory to write the report to
    #[argh(option, short = 'o')]
    pub output_dir: Option<PathBuf>,

    /// log level (error, warn, info, debug, trace)
    #[argh(option)]
    pub log_level: Option<String>,
}

impl Args {
    /// Overrides `settings` with every option given on the command line.
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(location) = &self.location {
            settings.report.location = location.clone();
        }
        if let Some(days) = self.days {
            settings.report.lookback_days = days;
        }
        if let Some(api_key) = &self.api_key {
            settings.provider.api_key = Some(api_key.clone());
        }
        if let Some(output_dir) = &self.output_dir {
            settings.report.output_dir = output_dir.clone();
        }
        if let Some(log_level) = &self.log_level {
            settings.log_level = log_level.to_lowercase();
        }
    }
}
