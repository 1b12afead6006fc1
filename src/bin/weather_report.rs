//! weather-report CLI
//!
//! Usage:
//!   weather-report --location Lublin --days 7 --api-key abc123
//!   weather-report --config ~/.config/weather-report/config.toml

use weather_report::cli::Args;
use weather_report::{ErrorKind, ReportPipeline, Settings, WeatherReportError};

#[tokio::main]
async fn main() {
    let args: Args = argh::from_env();

    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            // Logging is configured from the settings, so it is not up yet.
            eprintln!("Error: {e}");
            std::process::exit(ErrorKind::Configuration.exit_code());
        }
    };

    let env = env_logger::Env::default().default_filter_or(settings.log_level.as_str());
    env_logger::init_from_env(env);

    match run(&settings).await {
        Ok(path) => {
            println!("\nOK! Report written to {}", path.display());
        }
        Err(e) => {
            log::error!("{e}");
            let mut source = std::error::Error::source(&e);
            while let Some(cause) = source {
                log::error!("  caused by: {cause}");
                source = cause.source();
            }
            std::process::exit(e.kind().exit_code());
        }
    }
}

fn load_settings(args: &Args) -> Result<Settings, WeatherReportError> {
    let mut settings = Settings::load(args.config.as_deref())?;
    args.apply(&mut settings);
    settings.validate()?;
    Ok(settings)
}

async fn run(settings: &Settings) -> Result<std::path::PathBuf, WeatherReportError> {
    let pipeline = ReportPipeline::from_settings(settings)?;
    let today = chrono::Local::now().date_naive();
    pipeline.run(&settings.configuration(), today).await
}
