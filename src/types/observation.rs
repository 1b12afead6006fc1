use chrono::NaiveDate;
use std::fmt;

const RASTER_SUFFIXES: [&str; 5] = [".png", ".jpg", ".jpeg", ".gif", ".bmp"];
const DEFAULT_ICON_SCHEME: &str = "http:";

/// One day of aggregated weather, as reported by the provider.
#[derive(Debug, PartialEq, Clone)]
pub struct DailyObservation {
    pub date: NaiveDate,
    pub min_temp_c: f64,       // mintemp_c
    pub max_temp_c: f64,       // maxtemp_c
    pub avg_temp_c: f64,       // avgtemp_c
    pub precipitation_mm: f64, // totalprecip_mm
    pub max_wind_kph: f64,     // maxwind_kph
    pub condition_text: String,
    /// Present only when the provider's icon field points at a raster image.
    pub condition_icon: Option<IconRef>,
}

/// Reference to a weather-condition icon image.
///
/// Providers usually hand these out scheme-relative (`//cdn.host/64x64/day/113.png`);
/// [`IconRef::url`] turns such a reference into something that can be requested.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct IconRef(String);

impl IconRef {
    /// Wraps `reference` if it names a raster image, judged by its file suffix.
    ///
    /// # Examples
    ///
    /// ```
    /// use weather_report::IconRef;
    ///
    /// assert!(IconRef::parse("//cdn.example/64x64/113.png").is_some());
    /// assert!(IconRef::parse("sunny").is_none());
    /// ```
    pub fn parse(reference: &str) -> Option<Self> {
        let reference = reference.trim();
        let lower = reference.to_ascii_lowercase();
        RASTER_SUFFIXES
            .iter()
            .any(|suffix| lower.ends_with(suffix))
            .then(|| Self(reference.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The reference as a fetchable URL, prefixing `http:` when it is scheme-relative.
    pub fn url(&self) -> String {
        if self.0.starts_with("//") {
            format!("{DEFAULT_ICON_SCHEME}{}", self.0)
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Display for IconRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
