const KPH_PER_MPS: f64 = 3.6;

/// Converts a wind speed in km/h to m/s, rendered with exactly two decimals.
///
/// # Examples
///
/// ```
/// use weather_report::kph_to_mps;
///
/// assert_eq!(kph_to_mps(36.0), "10.00");
/// ```
pub fn kph_to_mps(kph: f64) -> String {
    format!("{:.2}", kph / KPH_PER_MPS)
}

/// Renders a provider decimal the way it appears in the JSON payload, keeping a
/// trailing `.0` on whole numbers (`12.0`, not `12`).
pub(crate) fn render_decimal(value: f64) -> String {
    format!("{value:?}")
}
