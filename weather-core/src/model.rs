use chrono::{DateTime, Local};

/// Current weather for a single city, produced fresh per request.
///
/// Sunrise/sunset are already converted from the provider's epoch seconds to
/// local calendar time, so rendering is deterministic for a given response.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub city: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub pressure_hpa: u32,
    pub cloudiness_pct: u8,
    pub description: String,
    pub sunrise: DateTime<Local>,
    pub sunset: DateTime<Local>,
}

impl WeatherReport {
    /// Render the fixed-order, multi-line report with HTML-bold labels.
    ///
    /// The markup is passed through to the chat transport's rich-text
    /// rendering (Telegram `parse_mode=HTML`).
    pub fn to_html(&self) -> String {
        format!(
            "<b>City</b>: {},\n\
             <b>Temperature</b>: {} °C,\n\
             <b>Humidity</b>: {} %,\n\
             <b>Wind speed</b>: {} m/s,\n\
             <b>Pressure</b>: {} hPa,\n\
             <b>Cloudiness</b>: {} %,\n\
             <b>Description</b>: {},\n\
             <b>Sunrise</b>: {},\n\
             <b>Sunset</b>: {}.",
            self.city,
            self.temperature_c,
            self.humidity_pct,
            self.wind_speed_mps,
            self.pressure_hpa,
            self.cloudiness_pct,
            capitalize(&self.description),
            self.sunrise.format("%Y-%m-%d %H:%M:%S"),
            self.sunset.format("%Y-%m-%d %H:%M:%S"),
        )
    }
}

/// Uppercase the first character of a condition description.
///
/// Unicode-aware: provider descriptions may be localized (e.g. Cyrillic).
pub(crate) fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
