use crate::model::WeatherReport;
use async_trait::async_trait;
use std::fmt::Debug;
use thiserror::Error;

pub mod openweather;

/// Everything that can go wrong while fetching weather for a city.
///
/// Every variant maps to a user-facing string via [`WeatherError::user_message`];
/// nothing here ever reaches the chat frontend as a fault.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("city '{0}' was not found")]
    CityNotFound(String),

    #[error("provider returned status {0}")]
    ProviderStatus(u16),

    #[error("request timed out")]
    Timeout,

    #[error("could not connect to the weather service")]
    Connect,

    #[error("malformed provider response: {0}")]
    Parse(String),

    #[error("{0}")]
    Unexpected(String),
}

impl WeatherError {
    /// Render the error as the plain text shown to the chat user.
    pub fn user_message(&self) -> String {
        match self {
            Self::CityNotFound(city) => format!(
                "Could not fetch weather data from the server. \
                 Make sure the city {city} exists and that its name is spelled correctly."
            ),
            Self::ProviderStatus(code) => {
                format!("Could not fetch weather data from the server: status code {code}.")
            }
            Self::Timeout => {
                "Could not fetch weather data from the server: \
                 timed out waiting for a response."
                    .to_string()
            }
            Self::Connect => {
                "Could not fetch weather data from the server: \
                 could not connect to the server."
                    .to_string()
            }
            Self::Parse(detail) | Self::Unexpected(detail) => format!("Error: {detail}"),
        }
    }
}

/// Seam between the chat frontend and the weather backend.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    /// Fetch current weather for a city by name. Exactly one outbound call;
    /// no retries, no caching.
    async fn current_by_city(&self, city: &str) -> Result<WeatherReport, WeatherError>;

    /// Fetch and render: the report on success, the matching user-facing
    /// error text on failure. Never fails past this boundary.
    async fn report_for_city(&self, city: &str) -> String {
        match self.current_by_city(city).await {
            Ok(report) => report.to_html(),
            Err(err) => err.user_message(),
        }
    }
}
