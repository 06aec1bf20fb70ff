use async_trait::async_trait;
use chrono::{DateTime, Local};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::debug;

use crate::{config::OpenWeatherConfig, model::WeatherReport};

use super::{WeatherError, WeatherProvider};

/// Client for OpenWeatherMap's "current weather by city name" endpoint.
///
/// Holds no mutable state; a single instance is shared across concurrent
/// chat handlers.
#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    config: OpenWeatherConfig,
    http: Client,
}

impl OpenWeatherProvider {
    /// Build the provider with its own HTTP client, applying the configured
    /// total request timeout at the client level.
    pub fn new(config: OpenWeatherConfig) -> Result<Self, WeatherError> {
        let http = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| WeatherError::Unexpected(e.to_string()))?;

        Ok(Self { config, http })
    }

    async fn fetch_current(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let url = format!("{}/weather", self.config.base_url);

        debug!(city, "requesting current weather");

        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", city),
                ("appid", self.config.api_key.as_str()),
                ("units", "metric"),
                ("lang", self.config.lang.as_str()),
            ])
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(WeatherError::CityNotFound(city.to_string()));
        }
        if !status.is_success() {
            return Err(WeatherError::ProviderStatus(status.as_u16()));
        }

        let body = res.text().await.map_err(classify_transport_error)?;

        let parsed: OwCurrentResponse =
            serde_json::from_str(&body).map_err(|e| WeatherError::Parse(e.to_string()))?;

        report_from_response(parsed)
    }
}

#[async_trait]
impl WeatherProvider for OpenWeatherProvider {
    async fn current_by_city(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        self.fetch_current(city).await
    }
}

fn classify_transport_error(err: reqwest::Error) -> WeatherError {
    if err.is_timeout() {
        WeatherError::Timeout
    } else if err.is_connect() {
        WeatherError::Connect
    } else {
        WeatherError::Unexpected(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwClouds {
    all: u8,
}

#[derive(Debug, Deserialize)]
struct OwSys {
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwCurrentResponse {
    name: String,
    main: OwMain,
    weather: Vec<OwWeather>,
    wind: OwWind,
    clouds: OwClouds,
    sys: OwSys,
}

fn report_from_response(parsed: OwCurrentResponse) -> Result<WeatherReport, WeatherError> {
    let description = parsed
        .weather
        .into_iter()
        .next()
        .map(|w| w.description)
        .ok_or_else(|| WeatherError::Parse("response contained no weather conditions".into()))?;

    Ok(WeatherReport {
        city: parsed.name,
        temperature_c: parsed.main.temp,
        humidity_pct: parsed.main.humidity,
        wind_speed_mps: parsed.wind.speed,
        pressure_hpa: parsed.main.pressure,
        cloudiness_pct: parsed.clouds.all,
        description,
        sunrise: local_from_epoch(parsed.sys.sunrise)?,
        sunset: local_from_epoch(parsed.sys.sunset)?,
    })
}

fn local_from_epoch(ts: i64) -> Result<DateTime<Local>, WeatherError> {
    DateTime::from_timestamp(ts, 0)
        .map(|dt| dt.with_timezone(&Local))
        .ok_or_else(|| WeatherError::Parse(format!("invalid epoch timestamp {ts}")))
}
