//! Core library for the Telegram weather bot.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The weather provider seam and its OpenWeatherMap implementation
//! - The report model and its user-facing rendering
//!
//! It is used by `weather-bot`, but can also be reused by other binaries or services.

pub mod config;
pub mod model;
pub mod provider;

pub use config::{Config, OpenWeatherConfig};
pub use model::WeatherReport;
pub use provider::{WeatherError, WeatherProvider, openweather::OpenWeatherProvider};
