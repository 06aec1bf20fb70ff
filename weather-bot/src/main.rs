//! Binary crate for the Telegram weather bot.
//!
//! This crate focuses on:
//! - Loading credentials and provider settings
//! - Wiring the Telegram dispatcher to the weather provider
//! - Process startup/shutdown logging

use std::sync::Arc;

use anyhow::Context;
use teloxide::Bot;
use tracing::info;
use tracing_subscriber::EnvFilter;
use weather_core::{Config, OpenWeatherProvider, WeatherProvider};

mod bot;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load()?;

    let provider: Arc<dyn WeatherProvider> = Arc::new(
        OpenWeatherProvider::new(config.openweather)
            .context("Failed to build OpenWeatherMap client")?,
    );

    info!("starting weather bot");

    let bot = Bot::new(config.bot_token);
    bot::run(bot, provider).await;

    info!("weather bot stopped");

    Ok(())
}
