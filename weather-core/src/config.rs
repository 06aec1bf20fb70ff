use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::Deserialize;
use std::{env, fs, path::PathBuf, time::Duration};

/// Environment variable overriding the Telegram bot token.
pub const BOT_TOKEN_VAR: &str = "BOT_TOKEN";
/// Environment variable overriding the OpenWeatherMap API key.
pub const API_KEY_VAR: &str = "OPENWEATHER_API_KEY";

/// Settings for the OpenWeatherMap client.
#[derive(Debug, Clone)]
pub struct OpenWeatherConfig {
    pub api_key: String,
    /// API base URL, overridable so tests can point at a mock server.
    pub base_url: String,
    /// Total round-trip budget for one request.
    pub timeout_secs: u64,
    /// Language code for localized condition descriptions.
    pub lang: String,
}

impl OpenWeatherConfig {
    pub fn new(api_key: String) -> Self {
        Self {
            api_key,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            lang: default_lang(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

const fn default_timeout_secs() -> u64 {
    4
}

fn default_lang() -> String {
    "en".to_string()
}

/// Process-wide credentials and provider settings, loaded once at startup
/// and immutable afterwards.
#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub openweather: OpenWeatherConfig,
}

/// On-disk shape of the config file. Every field is optional so that
/// credentials can come entirely from the environment.
///
/// Example TOML:
/// ```toml
/// bot_token = "123456:ABC..."
///
/// [openweather]
/// api_key = "..."
/// timeout_secs = 4
/// lang = "en"
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
struct RawConfig {
    bot_token: Option<String>,
    #[serde(default)]
    openweather: RawOpenWeather,
}

#[derive(Debug, Clone, Deserialize, Default)]
struct RawOpenWeather {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout_secs: Option<u64>,
    lang: Option<String>,
}

impl Config {
    /// Load config from the platform config file, with `BOT_TOKEN` and
    /// `OPENWEATHER_API_KEY` environment variables taking precedence.
    pub fn load() -> Result<Self> {
        let raw = Self::read_file()?;
        resolve(raw, env::var(BOT_TOKEN_VAR).ok(), env::var(API_KEY_VAR).ok())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-bot", "weather-bot")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    fn read_file() -> Result<RawConfig> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, credentials must come from env.
            return Ok(RawConfig::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Merge file contents with environment overrides and validate that both
/// credentials are present.
fn resolve(raw: RawConfig, env_token: Option<String>, env_key: Option<String>) -> Result<Config> {
    let bot_token = env_token.or(raw.bot_token).ok_or_else(|| {
        anyhow!(
            "No Telegram bot token configured.\n\
             Hint: set the {BOT_TOKEN_VAR} environment variable or add `bot_token` to the config file."
        )
    })?;

    let api_key = env_key.or(raw.openweather.api_key).ok_or_else(|| {
        anyhow!(
            "No OpenWeatherMap API key configured.\n\
             Hint: set the {API_KEY_VAR} environment variable or add `openweather.api_key` to the config file."
        )
    })?;

    let mut openweather = OpenWeatherConfig::new(api_key);
    if let Some(base_url) = raw.openweather.base_url {
        openweather.base_url = base_url;
    }
    if let Some(timeout_secs) = raw.openweather.timeout_secs {
        openweather.timeout_secs = timeout_secs;
    }
    if let Some(lang) = raw.openweather.lang {
        openweather.lang = lang;
    }

    Ok(Config { bot_token, openweather })
}
