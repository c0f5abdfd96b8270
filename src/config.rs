use crate::error::{config_error, env_error, AppResult};
use crate::utils::time::DEFAULT_ZONE_LABEL;
use chrono_tz::Tz;
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Default display locale
pub const DEFAULT_LOCALE: &str = "id";

/// Default display timezone, a fixed UTC+7 (WIB) without historical offsets
pub const DEFAULT_TIMEZONE: &str = "Etc/GMT-7";

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Directory holding the optional overlay and the persisted session
pub const CONFIG_DIR: &str = "config";

/// Main configuration structure for the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the OneMapan REST API
    pub api_url: String,
    /// Locale used for month and weekday names
    pub locale: String,
    /// Timezone name used for display
    pub timezone: String,
    /// Label shown after clock times; required when `timezone` is not the default
    pub timezone_label: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Directory for the overlay file and session file
    pub config_dir: PathBuf,
}

/// Optional values read from `config/onemapan.toml`
#[derive(Debug, Default, Deserialize)]
struct ConfigOverlay {
    locale: Option<String>,
    timezone: Option<String>,
    timezone_label: Option<String>,
    timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from environment and config file
    pub fn load() -> AppResult<Self> {
        // Load .env file if it exists
        dotenv().ok();

        let api_url = env::var("ONEMAPAN_API_URL").map_err(|_| env_error("ONEMAPAN_API_URL"))?;
        let locale = env::var("ONEMAPAN_LOCALE").unwrap_or_else(|_| DEFAULT_LOCALE.to_string());
        let timezone =
            env::var("ONEMAPAN_TIMEZONE").unwrap_or_else(|_| DEFAULT_TIMEZONE.to_string());
        let timezone_label = env::var("ONEMAPAN_TIMEZONE_LABEL").ok();

        let timeout_secs = match env::var("ONEMAPAN_TIMEOUT_SECS") {
            Ok(value) => value
                .parse::<u64>()
                .map_err(|_| env_error("Invalid ONEMAPAN_TIMEOUT_SECS format"))?,
            Err(_) => DEFAULT_TIMEOUT_SECS,
        };

        let mut config = Config {
            api_url,
            locale,
            timezone,
            timezone_label,
            timeout_secs,
            config_dir: PathBuf::from(CONFIG_DIR),
        };

        let overlay_path = config.config_dir.join("onemapan.toml");
        if let Ok(content) = fs::read_to_string(&overlay_path) {
            let overlay: ConfigOverlay = toml::from_str(&content)?;
            config.apply_overlay(overlay);
        }

        config.validate()?;
        Ok(config)
    }

    /// Build a config for a given API URL with all defaults
    pub fn with_api_url(api_url: &str) -> Self {
        Self {
            api_url: api_url.to_string(),
            locale: DEFAULT_LOCALE.to_string(),
            timezone: DEFAULT_TIMEZONE.to_string(),
            timezone_label: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            config_dir: PathBuf::from(CONFIG_DIR),
        }
    }

    fn apply_overlay(&mut self, overlay: ConfigOverlay) {
        if let Some(locale) = overlay.locale {
            self.locale = locale;
        }
        if let Some(timezone) = overlay.timezone {
            self.timezone = timezone;
        }
        if let Some(label) = overlay.timezone_label {
            self.timezone_label = Some(label);
        }
        if let Some(timeout_secs) = overlay.timeout_secs {
            self.timeout_secs = timeout_secs;
        }
    }

    fn validate(&self) -> AppResult<()> {
        url::Url::parse(&self.api_url)?;
        self.display_timezone()?;
        self.timezone_label()?;
        if self.timeout_secs == 0 {
            return Err(config_error("Timeout must be greater than zero"));
        }
        Ok(())
    }

    /// Parsed display timezone
    pub fn display_timezone(&self) -> AppResult<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| config_error(&format!("Invalid timezone: {}", self.timezone)))
    }

    /// Label for clock times in the display timezone.
    ///
    /// A non-default timezone must come with its own label.
    pub fn timezone_label(&self) -> AppResult<String> {
        match self.timezone_label.as_deref().map(str::trim) {
            Some(label) if !label.is_empty() => Ok(label.to_string()),
            _ if self.timezone == DEFAULT_TIMEZONE => Ok(DEFAULT_ZONE_LABEL.to_string()),
            _ => Err(config_error(&format!(
                "Timezone {} needs ONEMAPAN_TIMEZONE_LABEL (e.g. WITA)",
                self.timezone
            ))),
        }
    }

    /// Request timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Path of the persisted session file
    pub fn session_path(&self) -> PathBuf {
        self.config_dir.join("session.toml")
    }
}
