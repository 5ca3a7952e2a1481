use crate::domain::time_parser::DisplayZone;
use crate::infrastructure::error::InfraError;
use crate::infrastructure::feed_client::FeedEndpoints;
use std::fs;
use std::path::Path;
use url::Url;

const APP_JSON: &str = "app.json";
const DEFAULT_APP_NAME: &str = "F1 Countdown";
pub const DEFAULT_CALENDAR_FEED_URL: &str =
    "https://f1-calendar-api.williamchu0605.workers.dev/2025";
pub const DEFAULT_STANDINGS_FEED_URL: &str =
    "https://f1-driver-standing.williamchu0605.workers.dev/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub app_name: String,
    pub timezone: Option<String>,
    pub calendar_feed_url: Url,
    pub standings_feed_url: Url,
}

impl AppConfig {
    pub fn feed_endpoints(&self) -> FeedEndpoints {
        FeedEndpoints {
            calendar: self.calendar_feed_url.clone(),
            standings: self.standings_feed_url.clone(),
        }
    }

    // command-line override wins over the file value
    pub fn display_zone(&self, override_name: Option<&str>) -> Result<DisplayZone, InfraError> {
        let name = override_name
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .or(self.timezone.as_deref());
        DisplayZone::from_name(name).map_err(InfraError::InvalidConfig)
    }
}

fn default_app_config() -> serde_json::Value {
    serde_json::json!({
        "schema": 1,
        "appName": DEFAULT_APP_NAME,
        "timezone": null,
        "calendarFeedUrl": DEFAULT_CALENDAR_FEED_URL,
        "standingsFeedUrl": DEFAULT_STANDINGS_FEED_URL
    })
}

pub fn ensure_default_configs(config_dir: &Path) -> Result<(), InfraError> {
    let path = config_dir.join(APP_JSON);
    if !path.exists() {
        let formatted = serde_json::to_string_pretty(&default_app_config())?;
        fs::write(path, format!("{formatted}\n"))?;
    }
    Ok(())
}

fn read_config(path: &Path) -> Result<serde_json::Value, InfraError> {
    let raw = fs::read_to_string(path)?;
    let parsed: serde_json::Value = serde_json::from_str(&raw)?;
    let schema = parsed
        .get("schema")
        .and_then(serde_json::Value::as_u64)
        .ok_or_else(|| InfraError::InvalidConfig(format!("missing schema in {}", path.display())))?;
    if schema != 1 {
        return Err(InfraError::InvalidConfig(format!(
            "unsupported schema {} in {}",
            schema,
            path.display()
        )));
    }
    Ok(parsed)
}

fn read_string<'a>(config: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    config
        .get(key)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_feed_url(value: Option<&str>, key: &str, default: &str) -> Result<Url, InfraError> {
    let raw = value.unwrap_or(default);
    let url = Url::parse(raw)
        .map_err(|error| InfraError::InvalidConfig(format!("invalid {key} '{raw}': {error}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(InfraError::InvalidConfig(format!(
            "{key} must use http or https, got '{}'",
            url.scheme()
        )));
    }
    Ok(url)
}

pub fn load_app_config(config_dir: &Path) -> Result<AppConfig, InfraError> {
    let app = read_config(&config_dir.join(APP_JSON))?;

    let timezone = read_string(&app, "timezone").map(ToOwned::to_owned);
    DisplayZone::from_name(timezone.as_deref()).map_err(InfraError::InvalidConfig)?;

    Ok(AppConfig {
        app_name: read_string(&app, "appName")
            .unwrap_or(DEFAULT_APP_NAME)
            .to_string(),
        timezone,
        calendar_feed_url: parse_feed_url(
            read_string(&app, "calendarFeedUrl"),
            "calendarFeedUrl",
            DEFAULT_CALENDAR_FEED_URL,
        )?,
        standings_feed_url: parse_feed_url(
            read_string(&app, "standingsFeedUrl"),
            "standingsFeedUrl",
            DEFAULT_STANDINGS_FEED_URL,
        )?,
    })
}
