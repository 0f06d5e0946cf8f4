use serde::Deserialize;
use url::Url;

use crate::logging::LogLevel;

pub const CONFIG_ELEMENT_ID: &str = "site-config";

const DEFAULT_FORM_ENDPOINT: &str = "https://formspree.io/f/your-form-id";
const DEFAULT_ACTIVATION_EMAIL: &str = "cojokoh@outlook.com";
const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;
const DEFAULT_COUNTER_DURATION_MS: u32 = 2_000;
const DEFAULT_COUNTER_MIN_TICK_MS: u32 = 20;
const DEFAULT_SKILL_BAR_DELAY_MS: u32 = 200;
const DEFAULT_FILTER_HIDE_DELAY_MS: u32 = 350;

const COUNTER_DURATION_MS_BOUNDS: (u32, u32) = (100, 10_000);
const COUNTER_MIN_TICK_MS_BOUNDS: (u32, u32) = (5, 1_000);
const SKILL_BAR_DELAY_MS_BOUNDS: (u32, u32) = (0, 5_000);
const FILTER_HIDE_DELAY_MS_BOUNDS: (u32, u32) = (0, 5_000);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormMethod {
    Post,
    Get,
}

impl FormMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Post => "POST",
            Self::Get => "GET",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "POST" => Some(Self::Post),
            "GET" => Some(Self::Get),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SiteConfig {
    pub form_endpoint: Url,
    pub form_method: FormMethod,
    pub activation_email: String,
    pub log_level: LogLevel,
    pub counter_duration_ms: u32,
    pub counter_min_tick_ms: u32,
    pub skill_bar_delay_ms: u32,
    pub filter_hide_delay_ms: u32,
}

/// Raw shape of the embedded config block. Every field is optional and loosely
/// typed so one bad value only resets that field.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSiteConfig {
    form_endpoint: Option<String>,
    form_method: Option<String>,
    activation_email: Option<String>,
    log_level: Option<String>,
    counter_duration_ms: Option<serde_json::Value>,
    counter_min_tick_ms: Option<serde_json::Value>,
    skill_bar_delay_ms: Option<serde_json::Value>,
    filter_hide_delay_ms: Option<serde_json::Value>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigFallback {
    Missing,
    Malformed,
}

impl ConfigFallback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Missing => "missing",
            Self::Malformed => "malformed",
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            form_endpoint: default_form_endpoint(),
            form_method: FormMethod::Post,
            activation_email: DEFAULT_ACTIVATION_EMAIL.to_string(),
            log_level: DEFAULT_LOG_LEVEL,
            counter_duration_ms: DEFAULT_COUNTER_DURATION_MS,
            counter_min_tick_ms: DEFAULT_COUNTER_MIN_TICK_MS,
            skill_bar_delay_ms: DEFAULT_SKILL_BAR_DELAY_MS,
            filter_hide_delay_ms: DEFAULT_FILTER_HIDE_DELAY_MS,
        }
    }
}

impl SiteConfig {
    /// Builds the config from the text of the embedded JSON block. Never fails:
    /// the second element reports whether the whole block was discarded.
    pub fn from_json(source: Option<&str>) -> (Self, Option<ConfigFallback>) {
        let Some(source) = source.map(str::trim).filter(|value| !value.is_empty()) else {
            return (Self::default(), Some(ConfigFallback::Missing));
        };

        match serde_json::from_str::<RawSiteConfig>(source) {
            Ok(raw) => (Self::from_raw(raw), None),
            Err(_) => (Self::default(), Some(ConfigFallback::Malformed)),
        }
    }

    fn from_raw(raw: RawSiteConfig) -> Self {
        let form_endpoint = raw
            .form_endpoint
            .as_deref()
            .and_then(parse_http_url)
            .unwrap_or_else(default_form_endpoint);
        let form_method = raw
            .form_method
            .as_deref()
            .and_then(FormMethod::parse)
            .unwrap_or(FormMethod::Post);
        let activation_email = raw
            .activation_email
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_ACTIVATION_EMAIL.to_string());
        let log_level = raw
            .log_level
            .as_deref()
            .and_then(LogLevel::parse)
            .unwrap_or(DEFAULT_LOG_LEVEL);

        Self {
            form_endpoint,
            form_method,
            activation_email,
            log_level,
            counter_duration_ms: parse_u32_with_bounds(
                raw.counter_duration_ms.as_ref(),
                DEFAULT_COUNTER_DURATION_MS,
                COUNTER_DURATION_MS_BOUNDS,
            ),
            counter_min_tick_ms: parse_u32_with_bounds(
                raw.counter_min_tick_ms.as_ref(),
                DEFAULT_COUNTER_MIN_TICK_MS,
                COUNTER_MIN_TICK_MS_BOUNDS,
            ),
            skill_bar_delay_ms: parse_u32_with_bounds(
                raw.skill_bar_delay_ms.as_ref(),
                DEFAULT_SKILL_BAR_DELAY_MS,
                SKILL_BAR_DELAY_MS_BOUNDS,
            ),
            filter_hide_delay_ms: parse_u32_with_bounds(
                raw.filter_hide_delay_ms.as_ref(),
                DEFAULT_FILTER_HIDE_DELAY_MS,
                FILTER_HIDE_DELAY_MS_BOUNDS,
            ),
        }
    }
}

fn default_form_endpoint() -> Url {
    Url::parse(DEFAULT_FORM_ENDPOINT).expect("default form endpoint is a valid URL")
}

fn parse_http_url(value: &str) -> Option<Url> {
    let parsed = Url::parse(value.trim()).ok()?;

    if parsed.scheme() == "http" || parsed.scheme() == "https" {
        Some(parsed)
    } else {
        None
    }
}

fn parse_u32_with_bounds(value: Option<&serde_json::Value>, default: u32, bounds: (u32, u32)) -> u32 {
    value
        .and_then(|value| match value {
            serde_json::Value::Number(number) => number.as_u64(),
            serde_json::Value::String(text) => text.trim().parse::<u64>().ok(),
            _ => None,
        })
        .and_then(|value| u32::try_from(value).ok())
        .filter(|value| (bounds.0..=bounds.1).contains(value))
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_block_yields_defaults() {
        let (config, fallback) = SiteConfig::from_json(None);
        assert_eq!(config, SiteConfig::default());
        assert_eq!(fallback, Some(ConfigFallback::Missing));

        let (_, fallback) = SiteConfig::from_json(Some("   "));
        assert_eq!(fallback, Some(ConfigFallback::Missing));
    }

    #[test]
    fn malformed_block_yields_defaults() {
        let (config, fallback) = SiteConfig::from_json(Some("{ not json"));
        assert_eq!(config, SiteConfig::default());
        assert_eq!(fallback, Some(ConfigFallback::Malformed));
    }

    #[test]
    fn valid_fields_are_applied() {
        let (config, fallback) = SiteConfig::from_json(Some(
            r#"{
                "formEndpoint": "https://formspree.io/f/abc123",
                "formMethod": "post",
                "activationEmail": "owner@example.com",
                "logLevel": "DEBUG",
                "counterDurationMs": 1500,
                "skillBarDelayMs": "0"
            }"#,
        ));

        assert_eq!(fallback, None);
        assert_eq!(config.form_endpoint.as_str(), "https://formspree.io/f/abc123");
        assert_eq!(config.form_method, FormMethod::Post);
        assert_eq!(config.activation_email, "owner@example.com");
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.counter_duration_ms, 1_500);
        assert_eq!(config.skill_bar_delay_ms, 0);
        assert_eq!(config.filter_hide_delay_ms, DEFAULT_FILTER_HIDE_DELAY_MS);
    }

    #[test]
    fn invalid_fields_fall_back_individually() {
        let (config, fallback) = SiteConfig::from_json(Some(
            r#"{
                "formEndpoint": "javascript:alert(1)",
                "formMethod": "DELETE",
                "activationEmail": "  ",
                "counterDurationMs": 99999999,
                "counterMinTickMs": -4,
                "filterHideDelayMs": true
            }"#,
        ));

        assert_eq!(fallback, None);
        assert_eq!(config.form_endpoint, default_form_endpoint());
        assert_eq!(config.form_method, FormMethod::Post);
        assert_eq!(config.activation_email, DEFAULT_ACTIVATION_EMAIL);
        assert_eq!(config.counter_duration_ms, DEFAULT_COUNTER_DURATION_MS);
        assert_eq!(config.counter_min_tick_ms, DEFAULT_COUNTER_MIN_TICK_MS);
        assert_eq!(config.filter_hide_delay_ms, DEFAULT_FILTER_HIDE_DELAY_MS);
    }
}
