//! Configuration types for metal-prices

use crate::fetch::{Endpoint, HttpConfig, RetryPolicy, ValueDomain, DEFAULT_USER_AGENT};
use crate::record::{RecorderConfig, DEFAULT_LOG_PATH, DEFAULT_RECORD_PATH};
use crate::source::Metal;
use crate::telemetry::LogFormat;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub fetch: FetchConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub mock: MockConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

/// Remote endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct SourcesConfig {
    /// Gold spot price URL
    #[serde(default = "default_gold_url")]
    pub gold_url: String,

    /// Silver spot price URL
    #[serde(default = "default_silver_url")]
    pub silver_url: String,

    /// Field holding the USD per ounce price in metal responses
    #[serde(default = "default_price_field")]
    pub price_field: String,

    /// USD exchange rate URL
    #[serde(default = "default_exchange_url")]
    pub exchange_url: String,

    /// Dotted path to the EGP rate in the exchange response
    #[serde(default = "default_rate_field")]
    pub rate_field: String,

    /// Status field checked before reading the rate (empty to disable)
    #[serde(default = "default_rate_status_field")]
    pub rate_status_field: String,

    /// Required value of the status field
    #[serde(default = "default_rate_status_value")]
    pub rate_status_value: String,
}

fn default_gold_url() -> String {
    "https://api.gold-api.com/price/XAU".to_string()
}
fn default_silver_url() -> String {
    "https://api.gold-api.com/price/XAG".to_string()
}
fn default_price_field() -> String {
    "price".to_string()
}
fn default_exchange_url() -> String {
    "https://open.er-api.com/v6/latest/USD".to_string()
}
fn default_rate_field() -> String {
    "rates.EGP".to_string()
}
fn default_rate_status_field() -> String {
    "result".to_string()
}
fn default_rate_status_value() -> String {
    "success".to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            gold_url: default_gold_url(),
            silver_url: default_silver_url(),
            price_field: default_price_field(),
            exchange_url: default_exchange_url(),
            rate_field: default_rate_field(),
            rate_status_field: default_rate_status_field(),
            rate_status_value: default_rate_status_value(),
        }
    }
}

impl SourcesConfig {
    /// Spot price endpoint for a metal
    pub fn metal_endpoint(&self, metal: Metal) -> Endpoint {
        let url = match metal {
            Metal::Gold => &self.gold_url,
            Metal::Silver => &self.silver_url,
        };
        Endpoint::new(metal.key(), url.as_str(), self.price_field.as_str())
            .with_domain(ValueDomain::NonNegative)
    }

    /// USD to EGP exchange rate endpoint
    pub fn rate_endpoint(&self) -> Endpoint {
        let endpoint = Endpoint::new(
            "usd_egp",
            self.exchange_url.as_str(),
            self.rate_field.as_str(),
        )
        .with_domain(ValueDomain::Positive);

        if self.rate_status_field.is_empty() {
            endpoint
        } else {
            endpoint.with_guard(
                self.rate_status_field.as_str(),
                self.rate_status_value.as_str(),
            )
        }
    }
}

/// HTTP fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetchConfig {
    /// Per-attempt timeout (seconds)
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Base delay between attempts (milliseconds); grows linearly
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,

    /// User-Agent header
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_timeout_secs() -> u64 {
    10
}
fn default_retry_delay_ms() -> u64 {
    1000
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            retry_delay_ms: default_retry_delay_ms(),
            user_agent: default_user_agent(),
        }
    }
}

impl FetchConfig {
    pub fn http_config(&self) -> HttpConfig {
        HttpConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            user_agent: self.user_agent.clone(),
        }
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(Duration::from_millis(self.retry_delay_ms))
    }
}

/// Record and log store locations
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_record_path")]
    pub record_path: PathBuf,
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,
}

fn default_record_path() -> PathBuf {
    PathBuf::from(DEFAULT_RECORD_PATH)
}
fn default_log_path() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_PATH)
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            record_path: default_record_path(),
            log_path: default_log_path(),
        }
    }
}

impl StorageConfig {
    pub fn recorder_config(&self) -> RecorderConfig {
        RecorderConfig {
            record_path: self.record_path.clone(),
            log_path: self.log_path.clone(),
        }
    }
}

/// Fixed values used in mock (dry-run) mode
#[derive(Debug, Clone, Deserialize)]
pub struct MockConfig {
    #[serde(default = "default_mock_gold")]
    pub gold_usd_per_ounce: f64,
    #[serde(default = "default_mock_silver")]
    pub silver_usd_per_ounce: f64,
    #[serde(default = "default_mock_rate")]
    pub usd_to_egp: f64,
}

fn default_mock_gold() -> f64 {
    3743.50
}
fn default_mock_silver() -> f64 {
    44.99
}
fn default_mock_rate() -> f64 {
    48.13
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            gold_usd_per_ounce: default_mock_gold(),
            silver_usd_per_ounce: default_mock_silver(),
            usd_to_egp: default_mock_rate(),
        }
    }
}

impl MockConfig {
    /// Mock spot price for a metal
    pub fn price(&self, metal: Metal) -> f64 {
        match metal {
            Metal::Gold => self.gold_usd_per_ounce,
            Metal::Silver => self.silver_usd_per_ounce,
        }
    }
}

/// Telemetry configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelemetryConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: impl AsRef<std::path::Path>) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}
