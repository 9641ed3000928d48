//! Configuration file tests

use metal_prices::config::Config;
use metal_prices::telemetry::LogFormat;
use std::path::PathBuf;

#[test]
fn test_config_example_loads() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config.toml.example");
    let config = Config::load(path).unwrap();
    let defaults = Config::default();

    assert_eq!(config.sources.gold_url, defaults.sources.gold_url);
    assert_eq!(config.sources.rate_field, "rates.EGP");
    assert_eq!(config.fetch.timeout_secs, 10);
    assert_eq!(config.fetch.retry_delay_ms, 1000);
    assert_eq!(config.storage.record_path, PathBuf::from("prices_log.csv"));
    assert_eq!(config.mock.gold_usd_per_ounce, 3743.50);
    assert_eq!(config.telemetry.format, LogFormat::Pretty);
}

#[test]
fn test_config_load_from_file() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "[storage]\nrecord_path = \"/var/lib/prices/prices_log.csv\"\n\n[telemetry]\nformat = \"json\"\n",
    )
    .unwrap();

    let config = Config::load(&path).unwrap();
    assert_eq!(
        config.storage.record_path,
        PathBuf::from("/var/lib/prices/prices_log.csv")
    );
    assert_eq!(config.storage.log_path, PathBuf::from("prices.log"));
    assert_eq!(config.telemetry.format, LogFormat::Json);
}

#[test]
fn test_config_rejects_bad_types() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[fetch]\ntimeout_secs = \"ten\"\n").unwrap();

    assert!(Config::load(&path).is_err());
}
