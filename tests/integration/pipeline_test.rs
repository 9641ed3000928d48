//! End-to-end pipeline tests over an in-memory transport

use async_trait::async_trait;
use metal_prices::config::Config;
use metal_prices::fetch::{
    FetchFailure, RetryPolicy, RetryingFetcher, Transport, TransportError, TransportResponse,
};
use metal_prices::pipeline::{self, Pipeline, PipelineError, PipelineState, RunOptions};
use metal_prices::record::{Recorder, RECORD_COLUMNS};
use metal_prices::source::{Metal, NetworkSource, PriceSource, RateSource};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;

type Reply = Result<TransportResponse, TransportError>;

/// Replies per URL, in order; the last reply repeats
struct RoutedTransport {
    routes: Mutex<HashMap<String, VecDeque<Reply>>>,
    calls: Mutex<Vec<String>>,
}

impl RoutedTransport {
    fn new(routes: Vec<(&str, Vec<Reply>)>) -> Arc<Self> {
        Arc::new(Self {
            routes: Mutex::new(
                routes
                    .into_iter()
                    .map(|(url, replies)| (url.to_string(), replies.into()))
                    .collect(),
            ),
            calls: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RoutedTransport {
    async fn get(&self, url: &str) -> Reply {
        self.calls.lock().unwrap().push(url.to_string());

        let mut routes = self.routes.lock().unwrap();
        let replies = routes
            .get_mut(url)
            .unwrap_or_else(|| panic!("unexpected url {url}"));
        if replies.len() > 1 {
            replies.pop_front().unwrap()
        } else {
            replies.front().cloned().unwrap()
        }
    }
}

fn network_pipeline(transport: Arc<RoutedTransport>, config: &Config) -> Pipeline {
    let fetcher = Arc::new(RetryingFetcher::new(
        transport,
        RetryPolicy::new(Duration::ZERO),
    ));
    let source = |endpoint| Box::new(NetworkSource::new(Arc::clone(&fetcher), endpoint));

    Pipeline::new(
        PriceSource::new(
            Metal::Gold,
            source(config.sources.metal_endpoint(Metal::Gold)),
        ),
        PriceSource::new(
            Metal::Silver,
            source(config.sources.metal_endpoint(Metal::Silver)),
        ),
        RateSource::new(source(config.sources.rate_endpoint())),
        Recorder::new(config.storage.recorder_config()),
    )
}

fn temp_config(dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.storage.record_path = dir.path().join("prices_log.csv");
    config.storage.log_path = dir.path().join("prices.log");
    config
}

const GOLD: &str = "https://api.gold-api.com/price/XAU";
const SILVER: &str = "https://api.gold-api.com/price/XAG";
const RATE: &str = "https://open.er-api.com/v6/latest/USD";

fn ok(body: &str) -> Reply {
    Ok(TransportResponse::ok(body))
}

#[tokio::test]
async fn test_network_run_records_observation() {
    let dir = TempDir::new().unwrap();
    let config = temp_config(&dir);
    let transport = RoutedTransport::new(vec![
        (GOLD, vec![ok(r#"{"name":"Gold","price":2000.0,"symbol":"XAU"}"#)]),
        (SILVER, vec![ok(r#"{"name":"Silver","price":"25.00","symbol":"XAG"}"#)]),
        (RATE, vec![ok(r#"{"result":"success","rates":{"USD":1,"EGP":48.13}}"#)]),
    ]);

    let mut pipeline = network_pipeline(Arc::clone(&transport), &config);
    let obs = pipeline.run(true).await.unwrap();

    assert_eq!(pipeline.state(), PipelineState::Done);
    assert_eq!(transport.calls(), vec![GOLD, SILVER, RATE]);
    assert_eq!(obs.gold().usd_per_ounce, 2000.0);

    let records = std::fs::read_to_string(&config.storage.record_path).unwrap();
    let lines: Vec<&str> = records.lines().collect();
    assert_eq!(lines[0], RECORD_COLUMNS.join(";"));
    assert!(lines[1].ends_with(";2000.00;25.00;96260.00;1203.25;64.30;0.80;3094.83;38.69"));

    let log = std::fs::read_to_string(&config.storage.log_path).unwrap();
    assert!(log.contains("Gold (oz/g): $2000.00/$64.30 USD, E£96260.00/3094.83 EGP"));
}

#[tokio::test]
async fn test_transient_failures_are_retried() {
    let dir = TempDir::new().unwrap();
    let config = temp_config(&dir);
    let transport = RoutedTransport::new(vec![
        (
            GOLD,
            vec![
                Err(TransportError::Timeout("timed out".into())),
                Ok(TransportResponse::new(503, "unavailable")),
                ok(r#"{"price":2000.0}"#),
            ],
        ),
        (SILVER, vec![ok("not json"), ok(r#"{"price":25.0}"#)]),
        (RATE, vec![ok(r#"{"result":"success","rates":{"EGP":48.13}}"#)]),
    ]);

    let mut pipeline = network_pipeline(Arc::clone(&transport), &config);
    pipeline.run(true).await.unwrap();

    let calls = transport.calls();
    assert_eq!(calls.iter().filter(|u| *u == GOLD).count(), 3);
    assert_eq!(calls.iter().filter(|u| *u == SILVER).count(), 2);
    assert_eq!(calls.iter().filter(|u| *u == RATE).count(), 1);
}

#[tokio::test]
async fn test_rate_guard_failure_exhausts_attempts() {
    let dir = TempDir::new().unwrap();
    let config = temp_config(&dir);
    let transport = RoutedTransport::new(vec![
        (GOLD, vec![ok(r#"{"price":2000.0}"#)]),
        (SILVER, vec![ok(r#"{"price":25.0}"#)]),
        (RATE, vec![ok(r#"{"result":"error","error-type":"quota-reached"}"#)]),
    ]);

    let mut pipeline = network_pipeline(Arc::clone(&transport), &config);
    let err = pipeline.run(true).await.unwrap_err();

    match err {
        PipelineError::Fetch(e) => {
            assert_eq!(e.endpoint, "usd_egp");
            assert_eq!(e.attempts, 3);
            assert!(matches!(e.cause, FetchFailure::Parse(_)));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(pipeline.state(), PipelineState::Failed);
    assert!(!config.storage.record_path.exists());
    assert!(!config.storage.log_path.exists());
}

#[tokio::test]
async fn test_client_error_fails_fast() {
    let dir = TempDir::new().unwrap();
    let config = temp_config(&dir);
    let transport = RoutedTransport::new(vec![(
        GOLD,
        vec![Ok(TransportResponse::new(404, "not found"))],
    )]);

    let mut pipeline = network_pipeline(Arc::clone(&transport), &config);
    let err = pipeline.run(true).await.unwrap_err();

    assert!(matches!(err, PipelineError::Fetch(ref e) if e.attempts == 1));
    assert_eq!(transport.calls(), vec![GOLD]);
}

#[tokio::test]
async fn test_mock_runs_append() {
    let dir = TempDir::new().unwrap();
    let config = temp_config(&dir);
    let options = RunOptions {
        mock: true,
        auto_save: true,
    };

    let first = pipeline::run(&config, options).await.unwrap();
    let second = pipeline::run(&config, options).await.unwrap();
    assert!(second.timestamp() >= first.timestamp());

    let records = std::fs::read_to_string(&config.storage.record_path).unwrap();
    let lines: Vec<&str> = records.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(
        lines.iter().filter(|l| l.starts_with("timestamp")).count(),
        1
    );

    let log = std::fs::read_to_string(&config.storage.log_path).unwrap();
    assert_eq!(log.lines().count(), 2);
}

#[tokio::test]
async fn test_mock_run_values() {
    let dir = TempDir::new().unwrap();
    let config = temp_config(&dir);

    let obs = pipeline::run(
        &config,
        RunOptions {
            mock: true,
            auto_save: false,
        },
    )
    .await
    .unwrap();

    let gold = obs.gold();
    assert!((gold.egp_per_ounce - 180174.66).abs() < 0.01);
    assert!((gold.usd_per_gram - 120.36).abs() < 0.01);
    assert!((gold.egp_per_gram - 5792.75).abs() < 0.01);

    let silver = obs.silver();
    assert!((silver.egp_per_ounce - 2165.37).abs() < 0.01);
    assert!((silver.usd_per_gram - 1.45).abs() < 0.01);
    assert!((silver.egp_per_gram - 69.62).abs() < 0.01);

    assert!(!config.storage.record_path.exists());
}
