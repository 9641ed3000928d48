//! Record store file format tests

use chrono::{TimeZone, Utc};
use metal_prices::observation::Observation;
use metal_prices::record::{Recorder, DELIMITER, RECORD_COLUMNS};
use metal_prices::source::{Metal, Rate, SpotPrice};
use tempfile::TempDir;

fn observation(hour: u32, gold: f64, silver: f64, rate: f64) -> Observation {
    let ts = Utc.with_ymd_and_hms(2025, 9, 30, hour, 0, 0).unwrap();
    Observation::from_quotes(
        ts,
        &SpotPrice {
            metal: Metal::Gold,
            usd_per_ounce: gold,
            fetched_at: ts,
        },
        &SpotPrice {
            metal: Metal::Silver,
            usd_per_ounce: silver,
            fetched_at: ts,
        },
        &Rate {
            value: rate,
            fetched_at: ts,
        },
    )
    .unwrap()
}

#[test]
fn test_record_store_reads_back_as_csv() {
    let dir = TempDir::new().unwrap();
    let recorder = Recorder::with_paths(
        dir.path().join("data/prices_log.csv"),
        dir.path().join("data/prices.log"),
    );

    recorder.record(&observation(9, 2000.0, 25.0, 48.13)).unwrap();
    recorder.record(&observation(10, 3743.5, 44.99, 48.13)).unwrap();

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(DELIMITER)
        .from_path(recorder.record_path())
        .unwrap();

    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), RECORD_COLUMNS);

    let rows: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(&rows[0][0], "2025-09-30T09:00:00.000000+00:00");
    assert_eq!(&rows[1][0], "2025-09-30T10:00:00.000000+00:00");
    assert_eq!(&rows[1][1], "3743.50");
    assert_eq!(&rows[1][5], "120.36");
    assert_eq!(&rows[1][7], "5792.75");

    for row in &rows {
        assert_eq!(row.len(), RECORD_COLUMNS.len());
        for field in row.iter().skip(1) {
            let (_, fraction) = field.split_once('.').unwrap();
            assert_eq!(fraction.len(), 2, "field {field}");
        }
    }
}

#[test]
fn test_log_lines_follow_records() {
    let dir = TempDir::new().unwrap();
    let recorder = Recorder::with_paths(
        dir.path().join("prices_log.csv"),
        dir.path().join("prices.log"),
    );

    recorder.record(&observation(9, 2000.0, 25.0, 48.13)).unwrap();
    recorder
        .record_failure(Utc.with_ymd_and_hms(2025, 9, 30, 10, 0, 0).unwrap(), &"rate unavailable")
        .unwrap();
    recorder.record(&observation(11, 2000.0, 25.0, 48.13)).unwrap();

    let log = std::fs::read_to_string(recorder.log_path()).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("[2025-09-30T09:00:00.000000+00:00] Gold (oz/g)"));
    assert_eq!(
        lines[1],
        "[2025-09-30T10:00:00.000000+00:00] Error: rate unavailable"
    );
    assert!(lines[2].starts_with("[2025-09-30T11:00:00.000000+00:00]"));

    let records = std::fs::read_to_string(recorder.record_path()).unwrap();
    assert_eq!(records.lines().count(), 3);
}
