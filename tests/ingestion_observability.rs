mod common;

use std::sync::{Arc, Mutex};

use rust_data_ingestion::IngestionError;
use rust_data_ingestion::ingestion::{
    CompositeObserver, DataIngestorFactory, FileObserver, IngestionContext, IngestionObserver,
    IngestionOptions, IngestionSeverity, IngestionStats, TracingObserver, ingest_from_path,
};

use common::{CITIES_CSV, PEOPLE_CSV, init_tracing, temp_ingestor, write_zip};

#[derive(Default)]
struct RecordingObserver {
    successes: Mutex<Vec<IngestionStats>>,
    failures: Mutex<Vec<IngestionSeverity>>,
    alerts: Mutex<Vec<IngestionSeverity>>,
}

impl IngestionObserver for RecordingObserver {
    fn on_success(&self, _ctx: &IngestionContext, stats: IngestionStats) {
        self.successes.lock().unwrap().push(stats);
    }

    fn on_failure(
        &self,
        _ctx: &IngestionContext,
        severity: IngestionSeverity,
        _error: &IngestionError,
    ) {
        self.failures.lock().unwrap().push(severity);
    }

    fn on_alert(
        &self,
        _ctx: &IngestionContext,
        severity: IngestionSeverity,
        _error: &IngestionError,
    ) {
        self.alerts.lock().unwrap().push(severity);
    }
}

fn factory() -> DataIngestorFactory {
    DataIngestorFactory::new().with_ingestor(".zip", temp_ingestor())
}

fn options(obs: Arc<RecordingObserver>, threshold: IngestionSeverity) -> IngestionOptions {
    IngestionOptions {
        observer: Some(obs),
        alert_at_or_above: threshold,
        ..Default::default()
    }
}

#[test]
fn observer_receives_shape_on_success() {
    let dir = tempfile::tempdir().unwrap();
    let zip = write_zip(dir.path(), "folder.zip", &[("people.csv", PEOPLE_CSV)]);
    let obs = Arc::new(RecordingObserver::default());

    ingest_from_path(&factory(), &zip, &options(obs.clone(), IngestionSeverity::Critical)).unwrap();

    let successes = obs.successes.lock().unwrap().clone();
    assert_eq!(successes, vec![IngestionStats { rows: 3, columns: 2 }]);
    assert!(obs.failures.lock().unwrap().is_empty());
}

#[test]
fn observer_receives_failure_and_alert_on_critical_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let obs = Arc::new(RecordingObserver::default());

    // Missing archive -> Io error -> Critical
    let _ = ingest_from_path(
        &factory(),
        dir.path().join("does_not_exist.zip"),
        &options(obs.clone(), IngestionSeverity::Critical),
    )
    .unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Critical]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Critical]);
}

#[test]
fn ambiguous_selection_is_a_warning_without_alert() {
    let dir = tempfile::tempdir().unwrap();
    let zip = write_zip(
        dir.path(),
        "folder.zip",
        &[("people.csv", PEOPLE_CSV), ("cities.csv", CITIES_CSV)],
    );
    let obs = Arc::new(RecordingObserver::default());

    let opts = options(obs.clone(), IngestionSeverity::Error);
    let _ = ingest_from_path(&factory(), &zip, &opts).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Warning]);
    assert!(obs.alerts.lock().unwrap().is_empty());
}

#[test]
fn no_data_found_alerts_at_error_threshold() {
    let dir = tempfile::tempdir().unwrap();
    let zip = write_zip(dir.path(), "folder.zip", &[("readme.txt", "no data here")]);
    let obs = Arc::new(RecordingObserver::default());

    let opts = options(obs.clone(), IngestionSeverity::Error);
    let _ = ingest_from_path(&factory(), &zip, &opts).unwrap_err();

    assert_eq!(obs.failures.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
    assert_eq!(obs.alerts.lock().unwrap().clone(), vec![IngestionSeverity::Error]);
}

#[test]
fn file_observer_appends_json_lines() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let log = dir.path().join("ingest.log");
    let zip = write_zip(dir.path(), "folder.zip", &[("people.csv", PEOPLE_CSV)]);

    let sinks: Vec<Arc<dyn IngestionObserver>> = vec![
        Arc::new(FileObserver::new(&log)),
        Arc::new(TracingObserver),
    ];
    let observer = Arc::new(CompositeObserver::new(sinks));
    let opts = IngestionOptions {
        observer: Some(observer),
        alert_at_or_above: IngestionSeverity::Error,
        ..Default::default()
    };

    ingest_from_path(&factory(), &zip, &opts).unwrap();
    let _ = ingest_from_path(&factory(), dir.path().join("missing.zip"), &opts).unwrap_err();

    let contents = std::fs::read_to_string(&log).unwrap();
    let events: Vec<serde_json::Value> = contents
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["event"], "ok");
    assert_eq!(events[0]["rows"], 3);
    assert_eq!(events[0]["extension"], ".zip");
    assert_eq!(events[1]["event"], "fail");
    assert_eq!(events[1]["severity"], "Critical");
    assert_eq!(events[2]["event"], "alert");
}
