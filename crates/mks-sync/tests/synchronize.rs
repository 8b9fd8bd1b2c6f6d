//! End-to-end synchronization runs against an in-memory source.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use mks_config::{HistoryErrorPolicy, LiveErrorPolicy, MksConfig};
use mks_core::{Priority, SourceKind};
use mks_source::{DrawSource, SourceError};
use mks_sync::{SyncError, SyncStep, Synchronizer};
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};

const YEAR: i32 = 2025;

/// Canned endpoint answers. `None` means the request fails with a 503.
#[derive(Default)]
struct FakeSource {
    live: Option<Value>,
    history: HashMap<i32, Option<Value>>,
    calls: Mutex<Vec<String>>,
}

impl FakeSource {
    fn new(live: Value) -> Self {
        Self {
            live: Some(live),
            ..Self::default()
        }
    }

    fn failing_live() -> Self {
        Self::default()
    }

    fn year(mut self, year: i32, items: Value) -> Self {
        self.history.insert(year, Some(items));
        self
    }

    fn failing_year(mut self, year: i32) -> Self {
        self.history.insert(year, None);
        self
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

fn unavailable() -> SourceError {
    SourceError::Api {
        status: 503,
        message: "unavailable".to_string(),
    }
}

fn items(value: Option<&Value>) -> Result<Vec<Value>, SourceError> {
    match value {
        Some(Value::Array(items)) => Ok(items.clone()),
        Some(_) => Err(SourceError::Parse("not an array".to_string())),
        None => Err(unavailable()),
    }
}

impl DrawSource for FakeSource {
    async fn fetch_live(&self) -> Result<Vec<Value>, SourceError> {
        self.calls.lock().unwrap().push("live".to_string());
        items(self.live.as_ref())
    }

    async fn fetch_history(&self, year: i32) -> Result<Vec<Value>, SourceError> {
        self.calls.lock().unwrap().push(format!("history/{year}"));
        // Years with no canned answer have no draws.
        match self.history.get(&year) {
            Some(answer) => items(answer.as_ref()),
            None => Ok(Vec::new()),
        }
    }
}

fn config_for(path: &Path) -> MksConfig {
    let mut config = MksConfig::default();
    config.storage.path = path.to_path_buf();
    config.history.current_year_only = true;
    config
}

fn data_file(dir: &tempfile::TempDir, content: Option<&str>) -> PathBuf {
    let path = dir.path().join("data.json");
    if let Some(content) = content {
        std::fs::write(&path, content).unwrap();
    }
    path
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[rstest]
#[case::default_priority(Priority::default(), 99)]
#[case::persisted_over_history(
    Priority::new(vec![SourceKind::Live, SourceKind::Persisted, SourceKind::History]).unwrap(),
    1
)]
#[tokio::test]
async fn worked_example(#[case] priority: Priority, #[case] expected_v: i64) {
    let dir = tempfile::tempdir().unwrap();
    let path = data_file(&dir, Some(r#"[{"expect":"2025001","v":1}]"#));
    let mut config = config_for(&path);
    config.merge.priority = priority;
    let source = FakeSource::new(json!([{"expect": "2025002", "v": 2}]))
        .year(YEAR, json!([{"expect": "2025001", "v": 99}]));

    let report = Synchronizer::new(&source, &config, YEAR).run().await.unwrap();

    assert_eq!(
        read_json(&path),
        json!([
            {"expect": "2025002", "v": 2},
            {"expect": "2025001", "v": expected_v}
        ])
    );
    assert_eq!(report.total, 2);
    assert_eq!(report.added, 1);
    assert_eq!(report.persisted, 1);
    assert!(report.written);
}

#[tokio::test]
async fn missing_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = data_file(&dir, None);
    let source = FakeSource::new(json!([{"expect": "3"}])).year(YEAR, json!([{"expect": "1"}]));

    let report = Synchronizer::new(&source, &config_for(&path), YEAR)
        .run()
        .await
        .unwrap();

    assert_eq!(report.persisted, 0);
    assert_eq!(read_json(&path), json!([{"expect": "3"}, {"expect": "1"}]));
}

#[tokio::test]
async fn blank_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = data_file(&dir, Some("\n  \n"));
    let source = FakeSource::new(json!([{"expect": "1"}]));

    let report = Synchronizer::new(&source, &config_for(&path), YEAR)
        .run()
        .await
        .unwrap();
    assert_eq!(report.total, 1);
}

#[tokio::test]
async fn corrupt_file_aborts_before_fetching_and_is_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let original = r#"[{"expect":"1"},"#;
    let path = data_file(&dir, Some(original));
    let source = FakeSource::new(json!([{"expect": "2"}]));

    let err = Synchronizer::new(&source, &config_for(&path), YEAR)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::PersistedStateCorrupt { .. }));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn live_failure_aborts_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let original = r#"[{"expect":"1"}]"#;
    let path = data_file(&dir, Some(original));
    let source = FakeSource::failing_live().year(YEAR, json!([{"expect": "2"}]));

    let err = Synchronizer::new(&source, &config_for(&path), YEAR)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::LiveFetch(_)));
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
    assert_eq!(source.calls(), vec!["live".to_string()]);
}

#[tokio::test]
async fn live_failure_can_be_skipped() {
    let dir = tempfile::tempdir().unwrap();
    let path = data_file(&dir, Some(r#"[{"expect":"1"}]"#));
    let mut config = config_for(&path);
    config.policy.on_live_error = LiveErrorPolicy::Skip;
    let source = FakeSource::failing_live().year(YEAR, json!([{"expect": "2"}]));

    let report = Synchronizer::new(&source, &config, YEAR).run().await.unwrap();

    assert!(report.live_skipped);
    assert_eq!(report.live, 0);
    assert_eq!(read_json(&path), json!([{"expect": "2"}, {"expect": "1"}]));
}

#[tokio::test]
async fn failed_history_year_is_skipped_by_default() {
    let dir = tempfile::tempdir().unwrap();
    let path = data_file(&dir, None);
    let mut config = config_for(&path);
    config.history.current_year_only = false;
    config.history.start_year = 2023;
    let source = FakeSource::new(json!([]))
        .year(2023, json!([{"expect": "2023001"}]))
        .failing_year(2024)
        .year(2025, json!([{"expect": "2025001"}]));

    let report = Synchronizer::new(&source, &config, YEAR).run().await.unwrap();

    assert_eq!(report.years_fetched, vec![2023, 2025]);
    assert_eq!(report.years_skipped, vec![2024]);
    assert_eq!(
        read_json(&path),
        json!([{"expect": "2025001"}, {"expect": "2023001"}])
    );
}

#[tokio::test]
async fn failed_history_year_can_abort() {
    let dir = tempfile::tempdir().unwrap();
    let path = data_file(&dir, None);
    let mut config = config_for(&path);
    config.history.current_year_only = false;
    config.history.start_year = 2024;
    config.policy.on_history_year_error = HistoryErrorPolicy::Abort;
    let source = FakeSource::new(json!([{"expect": "1"}])).failing_year(2024);

    let err = Synchronizer::new(&source, &config, YEAR)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::HistoryFetch { year: 2024, .. }));
    assert!(!path.exists());
    // Aborted on the first failing year; 2025 never requested.
    assert_eq!(source.calls(), vec!["live", "history/2024"]);
}

#[tokio::test]
async fn requests_live_once_then_each_year_in_order() {
    let dir = tempfile::tempdir().unwrap();
    let path = data_file(&dir, None);
    let mut config = config_for(&path);
    config.history.current_year_only = false;
    config.history.start_year = 2020;
    let source = FakeSource::new(json!([]));

    let report = Synchronizer::new(&source, &config, YEAR).run().await.unwrap();

    assert_eq!(
        source.calls(),
        vec![
            "live",
            "history/2020",
            "history/2021",
            "history/2022",
            "history/2023",
            "history/2024",
            "history/2025"
        ]
    );
    assert_eq!(report.years_fetched.len(), 6);
}

#[tokio::test]
async fn empty_year_range_is_rejected_before_any_io() {
    let dir = tempfile::tempdir().unwrap();
    let path = data_file(&dir, Some("not json"));
    let mut config = config_for(&path);
    config.history.current_year_only = false;
    config.history.start_year = 2030;
    let source = FakeSource::new(json!([]));

    let err = Synchronizer::new(&source, &config, YEAR)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Config(_)));
    assert!(source.calls().is_empty());
}

#[tokio::test]
async fn second_identical_run_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = data_file(&dir, Some(r#"[{"expect":"2024100","openCode":"01,02,03,04,05,06,07"}]"#));
    let config = config_for(&path);
    let source = FakeSource::new(json!([{"expect": "2025010", "zodiac": "rat"}])).year(
        YEAR,
        json!([
            {"expect": "2025009", "openTime": "2025-01-09 21:32:32"},
            {"expect": "2025010", "zodiac": "ignored duplicate"}
        ]),
    );

    Synchronizer::new(&source, &config, YEAR).run().await.unwrap();
    let first = std::fs::read(&path).unwrap();

    let report = Synchronizer::new(&source, &config, YEAR).run().await.unwrap();
    let second = std::fs::read(&path).unwrap();

    assert_eq!(first, second);
    assert_eq!(report.added, 0);
}

#[tokio::test]
async fn persisted_records_are_never_lost() {
    let dir = tempfile::tempdir().unwrap();
    let persisted: Vec<Value> = (1..=50).map(|n| json!({"expect": n.to_string()})).collect();
    let path = data_file(&dir, Some(Value::Array(persisted).to_string().as_str()));
    let source = FakeSource::new(json!([{"expect": "51"}])).year(YEAR, json!([{"expect": "25"}]));

    let report = Synchronizer::new(&source, &config_for(&path), YEAR)
        .run()
        .await
        .unwrap();

    assert_eq!(report.persisted, 50);
    assert!(report.total >= report.persisted);
    assert_eq!(report.total, 51);

    let written = read_json(&path);
    let ids: Vec<u64> = written
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["expect"].as_str().unwrap().parse().unwrap())
        .collect();
    assert!(ids.windows(2).all(|w| w[0] > w[1]));
}

#[tokio::test]
async fn items_without_expect_are_dropped_and_counted() {
    let dir = tempfile::tempdir().unwrap();
    let path = data_file(&dir, Some(r#"[{"expect":"1"},{"broken":true}]"#));
    let source = FakeSource::new(json!([{"expect": ""}, {"expect": "2"}, null]));

    let report = Synchronizer::new(&source, &config_for(&path), YEAR)
        .run()
        .await
        .unwrap();

    assert_eq!(report.malformed, 3);
    assert_eq!(read_json(&path), json!([{"expect": "2"}, {"expect": "1"}]));
}

#[tokio::test]
async fn dry_run_leaves_file_alone() {
    let dir = tempfile::tempdir().unwrap();
    let original = r#"[{"expect":"1"}]"#;
    let path = data_file(&dir, Some(original));
    let source = FakeSource::new(json!([{"expect": "2"}]));

    let report = Synchronizer::new(&source, &config_for(&path), YEAR)
        .dry_run(true)
        .run()
        .await
        .unwrap();

    assert!(!report.written);
    assert_eq!(report.total, 2);
    assert_eq!(std::fs::read_to_string(&path).unwrap(), original);
}

#[tokio::test]
async fn observer_sees_every_step() {
    let dir = tempfile::tempdir().unwrap();
    let path = data_file(&dir, None);
    let source = FakeSource::new(json!([]));
    let steps = Mutex::new(Vec::new());

    let config = config_for(&path);
    Synchronizer::new(&source, &config, YEAR)
        .on_step(|step| steps.lock().unwrap().push(step))
        .run()
        .await
        .unwrap();

    assert_eq!(
        steps.into_inner().unwrap(),
        vec![
            SyncStep::LoadPersisted,
            SyncStep::FetchLive,
            SyncStep::FetchHistory { year: YEAR },
            SyncStep::Persist
        ]
    );
}

#[tokio::test]
async fn write_failure_aborts_and_leaves_existing_files_alone() {
    let dir = tempfile::tempdir().unwrap();
    let original = r#"[{"expect":"1"}]"#;
    let blocker = data_file(&dir, Some(original));
    let path = blocker.join("data.json");
    let source = FakeSource::new(json!([{"expect": "2"}])).year(YEAR, json!([{"expect": "3"}]));

    let err = Synchronizer::new(&source, &config_for(&path), YEAR)
        .run()
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Write { .. }));
    assert_eq!(std::fs::read_to_string(&blocker).unwrap(), original);
    assert_eq!(source.calls(), vec!["live", "history/2025"]);
}
