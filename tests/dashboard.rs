//! End-to-end checks against the bundled fixture `tests/data/players.csv`.
//!
//! Runs the same path as the dashboard binary: load through `DatasetStore`,
//! filter, derive views, export, and load the export again.

use std::path::PathBuf;
use std::sync::Arc;

use football_health_dashboard::data::filter::{apply_checked, position_options};
use football_health_dashboard::data::loader::read_dataset;
use football_health_dashboard::data::views::{
    compliance_distribution, serialize_csv, sorted_by_injury_risk_desc, top_n_by_injury_risk,
    DEFAULT_TOP_N,
};
use football_health_dashboard::state::{AppState, ExportOrder};
use football_health_dashboard::{
    apply, ComplianceStatus, DatasetStore, FilterSpec, PlayerRecord, PositionFilter,
};

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/data/players.csv")
}

fn names<'a>(rows: impl IntoIterator<Item = &'a PlayerRecord>) -> Vec<&'a str> {
    rows.into_iter().map(|r| r.player_name.as_str()).collect()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn fixture_loads_once_in_file_order() {
    let store = DatasetStore::new(fixture());
    let dataset = store.load().unwrap();
    assert_eq!(dataset.len(), 12);
    assert_eq!(dataset.records()[0].player_name, "Luca Silva");
    assert_eq!(dataset.records()[6].player_name, "Costa, Diego");
    assert!(Arc::ptr_eq(&dataset, &store.load().unwrap()));
    assert_eq!(
        position_options(&dataset),
        vec!["All", "Defender", "Forward", "Goalkeeper", "Midfielder"]
    );
}

#[test]
fn high_risk_non_compliant_view() {
    let dataset = DatasetStore::new(fixture()).load().unwrap();
    let spec = FilterSpec {
        position: PositionFilter::All,
        min_injury_risk_only: true,
        non_compliant_only: true,
    };
    let view = apply(&dataset, &spec);

    assert_eq!(
        names(&view.rows),
        vec!["Mateo Okafor", "Kai Moreau", "Tomas Novak", "Rafael Romero"]
    );
    assert_eq!(view.stats.count, 4);
    assert_close(view.stats.mean_injury_risk, 81.075);
    assert_close(view.stats.pct_cleared, 25.0);
    assert_close(view.stats.pct_compliant, 0.0);
}

#[test]
fn risk_threshold_is_strict() {
    let dataset = DatasetStore::new(fixture()).load().unwrap();
    let spec = FilterSpec {
        min_injury_risk_only: true,
        ..FilterSpec::default()
    };
    let view = apply(&dataset, &spec);
    assert_eq!(view.len(), 6);
    assert!(!names(&view.rows).contains(&"Andre Kowalski"));
}

#[test]
fn position_view_stats() {
    let dataset = DatasetStore::new(fixture()).load().unwrap();
    let spec = FilterSpec {
        position: PositionFilter::from("Defender"),
        ..FilterSpec::default()
    };
    let view = apply_checked(&dataset, &spec).unwrap();

    assert_eq!(names(&view.rows), vec!["Mateo Okafor", "Andre Kowalski", "Jonas Jensen"]);
    assert_close(view.stats.mean_injury_risk, 226.0 / 3.0);
    assert_close(view.stats.pct_cleared, 200.0 / 3.0);
    assert_close(view.stats.pct_compliant, 100.0 / 3.0);
    assert_eq!(
        compliance_distribution(&view),
        vec![(ComplianceStatus::NonCompliant, 2), (ComplianceStatus::Compliant, 1)]
    );
}

#[test]
fn ranking_keeps_ties_in_file_order() {
    let dataset = DatasetStore::new(fixture()).load().unwrap();
    let view = apply(&dataset, &FilterSpec::default());

    let sorted = sorted_by_injury_risk_desc(&view);
    assert_eq!(
        names(sorted.iter().copied().take(6)),
        vec![
            "Kai Moreau",
            "Yusuf Haddad",
            "Rafael Romero",
            "Mateo Okafor",
            "Jonas Jensen",
            "Tomas Novak"
        ]
    );

    let top = top_n_by_injury_risk(&view, DEFAULT_TOP_N);
    assert_eq!(top.len(), 10);
    assert!(!names(top.iter().copied()).contains(&"Idris Mensah"));
}

#[test]
fn export_reloads_to_same_rows() {
    let dataset = DatasetStore::new(fixture()).load().unwrap();
    let mut state = AppState::new(dataset);
    state.set_non_compliant_only(true);

    let bytes = state.export_csv(ExportOrder::Filtered).unwrap();
    let reloaded = read_dataset(bytes.as_slice()).unwrap();
    assert_eq!(reloaded.records(), state.view.rows.as_slice());

    let sorted_bytes = state.export_csv(ExportOrder::InjuryRiskDesc).unwrap();
    let reloaded_sorted = read_dataset(sorted_bytes.as_slice()).unwrap();
    let expected: Vec<PlayerRecord> = sorted_by_injury_risk_desc(&state.view)
        .into_iter()
        .cloned()
        .collect();
    assert_eq!(reloaded_sorted.records(), expected.as_slice());
}

#[test]
fn quoted_names_survive_export() {
    let dataset = DatasetStore::new(fixture()).load().unwrap();
    let spec = FilterSpec {
        position: PositionFilter::from("Forward"),
        ..FilterSpec::default()
    };
    let view = apply(&dataset, &spec);
    let text = String::from_utf8(serialize_csv(&view.rows).unwrap()).unwrap();
    assert!(text.contains("\"Costa, Diego\",Forward,35.0,75.5,480.0,Yes,Compliant"));
}
