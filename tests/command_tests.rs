use contest_pulse::commands::{
    execute_analyze, execute_compare, validate_analyze_args, validate_compare_args, AnalyzeArgs,
    CompareArgs,
};
use contest_pulse::output::{read_comparison, read_report};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const NOW: i64 = 1_710_072_000; // 2024-03-10T12:00:00Z
const DAY: i64 = 86_400;

fn write_fixture(dir: &Path, name: &str, value: serde_json::Value) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, serde_json::to_string_pretty(&value).unwrap()).unwrap();
    path
}

fn rating_fixture() -> serde_json::Value {
    json!([
        { "ratingUpdateTimeSeconds": NOW - 8 * DAY, "oldRating": 1000, "newRating": 1100 },
        { "ratingUpdateTimeSeconds": NOW - 3 * DAY, "oldRating": 1100, "newRating": 1200 },
        { "ratingUpdateTimeSeconds": NOW - DAY, "oldRating": 1200, "newRating": 1250 },
        { "contestName": "missing fields" }
    ])
}

fn submissions_fixture() -> serde_json::Value {
    // saved as a full API envelope
    json!({
        "status": "OK",
        "result": [
            {
                "creationTimeSeconds": NOW - DAY,
                "verdict": "OK",
                "programmingLanguage": "GNU C++17",
                "problem": { "rating": 1500, "tags": ["dp", "math"] }
            },
            {
                "creationTimeSeconds": NOW - 2 * DAY,
                "verdict": "WRONG_ANSWER",
                "programmingLanguage": "GNU C++17",
                "problem": { "rating": 1700, "tags": ["graphs"] }
            },
            {
                "creationTimeSeconds": NOW - 10 * DAY,
                "verdict": "OK",
                "programmingLanguage": "Rust 2021",
                "problem": { "tags": ["math"] }
            }
        ]
    })
}

#[test]
fn test_analyze_offline() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("report.json");

    let args = AnalyzeArgs {
        handle: "tourist".to_string(),
        output_json: output.clone(),
        rating_file: Some(write_fixture(dir.path(), "rating.json", rating_fixture())),
        submissions_file: Some(write_fixture(
            dir.path(),
            "status.json",
            submissions_fixture(),
        )),
        now: Some(NOW),
        window_days: 30,
        ..Default::default()
    };

    validate_analyze_args(&args).unwrap();
    let report = execute_analyze(args).unwrap();

    assert_eq!(report.profile, None);
    assert_eq!(report.rating.contests, 3);
    assert_eq!(report.rating.weekly_delta, 150);
    assert_eq!(report.skipped_records, 1);
    assert_eq!(report.activity.heatmap.len(), 30);
    assert_eq!(report.activity.total_in_window(), 2);
    assert_eq!(report.histograms.top_tags[0].key, "math");
    assert_eq!(report.histograms.top_tags[0].count, 2);
    assert_eq!(report.histograms.languages.len(), 2);
    assert_eq!(report.histograms.weekly.solved, 1);
    assert_eq!(report.histograms.weekly.top_tag.as_deref(), Some("dp"));

    assert_eq!(read_report(&output).unwrap(), report);
}

#[test]
fn test_analyze_with_streak_payload() {
    let dir = tempdir().unwrap();

    let args = AnalyzeArgs {
        handle: "tourist".to_string(),
        output_json: dir.path().join("report.json"),
        rating_file: Some(write_fixture(dir.path(), "rating.json", json!([]))),
        submissions_file: Some(write_fixture(dir.path(), "status.json", json!([]))),
        streak_file: Some(write_fixture(
            dir.path(),
            "streak.json",
            json!({ "current_streak": 9, "max_streak": 40, "heatmap": {} }),
        )),
        now: Some(NOW),
        window_days: 14,
        ..Default::default()
    };

    let report = execute_analyze(args).unwrap();

    assert_eq!(report.activity.streak.current, 9);
    assert_eq!(report.activity.streak.longest, 40);
    assert_eq!(report.activity.heatmap.len(), 14);
    assert_eq!(report.rating.contests, 0);
    assert_eq!(report.rating.weekly_delta, 0);
}

#[test]
fn test_analyze_rejects_malformed_file() {
    let dir = tempdir().unwrap();

    let args = AnalyzeArgs {
        handle: "tourist".to_string(),
        output_json: dir.path().join("report.json"),
        rating_file: Some(write_fixture(dir.path(), "rating.json", json!({ "a": 1 }))),
        submissions_file: Some(write_fixture(dir.path(), "status.json", json!([]))),
        now: Some(NOW),
        ..Default::default()
    };

    assert!(execute_analyze(args).is_err());
}

#[test]
fn test_compare_offline() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("cmp").join("comparison.json");

    let args = CompareArgs {
        handle: "tourist".to_string(),
        peer: "Petr".to_string(),
        output_json: output.clone(),
        rating_file: Some(write_fixture(
            dir.path(),
            "own.json",
            json!([{ "ratingUpdateTimeSeconds": 1, "oldRating": 1400, "newRating": 1500 }]),
        )),
        peer_rating_file: Some(write_fixture(
            dir.path(),
            "peer.json",
            json!([{ "ratingUpdateTimeSeconds": 2, "oldRating": 1500, "newRating": 1600 }]),
        )),
        now: Some(NOW),
        ..Default::default()
    };

    validate_compare_args(&args).unwrap();
    let report = execute_compare(args).unwrap();

    assert_eq!(report.series.labels, vec![1, 2]);
    assert_eq!(report.series.series_a, vec![Some(1500), None]);
    assert_eq!(report.series.series_b, vec![None, Some(1600)]);
    assert_eq!(read_comparison(&output).unwrap(), report);
}
