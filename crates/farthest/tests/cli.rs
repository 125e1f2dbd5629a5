//! End-to-end CLI integration tests
//!
//! These tests invoke the compiled binary as a subprocess to verify
//! that the CLI behaves correctly from a user's perspective.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Returns a Command configured to run our binary.
///
/// Note: `cargo_bin` is marked deprecated for edge cases involving custom
/// cargo build directories, but works correctly for standard project layouts.
#[allow(deprecated)]
fn cmd() -> Command {
    Command::cargo_bin(env!("CARGO_PKG_NAME")).unwrap()
}

/// 2020-01-01T00:00:00Z
const JAN_1: i64 = 1_577_836_800_000;
/// 2020-01-02T00:00:00Z
const JAN_2: i64 = 1_577_923_200_000;
const HOUR_MS: i64 = 3_600_000;

/// Latitude offset, in E7 units, of a point 1 km north of the equator at R = 6378100 m.
const ONE_KM_NORTH_E7: i64 = 89_832;

/// Write a location history with the given `(timestamp_ms, lat_e7, lon_e7)` records.
fn write_history(dir: &Path, records: &[(i64, i64, i64)]) -> PathBuf {
    let locations: Vec<Value> = records
        .iter()
        .map(|&(ts, lat, lon)| {
            serde_json::json!({
                "timestampMs": ts.to_string(),
                "latitudeE7": lat,
                "longitudeE7": lon,
            })
        })
        .collect();
    let path = dir.join("history.json");
    fs::write(
        &path,
        serde_json::to_string(&serde_json::json!({ "locations": locations })).unwrap(),
    )
    .unwrap();
    path
}

/// Parse `day\tmeters` lines.
fn parse_rows(stdout: &[u8]) -> Vec<(String, f64)> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(|line| {
            let (day, meters) = line.split_once('\t').expect("tab-separated row");
            (day.to_string(), meters.parse().expect("numeric distance"))
        })
        .collect()
}

// =============================================================================
// Help & Version
// =============================================================================

#[test]
fn help_flag_shows_usage() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage:"))
        .stdout(predicate::str::contains("Commands:"))
        .stdout(predicate::str::contains("distance"))
        .stdout(predicate::str::contains("rank"));
}

#[test]
fn version_flag_shows_version() {
    cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn version_only_prints_bare_version() {
    cmd()
        .arg("--version-only")
        .assert()
        .success()
        .stdout(predicate::str::diff(format!(
            "{}\n",
            env!("CARGO_PKG_VERSION")
        )));
}

#[test]
fn no_arguments_shows_help() {
    cmd()
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage:"));
}

#[test]
fn unknown_subcommand_fails() {
    cmd()
        .arg("nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error:"));
}

// =============================================================================
// Info Command
// =============================================================================

#[test]
fn info_shows_package_name_and_version() {
    let tmp = TempDir::new().unwrap();
    cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_NAME")))
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn info_json_reports_defaults() {
    let tmp = TempDir::new().unwrap();
    let output = cmd()
        .args(["-C", tmp.path().to_str().unwrap(), "--json", "info"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["name"], env!("CARGO_PKG_NAME"));
    assert_eq!(json["config"]["formula"], "cosine");
    assert_eq!(json["config"]["sort"], "day");
    assert_eq!(json["config"]["format"], "tsv");
    assert!(json["config"]["home"].is_null());
}

// =============================================================================
// Distance Command
// =============================================================================

#[test]
fn one_km_north_on_new_years_day() {
    let tmp = TempDir::new().unwrap();
    let history = write_history(
        tmp.path(),
        &[(JAN_1, 0, 0), (JAN_1 + 12 * HOUR_MS, ONE_KM_NORTH_E7, 0)],
    );

    let output = cmd()
        .args(["distance", "-f", history.to_str().unwrap()])
        .args(["-s", "2020-01-01", "-e", "2020-01-02", "-l", "0", "-u", "0"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let rows = parse_rows(&output.stdout);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, "2020-01-01");
    assert!((rows[0].1 - 1000.0).abs() < 0.05, "got {}", rows[0].1);
}

#[test]
fn end_date_is_exclusive() {
    let tmp = TempDir::new().unwrap();
    let history = write_history(
        tmp.path(),
        &[(JAN_1, ONE_KM_NORTH_E7, 0), (JAN_2, ONE_KM_NORTH_E7, 0)],
    );

    let output = cmd()
        .args(["distance", "-f", history.to_str().unwrap()])
        .args(["-s", "2020-01-01", "-e", "2020-01-02", "-l", "0", "-u", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let days: Vec<String> = parse_rows(&output.stdout).into_iter().map(|r| r.0).collect();
    assert_eq!(days, vec!["2020-01-01"]);
}

#[test]
fn keeps_daily_maximum_and_sorts_by_day() {
    let tmp = TempDir::new().unwrap();
    let history = write_history(
        tmp.path(),
        &[
            (JAN_2 + HOUR_MS, ONE_KM_NORTH_E7, 0),
            (JAN_1 + HOUR_MS, ONE_KM_NORTH_E7, 0),
            (JAN_1 + 2 * HOUR_MS, 3 * ONE_KM_NORTH_E7, 0),
            (JAN_1 + 3 * HOUR_MS, 0, 0),
        ],
    );

    let output = cmd()
        .args(["distance", "-f", history.to_str().unwrap()])
        .args(["-s", "2020-01-01", "-e", "2020-01-03", "-l", "0", "-u", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows = parse_rows(&output.stdout);
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].0, "2020-01-01");
    assert!((rows[0].1 - 3000.0).abs() < 0.1, "got {}", rows[0].1);
    assert_eq!(rows[1].0, "2020-01-02");
    assert!((rows[1].1 - 1000.0).abs() < 0.05, "got {}", rows[1].1);
}

#[test]
fn by_distance_sorts_ascending() {
    let tmp = TempDir::new().unwrap();
    let history = write_history(
        tmp.path(),
        &[(JAN_1, 3 * ONE_KM_NORTH_E7, 0), (JAN_2, ONE_KM_NORTH_E7, 0)],
    );

    let output = cmd()
        .args(["distance", "-f", history.to_str().unwrap(), "--by-distance"])
        .args(["-s", "2020-01-01", "-e", "2020-01-03", "-l", "0", "-u", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let days: Vec<String> = parse_rows(&output.stdout).into_iter().map(|r| r.0).collect();
    assert_eq!(days, vec!["2020-01-02", "2020-01-01"]);
}

#[test]
fn array_format_prints_json_pairs() {
    let tmp = TempDir::new().unwrap();
    let history = write_history(tmp.path(), &[(JAN_1, ONE_KM_NORTH_E7, 0)]);

    let output = cmd()
        .args(["distance", "-f", history.to_str().unwrap(), "--format", "array"])
        .args(["-s", "2020-01-01", "-e", "2020-01-02", "-l", "0", "-u", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0][0], "2020-01-01");
    assert!(rows[0][1].as_f64().is_some());
}

#[test]
fn json_report_includes_counts() {
    let tmp = TempDir::new().unwrap();
    let history = write_history(
        tmp.path(),
        &[(JAN_1, ONE_KM_NORTH_E7, 0), (JAN_2, ONE_KM_NORTH_E7, 0)],
    );

    let output = cmd()
        .args(["--json", "distance", "-f", history.to_str().unwrap()])
        .args(["-s", "2020-01-01", "-e", "2020-01-02", "-l", "0", "-u", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["start"], "2020-01-01");
    assert_eq!(json["end"], "2020-01-02");
    assert_eq!(json["samples"], 2);
    assert_eq!(json["in_range"], 1);
    assert_eq!(json["days"].as_array().unwrap().len(), 1);
    assert_eq!(json["days"][0]["day"], "2020-01-01");
}

#[test]
fn empty_range_prints_nothing() {
    let tmp = TempDir::new().unwrap();
    let history = write_history(tmp.path(), &[(JAN_1, ONE_KM_NORTH_E7, 0)]);

    cmd()
        .args(["distance", "-f", history.to_str().unwrap()])
        .args(["-s", "2021-01-01", "-e", "2021-02-01", "-l", "0", "-u", "0"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn writes_table_to_output_file() {
    let tmp = TempDir::new().unwrap();
    let history = write_history(tmp.path(), &[(JAN_1, ONE_KM_NORTH_E7, 0)]);
    let out = tmp.path().join("days.tsv");

    cmd()
        .args(["distance", "-f", history.to_str().unwrap()])
        .args(["-o", out.to_str().unwrap()])
        .args(["-s", "2020-01-01", "-e", "2020-01-02", "-l", "0", "-u", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 days written"));

    let written = fs::read(&out).unwrap();
    let rows = parse_rows(&written);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, "2020-01-01");
}

#[test]
fn missing_output_directory_falls_back_to_stdout() {
    let tmp = TempDir::new().unwrap();
    let history = write_history(tmp.path(), &[(JAN_1, ONE_KM_NORTH_E7, 0)]);
    let out = tmp.path().join("missing").join("days.tsv");

    let output = cmd()
        .args(["distance", "-f", history.to_str().unwrap()])
        .args(["-o", out.to_str().unwrap()])
        .args(["-s", "2020-01-01", "-e", "2020-01-02", "-l", "0", "-u", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("warning:"));
    assert_eq!(parse_rows(&output.stdout).len(), 1);
    assert!(!out.exists());
}

#[test]
fn output_path_that_is_a_directory_falls_back_to_stdout() {
    let tmp = TempDir::new().unwrap();
    let history = write_history(tmp.path(), &[(JAN_1, ONE_KM_NORTH_E7, 0)]);
    let out_dir = tmp.path().join("reports");
    fs::create_dir(&out_dir).unwrap();

    let output = cmd()
        .args(["distance", "-f", history.to_str().unwrap()])
        .args(["-o", out_dir.to_str().unwrap()])
        .args(["-s", "2020-01-01", "-e", "2020-01-02", "-l", "0", "-u", "0"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(String::from_utf8_lossy(&output.stderr).contains("is a directory"));
    assert_eq!(parse_rows(&output.stdout).len(), 1);
}

#[test]
fn piped_warning_has_no_color_codes() {
    let tmp = TempDir::new().unwrap();
    let history = write_history(tmp.path(), &[(JAN_1, ONE_KM_NORTH_E7, 0)]);
    let out = tmp.path().join("missing").join("days.tsv");

    let output = cmd()
        .env_remove("FORCE_COLOR")
        .env_remove("CLICOLOR_FORCE")
        .args(["distance", "-f", history.to_str().unwrap()])
        .args(["-o", out.to_str().unwrap()])
        .args(["-s", "2020-01-01", "-e", "2020-01-02", "-l", "0", "-u", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("warning:"));
    assert!(!stderr.contains('\u{1b}'), "unexpected escape codes: {stderr:?}");
}

#[test]
fn default_end_counts_samples_taken_today() {
    let tmp = TempDir::new().unwrap();
    let a_second_ago = chrono::Utc::now().timestamp_millis() - 1_000;
    let history = write_history(tmp.path(), &[(a_second_ago, ONE_KM_NORTH_E7, 0)]);

    let output = cmd()
        .args(["distance", "-f", history.to_str().unwrap()])
        .args(["-l", "0", "-u", "0"])
        .output()
        .unwrap();
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let day = chrono::DateTime::from_timestamp_millis(a_second_ago)
        .unwrap()
        .date_naive()
        .to_string();
    let rows = parse_rows(&output.stdout);
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, day);
}

#[test]
fn missing_history_file_fails() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.json");

    cmd()
        .args(["distance", "-f", missing.to_str().unwrap(), "-l", "0", "-u", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("location history"));
}

#[test]
fn history_without_locations_fails() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("history.json");
    fs::write(&path, r#"{"timelineObjects": []}"#).unwrap();

    cmd()
        .args(["distance", "-f", path.to_str().unwrap(), "-l", "0", "-u", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn missing_home_fails() {
    let tmp = TempDir::new().unwrap();
    let history = write_history(tmp.path(), &[(JAN_1, ONE_KM_NORTH_E7, 0)]);

    cmd()
        .args(["-C", tmp.path().to_str().unwrap()])
        .args(["distance", "-f", history.to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no home coordinate"));
}

#[test]
fn inverted_range_fails() {
    let tmp = TempDir::new().unwrap();
    let history = write_history(tmp.path(), &[(JAN_1, ONE_KM_NORTH_E7, 0)]);

    cmd()
        .args(["distance", "-f", history.to_str().unwrap()])
        .args(["-s", "2020-02-01", "-e", "2020-01-01", "-l", "0", "-u", "0"])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());
}

#[test]
fn negative_coordinates_are_accepted() {
    let tmp = TempDir::new().unwrap();
    let history = write_history(tmp.path(), &[(JAN_1, -ONE_KM_NORTH_E7, 0)]);

    let output = cmd()
        .args(["distance", "-f", history.to_str().unwrap()])
        .args(["-s", "2020-01-01", "-e", "2020-01-02"])
        .args(["-l", "-0.0", "-u", "-0.0"])
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(parse_rows(&output.stdout).len(), 1);
}

// =============================================================================
// Rank Command
// =============================================================================

fn write_definitions(dir: &Path) -> PathBuf {
    let path = dir.join("definitions.json");
    fs::write(
        &path,
        r#"{
            "naw": {"list": [{"definition": "No way", "thumbs_up": 50, "thumbs_down": 0}]},
            "son": {"list": [{"definition": "homie!", "thumbs_up": 30, "thumbs_down": 10}]}
        }"#,
    )
    .unwrap();
    path
}

#[test]
fn rank_prints_words_lowest_first() {
    let tmp = TempDir::new().unwrap();
    let definitions = write_definitions(tmp.path());

    cmd()
        .args(["rank", "naw", "son", "--no-stop-words"])
        .args(["-d", definitions.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::diff(
            "homie : 0.2\nno : 0.25\nway : 0.25\n",
        ));
}

#[test]
fn rank_json_report() {
    let tmp = TempDir::new().unwrap();
    let definitions = write_definitions(tmp.path());

    let output = cmd()
        .args(["--json", "rank", "naw son", "--no-stop-words"])
        .args(["-d", definitions.to_str().unwrap()])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["phrase"], "naw son");
    let words = json["words"].as_array().unwrap();
    assert_eq!(words.len(), 3);
    assert_eq!(words[0]["word"], "homie");
}

#[test]
fn rank_stop_words_file_filters_words() {
    let tmp = TempDir::new().unwrap();
    let definitions = write_definitions(tmp.path());
    let stop_words = tmp.path().join("stop.txt");
    fs::write(&stop_words, "way\n").unwrap();

    cmd()
        .args(["rank", "naw", "son"])
        .args(["-d", definitions.to_str().unwrap()])
        .args(["--stop-words", stop_words.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("way").not())
        .stdout(predicate::str::contains("homie : 0.2"));
}

#[test]
fn rank_unknown_phrase_skips() {
    let tmp = TempDir::new().unwrap();
    let definitions = write_definitions(tmp.path());

    cmd()
        .args(["rank", "qwzx"])
        .args(["-d", definitions.to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("no definitions found"));
}

#[test]
fn rank_missing_definitions_file_fails() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("nope.json");

    cmd()
        .args(["rank", "naw", "-d", missing.to_str().unwrap()])
        .assert()
        .failure();
}
