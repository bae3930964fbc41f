// Functional tests for the skillstack binary
// These run the built binary against temporary event files; no backend is needed

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::str;
use tempfile::TempDir;

const EXAMPLE_EVENTS: &str = r#"[
    {"id": 1, "date": "2024-01-10", "title": "Scales", "duration_minutes": 20},
    {"id": 2, "date": "2024-01-10", "title": "Arpeggios", "duration_minutes": 15, "notes": "slow tempo"},
    {"id": 3, "date": "2024-01-12", "title": "Sight reading"},
    {"id": 4, "date": null, "title": "Someday"}
]"#;

// Run the binary with config and locale isolated from the developer's machine
fn run_skillstack(home: &Path, args: &[&str]) -> Output {
    run_skillstack_with_env(home, &[], args)
}

fn run_skillstack_with_env(home: &Path, envs: &[(&str, &str)], args: &[&str]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_skillstack"));
    command
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join("config"))
        .env("XDG_DATA_HOME", home.join("data"))
        .env("LC_ALL", "C")
        .env_remove("LC_TIME")
        .env_remove("LANG")
        .env_remove("SKILLSTACK_API_URL")
        .env_remove("RUST_LOG");
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().expect("Failed to execute skillstack binary")
}

// Where the binary looks for its config under the isolated home
fn config_file(home: &Path) -> PathBuf {
    home.join("config").join("skillstack").join("config.json")
}

fn write_config(home: &Path, contents: &str) {
    let path = config_file(home);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn stdout_of(output: &Output) -> String {
    str::from_utf8(&output.stdout)
        .expect("stdout is not UTF-8")
        .to_string()
}

fn stderr_of(output: &Output) -> String {
    str::from_utf8(&output.stderr)
        .expect("stderr is not UTF-8")
        .to_string()
}

fn write_events(dir: &TempDir, contents: &str) -> String {
    let path = dir.path().join("events.json");
    fs::write(&path, contents).expect("Failed to write events file");
    path.to_string_lossy().to_string()
}

#[test]
fn test_help() {
    let home = TempDir::new().unwrap();
    let output = run_skillstack(home.path(), &["--help"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("activity"));
    assert!(stdout.contains("dashboard"));
}

#[test]
fn test_version_includes_build_date() {
    let home = TempDir::new().unwrap();
    let output = run_skillstack(home.path(), &["--version"]);
    assert!(output.status.success());
    assert!(stdout_of(&output).contains("built"));
}

#[test]
fn test_activity_text_from_file() {
    let home = TempDir::new().unwrap();
    let input = write_events(&home, EXAMPLE_EVENTS);

    let output = run_skillstack(
        home.path(),
        &["activity", "--input", &input, "--date", "2024-01-12"],
    );
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert!(lines[0].starts_with("Activity (last 7 days)"));
    assert!(lines[0].ends_with("3 activities"));
    assert!(lines[1].contains("3 total  Max/day: 2"));

    // Seven day rows, oldest first; 2024-01-10 was a Wednesday
    let rows = &lines[3..10];
    assert!(rows[0].starts_with("Sat"));
    assert!(rows[4].starts_with("Wed   10"));
    assert!(rows[4].ends_with("  2"));
    assert!(rows[6].starts_with("Fri   12"));
    assert!(rows[6].ends_with("  1"));
    assert!(!stdout.contains("No recent activity"));
}

#[test]
fn test_activity_alternate_date_formats() {
    let home = TempDir::new().unwrap();
    let input = write_events(&home, EXAMPLE_EVENTS);

    for date in ["2024.01.12", "2024/01/12"] {
        let output = run_skillstack(home.path(), &["activity", "--input", &input, "--date", date]);
        assert!(output.status.success(), "date {} failed", date);
        assert!(stdout_of(&output).contains("3 activities"));
    }
}

#[test]
fn test_activity_json_from_file() {
    let home = TempDir::new().unwrap();
    let input = write_events(&home, EXAMPLE_EVENTS);

    let output = run_skillstack(
        home.path(),
        &["activity", "-i", &input, "-D", "2024-01-12", "--format", "json"],
    );
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let summary: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(summary["today"], "2024-01-12");
    assert_eq!(summary["total"], 3);
    assert_eq!(summary["max_count"], 2);

    let days = summary["days"].as_array().unwrap();
    assert_eq!(days.len(), 7);
    assert_eq!(days[0]["iso_date"], "2024-01-06");
    assert_eq!(days[4]["bar_percent"], 100);
    assert_eq!(days[6]["bar_percent"], 50);
    assert_eq!(summary["sparkline"]["points"].as_array().unwrap().len(), 7);
}

#[test]
fn test_activity_svg_from_file() {
    let home = TempDir::new().unwrap();
    let input = write_events(&home, EXAMPLE_EVENTS);

    let output = run_skillstack(
        home.path(),
        &["activity", "--input", &input, "--date", "2024-01-12", "--format", "svg"],
    );
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let svg = stdout_of(&output);
    assert!(svg.trim_start().starts_with("<svg"));
    assert!(svg.trim_end().ends_with("</svg>"));
    assert!(svg.contains("3 activities"));
    assert!(svg.contains("<polyline"));
}

#[test]
fn test_activity_empty_window() {
    let home = TempDir::new().unwrap();
    let input = write_events(&home, "[]");

    let output = run_skillstack(home.path(), &["activity", "--input", &input, "--date", "2024-01-12"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    assert!(stdout.contains("0 activities"));
    assert!(stdout.contains("Max/day: 1"));
    assert!(stdout.contains("No recent activity"));
}

#[test]
fn test_activity_rejects_bad_date() {
    let home = TempDir::new().unwrap();
    let input = write_events(&home, EXAMPLE_EVENTS);

    let output = run_skillstack(home.path(), &["activity", "--input", &input, "--date", "12/01/2024"]);
    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Error:"));
}

#[test]
fn test_activity_missing_input_file() {
    let home = TempDir::new().unwrap();
    let missing = home.path().join("nope.json");

    let output = run_skillstack(
        home.path(),
        &["activity", "--input", &missing.to_string_lossy()],
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_timeline_from_file() {
    let home = TempDir::new().unwrap();
    let input = write_events(&home, EXAMPLE_EVENTS);

    let output = run_skillstack(home.path(), &["timeline", "--input", &input]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let stdout = stdout_of(&output);
    let newest = stdout.find("2024-01-12").unwrap();
    let older = stdout.find("2024-01-10").unwrap();
    let undated = stdout.find("undated").unwrap();
    assert!(newest < older && older < undated);

    assert!(stdout.contains("2024-01-10  (35 min)"));
    assert!(stdout.contains("  - Scales (20 min)"));
    assert!(stdout.contains("slow tempo"));
}

#[test]
fn test_config_shows_defaults() {
    let home = TempDir::new().unwrap();

    let output = run_skillstack(home.path(), &["config"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("http://localhost:8000"));
    assert!(stdout.contains("\"padding\": 4.0"));
}

#[test]
fn test_rejects_invalid_api_url_for_backend_commands() {
    let home = TempDir::new().unwrap();

    let output = run_skillstack(home.path(), &["--api-url", "localhost:8000", "events", "list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Invalid API URL: localhost:8000"));
}

#[test]
fn test_env_url_checked_when_used() {
    let home = TempDir::new().unwrap();

    let output = run_skillstack_with_env(
        home.path(),
        &[("SKILLSTACK_API_URL", "localhost:9000")],
        &["skills", "list"],
    );
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Invalid API URL: localhost:9000"));
}

#[test]
fn test_cli_url_overrides_bad_env_url() {
    let home = TempDir::new().unwrap();
    let input = write_events(&home, EXAMPLE_EVENTS);

    let output = run_skillstack_with_env(
        home.path(),
        &[("SKILLSTACK_API_URL", "localhost:9000")],
        &["--api-url", "http://localhost:8000", "activity", "--input", &input, "--date", "2024-01-12"],
    );
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).contains("3 activities"));
}

#[test]
fn test_offline_commands_ignore_bad_stored_url() {
    let home = TempDir::new().unwrap();
    write_config(home.path(), r#"{"api_url": "localhost:8000"}"#);
    let input = write_events(&home, EXAMPLE_EVENTS);

    let output = run_skillstack(home.path(), &["activity", "--input", &input, "--date", "2024-01-12"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let output = run_skillstack(home.path(), &["timeline", "--input", &input]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
}

#[test]
fn test_config_repairs_bad_stored_url() {
    let home = TempDir::new().unwrap();
    write_config(home.path(), r#"{"api_url": "localhost:8000", "locale": "de_DE"}"#);

    let output = run_skillstack(home.path(), &["config", "--api-url", "http://localhost:8000"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config_file(home.path())).unwrap()).unwrap();
    assert_eq!(saved["api_url"], "http://localhost:8000");
    assert_eq!(saved["locale"], "de_DE");
}

#[test]
fn test_config_does_not_persist_env_url() {
    let home = TempDir::new().unwrap();

    let output = run_skillstack_with_env(
        home.path(),
        &[("SKILLSTACK_API_URL", "http://10.0.0.9:8000")],
        &["config", "--locale", "fr_FR"],
    );
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let saved: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(config_file(home.path())).unwrap()).unwrap();
    assert_eq!(saved["api_url"], "http://localhost:8000");
    assert_eq!(saved["locale"], "fr_FR");
}

#[test]
fn test_activity_sparkline_svg() {
    let home = TempDir::new().unwrap();
    let input = write_events(&home, EXAMPLE_EVENTS);

    let output = run_skillstack(
        home.path(),
        &["activity", "--input", &input, "--date", "2024-01-12", "--format", "sparkline-svg"],
    );
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let svg = stdout_of(&output);
    assert!(svg.contains(r#"viewBox="0 0 140 36""#));
    assert_eq!(svg.matches("<circle").count(), 7);
    assert!(!svg.contains("activities"));
}

#[test]
fn test_unreachable_backend_reports_error() {
    let home = TempDir::new().unwrap();

    // Nothing listens on the discard port
    let output = run_skillstack(home.path(), &["--api-url", "http://127.0.0.1:9", "events", "list"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("Error:"));
}
