//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify its JSON output.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Run a CLI command against `data_dir` and return (stdout, stderr, code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_brewroom"))
        .args(args)
        .env("BREWROOM_DATA_DIR", data_dir)
        .env_remove("BREWROOM_LOG")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).expect("Failed to parse JSON output")
}

#[test]
fn test_collection_list_starts_empty() {
    let dir = TempDir::new().unwrap();
    let list = run_json(dir.path(), &["collection", "list"]);
    let stickers = list.as_array().unwrap();
    assert_eq!(stickers.len(), 20);
    assert!(stickers.iter().all(|s| s["is_collected"] == false));
    assert_eq!(stickers[0]["image"], "sticker-0");
    assert_eq!(stickers[10]["is_premium"], true);

    let collected = run_json(dir.path(), &["collection", "list", "--collected"]);
    assert!(collected.as_array().unwrap().is_empty());
}

#[test]
fn test_collection_draw_persists() {
    let dir = TempDir::new().unwrap();
    let drawn = run_json(dir.path(), &["collection", "draw"]);
    assert_eq!(drawn["is_premium"], false);

    let progress = run_json(dir.path(), &["collection", "progress"]);
    assert_eq!(progress["collected"], 1);
    assert_eq!(progress["catalog_size"], 20);

    let (_, _, code) = run_cli(dir.path(), &["collection", "reset"]);
    assert_eq!(code, 0);
    let progress = run_json(dir.path(), &["collection", "progress"]);
    assert_eq!(progress["collected"], 0);
}

#[test]
fn test_free_stickers_run_out_without_premium() {
    let dir = TempDir::new().unwrap();
    for _ in 0..10 {
        let drawn = run_json(dir.path(), &["collection", "draw"]);
        assert_eq!(drawn["is_premium"], false);
    }
    let exhausted = run_json(dir.path(), &["collection", "draw"]);
    assert!(exhausted.is_null());

    let (_, _, code) = run_cli(dir.path(), &["premium", "purchase"]);
    assert_eq!(code, 0);
    let drawn = run_json(dir.path(), &["collection", "draw"]);
    assert_eq!(drawn["is_premium"], true);
}

#[test]
fn test_premium_status_and_revoke() {
    let dir = TempDir::new().unwrap();
    let status = run_json(dir.path(), &["premium", "status"]);
    assert_eq!(status["unlocked"], false);

    run_cli(dir.path(), &["premium", "unlock"]);
    assert_eq!(run_json(dir.path(), &["premium", "status"])["unlocked"], true);

    run_cli(dir.path(), &["premium", "revoke"]);
    assert_eq!(run_json(dir.path(), &["premium", "status"])["unlocked"], false);
}

#[test]
fn test_premium_purchase_unknown_product_fails() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["premium", "purchase", "com.example.other"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("unknown product"));
}

#[test]
fn test_session_stages() {
    let dir = TempDir::new().unwrap();
    let stages = run_json(dir.path(), &["session", "stages", "--minutes", "25"]);
    let rows = stages.as_array().unwrap();
    assert_eq!(rows.len(), 4);
    assert_eq!(rows[0]["stage"], "grinding");
    assert_eq!(rows[0]["clock"], "25:00");
    assert_eq!(rows[1]["starts_at_secs"], 375);
    assert_eq!(rows[3]["animation"], "coffee-filtering");
}

#[test]
fn test_session_zero_duration_rejected() {
    let dir = TempDir::new().unwrap();
    let (_, _, code) = run_cli(dir.path(), &["session", "run", "--minutes", "0"]);
    assert_eq!(code, 1);
}

#[test]
fn test_session_run_completes_and_unlocks() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) =
        run_cli(dir.path(), &["session", "run", "--minutes", "0", "--seconds", "2"]);
    assert_eq!(code, 0, "session run failed: {stderr}");

    let events: Vec<serde_json::Value> = stdout
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(events.first().unwrap()["type"], "SessionStarted");
    let completed = events
        .iter()
        .find(|e| e["type"] == "SessionCompleted")
        .expect("session should complete");
    assert_eq!(completed["duration_secs"], 2);
    assert!(completed["drawn_item"].is_object());
    assert_eq!(events.last().unwrap()["type"], "StateSnapshot");
    assert_eq!(events.last().unwrap()["status"], "completed");

    let progress = run_json(dir.path(), &["collection", "progress"]);
    assert_eq!(progress["collected"], 1);
}

#[test]
fn test_music_list_reports_missing_assets() {
    let dir = TempDir::new().unwrap();
    let tracks = run_json(dir.path(), &["music", "list"]);
    let tracks = tracks.as_array().unwrap();
    assert_eq!(tracks.len(), 10);
    assert_eq!(tracks[0]["filename"], "jazz1");
    assert!(tracks.iter().all(|t| t["available"] == false));

    let (_, stderr, code) = run_cli(dir.path(), &["music", "locate", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("jazz1.mp3"));
}

#[test]
fn test_music_locate_installed_track() {
    let dir = TempDir::new().unwrap();
    let music = dir.path().join("music");
    std::fs::create_dir_all(&music).unwrap();
    std::fs::write(music.join("jazz3.mp3"), b"ID3").unwrap();

    let (stdout, _, code) = run_cli(dir.path(), &["music", "locate", "2"]);
    assert_eq!(code, 0);
    assert!(stdout.trim().ends_with("jazz3.mp3"));
}

#[test]
fn test_config_get_set_list() {
    let dir = TempDir::new().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "session.minutes"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "25");

    let stored = run_json(dir.path(), &["config", "set", "playback.selected_track", "3"]);
    assert_eq!(stored["key"], "playback.selected_track");
    assert!(stored["previous"].is_null());
    assert_eq!(stored["value"], 3);

    let cleared = run_json(dir.path(), &["config", "set", "playback.selected_track", "none"]);
    assert_eq!(cleared["previous"], 3);
    assert!(cleared["value"].is_null());

    let listing = run_json(dir.path(), &["config", "list"]);
    let path = listing["path"].as_str().unwrap();
    assert!(path.ends_with("config.toml"));
    assert!(Path::new(path).starts_with(dir.path()));
    assert_eq!(listing["session_secs"], 1500);
    assert!(listing["config"]["playback"]["selected_track"].is_null());
}

#[test]
fn test_config_unknown_key_fails() {
    let dir = TempDir::new().unwrap();
    let (stdout, stderr, code) = run_cli(dir.path(), &["config", "get", "no.such.key"]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("no.such.key"), "{stderr}");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "no.such.key", "1"]);
    assert_eq!(code, 1);
}

#[test]
fn test_config_rejects_zero_session_length() {
    let dir = TempDir::new().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["config", "set", "session.minutes", "0"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("session.minutes"), "{stderr}");
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "session.minutes"]);
    assert_eq!(stdout.trim(), "25");
}
