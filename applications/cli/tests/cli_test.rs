//! End-to-end tests for the headless player commands

use serde_json::Value;
use smart_playback::RepeatMode;
use smart_player::{commands, library, CliConfig, CliError};
use std::collections::HashMap;
use std::io::Write;
use tokio::io::AsyncReadExt;

const LIBRARY: &str = r#"{
    "songs": [
        {"id": "s1", "title": "First", "artist": "A", "genre": "pop", "filePath": "/m/1.mp3", "duration": 200, "addedAt": 0},
        {"id": "s2", "title": "Second", "artist": "B", "genre": "rock", "filePath": "/m/2.mp3", "duration": 150, "addedAt": 0, "isFavorite": true},
        {"id": "s3", "title": "Third", "artist": "A", "genre": "pop", "filePath": "/m/3.mp3", "addedAt": 0, "playCount": 4}
    ]
}"#;

fn write_file(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn no_env() -> Option<HashMap<String, String>> {
    Some(HashMap::new())
}

#[test]
fn config_file_values_are_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        &dir,
        "smart-player.toml",
        r#"
library = "/music/library.json"

[playback]
volume = 0.4
repeat = "all"
smart_queue = false

[playback.weights]
favorite = 10.0

[sync]
push_interval_ms = 250
"#,
    );

    let config = CliConfig::load_with_env(Some(&path), no_env()).unwrap();

    assert_eq!(config.playback.volume, 0.4);
    assert_eq!(config.playback.repeat, RepeatMode::All);
    assert!(!config.playback.smart_queue);
    assert_eq!(config.playback.weights.favorite, 10.0);
    // Untouched weights keep their defaults
    assert_eq!(config.playback.weights.play_count, 5.0);
    assert_eq!(config.sync.push_interval_ms, 250);
    assert_eq!(config.sync.inbound_buffer, 32);
    assert_eq!(
        config.library.as_deref(),
        Some(std::path::Path::new("/music/library.json"))
    );
}

#[test]
fn environment_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "player.toml", "[playback]\nvolume = 0.4\n");

    let env = HashMap::from([
        ("SMART_PLAYBACK__VOLUME".to_string(), "0.9".to_string()),
        ("SMART_SYNC__INBOUND_BUFFER".to_string(), "8".to_string()),
    ]);
    let config = CliConfig::load_with_env(Some(&path), Some(env)).unwrap();

    assert!((config.playback.volume - 0.9).abs() < 1e-6);
    assert_eq!(config.sync.inbound_buffer, 8);
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    assert!(matches!(
        CliConfig::load_with_env(Some(&path), no_env()),
        Err(CliError::Config(_))
    ));
}

#[test]
fn invalid_values_are_rejected() {
    let dir = tempfile::tempdir().unwrap();

    let zero_buffer = write_file(&dir, "a.toml", "[sync]\ninbound_buffer = 0\n");
    assert!(CliConfig::load_with_env(Some(&zero_buffer), no_env()).is_err());

    let negative = write_file(
        &dir,
        "b.toml",
        "[playback]\nrestart_threshold_secs = -1.0\n",
    );
    assert!(CliConfig::load_with_env(Some(&negative), no_env()).is_err());

    let zero_floor = write_file(&dir, "c.toml", "[playback.weights]\nfloor = 0.0\n");
    assert!(CliConfig::load_with_env(Some(&zero_floor), no_env()).is_err());
}

#[test]
fn library_path_prefers_command_line() {
    let config = CliConfig {
        library: Some("/from/config.json".into()),
        ..CliConfig::default()
    };

    assert_eq!(
        config.library_path(Some("/from/cli.json".into())).unwrap(),
        std::path::PathBuf::from("/from/cli.json")
    );
    assert_eq!(
        config.library_path(None).unwrap(),
        std::path::PathBuf::from("/from/config.json")
    );
    assert!(CliConfig::default().library_path(None).is_err());
}

#[test]
fn library_loads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(&dir, "library.json", LIBRARY);

    let songs = library::load_library(&path).unwrap();
    assert_eq!(songs.len(), 3);
    assert!(songs[1].is_favorite);
    assert_eq!(songs[2].play_count, 4);

    let catalog = library::load_catalog(&path).unwrap();
    assert_eq!(catalog.len(), 3);

    assert!(library::load_library(&dir.path().join("missing.json")).is_err());
}

#[tokio::test]
async fn seeded_simulation_is_reproducible() {
    let songs = library::parse_library(LIBRARY).unwrap();
    let config = CliConfig::default();

    let first = commands::simulate(&config, songs.clone(), 12, Some(7))
        .await
        .unwrap();
    let second = commands::simulate(&config, songs, 12, Some(7))
        .await
        .unwrap();

    let ids = |r: &commands::SimulationReport| {
        r.steps.iter().map(|s| s.song_id.clone()).collect::<Vec<_>>()
    };
    assert_eq!(ids(&first), ids(&second));
    assert_eq!(first.steps.len(), 12);

    // Every step is one recorded play start on top of the library's counts
    let total: u32 = first.play_counts.iter().map(|(_, count)| count).sum();
    assert_eq!(total, 12 + 4);

    // Most played first
    assert!(first
        .play_counts
        .windows(2)
        .all(|pair| pair[0].1 >= pair[1].1));
}

#[tokio::test]
async fn smart_simulation_never_repeats_back_to_back() {
    let songs = library::parse_library(LIBRARY).unwrap();
    let report = commands::simulate(&CliConfig::default(), songs, 30, Some(42))
        .await
        .unwrap();

    // The playing entry is never a candidate and library IDs are unique
    assert!(report
        .steps
        .windows(2)
        .all(|pair| pair[0].song_id != pair[1].song_id));
}

#[tokio::test]
async fn linear_simulation_stops_at_end_of_queue() {
    let songs = library::parse_library(LIBRARY).unwrap();
    let mut config = CliConfig::default();
    config.playback.smart_queue = false;

    let report = commands::simulate(&config, songs, 10, None).await.unwrap();

    let indices: Vec<_> = report.steps.iter().map(|s| s.queue_index).collect();
    assert_eq!(indices, vec![Some(0), Some(1), Some(2)]);
    assert!(report
        .play_counts
        .iter()
        .any(|(id, count)| id.as_str() == "s1" && *count == 1));
}

#[test]
fn weights_report_favours_favorites() {
    let songs = library::parse_library(LIBRARY).unwrap();
    let report =
        commands::weights(&CliConfig::default(), &songs, Some("s1"), chrono::Utc::now()).unwrap();

    assert_eq!(report.candidates.len(), 2);
    let favorite = &report.candidates[0];
    assert_eq!(favorite.song_id.as_str(), "s2");
    assert_eq!(favorite.breakdown.favorite, 4.0);
    // s3 shares artist and genre with s1 and has the highest play count
    let related = &report.candidates[1];
    assert_eq!(related.breakdown.artist, 1.5);
    assert_eq!(related.breakdown.genre, 2.0);
    assert_eq!(related.breakdown.play_count, 5.0);
}

#[tokio::test]
async fn sync_session_answers_commands_and_state_requests() {
    let songs = library::parse_library(LIBRARY).unwrap();
    let input: &'static [u8] = b"not json\n\
{\"event\":\"player-command\",\"payload\":{\"command\":\"setVolume\",\"data\":0.3}}\n\
{\"event\":\"request-player-state\"}\n";
    let (output, mut peer) = tokio::io::duplex(64 * 1024);

    commands::sync(&CliConfig::default(), songs, input, output)
        .await
        .unwrap();

    let mut written = String::new();
    peer.read_to_string(&mut written).await.unwrap();
    let lines: Vec<Value> = written
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert!(!lines.is_empty());
    assert!(lines.iter().all(|l| l["event"] == "player-state-sync"));

    let last = &lines[lines.len() - 1]["payload"];
    assert!((last["volume"].as_f64().unwrap() - 0.3).abs() < 1e-6);
    assert_eq!(last["currentSong"]["id"], "s1");
    assert_eq!(last["isPlaying"], false);
}
