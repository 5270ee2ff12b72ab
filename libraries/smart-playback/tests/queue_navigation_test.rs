//! Queue navigation integration tests
//!
//! Next/previous behavior across repeat, shuffle and smart-queue modes,
//! driven through the public store API the way the UI drives it.

use smart_core::{Song, SongId};
use smart_playback::{PlaybackConfig, PlayerEvent, PlayerStore, RepeatMode};

// ===== Test Helpers =====

fn create_song(id: &str) -> Song {
    Song {
        id: SongId::new(id),
        ..Song::new(format!("Song {id}"), "Artist", format!("/music/{id}.mp3"))
    }
}

fn library(count: usize) -> Vec<Song> {
    (0..count).map(|i| create_song(&i.to_string())).collect()
}

fn linear_store() -> PlayerStore {
    PlayerStore::new(PlaybackConfig {
        smart_queue: false,
        ..PlaybackConfig::default()
    })
}

fn current_id(store: &PlayerStore) -> String {
    store
        .current_song()
        .map(|s| s.id.to_string())
        .unwrap_or_default()
}

// ===== Linear Mode =====

#[test]
fn test_next_walks_queue_in_order() {
    let mut store = linear_store();
    store.play_queue(library(3), 0);

    store.next_song();
    assert_eq!(store.queue_index(), Some(1));
    assert_eq!(current_id(&store), "1");

    store.next_song();
    assert_eq!(store.queue_index(), Some(2));
    assert_eq!(current_id(&store), "2");
}

#[test]
fn test_end_of_queue_stops_and_parks_cursor() {
    let mut store = linear_store();
    store.play_queue(library(4), 3);
    store.set_progress(100.0);
    assert!(store.is_playing());

    store.next_song();

    assert_eq!(store.queue_index(), Some(0));
    assert_eq!(current_id(&store), "0");
    assert_eq!(store.progress(), 0.0);
    assert!(!store.is_playing());
}

#[test]
fn test_repeat_all_wraps_and_keeps_playing() {
    let mut store = linear_store();
    store.set_repeat(RepeatMode::All);
    store.play_queue(library(4), 3);

    store.next_song();
    assert_eq!(store.queue_index(), Some(0));
    assert_eq!(current_id(&store), "0");
    assert!(store.is_playing());

    // Paused stays paused
    store.set_playing(false);
    store.play_queue(library(4), 3);
    store.set_playing(false);
    store.next_song();
    assert_eq!(store.queue_index(), Some(0));
    assert!(!store.is_playing());
}

#[test]
fn test_repeat_one_never_moves_cursor() {
    let mut store = linear_store();
    store.set_repeat(RepeatMode::One);
    store.play_queue(library(3), 1);
    store.drain_events();

    for _ in 0..5 {
        store.set_progress(42.0);
        store.next_song();
        assert_eq!(store.queue_index(), Some(1));
        assert_eq!(current_id(&store), "1");
        assert_eq!(store.progress(), 0.0);
    }

    let events = store.drain_events();
    assert_eq!(events.len(), 5);
    assert!(events
        .iter()
        .all(|e| matches!(e, PlayerEvent::Restarted { song_id } if song_id.as_str() == "1")));
}

#[test]
fn test_repeat_one_ignores_smart_queue() {
    let mut store = PlayerStore::default();
    store.set_repeat(RepeatMode::One);
    store.play_queue(library(5), 2);

    store.next_song();
    assert_eq!(store.queue_index(), Some(2));
}

// ===== Previous =====

#[test]
fn test_prev_past_threshold_restarts() {
    let mut store = linear_store();
    store.play_queue(library(3), 2);
    store.set_progress(3.5);

    store.prev_song();

    assert_eq!(store.queue_index(), Some(2));
    assert_eq!(current_id(&store), "2");
    assert_eq!(store.progress(), 0.0);
}

#[test]
fn test_prev_before_threshold_moves_back() {
    let mut store = linear_store();
    store.play_queue(library(3), 2);
    store.set_progress(2.9);

    store.prev_song();

    assert_eq!(store.queue_index(), Some(1));
    assert_eq!(current_id(&store), "1");
    assert_eq!(store.progress(), 0.0);
}

#[test]
fn test_prev_at_start_wraps_to_last() {
    let mut store = linear_store();
    store.play_queue(library(3), 0);
    store.set_progress(2.9);

    store.prev_song();

    assert_eq!(store.queue_index(), Some(2));
    assert_eq!(current_id(&store), "2");
}

#[test]
fn test_prev_exactly_at_threshold_moves_back() {
    let mut store = linear_store();
    store.play_queue(library(3), 1);
    store.set_progress(3.0);

    store.prev_song();
    assert_eq!(store.queue_index(), Some(0));
}

#[test]
fn test_custom_restart_threshold() {
    let mut store = PlayerStore::new(PlaybackConfig {
        smart_queue: false,
        restart_threshold_secs: 10.0,
        ..PlaybackConfig::default()
    });
    store.play_queue(library(3), 1);
    store.set_progress(5.0);

    store.prev_song();
    assert_eq!(store.queue_index(), Some(0));
}

// ===== Volume =====

#[test]
fn test_volume_is_clamped() {
    let mut store = PlayerStore::default();

    store.set_volume(-0.5);
    assert_eq!(store.volume(), 0.0);

    store.set_volume(1.7);
    assert_eq!(store.volume(), 1.0);

    store.set_volume(0.35);
    assert_eq!(store.volume(), 0.35);
}

#[test]
fn test_initial_volume_from_config() {
    let store = PlayerStore::new(PlaybackConfig {
        volume: 3.0,
        ..PlaybackConfig::default()
    });
    assert_eq!(store.volume(), 1.0);
    assert_eq!(PlayerStore::default().volume(), 0.7);
}

// ===== Smart Queue =====

#[test]
fn test_smart_queue_never_picks_current_position() {
    let mut store = PlayerStore::default().with_random(smart_playback::seeded_random(7));
    store.play_queue(library(5), 0);

    for _ in 0..200 {
        let before = store.queue_index();
        store.next_song();
        assert_ne!(store.queue_index(), before);
        assert_eq!(
            store.current_song(),
            store.queue_index().map(|i| &store.queue()[i])
        );
    }
}

#[test]
fn test_smart_queue_single_song_falls_back_to_linear() {
    let mut store = PlayerStore::default();
    store.play_queue(library(1), 0);
    store.set_progress(50.0);

    // Selector has nothing to pick; (0 + 1) % 1 == 0
    store.next_song();
    assert_eq!(store.queue_index(), Some(0));
    assert_eq!(store.progress(), 0.0);
}

// ===== Queue Edits =====

#[test]
fn test_remove_playing_song_moves_to_next_entry() {
    let mut store = linear_store();
    store.play_queue(library(4), 1);

    store.remove_from_queue(1);

    assert_eq!(store.queue().len(), 3);
    assert_eq!(store.queue_index(), Some(1));
    assert_eq!(current_id(&store), "2");
}

#[test]
fn test_remove_out_of_range_changes_nothing() {
    let mut store = linear_store();
    store.play_queue(library(2), 1);
    store.drain_events();

    store.remove_from_queue(9);

    assert_eq!(store.queue().len(), 2);
    assert!(store.drain_events().is_empty());
}

#[test]
fn test_play_queue_with_bad_start_keeps_queue_only() {
    let mut store = linear_store();
    store.play_queue(library(2), 5);

    assert_eq!(store.queue().len(), 2);
    assert_eq!(store.queue_index(), None);
    assert!(store.current_song().is_none());
    assert!(!store.is_playing());
}
