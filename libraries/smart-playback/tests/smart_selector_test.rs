//! Smart-next selection statistics
//!
//! Runs the selector many times with a seeded generator and checks that
//! pick frequencies follow the weights.

use chrono::{DateTime, Duration, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;
use smart_core::{Song, SongId};
use smart_playback::{SmartQueueWeights, SmartSelector};
use std::collections::HashMap;

const TRIALS: usize = 10_000;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 15, 20, 0, 0).unwrap()
}

/// Never played, added long ago, no shared metadata with `current()`
fn song(id: &str, artist: &str) -> Song {
    Song {
        id: SongId::new(id),
        added_at: now() - Duration::days(90),
        ..Song::new(format!("Song {id}"), artist, format!("/music/{id}.mp3"))
    }
}

fn current() -> Song {
    song("current", "Someone Else")
}

fn pick_counts(
    selector: &SmartSelector,
    queue: &[Song],
    exclude: Option<usize>,
    seed: u64,
) -> HashMap<String, usize> {
    let current = current();
    let mut rng = StdRng::seed_from_u64(seed);
    let mut counts = HashMap::new();

    for _ in 0..TRIALS {
        let picked = selector
            .select_next(queue, Some(&current), exclude, now(), &mut rng)
            .expect("selector should pick with multiple candidates");
        *counts.entry(picked.id.to_string()).or_insert(0) += 1;
    }
    counts
}

#[test]
fn test_favorite_is_picked_most() {
    let queue = vec![
        song("a", "Artist A"),
        Song {
            is_favorite: true,
            ..song("b", "Artist B")
        },
        song("c", "Artist C"),
    ];

    let counts = pick_counts(&SmartSelector::default(), &queue, None, 42);
    let a = counts.get("a").copied().unwrap_or(0);
    let b = counts.get("b").copied().unwrap_or(0);
    let c = counts.get("c").copied().unwrap_or(0);

    assert!(b > a && b > c, "favorite should win: a={a} b={b} c={c}");

    // Weights: favorite 1 + 4 + 1 = 6, others 1 + 1 = 2
    let share = b as f64 / TRIALS as f64;
    assert!((share - 0.6).abs() < 0.03, "favorite share {share}");
}

#[test]
fn test_excluded_position_is_never_picked() {
    let queue = vec![
        song("a", "Artist A"),
        song("b", "Artist B"),
        song("c", "Artist C"),
    ];

    let counts = pick_counts(&SmartSelector::default(), &queue, Some(1), 7);
    assert!(!counts.contains_key("b"));
    assert_eq!(counts.values().sum::<usize>(), TRIALS);
}

#[test]
fn test_floored_candidate_keeps_small_chance() {
    let weights = SmartQueueWeights {
        recent_2h_penalty: 25.0,
        ..SmartQueueWeights::default()
    };
    let selector = SmartSelector::new(weights);

    let just_played = Song {
        play_count: 1,
        last_played: Some(now() - Duration::minutes(1)),
        ..song("recent", "Artist R")
    };
    let queue = vec![just_played.clone(), song("other", "Artist O")];

    let breakdown = selector.score(&just_played, &current(), 1.0, now());
    assert!(breakdown.raw() < 0.0);
    assert_eq!(breakdown.weight, 0.1);

    // 0.1 against 2.0 is roughly one pick in 21
    let counts = pick_counts(&selector, &queue, None, 1234);
    let recent = counts.get("recent").copied().unwrap_or(0);
    assert!(recent > 0, "floored candidate must stay selectable");
    let share = recent as f64 / TRIALS as f64;
    assert!((share - 0.1 / 2.1).abs() < 0.015, "floored share {share}");
}

#[test]
fn test_same_seed_same_sequence() {
    let queue: Vec<Song> = (0..6)
        .map(|i| song(&i.to_string(), &format!("Artist {i}")))
        .collect();
    let selector = SmartSelector::default();
    let current = current();

    let run = |seed: u64| {
        let mut rng = StdRng::seed_from_u64(seed);
        (0..50)
            .map(|_| {
                selector
                    .select_next(&queue, Some(&current), Some(0), now(), &mut rng)
                    .map(|s| s.id.clone())
            })
            .collect::<Vec<_>>()
    };

    assert_eq!(run(99), run(99));
}

#[test]
fn test_similar_songs_outweigh_unrelated_ones() {
    let current = Song {
        genre: Some("Rock".into()),
        album: Some("Nights".into()),
        energy: Some(0.8),
        ..song("current", "Band")
    };
    let similar = Song {
        genre: Some("Rock".into()),
        album: Some("Nights".into()),
        energy: Some(0.8),
        ..song("similar", "Band")
    };
    let unrelated = Song {
        genre: Some("Jazz".into()),
        energy: Some(0.1),
        ..song("unrelated", "Trio")
    };

    let selector = SmartSelector::default();
    let s = selector.score(&similar, &current, 1.0, now());
    let u = selector.score(&unrelated, &current, 1.0, now());

    // 1 + 2 + 1.5 + 1 + 2 + 1 against 1 + 0.6 + 1
    assert!((s.weight - 8.5).abs() < 1e-9);
    assert!((u.weight - 2.6).abs() < 1e-9);
}
