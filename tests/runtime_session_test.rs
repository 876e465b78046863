//! Session actor tests on tokio's paused clock.

use std::path::PathBuf;

use tokio::time::{sleep, Duration};
use tokio_test::assert_ok;

use memory_match::core::{GameState, IdentityShuffler, RoundSettings, Session};
use memory_match::runtime::{spawn_session, EventRecord, RuntimeConfig};
use memory_match::types::{CelebrationStep, GameEvent, Outcome, RoundStatus, Symbol};

fn two_pair_session() -> Session<IdentityShuffler> {
    Session::from_game(GameState::with_shuffler(
        &[Symbol::new(0), Symbol::new(1)],
        IdentityShuffler,
        RoundSettings::default(),
    ))
}

fn temp_journal(name: &str) -> PathBuf {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    std::env::temp_dir().join(format!("memory-match-{}-{}-{}.jsonl", name, std::process::id(), nanos))
}

#[tokio::test(start_paused = true)]
async fn test_win_celebration_is_paced() {
    let (handle, mut events, _task) = spawn_session(two_pair_session(), &RuntimeConfig::default());

    assert_ok!(handle.start().await);
    for p in [0, 2, 1, 3] {
        assert_ok!(handle.select_tile(p).await);
    }

    let started = tokio::time::Instant::now();
    let mut steps = Vec::new();
    while steps.len() < 3 {
        match events.recv().await {
            Some(GameEvent::Celebration { step }) => steps.push((step, started.elapsed())),
            Some(_) => {}
            None => panic!("event stream closed"),
        }
    }

    assert_eq!(steps[0].0, CelebrationStep::Confetti);
    assert_eq!(steps[0].1, Duration::ZERO);
    assert_eq!(steps[1].0, CelebrationStep::Message);
    assert_eq!(steps[1].1, Duration::from_millis(1000));
    assert_eq!(steps[2].0, CelebrationStep::Actions);
    assert_eq!(steps[2].1, Duration::from_millis(3000));
}

#[tokio::test(start_paused = true)]
async fn test_restart_during_celebration_silences_it() {
    let (handle, mut events, _task) = spawn_session(two_pair_session(), &RuntimeConfig::default());
    assert_ok!(handle.start().await);
    for p in [0, 2, 1, 3] {
        assert_ok!(handle.select_tile(p).await);
    }
    assert_ok!(handle.restart().await);
    while events.try_recv().is_ok() {}

    sleep(Duration::from_secs(5)).await;
    while let Ok(ev) = events.try_recv() {
        assert!(!matches!(ev, GameEvent::Celebration { .. }), "stale {:?}", ev);
    }
    let snap = assert_ok!(handle.snapshot().await);
    assert_eq!(snap.status, RoundStatus::Idle);
    assert_eq!(snap.celebration, None);
}

#[tokio::test(start_paused = true)]
async fn test_try_again_after_loss() {
    let (handle, mut events, _task) = spawn_session(
        Session::from_game(GameState::with_shuffler(
            &[Symbol::new(0), Symbol::new(1)],
            IdentityShuffler,
            RoundSettings::default().with_round_seconds(3),
        )),
        &RuntimeConfig::default(),
    );
    assert_ok!(handle.start().await);
    sleep(Duration::from_secs(4)).await;

    let mut lost = 0;
    while let Ok(ev) = events.try_recv() {
        if ev == (GameEvent::RoundEnded { outcome: Outcome::Lost }) {
            lost += 1;
        }
    }
    assert_eq!(lost, 1);

    assert_ok!(handle.start().await);
    let snap = assert_ok!(handle.snapshot().await);
    assert_eq!(snap.status, RoundStatus::Playing);
    assert_eq!(snap.round, 2);
    assert_eq!(snap.seconds_remaining, 3);
}

#[tokio::test(start_paused = true)]
async fn test_journal_records_published_events() {
    let path = temp_journal("runtime");
    let config = RuntimeConfig {
        journal_path: Some(path.clone()),
        ..RuntimeConfig::default()
    };
    let (handle, mut events, task) = spawn_session(two_pair_session(), &config);

    assert_ok!(handle.start().await);
    assert_ok!(handle.select_tile(0).await);
    assert_ok!(handle.select_tile(1).await);
    sleep(Duration::from_millis(1500)).await;
    assert_ok!(handle.shutdown().await);
    assert_ok!(task.await);

    let mut published = Vec::new();
    while let Ok(ev) = events.try_recv() {
        published.push(ev);
    }

    let text = assert_ok!(tokio::fs::read_to_string(&path).await);
    let records: Vec<EventRecord> = text
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(records.iter().map(|r| r.event).collect::<Vec<_>>(), published);
    assert!(records.windows(2).all(|w| w[0].seq + 1 == w[1].seq));
    assert!(records.windows(2).all(|w| w[0].at_ms <= w[1].at_ms));
    let conceal_at = records
        .iter()
        .find(|r| {
            matches!(
                r.event,
                GameEvent::TileChanged {
                    revealed: false,
                    ..
                }
            )
        })
        .map(|r| r.at_ms);
    assert_eq!(conceal_at, Some(1000));

    let _ = tokio::fs::remove_file(&path).await;
}
