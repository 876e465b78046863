//! Round scenarios driven through the facade crate with virtual time.

use memory_match::core::{
    deliver, GameError, GameState, IdentityShuffler, RecordingSink, RoundSettings, SeededShuffler,
    Session, Shuffler,
};
use memory_match::types::{
    standard_symbols, GameAction, GameEvent, Outcome, RoundStatus, Symbol, DEFAULT_PAIR_COUNT,
    DEFAULT_TILE_COUNT, MISMATCH_REVEAL_MS, ROUND_SECONDS,
};

const A: Symbol = Symbol::new(0);
const B: Symbol = Symbol::new(1);

fn two_pairs(seconds: u32) -> Session<IdentityShuffler> {
    Session::from_game(GameState::with_shuffler(
        &[A, B],
        IdentityShuffler,
        RoundSettings::default().with_round_seconds(seconds),
    ))
}

fn run(session: &mut Session<impl Shuffler>, sink: &mut RecordingSink, action: GameAction) {
    let events = session.dispatch(action).unwrap();
    deliver(sink, &events);
}

#[test]
fn test_matching_every_pair_wins() {
    let mut s = two_pairs(ROUND_SECONDS);
    let mut sink = RecordingSink::default();

    run(&mut s, &mut sink, GameAction::Start);
    run(&mut s, &mut sink, GameAction::SelectTile(0));
    assert_eq!(s.game().round().first_selected, Some(0));

    run(&mut s, &mut sink, GameAction::SelectTile(2));
    assert_eq!(s.game().round().matched_pairs, 1);
    assert_eq!(s.game().round().first_selected, None);

    run(&mut s, &mut sink, GameAction::SelectTile(1));
    run(&mut s, &mut sink, GameAction::SelectTile(3));

    assert_eq!(s.game().status(), RoundStatus::Won);
    assert_eq!(sink.outcomes(), vec![Outcome::Won]);
    assert!(sink.events.contains(&GameEvent::Progress {
        matched: 2,
        total: 2
    }));

    // The clock stopped with the win
    deliver(&mut sink, &s.advance(10_000));
    assert_eq!(sink.outcomes(), vec![Outcome::Won]);
    assert_eq!(s.game().round().seconds_remaining, ROUND_SECONDS);
}

#[test]
fn test_mismatch_conceals_after_delay() {
    let mut s = two_pairs(ROUND_SECONDS);
    let mut sink = RecordingSink::default();

    run(&mut s, &mut sink, GameAction::Start);
    run(&mut s, &mut sink, GameAction::SelectTile(0));
    run(&mut s, &mut sink, GameAction::SelectTile(1));
    assert!(s.game().round().input_locked);

    // Clicks inside the window change nothing
    let before = s.snapshot();
    assert_eq!(s.dispatch(GameAction::SelectTile(2)), Ok(vec![]));
    assert_eq!(s.snapshot(), before);

    deliver(&mut sink, &s.advance(MISMATCH_REVEAL_MS as u64));
    assert_eq!(s.game().status(), RoundStatus::Playing);
    assert_eq!(s.game().round().matched_pairs, 0);
    assert!(!s.game().round().input_locked);
    assert!(s.game().deck().tiles().iter().all(|t| t.is_concealed()));
}

#[test]
fn test_five_second_timer_loses_exactly_once() {
    let mut s = two_pairs(5);
    let mut sink = RecordingSink::default();
    run(&mut s, &mut sink, GameAction::Start);

    for _ in 0..5 {
        deliver(&mut sink, &s.advance(1000));
    }
    deliver(&mut sink, &s.advance(30_000));

    let ticks: Vec<u32> = sink
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Tick { remaining, .. } => Some(*remaining),
            _ => None,
        })
        .collect();
    assert_eq!(ticks, vec![4, 3, 2, 1, 0]);
    assert_eq!(sink.outcomes(), vec![Outcome::Lost]);
    assert_eq!(s.game().status(), RoundStatus::Lost);

    // No selection is processed once lost
    let before = s.snapshot();
    assert_eq!(s.dispatch(GameAction::SelectTile(0)), Ok(vec![]));
    assert_eq!(s.snapshot(), before);
}

#[test]
fn test_full_duration_countdown() {
    let mut s = Session::new(99);
    let mut sink = RecordingSink::default();
    run(&mut s, &mut sink, GameAction::Start);
    deliver(&mut sink, &s.advance(ROUND_SECONDS as u64 * 1000));

    let ticks = sink
        .events
        .iter()
        .filter(|e| matches!(e, GameEvent::Tick { .. }))
        .count();
    assert_eq!(ticks, ROUND_SECONDS as usize);
    assert_eq!(sink.outcomes(), vec![Outcome::Lost]);
    assert_eq!(
        sink.events
            .iter()
            .filter(|e| matches!(e, GameEvent::Warning { .. }))
            .count(),
        1
    );
}

#[test]
fn test_errors_are_recoverable() {
    let mut s = Session::new(5);
    assert!(matches!(
        s.dispatch(GameAction::SelectTile(0)),
        Err(GameError::IllegalTransition { .. })
    ));

    s.dispatch(GameAction::Start).unwrap();
    let before = s.snapshot();
    assert_eq!(
        s.dispatch(GameAction::SelectTile(DEFAULT_TILE_COUNT)),
        Err(GameError::InvalidTileReference {
            position: DEFAULT_TILE_COUNT,
            tiles: DEFAULT_TILE_COUNT
        })
    );
    assert_eq!(s.dispatch(GameAction::Start), Err(GameError::RedundantStart));
    assert_eq!(s.snapshot(), before);
}

#[test]
fn test_restart_then_start_is_a_fresh_round() {
    let mut s = two_pairs(ROUND_SECONDS);
    s.dispatch(GameAction::Start).unwrap();
    s.dispatch(GameAction::SelectTile(0)).unwrap();
    s.dispatch(GameAction::SelectTile(2)).unwrap();
    s.dispatch(GameAction::SelectTile(1)).unwrap();
    s.dispatch(GameAction::SelectTile(3)).unwrap();
    assert_eq!(s.game().status(), RoundStatus::Won);

    s.dispatch(GameAction::Restart).unwrap();
    assert_eq!(s.game().status(), RoundStatus::Idle);
    s.dispatch(GameAction::Start).unwrap();

    let round = s.game().round();
    assert_eq!(round.matched_pairs, 0);
    assert_eq!(round.seconds_remaining, ROUND_SECONDS);
    assert!(s.game().deck().tiles().iter().all(|t| t.is_concealed()));
}

#[test]
fn test_seeded_deal_is_a_permutation_and_reproducible() {
    let deal = |seed| {
        let mut s = Session::from_game(GameState::with_shuffler(
            &standard_symbols(),
            SeededShuffler::new(seed),
            RoundSettings::default(),
        ));
        s.dispatch(GameAction::Start).unwrap();
        s.game()
            .deck()
            .tiles()
            .iter()
            .map(|t| t.symbol)
            .collect::<Vec<_>>()
    };

    let first = deal(2024);
    assert_eq!(first, deal(2024));
    assert_eq!(first.len(), DEFAULT_TILE_COUNT);
    for symbol in standard_symbols() {
        assert_eq!(first.iter().filter(|&&s| s == symbol).count(), 2);
    }
    assert_eq!(DEFAULT_TILE_COUNT, DEFAULT_PAIR_COUNT * 2);
}

#[test]
fn test_matched_pairs_never_decrease() {
    let mut s = Session::new(31337);
    s.dispatch(GameAction::Start).unwrap();

    let mut last = 0;
    for a in 0..DEFAULT_TILE_COUNT {
        for b in (a + 1)..DEFAULT_TILE_COUNT {
            if s.game().status() != RoundStatus::Playing {
                break;
            }
            let tiles = s.game().deck().tiles();
            if tiles[a].matched || tiles[b].matched {
                continue;
            }
            s.dispatch(GameAction::SelectTile(a)).unwrap();
            s.dispatch(GameAction::SelectTile(b)).unwrap();
            s.advance(MISMATCH_REVEAL_MS as u64);

            let matched = s.game().round().matched_pairs;
            assert!(matched >= last);
            assert!(matched <= DEFAULT_PAIR_COUNT);
            last = matched;
        }
    }
}
