//! Integration test: full play cycles through the session API
//!
//! Drives a session with a simple autopilot through start → play → crash →
//! reset → play, checking scoring and best-score persistence end to end.

use flappy::game::{
    FlightEvent, FlightInput, FlightState, HighScoreStore, JsonHighScoreStore,
    MemoryHighScoreStore, Phase, Session,
};
use flappy::GameConfig;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;

const MAX_FRAMES: u32 = 20_000;

/// Aim for the middle of the next gap (or the spawn height when no pipe is coming).
fn autopilot_target(state: &FlightState, config: &GameConfig) -> f64 {
    state
        .pipes
        .iter()
        .find(|p| !p.scored)
        .map(|p| p.top_height + (config.pipe_gap - config.bird_size) / 2.0)
        .unwrap_or(config.bird_start_y)
}

/// Flap once the bird sinks a little below the target. A flap peaks 95 units
/// higher with the default physics, which keeps the bird inside a 150 gap.
fn should_flap(state: &FlightState, config: &GameConfig) -> bool {
    state.bird.y > autopilot_target(state, config) + 35.0
}

/// Start a run and fly until `score` pipes have been passed, then stop flapping
/// and let the bird fall. Returns every event of the run.
fn play_until_score<S: HighScoreStore>(
    session: &mut Session<S, ChaCha8Rng>,
    score: u32,
) -> Vec<FlightEvent> {
    assert_eq!(session.state().phase, Phase::Start);
    let mut events = vec![session.handle_input(FlightInput::Flap)];

    let mut frames = 0;
    while session.state().score < score {
        assert!(
            session.state().is_playing(),
            "crashed at score {} before reaching {}",
            session.state().score,
            score
        );
        if should_flap(session.state(), session.config()) {
            events.push(session.handle_input(FlightInput::Flap));
        }
        events.extend(session.tick());
        frames += 1;
        assert!(frames < MAX_FRAMES, "autopilot stalled");
    }

    while session.state().is_playing() {
        events.extend(session.tick());
        frames += 1;
        assert!(frames < MAX_FRAMES, "bird never landed");
    }
    events
}

fn memory_session(best: u32, seed: u64) -> Session<MemoryHighScoreStore, ChaCha8Rng> {
    Session::new(
        GameConfig::default(),
        MemoryHighScoreStore::with_best(best),
        ChaCha8Rng::seed_from_u64(seed),
    )
}

fn temp_store_path(name: &str) -> PathBuf {
    std::env::temp_dir()
        .join(format!("flappy_it_{}", std::process::id()))
        .join(name)
}

// =============================================================================
// Scoring
// =============================================================================

#[test]
fn test_each_pipe_scores_exactly_once() {
    let mut session = memory_session(0, 7);
    let events = play_until_score(&mut session, 4);

    let passed: Vec<u32> = events
        .iter()
        .filter_map(|e| match e {
            FlightEvent::PipePassed { score } => Some(*score),
            _ => None,
        })
        .collect();
    assert_eq!(passed, vec![1, 2, 3, 4]);
    assert_eq!(session.state().score, 4);
    assert!(session.state().pipes.iter().filter(|p| p.scored).count() <= 4);
}

#[test]
fn test_run_ends_with_ground_crash() {
    let mut session = memory_session(0, 11);
    let events = play_until_score(&mut session, 2);

    assert_eq!(session.state().phase, Phase::GameOver);
    assert!(events.contains(&FlightEvent::Crashed {
        cause: flappy::game::CrashCause::Ground,
        score: 2,
    }));
}

// =============================================================================
// Best score scenarios
// =============================================================================

#[test]
fn test_beating_seeded_best_persists_new_best() {
    let path = temp_store_path("beat_best.json");
    let mut store = JsonHighScoreStore::new(&path);
    store.save(5).unwrap();

    let mut session = Session::new(
        GameConfig::default(),
        JsonHighScoreStore::new(&path),
        ChaCha8Rng::seed_from_u64(2024),
    );
    assert_eq!(session.state().best, 5);

    let events = play_until_score(&mut session, 6);

    assert_eq!(session.state().score, 6);
    assert_eq!(session.state().best, 6);
    assert!(session.state().new_best);
    assert!(events.contains(&FlightEvent::NewBest { score: 6 }));
    assert_eq!(JsonHighScoreStore::new(&path).load(), 6);

    store.clear().unwrap();
}

#[test]
fn test_lower_score_keeps_seeded_best() {
    let path = temp_store_path("keep_best.json");
    let mut store = JsonHighScoreStore::new(&path);
    store.save(5).unwrap();

    let mut session = Session::new(
        GameConfig::default(),
        JsonHighScoreStore::new(&path),
        ChaCha8Rng::seed_from_u64(99),
    );
    let events = play_until_score(&mut session, 3);

    assert_eq!(session.state().score, 3);
    assert_eq!(session.state().best, 5);
    assert!(!session.state().new_best);
    assert!(!events
        .iter()
        .any(|e| matches!(e, FlightEvent::NewBest { .. })));
    assert_eq!(JsonHighScoreStore::new(&path).load(), 5);

    store.clear().unwrap();
}

#[test]
fn test_best_survives_reset_and_next_run() {
    let mut session = memory_session(0, 31);

    play_until_score(&mut session, 3);
    assert_eq!(session.store().best, 3);
    assert_eq!(session.store().writes, 1);

    // Reset clears the run but not the best score
    assert_eq!(session.handle_input(FlightInput::Flap), FlightEvent::Reset);
    let config = session.config().clone();
    assert_eq!(session.state(), &FlightState::new(&config, 3));

    // A shorter second run leaves the stored best alone
    play_until_score(&mut session, 1);
    assert_eq!(session.state().best, 3);
    assert_eq!(session.store().best, 3);
    assert_eq!(session.store().writes, 1);

    // A longer third run replaces it
    session.handle_input(FlightInput::Flap);
    play_until_score(&mut session, 4);
    assert_eq!(session.store().best, 4);
    assert_eq!(session.store().writes, 2);
}

#[test]
fn test_new_session_reads_previous_best() {
    let path = temp_store_path("reload.json");

    {
        let mut session = Session::new(
            GameConfig::default(),
            JsonHighScoreStore::new(&path),
            ChaCha8Rng::seed_from_u64(5),
        );
        assert_eq!(session.state().best, 0);
        play_until_score(&mut session, 2);
    }

    let session = Session::new(
        GameConfig::default(),
        JsonHighScoreStore::new(&path),
        ChaCha8Rng::seed_from_u64(6),
    );
    assert_eq!(session.state().best, 2);

    JsonHighScoreStore::new(&path).clear().unwrap();
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_same_seed_same_pipes() {
    let mut a = memory_session(0, 42);
    let mut b = memory_session(0, 42);

    let events_a = play_until_score(&mut a, 3);
    let events_b = play_until_score(&mut b, 3);

    assert_eq!(events_a, events_b);
    assert_eq!(a.state(), b.state());
}
