//! A play session: simulation state plus the collaborators it needs.
//!
//! The session is the only place where simulation events turn into side
//! effects. Today that is a single one: writing a new best score.

use super::high_score::HighScoreStore;
use super::logic::{advance, process_input};
use super::types::{FlightEvent, FlightInput, FlightState};
use crate::core::config::GameConfig;
use rand::Rng;

pub struct Session<S: HighScoreStore, R: Rng> {
    state: FlightState,
    config: GameConfig,
    store: S,
    rng: R,
    last_save_error: Option<String>,
}

impl<S: HighScoreStore, R: Rng> Session<S, R> {
    /// Start on the title screen with the stored best score.
    pub fn new(config: GameConfig, store: S, rng: R) -> Self {
        let best = store.load();
        Self {
            state: FlightState::new(&config, best),
            config,
            store,
            rng,
            last_save_error: None,
        }
    }

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Message from the most recent failed best-score write, if any.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    pub fn handle_input(&mut self, input: FlightInput) -> FlightEvent {
        process_input(&mut self.state, &self.config, input)
    }

    /// Advance one frame and persist a new best score if the run just ended on one.
    pub fn tick(&mut self) -> Vec<FlightEvent> {
        let events = advance(&mut self.state, &self.config, &mut self.rng);
        for event in &events {
            if let FlightEvent::NewBest { score } = event {
                self.commit_best(*score);
            }
        }
        events
    }

    fn commit_best(&mut self, score: u32) {
        match self.store.save(score) {
            Ok(()) => self.last_save_error = None,
            Err(e) => {
                self.last_save_error = Some(format!("Could not save high score {}: {}", score, e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::high_score::{JsonHighScoreStore, MemoryHighScoreStore};
    use crate::game::types::{Phase, Pipe};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::io;

    struct FailingStore;

    impl HighScoreStore for FailingStore {
        fn load(&self) -> u32 {
            1
        }

        fn save(&mut self, _score: u32) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }
    }

    fn session_with_best(best: u32) -> Session<MemoryHighScoreStore, ChaCha8Rng> {
        Session::new(
            GameConfig::default(),
            MemoryHighScoreStore::with_best(best),
            ChaCha8Rng::seed_from_u64(12345),
        )
    }

    /// Crash into the ceiling on the next tick with the given score.
    fn crash_with_score(session: &mut Session<impl HighScoreStore, impl Rng>, score: u32) {
        session.state.phase = Phase::Playing;
        session.state.score = score;
        session.state.bird.y = 1.0;
        session.state.bird.velocity = -5.0;
        session.tick();
        assert_eq!(session.state().phase, Phase::GameOver);
    }

    #[test]
    fn test_new_session_loads_best() {
        let session = session_with_best(5);
        assert_eq!(session.state().best, 5);
        assert_eq!(session.state().phase, Phase::Start);
    }

    #[test]
    fn test_new_best_is_saved() {
        let mut session = session_with_best(5);
        crash_with_score(&mut session, 6);
        assert_eq!(session.store().best, 6);
        assert_eq!(session.store().writes, 1);
        assert!(session.last_save_error().is_none());
    }

    #[test]
    fn test_lower_score_not_saved() {
        let mut session = session_with_best(5);
        crash_with_score(&mut session, 3);
        assert_eq!(session.store().best, 5);
        assert_eq!(session.store().writes, 0);
    }

    #[test]
    fn test_save_failure_is_recorded_not_fatal() {
        let mut session = Session::new(
            GameConfig::default(),
            FailingStore,
            ChaCha8Rng::seed_from_u64(1),
        );
        crash_with_score(&mut session, 4);

        assert_eq!(session.state().best, 4);
        let err = session.last_save_error().unwrap();
        assert!(err.contains("read-only"));

        // Play continues
        session.handle_input(FlightInput::Flap);
        assert_eq!(session.state().phase, Phase::Start);
    }

    #[test]
    fn test_unwritable_json_store_plays_from_zero() {
        // A regular file where the save directory should be
        let blocker = std::env::temp_dir().join(format!("flappy_blocker_{}", std::process::id()));
        std::fs::write(&blocker, "not a directory").unwrap();
        let store = JsonHighScoreStore::new(blocker.join("high_score.json"));

        let mut session = Session::new(GameConfig::default(), store, ChaCha8Rng::seed_from_u64(3));
        assert_eq!(session.state().best, 0);

        crash_with_score(&mut session, 2);
        assert_eq!(session.state().best, 2);
        assert!(session.last_save_error().is_some());

        session.handle_input(FlightInput::Flap);
        assert_eq!(session.state().phase, Phase::Start);

        std::fs::remove_file(&blocker).unwrap();
    }

    #[test]
    fn test_tick_forwards_pipe_events() {
        let mut session = session_with_best(0);
        session.handle_input(FlightInput::Flap);
        session.state.pipes.push(Pipe {
            x: 0.0,
            top_height: 100.0,
            scored: false,
        });

        let events = session.tick();

        assert_eq!(events, vec![FlightEvent::PipePassed { score: 1 }]);
        assert_eq!(session.state().score, 1);
    }
}
