//! Flight simulation rules: flap handling, the per-frame step, collision and scoring.
//!
//! Everything here is a pure state transition over [`FlightState`]. Randomness
//! comes in through the caller's `Rng` so pipe placement can be reproduced.

use super::types::{CrashCause, FlightEvent, FlightInput, FlightState, Phase, Pipe};
use crate::core::config::{GameConfig, SpawnRule};
use rand::Rng;

/// Process player input.
pub fn process_input(
    state: &mut FlightState,
    config: &GameConfig,
    input: FlightInput,
) -> FlightEvent {
    match input {
        FlightInput::Flap => match state.phase {
            Phase::Start => {
                state.phase = Phase::Playing;
                state.bird.velocity = config.jump_velocity;
                FlightEvent::Started
            }
            Phase::Playing => {
                state.bird.velocity = config.jump_velocity;
                FlightEvent::Flapped
            }
            Phase::GameOver => {
                state.reset(config);
                FlightEvent::Reset
            }
        },
    }
}

/// Advance the simulation by one frame.
///
/// Does nothing unless the game is being played. Returns the events of this
/// frame in the order they happened; a crash is always the last simulation
/// event, optionally followed by [`FlightEvent::NewBest`].
pub fn advance<R: Rng + ?Sized>(
    state: &mut FlightState,
    config: &GameConfig,
    rng: &mut R,
) -> Vec<FlightEvent> {
    let mut events = Vec::new();
    if state.phase != Phase::Playing {
        return events;
    }

    state.frame += 1;

    // Gravity
    state.bird.velocity += config.gravity;
    state.bird.y += state.bird.velocity;

    // Scroll pipes, dropping those fully past the left edge
    for pipe in &mut state.pipes {
        pipe.x -= config.pipe_speed;
    }
    state.pipes.retain(|p| p.x > -config.pipe_width);

    if should_spawn(state, config) {
        let top_height = spawn_pipe(state, config, rng);
        events.push(FlightEvent::PipeSpawned { top_height });
    }

    score_passed_pipes(state, config, &mut events);

    if let Some(cause) = check_collision(state, config) {
        state.phase = Phase::GameOver;
        events.push(FlightEvent::Crashed {
            cause,
            score: state.score,
        });
        if state.score > state.best {
            state.best = state.score;
            state.new_best = true;
            events.push(FlightEvent::NewBest { score: state.score });
        }
    }

    events
}

/// Whether the spawn rule calls for a new pipe this frame.
pub fn should_spawn(state: &FlightState, config: &GameConfig) -> bool {
    match config.spawn {
        SpawnRule::Interval { ticks } => ticks > 0 && state.frame % ticks == 0,
        SpawnRule::Spacing { distance } => match state.pipes.last() {
            None => true,
            Some(newest) => newest.x <= config.field_width - distance,
        },
    }
}

/// Spawn a pipe at the right edge with a random gap. Returns the gap's top edge.
///
/// The gap is placed uniformly so that it keeps at least `gap_margin` from
/// both the ceiling and the ground.
pub fn spawn_pipe<R: Rng + ?Sized>(
    state: &mut FlightState,
    config: &GameConfig,
    rng: &mut R,
) -> f64 {
    let range = config.gap_top_range().max(0.0);
    let top_height = config.gap_margin + rng.gen::<f64>() * range;

    state.pipes.push(Pipe {
        x: config.field_width,
        top_height,
        scored: false,
    });
    top_height
}

/// Score every unscored pipe whose right edge is now left of the bird.
fn score_passed_pipes(
    state: &mut FlightState,
    config: &GameConfig,
    events: &mut Vec<FlightEvent>,
) {
    let bird_x = state.bird.x;
    for pipe in &mut state.pipes {
        if !pipe.scored && pipe.right_edge(config) < bird_x {
            pipe.scored = true;
            state.score += 1;
            events.push(FlightEvent::PipePassed { score: state.score });
        }
    }
}

/// Check the bird against the field bounds and every pipe.
///
/// Touching the ceiling (`y <= 0`) or the ground (`bottom >= field_height`)
/// counts as a crash.
pub fn check_collision(state: &FlightState, config: &GameConfig) -> Option<CrashCause> {
    let bird_left = state.bird.x;
    let bird_right = state.bird.x + config.bird_size;
    let bird_top = state.bird.y;
    let bird_bottom = state.bird.y + config.bird_size;

    if bird_bottom >= config.field_height {
        return Some(CrashCause::Ground);
    }
    if bird_top <= 0.0 {
        return Some(CrashCause::Ceiling);
    }

    for pipe in &state.pipes {
        let overlaps_horizontally = bird_right > pipe.x && bird_left < pipe.right_edge(config);
        if overlaps_horizontally
            && (bird_top < pipe.top_height || bird_bottom > pipe.gap_bottom(config))
        {
            return Some(CrashCause::Pipe);
        }
    }
    None
}
