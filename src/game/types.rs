//! Flight simulation data structures.
//!
//! Positions are in game units with the origin at the top-left of the
//! playfield and `y` growing downward. The bird and pipes are axis-aligned
//! rectangles; `Bird::y` and `Pipe::x` are their top and left edges.

use crate::core::config::GameConfig;

/// Discrete game phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Waiting for the first flap. Physics paused.
    #[default]
    Start,
    Playing,
    /// Frozen after a crash until the next flap resets to `Start`.
    GameOver,
}

/// The player's bird. `x` never changes after spawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bird {
    pub x: f64,
    pub y: f64,
    /// Vertical velocity in units/frame (positive = downward).
    pub velocity: f64,
}

/// A pipe pair with a traversable gap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pipe {
    /// Left edge, decreasing every frame.
    pub x: f64,
    /// Bottom edge of the upper pipe; the gap spans `top_height..top_height + pipe_gap`.
    pub top_height: f64,
    /// Whether the bird has passed this pipe (for scoring).
    pub scored: bool,
}

impl Pipe {
    pub fn right_edge(&self, config: &GameConfig) -> f64 {
        self.x + config.pipe_width
    }

    pub fn gap_bottom(&self, config: &GameConfig) -> f64 {
        self.top_height + config.pipe_gap
    }
}

/// Why a run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashCause {
    Ground,
    Ceiling,
    Pipe,
}

/// Player input. Keyboard and pointer both map to `Flap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlightInput {
    Flap,
}

/// Something that happened during input handling or a tick.
///
/// The session and the presentation layer react to these; the simulation
/// itself never touches storage or the terminal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightEvent {
    /// First flap from the start screen.
    Started,
    Flapped,
    /// Flap on the game-over screen returned to the start screen.
    Reset,
    PipeSpawned { top_height: f64 },
    PipePassed { score: u32 },
    Crashed { cause: CrashCause, score: u32 },
    /// The run beat the previous best. Emitted after `Crashed`.
    NewBest { score: u32 },
}

/// Complete simulation state.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightState {
    pub phase: Phase,
    pub bird: Bird,
    /// Active pipes, oldest first.
    pub pipes: Vec<Pipe>,
    pub score: u32,
    /// Best score known to this session (loaded from storage at startup).
    pub best: u32,
    /// Frames advanced since the run started.
    pub frame: u64,
    /// Set when the last run ended with a new best, for the game-over panel.
    pub new_best: bool,
}

impl FlightState {
    /// Create a fresh state on the start screen.
    pub fn new(config: &GameConfig, best: u32) -> Self {
        Self {
            phase: Phase::Start,
            bird: Bird {
                x: config.bird_x,
                y: config.bird_start_y,
                velocity: 0.0,
            },
            pipes: Vec::new(),
            score: 0,
            best,
            frame: 0,
            new_best: false,
        }
    }

    /// Clear everything transient, keeping the best score.
    pub fn reset(&mut self, config: &GameConfig) {
        *self = FlightState::new(config, self.best);
    }

    pub fn is_playing(&self) -> bool {
        self.phase == Phase::Playing
    }
}
