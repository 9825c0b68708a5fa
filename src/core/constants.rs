// Tick and timing
pub const REALTIME_FRAME_MS: u64 = 16; // ~60 FPS, one simulation step per frame
pub const IDLE_POLL_MS: u64 = 50;

// Save files (~/.flappy/)
pub const SAVE_DIR_NAME: &str = ".flappy";
pub const HIGH_SCORE_FILE: &str = "high_score.json";
pub const CONFIG_FILE: &str = "config.json";

// Playfield, in game units
pub const FIELD_WIDTH: f64 = 800.0;
pub const FIELD_HEIGHT: f64 = 500.0;

// Bird
pub const BIRD_X: f64 = 100.0;
pub const BIRD_START_Y: f64 = 250.0;
pub const BIRD_SIZE: f64 = 30.0;

// Physics (per frame)
pub const GRAVITY: f64 = 0.5;
pub const JUMP_VELOCITY: f64 = -10.0;
pub const PIPE_SPEED: f64 = 3.0;

// Pipes
pub const PIPE_WIDTH: f64 = 60.0;
pub const PIPE_GAP: f64 = 150.0;
pub const PIPE_GAP_MARGIN: f64 = 50.0;
pub const PIPE_SPAWN_INTERVAL_TICKS: u64 = 120;
