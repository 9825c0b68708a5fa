//! Flappy Bird flight simulation.
//!
//! The player keeps a bird aloft by flapping while pipe pairs scroll in from
//! the right. Gravity pulls the bird down every frame; touching the ground,
//! the ceiling, or a pipe ends the run.

pub mod high_score;
pub mod logic;
pub mod session;
pub mod types;

pub use high_score::{HighScoreStore, JsonHighScoreStore, MemoryHighScoreStore};
pub use logic::{advance, check_collision, process_input};
pub use session::Session;
pub use types::*;
