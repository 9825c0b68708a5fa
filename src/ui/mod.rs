pub mod flappy_scene;
pub mod game_common;

use crate::core::config::GameConfig;
use crate::game::types::FlightState;
use ratatui::{layout::Rect, Frame};

/// Main UI drawing function. Returns the play area for mouse hit-testing.
pub fn draw_ui(frame: &mut Frame, state: &FlightState, config: &GameConfig) -> Rect {
    let size = frame.size();
    flappy_scene::render_flappy(frame, size, state, config)
}
