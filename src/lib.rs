//! Flappy - Terminal Flappy Bird Library
//!
//! This module exposes the game logic for testing and for the binary.

pub mod core;
pub mod game;
pub mod input;
pub mod ui;
pub mod utils;

pub use crate::core::config::{GameConfig, SpawnRule};
pub use game::{FlightEvent, FlightInput, FlightState, Phase, Session};
