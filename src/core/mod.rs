//! Engine plumbing shared by the simulation and the binary: parameters and frame pacing.

pub mod config;
pub mod constants;
pub mod frame_clock;

pub use config::{GameConfig, SpawnRule};
pub use frame_clock::FrameClock;
