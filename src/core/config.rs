//! Playfield and physics parameters.
//!
//! The defaults are the single authoritative parameter set (see
//! [`crate::core::constants`]). Any field may be overridden from
//! `~/.flappy/config.json`; omitted fields keep their defaults.

use super::constants::*;
use crate::utils::persistence::load_json_or_default_at;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// When a new pipe pair enters the playfield.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SpawnRule {
    /// Spawn every `ticks` frames, counted from the start of the run.
    Interval { ticks: u64 },
    /// Spawn once the newest pipe has travelled `distance` units in from the right edge.
    Spacing { distance: f64 },
}

impl Default for SpawnRule {
    fn default() -> Self {
        SpawnRule::Interval {
            ticks: PIPE_SPAWN_INTERVAL_TICKS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub field_width: f64,
    pub field_height: f64,
    pub bird_x: f64,
    pub bird_start_y: f64,
    pub bird_size: f64,
    pub gravity: f64,
    /// Velocity set (not added) on every flap. Negative is upward.
    pub jump_velocity: f64,
    pub pipe_speed: f64,
    pub pipe_width: f64,
    pub pipe_gap: f64,
    /// Minimum distance between the gap and the top/bottom edges.
    pub gap_margin: f64,
    pub spawn: SpawnRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            bird_x: BIRD_X,
            bird_start_y: BIRD_START_Y,
            bird_size: BIRD_SIZE,
            gravity: GRAVITY,
            jump_velocity: JUMP_VELOCITY,
            pipe_speed: PIPE_SPEED,
            pipe_width: PIPE_WIDTH,
            pipe_gap: PIPE_GAP,
            gap_margin: PIPE_GAP_MARGIN,
            spawn: SpawnRule::default(),
        }
    }
}

impl GameConfig {
    /// Vertical range available to a gap's top edge, above `gap_margin`.
    pub fn gap_top_range(&self) -> f64 {
        self.field_height - self.pipe_gap - 2.0 * self.gap_margin
    }

    /// Check that the parameters describe a playable field.
    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("bird_size", self.bird_size),
            ("pipe_speed", self.pipe_speed),
            ("pipe_width", self.pipe_width),
            ("pipe_gap", self.pipe_gap),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(format!("{} must be a positive number", name));
            }
        }

        if !(self.gravity.is_finite() && self.gravity >= 0.0) {
            return Err("gravity must not be negative".to_string());
        }
        if !(self.jump_velocity.is_finite() && self.jump_velocity < 0.0) {
            return Err("jump_velocity must be negative (upward)".to_string());
        }
        if !(self.gap_margin.is_finite() && self.gap_margin >= 0.0) {
            return Err("gap_margin must not be negative".to_string());
        }
        if self.gap_top_range() < 0.0 {
            return Err(format!(
                "pipe_gap ({}) plus twice gap_margin ({}) does not fit in field_height ({})",
                self.pipe_gap, self.gap_margin, self.field_height
            ));
        }
        if self.bird_x < 0.0 || self.bird_x + self.bird_size > self.field_width {
            return Err("bird_x places the bird outside the field".to_string());
        }
        if self.bird_start_y <= 0.0 || self.bird_start_y + self.bird_size >= self.field_height {
            return Err("bird_start_y must keep the bird clear of ceiling and ground".to_string());
        }

        match self.spawn {
            SpawnRule::Interval { ticks } if ticks == 0 => {
                Err("spawn interval must be at least one tick".to_string())
            }
            SpawnRule::Spacing { distance } if !(distance.is_finite() && distance > 0.0) => {
                Err("spawn spacing must be a positive distance".to_string())
            }
            _ => Ok(()),
        }
    }

    /// Load overrides from `path`, falling back to the defaults.
    ///
    /// A missing or unparsable file silently yields the defaults. A file that
    /// parses but fails validation also yields the defaults, together with the
    /// validation message so the caller can report it.
    pub fn load_or_default(path: &Path) -> (Self, Option<String>) {
        let config: GameConfig = load_json_or_default_at(path);
        match config.validate() {
            Ok(()) => (config, None),
            Err(e) => (
                GameConfig::default(),
                Some(format!("Ignoring {}: {}", path.display(), e)),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(GameConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_gap_range() {
        let config = GameConfig::default();
        // 500 - 150 - 2 * 50
        assert!((config.gap_top_range() - 250.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gap_too_large_rejected() {
        let config = GameConfig {
            pipe_gap: 450.0,
            ..GameConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("pipe_gap"));
    }

    #[test]
    fn test_upward_gravity_rejected() {
        let config = GameConfig {
            gravity: -1.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_downward_jump_rejected() {
        let config = GameConfig {
            jump_velocity: 4.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_interval_rejected() {
        let config = GameConfig {
            spawn: SpawnRule::Interval { ticks: 0 },
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"gravity": 0.25, "spawn": {"kind": "spacing", "distance": 300.0}}"#;
        let config: GameConfig = serde_json::from_str(json).unwrap();
        assert!((config.gravity - 0.25).abs() < f64::EPSILON);
        assert_eq!(config.spawn, SpawnRule::Spacing { distance: 300.0 });
        assert!((config.pipe_gap - PIPE_GAP).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file_returns_default() {
        let path = std::env::temp_dir().join("flappy_config_missing_12345.json");
        let (config, warning) = GameConfig::load_or_default(&path);
        assert_eq!(config, GameConfig::default());
        assert!(warning.is_none());
    }

    #[test]
    fn test_load_invalid_file_warns() {
        let path = std::env::temp_dir().join(format!(
            "flappy_config_invalid_{}.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"pipe_speed": -3.0}"#).unwrap();

        let (config, warning) = GameConfig::load_or_default(&path);
        assert_eq!(config, GameConfig::default());
        assert!(warning.unwrap().contains("pipe_speed"));

        std::fs::remove_file(path).ok();
    }
}
