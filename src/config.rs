//! Game configuration
//!
//! All field geometry and tuning values are injected into the simulation at
//! construction time; nothing reads module-level mutable state.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::Rect;

/// The playing field: an immutable bounds rectangle fixed for the session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FieldConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            width: FIELD_WIDTH,
            height: FIELD_HEIGHT,
        }
    }
}

impl FieldConfig {
    /// Field bounds as a rectangle anchored at the origin
    pub fn bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    /// Made up unit, in terms of the field size (20 on the reference field)
    pub fn ptx(&self) -> f32 {
        self.width / 32.0
    }
}

/// How a catcher-quarry overlap is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CatchPolicy {
    /// Every overlap is a catch: score, remove, respawn
    #[default]
    Catch,
    /// The quarry flees along the vertical axis instead of being caught
    Escape,
}

/// Tuning values for a session
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GameConfig {
    pub field: FieldConfig,
    /// Quarries alive on the field at once
    pub quarry_count: u32,
    /// Quarry vertical speed (units per tick)
    pub quarry_speed: f32,
    /// Per-axis catcher velocity cap (units per tick)
    pub axis_max_speed: f32,
    /// Velocity gained per tick while a direction is held
    pub axis_accel: f32,
    /// Velocity lost per tick while a direction is released
    pub axis_decay: f32,
    /// Session countdown (milliseconds)
    pub time_limit_ms: u32,
    /// Frame rate cap for the session loop
    pub frame_rate: u32,
    pub catch_policy: CatchPolicy,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            field: FieldConfig::default(),
            quarry_count: QUARRY_COUNT,
            quarry_speed: QUARRY_SPEED,
            axis_max_speed: AXIS_MAX_SPEED,
            axis_accel: AXIS_ACCEL,
            axis_decay: AXIS_DECAY,
            time_limit_ms: TIME_LIMIT_MS,
            frame_rate: FRAME_RATE,
            catch_policy: CatchPolicy::default(),
        }
    }
}

impl GameConfig {
    /// Load config from a JSON file, falling back to defaults on any failure
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    config
                }
                Err(err) => {
                    log::warn!("Bad config {}: {err}, using defaults", path.display());
                    Self::default()
                }
            },
            Err(err) => {
                log::warn!("Cannot read {}: {err}, using defaults", path.display());
                Self::default()
            }
        }
    }
}
