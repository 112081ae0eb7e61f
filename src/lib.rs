//! Butterfly Catcher - a timed catch-the-bouncer arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, entities, collisions, game state)
//! - `session`: Frame-paced game loop driving input, sim and rendering
//! - `render`: Renderer abstraction (dirty-rectangle contract) + headless impl
//! - `input`: Input source abstraction (discrete events + held keys)
//! - `hud`: Memoized text readouts for score and countdown
//! - `config`: Injected field/tuning configuration

pub mod config;
pub mod hud;
pub mod input;
pub mod render;
pub mod session;
pub mod sim;

pub use config::{CatchPolicy, FieldConfig, GameConfig};
pub use session::{Session, SessionReport};

/// Game configuration constants (reference build values)
pub mod consts {
    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 640.0;
    pub const FIELD_HEIGHT: f32 = 480.0;

    /// Frame rate cap for the session loop
    pub const FRAME_RATE: u32 = 60;

    /// Session countdown length
    pub const TIME_LIMIT_MS: u32 = 30_000;

    /// Quarry vertical speed (units per tick)
    pub const QUARRY_SPEED: f32 = 10.0;
    /// Number of quarries kept alive on the field
    pub const QUARRY_COUNT: u32 = 4;

    /// Catcher velocity shaping: slow linear acceleration, faster decay
    pub const AXIS_ACCEL: f32 = 1.0;
    pub const AXIS_DECAY: f32 = 1.5;
    /// Per-axis velocity cap (units per tick)
    pub const AXIS_MAX_SPEED: f32 = 16.0;
}
