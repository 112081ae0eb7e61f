//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick integration only, timer fed from measured frame durations
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod rect;
pub mod state;
pub mod tick;

pub use collision::resolve_collisions;
pub use entity::Entity;
pub use rect::Rect;
pub use state::{
    Catcher, DirectionalVelocity, GameEvent, GamePhase, GameState, Orientation, Quarry,
};
pub use tick::{DirectionSet, TickInput, tick};
