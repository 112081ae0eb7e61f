//! Base capability shared by simulated objects

use crate::config::FieldConfig;

use super::Rect;

/// A simulated object with a position rectangle and a per-frame step.
///
/// Entities live in plain `Vec`s owned by [`GameState`](super::GameState);
/// the controller decides which collections an entity joins when it creates
/// it.
pub trait Entity {
    /// Current position footprint
    fn rect(&self) -> Rect;

    /// One tick of autonomous motion. Input-driven entities leave this empty.
    fn advance(&mut self, field: &FieldConfig);
}
