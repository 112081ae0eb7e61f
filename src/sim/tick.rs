//! Per-frame simulation step
//!
//! Advances one frame of the session deterministically: countdown, flips,
//! velocity integration, movement, bouncing, collision resolution. The
//! controller samples input and measures the frame duration; nothing here
//! touches the platform.

use std::cmp::Ordering;

use super::collision::resolve_collisions;
use super::entity::Entity;
use super::state::{GameEvent, GamePhase, GameState};

/// Autopilot ignores target offsets smaller than this (units)
const CHASE_DEAD_ZONE: f32 = 4.0;

/// Held movement directions sampled from the input source
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DirectionSet {
    pub right: bool,
    pub left: bool,
    pub up: bool,
    pub down: bool,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Currently held movement directions
    pub pressed: DirectionSet,
    /// Step every catcher one orientation to the left this tick
    pub flip_left: bool,
    /// Step every catcher one orientation to the right this tick
    pub flip_right: bool,
    /// Demo mode: synthesize chase input toward the nearest quarry
    pub autopilot: bool,
}

/// Advance the game state by one frame of `dt_ms` measured milliseconds
pub fn tick(state: &mut GameState, input: &TickInput, dt_ms: u32) {
    // Frozen sessions only render; quit is handled by the controller
    if state.phase == GamePhase::Frozen {
        return;
    }

    state.elapsed_ms = state.elapsed_ms.saturating_add(dt_ms);
    if state.elapsed_ms >= state.config.time_limit_ms {
        state.phase = GamePhase::Frozen;
        state.events.push(GameEvent::TimeExpired);
        return;
    }

    let mut input = *input;
    if input.autopilot {
        chase_nearest_quarry(state, &mut input);
    }

    // Orientation flips
    if input.flip_left {
        apply_flip(state, -1);
    }
    if input.flip_right {
        apply_flip(state, 1);
    }

    let config = state.config;

    // Catcher velocity + movement
    for catcher in &mut state.catchers {
        catcher.apply_input(input.pressed, &config);
        let delta = catcher.vel.net();
        catcher.shift(delta, &config.field);
    }

    // Quarry bouncing
    for quarry in &mut state.quarries {
        quarry.advance(&config.field);
    }

    resolve_collisions(state);
}

/// Step every catcher's orientation, recording successful transitions
fn apply_flip(state: &mut GameState, step: i32) {
    for ci in 0..state.catchers.len() {
        if state.catchers[ci].flip(step) {
            let catcher = &state.catchers[ci];
            state.events.push(GameEvent::Flipped {
                catcher: catcher.id,
                orientation: catcher.orientation,
            });
        }
    }
}

/// Demo AI: hold the directions that close the gap to the nearest quarry
fn chase_nearest_quarry(state: &GameState, input: &mut TickInput) {
    let Some(catcher) = state.catchers.first() else {
        return;
    };
    let center = catcher.rect.center();

    let target = state
        .quarries
        .iter()
        .filter(|q| q.alive)
        .min_by(|a, b| {
            let da = (a.rect.center() - center).length_squared();
            let db = (b.rect.center() - center).length_squared();
            da.partial_cmp(&db).unwrap_or(Ordering::Equal)
        });
    let Some(target) = target else {
        return;
    };

    let delta = target.rect.center() - center;
    input.pressed = DirectionSet {
        right: delta.x > CHASE_DEAD_ZONE,
        left: delta.x < -CHASE_DEAD_ZONE,
        down: delta.y > CHASE_DEAD_ZONE,
        up: delta.y < -CHASE_DEAD_ZONE,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::Rect;
    use proptest::prelude::*;

    const FRAME_MS: u32 = 16;

    fn test_state(seed: u64) -> GameState {
        GameState::new(seed, GameConfig::default())
    }

    #[test]
    fn test_timer_reaches_frozen() {
        let mut config = GameConfig::default();
        config.time_limit_ms = 100;
        let mut state = GameState::new(1, config);

        tick(&mut state, &TickInput::default(), 60);
        assert_eq!(state.phase, GamePhase::Running);

        tick(&mut state, &TickInput::default(), 60);
        assert_eq!(state.phase, GamePhase::Frozen);
        assert!(state.drain_events().contains(&GameEvent::TimeExpired));
    }

    #[test]
    fn test_frozen_suppresses_scoring_and_flips() {
        let mut config = GameConfig::default();
        config.time_limit_ms = 10;
        let mut state = GameState::new(1, config);
        tick(&mut state, &TickInput::default(), FRAME_MS);
        assert_eq!(state.phase, GamePhase::Frozen);
        state.drain_events();

        // Park a quarry on the catcher and try to flip
        state.quarries[0].rect = state.catchers[0].rect;
        let orientation = state.catchers[0].orientation;
        let input = TickInput {
            flip_left: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);

        assert_eq!(state.score, 0);
        assert_eq!(state.catchers[0].orientation, orientation);
        assert!(state.drain_events().is_empty());
    }

    #[test]
    fn test_catch_increments_score_once() {
        let mut state = test_state(2);
        let catcher_center = state.catchers[0].rect.center();
        state.quarries[0].rect =
            Rect::new(catcher_center.x - 10.0, catcher_center.y - 10.0, 20.0, 20.0);

        tick(&mut state, &TickInput::default(), FRAME_MS);

        assert_eq!(state.score, 1);
        assert_eq!(state.quarries.len(), 4);
    }

    #[test]
    fn test_flip_emits_event() {
        let mut state = test_state(3);
        let input = TickInput {
            flip_right: true,
            ..Default::default()
        };
        tick(&mut state, &input, FRAME_MS);

        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Flipped {
                orientation: crate::sim::Orientation::Right,
                ..
            }
        )));
    }

    #[test]
    fn test_catcher_stays_in_field() {
        let mut state = test_state(4);
        let bounds = state.config.field.bounds();
        let input = TickInput {
            pressed: DirectionSet {
                down: true,
                right: true,
                ..Default::default()
            },
            ..Default::default()
        };

        for _ in 0..200 {
            tick(&mut state, &input, FRAME_MS);
            assert!(state.catchers[0].rect.contained_in(&bounds));
        }
        // Pinned to the bottom-right corner
        assert_eq!(state.catchers[0].rect.right(), bounds.right());
        assert_eq!(state.catchers[0].rect.bottom(), bounds.bottom());
    }

    #[test]
    fn test_autopilot_closes_gap() {
        let mut state = test_state(5);
        // One quarry far to the left of the catcher, none elsewhere
        state.quarries.truncate(1);
        state.quarries[0].rect = Rect::new(40.0, 380.0, 20.0, 20.0);
        let start_x = state.catchers[0].rect.center().x;

        let input = TickInput {
            autopilot: true,
            ..Default::default()
        };
        for _ in 0..10 {
            tick(&mut state, &input, FRAME_MS);
        }
        assert!(state.catchers[0].rect.center().x < start_x);
    }

    #[test]
    fn test_determinism() {
        // Two states with the same seed produce identical runs
        let mut state1 = test_state(99_999);
        let mut state2 = test_state(99_999);

        let inputs = [
            TickInput {
                pressed: DirectionSet {
                    left: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            TickInput {
                flip_right: true,
                ..Default::default()
            },
            TickInput {
                pressed: DirectionSet {
                    up: true,
                    down: true,
                    ..Default::default()
                },
                ..Default::default()
            },
            TickInput::default(),
        ];

        for _ in 0..100 {
            for input in &inputs {
                tick(&mut state1, input, FRAME_MS);
                tick(&mut state2, input, FRAME_MS);
            }
        }

        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.elapsed_ms, state2.elapsed_ms);
        assert_eq!(state1.quarries.len(), state2.quarries.len());
        for (a, b) in state1.quarries.iter().zip(&state2.quarries) {
            assert_eq!(a.rect, b.rect);
            assert_eq!(a.direction, b.direction);
        }
        assert_eq!(state1.catchers[0].rect, state2.catchers[0].rect);
    }

    proptest! {
        #[test]
        fn prop_axis_velocity_stays_bounded(presses in prop::collection::vec(0u8..16, 1..120)) {
            let mut state = test_state(8);
            for mask in presses {
                let input = TickInput {
                    pressed: DirectionSet {
                        right: mask & 1 != 0,
                        left: mask & 2 != 0,
                        up: mask & 4 != 0,
                        down: mask & 8 != 0,
                    },
                    ..Default::default()
                };
                tick(&mut state, &input, FRAME_MS);

                let vel = state.catchers[0].vel;
                for component in [vel.right, vel.left, vel.up, vel.down] {
                    prop_assert!((0.0..=16.0).contains(&component));
                }
            }
        }
    }
}
