//! Catch and escape resolution
//!
//! The tricky part of the game: a quarry overlapped by a catcher either gets
//! caught (scored, removed, replaced) or flees along the vertical axis in
//! catcher-height steps until the overlap ends or a field edge squishes it.

use glam::Vec2;

use crate::config::{CatchPolicy, FieldConfig};

use super::rect::Rect;
use super::state::{GameEvent, GameState, Quarry};

/// Forced-flee response to an overlap with a catcher.
///
/// Each iteration either ends the overlap or moves the quarry one catcher
/// height strictly toward a field edge, where it is squished; perfectly
/// level centers are broken by a 1-unit downward nudge. Returns whether the
/// quarry survived.
pub fn escape_from(quarry: &mut Quarry, catcher_rect: Rect, field: &FieldConfig) -> bool {
    let bounds = field.bounds();

    while quarry.rect.collides(&catcher_rect) {
        let offset = quarry.rect.center().y - catcher_rect.center().y;

        if offset > 0.0 {
            // Catcher is above: flee downwards
            quarry.direction = 1.0;
            quarry.rect.translate(Vec2::new(0.0, catcher_rect.height));
            if quarry.rect.bottom() >= bounds.bottom() {
                quarry.squish();
                return false;
            }
        } else if offset < 0.0 {
            // Catcher is below: flee upwards
            quarry.direction = -1.0;
            quarry.rect.translate(Vec2::new(0.0, -catcher_rect.height));
            if quarry.rect.top() <= bounds.top() {
                quarry.squish();
                return false;
            }
        } else {
            // Centers exactly level: nudge down 1 unit to break the tie
            quarry.rect.translate(Vec2::new(0.0, 1.0));
        }
    }

    true
}

/// Resolve every currently colliding (catcher, quarry) pair.
///
/// Under [`CatchPolicy::Catch`] each overlap scores a point, squishes the
/// quarry and queues a replacement; under [`CatchPolicy::Escape`] the quarry
/// runs its escape loop and only a squished escapee is replaced. Dead
/// quarries are swept afterwards, so the active set never carries corpses
/// into the next tick.
pub fn resolve_collisions(state: &mut GameState) {
    let catcher_rects: Vec<Rect> = state.catchers.iter().map(|c| c.rect).collect();
    let policy = state.config.catch_policy;
    let field = state.config.field;

    let mut replacements = 0;

    for &catcher_rect in &catcher_rects {
        for qi in 0..state.quarries.len() {
            let (qid, live_hit) = {
                let quarry = &state.quarries[qi];
                (
                    quarry.id,
                    quarry.alive && quarry.rect.collides(&catcher_rect),
                )
            };
            if !live_hit {
                continue;
            }

            match policy {
                CatchPolicy::Catch => {
                    state.quarries[qi].squish();
                    state.score += 1;
                    state.events.push(GameEvent::Caught { quarry: qid });
                    replacements += 1;
                }
                CatchPolicy::Escape => {
                    if escape_from(&mut state.quarries[qi], catcher_rect, &field) {
                        state.events.push(GameEvent::Escaped { quarry: qid });
                    } else {
                        state.events.push(GameEvent::Squished { quarry: qid });
                        replacements += 1;
                    }
                }
            }
        }
    }

    state.quarries.retain(|q| q.alive);
    for _ in 0..replacements {
        state.spawn_quarry_random();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn quarry_at(rect: Rect) -> Quarry {
        let mut rng = Pcg32::seed_from_u64(5);
        Quarry::new(1, rect, 10.0, &mut rng)
    }

    #[test]
    fn test_escape_flees_downwards_and_survives() {
        let field = FieldConfig::default();
        let catcher = Rect::new(220.0, 340.0, 80.0, 20.0);
        // Quarry center below the catcher center
        let mut quarry = quarry_at(Rect::new(250.0, 345.0, 20.0, 20.0));

        assert!(escape_from(&mut quarry, catcher, &field));
        assert!(quarry.alive);
        assert!(!quarry.rect.collides(&catcher));
        assert_eq!(quarry.direction, 1.0);
        assert!(quarry.rect.top() > catcher.bottom());
    }

    #[test]
    fn test_escape_flees_upwards() {
        let field = FieldConfig::default();
        let catcher = Rect::new(220.0, 340.0, 80.0, 20.0);
        let mut quarry = quarry_at(Rect::new(250.0, 325.0, 20.0, 20.0));

        assert!(escape_from(&mut quarry, catcher, &field));
        assert!(!quarry.rect.collides(&catcher));
        assert_eq!(quarry.direction, -1.0);
    }

    #[test]
    fn test_escape_squished_at_bottom_edge() {
        let field = FieldConfig::default();
        // Catcher low on the field, quarry trapped beneath its center
        let catcher = Rect::new(220.0, 440.0, 80.0, 20.0);
        let mut quarry = quarry_at(Rect::new(250.0, 455.0, 20.0, 20.0));

        assert!(!escape_from(&mut quarry, catcher, &field));
        assert!(!quarry.alive);
    }

    #[test]
    fn test_escape_tie_break_terminates() {
        let field = FieldConfig::default();
        let catcher = Rect::new(220.0, 340.0, 80.0, 20.0);
        // Centers exactly level: catcher center (260, 350), quarry center
        // starts at (260, 350) too
        let mut quarry = quarry_at(Rect::new(250.0, 340.0, 20.0, 20.0));
        assert_eq!(quarry.rect.center(), catcher.center());

        assert!(escape_from(&mut quarry, catcher, &field));
        assert!(!quarry.rect.collides(&catcher));
    }

    #[test]
    fn test_catch_scores_and_replaces() {
        let mut state = GameState::new(11, GameConfig::default());
        let before = state.quarries.len();

        // Park a quarry on the catcher
        let catcher_rect = state.catchers[0].rect;
        state.quarries[0].rect = Rect::new(catcher_rect.x, catcher_rect.y, 20.0, 20.0);
        let caught_id = state.quarries[0].id;

        resolve_collisions(&mut state);

        assert_eq!(state.score, 1);
        assert_eq!(state.quarries.len(), before);
        assert!(state.quarries.iter().all(|q| q.id != caught_id));
        let bounds = state.config.field.bounds();
        assert!(state.quarries.iter().all(|q| q.rect.contained_in(&bounds)));

        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Caught { quarry: caught_id }));
        assert!(
            events
                .iter()
                .any(|e| matches!(e, GameEvent::Respawned { .. }))
        );
    }

    #[test]
    fn test_escape_policy_does_not_score() {
        let mut config = GameConfig::default();
        config.catch_policy = CatchPolicy::Escape;
        let mut state = GameState::new(11, config);

        let catcher_rect = state.catchers[0].rect;
        state.quarries[0].rect = Rect::new(catcher_rect.x, catcher_rect.y + 8.0, 20.0, 20.0);

        resolve_collisions(&mut state);

        assert_eq!(state.score, 0);
        let events = state.drain_events();
        assert!(events.iter().any(|e| matches!(e, GameEvent::Escaped { .. })));
    }
}
