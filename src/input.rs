//! Input source abstraction
//!
//! The session drains discrete events (quit, flip presses) every frame and
//! then samples the currently held movement keys. Real event-queue plumbing
//! lives behind [`InputSource`]; the crate ships a scripted implementation
//! for the demo binary and the tests.

use std::collections::HashSet;

use crate::sim::DirectionSet;

/// Logical keys the game reacts to. Physical bindings (e.g. the two
/// alternate flip-left keys of the reference build) are the input source's
/// concern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    FlipLeft,
    FlipRight,
    Escape,
}

/// A discrete input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window close or equivalent: end the session
    Quit,
    KeyDown(Key),
}

/// External input collaborator
pub trait InputSource {
    /// Drain the discrete events that arrived since the last poll
    fn poll_events(&mut self) -> Vec<InputEvent>;

    /// Current held state of a logical key
    fn is_pressed(&self, key: Key) -> bool;
}

/// Sample the four held movement directions from an input source
pub fn held_directions<I: InputSource + ?Sized>(input: &I) -> DirectionSet {
    DirectionSet {
        right: input.is_pressed(Key::Right),
        left: input.is_pressed(Key::Left),
        up: input.is_pressed(Key::Up),
        down: input.is_pressed(Key::Down),
    }
}

/// Scripted input for headless runs: queued events, a held-key set and an
/// optional frame budget after which it reports quit.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    pending: Vec<InputEvent>,
    held: HashSet<Key>,
    frames_left: Option<u64>,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Input that reports [`InputEvent::Quit`] after `frames` polls
    pub fn quit_after(frames: u64) -> Self {
        Self {
            frames_left: Some(frames),
            ..Self::default()
        }
    }

    /// Queue an event for the next poll
    pub fn queue(&mut self, event: InputEvent) {
        self.pending.push(event);
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }
}

impl InputSource for ScriptedInput {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = std::mem::take(&mut self.pending);
        if let Some(frames) = &mut self.frames_left {
            if *frames == 0 {
                events.push(InputEvent::Quit);
            } else {
                *frames -= 1;
            }
        }
        events
    }

    fn is_pressed(&self, key: Key) -> bool {
        self.held.contains(&key)
    }
}
