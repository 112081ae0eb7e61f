//! Game state and core simulation types

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::{FieldConfig, GameConfig};

use super::entity::Entity;
use super::rect::Rect;
use super::tick::DirectionSet;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Countdown running, simulation active
    Running,
    /// Countdown expired: simulation and flips suppressed, the frozen frame
    /// keeps rendering and only quit input is honored (by the controller)
    Frozen,
}

/// Simulation events drained by the controller each frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Caught { quarry: u32 },
    Escaped { quarry: u32 },
    Squished { quarry: u32 },
    Respawned { quarry: u32 },
    Flipped { catcher: u32, orientation: Orientation },
    TimeExpired,
}

/// Discrete rotation state of a catcher.
///
/// Ordered left-to-right; flipping clamps at either end rather than
/// wrapping. There is no `Bottom`: the reference build disables it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Left,
    Top,
    Right,
}

impl Orientation {
    const ORDER: [Orientation; 3] = [Orientation::Left, Orientation::Top, Orientation::Right];

    fn index(self) -> usize {
        match self {
            Orientation::Left => 0,
            Orientation::Top => 1,
            Orientation::Right => 2,
        }
    }

    /// Step through the order; `None` when the step leaves the sequence
    pub fn offset(self, step: i32) -> Option<Orientation> {
        let idx = self.index() as i32 + step;
        if (0..Self::ORDER.len() as i32).contains(&idx) {
            Some(Self::ORDER[idx as usize])
        } else {
            None
        }
    }
}

/// Collision footprint for one orientation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Footprint {
    pub width: f32,
    pub height: f32,
}

/// Per-axis-direction velocity components with asymmetric shaping: slow
/// linear acceleration while held, faster decay when released. Gives the
/// catcher "sticky" directional control with inertia.
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectionalVelocity {
    pub right: f32,
    pub left: f32,
    pub up: f32,
    pub down: f32,
}

impl DirectionalVelocity {
    /// Advance each component one tick from the held-direction set
    pub fn integrate(&mut self, pressed: DirectionSet, config: &GameConfig) {
        let held = [
            (&mut self.right, pressed.right),
            (&mut self.left, pressed.left),
            (&mut self.up, pressed.up),
            (&mut self.down, pressed.down),
        ];
        for (component, held) in held {
            if held {
                *component = (*component + config.axis_accel).min(config.axis_max_speed);
            } else {
                *component = (*component - config.axis_decay).max(0.0);
            }
        }
    }

    /// Net motion for this tick
    pub fn net(&self) -> Vec2 {
        Vec2::new(self.right - self.left, self.down - self.up)
    }
}

/// The player-controlled entity ("blue brick")
#[derive(Debug, Clone)]
pub struct Catcher {
    pub id: u32,
    pub rect: Rect,
    pub orientation: Orientation,
    /// Per-orientation footprint table, built once at construction
    footprints: [Footprint; 3],
    pub vel: DirectionalVelocity,
}

impl Catcher {
    /// Create a catcher from its `Top`-orientation rect
    pub fn new(id: u32, rect: Rect) -> Self {
        let flat = Footprint {
            width: rect.width,
            height: rect.height,
        };
        let tall = Footprint {
            width: rect.height,
            height: rect.width,
        };
        Self {
            id,
            rect,
            orientation: Orientation::Top,
            footprints: [tall, flat, tall],
            vel: DirectionalVelocity::default(),
        }
    }

    /// Footprint for the current orientation
    pub fn footprint(&self) -> Footprint {
        self.footprints[self.orientation.index()]
    }

    /// Cycle orientation by `step`, clamping at the ends of the order.
    ///
    /// An in-range transition rotates the footprint about the unchanged
    /// center. Returns whether the orientation changed.
    pub fn flip(&mut self, step: i32) -> bool {
        let Some(next) = self.orientation.offset(step) else {
            return false;
        };
        if next == self.orientation {
            return false;
        }
        self.orientation = next;
        let footprint = self.footprint();
        self.rect
            .resize_about_center(footprint.width, footprint.height);
        true
    }

    /// Integrate velocity one tick from the held-direction set
    pub fn apply_input(&mut self, pressed: DirectionSet, config: &GameConfig) {
        self.vel.integrate(pressed, config);
    }

    /// Translate then clamp into the field
    pub fn shift(&mut self, delta: Vec2, field: &FieldConfig) {
        self.rect.translate(delta);
        self.rect.clamp_into(&field.bounds());
    }
}

impl Entity for Catcher {
    fn rect(&self) -> Rect {
        self.rect
    }

    fn advance(&mut self, _field: &FieldConfig) {
        // Movement is input-driven; nothing autonomous per tick.
    }
}

/// The bouncing target entity ("red brick" / butterfly)
#[derive(Debug, Clone)]
pub struct Quarry {
    pub id: u32,
    pub rect: Rect,
    pub speed: f32,
    /// Vertical travel direction: -1 up, +1 down
    pub direction: f32,
    pub alive: bool,
}

impl Quarry {
    pub fn new(id: u32, rect: Rect, speed: f32, rng: &mut Pcg32) -> Self {
        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        Self {
            id,
            rect,
            speed,
            direction,
            alive: true,
        }
    }

    /// Smashed against a field edge; removed from the active set next sweep
    pub fn squish(&mut self) {
        self.alive = false;
    }
}

impl Entity for Quarry {
    fn rect(&self) -> Rect {
        self.rect
    }

    /// Bounce vertically between the field's top and bottom edges.
    ///
    /// A quarry never ends a tick outside the field: the tick that would
    /// carry it out reverses the direction and clamps it back in.
    fn advance(&mut self, field: &FieldConfig) {
        self.rect
            .translate(Vec2::new(0.0, self.speed * self.direction));

        let bounds = field.bounds();
        if self.rect.bottom() >= bounds.bottom() || self.rect.top() <= bounds.top() {
            self.direction = -self.direction;
            self.rect.clamp_into(&bounds);
        }
    }
}

/// Complete session state (deterministic, seeded)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Session seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub config: GameConfig,
    pub phase: GamePhase,
    /// Score, incremented once per catch
    pub score: u32,
    /// Countdown progress, integrated from measured frame durations
    pub elapsed_ms: u32,
    pub catchers: Vec<Catcher>,
    pub quarries: Vec<Quarry>,
    /// Pending events, drained by the controller
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a session with the reference entity layout
    pub fn new(seed: u64, config: GameConfig) -> Self {
        let mut state = Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            config,
            phase: GamePhase::Running,
            score: 0,
            elapsed_ms: 0,
            catchers: Vec::new(),
            quarries: Vec::new(),
            events: Vec::new(),
            next_id: 1,
        };

        let field = config.field;
        let ptx = field.ptx();

        for i in 0..config.quarry_count {
            let rect = Rect::new(
                5.0 * ptx + 7.0 * ptx * i as f32,
                field.height / 2.0,
                ptx,
                ptx,
            )
            .clamped_into(&field.bounds());
            state.spawn_quarry_at(rect);
        }

        // One catcher at midbottom
        let rect = Rect::new(
            field.width / 2.0 - 2.0 * ptx,
            field.height - 5.0 * ptx,
            4.0 * ptx,
            ptx,
        );
        let id = state.next_entity_id();
        state.catchers.push(Catcher::new(id, rect));

        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a quarry at the given rect with a random bounce direction
    pub fn spawn_quarry_at(&mut self, rect: Rect) -> u32 {
        let id = self.next_entity_id();
        let quarry = Quarry::new(id, rect, self.config.quarry_speed, &mut self.rng);
        self.quarries.push(quarry);
        id
    }

    /// Spawn a replacement quarry at a uniformly random position, clamped
    /// into the field
    pub fn spawn_quarry_random(&mut self) -> u32 {
        let field = self.config.field;
        let ptx = field.ptx();
        let x = self.rng.random_range(0.0..field.width);
        let y = self.rng.random_range(0.0..field.height);
        let rect = Rect::new(x, y, ptx, ptx).clamped_into(&field.bounds());
        let id = self.spawn_quarry_at(rect);
        self.events.push(GameEvent::Respawned { quarry: id });
        id
    }

    /// Milliseconds left on the countdown
    pub fn time_remaining_ms(&self) -> u32 {
        self.config.time_limit_ms.saturating_sub(self.elapsed_ms)
    }

    /// Take this frame's pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
