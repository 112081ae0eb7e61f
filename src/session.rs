//! Session controller
//!
//! Owns the game state and the HUD, and drives the cooperative frame loop:
//! cap the frame rate, drain discrete input, sample held keys, tick the
//! simulation, log its events, redraw. Everything runs to completion within
//! the tick; cancellation is a quit event observed at the next drain.

use std::error::Error;
use std::fmt;
use std::thread;
use std::time::{Duration, Instant};

use glam::Vec2;

use crate::config::GameConfig;
use crate::hud::{Alignment, Readout, SessionStats, countdown_value, score_value};
use crate::input::{InputEvent, InputSource, Key, held_directions};
use crate::render::{Color, RenderError, Renderer, Sprite, Visual};
use crate::sim::{Entity, GameEvent, GameState, TickInput, tick};

const BACKGROUND: Color = Color::BLACK;
const QUARRY_COLOR: Color = Color::RED;
const CATCHER_COLOR: Color = Color::BLUE;

/// Session failures; the controller refuses to start a degraded session
#[derive(Debug)]
pub enum SessionError {
    Renderer(RenderError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Renderer(err) => write!(f, "renderer: {err}"),
        }
    }
}

impl Error for SessionError {}

impl From<RenderError> for SessionError {
    fn from(err: RenderError) -> Self {
        SessionError::Renderer(err)
    }
}

/// Final session outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionReport {
    pub score: u32,
    pub elapsed_ms: u32,
}

impl SessionReport {
    pub fn elapsed_seconds(&self) -> f32 {
        self.elapsed_ms as f32 / 1000.0
    }
}

impl fmt::Display for SessionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} in {:.2} seconds", self.score, self.elapsed_seconds())
    }
}

/// Caps the loop to a target frame rate with a bounded sleep and reports
/// measured frame durations.
#[derive(Debug)]
pub struct FrameClock {
    period: Duration,
    last: Instant,
}

impl FrameClock {
    pub fn new(frame_rate: u32) -> Self {
        Self {
            period: Duration::from_secs_f64(1.0 / frame_rate.max(1) as f64),
            last: Instant::now(),
        }
    }

    /// Sleep out the rest of the frame budget, then return the measured
    /// milliseconds since the previous tick
    pub fn tick(&mut self) -> u32 {
        let target = self.last + self.period;
        let now = Instant::now();
        if now < target {
            thread::sleep(target - now);
        }
        let now = Instant::now();
        let dt = now.duration_since(self.last);
        self.last = now;
        dt.as_millis() as u32
    }
}

/// Top-level controller for one game session
#[derive(Debug)]
pub struct Session {
    state: GameState,
    score_readout: Readout,
    clock_readout: Readout,
    autopilot: bool,
}

impl Session {
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let mut state = GameState::new(seed, config);
        let field = config.field;

        // Score centered at midbottom, countdown centered at midtop
        let score_id = state.next_entity_id();
        let score_readout = Readout::new(
            score_id,
            Vec2::new(field.width / 2.0, field.height),
            Alignment {
                center_x: true,
                anchor_bottom: true,
            },
            score_value,
        );
        let clock_id = state.next_entity_id();
        let clock_readout = Readout::new(
            clock_id,
            Vec2::new(field.width / 2.0, 0.0),
            Alignment {
                center_x: true,
                anchor_bottom: false,
            },
            countdown_value,
        );

        Self {
            state,
            score_readout,
            clock_readout,
            autopilot: false,
        }
    }

    /// Let the demo AI play instead of the held keys
    pub fn set_autopilot(&mut self, on: bool) {
        self.autopilot = on;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn report(&self) -> SessionReport {
        SessionReport {
            score: self.state.score,
            elapsed_ms: self.state.elapsed_ms,
        }
    }

    fn stats(&self) -> SessionStats {
        SessionStats {
            score: self.state.score,
            time_remaining_ms: self.state.time_remaining_ms(),
        }
    }

    /// Run the session to completion at the configured frame rate.
    ///
    /// Returns the final report when the player quits; startup failures
    /// refuse the session.
    pub fn run<I, R>(&mut self, input: &mut I, renderer: &mut R) -> Result<SessionReport, SessionError>
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let field = self.state.config.field;
        renderer.init_surface(field.width, field.height)?;
        renderer.fill(BACKGROUND, field.bounds());

        let mut clock = FrameClock::new(self.state.config.frame_rate);
        loop {
            let dt_ms = clock.tick();
            if !self.step(dt_ms, input, renderer)? {
                break;
            }
        }

        let report = self.report();
        log::info!("session over: {report}");
        Ok(report)
    }

    /// One frame: drain input, tick, log, redraw.
    ///
    /// Returns `false` once the session should end.
    pub fn step<I, R>(
        &mut self,
        dt_ms: u32,
        input: &mut I,
        renderer: &mut R,
    ) -> Result<bool, SessionError>
    where
        I: InputSource + ?Sized,
        R: Renderer + ?Sized,
    {
        let mut tick_input = TickInput {
            autopilot: self.autopilot,
            ..Default::default()
        };

        // Discrete events first; quit ends the session immediately
        for event in input.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => return Ok(false),
                InputEvent::KeyDown(Key::FlipLeft) => tick_input.flip_left = true,
                InputEvent::KeyDown(Key::FlipRight) => tick_input.flip_right = true,
                InputEvent::KeyDown(_) => {}
            }
        }
        tick_input.pressed = held_directions(input);

        tick(&mut self.state, &tick_input, dt_ms);
        self.log_events();
        self.redraw(renderer)?;
        Ok(true)
    }

    fn log_events(&mut self) {
        for event in self.state.drain_events() {
            match event {
                GameEvent::Caught { quarry } => {
                    log::debug!("caught quarry {quarry}, score {}", self.state.score);
                }
                GameEvent::Escaped { quarry } => log::debug!("quarry {quarry} escaped"),
                GameEvent::Squished { quarry } => log::debug!("quarry {quarry} squished"),
                GameEvent::Respawned { quarry } => log::trace!("quarry {quarry} spawned"),
                GameEvent::Flipped {
                    catcher,
                    orientation,
                } => log::debug!("catcher {catcher} flipped to {orientation:?}"),
                GameEvent::TimeExpired => {
                    log::info!("time up, frozen at score {}", self.state.score);
                }
            }
        }
    }

    fn redraw<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> Result<(), SessionError> {
        let stats = self.stats();
        self.score_readout.refresh(&stats, renderer)?;
        self.clock_readout.refresh(&stats, renderer)?;

        let mut sprites = Vec::new();
        for quarry in &self.state.quarries {
            sprites.push(Sprite {
                id: quarry.id,
                rect: quarry.rect(),
                visual: Visual::Solid(QUARRY_COLOR),
            });
        }
        for catcher in &self.state.catchers {
            sprites.push(Sprite {
                id: catcher.id,
                rect: catcher.rect(),
                visual: Visual::Solid(CATCHER_COLOR),
            });
        }
        sprites.extend(self.score_readout.sprite());
        sprites.extend(self.clock_readout.sprite());

        let dirty = renderer.draw_entities(&sprites);
        renderer.present(&dirty);
        Ok(())
    }
}
