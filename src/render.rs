//! Renderer abstraction
//!
//! The core never rasterizes: a [`Renderer`] owns the surface, draws the
//! frame's sprites and reports which screen regions changed; the session
//! presents exactly those regions. [`NullRenderer`] is the headless
//! implementation used by the demo binary and the tests - it skips pixels
//! but performs the full dirty-region bookkeeping.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

use crate::sim::Rect;

/// RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Handle and layout of a laid-out line of text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextVisual {
    pub handle: u64,
    pub width: f32,
    pub height: f32,
}

/// What a sprite shows
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Visual {
    Solid(Color),
    Text(TextVisual),
}

/// One renderable entity for a frame
#[derive(Debug, Clone, Copy)]
pub struct Sprite {
    pub id: u32,
    pub rect: Rect,
    pub visual: Visual,
}

/// Renderer failures; all fatal at session startup
#[derive(Debug)]
pub enum RenderError {
    /// Display surface could not be created
    SurfaceInit(String),
    /// Text layout unavailable (e.g. no font support)
    TextLayout(String),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::SurfaceInit(msg) => write!(f, "surface init failed: {msg}"),
            RenderError::TextLayout(msg) => write!(f, "text layout failed: {msg}"),
        }
    }
}

impl Error for RenderError {}

/// External rendering collaborator
pub trait Renderer {
    /// Create the drawing surface. Failure refuses the session.
    fn init_surface(&mut self, width: f32, height: f32) -> Result<(), RenderError>;

    /// Flood a region with a color (used once for the background)
    fn fill(&mut self, color: Color, region: Rect);

    /// Draw the frame's sprites in order; returns the regions that changed
    /// since the previous frame
    fn draw_entities(&mut self, sprites: &[Sprite]) -> Vec<Rect>;

    /// Update the display with exactly the changed regions
    fn present(&mut self, dirty: &[Rect]);

    /// Lay out a line of text, returning its handle and size
    fn render_text(
        &mut self,
        text: &str,
        color: Color,
        background: Color,
    ) -> Result<TextVisual, RenderError>;
}

/// Assumed glyph cell of the headless text layout
const GLYPH_WIDTH: f32 = 8.0;
const GLYPH_HEIGHT: f32 = 16.0;

/// Headless renderer with real dirty-region bookkeeping.
///
/// A sprite is dirty when it is new, moved, changed its visual, or
/// disappeared; a moved sprite dirties the union of its previous and
/// current rects (both need repainting).
#[derive(Debug, Default)]
pub struct NullRenderer {
    surface: Option<(f32, f32)>,
    previous: HashMap<u32, (Rect, Visual)>,
    next_text_handle: u64,
    /// Text layout calls observed (readout memoization shows up here)
    pub text_renders: usize,
    /// Frames presented
    pub frames: u64,
    /// Dirty regions of the last presented frame
    pub last_dirty: Vec<Rect>,
}

impl NullRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface size from the last successful init
    pub fn surface_size(&self) -> Option<(f32, f32)> {
        self.surface
    }
}

impl Renderer for NullRenderer {
    fn init_surface(&mut self, width: f32, height: f32) -> Result<(), RenderError> {
        if width <= 0.0 || height <= 0.0 {
            return Err(RenderError::SurfaceInit(format!(
                "bad surface size {width}x{height}"
            )));
        }
        self.surface = Some((width, height));
        Ok(())
    }

    fn fill(&mut self, _color: Color, _region: Rect) {}

    fn draw_entities(&mut self, sprites: &[Sprite]) -> Vec<Rect> {
        let mut dirty = Vec::new();
        let mut current = HashMap::with_capacity(sprites.len());

        for sprite in sprites {
            match self.previous.get(&sprite.id) {
                Some(&(prev_rect, prev_visual)) => {
                    if prev_rect != sprite.rect || prev_visual != sprite.visual {
                        dirty.push(prev_rect.union(&sprite.rect));
                    }
                }
                None => dirty.push(sprite.rect),
            }
            current.insert(sprite.id, (sprite.rect, sprite.visual));
        }

        // Sprites gone since last frame leave a hole to repaint
        for (id, (rect, _)) in &self.previous {
            if !current.contains_key(id) {
                dirty.push(*rect);
            }
        }

        self.previous = current;
        dirty
    }

    fn present(&mut self, dirty: &[Rect]) {
        self.frames += 1;
        self.last_dirty = dirty.to_vec();
    }

    fn render_text(
        &mut self,
        text: &str,
        _color: Color,
        _background: Color,
    ) -> Result<TextVisual, RenderError> {
        self.text_renders += 1;
        self.next_text_handle += 1;
        Ok(TextVisual {
            handle: self.next_text_handle,
            width: GLYPH_WIDTH * text.chars().count() as f32,
            height: GLYPH_HEIGHT,
        })
    }
}
