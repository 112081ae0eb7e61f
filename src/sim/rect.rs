//! Axis-aligned rectangle geometry
//!
//! Screen coordinates: +x right, +y down. A rect is its top-left corner plus
//! non-negative dimensions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        debug_assert!(width >= 0.0 && height >= 0.0);
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.x
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Move the rect in place
    pub fn translate(&mut self, delta: Vec2) {
        self.x += delta.x;
        self.y += delta.y;
    }

    /// Overlap test on both axes; touching edges count as overlap
    pub fn collides(&self, other: &Rect) -> bool {
        self.left() <= other.right()
            && self.right() >= other.left()
            && self.top() <= other.bottom()
            && self.bottom() >= other.top()
    }

    /// Move the rect the minimal distance so it lies fully within `bounds`.
    ///
    /// Never resizes. If the rect is wider/taller than the bounds it is
    /// anchored to the bounds' left/top edge on that axis.
    pub fn clamp_into(&mut self, bounds: &Rect) {
        if self.right() > bounds.right() {
            self.x = bounds.right() - self.width;
        }
        if self.left() < bounds.left() {
            self.x = bounds.left();
        }
        if self.bottom() > bounds.bottom() {
            self.y = bounds.bottom() - self.height;
        }
        if self.top() < bounds.top() {
            self.y = bounds.top();
        }
    }

    /// Returning variant of [`clamp_into`](Self::clamp_into)
    pub fn clamped_into(mut self, bounds: &Rect) -> Self {
        self.clamp_into(bounds);
        self
    }

    /// True if the rect lies fully within `bounds`
    pub fn contained_in(&self, bounds: &Rect) -> bool {
        self.left() >= bounds.left()
            && self.right() <= bounds.right()
            && self.top() >= bounds.top()
            && self.bottom() <= bounds.bottom()
    }

    /// Exchange width and height, preserving the center.
    ///
    /// Used when an entity rotates between orientations: the footprint turns
    /// without relocating.
    pub fn swap_dimensions(&mut self) {
        let center = self.center();
        std::mem::swap(&mut self.width, &mut self.height);
        self.x = center.x - self.width / 2.0;
        self.y = center.y - self.height / 2.0;
    }

    /// Replace the dimensions, preserving the center
    pub fn resize_about_center(&mut self, width: f32, height: f32) {
        let center = self.center();
        self.width = width;
        self.height = height;
        self.x = center.x - width / 2.0;
        self.y = center.y - height / 2.0;
    }

    /// Smallest rect containing both
    pub fn union(&self, other: &Rect) -> Rect {
        let left = self.left().min(other.left());
        let top = self.top().min(other.top());
        let right = self.right().max(other.right());
        let bottom = self.bottom().max(other.bottom());
        Rect::new(left, top, right - left, bottom - top)
    }
}
