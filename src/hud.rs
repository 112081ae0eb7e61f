//! HUD text readouts
//!
//! A readout is a renderable entity whose content derives from a polled
//! numeric source - it never holds a reference into the simulation. Text is
//! regenerated only when the polled value changes; the position is computed
//! once from the first rendered size and stays put even if later content is
//! wider.

use glam::Vec2;

use crate::render::{Color, RenderError, Renderer, Sprite, TextVisual, Visual};
use crate::sim::Rect;

/// Read-only snapshot of the session numbers readouts may poll
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionStats {
    pub score: u32,
    pub time_remaining_ms: u32,
}

/// A value displayed by a readout
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReadoutValue {
    /// Integer, rendered as-is
    Count(u32),
    /// Two-decimal seconds countdown
    Seconds(f32),
}

impl ReadoutValue {
    fn render(&self) -> String {
        match self {
            ReadoutValue::Count(n) => format!("{n}"),
            ReadoutValue::Seconds(s) => format!("{s:.2}"),
        }
    }
}

/// Source: the session score
pub fn score_value(stats: &SessionStats) -> ReadoutValue {
    ReadoutValue::Count(stats.score)
}

/// Source: seconds left on the countdown
pub fn countdown_value(stats: &SessionStats) -> ReadoutValue {
    ReadoutValue::Seconds(stats.time_remaining_ms as f32 / 1000.0)
}

/// Alignment flags, applied once at construction
#[derive(Debug, Clone, Copy, Default)]
pub struct Alignment {
    /// Center horizontally on the anchor
    pub center_x: bool,
    /// Anchor the bottom edge instead of the top
    pub anchor_bottom: bool,
}

/// A text readout bound to a polled numeric source
#[derive(Debug)]
pub struct Readout {
    id: u32,
    source: fn(&SessionStats) -> ReadoutValue,
    color: Color,
    background: Color,
    anchor: Vec2,
    alignment: Alignment,
    /// Memoized last-polled value
    last: Option<ReadoutValue>,
    visual: Option<TextVisual>,
    /// Fixed after the first render
    rect: Option<Rect>,
}

impl Readout {
    pub fn new(
        id: u32,
        anchor: Vec2,
        alignment: Alignment,
        source: fn(&SessionStats) -> ReadoutValue,
    ) -> Self {
        Self {
            id,
            source,
            color: Color::WHITE,
            background: Color::BLACK,
            anchor,
            alignment,
            last: None,
            visual: None,
            rect: None,
        }
    }

    /// Poll the source and regenerate the text visual if the value changed
    /// since the last render
    pub fn refresh<R: Renderer + ?Sized>(
        &mut self,
        stats: &SessionStats,
        renderer: &mut R,
    ) -> Result<(), RenderError> {
        let value = (self.source)(stats);
        if self.last == Some(value) {
            return Ok(());
        }

        let visual = renderer.render_text(&value.render(), self.color, self.background)?;
        if self.rect.is_none() {
            let mut x = self.anchor.x;
            let mut y = self.anchor.y;
            if self.alignment.center_x {
                x -= visual.width / 2.0;
            }
            if self.alignment.anchor_bottom {
                y -= visual.height;
            }
            self.rect = Some(Rect::new(x, y, visual.width, visual.height));
        }
        self.visual = Some(visual);
        self.last = Some(value);
        Ok(())
    }

    /// The readout's sprite, once it has rendered at least once
    pub fn sprite(&self) -> Option<Sprite> {
        match (self.rect, self.visual) {
            (Some(rect), Some(visual)) => Some(Sprite {
                id: self.id,
                rect,
                visual: Visual::Text(visual),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::NullRenderer;

    const STATS: SessionStats = SessionStats {
        score: 3,
        time_remaining_ms: 12_345,
    };

    #[test]
    fn test_formats() {
        assert_eq!(score_value(&STATS).render(), "3");
        assert_eq!(countdown_value(&STATS).render(), "12.35");
    }

    #[test]
    fn test_constant_source_renders_once() {
        let mut renderer = NullRenderer::new();
        let mut readout = Readout::new(1, Vec2::new(320.0, 480.0), Alignment::default(), score_value);

        for _ in 0..3 {
            readout.refresh(&STATS, &mut renderer).unwrap();
        }
        assert_eq!(renderer.text_renders, 1);
    }

    #[test]
    fn test_changed_value_rerenders() {
        let mut renderer = NullRenderer::new();
        let mut readout = Readout::new(1, Vec2::new(320.0, 480.0), Alignment::default(), score_value);

        readout.refresh(&STATS, &mut renderer).unwrap();
        let mut stats = STATS;
        stats.score = 4;
        readout.refresh(&stats, &mut renderer).unwrap();
        assert_eq!(renderer.text_renders, 2);
    }

    #[test]
    fn test_position_fixed_at_first_render() {
        let mut renderer = NullRenderer::new();
        let alignment = Alignment {
            center_x: true,
            anchor_bottom: true,
        };
        let mut readout = Readout::new(1, Vec2::new(320.0, 480.0), alignment, score_value);

        let mut stats = STATS;
        stats.score = 9;
        readout.refresh(&stats, &mut renderer).unwrap();
        let first = readout.sprite().unwrap().rect;
        // "9" is one 8x16 glyph centered on x=320, bottom at y=480
        assert_eq!(first, Rect::new(316.0, 464.0, 8.0, 16.0));

        // Wider content later does not move the readout
        stats.score = 1234;
        readout.refresh(&stats, &mut renderer).unwrap();
        let second = readout.sprite().unwrap().rect;
        assert_eq!((second.x, second.y), (first.x, first.y));
    }
}
