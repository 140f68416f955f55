//! Painter abstraction
//!
//! The render-target equivalent the core draws through. A concrete painter
//! (canvas, GPU quad batcher, test recorder) lives with the host; the game
//! loop and particle system only emit filled primitives and text.
//!
//! Colors are packed `0xRRGGBB`; alpha travels separately so fading
//! particles reuse one color constant.

use glam::Vec2;

use crate::sim::Rect;

pub trait Painter {
    fn fill_rect(&mut self, rect: &Rect, color: u32, alpha: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32, alpha: f32);
    fn fill_polygon(&mut self, points: &[Vec2], color: u32, alpha: f32);
    /// Draw text (an emoji icon or a score popup) centered at `center`,
    /// `size` pixels tall
    fn text(&mut self, text: &str, center: Vec2, size: f32, rotation: f32, flip_x: bool, alpha: f32);
}

/// Painter adapter that shifts world coordinates by the camera offset
pub struct CameraPainter<'a> {
    inner: &'a mut dyn Painter,
    offset: Vec2,
}

impl<'a> CameraPainter<'a> {
    pub fn new(inner: &'a mut dyn Painter, offset: Vec2) -> Self {
        Self { inner, offset }
    }
}

impl Painter for CameraPainter<'_> {
    fn fill_rect(&mut self, rect: &Rect, color: u32, alpha: f32) {
        let shifted = Rect::new(
            rect.x - self.offset.x,
            rect.y - self.offset.y,
            rect.width,
            rect.height,
        );
        self.inner.fill_rect(&shifted, color, alpha);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: u32, alpha: f32) {
        self.inner.fill_circle(center - self.offset, radius, color, alpha);
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: u32, alpha: f32) {
        let shifted: Vec<Vec2> = points.iter().map(|p| *p - self.offset).collect();
        self.inner.fill_polygon(&shifted, color, alpha);
    }

    fn text(&mut self, text: &str, center: Vec2, size: f32, rotation: f32, flip_x: bool, alpha: f32) {
        self.inner
            .text(text, center - self.offset, size, rotation, flip_x, alpha);
    }
}

/// Parse a `#RRGGBB` color string into a packed color
pub fn parse_color(value: &str) -> Option<u32> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    u32::from_str_radix(hex, 16).ok()
}
