//! Abstract drawing surface

use glam::Vec2;

/// Horizontal text anchoring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

/// Immediate-mode 2D drawing operations
///
/// Colors are CSS color strings; coordinates are logical canvas pixels with
/// the origin at the top-left. Implementations are stateful for alpha and
/// glow, which stay in effect until cleared.
pub trait Surface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str);
    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str, line_width: f32);
    fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: &str);
    fn stroke_round_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: &str,
        line_width: f32,
    );
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, line_width: f32);
    fn fill_polygon(&mut self, points: &[Vec2], color: &str);
    fn line(&mut self, from: Vec2, to: Vec2, color: &str, line_width: f32);
    fn text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str, align: TextAlign);
    /// Fill a rectangle with a vertical gradient from `top` to `bottom`
    fn vertical_gradient(&mut self, x: f32, y: f32, w: f32, h: f32, top: &str, bottom: &str);
    fn set_alpha(&mut self, alpha: f32);
    fn set_glow(&mut self, color: &str, blur: f32);
    fn clear_glow(&mut self);
    /// Draw the brand logo if one is loaded; returns false when unavailable
    fn draw_logo(&mut self, _x: f32, _y: f32, _w: f32, _h: f32) -> bool {
        false
    }
}

/// No-op surface for tests and the headless binary
#[derive(Debug, Default)]
pub struct NullSurface;

impl Surface for NullSurface {
    fn fill_rect(&mut self, _: f32, _: f32, _: f32, _: f32, _: &str) {}
    fn stroke_rect(&mut self, _: f32, _: f32, _: f32, _: f32, _: &str, _: f32) {}
    fn fill_round_rect(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: &str) {}
    fn stroke_round_rect(&mut self, _: f32, _: f32, _: f32, _: f32, _: f32, _: &str, _: f32) {}
    fn fill_circle(&mut self, _: Vec2, _: f32, _: &str) {}
    fn stroke_circle(&mut self, _: Vec2, _: f32, _: &str, _: f32) {}
    fn fill_polygon(&mut self, _: &[Vec2], _: &str) {}
    fn line(&mut self, _: Vec2, _: Vec2, _: &str, _: f32) {}
    fn text(&mut self, _: &str, _: f32, _: f32, _: &str, _: &str, _: TextAlign) {}
    fn vertical_gradient(&mut self, _: f32, _: f32, _: f32, _: f32, _: &str, _: &str) {}
    fn set_alpha(&mut self, _: f32) {}
    fn set_glow(&mut self, _: &str, _: f32) {}
    fn clear_glow(&mut self) {}
}
