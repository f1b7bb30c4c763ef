//! Canvas 2D implementation of [`Surface`] for the wasm build

use crate::render::{Surface, TextAlign};
use glam::Vec2;
use std::f64::consts::PI;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

/// Drawing surface backed by a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    logo: Option<HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, logo: Option<HtmlImageElement>) -> Self {
        Self { ctx, logo }
    }

    fn round_rect_path(&self, x: f64, y: f64, w: f64, h: f64, r: f64) {
        let r = r.min(w / 2.0).min(h / 2.0);
        self.ctx.begin_path();
        self.ctx.move_to(x + r, y);
        self.ctx.line_to(x + w - r, y);
        self.ctx.quadratic_curve_to(x + w, y, x + w, y + r);
        self.ctx.line_to(x + w, y + h - r);
        self.ctx.quadratic_curve_to(x + w, y + h, x + w - r, y + h);
        self.ctx.line_to(x + r, y + h);
        self.ctx.quadratic_curve_to(x, y + h, x, y + h - r);
        self.ctx.line_to(x, y + r);
        self.ctx.quadratic_curve_to(x, y, x + r, y);
        self.ctx.close_path();
    }

    fn apply_align(&self, align: TextAlign) {
        let value = match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
            TextAlign::Right => "right",
        };
        self.ctx.set_text_align(value);
    }
}

impl Surface for CanvasSurface {
    fn fill_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn stroke_rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: &str, line_width: f32) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn fill_round_rect(&mut self, x: f32, y: f32, w: f32, h: f32, radius: f32, color: &str) {
        self.round_rect_path(x as f64, y as f64, w as f64, h as f64, radius as f64);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn stroke_round_rect(
        &mut self,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        radius: f32,
        color: &str,
        line_width: f32,
    ) {
        self.round_rect_path(x as f64, y as f64, w as f64, h as f64, radius as f64);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, PI * 2.0);
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, line_width: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, PI * 2.0);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn fill_polygon(&mut self, points: &[Vec2], color: &str) {
        let Some(first) = points.first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in &points[1..] {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: &str, line_width: f32) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn text(&mut self, text: &str, x: f32, y: f32, font: &str, color: &str, align: TextAlign) {
        self.ctx.set_font(font);
        self.apply_align(align);
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, x as f64, y as f64);
    }

    fn vertical_gradient(&mut self, x: f32, y: f32, w: f32, h: f32, top: &str, bottom: &str) {
        let gradient =
            self.ctx
                .create_linear_gradient(x as f64, y as f64, x as f64, (y + h) as f64);
        let _ = gradient.add_color_stop(0.0, top);
        let _ = gradient.add_color_stop(1.0, bottom);
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.fill_rect(x as f64, y as f64, w as f64, h as f64);
    }

    fn set_alpha(&mut self, alpha: f32) {
        self.ctx.set_global_alpha(alpha as f64);
    }

    fn set_glow(&mut self, color: &str, blur: f32) {
        self.ctx.set_shadow_color(color);
        self.ctx.set_shadow_blur(blur as f64);
    }

    fn clear_glow(&mut self) {
        self.ctx.set_shadow_blur(0.0);
    }

    fn draw_logo(&mut self, x: f32, y: f32, w: f32, h: f32) -> bool {
        let Some(logo) = &self.logo else {
            return false;
        };
        if !logo.complete() || logo.natural_width() == 0 {
            return false;
        }
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                logo, x as f64, y as f64, w as f64, h as f64,
            )
            .is_ok()
    }
}
