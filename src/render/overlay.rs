//! Backdrop, HUD, and start/game-over overlays shared by the game variants

use crate::consts::{BACKGROUND_COLOR, GRID_COLOR, GRID_STEP};
use crate::render::{Surface, TextAlign};
use glam::Vec2;

/// Slow cosmetic pulse in 0.4..=1.0, driven by wall-clock milliseconds
pub fn pulse(now_ms: f64) -> f32 {
    ((now_ms / 300.0).sin() * 0.3 + 0.7) as f32
}

/// Dark field background with an optional brand tint wash
pub fn draw_backdrop(s: &mut dyn Surface, w: f32, h: f32, tint: Option<&str>) {
    s.fill_rect(0.0, 0.0, w, h, BACKGROUND_COLOR);
    if let Some(tint) = tint {
        s.fill_rect(0.0, 0.0, w, h, tint);
    }
}

/// Faint square grid over the field
pub fn draw_grid(s: &mut dyn Surface, w: f32, h: f32) {
    draw_grid_colored(s, w, h, GRID_COLOR);
}

pub fn draw_grid_colored(s: &mut dyn Surface, w: f32, h: f32, color: &str) {
    let mut x = 0.0;
    while x <= w {
        s.line(Vec2::new(x, 0.0), Vec2::new(x, h), color, 1.0);
        x += GRID_STEP;
    }
    let mut y = 0.0;
    while y <= h {
        s.line(Vec2::new(0.0, y), Vec2::new(w, y), color, 1.0);
        y += GRID_STEP;
    }
}

/// Splash screen: headline, optional sub-line, pulsing start prompt
pub fn draw_start_overlay(
    s: &mut dyn Surface,
    w: f32,
    h: f32,
    headline: &str,
    sub: Option<&str>,
    prompt_color: &str,
    now_ms: f64,
) {
    let cx = w / 2.0;
    s.text(
        headline,
        cx,
        h / 2.0 - 40.0,
        "bold 22px monospace",
        "#ffffff",
        TextAlign::Center,
    );
    if let Some(sub) = sub {
        s.text(
            sub,
            cx,
            h / 2.0 - 10.0,
            "14px monospace",
            "#8899aa",
            TextAlign::Center,
        );
    }
    s.set_alpha(pulse(now_ms));
    s.text(
        "PRESS SPACE TO START",
        cx,
        h / 2.0 + 40.0,
        "bold 16px monospace",
        prompt_color,
        TextAlign::Center,
    );
    s.set_alpha(1.0);
}

/// Terminal screen: dim scrim, title, branded headline, score line,
/// pulsing restart prompt
#[allow(clippy::too_many_arguments)]
pub fn draw_game_over_overlay(
    s: &mut dyn Surface,
    w: f32,
    h: f32,
    title: &str,
    title_color: &str,
    headline: &str,
    score_line: &str,
    prompt_color: &str,
    now_ms: f64,
) {
    s.fill_rect(0.0, 0.0, w, h, "rgba(10, 10, 15, 0.9)");
    let cx = w / 2.0;
    s.text(
        title,
        cx,
        h / 2.0 - 60.0,
        "bold 28px monospace",
        title_color,
        TextAlign::Center,
    );
    s.text(
        headline,
        cx,
        h / 2.0 - 20.0,
        "16px monospace",
        "#ffffff",
        TextAlign::Center,
    );
    s.text(
        score_line,
        cx,
        h / 2.0 + 15.0,
        "bold 20px monospace",
        "#ffffff",
        TextAlign::Center,
    );
    s.set_alpha(pulse(now_ms));
    s.text(
        "PRESS SPACE TO PLAY AGAIN",
        cx,
        h / 2.0 + 60.0,
        "bold 14px monospace",
        prompt_color,
        TextAlign::Center,
    );
    s.set_alpha(1.0);
}

/// One left-anchored HUD line, e.g. `SCORE: 120`
pub fn draw_hud_line(s: &mut dyn Surface, x: f32, y: f32, text: &str, color: &str) {
    s.text(text, x, y, "bold 16px monospace", color, TextAlign::Left);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pulse_stays_in_band() {
        for ms in [0.0, 123.0, 471.0, 90_000.0, 1.0e7] {
            let p = pulse(ms);
            assert!((0.4..=1.0).contains(&p), "pulse({ms}) = {p}");
        }
    }
}
