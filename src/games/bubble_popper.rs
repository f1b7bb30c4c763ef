//! Bubble popper: click rising bubbles before they drift off the top.
//! Smaller bubbles rise faster and score more.

use crate::config::GameConfig;
use crate::consts::FIELD_SIZE;
use crate::games::{seconds_left, ROUND_MS};
use crate::render::overlay::{
    draw_backdrop, draw_game_over_overlay, draw_grid, draw_hud_line, draw_start_overlay,
};
use crate::render::theme::Palette;
use crate::render::{Surface, TextAlign};
use crate::sim::collision::point_in_circle;
use crate::sim::{ArcadeGame, FrameInput, GamePhase, SpawnTimer};
use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

const SPAWN_INTERVAL_MS: f64 = 600.0;
const MIN_SIZE: f32 = 20.0;
const MAX_SIZE: f32 = 40.0;
const BASE_RISE_SPEED: f32 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Bubble {
    pos: Vec2,
    /// Diameter
    size: f32,
}

impl Bubble {
    /// Smaller bubbles rise up to twice the base speed
    fn rise_speed(&self) -> f32 {
        BASE_RISE_SPEED * (1.0 + (MAX_SIZE - self.size) / MAX_SIZE)
    }

    fn pop_score(&self) -> u32 {
        (self.size / 4.0).floor() as u32
    }
}

pub struct BubblePopper {
    palette: Palette,
    start_headline: String,
    end_headline: String,
    seed: u64,
    rng: Pcg32,
    spawn: SpawnTimer,
    phase: GamePhase,
    score: u32,
    elapsed_ms: f64,
    bubbles: Vec<Bubble>,
}

impl BubblePopper {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut game = Self {
            palette: Palette::resolve(&config.brand, "#00d4ff", "#66ccff", "#ff0055"),
            start_headline: config.start_headline(),
            end_headline: config.end_headline(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawn: SpawnTimer::new(SPAWN_INTERVAL_MS),
            phase: GamePhase::Start,
            score: 0,
            elapsed_ms: 0.0,
            bubbles: Vec::new(),
        };
        game.reset();
        game
    }

    fn begin_round(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.spawn.reset();
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.elapsed_ms = 0.0;
        self.bubbles.clear();
    }

    /// Pop the newest bubble under the click, if any. One pop per click.
    fn pop_at(&mut self, point: Vec2) {
        for i in (0..self.bubbles.len()).rev() {
            let b = self.bubbles[i];
            if point_in_circle(point, b.pos, b.size / 2.0) {
                self.score += b.pop_score();
                self.bubbles.remove(i);
                return;
            }
        }
    }
}

impl ArcadeGame for BubblePopper {
    fn reset(&mut self) {
        self.begin_round();
        self.phase = GamePhase::Start;
    }

    fn step(&mut self, input: &FrameInput, dt: f32) {
        if self.phase != GamePhase::Playing {
            if input.primary {
                self.begin_round();
            }
            return;
        }
        self.elapsed_ms += (dt * 1000.0) as f64;

        for click in &input.clicks {
            self.pop_at(*click);
        }

        if self.elapsed_ms >= ROUND_MS {
            self.phase = GamePhase::GameOver;
            return;
        }

        if self.spawn.ready(self.elapsed_ms) {
            let size = self.rng.random_range(MIN_SIZE..MAX_SIZE);
            let x = self.rng.random_range(size..FIELD_SIZE - size);
            self.bubbles.push(Bubble {
                pos: Vec2::new(x, FIELD_SIZE + size),
                size,
            });
        }

        for bubble in &mut self.bubbles {
            bubble.pos.y -= bubble.rise_speed() * dt;
        }
        self.bubbles.retain(|b| b.pos.y > -b.size);
    }

    fn render(&self, s: &mut dyn Surface, now_ms: f64) {
        draw_backdrop(s, FIELD_SIZE, FIELD_SIZE, self.palette.tint.as_deref());
        draw_grid(s, FIELD_SIZE, FIELD_SIZE);

        if self.phase == GamePhase::Start {
            draw_start_overlay(
                s,
                FIELD_SIZE,
                FIELD_SIZE,
                &self.start_headline,
                Some("CLICK THE BUBBLES - SMALL ONES SCORE MORE"),
                &self.palette.prompt,
                now_ms,
            );
            return;
        }

        for bubble in &self.bubbles {
            let r = bubble.size / 2.0;
            s.set_alpha(0.35);
            s.fill_circle(bubble.pos, r, &self.palette.secondary);
            s.set_alpha(1.0);
            s.stroke_circle(bubble.pos, r, &self.palette.secondary, 2.0);
            // Specular highlight
            s.set_alpha(0.6);
            s.fill_circle(bubble.pos - Vec2::splat(r * 0.35), r * 0.2, "#ffffff");
            s.set_alpha(1.0);
        }

        draw_hud_line(
            s,
            15.0,
            28.0,
            &format!("SCORE: {}", self.score),
            &self.palette.primary,
        );
        s.text(
            &format!("TIME: {}", seconds_left(self.elapsed_ms)),
            FIELD_SIZE - 15.0,
            28.0,
            "bold 16px monospace",
            &self.palette.secondary,
            TextAlign::Right,
        );

        if self.phase == GamePhase::GameOver {
            draw_game_over_overlay(
                s,
                FIELD_SIZE,
                FIELD_SIZE,
                "TIME'S UP!",
                "#00ddff",
                &self.end_headline,
                &format!("SCORE: {}", self.score),
                &self.palette.prompt,
                now_ms,
            );
        }
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u32 {
        self.score
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn started() -> BubblePopper {
        let mut g = BubblePopper::new(&GameConfig::default(), 5);
        g.step(
            &FrameInput {
                primary: true,
                ..Default::default()
            },
            SIM_DT,
        );
        g
    }

    #[test]
    fn test_click_pops_newest_overlapping_bubble() {
        let mut g = started();
        let pos = Vec2::new(250.0, 250.0);
        g.bubbles.push(Bubble { pos, size: 40.0 });
        g.bubbles.push(Bubble { pos, size: 32.0 });
        let input = FrameInput {
            clicks: vec![pos],
            ..Default::default()
        };
        g.step(&input, SIM_DT);
        // The newer (smaller) bubble pops; +floor(32 / 4).
        assert_eq!(g.score(), 8);
        assert_eq!(g.bubbles.len(), 1);
        assert_eq!(g.bubbles[0].size, 40.0);
    }

    #[test]
    fn test_miss_pops_nothing() {
        let mut g = started();
        g.bubbles.push(Bubble {
            pos: Vec2::new(100.0, 100.0),
            size: 20.0,
        });
        let input = FrameInput {
            clicks: vec![Vec2::new(300.0, 300.0)],
            ..Default::default()
        };
        g.step(&input, SIM_DT);
        assert_eq!(g.score(), 0);
        assert_eq!(g.bubbles.len(), 1);
    }

    #[test]
    fn test_small_bubbles_rise_faster() {
        let small = Bubble {
            pos: Vec2::ZERO,
            size: MIN_SIZE,
        };
        let big = Bubble {
            pos: Vec2::ZERO,
            size: MAX_SIZE,
        };
        assert!(small.rise_speed() > big.rise_speed());
        assert_eq!(big.rise_speed(), BASE_RISE_SPEED);
    }

    #[test]
    fn test_escaped_bubble_is_pruned() {
        let mut g = started();
        g.bubbles.push(Bubble {
            pos: Vec2::new(100.0, -30.0),
            size: 20.0,
        });
        g.step(&FrameInput::default(), SIM_DT);
        assert!(g.bubbles.is_empty());
        assert_eq!(g.score(), 0);
    }
}
