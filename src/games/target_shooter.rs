//! Target shooter: click drifting targets that cross the field from
//! random edges.

use crate::config::GameConfig;
use crate::consts::FIELD_SIZE;
use crate::games::{seconds_left, ROUND_MS};
use crate::render::overlay::{
    draw_backdrop, draw_game_over_overlay, draw_grid, draw_hud_line, draw_start_overlay,
};
use crate::render::theme::Palette;
use crate::render::{Surface, TextAlign};
use crate::sim::collision::point_in_circle;
use crate::sim::spawn::spawn_at_edge;
use crate::sim::{ArcadeGame, FrameInput, GamePhase, SpawnTimer};
use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

const TARGET_SIZE: f32 = 40.0;
const TARGET_SPEED: f32 = 120.0;
const SPAWN_INTERVAL_MS: f64 = 1_200.0;
const HIT_SCORE: u32 = 15;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Target {
    pos: Vec2,
    vel: Vec2,
}

pub struct TargetShooter {
    palette: Palette,
    start_headline: String,
    end_headline: String,
    seed: u64,
    rng: Pcg32,
    spawn: SpawnTimer,
    phase: GamePhase,
    score: u32,
    elapsed_ms: f64,
    targets: Vec<Target>,
}

impl TargetShooter {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut game = Self {
            palette: Palette::resolve(&config.brand, "#00d4ff", "#ffcc00", "#ff0055"),
            start_headline: config.start_headline(),
            end_headline: config.end_headline(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawn: SpawnTimer::new(SPAWN_INTERVAL_MS),
            phase: GamePhase::Start,
            score: 0,
            elapsed_ms: 0.0,
            targets: Vec::new(),
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
        self.targets.clear();
    }

    /// Hit the newest target under the click, if any. One hit per click.
    fn shoot_at(&mut self, point: Vec2) {
        for i in (0..self.targets.len()).rev() {
            if point_in_circle(point, self.targets[i].pos, TARGET_SIZE / 2.0) {
                self.score += HIT_SCORE;
                self.targets.remove(i);
                return;
            }
        }
    }

    fn in_bounds(pos: Vec2) -> bool {
        pos.x >= -TARGET_SIZE
            && pos.x <= FIELD_SIZE + TARGET_SIZE
            && pos.y >= -TARGET_SIZE
            && pos.y <= FIELD_SIZE + TARGET_SIZE
    }
}

impl ArcadeGame for TargetShooter {
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
            self.shoot_at(*click);
        }

        if self.elapsed_ms >= ROUND_MS {
            self.phase = GamePhase::GameOver;
            return;
        }

        if self.spawn.ready(self.elapsed_ms) {
            let s = spawn_at_edge(
                &mut self.rng,
                Vec2::splat(FIELD_SIZE),
                TARGET_SPEED,
                TARGET_SIZE,
                TARGET_SIZE,
            );
            self.targets.push(Target {
                pos: s.pos,
                vel: s.vel,
            });
        }

        for target in &mut self.targets {
            target.pos += target.vel * dt;
        }
        self.targets.retain(|t| Self::in_bounds(t.pos));
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
                Some("CLICK THE TARGETS BEFORE THEY ESCAPE"),
                &self.palette.prompt,
                now_ms,
            );
            return;
        }

        for target in &self.targets {
            // Concentric rings
            s.fill_circle(target.pos, TARGET_SIZE / 2.0, &self.palette.secondary);
            s.fill_circle(target.pos, TARGET_SIZE / 3.0, &self.palette.accent);
            s.fill_circle(target.pos, TARGET_SIZE / 6.0, "#ffffff");
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
                "#ff9900",
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

    fn started() -> TargetShooter {
        let mut g = TargetShooter::new(&GameConfig::default(), 11);
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
    fn test_hit_scores_and_removes_target() {
        let mut g = started();
        let pos = Vec2::new(250.0, 250.0);
        g.targets.push(Target {
            pos,
            vel: Vec2::ZERO,
        });
        let input = FrameInput {
            clicks: vec![pos + Vec2::new(5.0, 5.0)],
            ..Default::default()
        };
        g.step(&input, SIM_DT);
        assert_eq!(g.score(), HIT_SCORE);
        assert!(g.targets.is_empty());
    }

    #[test]
    fn test_one_hit_per_click() {
        let mut g = started();
        let pos = Vec2::new(250.0, 250.0);
        g.targets.push(Target {
            pos,
            vel: Vec2::ZERO,
        });
        g.targets.push(Target {
            pos,
            vel: Vec2::ZERO,
        });
        let input = FrameInput {
            clicks: vec![pos],
            ..Default::default()
        };
        g.step(&input, SIM_DT);
        assert_eq!(g.score(), HIT_SCORE);
        assert_eq!(g.targets.len(), 1);
    }

    #[test]
    fn test_escaped_target_is_pruned_without_score() {
        let mut g = started();
        g.targets.push(Target {
            pos: Vec2::new(FIELD_SIZE + TARGET_SIZE + 10.0, 250.0),
            vel: Vec2::new(TARGET_SPEED, 0.0),
        });
        g.step(&FrameInput::default(), SIM_DT);
        assert!(g.targets.is_empty());
        assert_eq!(g.score(), 0);
    }

    #[test]
    fn test_spawned_targets_enter_the_field() {
        fn center_distance(pos: Vec2) -> f32 {
            pos.distance(Vec2::splat(FIELD_SIZE / 2.0))
        }
        let mut g = started();
        let input = FrameInput::default();
        // Play 1.3 s: one spawn deadline passes.
        for _ in 0..78 {
            g.step(&input, SIM_DT);
        }
        assert_eq!(g.targets.len(), 1);
        let t = g.targets[0];
        assert!(center_distance(t.pos + t.vel * SIM_DT) < center_distance(t.pos));
    }
}
