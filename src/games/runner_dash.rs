//! Runner dash: side-scrolling jumper. One crash ends the run; every
//! obstacle that scrolls off the left edge scores.

use crate::config::GameConfig;
use crate::consts::FIELD_SIZE;
use crate::render::overlay::{
    draw_backdrop, draw_game_over_overlay, draw_grid, draw_hud_line, draw_start_overlay,
};
use crate::render::theme::Palette;
use crate::render::{Surface, TextAlign};
use crate::sim::collision::Aabb;
use crate::sim::{ArcadeGame, FrameInput, GamePhase, SpawnTimer};
use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

const PLAYER_SIZE: Vec2 = Vec2::new(30.0, 40.0);
const PLAYER_X: f32 = 100.0;
const GROUND_Y: f32 = 320.0;
const GRAVITY: f32 = 2_160.0;
const JUMP_VELOCITY: f32 = -720.0;
const SCROLL_SPEED: f32 = 240.0;
const OBSTACLE_WIDTH: f32 = 30.0;
const SPAWN_INTERVAL_MS: f64 = 1_800.0;
const PASS_SCORE: u32 = 10;
/// Distance accrues at a tenth of the scroll rate
const DISTANCE_RATE: f32 = SCROLL_SPEED / 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Obstacle {
    /// Top-left corner
    pos: Vec2,
    size: Vec2,
}

pub struct RunnerDash {
    palette: Palette,
    start_headline: String,
    end_headline: String,
    seed: u64,
    rng: Pcg32,
    spawn: SpawnTimer,
    phase: GamePhase,
    score: u32,
    elapsed_ms: f64,
    /// Player top-left y; x is fixed
    player_y: f32,
    velocity_y: f32,
    airborne: bool,
    distance: f32,
    obstacles: Vec<Obstacle>,
}

impl RunnerDash {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut game = Self {
            palette: Palette::resolve(&config.brand, "#00d4ff", "#00ff88", "#ff0055"),
            start_headline: config.start_headline(),
            end_headline: config.end_headline(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawn: SpawnTimer::new(SPAWN_INTERVAL_MS),
            phase: GamePhase::Start,
            score: 0,
            elapsed_ms: 0.0,
            player_y: GROUND_Y,
            velocity_y: 0.0,
            airborne: false,
            distance: 0.0,
            obstacles: Vec::new(),
        };
        game.reset();
        game
    }

    fn ground_line() -> f32 {
        GROUND_Y + PLAYER_SIZE.y
    }

    fn begin_round(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.spawn.reset();
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.elapsed_ms = 0.0;
        self.player_y = GROUND_Y;
        self.velocity_y = 0.0;
        self.airborne = false;
        self.distance = 0.0;
        self.obstacles.clear();
    }

    fn player_box(&self) -> Aabb {
        Aabb::from_top_left(Vec2::new(PLAYER_X, self.player_y), PLAYER_SIZE)
    }

    fn spawn_obstacle(&mut self) {
        let height = 40.0 + self.rng.random_range(0.0..20.0f32);
        self.obstacles.push(Obstacle {
            pos: Vec2::new(FIELD_SIZE, Self::ground_line() - height),
            size: Vec2::new(OBSTACLE_WIDTH, height),
        });
    }
}

impl ArcadeGame for RunnerDash {
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

        if input.primary && !self.airborne {
            self.velocity_y = JUMP_VELOCITY;
            self.airborne = true;
        }

        if self.airborne {
            self.velocity_y += GRAVITY * dt;
            self.player_y += self.velocity_y * dt;
            if self.player_y >= GROUND_Y {
                self.player_y = GROUND_Y;
                self.velocity_y = 0.0;
                self.airborne = false;
            }
        }

        if self.spawn.ready(self.elapsed_ms) {
            self.spawn_obstacle();
        }

        for obstacle in &mut self.obstacles {
            obstacle.pos.x -= SCROLL_SPEED * dt;
        }

        let mut passed = 0u32;
        self.obstacles.retain(|o| {
            if o.pos.x + o.size.x < 0.0 {
                passed += 1;
                return false;
            }
            true
        });
        self.score += passed * PASS_SCORE;
        self.distance += DISTANCE_RATE * dt;

        let player = self.player_box();
        let crashed = self
            .obstacles
            .iter()
            .any(|o| player.overlaps(&Aabb::from_top_left(o.pos, o.size)));
        if crashed {
            self.phase = GamePhase::GameOver;
        }
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
                Some("SPACE TO JUMP - DODGE THE BLOCKS"),
                &self.palette.prompt,
                now_ms,
            );
            return;
        }

        let ground = Self::ground_line();
        s.line(
            Vec2::new(0.0, ground),
            Vec2::new(FIELD_SIZE, ground),
            &self.palette.secondary,
            2.0,
        );

        s.set_glow(&self.palette.primary, 10.0);
        s.fill_round_rect(
            PLAYER_X,
            self.player_y,
            PLAYER_SIZE.x,
            PLAYER_SIZE.y,
            6.0,
            &self.palette.primary,
        );
        s.clear_glow();

        for obstacle in &self.obstacles {
            s.fill_rect(
                obstacle.pos.x,
                obstacle.pos.y,
                obstacle.size.x,
                obstacle.size.y,
                &self.palette.accent,
            );
        }

        draw_hud_line(
            s,
            15.0,
            28.0,
            &format!("SCORE: {}", self.score),
            &self.palette.primary,
        );
        s.text(
            &format!("DISTANCE: {}m", self.distance as u32),
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
                "CRASHED!",
                "#ff0055",
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
