//! Space defender: move along the bottom edge, shoot descending enemies,
//! lose a life for every enemy that breaches the bottom of the field.

use crate::config::GameConfig;
use crate::consts::FIELD_SIZE;
use crate::render::overlay::{
    draw_backdrop, draw_game_over_overlay, draw_grid, draw_hud_line, draw_start_overlay,
};
use crate::render::theme::Palette;
use crate::render::Surface;
use crate::sim::collision::Aabb;
use crate::sim::{ArcadeGame, FrameInput, GamePhase, SpawnTimer};
use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

const PLAYER_SIZE: Vec2 = Vec2::new(30.0, 20.0);
const ENEMY_SIZE: f32 = 20.0;
const BULLET_SIZE: Vec2 = Vec2::new(4.0, 10.0);
const ENEMY_FALL_SPEED: f32 = 120.0;
const BULLET_SPEED: f32 = 300.0;
const FIRE_COOLDOWN_MS: f64 = 200.0;
const BREACH_COOLDOWN_MS: f64 = 500.0;
const KILL_SCORE: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Enemy {
    /// Top-left corner
    pos: Vec2,
    /// Last time this enemy reached the bottom and charged a life
    last_breach_ms: f64,
}

impl Enemy {
    fn at_top(x: f32) -> Self {
        Self {
            pos: Vec2::new(x, -ENEMY_SIZE),
            last_breach_ms: f64::NEG_INFINITY,
        }
    }
}

pub struct SpaceDefender {
    palette: Palette,
    start_headline: String,
    end_headline: String,
    player_speed: f32,
    max_lives: u32,
    seed: u64,
    rng: Pcg32,
    spawn: SpawnTimer,
    phase: GamePhase,
    score: u32,
    lives: u32,
    elapsed_ms: f64,
    /// Player top-left x; y is fixed near the bottom edge
    player_x: f32,
    enemies: Vec<Enemy>,
    /// Bullet top-left corners
    bullets: Vec<Vec2>,
    last_shot_ms: f64,
}

impl SpaceDefender {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut game = Self {
            palette: Palette::resolve(&config.brand, "#00d4ff", "#00ff88", "#ff0055"),
            start_headline: config.start_headline(),
            end_headline: config.end_headline(),
            player_speed: config.settings.player_speed * 60.0,
            max_lives: config.settings.max_lives,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawn: SpawnTimer::new(config.settings.enemy_spawn_rate),
            phase: GamePhase::Start,
            score: 0,
            lives: config.settings.max_lives,
            elapsed_ms: 0.0,
            player_x: 0.0,
            enemies: Vec::new(),
            bullets: Vec::new(),
            last_shot_ms: 0.0,
        };
        game.reset();
        game
    }

    fn player_y() -> f32 {
        FIELD_SIZE - 40.0
    }

    fn begin_round(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.spawn.reset();
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = self.max_lives;
        self.elapsed_ms = 0.0;
        self.player_x = (FIELD_SIZE - PLAYER_SIZE.x) / 2.0;
        self.enemies.clear();
        self.bullets.clear();
        self.last_shot_ms = -FIRE_COOLDOWN_MS;
    }

    fn spawn_enemy_x(&mut self) -> f32 {
        self.rng.random_range(20.0..FIELD_SIZE - ENEMY_SIZE - 20.0)
    }
}

impl ArcadeGame for SpaceDefender {
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

        self.player_x = (self.player_x + input.held.axis_x() * self.player_speed * dt)
            .clamp(0.0, FIELD_SIZE - PLAYER_SIZE.x);

        if input.held.fire && self.elapsed_ms - self.last_shot_ms >= FIRE_COOLDOWN_MS {
            self.bullets.push(Vec2::new(
                self.player_x + (PLAYER_SIZE.x - BULLET_SIZE.x) / 2.0,
                Self::player_y() - BULLET_SIZE.y,
            ));
            self.last_shot_ms = self.elapsed_ms;
        }

        if self.spawn.ready(self.elapsed_ms) {
            let x = self.spawn_enemy_x();
            self.enemies.push(Enemy::at_top(x));
        }

        for enemy in &mut self.enemies {
            enemy.pos.y += ENEMY_FALL_SPEED * dt;
        }
        for bullet in &mut self.bullets {
            bullet.y -= BULLET_SPEED * dt;
        }
        self.bullets.retain(|b| b.y + BULLET_SIZE.y > 0.0);

        // Bottom breaches: every distinct enemy that reaches the bottom
        // costs a life, gated per enemy so one entity cannot charge twice
        // within the cooldown, then it re-enters from the top.
        for i in 0..self.enemies.len() {
            if self.enemies[i].pos.y > FIELD_SIZE {
                if self.elapsed_ms - self.enemies[i].last_breach_ms >= BREACH_COOLDOWN_MS {
                    self.lives = self.lives.saturating_sub(1);
                    self.enemies[i].last_breach_ms = self.elapsed_ms;
                }
                let x = self.spawn_enemy_x();
                self.enemies[i].pos = Vec2::new(x, -ENEMY_SIZE);
            }
        }

        // Each bullet destroys at most one enemy.
        let bullets = std::mem::take(&mut self.bullets);
        let mut surviving_bullets = Vec::with_capacity(bullets.len());
        'bullets: for bullet in bullets {
            let bullet_box = Aabb::from_top_left(bullet, BULLET_SIZE);
            for i in 0..self.enemies.len() {
                let enemy_box =
                    Aabb::from_top_left(self.enemies[i].pos, Vec2::splat(ENEMY_SIZE));
                if bullet_box.overlaps(&enemy_box) {
                    self.score += KILL_SCORE;
                    let x = self.spawn_enemy_x();
                    self.enemies[i] = Enemy::at_top(x);
                    continue 'bullets;
                }
            }
            surviving_bullets.push(bullet);
        }
        self.bullets = surviving_bullets;

        if self.lives == 0 {
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
                Some("ARROW KEYS TO MOVE - SPACE TO SHOOT"),
                &self.palette.prompt,
                now_ms,
            );
            return;
        }

        let py = Self::player_y();
        s.set_glow(&self.palette.primary, 12.0);
        s.fill_polygon(
            &[
                Vec2::new(self.player_x + PLAYER_SIZE.x / 2.0, py),
                Vec2::new(self.player_x + PLAYER_SIZE.x, py + PLAYER_SIZE.y),
                Vec2::new(self.player_x, py + PLAYER_SIZE.y),
            ],
            &self.palette.primary,
        );
        s.clear_glow();

        for bullet in &self.bullets {
            s.fill_rect(
                bullet.x,
                bullet.y,
                BULLET_SIZE.x,
                BULLET_SIZE.y,
                &self.palette.secondary,
            );
        }
        for enemy in &self.enemies {
            s.fill_rect(
                enemy.pos.x,
                enemy.pos.y,
                ENEMY_SIZE,
                ENEMY_SIZE,
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
        // Remaining lives as small ships, right-aligned
        for i in 0..self.lives {
            let x = FIELD_SIZE - 25.0 - i as f32 * 20.0;
            s.fill_polygon(
                &[
                    Vec2::new(x + 6.0, 14.0),
                    Vec2::new(x + 12.0, 26.0),
                    Vec2::new(x, 26.0),
                ],
                &self.palette.accent,
            );
        }

        if self.phase == GamePhase::GameOver {
            draw_game_over_overlay(
                s,
                FIELD_SIZE,
                FIELD_SIZE,
                "GAME OVER",
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;

    fn game() -> SpaceDefender {
        SpaceDefender::new(&GameConfig::default(), 42)
    }

    fn start_input() -> FrameInput {
        FrameInput {
            primary: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_space_starts_round() {
        let mut g = game();
        g.step(&FrameInput::default(), SIM_DT);
        assert_eq!(g.phase(), GamePhase::Start);
        g.step(&start_input(), SIM_DT);
        assert_eq!(g.phase(), GamePhase::Playing);
        assert_eq!(g.lives, 3);
    }

    #[test]
    fn test_fire_cooldown_limits_rate() {
        let mut g = game();
        g.step(&start_input(), SIM_DT);
        let mut input = FrameInput::default();
        input.held.fire = true;
        // 12 frames at ~16.7 ms is 200 ms: one initial shot plus one after
        // the cooldown elapses.
        for _ in 0..13 {
            g.step(&input, SIM_DT);
        }
        assert_eq!(g.bullets.len(), 2);
    }

    #[test]
    fn test_each_breaching_enemy_costs_a_life() {
        let mut g = game();
        g.step(&start_input(), SIM_DT);
        g.enemies.push(Enemy::at_top(100.0));
        g.enemies.push(Enemy::at_top(200.0));
        for enemy in &mut g.enemies {
            enemy.pos.y = FIELD_SIZE + 1.0;
        }
        g.step(&FrameInput::default(), SIM_DT);
        // Two distinct enemies breach in the same frame: two lives gone.
        assert_eq!(g.lives, 1);
        assert!(g.enemies.iter().all(|e| e.pos.y < 0.0));
    }

    #[test]
    fn test_breach_cooldown_is_per_enemy() {
        let mut g = game();
        g.step(&start_input(), SIM_DT);
        g.enemies.push(Enemy::at_top(100.0));
        g.enemies[0].pos.y = FIELD_SIZE + 1.0;
        g.step(&FrameInput::default(), SIM_DT);
        assert_eq!(g.lives, 2);
        // The same entity crossing again within its cooldown is respawned
        // without a second charge.
        g.enemies[0].pos.y = FIELD_SIZE + 1.0;
        g.step(&FrameInput::default(), SIM_DT);
        assert_eq!(g.lives, 2);
        assert!(g.enemies[0].pos.y < 0.0);
    }

    #[test]
    fn test_bullet_kills_one_enemy_and_scores() {
        let mut g = game();
        g.step(&start_input(), SIM_DT);
        g.enemies.push(Enemy {
            pos: Vec2::new(100.0, 200.0),
            last_breach_ms: f64::NEG_INFINITY,
        });
        g.bullets.push(Vec2::new(105.0, 205.0));
        g.step(&FrameInput::default(), SIM_DT);
        assert_eq!(g.score(), KILL_SCORE);
        assert!(g.bullets.is_empty());
        assert_eq!(g.enemies.len(), 1);
        assert!(g.enemies[0].pos.y < 0.0);
    }

    #[test]
    fn test_zero_lives_ends_round() {
        let mut g = game();
        g.step(&start_input(), SIM_DT);
        g.lives = 1;
        g.enemies.push(Enemy::at_top(100.0));
        g.enemies[0].pos.y = FIELD_SIZE + 1.0;
        g.step(&FrameInput::default(), SIM_DT);
        assert_eq!(g.phase(), GamePhase::GameOver);
    }

    #[test]
    fn test_determinism_across_restarts() {
        let mut a = game();
        let mut b = game();
        let mut input = FrameInput::default();
        input.held.fire = true;
        input.held.right = true;
        a.step(&start_input(), SIM_DT);
        b.step(&start_input(), SIM_DT);
        for _ in 0..600 {
            a.step(&input, SIM_DT);
            b.step(&input, SIM_DT);
        }
        assert_eq!(a.score(), b.score());
        assert_eq!(a.enemies, b.enemies);
        assert_eq!(a.player_x, b.player_x);
    }
}
