//! Collector: free-roaming pickup game on a widescreen field. Gather gems,
//! dodge the spiky drones, and chase the session high score.

use crate::consts::{COLLECTOR_HEIGHT, COLLECTOR_WIDTH};
use crate::render::overlay::{draw_game_over_overlay, draw_grid_colored, draw_start_overlay};
use crate::render::{Surface, TextAlign};
use crate::sim::collision::circles_touch;
use crate::sim::spawn::spawn_at_edge;
use crate::sim::{ArcadeGame, FrameInput, GamePhase, SpawnTimer};
use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

const PLAYER_SIZE: f32 = 24.0;
const PLAYER_SPEED: f32 = 300.0;
const PLAYER_COLOR: &str = "#00f5ff";
const GEM_SIZE: f32 = 16.0;
const GEM_COLOR: &str = "#00ff88";
const GEM_SPAWN_MS: f64 = 1_500.0;
const GEM_CAP: usize = 8;
const DRONE_SIZE: f32 = 20.0;
const DRONE_COLOR: &str = "#ff00aa";
const DRONE_SPEED: f32 = 120.0;
const DRONE_SPAWN_MS: f64 = 2_000.0;
const DRONE_CAP: usize = 6;
const UI_COLOR: &str = "#ffe600";
const GRID_COLOR: &str = "rgba(0, 245, 255, 0.05)";
const COLLECT_SCORE: u32 = 10;
const MAX_LIVES: u32 = 3;
const INVINCIBLE_MS: f64 = 1_500.0;
const SPAWN_MARGIN: f32 = 40.0;
const EDGE_OUTSET: f32 = 20.0;
const DESPAWN_BOUND: f32 = 50.0;

#[derive(Debug, Clone, Copy)]
struct Gem {
    pos: Vec2,
    pulse_phase: f32,
}

#[derive(Debug, Clone, Copy)]
struct Drone {
    pos: Vec2,
    vel: Vec2,
    wobble_phase: f32,
}

pub struct Collector {
    subtitle: String,
    seed: u64,
    rng: Pcg32,
    gem_spawn: SpawnTimer,
    drone_spawn: SpawnTimer,
    phase: GamePhase,
    score: u32,
    high_score: u32,
    lives: u32,
    elapsed_ms: f64,
    player: Vec2,
    invincible_until_ms: f64,
    gems: Vec<Gem>,
    drones: Vec<Drone>,
}

impl Collector {
    pub fn new(company: &str, seed: u64) -> Self {
        let mut game = Self {
            subtitle: format!("A {company} Arcade Game"),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            gem_spawn: SpawnTimer::new(GEM_SPAWN_MS),
            drone_spawn: SpawnTimer::new(DRONE_SPAWN_MS),
            phase: GamePhase::Start,
            score: 0,
            high_score: 0,
            lives: MAX_LIVES,
            elapsed_ms: 0.0,
            player: Vec2::ZERO,
            invincible_until_ms: 0.0,
            gems: Vec::new(),
            drones: Vec::new(),
        };
        game.reset();
        game
    }

    fn field() -> Vec2 {
        Vec2::new(COLLECTOR_WIDTH, COLLECTOR_HEIGHT)
    }

    fn begin_round(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.gem_spawn.reset();
        self.drone_spawn.reset();
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = MAX_LIVES;
        self.elapsed_ms = 0.0;
        self.player = Self::field() / 2.0;
        self.invincible_until_ms = 0.0;
        self.gems.clear();
        self.drones.clear();
    }

    fn invincible(&self) -> bool {
        self.elapsed_ms < self.invincible_until_ms
    }

    fn in_bounds(pos: Vec2) -> bool {
        pos.x >= -DESPAWN_BOUND
            && pos.x <= COLLECTOR_WIDTH + DESPAWN_BOUND
            && pos.y >= -DESPAWN_BOUND
            && pos.y <= COLLECTOR_HEIGHT + DESPAWN_BOUND
    }
}

impl ArcadeGame for Collector {
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

        let dir = Vec2::new(input.held.axis_x(), input.held.axis_y());
        self.player += dir * PLAYER_SPEED * dt;
        let half = PLAYER_SIZE / 2.0;
        self.player.x = self.player.x.clamp(half, COLLECTOR_WIDTH - half);
        self.player.y = self.player.y.clamp(half, COLLECTOR_HEIGHT - half);

        if self.gems.len() < GEM_CAP && self.gem_spawn.ready(self.elapsed_ms) {
            let x = self.rng.random_range(SPAWN_MARGIN..COLLECTOR_WIDTH - SPAWN_MARGIN);
            let y = self.rng.random_range(SPAWN_MARGIN..COLLECTOR_HEIGHT - SPAWN_MARGIN);
            self.gems.push(Gem {
                pos: Vec2::new(x, y),
                pulse_phase: 0.0,
            });
        }
        if self.drones.len() < DRONE_CAP && self.drone_spawn.ready(self.elapsed_ms) {
            let s = spawn_at_edge(
                &mut self.rng,
                Self::field(),
                DRONE_SPEED,
                SPAWN_MARGIN,
                EDGE_OUTSET,
            );
            self.drones.push(Drone {
                pos: s.pos,
                vel: s.vel,
                wobble_phase: 0.0,
            });
        }

        for gem in &mut self.gems {
            gem.pulse_phase += 3.0 * dt;
        }
        for drone in &mut self.drones {
            drone.pos += drone.vel * dt;
            drone.wobble_phase += 6.0 * dt;
        }
        self.drones.retain(|d| Self::in_bounds(d.pos));

        let player = self.player;
        let mut collected = 0u32;
        self.gems.retain(|g| {
            if circles_touch(player, PLAYER_SIZE, g.pos, GEM_SIZE) {
                collected += 1;
                return false;
            }
            true
        });
        self.score += collected * COLLECT_SCORE;

        if !self.invincible() {
            let hit = self
                .drones
                .iter()
                .any(|d| circles_touch(player, PLAYER_SIZE, d.pos, DRONE_SIZE));
            if hit {
                self.lives = self.lives.saturating_sub(1);
                self.invincible_until_ms = self.elapsed_ms + INVINCIBLE_MS;
            }
        }

        if self.lives == 0 {
            self.high_score = self.high_score.max(self.score);
            self.phase = GamePhase::GameOver;
        }
    }

    fn render(&self, s: &mut dyn Surface, now_ms: f64) {
        let (w, h) = (COLLECTOR_WIDTH, COLLECTOR_HEIGHT);
        s.fill_rect(0.0, 0.0, w, h, crate::consts::BACKGROUND_COLOR);
        draw_grid_colored(s, w, h, GRID_COLOR);

        if self.phase == GamePhase::Start {
            draw_start_overlay(
                s,
                w,
                h,
                "COLLECTOR",
                Some(&self.subtitle),
                UI_COLOR,
                now_ms,
            );
            return;
        }

        for gem in &self.gems {
            let pulse = 1.0 + gem.pulse_phase.sin() * 0.15;
            let r = GEM_SIZE / 2.0 * pulse;
            // Diamond
            s.fill_polygon(
                &[
                    gem.pos + Vec2::new(0.0, -r),
                    gem.pos + Vec2::new(r, 0.0),
                    gem.pos + Vec2::new(0.0, r),
                    gem.pos + Vec2::new(-r, 0.0),
                ],
                GEM_COLOR,
            );
        }

        for drone in &self.drones {
            let r = DRONE_SIZE / 2.0;
            let wobble = drone.wobble_phase.sin() * 2.0;
            s.fill_circle(drone.pos, r, DRONE_COLOR);
            // Spikes
            for i in 0..6 {
                let angle = i as f32 * std::f32::consts::TAU / 6.0 + drone.wobble_phase * 0.3;
                let tip = drone.pos + Vec2::from_angle(angle) * (r + 4.0 + wobble);
                s.line(drone.pos, tip, DRONE_COLOR, 2.0);
            }
        }

        // Blink while invincible
        let visible = !self.invincible() || (self.elapsed_ms / 100.0) as u64 % 2 == 0;
        if visible {
            let half = PLAYER_SIZE / 2.0;
            s.set_glow(PLAYER_COLOR, 10.0);
            s.fill_round_rect(
                self.player.x - half,
                self.player.y - half,
                PLAYER_SIZE,
                PLAYER_SIZE,
                6.0,
                PLAYER_COLOR,
            );
            s.clear_glow();
            // Face
            s.fill_circle(self.player + Vec2::new(-5.0, -3.0), 2.0, "#0a0a0f");
            s.fill_circle(self.player + Vec2::new(5.0, -3.0), 2.0, "#0a0a0f");
            s.line(
                self.player + Vec2::new(-4.0, 5.0),
                self.player + Vec2::new(4.0, 5.0),
                "#0a0a0f",
                2.0,
            );
        }

        s.text(
            &format!("SCORE: {}", self.score),
            15.0,
            28.0,
            "bold 16px monospace",
            UI_COLOR,
            TextAlign::Left,
        );
        s.text(
            &format!("LIVES: {}", self.lives),
            w - 15.0,
            28.0,
            "bold 16px monospace",
            UI_COLOR,
            TextAlign::Right,
        );

        if self.phase == GamePhase::GameOver {
            draw_game_over_overlay(
                s,
                w,
                h,
                "GAME OVER",
                DRONE_COLOR,
                &format!("HIGH SCORE: {}", self.high_score),
                &format!("SCORE: {}", self.score),
                UI_COLOR,
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

    fn started() -> Collector {
        let mut g = Collector::new("Acme", 13);
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
    fn test_player_clamped_to_field() {
        let mut g = started();
        let mut input = FrameInput::default();
        input.held.left = true;
        input.held.up = true;
        for _ in 0..600 {
            g.step(&input, SIM_DT);
        }
        assert_eq!(g.player, Vec2::splat(PLAYER_SIZE / 2.0));
    }

    #[test]
    fn test_gem_pickup_scores() {
        let mut g = started();
        g.gems.push(Gem {
            pos: g.player,
            pulse_phase: 0.0,
        });
        g.step(&FrameInput::default(), SIM_DT);
        assert_eq!(g.score(), COLLECT_SCORE);
        assert!(g.gems.is_empty());
    }

    #[test]
    fn test_drone_hit_grants_invincibility() {
        let mut g = started();
        g.drones.push(Drone {
            pos: g.player,
            vel: Vec2::ZERO,
            wobble_phase: 0.0,
        });
        g.step(&FrameInput::default(), SIM_DT);
        assert_eq!(g.lives, MAX_LIVES - 1);
        // Still overlapping, but the grace period holds.
        for _ in 0..30 {
            g.step(&FrameInput::default(), SIM_DT);
        }
        assert_eq!(g.lives, MAX_LIVES - 1);
        // After the grace period ends the next overlap costs another life.
        for _ in 0..70 {
            g.step(&FrameInput::default(), SIM_DT);
        }
        assert_eq!(g.lives, MAX_LIVES - 2);
    }

    #[test]
    fn test_gem_cap_holds() {
        let mut g = started();
        for i in 0..GEM_CAP {
            g.gems.push(Gem {
                pos: Vec2::new(600.0, 40.0 + i as f32 * 10.0),
                pulse_phase: 0.0,
            });
        }
        // Run past several spawn deadlines; the cap blocks new gems.
        for _ in 0..400 {
            g.step(&FrameInput::default(), SIM_DT);
        }
        assert_eq!(g.gems.len(), GEM_CAP);
    }

    #[test]
    fn test_high_score_survives_restart() {
        let mut g = started();
        g.score = 70;
        g.lives = 1;
        g.drones.push(Drone {
            pos: g.player,
            vel: Vec2::ZERO,
            wobble_phase: 0.0,
        });
        g.step(&FrameInput::default(), SIM_DT);
        assert_eq!(g.phase(), GamePhase::GameOver);
        assert_eq!(g.high_score, 70);
        g.step(
            &FrameInput {
                primary: true,
                ..Default::default()
            },
            SIM_DT,
        );
        assert_eq!(g.score(), 0);
        assert_eq!(g.high_score, 70);
    }
}
