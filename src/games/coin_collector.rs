//! Coin collector: catch falling coins in a basket for thirty seconds.

use crate::config::GameConfig;
use crate::consts::FIELD_SIZE;
use crate::games::{seconds_left, ROUND_MS};
use crate::render::overlay::{
    draw_backdrop, draw_game_over_overlay, draw_grid, draw_hud_line, draw_start_overlay,
};
use crate::render::theme::Palette;
use crate::render::{Surface, TextAlign};
use crate::sim::collision::{circles_touch, Aabb};
use crate::sim::{ArcadeGame, FrameInput, GamePhase, SpawnTimer};
use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

const PLAYER_SIZE: f32 = 50.0;
const PLAYER_SPEED: f32 = 420.0;
const COIN_SIZE: f32 = 25.0;
const COIN_FALL_SPEED: f32 = 180.0;
const SPAWN_INTERVAL_MS: f64 = 800.0;
const CATCH_SCORE: u32 = 10;

pub struct CoinCollector {
    palette: Palette,
    start_headline: String,
    end_headline: String,
    seed: u64,
    rng: Pcg32,
    spawn: SpawnTimer,
    phase: GamePhase,
    score: u32,
    elapsed_ms: f64,
    /// Basket top-left x; y is fixed near the bottom edge
    player_x: f32,
    /// Coin centers
    coins: Vec<Vec2>,
}

impl CoinCollector {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let mut game = Self {
            palette: Palette::resolve(&config.brand, "#00d4ff", "#FFD700", "#ff0055"),
            start_headline: config.start_headline(),
            end_headline: config.end_headline(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            spawn: SpawnTimer::new(SPAWN_INTERVAL_MS),
            phase: GamePhase::Start,
            score: 0,
            elapsed_ms: 0.0,
            player_x: 0.0,
            coins: Vec::new(),
        };
        game.reset();
        game
    }

    fn player_y() -> f32 {
        FIELD_SIZE - 70.0
    }

    fn begin_round(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.spawn.reset();
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.elapsed_ms = 0.0;
        self.player_x = (FIELD_SIZE - PLAYER_SIZE) / 2.0;
        self.coins.clear();
    }

    fn player_box(&self) -> Aabb {
        Aabb::from_top_left(
            Vec2::new(self.player_x, Self::player_y()),
            Vec2::splat(PLAYER_SIZE),
        )
    }
}

impl ArcadeGame for CoinCollector {
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

        self.player_x = (self.player_x + input.held.axis_x() * PLAYER_SPEED * dt)
            .clamp(0.0, FIELD_SIZE - PLAYER_SIZE);

        // An expired timer freezes the round before any spawn or movement
        // of the coins.
        if self.elapsed_ms >= ROUND_MS {
            self.phase = GamePhase::GameOver;
            return;
        }

        if self.spawn.ready(self.elapsed_ms) {
            let x = self.rng.random_range(COIN_SIZE..FIELD_SIZE - COIN_SIZE);
            self.coins.push(Vec2::new(x, -COIN_SIZE));
        }

        for coin in &mut self.coins {
            coin.y += COIN_FALL_SPEED * dt;
        }

        let basket = self.player_box();
        let mut caught = 0u32;
        self.coins.retain(|coin| {
            if circles_touch(*coin, COIN_SIZE, basket.center, PLAYER_SIZE) {
                caught += 1;
                return false;
            }
            coin.y - COIN_SIZE / 2.0 < FIELD_SIZE
        });
        self.score += caught * CATCH_SCORE;
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
                Some("ARROW KEYS TO MOVE - CATCH THE COINS"),
                &self.palette.prompt,
                now_ms,
            );
            return;
        }

        let py = Self::player_y();
        s.set_glow(&self.palette.primary, 10.0);
        s.fill_round_rect(self.player_x, py, PLAYER_SIZE, PLAYER_SIZE, 8.0, &self.palette.primary);
        s.clear_glow();

        s.set_glow(&self.palette.secondary, 8.0);
        for coin in &self.coins {
            s.fill_circle(*coin, COIN_SIZE / 2.0, &self.palette.secondary);
        }
        s.clear_glow();

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

    fn started() -> CoinCollector {
        let mut g = CoinCollector::new(&GameConfig::default(), 9);
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
    fn test_coins_spawn_on_schedule() {
        let mut g = started();
        let input = FrameInput::default();
        // 2.4 s of play covers three 800 ms spawn deadlines. Coins fall 180
        // px/s from y = -25, so none reach the floor or the basket yet.
        let mut total_seen = 0usize;
        let mut frames = 0;
        while g.elapsed_ms < 2_400.0 {
            let before = g.coins.len();
            g.step(&input, SIM_DT);
            total_seen += g.coins.len().saturating_sub(before);
            frames += 1;
            assert!(frames < 200, "round clock stalled");
        }
        assert_eq!(total_seen, 3);
    }

    #[test]
    fn test_catch_scores_and_removes_coin() {
        let mut g = started();
        let basket_center = g.player_box().center;
        g.coins.push(basket_center);
        g.step(&FrameInput::default(), SIM_DT);
        assert_eq!(g.score(), CATCH_SCORE);
        assert!(g.coins.is_empty());
    }

    #[test]
    fn test_missed_coin_leaves_without_scoring() {
        let mut g = started();
        g.coins.push(Vec2::new(30.0, FIELD_SIZE + 20.0));
        g.step(&FrameInput::default(), SIM_DT);
        assert_eq!(g.score(), 0);
        assert!(g.coins.is_empty());
    }

    #[test]
    fn test_round_ends_after_thirty_seconds() {
        let mut g = started();
        g.elapsed_ms = ROUND_MS - 1.0;
        g.step(&FrameInput::default(), SIM_DT);
        assert_eq!(g.phase(), GamePhase::GameOver);
        let score = g.score();
        // Further steps without a restart change nothing.
        g.step(&FrameInput::default(), SIM_DT);
        assert_eq!(g.score(), score);
    }
}
