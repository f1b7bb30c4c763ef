//! Memory match: flip cards to find pairs. The deck is built from the
//! brand's game elements (up to eight), falling back to a stock emoji set;
//! every label appears exactly twice.

use crate::config::GameConfig;
use crate::consts::FIELD_SIZE;
use crate::render::overlay::{draw_game_over_overlay, draw_start_overlay};
use crate::render::theme::{adjust_brightness, Palette};
use crate::render::{Surface, TextAlign};
use crate::sim::collision::Aabb;
use crate::sim::{ArcadeGame, FrameInput, GamePhase};
use glam::Vec2;
use rand::seq::SliceRandom;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

const CARD_SIZE: Vec2 = Vec2::new(70.0, 90.0);
const CARD_SPACING: f32 = 10.0;
const CARD_RADIUS: f32 = 16.0;
const GRID_TOP: f32 = 60.0;
const MAX_PAIRS: usize = 8;
const MATCH_SCORE: u32 = 20;
const RESOLVE_DELAY_MS: f64 = 1_000.0;
const FINISH_DELAY_MS: f64 = 800.0;
/// Flip and match animations, in progress units per second
const FLIP_RATE: f32 = 7.2;
const MATCH_RATE: f32 = 3.6;
const PARTICLES_PER_CARD: usize = 12;
const PARTICLE_GRAVITY: f32 = 1_440.0;
const PARTICLE_DECAY: f32 = 1.2;

const STOCK_LABELS: [&str; MAX_PAIRS] = ["🎯", "🚀", "💎", "⚡", "🎨", "🔥", "💰", "🌟"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Face {
    Down,
    Up,
    Matched,
}

#[derive(Debug, Clone)]
struct Card {
    /// Index into the label list; both cards of a pair share it
    pair: usize,
    face: Face,
    flip_progress: f32,
    match_progress: f32,
}

#[derive(Debug, Clone, Copy)]
struct Particle {
    pos: Vec2,
    vel: Vec2,
    life: f32,
}

pub struct MemoryMatch {
    palette: Palette,
    start_headline: String,
    end_headline: String,
    labels: Vec<String>,
    seed: u64,
    rng: Pcg32,
    phase: GamePhase,
    score: u32,
    moves: u32,
    elapsed_ms: f64,
    cards: Vec<Card>,
    /// Indices of the one or two face-up, unresolved cards
    face_up: Vec<usize>,
    /// When two cards went face up, resolution happens after the delay
    resolve_at_ms: Option<f64>,
    /// Set when the last pair matches; the round ends after a beat
    finish_at_ms: Option<f64>,
    particles: Vec<Particle>,
}

impl MemoryMatch {
    pub fn new(config: &GameConfig, seed: u64) -> Self {
        let labels: Vec<String> = match &config.copy.game_elements {
            Some(elements) if !elements.is_empty() => elements
                .iter()
                .take(MAX_PAIRS)
                .map(|e| crate::config::interpolate(e, &config.brand.name))
                .collect(),
            _ => STOCK_LABELS.iter().map(|s| s.to_string()).collect(),
        };
        let mut game = Self {
            palette: Palette::resolve(&config.brand, "#6366f1", "#818cf8", "#4f46e5"),
            start_headline: config.start_headline(),
            end_headline: config.end_headline(),
            labels,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            score: 0,
            moves: 0,
            elapsed_ms: 0.0,
            cards: Vec::new(),
            face_up: Vec::new(),
            resolve_at_ms: None,
            finish_at_ms: None,
            particles: Vec::new(),
        };
        game.reset();
        game
    }

    fn pair_count(&self) -> usize {
        self.labels.len()
    }

    fn grid_cols(&self) -> usize {
        let cards = self.pair_count() * 2;
        if cards % 4 == 0 {
            4
        } else if cards % 3 == 0 {
            3
        } else {
            cards.min(4)
        }
    }

    fn grid_left(&self) -> f32 {
        let cols = self.grid_cols() as f32;
        (FIELD_SIZE - cols * (CARD_SIZE.x + CARD_SPACING)) / 2.0
    }

    fn card_rect(&self, index: usize) -> Aabb {
        let cols = self.grid_cols();
        let col = (index % cols) as f32;
        let row = (index / cols) as f32;
        Aabb::from_top_left(
            Vec2::new(
                self.grid_left() + col * (CARD_SIZE.x + CARD_SPACING),
                GRID_TOP + row * (CARD_SIZE.y + CARD_SPACING),
            ),
            CARD_SIZE,
        )
    }

    fn begin_round(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.moves = 0;
        self.elapsed_ms = 0.0;
        self.face_up.clear();
        self.resolve_at_ms = None;
        self.finish_at_ms = None;
        self.particles.clear();

        let mut pairs: Vec<usize> = (0..self.pair_count()).flat_map(|p| [p, p]).collect();
        pairs.shuffle(&mut self.rng);
        self.cards = pairs
            .into_iter()
            .map(|pair| Card {
                pair,
                face: Face::Down,
                flip_progress: 0.0,
                match_progress: 0.0,
            })
            .collect();
    }

    fn flip_at(&mut self, point: Vec2) {
        // Input is locked while a pair awaits resolution.
        if self.resolve_at_ms.is_some() || self.face_up.len() >= 2 {
            return;
        }
        for i in 0..self.cards.len() {
            if self.cards[i].face == Face::Down && self.card_rect(i).contains(point) {
                self.cards[i].face = Face::Up;
                self.cards[i].flip_progress = 0.0;
                self.face_up.push(i);
                if self.face_up.len() == 2 {
                    self.resolve_at_ms = Some(self.elapsed_ms + RESOLVE_DELAY_MS);
                }
                return;
            }
        }
    }

    fn burst_particles(&mut self, center: Vec2) {
        for _ in 0..PARTICLES_PER_CARD {
            let vx = (self.rng.random_range(0.0..1.0f32) - 0.5) * 360.0;
            let vy = -self.rng.random_range(0.0..1.0f32) * 480.0 - 120.0;
            self.particles.push(Particle {
                pos: center,
                vel: Vec2::new(vx, vy),
                life: 1.0,
            });
        }
    }

    fn resolve_pair(&mut self) {
        let (a, b) = (self.face_up[0], self.face_up[1]);
        self.moves += 1;
        if self.cards[a].pair == self.cards[b].pair {
            self.score += MATCH_SCORE;
            for &i in &[a, b] {
                self.cards[i].face = Face::Matched;
                self.cards[i].match_progress = 0.0;
            }
            let (ca, cb) = (self.card_rect(a).center, self.card_rect(b).center);
            self.burst_particles(ca);
            self.burst_particles(cb);
            if self.cards.iter().all(|c| c.face == Face::Matched) {
                self.finish_at_ms = Some(self.elapsed_ms + FINISH_DELAY_MS);
            }
        } else {
            self.cards[a].face = Face::Down;
            self.cards[b].face = Face::Down;
            self.cards[a].flip_progress = 0.0;
            self.cards[b].flip_progress = 0.0;
        }
        self.face_up.clear();
        self.resolve_at_ms = None;
    }

    fn card_scale(card: &Card) -> f32 {
        let flip = 1.0 - (card.flip_progress.min(1.0) - 0.5).abs() * 0.3;
        let pop = 1.0 + ease_out_cubic(card.match_progress.min(1.0)) * 0.15;
        flip * pop
    }
}

fn ease_out_cubic(p: f32) -> f32 {
    1.0 - (1.0 - p).powi(3)
}

impl ArcadeGame for MemoryMatch {
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
            self.flip_at(*click);
        }

        if let Some(at) = self.resolve_at_ms {
            if self.elapsed_ms >= at {
                self.resolve_pair();
            }
        }

        for card in &mut self.cards {
            if card.face != Face::Down {
                card.flip_progress = (card.flip_progress + FLIP_RATE * dt).min(1.0);
            }
            if card.face == Face::Matched {
                card.match_progress = (card.match_progress + MATCH_RATE * dt).min(1.0);
            }
        }

        for p in &mut self.particles {
            p.vel.y += PARTICLE_GRAVITY * dt;
            p.pos += p.vel * dt;
            p.life -= PARTICLE_DECAY * dt;
        }
        self.particles.retain(|p| p.life > 0.0);

        if let Some(at) = self.finish_at_ms {
            if self.elapsed_ms >= at {
                self.phase = GamePhase::GameOver;
            }
        }
    }

    fn render(&self, s: &mut dyn Surface, now_ms: f64) {
        s.vertical_gradient(
            0.0,
            0.0,
            FIELD_SIZE,
            FIELD_SIZE,
            &adjust_brightness(&self.palette.primary, -50),
            &adjust_brightness(&self.palette.primary, -30),
        );

        if self.phase == GamePhase::Start {
            draw_start_overlay(
                s,
                FIELD_SIZE,
                FIELD_SIZE,
                &self.start_headline,
                Some("CLICK CARDS TO FIND THE PAIRS"),
                &self.palette.prompt,
                now_ms,
            );
            return;
        }

        // Floating brand logo above the grid
        let bob = ((now_ms / 500.0).sin() * 4.0) as f32;
        s.draw_logo(FIELD_SIZE / 2.0 - 40.0, 8.0 + bob, 80.0, 32.0);

        for (i, card) in self.cards.iter().enumerate() {
            let rect = self.card_rect(i);
            let scale = Self::card_scale(card);
            let size = CARD_SIZE * scale;
            let top_left = rect.center - size / 2.0;

            match card.face {
                Face::Down => {
                    s.fill_round_rect(
                        top_left.x,
                        top_left.y,
                        size.x,
                        size.y,
                        CARD_RADIUS,
                        &self.palette.secondary,
                    );
                    s.stroke_round_rect(
                        top_left.x,
                        top_left.y,
                        size.x,
                        size.y,
                        CARD_RADIUS,
                        &adjust_brightness(&self.palette.secondary, 40),
                        2.0,
                    );
                }
                Face::Up | Face::Matched => {
                    if card.face == Face::Matched {
                        s.set_glow(&self.palette.secondary, 14.0);
                    }
                    s.fill_round_rect(
                        top_left.x,
                        top_left.y,
                        size.x,
                        size.y,
                        CARD_RADIUS,
                        "#f5f5ff",
                    );
                    s.clear_glow();
                    let label = &self.labels[card.pair];
                    let font = if label.chars().count() <= 2 {
                        "32px serif"
                    } else {
                        "11px monospace"
                    };
                    s.text(
                        label,
                        rect.center.x,
                        rect.center.y + 8.0,
                        font,
                        "#1a1a2e",
                        TextAlign::Center,
                    );
                }
            }
        }

        for p in &self.particles {
            s.set_alpha(p.life.clamp(0.0, 1.0));
            s.fill_circle(p.pos, 3.0, &self.palette.secondary);
        }
        s.set_alpha(1.0);

        s.text(
            &format!("SCORE: {}", self.score),
            15.0,
            FIELD_SIZE - 15.0,
            "bold 16px monospace",
            "#ffffff",
            TextAlign::Left,
        );
        s.text(
            &format!("MOVES: {}", self.moves),
            FIELD_SIZE - 15.0,
            FIELD_SIZE - 15.0,
            "bold 16px monospace",
            "#ffffff",
            TextAlign::Right,
        );

        if self.phase == GamePhase::GameOver {
            draw_game_over_overlay(
                s,
                FIELD_SIZE,
                FIELD_SIZE,
                "PERFECT!",
                &self.palette.secondary,
                &self.end_headline,
                &format!("SCORE: {} - MOVES: {}", self.score, self.moves),
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
