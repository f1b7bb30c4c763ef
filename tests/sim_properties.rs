//! Cross-variant behavior checks against the public API, plus property
//! tests for the shared simulation primitives.

use brand_arcade::config::GameConfig;
use brand_arcade::consts::SIM_DT;
use brand_arcade::games;
use brand_arcade::render::NullSurface;
use brand_arcade::sim::collision::{circles_touch, Aabb};
use brand_arcade::sim::{FrameInput, GamePhase, SpawnTimer};
use glam::Vec2;
use proptest::prelude::*;

fn start_input() -> FrameInput {
    FrameInput {
        primary: true,
        ..Default::default()
    }
}

fn config_for(tag: &str) -> GameConfig {
    GameConfig::from_json(&format!(r#"{{ "gameType": "{tag}" }}"#)).unwrap()
}

const ALL_TAGS: [&str; 6] = [
    "spaceDefender",
    "coinCollector",
    "bubblePopper",
    "targetShooter",
    "runnerDash",
    "memoryMatch",
];

#[test]
fn every_variant_starts_idle_and_starts_on_space() {
    for tag in ALL_TAGS {
        let config = config_for(tag);
        let mut game = games::build(&config, 7);
        assert_eq!(game.phase(), GamePhase::Start, "{tag}");
        // Idle frames change nothing.
        for _ in 0..10 {
            game.step(&FrameInput::default(), SIM_DT);
        }
        assert_eq!(game.phase(), GamePhase::Start, "{tag}");
        game.step(&start_input(), SIM_DT);
        assert_eq!(game.phase(), GamePhase::Playing, "{tag}");
        assert_eq!(game.score(), 0, "{tag}");
    }
}

#[test]
fn every_variant_renders_every_phase_without_panicking() {
    for tag in ALL_TAGS {
        let config = config_for(tag);
        let mut game = games::build(&config, 7);
        let mut surface = NullSurface;
        game.render(&mut surface, 0.0);
        game.step(&start_input(), SIM_DT);
        for frame in 0..600 {
            game.step(&FrameInput::default(), SIM_DT);
            game.render(&mut surface, frame as f64 * 16.7);
        }
    }
}

#[test]
fn score_never_decreases_during_play() {
    for tag in ALL_TAGS {
        let config = config_for(tag);
        let mut game = games::build(&config, 99);
        game.step(&start_input(), SIM_DT);
        let mut input = FrameInput::default();
        input.held.fire = true;
        input.held.right = true;
        let mut last = 0;
        for i in 0..2_000 {
            input.clicks = if i % 7 == 0 {
                vec![Vec2::new((i % 500) as f32, ((i * 3) % 500) as f32)]
            } else {
                Vec::new()
            };
            game.step(&input, SIM_DT);
            assert!(game.score() >= last, "{tag}: score dropped");
            last = game.score();
        }
    }
}

#[test]
fn restart_replays_identically() {
    // The same seed and input script must give the same score after a
    // game-over restart as on the first run.
    for tag in ALL_TAGS {
        let config = config_for(tag);
        let mut game = games::build(&config, 4242);
        let script = |game: &mut Box<dyn brand_arcade::sim::ArcadeGame>| {
            game.step(&start_input(), SIM_DT);
            let mut input = FrameInput::default();
            input.held.fire = true;
            for i in 0..1_200 {
                input.clicks = if i % 11 == 0 {
                    vec![Vec2::new(250.0, 250.0)]
                } else {
                    Vec::new()
                };
                input.primary = i % 97 == 0;
                game.step(&input, SIM_DT);
            }
            game.score()
        };
        let first = script(&mut game);
        game.reset();
        let second = script(&mut game);
        assert_eq!(first, second, "{tag}: replay diverged");
    }
}

#[test]
fn timed_variants_end_after_thirty_seconds() {
    for tag in ["coinCollector", "bubblePopper", "targetShooter"] {
        let config = config_for(tag);
        let mut game = games::build(&config, 1);
        game.step(&start_input(), SIM_DT);
        // 30 s of play plus slack for frame rounding.
        for _ in 0..(30 * 60 + 5) {
            game.step(&FrameInput::default(), SIM_DT);
        }
        assert_eq!(game.phase(), GamePhase::GameOver, "{tag}");
    }
}

proptest! {
    /// Over any duration, a spawn timer stepped in increments that divide
    /// its interval fires exactly floor(duration / interval) times.
    #[test]
    fn spawn_count_is_floor_of_elapsed_over_interval(
        interval_steps in 1u32..20,
        total_steps in 0u32..2_000,
    ) {
        let step_ms = 100.0;
        let interval = interval_steps as f64 * step_ms;
        let mut timer = SpawnTimer::new(interval);
        let mut fired = 0u32;
        for i in 0..=total_steps {
            if timer.ready(i as f64 * step_ms) {
                fired += 1;
            }
        }
        prop_assert_eq!(fired, total_steps / interval_steps);
    }

    #[test]
    fn spawn_timer_never_fires_twice_for_one_instant(
        interval in 1.0f64..5_000.0,
        at in 0.0f64..100_000.0,
    ) {
        let mut timer = SpawnTimer::new(interval);
        if timer.ready(at) {
            prop_assert!(!timer.ready(at));
        }
    }

    #[test]
    fn aabb_overlap_is_symmetric(
        ax in -500.0f32..500.0, ay in -500.0f32..500.0,
        bx in -500.0f32..500.0, by in -500.0f32..500.0,
        aw in 1.0f32..100.0, ah in 1.0f32..100.0,
        bw in 1.0f32..100.0, bh in 1.0f32..100.0,
    ) {
        let a = Aabb::new(Vec2::new(ax, ay), Vec2::new(aw, ah));
        let b = Aabb::new(Vec2::new(bx, by), Vec2::new(bw, bh));
        prop_assert_eq!(a.overlaps(&b), b.overlaps(&a));
    }

    #[test]
    fn circle_overlap_is_symmetric(
        ax in -500.0f32..500.0, ay in -500.0f32..500.0,
        bx in -500.0f32..500.0, by in -500.0f32..500.0,
        asize in 1.0f32..100.0, bsize in 1.0f32..100.0,
    ) {
        let a = Vec2::new(ax, ay);
        let b = Vec2::new(bx, by);
        prop_assert_eq!(
            circles_touch(a, asize, b, bsize),
            circles_touch(b, bsize, a, asize)
        );
    }
}
