//! Headless runner: steps a configured game for a fixed stretch of
//! simulated time and reports the outcome. Useful for smoke-testing a
//! config file without a browser.

use brand_arcade::config::GameConfig;
use brand_arcade::consts::SIM_DT;
use brand_arcade::games;
use brand_arcade::render::NullSurface;
use brand_arcade::sim::{FrameInput, GamePhase};
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let config = match std::env::args().nth(1) {
        Some(path) => match std::fs::read_to_string(&path) {
            Ok(json) => match GameConfig::from_json(&json) {
                Ok(config) => config,
                Err(e) => {
                    log::error!("{path}: {e}");
                    return ExitCode::FAILURE;
                }
            },
            Err(e) => {
                log::error!("{path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => GameConfig::default(),
    };

    log::info!(
        "running {} for {}",
        config.game_type.as_tag(),
        config.brand.name
    );

    let mut game = games::build(&config, 0xa11ce);
    let mut surface = NullSurface;

    // Press start, then simulate thirty-five seconds of idle play.
    let mut input = FrameInput {
        primary: true,
        ..Default::default()
    };
    game.step(&input, SIM_DT);
    input.clear_edges();
    let frames = 35 * 60;
    for frame in 0..frames {
        game.step(&input, SIM_DT);
        game.render(&mut surface, frame as f64 * (SIM_DT as f64 * 1000.0));
        if game.phase() == GamePhase::GameOver {
            break;
        }
    }

    println!(
        "phase={:?} score={}",
        game.phase(),
        game.score()
    );
    ExitCode::SUCCESS
}
