//! The game variants
//!
//! Each variant is a self-contained state machine implementing
//! [`ArcadeGame`](crate::sim::ArcadeGame). All of them share the same
//! lifecycle (start screen, timed or lives-limited play, game-over screen)
//! and the same step discipline: handle edge input, advance gameplay time,
//! spawn, move, collide, prune.

pub mod bubble_popper;
pub mod coin_collector;
pub mod collector;
pub mod memory_match;
pub mod runner_dash;
pub mod space_defender;
pub mod target_shooter;

pub use bubble_popper::BubblePopper;
pub use coin_collector::CoinCollector;
pub use collector::Collector;
pub use memory_match::MemoryMatch;
pub use runner_dash::RunnerDash;
pub use space_defender::SpaceDefender;
pub use target_shooter::TargetShooter;

use crate::config::{GameConfig, GameKind};
use crate::sim::ArcadeGame;

/// Build the variant the config selects
pub fn build(config: &GameConfig, seed: u64) -> Box<dyn ArcadeGame> {
    match config.game_type {
        GameKind::SpaceDefender => Box::new(SpaceDefender::new(config, seed)),
        GameKind::CoinCollector => Box::new(CoinCollector::new(config, seed)),
        GameKind::BubblePopper => Box::new(BubblePopper::new(config, seed)),
        GameKind::TargetShooter => Box::new(TargetShooter::new(config, seed)),
        GameKind::RunnerDash => Box::new(RunnerDash::new(config, seed)),
        GameKind::MemoryMatch => Box::new(MemoryMatch::new(config, seed)),
    }
}

/// Play time limit for the timed variants
pub(crate) const ROUND_MS: f64 = 30_000.0;

/// Seconds left on a countdown, rounded up for display
pub(crate) fn seconds_left(elapsed_ms: f64) -> u32 {
    ((ROUND_MS - elapsed_ms).max(0.0) / 1000.0).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GamePhase;

    #[test]
    fn test_build_dispatches_on_game_type() {
        for tag in [
            "spaceDefender",
            "coinCollector",
            "bubblePopper",
            "targetShooter",
            "runnerDash",
            "memoryMatch",
        ] {
            let json = format!(r#"{{ "gameType": "{tag}" }}"#);
            let config = GameConfig::from_json(&json).unwrap();
            let game = build(&config, 1);
            assert_eq!(game.phase(), GamePhase::Start);
            assert_eq!(game.score(), 0);
        }
    }

    #[test]
    fn test_seconds_left_rounds_up() {
        assert_eq!(seconds_left(0.0), 30);
        assert_eq!(seconds_left(100.0), 30);
        assert_eq!(seconds_left(29_001.0), 1);
        assert_eq!(seconds_left(30_000.0), 0);
        assert_eq!(seconds_left(31_000.0), 0);
    }
}
