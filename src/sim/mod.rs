//! Simulation core
//!
//! Everything in this module tree is pure and deterministic: no wall clock,
//! no I/O, no platform types. A game advances only through [`ArcadeGame::step`]
//! with a fixed `dt`, so the same seed and the same input sequence always
//! produce the same state. Rendering reads state but never mutates it.

pub mod collision;
pub mod input;
pub mod spawn;
pub mod ticker;

pub use input::{FrameInput, HeldKeys};
pub use spawn::SpawnTimer;
pub use ticker::Ticker;

use crate::render::Surface;

/// Lifecycle phase shared by every game variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Splash screen, waiting for the start key
    #[default]
    Start,
    Playing,
    GameOver,
}

/// Common surface of all game variants
///
/// The frame loop drives any variant through the same cycle: feed input,
/// step zero or more fixed substeps, render once. Implementations keep all
/// of their state in `self`; nothing lives in captured closures.
pub trait ArcadeGame {
    /// Return to a fresh pre-game state. Score, entities, and timers reset;
    /// the phase returns to [`GamePhase::Start`].
    fn reset(&mut self);

    /// Advance one fixed timestep. `dt` is seconds (the loop always passes
    /// [`crate::consts::SIM_DT`]); `input` carries held keys plus the edge
    /// events for this frame.
    fn step(&mut self, input: &FrameInput, dt: f32);

    /// Draw the current state. `now_ms` is wall-clock time, used only for
    /// cosmetic pulsing, never to advance gameplay.
    fn render(&self, surface: &mut dyn Surface, now_ms: f64);

    fn phase(&self) -> GamePhase;

    fn score(&self) -> u32;
}
