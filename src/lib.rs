//! Brand Arcade - branded mini-arcade game demos
//!
//! Core modules:
//! - `config`: brand/copy configuration supplied by the external generator
//! - `sim`: platform-free simulation primitives (phases, input, collision, spawning)
//! - `games`: the six playable variants plus the standalone collector
//! - `render`: drawing surface abstraction and the 2D canvas backend
//! - `platform`: browser mount/teardown and the frame driver

pub mod config;
pub mod games;
pub mod platform;
pub mod render;
pub mod sim;

pub use config::{GameConfig, GameKind};
pub use sim::{ArcadeGame, FrameInput, GamePhase};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Logical field size for the config-selectable variants
    pub const FIELD_SIZE: f32 = 500.0;

    /// Standalone collector field
    pub const COLLECTOR_WIDTH: f32 = 640.0;
    pub const COLLECTOR_HEIGHT: f32 = 480.0;

    /// Shared backdrop styling
    pub const BACKGROUND_COLOR: &str = "#0a0a0f";
    pub const GRID_COLOR: &str = "rgba(255, 255, 255, 0.05)";
    pub const GRID_STEP: f32 = 40.0;
}
