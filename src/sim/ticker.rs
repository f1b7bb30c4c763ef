//! Frame-to-substep driver
//!
//! Converts variable animation-frame timestamps into fixed simulation
//! substeps. Edge-triggered inputs (the primary press, clicks) are consumed
//! by the first substep of a frame and cleared; a frame too short to
//! produce a substep leaves them latched for the next frame, so a press
//! arriving between refreshes is never dropped.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};
use crate::sim::{ArcadeGame, FrameInput};

#[derive(Debug, Default)]
pub struct Ticker {
    accumulator_ms: f64,
    last_frame_ms: Option<f64>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the game to `now_ms`. Returns the number of substeps run.
    pub fn advance(
        &mut self,
        now_ms: f64,
        game: &mut dyn ArcadeGame,
        input: &mut FrameInput,
    ) -> u32 {
        let elapsed = match self.last_frame_ms {
            Some(last) => (now_ms - last).max(0.0),
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);
        self.accumulator_ms += elapsed;

        let step_ms = SIM_DT as f64 * 1000.0;
        let mut substeps = 0;
        while self.accumulator_ms >= step_ms && substeps < MAX_SUBSTEPS {
            game.step(input, SIM_DT);
            input.clear_edges();
            self.accumulator_ms -= step_ms;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Stalled tab; drop the backlog instead of fast-forwarding.
            self.accumulator_ms = 0.0;
        }
        substeps
    }
}
