//! Frame input model
//!
//! Key state is split into level-triggered holds and edge-triggered events.
//! Holds persist across substeps; edges (the primary key press and pointer
//! clicks) apply to the first substep of a frame only and are cleared after
//! it, so a multi-substep catch-up frame never double-fires them.

use glam::Vec2;

/// Keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub fire: bool,
}

impl HeldKeys {
    /// Apply a key event. `key` is the lowercased DOM `KeyboardEvent::key`.
    /// Returns true when the key is one we track (the caller prevents the
    /// browser default for those).
    pub fn set_key(&mut self, key: &str, down: bool) -> bool {
        match key {
            "arrowleft" | "a" => self.left = down,
            "arrowright" | "d" => self.right = down,
            "arrowup" | "w" => self.up = down,
            "arrowdown" | "s" => self.down = down,
            " " | "spacebar" => self.fire = down,
            _ => return false,
        }
        true
    }

    /// Horizontal axis in -1..=1
    pub fn axis_x(&self) -> f32 {
        (self.right as i32 - self.left as i32) as f32
    }

    /// Vertical axis in -1..=1, positive is down
    pub fn axis_y(&self) -> f32 {
        (self.down as i32 - self.up as i32) as f32
    }
}

/// Input for one simulation step
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub held: HeldKeys,
    /// Primary key (space) pressed this frame, edge-triggered
    pub primary: bool,
    /// Pointer clicks this frame, in canvas coordinates
    pub clicks: Vec<Vec2>,
}

impl FrameInput {
    /// Drop the edge-triggered events, keeping holds. Called between the
    /// first and second substep of a frame.
    pub fn clear_edges(&mut self) {
        self.primary = false;
        self.clicks.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_key_tracks_arrows_and_wasd() {
        let mut held = HeldKeys::default();
        assert!(held.set_key("arrowleft", true));
        assert!(held.left);
        assert!(held.set_key("d", true));
        assert!(held.right);
        assert_eq!(held.axis_x(), 0.0);
        assert!(held.set_key("arrowleft", false));
        assert_eq!(held.axis_x(), 1.0);
        assert!(!held.set_key("q", true));
    }

    #[test]
    fn test_space_maps_to_fire() {
        let mut held = HeldKeys::default();
        assert!(held.set_key(" ", true));
        assert!(held.fire);
    }

    #[test]
    fn test_clear_edges_keeps_holds() {
        let mut input = FrameInput {
            held: HeldKeys {
                right: true,
                ..Default::default()
            },
            primary: true,
            clicks: vec![Vec2::new(10.0, 10.0)],
        };
        input.clear_edges();
        assert!(!input.primary);
        assert!(input.clicks.is_empty());
        assert!(input.held.right);
    }
}
