//! Spawn scheduling and off-screen entry points

use glam::Vec2;
use rand::Rng;

/// Fixed-interval spawn scheduler driven by gameplay-elapsed milliseconds.
///
/// The first spawn lands when elapsed time reaches one full interval, and
/// each deadline advances by exactly one interval, so over a duration `d`
/// the timer fires `floor(d / interval)` times with no drift. At most one
/// spawn is reported per call; if the clock jumps past several deadlines
/// (a stalled tab), the schedule re-anchors instead of burst-spawning.
#[derive(Debug, Clone)]
pub struct SpawnTimer {
    interval_ms: f64,
    next_at_ms: f64,
}

impl SpawnTimer {
    pub fn new(interval_ms: f64) -> Self {
        Self {
            interval_ms,
            next_at_ms: interval_ms,
        }
    }

    pub fn interval_ms(&self) -> f64 {
        self.interval_ms
    }

    /// Report whether a spawn is due at `elapsed_ms` and advance the deadline.
    pub fn ready(&mut self, elapsed_ms: f64) -> bool {
        if elapsed_ms < self.next_at_ms {
            return false;
        }
        self.next_at_ms += self.interval_ms;
        if elapsed_ms >= self.next_at_ms {
            // Missed more than one deadline; skip the backlog.
            self.next_at_ms = elapsed_ms + self.interval_ms;
        }
        true
    }

    pub fn reset(&mut self) {
        self.next_at_ms = self.interval_ms;
    }
}

/// Position and velocity for an entity entering from outside the field
#[derive(Debug, Clone, Copy)]
pub struct EdgeSpawn {
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Pick a random field edge and produce a spawn just outside it, moving
/// inward at `speed` with a random perpendicular component of up to the
/// same magnitude. `margin` keeps the along-edge position away from the
/// corners; `outset` is how far outside the edge the entity starts.
pub fn spawn_at_edge<R: Rng>(
    rng: &mut R,
    field: Vec2,
    speed: f32,
    margin: f32,
    outset: f32,
) -> EdgeSpawn {
    let side = rng.random_range(0..4u32);
    let along_x = rng.random_range(margin..field.x - margin);
    let along_y = rng.random_range(margin..field.y - margin);
    let drift = (rng.random_range(0.0..1.0f32) - 0.5) * 2.0 * speed;
    match side {
        0 => EdgeSpawn {
            pos: Vec2::new(along_x, -outset),
            vel: Vec2::new(drift, speed),
        },
        1 => EdgeSpawn {
            pos: Vec2::new(field.x + outset, along_y),
            vel: Vec2::new(-speed, drift),
        },
        2 => EdgeSpawn {
            pos: Vec2::new(along_x, field.y + outset),
            vel: Vec2::new(drift, -speed),
        },
        _ => EdgeSpawn {
            pos: Vec2::new(-outset, along_y),
            vel: Vec2::new(speed, drift),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_first_spawn_at_one_interval() {
        let mut t = SpawnTimer::new(800.0);
        assert!(!t.ready(0.0));
        assert!(!t.ready(799.0));
        assert!(t.ready(800.0));
        assert!(!t.ready(800.0));
    }

    #[test]
    fn test_no_drift_over_many_intervals() {
        let mut t = SpawnTimer::new(800.0);
        let mut spawns = 0;
        let mut elapsed = 0.0;
        while elapsed <= 2400.0 {
            if t.ready(elapsed) {
                spawns += 1;
            }
            elapsed += 100.0;
        }
        assert_eq!(spawns, 3);
    }

    #[test]
    fn test_stall_spawns_once_then_reanchors() {
        let mut t = SpawnTimer::new(500.0);
        // Clock jumps past five deadlines at once.
        assert!(t.ready(2600.0));
        assert!(!t.ready(2700.0));
        assert!(!t.ready(3099.0));
        assert!(t.ready(3100.0));
    }

    #[test]
    fn test_reset_restores_initial_deadline() {
        let mut t = SpawnTimer::new(600.0);
        assert!(t.ready(600.0));
        t.reset();
        assert!(!t.ready(599.0));
        assert!(t.ready(600.0));
    }

    #[test]
    fn test_edge_spawn_moves_inward() {
        let mut rng = Pcg32::seed_from_u64(7);
        let field = Vec2::new(500.0, 500.0);
        for _ in 0..64 {
            let s = spawn_at_edge(&mut rng, field, 2.0, 40.0, 20.0);
            let outside = s.pos.x < 0.0 || s.pos.x > field.x || s.pos.y < 0.0 || s.pos.y > field.y;
            assert!(outside, "spawn starts outside the field: {:?}", s.pos);
            // One step later it is strictly closer to the field center.
            let center = field * 0.5;
            assert!((s.pos + s.vel).distance(center) < s.pos.distance(center));
        }
    }
}
