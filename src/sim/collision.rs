//! Collision primitives shared by the game variants
//!
//! Two shapes only: axis-aligned boxes for rectangular sprites and
//! center-distance circles for round ones. All tests are strict-inequality
//! overlaps, matching how the games treat a grazing touch as a miss.

use glam::Vec2;

/// Axis-aligned bounding box, stored as center plus half extents
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub center: Vec2,
    pub half: Vec2,
}

impl Aabb {
    pub fn new(center: Vec2, size: Vec2) -> Self {
        Self {
            center,
            half: size * 0.5,
        }
    }

    /// Box built from a top-left corner, for sprites stored that way
    pub fn from_top_left(top_left: Vec2, size: Vec2) -> Self {
        Self::new(top_left + size * 0.5, size)
    }

    pub fn min(&self) -> Vec2 {
        self.center - self.half
    }

    pub fn max(&self) -> Vec2 {
        self.center + self.half
    }

    pub fn overlaps(&self, other: &Aabb) -> bool {
        let d = (self.center - other.center).abs();
        let reach = self.half + other.half;
        d.x < reach.x && d.y < reach.y
    }

    pub fn contains(&self, point: Vec2) -> bool {
        let d = (point - self.center).abs();
        d.x < self.half.x && d.y < self.half.y
    }
}

/// Circle overlap with sizes given as diameters
pub fn circles_touch(a: Vec2, a_size: f32, b: Vec2, b_size: f32) -> bool {
    let reach = (a_size + b_size) * 0.5;
    a.distance_squared(b) < reach * reach
}

/// Point inside a circle of the given radius
pub fn point_in_circle(point: Vec2, center: Vec2, radius: f32) -> bool {
    point.distance_squared(center) < radius * radius
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aabb_overlap_is_symmetric() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(8.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn test_aabb_edge_touch_is_not_overlap() {
        let a = Aabb::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
        let b = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn test_from_top_left_matches_center_form() {
        let a = Aabb::from_top_left(Vec2::new(0.0, 0.0), Vec2::new(4.0, 6.0));
        assert_eq!(a.center, Vec2::new(2.0, 3.0));
        assert!(a.contains(Vec2::new(3.9, 5.9)));
        assert!(!a.contains(Vec2::new(4.0, 3.0)));
    }

    #[test]
    fn test_circles_touch_uses_diameters() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(14.9, 0.0);
        assert!(circles_touch(a, 20.0, b, 10.0));
        assert!(!circles_touch(a, 20.0, Vec2::new(15.0, 0.0), 10.0));
    }

    #[test]
    fn test_point_in_circle_boundary_excluded() {
        let c = Vec2::new(5.0, 5.0);
        assert!(point_in_circle(Vec2::new(5.0, 8.9), c, 4.0));
        assert!(!point_in_circle(Vec2::new(5.0, 9.0), c, 4.0));
    }
}
