//! Collision types
//!
//! Plain data shared by the circle-vs-rectangle test and the resolver. The
//! collision plane is the world XZ plane: `Vec2::x` is world X and `Vec2::y`
//! is world Z.

use glam::{Vec2, Vec3};

/// Axis-aligned rectangle on the collision plane, stored as its minimum
/// corner and size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rectangle {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rectangle {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle of the given size centred on `center`.
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let min = center - size * 0.5;
        Self::new(min.x, min.y, size.x, size.y)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width * 0.5, self.height * 0.5)
    }
}

/// Result of resolving one frame of movement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionOutcome {
    /// Position the camera should take this frame
    pub position: Vec3,
    /// Whether the candidate was rejected
    pub collided: bool,
    /// First solid cell found overlapping the candidate
    pub cell: Option<(u32, u32)>,
}

/// Project a world position onto the collision plane.
#[inline]
pub fn to_plane(position: Vec3) -> Vec2 {
    Vec2::new(position.x, position.z)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_center() {
        let rec = Rectangle::new(-0.5, 1.5, 1.0, 1.0);
        assert_eq!(rec.center(), Vec2::new(0.0, 2.0));
        assert_eq!(rec.half_extents(), Vec2::splat(0.5));
        assert_eq!(Rectangle::from_center(Vec2::new(0.0, 2.0), Vec2::ONE), rec);
    }

    #[test]
    fn test_to_plane_drops_height() {
        assert_eq!(to_plane(Vec3::new(1.0, 7.0, -2.0)), Vec2::new(1.0, -2.0));
    }
}
