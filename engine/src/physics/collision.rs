//! Collision detection and resolution
//!
//! The player is a vertical cylinder collapsed to a circle on the XZ plane.
//! Every solid maze cell contributes its square footprint. Each frame the
//! candidate position is tested against those footprints; any overlap rolls
//! the horizontal movement back to the pre-movement snapshot. There is no
//! sliding and no partial correction.
//!
//! # Scan window
//!
//! Only cells whose footprint can reach the circle are tested: on each axis,
//! cell `i` (centre `origin + i * s`) can touch a circle at `p` with radius `r`
//! only if `|p - origin - i * s| <= s / 2 + r`. The window is that index range
//! clamped to the grid, so it reports exactly what the exhaustive scan does.
//!
//! # Example
//!
//! ```ignore
//! let resolver = CollisionResolver::new(0.1, 1.0, Vec3::ZERO);
//! let before = camera.position;
//! controller.update(&mut camera, &keys, mouse);
//! let outcome = resolver.resolve(&grid, before, camera.position);
//! camera.position = outcome.position;
//! ```

use std::ops::RangeInclusive;

use glam::{Vec2, Vec3};

use super::types::{CollisionOutcome, Rectangle, to_plane};
use crate::config::CollisionConfig;
use crate::world::PixelGrid;

/// Exact circle vs axis-aligned rectangle overlap. Touching counts.
pub fn check_collision_circle_rec(center: Vec2, radius: f32, rec: Rectangle) -> bool {
    let d = (center - rec.center()).abs();
    let half = rec.half_extents();

    if d.x > half.x + radius || d.y > half.y + radius {
        return false;
    }
    if d.x <= half.x || d.y <= half.y {
        return true;
    }

    let corner = d - half;
    corner.length_squared() <= radius * radius
}

/// Tests the player's circle against the solid cells of a [`PixelGrid`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResolver {
    /// Player circle radius
    pub radius: f32,
    /// Edge length of one cell
    pub cube_size: f32,
    /// World offset of cell (0, 0)
    pub map_position: Vec3,
    /// Test every solid cell instead of the neighbourhood window
    pub exhaustive: bool,
}

impl CollisionResolver {
    pub fn new(radius: f32, cube_size: f32, map_position: Vec3) -> Self {
        Self {
            radius,
            cube_size,
            map_position,
            exhaustive: false,
        }
    }

    pub fn from_config(config: &CollisionConfig, cube_size: f32, map_position: Vec3) -> Self {
        Self {
            radius: config.player_radius,
            cube_size,
            map_position,
            exhaustive: config.exhaustive_scan,
        }
    }

    /// World footprint of cell `(x, z)`.
    pub fn cell_rectangle(&self, x: i64, z: i64) -> Rectangle {
        let center = Vec2::new(
            self.map_position.x + x as f32 * self.cube_size,
            self.map_position.z + z as f32 * self.cube_size,
        );
        Rectangle::from_center(center, Vec2::splat(self.cube_size))
    }

    #[inline]
    fn hits_cell(&self, grid: &PixelGrid, point: Vec2, x: i64, z: i64) -> bool {
        grid.is_solid(x, z) && check_collision_circle_rec(point, self.radius, self.cell_rectangle(x, z))
    }

    fn axis_window(&self, p: f32, origin: f32, len: u32) -> Option<RangeInclusive<i64>> {
        let lo = ((p - origin - self.radius) / self.cube_size - 0.5).floor();
        let hi = ((p - origin + self.radius) / self.cube_size + 0.5).ceil();
        if !lo.is_finite() || !hi.is_finite() {
            return None;
        }
        let lo = (lo as i64).max(0);
        let hi = (hi as i64).min(len as i64 - 1);
        (lo <= hi).then_some(lo..=hi)
    }

    /// Index ranges `(x, z)` of the cells that can overlap a circle at `point`.
    pub fn scan_window(
        &self,
        grid: &PixelGrid,
        point: Vec2,
    ) -> Option<(RangeInclusive<i64>, RangeInclusive<i64>)> {
        let xs = self.axis_window(point.x, self.map_position.x, grid.width())?;
        let zs = self.axis_window(point.y, self.map_position.z, grid.height())?;
        Some((xs, zs))
    }

    /// First solid cell overlapping the circle, scanning only the window.
    pub fn overlapping_cell(&self, grid: &PixelGrid, point: Vec2) -> Option<(u32, u32)> {
        let (xs, zs) = self.scan_window(grid, point)?;
        for z in zs {
            for x in xs.clone() {
                if self.hits_cell(grid, point, x, z) {
                    return Some((x as u32, z as u32));
                }
            }
        }
        None
    }

    /// First solid cell overlapping the circle, scanning the whole grid.
    pub fn overlapping_cell_exhaustive(&self, grid: &PixelGrid, point: Vec2) -> Option<(u32, u32)> {
        grid.cells()
            .find(|&(x, z, _)| self.hits_cell(grid, point, x as i64, z as i64))
            .map(|(x, z, _)| (x, z))
    }

    /// Whether a player at `position` overlaps any solid cell.
    pub fn overlaps(&self, grid: &PixelGrid, position: Vec3) -> bool {
        self.find_overlap(grid, to_plane(position)).is_some()
    }

    fn find_overlap(&self, grid: &PixelGrid, point: Vec2) -> Option<(u32, u32)> {
        if self.exhaustive {
            self.overlapping_cell_exhaustive(grid, point)
        } else {
            self.overlapping_cell(grid, point)
        }
    }

    /// Accept `candidate`, or return exactly `previous` on any overlap.
    pub fn resolve(&self, grid: &PixelGrid, previous: Vec3, candidate: Vec3) -> CollisionOutcome {
        match self.find_overlap(grid, to_plane(candidate)) {
            Some(cell) => CollisionOutcome {
                position: previous,
                collided: true,
                cell: Some(cell),
            },
            None => CollisionOutcome {
                position: candidate,
                collided: false,
                cell: None,
            },
        }
    }

    /// Grid cell containing `position`, clamped to the grid.
    pub fn player_cell(&self, grid: &PixelGrid, position: Vec3) -> (u32, u32) {
        let local = (to_plane(position) - Vec2::new(self.map_position.x, self.map_position.z))
            / self.cube_size
            + Vec2::splat(0.5);
        let clamp = |v: f32, len: u32| -> u32 {
            if v.is_nan() {
                return 0;
            }
            (v.floor().max(0.0) as u64).min(len as u64 - 1) as u32
        };
        (clamp(local.x, grid.width()), clamp(local.y, grid.height()))
    }
}
