//! Collision Tests - Circle vs. Wall Cells
//!
//! Exercises the resolver against small hand-made mazes.

use glam::{Vec2, Vec3};
use maze_walker_engine::physics::{CollisionResolver, Rectangle, check_collision_circle_rec};
use maze_walker_engine::world::PixelGrid;

const BOX: [&str; 3] = ["###", "#.#", "###"];

fn resolver() -> CollisionResolver {
    CollisionResolver::new(0.1, 1.0, Vec3::ZERO)
}

// ============================================================================
// Primitive Tests
// ============================================================================

#[test]
fn test_circle_overlapping_edge_band() {
    let rec = Rectangle::new(0.0, 0.0, 1.0, 1.0);
    assert!(check_collision_circle_rec(Vec2::new(1.09, 0.5), 0.1, rec));
    assert!(!check_collision_circle_rec(Vec2::new(1.2, 0.5), 0.1, rec));
}

#[test]
fn test_circle_near_corner_uses_distance() {
    let rec = Rectangle::new(0.0, 0.0, 1.0, 1.0);
    // Inside the bounding band on both axes but outside the rounded corner
    assert!(!check_collision_circle_rec(Vec2::new(1.08, 1.08), 0.1, rec));
    assert!(check_collision_circle_rec(Vec2::new(1.05, 1.05), 0.1, rec));
}

// ============================================================================
// Resolver Tests
// ============================================================================

#[test]
fn test_small_step_inside_room_is_accepted() {
    let grid = PixelGrid::from_layout(&BOX).unwrap();
    let previous = Vec3::new(1.0, 0.6, 1.0);
    let candidate = Vec3::new(1.05, 0.6, 1.0);

    let outcome = resolver().resolve(&grid, previous, candidate);
    assert!(!outcome.collided);
    assert_eq!(outcome.position, candidate);
    assert_eq!(outcome.cell, None);
}

#[test]
fn test_step_into_wall_is_rolled_back() {
    let grid = PixelGrid::from_layout(&BOX).unwrap();
    let previous = Vec3::new(1.0, 0.6, 1.0);
    let candidate = Vec3::new(1.5, 0.58, 1.0);

    let outcome = resolver().resolve(&grid, previous, candidate);
    assert!(outcome.collided);
    assert_eq!(outcome.position, previous);
    assert_eq!(outcome.cell, Some((2, 1)));
}

#[test]
fn test_rollback_keeps_previous_height() {
    let grid = PixelGrid::from_layout(&BOX).unwrap();
    // Bob height differs between the snapshot and the candidate
    let previous = Vec3::new(1.0, 0.62, 1.0);
    let candidate = Vec3::new(1.0, 0.57, 1.55);

    let outcome = resolver().resolve(&grid, previous, candidate);
    assert!(outcome.collided);
    assert_eq!(outcome.position, previous);
    assert_ne!(outcome.position.y, candidate.y);
}

#[test]
fn test_corridor_allows_walking_through() {
    let grid = PixelGrid::from_layout(&["#####", ".....", "#####"]).unwrap();
    let resolver = resolver();
    let mut position = Vec3::new(0.0, 0.6, 1.0);
    for _ in 0..80 {
        let candidate = position + Vec3::new(0.05, 0.0, 0.0);
        let outcome = resolver.resolve(&grid, position, candidate);
        assert!(!outcome.collided, "blocked at {position}");
        position = outcome.position;
    }
    assert!((position.x - 4.0).abs() < 1e-3);
}

#[test]
fn test_outside_the_map_never_collides() {
    let grid = PixelGrid::from_layout(&BOX).unwrap();
    assert!(!resolver().overlaps(&grid, Vec3::new(-5.0, 0.6, -5.0)));
    assert!(!resolver().overlaps(&grid, Vec3::new(10.0, 0.6, 1.0)));
}

#[test]
fn test_map_position_offsets_walls() {
    let grid = PixelGrid::from_layout(&BOX).unwrap();
    let shifted = CollisionResolver::new(0.1, 1.0, Vec3::new(10.0, 0.0, -3.0));
    assert!(!shifted.overlaps(&grid, Vec3::new(11.0, 0.6, -2.0)));
    assert!(shifted.overlaps(&grid, Vec3::new(12.0, 0.6, -2.0)));
    assert_eq!(shifted.player_cell(&grid, Vec3::new(11.2, 0.0, -2.3)), (1, 1));
}

#[test]
fn test_windowed_scan_matches_exhaustive_scan() {
    let grid = PixelGrid::from_layout(&[
        "#######",
        "#..#..#",
        "#.##..#",
        "#...?.#",
        "###.###",
    ])
    .unwrap();

    for cube_size in [1.0f32, 0.75, 2.0] {
        let resolver = CollisionResolver::new(0.3, cube_size, Vec3::new(0.25, 0.0, -0.4));
        for zi in -10..60 {
            for xi in -10..80 {
                let point = Vec2::new(xi as f32 * 0.13, zi as f32 * 0.11);
                assert_eq!(
                    resolver.overlapping_cell(&grid, point),
                    resolver.overlapping_cell_exhaustive(&grid, point),
                    "mismatch at {point} (cube size {cube_size})"
                );
            }
        }
    }
}
