//! Config Tests - JSON Persistence
//!
//! Round-trips the runtime configuration through real files.

use glam::Vec3;
use maze_walker_engine::config::MazeConfig;
use maze_walker_engine::error::MazeError;

#[test]
fn test_save_then_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("maze.json");

    let mut config = MazeConfig::default();
    config.cube_size = 2.0;
    config.map_position = Vec3::new(-4.0, 0.0, 3.0);
    config.target_fps = 0;
    config.camera.normalize_diagonal = true;
    config.collision.player_radius = 0.25;
    config.save(&path).unwrap();

    let loaded = MazeConfig::load(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_from_args_reads_first_argument() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("maze.json");
    std::fs::write(&path, r#"{ "cube_size": 0.5, "window": { "width": 1024 } }"#).unwrap();

    let args = vec!["maze_walker".to_string(), path.display().to_string()];
    let config = MazeConfig::from_args(args.into_iter()).unwrap();
    assert_eq!(config.cube_size, 0.5);
    assert_eq!(config.window.width, 1024);
    assert_eq!(config.window.height, 450);
}

#[test]
fn test_missing_file_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = MazeConfig::load(dir.path().join("absent.json")).unwrap_err();
    assert!(matches!(err, MazeError::Io { .. }));
}

#[test]
fn test_invalid_values_rejected_on_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.json");
    std::fs::write(&path, r#"{ "cube_size": -1.0 }"#).unwrap();
    assert!(matches!(
        MazeConfig::load(&path),
        Err(MazeError::InvalidCubeSize(_))
    ));
}
