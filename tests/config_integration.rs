//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables,
//! and that the shipped scene layout builds a world.

use spacescape::config::AppConfig;
use spacescape_core::{SceneLayout, World};
use serial_test::serial;

#[test]
#[serial]
fn test_env_override() {
    std::env::set_var("SPACESCAPE_WINDOW__TITLE", "Test From Env");
    let config = AppConfig::load().unwrap();
    assert_eq!(config.window.title, "Test From Env");
    std::env::remove_var("SPACESCAPE_WINDOW__TITLE");
}

#[test]
#[serial]
fn test_env_overrides_motion_tunable() {
    std::env::set_var("SPACESCAPE_MOTION__ORBIT_RATE", "0.5");
    std::env::set_var("SPACESCAPE_SCENE__SEED", "7");
    let config = AppConfig::load().unwrap();
    std::env::remove_var("SPACESCAPE_MOTION__ORBIT_RATE");
    std::env::remove_var("SPACESCAPE_SCENE__SEED");

    assert_eq!(config.motion.orbit_rate, 0.5);
    // Untouched tunables keep their file values
    assert_eq!(config.motion.resteer_probability, 0.01);
    assert_eq!(config.scene.seed, Some(7));
}

#[test]
#[serial]
fn test_default_file_matches_builtin_defaults() {
    std::env::remove_var("SPACESCAPE_WINDOW__TITLE");

    let config = AppConfig::load().unwrap();
    let builtin = AppConfig::default();
    assert_eq!(config.window.title, builtin.window.title);
    assert_eq!(config.camera.fov, builtin.camera.fov);
    assert_eq!(config.controls.auto_rotate_speed, builtin.controls.auto_rotate_speed);
    assert_eq!(config.motion, builtin.motion);
}

#[test]
#[serial]
fn test_missing_config_dir_uses_defaults() {
    let dir = std::env::temp_dir().join("spacescape-no-config");
    let config = AppConfig::load_from(&dir).unwrap();
    assert_eq!(config.window.width, 1280);
    assert_eq!(config.scene.path, "scenes/solar_system.ron");
}

#[test]
fn test_shipped_scene_builds_world() {
    let config = AppConfig::default();
    let layout = SceneLayout::load(&config.scene.path).unwrap();
    assert_eq!(layout.planets.len(), 8);
    assert_eq!(layout.stars.count, 10_000);
    assert!(layout.astronaut.model.is_some());

    let world = World::from_layout(layout, config.motion, spacescape_core::SceneRng::new(1)).unwrap();
    assert_eq!(world.planets().len(), 8);
    assert_eq!(world.swarm().len(), 20);
}
